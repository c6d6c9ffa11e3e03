// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env and set up logging (stderr, so stdout stays clean for output)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = error)
//
// Reports are built one item at a time: every Canvas item and every
// repository is fetched in sequence.
//
// Rust concepts used:
// - async/await: every HTTP call is awaited before the next one starts
// - Result<T, E> and `?`: errors bubble up to run() and then to main()
// - match: Pattern matching to pick the subcommand handler
// =============================================================================

mod canvas;        // src/canvas/ - Canvas LMS client and course catalog
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - environment settings
mod error;         // src/error.rs - error type
mod extract;       // src/extract/ - HTML / Markdown text extraction
mod github;        // src/github/ - GitHub API and raw content client
mod manifest;      // src/manifest.rs - requirements -> YAML manifest
mod reading_time;  // src/reading_time.rs - README reading-time estimate
mod report;        // src/report/ - CSV reports
mod sentinel;      // src/sentinel.rs - placeholder values for missing data

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use canvas::CanvasClient;
use cli::{Cli, Commands};
use config::Config;
use github::{GitHubClient, ReadmeContent, README_BRANCHES};

// The #[tokio::main] attribute builds a tokio runtime and runs our async
// main inside it
#[tokio::main]
async fn main() {
    // Run the application and turn its outcome into an exit code
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(()) = the command finished and printed its summary
//   Err = anything that stopped it; nothing partial is written
async fn run() -> Result<()> {
    // Pull CANVAS_TOKEN / GITHUB_TOKEN from .env if there is one
    // A missing .env file is fine
    dotenv::dotenv().ok();

    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Logging goes to stderr so that `page` and `readme` output can be piped
    init_logging(cli.verbose);

    // Tokens, base URLs and the request timeout
    let config = Config::from_env().context("Invalid configuration")?;
    debug!(
        canvas = %config.canvas_base_url,
        github = %config.github_api_url,
        "Loaded configuration"
    );

    // Match on which subcommand was used
    // Each branch hands off to a handle_* function below
    match cli.command {
        Commands::Catalog { course_ids, out_dir } => {
            handle_catalog(&config, &course_ids, &out_dir).await
        }
        Commands::ReadingTime { input, out_dir } => {
            handle_reading_time(&config, &input, &out_dir).await
        }
        Commands::Manifest { input, output } => handle_manifest(&input, &output),
        Commands::Page {
            course_id,
            page_url,
            plain,
            output,
        } => handle_page(&config, course_id, &page_url, plain, output).await,
        Commands::Readme { repo_url, plain } => handle_readme(&config, &repo_url, plain).await,
    }
}

// RUST_LOG wins; otherwise info, or debug with --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Handles the 'catalog' subcommand
async fn handle_catalog(config: &Config, course_ids: &[u64], out_dir: &Path) -> Result<()> {
    info!("🔍 Building catalog for {} course(s)", course_ids.len());

    // One client per service, shared by every request of the run
    let canvas = CanvasClient::new(config)?;
    let github = GitHubClient::new(config)?;

    // Fetch, audit and write; any error aborts before the CSV exists
    let path = report::generate_catalog_report(&canvas, &github, course_ids, out_dir).await?;

    println!("📄 CSV report '{}' saved", path.display());
    Ok(())
}

// Handles the 'reading-time' subcommand
async fn handle_reading_time(config: &Config, input: &Path, out_dir: &Path) -> Result<()> {
    info!("🔍 Estimating reading times for {}", input.display());

    let github = GitHubClient::new(config)?;
    let summary = report::generate_reading_time_report(&github, input, out_dir).await?;

    println!("📊 {} lesson(s) estimated", summary.rows);
    println!(
        "Total Reading Time: {} hours ({} minutes)",
        summary.total_hours, summary.total_minutes
    );
    println!("📄 CSV report '{}' saved", summary.path.display());
    Ok(())
}

// Handles the 'manifest' subcommand
fn handle_manifest(input: &Path, output: &Path) -> Result<()> {
    let manifest = manifest::convert_manifest_file(input, output)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!(
        "📄 Manifest '{}' saved with {} dependencies",
        output.display(),
        manifest.dependencies.len()
    );
    Ok(())
}

// Handles the 'page' subcommand
async fn handle_page(
    config: &Config,
    course_id: u64,
    page_url: &str,
    plain: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let canvas = CanvasClient::new(config)?;
    let page = canvas
        .get_page(course_id, page_url)
        .await
        .with_context(|| format!("Failed to fetch page '{}' of course {}", page_url, course_id))?;

    // A missing body is treated as an empty one
    let body = page.body.as_deref().unwrap_or("");
    let text = if plain {
        extract::strip_to_plain_text(body)
    } else {
        extract::html_to_structured_markdown(&page.title, body)
    };

    // Write to the requested file, or print to stdout
    match output {
        Some(path) => {
            fs::write(&path, &text).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("📄 Page '{}' saved to '{}'", page.title, path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

// Handles the 'readme' subcommand
async fn handle_readme(config: &Config, repo_url: &str, plain: bool) -> Result<()> {
    let github = GitHubClient::new(config)?;
    let repo = github.parse_repo(repo_url)?;

    match github.fetch_readme_with_fallback(&repo).await? {
        ReadmeContent::Found { branch, raw, html } => {
            info!("Found README for {} on branch '{}'", repo, branch);
            if plain {
                let (_, text) = extract::convert_lesson_text(&raw);
                println!("{}", text);
            } else {
                println!("{}", html);
            }
            Ok(())
        }
        ReadmeContent::Missing => bail!(
            "{} has no README on any of the branches {}",
            repo,
            README_BRANCHES.join(", ")
        ),
    }
}

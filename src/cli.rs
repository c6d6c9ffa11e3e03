// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Credentials are not CLI flags: they come from CANVAS_TOKEN and
// GITHUB_TOKEN (see config.rs), so they never end up in shell history.
//
// Rust concepts:
// - Enums with struct-like variants: one variant per subcommand
// - Option<T>: arguments the user may leave out
// - Vec<T>: arguments that take one or more values
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// The whole CLI: a global flag plus exactly one subcommand
//
// `global = true` lets --verbose appear before or after the subcommand
#[derive(Parser, Debug)]
#[command(
    name = "course-repo-report",
    version,
    about = "Reports on Canvas course content and the GitHub repositories it links to",
    long_about = "course-repo-report walks Canvas courses, follows the GitHub repository linked \
                  from each page and assignment, and writes CSV reports: marker files and \
                  branch activity per item, and estimated reading times for lesson READMEs."
)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    // Filled with whichever Commands variant the user picked
    #[command(subcommand)]
    pub command: Commands,
}

// Our subcommands (catalog, reading-time, manifest, page, readme)
//
// The fields of each variant become that subcommand's arguments: plain
// fields are positional, #[arg(long)] fields are --flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the catalog report for one or more courses
    ///
    /// Example: course-repo-report catalog 6933 6679 6680
    Catalog {
        /// Canvas course ids; their order sets each item's phase
        ///
        /// At least one id is required
        #[arg(required = true, num_args = 1..)]
        course_ids: Vec<u64>,

        /// Directory the report is written into
        #[arg(long, default_value = "canvas_reports")]
        out_dir: PathBuf,
    },

    /// Estimate README reading times for the repositories of a catalog report
    ///
    /// Example: course-repo-report reading-time canvas_reports/canvas_report_202306221.csv
    ReadingTime {
        /// A CSV produced by the catalog command (needs a git_url column)
        input: PathBuf,

        /// Directory the report is written into
        #[arg(long, default_value = "reading_time_reports")]
        out_dir: PathBuf,
    },

    /// Convert a pinned requirements file into a YAML manifest
    ///
    /// Example: course-repo-report manifest requirements.txt environment.yml
    Manifest {
        /// Line-oriented pin file
        input: PathBuf,

        /// YAML file to write
        output: PathBuf,
    },

    /// Render one Canvas page as sectioned Markdown (or plain text)
    ///
    /// Example: course-repo-report page 6933 intro-to-pandas
    Page {
        course_id: u64,

        /// The page's URL slug
        page_url: String,

        /// Print plain text instead of Markdown
        #[arg(long)]
        plain: bool,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print a repository's lesson README, trying the usual lesson branches
    ///
    /// Example: course-repo-report readme https://github.com/learn-co-curriculum/dsc-intro
    Readme {
        repo_url: String,

        /// Print plain text instead of rendered HTML
        #[arg(long)]
        plain: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_command() {
        let cli = Cli::parse_from(["course-repo-report", "catalog", "6933", "6679"]);
        match cli.command {
            Commands::Catalog { course_ids, out_dir } => {
                assert_eq!(course_ids, vec![6933, 6679]);
                assert_eq!(out_dir, PathBuf::from("canvas_reports"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_catalog_needs_a_course() {
        assert!(Cli::try_parse_from(["course-repo-report", "catalog"]).is_err());
    }

    #[test]
    fn test_parse_reading_time_with_global_flag() {
        let cli = Cli::parse_from([
            "course-repo-report",
            "reading-time",
            "report.csv",
            "--out-dir",
            "out",
            "-v",
        ]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::ReadingTime { ref input, ref out_dir }
                if input == &PathBuf::from("report.csv") && out_dir == &PathBuf::from("out")
        ));
    }
}

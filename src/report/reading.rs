// src/report/reading.rs
// =============================================================================
// The reading-time report, built from a previous catalog report.
//
// Steps:
// 1. Read the `git_url` column of a catalog CSV
// 2. For every link, fetch the README (curriculum -> master -> main ->
//    solution) and estimate its reading time
// 3. Keep the rows that had both a link and a README
// 4. Write reading_time_estimates_<timestamp>.csv and report the total
//
// Column names follow the published reports. Note that `html_content` holds
// the README *source* and `markdown_content` holds the rendered HTML.
// =============================================================================

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::table::Table;
use super::writer::{write_report, READING_TIMESTAMP_WIDTH};
use crate::error::ReportError;
use crate::extract::serialize_document;
use crate::github::{GitHubClient, ReadmeContent};
use crate::reading_time::{estimate_reading_time, ReadingTime, ReadingTimeRow};

pub const READING_REPORT_PREFIX: &str = "reading_time_estimates";
pub const LINK_COLUMN: &str = "git_url";

pub const READING_COLUMNS: [&str; 12] = [
    LINK_COLUMN,
    "html_content",
    "markdown_content",
    "soup_raw_text",
    "raw_text_blocks",
    "adjusted_text_blocks",
    "text_reading_times",
    "soup_raw_python",
    "raw_python_blocks",
    "adjusted_python_blocks",
    "python_reading_times",
    "total_reading_times",
];

/// Summary of a written reading-time report
#[derive(Debug, Clone)]
pub struct ReadingTimeReport {
    pub path: PathBuf,
    pub rows: usize,
    pub total_minutes: f64,
    pub total_hours: f64,
}

// Reads the repository links of a catalog report, one per row
//
// Empty cells become None so that rows stay aligned with the input.
pub fn read_repo_links(input: &Path) -> crate::error::Result<Vec<Option<String>>> {
    let mut reader = csv::Reader::from_path(input)?;

    let index = reader
        .headers()?
        .iter()
        .position(|header| header == LINK_COLUMN)
        .ok_or_else(|| ReportError::MissingColumn {
            column: LINK_COLUMN.to_string(),
            source_name: input.display().to_string(),
        })?;

    let mut links = Vec::new();
    for record in reader.records() {
        let record = record?;
        let link = record.get(index).map(str::trim).filter(|cell| !cell.is_empty());
        links.push(link.map(str::to_string));
    }

    Ok(links)
}

/// Removes README file views so the link names the repository itself
pub fn normalize_repo_link(link: &str) -> String {
    link.replace("/blob/main/README.md", "")
        .replace("/blob/master/README.md", "")
}

// Fetches the README behind one link
//
// A link that does not name a repository is treated like a missing README.
pub async fn fetch_lesson_readme(github: &GitHubClient, link: &str) -> Result<ReadmeContent> {
    let link = normalize_repo_link(link);

    let repo = match github.parse_repo(&link) {
        Ok(repo) => repo,
        Err(e) => {
            warn!(link = %link, error = %e, "skipping repository link");
            return Ok(ReadmeContent::Missing);
        }
    };

    let content = github
        .fetch_readme_with_fallback(&repo)
        .await
        .with_context(|| format!("Failed to fetch README of {}", repo))?;
    Ok(content)
}

fn format_minutes(minutes: f64) -> String {
    format!("{:.1}", minutes)
}

// Renders one output row from a README and its estimate
pub fn reading_time_row(link: &str, raw: &str, html: &str, row: &ReadingTimeRow) -> Vec<String> {
    vec![
        link.to_string(),
        raw.to_string(),
        html.to_string(),
        serialize_document(raw),
        serde_json::to_string(&row.text_blocks).unwrap_or_default(),
        row.prose_word_count.to_string(),
        format_minutes(row.prose_minutes),
        serde_json::to_string(&row.code_blocks).unwrap_or_default(),
        row.code_block_count.to_string(),
        row.code_words.to_string(),
        format_minutes(row.code_minutes),
        format_minutes(row.total_minutes),
    ]
}

/// Python-style round(minutes / 60, 1)
pub fn minutes_to_hours(minutes: f64) -> f64 {
    (minutes / 60.0 * 10.0).round_ties_even() / 10.0
}

pub async fn generate_reading_time_report(
    github: &GitHubClient,
    input: &Path,
    out_dir: &Path,
) -> Result<ReadingTimeReport> {
    let links = read_repo_links(input)
        .with_context(|| format!("Failed to read repository links from {}", input.display()))?;
    info!("Read {} rows from {}", links.len(), input.display());

    let mut table = Table::new(READING_COLUMNS);
    let mut total_minutes = 0.0;
    let mut skipped = 0;

    for link in &links {
        let Some(link) = link else {
            skipped += 1;
            continue;
        };

        let content = fetch_lesson_readme(github, link).await?;
        let ReadmeContent::Found { raw, html, .. } = &content else {
            skipped += 1;
            continue;
        };
        let ReadingTime::Estimated(row) = estimate_reading_time(Some(raw.as_str())) else {
            skipped += 1;
            continue;
        };

        total_minutes += row.total_minutes;
        table.push_row(reading_time_row(link, raw, html, &row))?;
    }

    if skipped > 0 {
        info!("Skipped {} rows without a repository README", skipped);
    }
    if table.is_empty() {
        warn!("No README found for any row of {}", input.display());
    }

    let path = write_report(&table, out_dir, READING_REPORT_PREFIX, READING_TIMESTAMP_WIDTH)
        .with_context(|| format!("Failed to write report into {}", out_dir.display()))?;

    Ok(ReadingTimeReport {
        path,
        rows: table.len(),
        total_minutes,
        total_hours: minutes_to_hours(total_minutes),
    })
}

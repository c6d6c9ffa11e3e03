// src/report/catalog.rs
// =============================================================================
// The catalog report: Canvas content joined with its GitHub repositories.
//
// Steps:
// 1. Pull every page and assignment of the requested courses
// 2. For each item with a repository link:
//    - probe `.canvas` on master and on main
//    - list the branches and fetch each branch's last commit date
// 3. Build one row per item, then spread the branch dates into columns
// 4. Write canvas_report_<timestamp>.csv
//
// Any propagated error (Canvas, commit dates) aborts the whole run before
// anything is written.
// =============================================================================

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::table::{render_branch_updates, BranchUpdates, Table};
use super::writer::{write_report, CATALOG_TIMESTAMP_WIDTH};
use crate::canvas::{fetch_course_content, CanvasClient, ContentItem, ItemKind};
use crate::github::GitHubClient;
use crate::sentinel::{render_bool, Lookup, FALSE};

pub const CATALOG_REPORT_PREFIX: &str = "canvas_report";
pub const BRANCH_UPDATES_COLUMN: &str = "git_repo_all_branches_updates";

/// Fixed columns, in order; one column per branch name follows them
pub const CATALOG_COLUMNS: [&str; 10] = [
    "phase",
    "course_number",
    "canvas_page_id",
    "canvas_page_title",
    "canvas_page_url",
    "canvas_updated_at",
    "git_url",
    "git_master_branch_dot_canvas",
    "git_main_branch_dot_canvas",
    BRANCH_UPDATES_COLUMN,
];

/// What we learned about the repository behind one content item
#[derive(Debug, Clone, PartialEq)]
pub struct RepoAudit {
    pub master_marker: bool,
    pub main_marker: bool,
    pub branch_updates: Lookup<BranchUpdates>,
}

impl RepoAudit {
    fn unavailable() -> Self {
        RepoAudit {
            master_marker: false,
            main_marker: false,
            branch_updates: Lookup::Unavailable,
        }
    }
}

// Checks one repository link
//
// No link, or a link that does not parse, gives an all-unavailable audit.
// A failing commit-date lookup is an error.
pub async fn audit_repository(github: &GitHubClient, link: Option<&str>) -> Result<RepoAudit> {
    let Some(link) = link else {
        return Ok(RepoAudit::unavailable());
    };

    let repo = match github.parse_repo(link) {
        Ok(repo) => repo,
        Err(e) => {
            warn!(link = %link, error = %e, "skipping repository link");
            return Ok(RepoAudit::unavailable());
        }
    };

    let master_marker = github.has_marker_file(&repo, "master").await;
    let main_marker = github.has_marker_file(&repo, "main").await;

    let branch_updates = match github.list_branches(&repo).await {
        Lookup::Found(branches) => {
            let mut updates = Vec::with_capacity(branches.len());
            for branch in branches {
                let date = github
                    .last_commit_timestamp(&repo, &branch)
                    .await
                    .with_context(|| format!("last commit of {} on {}", repo, branch))?;
                updates.push((branch, date));
            }
            info!("{} complete", link);
            Lookup::Found(updates)
        }
        Lookup::Unavailable => Lookup::Unavailable,
    };

    Ok(RepoAudit {
        master_marker,
        main_marker,
        branch_updates,
    })
}

fn catalog_row(item: &ContentItem, audit: &RepoAudit) -> Vec<String> {
    // Only pages are addressed by slug
    let url = match (item.kind, &item.url) {
        (ItemKind::Page, Some(url)) => url.clone(),
        _ => FALSE.to_string(),
    };

    vec![
        item.phase.to_string(),
        item.course_id.to_string(),
        item.item_id.to_string(),
        item.title.clone(),
        url,
        item.last_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
        item.repo_link.clone().unwrap_or_default(),
        render_bool(audit.master_marker),
        render_bool(audit.main_marker),
        render_branch_updates(&audit.branch_updates),
    ]
}

// Joins content items with their audits (same order, same length)
pub fn build_catalog_table(items: &[ContentItem], audits: &[RepoAudit]) -> Result<Table> {
    let mut table = Table::new(CATALOG_COLUMNS);

    for (item, audit) in items.iter().zip(audits) {
        table.push_row(catalog_row(item, audit))?;
    }

    let maps: Vec<Lookup<BranchUpdates>> = audits
        .iter()
        .map(|audit| audit.branch_updates.clone())
        .collect();
    table.flatten_branch_map(BRANCH_UPDATES_COLUMN, &maps)?;

    Ok(table)
}

pub async fn generate_catalog_report(
    canvas: &CanvasClient,
    github: &GitHubClient,
    course_ids: &[u64],
    out_dir: &Path,
) -> Result<PathBuf> {
    let items = fetch_course_content(canvas, course_ids, github.web_prefix())
        .await
        .context("Failed to retrieve course content from Canvas")?;
    info!("Retrieved {} content items", items.len());

    let mut audits = Vec::with_capacity(items.len());
    for item in &items {
        audits.push(audit_repository(github, item.repo_link.as_deref()).await?);
    }

    let table = build_catalog_table(&items, &audits)?;
    let path = write_report(&table, out_dir, CATALOG_REPORT_PREFIX, CATALOG_TIMESTAMP_WIDTH)
        .with_context(|| format!("Failed to write report into {}", out_dir.display()))?;

    Ok(path)
}

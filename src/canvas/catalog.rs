// src/canvas/catalog.rs
// =============================================================================
// Turns Canvas courses into a flat list of content items.
//
// For each course (in the order given):
//   1. every page, in API order, fetched one by one for its body
//   2. every assignment, in API order, fetched one by one for its description
//
// `phase` is the position of the course in the input list. Listing the same
// course twice gives it two phases; nothing else depends on the value.
// =============================================================================

use chrono::{DateTime, Utc};
use tracing::info;

use super::client::CanvasClient;
use crate::error::Result;
use crate::extract::first_repo_link;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Page,
    Assignment,
}

/// One page or assignment of a course; one row of the catalog report
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub phase: usize,
    pub course_id: u64,
    pub kind: ItemKind,
    pub item_id: u64,
    pub title: String,
    /// Page slug; assignments have none
    pub url: Option<String>,
    pub last_updated: DateTime<Utc>,
    /// First anchor of the content, when it points at a repository
    pub repo_link: Option<String>,
}

pub async fn fetch_course_content(
    client: &CanvasClient,
    course_ids: &[u64],
    repo_prefix: &str,
) -> Result<Vec<ContentItem>> {
    let mut items = Vec::new();

    for (phase, &course_id) in course_ids.iter().enumerate() {
        let course = client.get_course(course_id).await?;
        let course_name = course.name.as_deref().unwrap_or("(unnamed)");

        let pages = client.list_pages(course_id).await?;
        info!(
            "Retrieving {} pages from course #{} {}",
            pages.len(),
            course.id,
            course_name
        );
        for summary in pages {
            let page = client.get_page(course_id, &summary.url).await?;
            let body = page.body.as_deref().unwrap_or_default();

            items.push(ContentItem {
                phase,
                course_id,
                kind: ItemKind::Page,
                item_id: page.page_id,
                repo_link: first_repo_link(body, repo_prefix),
                title: page.title,
                url: Some(page.url),
                last_updated: page.updated_at,
            });
        }

        let assignments = client.list_assignments(course_id).await?;
        info!(
            "Retrieving {} assignments from course #{} {}",
            assignments.len(),
            course.id,
            course_name
        );
        for summary in assignments {
            let assignment = client.get_assignment(course_id, summary.id).await?;
            let description = assignment.description.as_deref().unwrap_or_default();

            items.push(ContentItem {
                phase,
                course_id,
                kind: ItemKind::Assignment,
                item_id: assignment.id,
                repo_link: first_repo_link(description, repo_prefix),
                title: assignment.name,
                url: None,
                last_updated: assignment.updated_at,
            });
        }
    }

    Ok(items)
}

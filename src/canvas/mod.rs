// src/canvas/mod.rs
// =============================================================================
// This module reads course content from the Canvas LMS.
//
// - client: authenticated REST calls with Link-header pagination
// - catalog: courses -> ordered list of ContentItem (pages, then assignments)
// =============================================================================

mod catalog;
mod client;

pub use catalog::{fetch_course_content, ContentItem, ItemKind};
pub use client::CanvasClient;

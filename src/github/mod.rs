// src/github/mod.rs
// =============================================================================
// This module handles everything we need from GitHub.
//
// Currently implements:
// - Parsing repository links into owner/name
// - Branch listing and per-branch last-commit dates (REST API)
// - `.canvas` marker file checks and README retrieval (raw content host)
// =============================================================================

mod client;
mod repo;

pub use client::{GitHubClient, ReadmeContent, README_BRANCHES};

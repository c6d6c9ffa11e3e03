// src/github/client.rs
// =============================================================================
// This module talks to GitHub: the REST API and the raw content host.
//
// What we ask GitHub:
// - Which branches does a repository have?          (REST API)
// - When was the last commit on a branch?           (REST API)
// - Does a branch carry a `.canvas` marker file?     (raw content)
// - What does the README say on a branch?           (raw content)
//
// Each question has its own failure policy, and the signatures show it:
// - list_branches / has_marker_file never fail; problems become
//   Lookup::Unavailable / false
// - last_commit_timestamp returns Err(RequestFailure | MissingField)
// - fetch_readme renders whatever body came back, even for a 404, and
//   leaves it to the caller to look at the status code
// =============================================================================

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{redirect, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use super::repo::RepoRef;
use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::extract::render_markdown;
use crate::sentinel::Lookup;

/// Branches tried, in order, when looking for a lesson README
pub const README_BRANCHES: [&str; 4] = ["curriculum", "master", "main", "solution"];

/// Path of the marker file probed on each branch
pub const MARKER_FILE: &str = ".canvas";

const USER_AGENT: &str = concat!("course-repo-report/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct BranchSummary {
    name: String,
}

/// A README as served by the raw content host
///
/// `html` is rendered from `raw` no matter what `status` says. A missing
/// README comes back as a 404 whose body ("404: Not Found") renders just
/// fine, so always check `is_found()` before trusting the content.
#[derive(Debug, Clone)]
pub struct Readme {
    pub status: StatusCode,
    pub raw: String,
    pub html: String,
}

impl Readme {
    pub fn is_found(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// Outcome of the README branch fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeContent {
    Found {
        branch: String,
        raw: String,
        html: String,
    },
    Missing,
}

pub struct GitHubClient {
    /// Client for the REST API (follows redirects for renamed repos)
    api: Client,
    /// Client for the raw content host (never follows redirects)
    raw: Client,
    api_url: String,
    raw_url: String,
    web_prefix: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let build = |policy: redirect::Policy| {
            Client::builder()
                .user_agent(USER_AGENT)
                .timeout(config.request_timeout)
                .redirect(policy)
                .build()
                .map_err(|e| ReportError::Config(format!("cannot build HTTP client: {}", e)))
        };

        Ok(GitHubClient {
            api: build(redirect::Policy::limited(5))?,
            raw: build(redirect::Policy::none())?,
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            raw_url: config.github_raw_url.trim_end_matches('/').to_string(),
            web_prefix: config.github_web_prefix.clone(),
            token: config.github_token.clone(),
        })
    }

    /// Web prefix that repository links start with
    pub fn web_prefix(&self) -> &str {
        &self.web_prefix
    }

    /// Parses a repository link using this client's web prefix
    pub fn parse_repo(&self, url: &str) -> Result<RepoRef> {
        RepoRef::parse(url, &self.web_prefix)
    }

    // Lists the branch names of a repository (first page only, API order)
    //
    // Any failure (rate limit, unknown repo, missing token, network) gives
    // Lookup::Unavailable.
    pub async fn list_branches(&self, repo: &RepoRef) -> Lookup<Vec<String>> {
        let url = format!("{}/repos/{}/{}/branches", self.api_url, repo.owner, repo.name);

        let mut request = self
            .api
            .get(&url)
            .header(ACCEPT, "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Token {}", token));
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(repo = %repo, error = %e, "branch listing failed");
                return Lookup::Unavailable;
            }
        };

        if !response.status().is_success() {
            debug!(repo = %repo, status = %response.status(), "branches unavailable");
            return Lookup::Unavailable;
        }

        match response.json::<Vec<BranchSummary>>().await {
            Ok(branches) => Lookup::Found(branches.into_iter().map(|b| b.name).collect()),
            Err(e) => {
                warn!(repo = %repo, error = %e, "unreadable branch listing");
                Lookup::Unavailable
            }
        }
    }

    // Checks for the marker file on a branch
    //
    // True only for an exact 200. Redirects, 404s and network errors are
    // all false.
    pub async fn has_marker_file(&self, repo: &RepoRef, branch: &str) -> bool {
        let url = format!(
            "{}/{}/{}/{}/{}",
            self.raw_url, repo.owner, repo.name, branch, MARKER_FILE
        );

        match self.raw.get(&url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                warn!(url = %url, error = %e, "marker file check failed");
                false
            }
        }
    }

    // Returns the ISO-8601 date of the last commit on a branch
    //
    // Unlike the two lookups above, failures here are errors and stop the
    // report.
    pub async fn last_commit_timestamp(&self, repo: &RepoRef, branch: &str) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/branches/{}",
            self.api_url, repo.owner, repo.name, branch
        );

        let mut request = self.api.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ReportError::request(&url, e))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ReportError::request(&url, e))?;

        body.pointer("/commit/commit/author/date")
            .and_then(|date| date.as_str())
            .map(str::to_string)
            .ok_or_else(|| ReportError::MissingField {
                url,
                field: "commit.commit.author.date".to_string(),
            })
    }

    // Fetches README.md from one branch
    //
    // Only transport failures are errors. The body of any response, 404s
    // included, is rendered to HTML.
    pub async fn fetch_readme(&self, repo: &RepoRef, branch: &str) -> Result<Readme> {
        let url = format!(
            "{}/{}/{}/{}/README.md",
            self.raw_url, repo.owner, repo.name, branch
        );
        debug!(url = %url, "fetching README");

        let response = self
            .raw
            .get(&url)
            .send()
            .await
            .map_err(|e| ReportError::request(&url, e))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| ReportError::request(&url, e))?;
        let html = render_markdown(&raw);

        Ok(Readme { status, raw, html })
    }

    // Fetches the README from the first branch in README_BRANCHES that has one
    pub async fn fetch_readme_with_fallback(&self, repo: &RepoRef) -> Result<ReadmeContent> {
        for branch in README_BRANCHES {
            let readme = self.fetch_readme(repo, branch).await?;

            if readme.is_found() {
                return Ok(ReadmeContent::Found {
                    branch: branch.to_string(),
                    raw: readme.raw,
                    html: readme.html,
                });
            }
        }

        debug!(repo = %repo, "no README on any fallback branch");
        Ok(ReadmeContent::Missing)
    }
}

// src/canvas/client.rs
// =============================================================================
// A small client for the Canvas LMS REST API (v1).
//
// Endpoints used:
//   GET /api/v1/courses/:id
//   GET /api/v1/courses/:id/pages                 (paginated)
//   GET /api/v1/courses/:id/pages/:url            (includes body)
//   GET /api/v1/courses/:id/assignments           (paginated)
//   GET /api/v1/courses/:id/assignments/:id
//
// Pagination:
// Canvas returns at most `per_page` items and a `Link` header such as
//   <https://host/api/v1/courses/1/pages?page=2&per_page=100>; rel="next",
//   <https://host/api/v1/courses/1/pages?page=9&per_page=100>; rel="last"
// We keep following rel="next" until it disappears.
//
// Every Canvas failure is an error: without the catalog there is no report.
// =============================================================================

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{ReportError, Result};

const PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub page_id: u64,
    /// Canvas' slug for the page, used to address it
    pub url: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    /// Only present on the single-page endpoint
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub id: u64,
    pub name: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

pub struct CanvasClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl CanvasClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ReportError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(CanvasClient {
            http,
            base_url: config.canvas_base_url.trim_end_matches('/').to_string(),
            token: config.canvas_token.clone(),
        })
    }

    pub async fn get_course(&self, course_id: u64) -> Result<Course> {
        self.get_json(&self.api_url(&format!("courses/{}", course_id)))
            .await
    }

    pub async fn list_pages(&self, course_id: u64) -> Result<Vec<Page>> {
        self.get_paginated(&self.api_url(&format!("courses/{}/pages", course_id)))
            .await
    }

    pub async fn get_page(&self, course_id: u64, page_url: &str) -> Result<Page> {
        self.get_json(&self.api_url(&format!("courses/{}/pages/{}", course_id, page_url)))
            .await
    }

    pub async fn list_assignments(&self, course_id: u64) -> Result<Vec<Assignment>> {
        self.get_paginated(&self.api_url(&format!("courses/{}/assignments", course_id)))
            .await
    }

    pub async fn get_assignment(&self, course_id: u64, assignment_id: u64) -> Result<Assignment> {
        self.get_json(&self.api_url(&format!(
            "courses/{}/assignments/{}",
            course_id, assignment_id
        )))
        .await
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    // Sends an authenticated GET; error statuses become RequestFailure
    async fn send(&self, url: &str) -> Result<Response> {
        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ReportError::request(url, e))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(url).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ReportError::request(url, e))
    }

    // Collects every item of a paginated collection, in API order
    async fn get_paginated<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(format!("{}?per_page={}", url, PER_PAGE));

        while let Some(page_url) = next {
            debug!(url = %page_url, "fetching Canvas page");
            let response = self.send(&page_url).await?;
            next = next_page_link(response.headers());

            let mut batch: Vec<T> = response
                .json()
                .await
                .map_err(|e| ReportError::request(&page_url, e))?;
            items.append(&mut batch);
        }

        Ok(items)
    }
}

// Extracts the rel="next" target from a Link header, if any
fn next_page_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim().strip_prefix('<')?.strip_suffix('>')?;
        let is_next = parts.any(|param| param.trim() == r#"rel="next""#);

        if is_next {
            Url::parse(target).ok().map(String::from)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use reqwest::header::HeaderValue;

    fn client_for(server: &Server) -> CanvasClient {
        let config = Config {
            canvas_base_url: server.url(),
            canvas_token: Some("canvas-secret".to_string()),
            ..Config::default()
        };
        CanvasClient::new(&config).unwrap()
    }

    #[test]
    fn test_next_page_link() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(
                "<https://canvas.test/api/v1/courses/1/pages?page=1&per_page=100>; rel=\"current\",\
                 <https://canvas.test/api/v1/courses/1/pages?page=2&per_page=100>; rel=\"next\",\
                 <https://canvas.test/api/v1/courses/1/pages?page=3&per_page=100>; rel=\"last\"",
            ),
        );

        assert_eq!(
            next_page_link(&headers),
            Some("https://canvas.test/api/v1/courses/1/pages?page=2&per_page=100".to_string())
        );
    }

    #[test]
    fn test_no_next_page_on_last_page() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(
                "<https://canvas.test/api/v1/courses/1/pages?page=3&per_page=100>; rel=\"last\"",
            ),
        );
        assert_eq!(next_page_link(&headers), None);
        assert_eq!(next_page_link(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_list_pages_follows_pagination() {
        let mut server = Server::new_async().await;
        let next = format!(
            "<{}/api/v1/courses/42/pages?page=2&per_page=100>; rel=\"next\"",
            server.url()
        );

        let first = server
            .mock("GET", "/api/v1/courses/42/pages")
            .match_query(Matcher::Exact("per_page=100".to_string()))
            .match_header("authorization", "Bearer canvas-secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("link", &next)
            .with_body(
                r#"[{"page_id": 1, "url": "intro", "title": "Intro", "updated_at": "2023-06-01T10:00:00Z"}]"#,
            )
            .create_async()
            .await;
        let second = server
            .mock("GET", "/api/v1/courses/42/pages")
            .match_query(Matcher::Exact("page=2&per_page=100".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"page_id": 2, "url": "outro", "title": "Outro", "updated_at": "2023-06-02T10:00:00Z"}]"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let pages = client.list_pages(42).await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        let slugs: Vec<_> = pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(slugs, vec!["intro", "outro"]);
        assert!(pages[0].body.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_request_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/courses/7")
            .with_status(401)
            .with_body(r#"{"errors": [{"message": "Invalid access token."}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.get_course(7).await;
        assert!(matches!(result, Err(ReportError::RequestFailure { .. })));
    }
}

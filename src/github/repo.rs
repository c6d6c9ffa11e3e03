// src/github/repo.rs
// =============================================================================
// Parsing repository links into owner/name pairs.
//
// Canvas content links to repositories in a few shapes:
//   https://github.com/owner/repo
//   https://github.com/owner/repo/
//   https://github.com/owner/repo.git
//   https://github.com/owner/repo/blob/master/README.md
//   https://github.com/owner/repo/tree/solution
//
// All of them reduce to ("owner", "repo").
// =============================================================================

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

// owner, any intermediate segments, then the last segment as the name
fn owner_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([^/]+)/(?:.*/)?([^/]+)$").unwrap())
}

impl RepoRef {
    /// Parses a repository URL that starts with the given web prefix
    ///
    /// Example:
    ///   "https://github.com/rust-lang/rust/blob/master/README.md"
    ///   -> RepoRef { owner: "rust-lang", name: "rust" }
    pub fn parse(url: &str, prefix: &str) -> Result<Self> {
        let invalid = || ReportError::InvalidRepoUrl {
            url: url.to_string(),
        };

        let path = url.trim().strip_prefix(prefix).ok_or_else(invalid)?;

        // Query strings and fragments never name the repository
        let path = path.split(['?', '#']).next().unwrap_or(path);

        // Drop file and tree views: everything from /blob/ or /tree/ onwards
        let path = ["/blob/", "/tree/"]
            .iter()
            .filter_map(|marker| path.find(marker))
            .min()
            .map_or(path, |cut| &path[..cut]);

        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        let captures = owner_name_pattern().captures(path).ok_or_else(invalid)?;

        Ok(RepoRef {
            owner: captures[1].to_string(),
            name: captures[2].to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GITHUB: &str = "https://github.com/";

    fn parse(url: &str) -> RepoRef {
        RepoRef::parse(url, GITHUB).unwrap()
    }

    #[test]
    fn test_parse_plain_url() {
        let repo = parse("https://github.com/learn-co-curriculum/dsc-mathematical-notation");
        assert_eq!(repo.owner, "learn-co-curriculum");
        assert_eq!(repo.name, "dsc-mathematical-notation");
    }

    #[test]
    fn test_parse_strips_suffixes() {
        let expected = RepoRef {
            owner: "user".to_string(),
            name: "repo".to_string(),
        };
        assert_eq!(parse("https://github.com/user/repo.git"), expected);
        assert_eq!(parse("https://github.com/user/repo/"), expected);
        assert_eq!(parse("https://github.com/user/repo/blob/master/README.md"), expected);
        assert_eq!(parse("https://github.com/user/repo/tree/solution"), expected);
    }

    #[test]
    fn test_parse_drops_query_and_fragment() {
        let expected = RepoRef {
            owner: "o".to_string(),
            name: "r".to_string(),
        };
        assert_eq!(parse("https://github.com/o/r#readme"), expected);
        assert_eq!(parse("https://github.com/o/r?tab=readme-ov-file"), expected);
        assert_eq!(parse("https://github.com/o/r/?tab=readme#setup"), expected);
        assert_eq!(parse("https://github.com/o/r/blob/main/README.md#intro"), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(parse("https://github.com/a/b").to_string(), "a/b");
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(RepoRef::parse("https://gitlab.com/user/repo", GITHUB).is_err());
        assert!(RepoRef::parse("https://github.com/just-an-owner", GITHUB).is_err());
        assert!(RepoRef::parse("https://github.com/", GITHUB).is_err());
    }
}

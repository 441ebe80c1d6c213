//! URL path hygiene checks.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

use crate::utils::compile_regex_unsafe;

const MAX_PATH_CHARS: usize = 100;

static SPECIAL_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"[^a-zA-Z0-9/-]", "SPECIAL_CHAR_RE"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlAnalysis {
    pub path: String,
    pub query_parameters: Option<String>,
    pub issues: Vec<String>,
    pub is_optimized: bool,
}

/// Flags path traits that make a URL harder to read or share. Each trait is a
/// separate issue; a trailing slash is not one.
pub fn analyze_url(url: &Url) -> UrlAnalysis {
    let path = url.path();
    let query = url.query().filter(|q| !q.is_empty());
    let mut issues = Vec::new();

    if path.chars().any(char::is_uppercase) {
        issues.push("URL contains uppercase letters".to_string());
    }
    if SPECIAL_CHAR_RE.is_match(path) {
        issues.push("URL contains special characters".to_string());
    }
    if path.contains("--") {
        issues.push("URL contains double hyphens".to_string());
    }
    if path.chars().count() > MAX_PATH_CHARS {
        issues.push("URL is too long".to_string());
    }
    if query.is_some() {
        issues.push("URL contains query parameters".to_string());
    }

    UrlAnalysis {
        path: path.to_string(),
        query_parameters: query.map(str::to_string),
        is_optimized: issues.is_empty(),
        issues,
    }
}

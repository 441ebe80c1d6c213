//! Schema.org structured data detection.
//!
//! Counts JSON-LD blocks and schema.org microdata, and collects the declared
//! types from both.

use regex::Regex;
use scraper::Selector;
use serde::Serialize;
use std::sync::LazyLock;

use crate::document::{AttrMatch, Document};
use crate::utils::{compile_regex_unsafe, parse_selector_unsafe};

static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(r#"script[type="application/ld+json"]"#, "JSON_LD_SELECTOR")
});

/// Used when a JSON-LD block is not valid JSON.
static TYPE_FALLBACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r#""@type"\s*:\s*"([^"]+)""#, "TYPE_FALLBACK_RE")
});

const SCHEMA_ORG: &str = "schema.org";
const SCHEMA_ORG_PATH: &str = "schema.org/";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaMarkup {
    pub has_schema: bool,
    pub json_ld_count: usize,
    pub microdata_count: usize,
    pub detected_types: Vec<String>,
}

pub fn check_schema_markup(doc: &Document) -> SchemaMarkup {
    let scripts = doc.select(&JSON_LD_SELECTOR);
    let microdata = doc.find_by_attr("itemtype", AttrMatch::Contains(SCHEMA_ORG));

    let mut detected_types = Vec::new();
    for script in &scripts {
        let body = script.raw_text();
        if body.trim().is_empty() {
            continue;
        }
        detected_types.extend(json_ld_types(&body));
    }
    for element in &microdata {
        let declared = element
            .attr("itemtype")
            .and_then(|itemtype| itemtype.split_once(SCHEMA_ORG_PATH))
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty());
        if let Some(schema_type) = declared {
            detected_types.push(schema_type.to_string());
        }
    }

    SchemaMarkup {
        has_schema: !scripts.is_empty() || !microdata.is_empty(),
        json_ld_count: scripts.len(),
        microdata_count: microdata.len(),
        detected_types,
    }
}

/// `@type` values of one JSON-LD block.
///
/// Handles a single object or a top-level array of objects, with `@type` as a
/// string or an array of strings. Invalid JSON falls back to the first quoted
/// `"@type": "..."` in the text.
fn json_ld_types(body: &str) -> Vec<String> {
    let value: serde_json::Value = match serde_json::from_str(body.trim()) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("JSON-LD block is not valid JSON ({}), using text search", e);
            return TYPE_FALLBACK_RE
                .captures(body)
                .and_then(|caps| caps.get(1))
                .map(|m| vec![m.as_str().to_string()])
                .unwrap_or_default();
        }
    };

    let objects: Vec<&serde_json::Value> = match &value {
        serde_json::Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut types = Vec::new();
    for object in objects {
        match object.get("@type") {
            Some(serde_json::Value::String(t)) => types.push(t.clone()),
            Some(serde_json::Value::Array(list)) => {
                types.extend(list.iter().filter_map(|t| t.as_str()).map(str::to_string))
            }
            _ => {}
        }
    }
    types
}

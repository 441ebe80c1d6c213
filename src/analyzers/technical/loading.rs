//! Resource loading hints.

use scraper::Selector;
use serde::Serialize;
use std::sync::LazyLock;

use crate::document::{AttrMatch, Document};
use crate::utils::parse_selector_unsafe;

static EXTERNAL_SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("script[src]", "EXTERNAL_SCRIPT_SELECTOR"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptOptimization {
    pub total_scripts: usize,
    pub async_scripts: usize,
    pub defer_scripts: usize,
    pub script_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadingOptimization {
    pub has_resource_hints: bool,
    pub preload_count: usize,
    pub prefetch_count: usize,
    pub dns_prefetch_count: usize,
    pub script_optimization: ScriptOptimization,
    pub has_lazy_loading: bool,
    pub lazy_loading_count: usize,
    /// Hints 40%, script ratio 40%, lazy loading 20%.
    pub optimization_score: u8,
}

pub fn check_loading_optimization(doc: &Document) -> LoadingOptimization {
    let preload_count = doc.find_links_with_rel("preload").len();
    let prefetch_count = doc.find_links_with_rel("prefetch").len();
    let dns_prefetch_count = doc.find_links_with_rel("dns-prefetch").len();
    let has_resource_hints = preload_count + prefetch_count + dns_prefetch_count > 0;

    let scripts = doc.select(&EXTERNAL_SCRIPT_SELECTOR);
    let async_scripts = scripts.iter().filter(|s| s.has_attr("async")).count();
    let defer_scripts = scripts.iter().filter(|s| s.has_attr("defer")).count();
    // A script carrying both attributes counts twice, capped at 100.
    let script_ratio =
        ((async_scripts + defer_scripts) as f64 / scripts.len().max(1) as f64 * 100.0).min(100.0);

    let lazy_loading_count = doc.find_by_attr("loading", AttrMatch::Exact("lazy")).len();
    let has_lazy_loading = lazy_loading_count > 0;

    let mut optimization = script_ratio * 0.4;
    if has_resource_hints {
        optimization += 40.0;
    }
    if has_lazy_loading {
        optimization += 20.0;
    }

    LoadingOptimization {
        has_resource_hints,
        preload_count,
        prefetch_count,
        dns_prefetch_count,
        script_optimization: ScriptOptimization {
            total_scripts: scripts.len(),
            async_scripts,
            defer_scripts,
            script_score: script_ratio.round() as u8,
        },
        has_lazy_loading,
        lazy_loading_count,
        optimization_score: optimization.round() as u8,
    }
}

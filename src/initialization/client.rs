//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use reqwest::ClientBuilder;

/// Maximum redirect hops followed when fetching a page.
const MAX_REDIRECTS: usize = 10;

/// Initializes the HTTP client used to fetch pages.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Timeout from the configuration
/// - Redirect following (up to 10 hops); the final URL is reported per page
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;
    Ok(Arc::new(client))
}

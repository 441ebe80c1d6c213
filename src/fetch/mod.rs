//! HTML acquisition.
//!
//! Pages are either fetched with a plain HTTP GET or read from a local file.
//! Both paths enforce [`MAX_RESPONSE_BODY_SIZE`].

use std::path::Path;

use log::debug;
use reqwest::header::CONTENT_TYPE;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::FetchError;

/// A page's HTML and the URL it was finally served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub requested_url: String,
    /// URL after redirects.
    pub final_url: String,
    pub html: String,
}

impl FetchedPage {
    pub fn was_redirected(&self) -> bool {
        self.requested_url != self.final_url
    }

    /// `true` when an `http://` request ended on an `https://` URL.
    pub fn is_https_upgrade(&self) -> bool {
        self.requested_url.starts_with("http://") && self.final_url.starts_with("https://")
    }
}

fn check_size(size: usize) -> Result<(), FetchError> {
    if size > MAX_RESPONSE_BODY_SIZE {
        return Err(FetchError::TooLarge {
            size,
            limit: MAX_RESPONSE_BODY_SIZE,
        });
    }
    Ok(())
}

/// Fetches `url` and returns its HTML.
///
/// Redirects are followed by the client. Non-success statuses, non-HTML
/// content types and oversized bodies are errors.
///
/// # Errors
///
/// Returns a [`FetchError`] describing the first problem found.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = client.get(url).send().await?;
    let final_url = response.url().to_string();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: final_url,
            status: status.as_u16(),
        });
    }

    // A missing content type is given the benefit of the doubt
    if let Some(ct) = response.headers().get(CONTENT_TYPE) {
        let ct = ct.to_str().unwrap_or("").to_lowercase();
        if !ct.starts_with("text/html") && !ct.starts_with("application/xhtml+xml") {
            return Err(FetchError::NotHtml {
                url: final_url,
                content_type: ct,
            });
        }
    }

    if let Some(content_length) = response.content_length() {
        check_size(usize::try_from(content_length).unwrap_or(usize::MAX))?;
    }

    // .text() decompresses and decodes using the declared charset
    let html = response.text().await?;
    // Content-Length may be missing or wrong
    check_size(html.len())?;

    debug!("Fetched {} ({} bytes)", final_url, html.len());
    Ok(FetchedPage {
        requested_url: url.to_string(),
        final_url,
        html,
    })
}

/// Reads a saved HTML page from disk.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
///
/// # Errors
///
/// Returns [`FetchError::File`] when the file cannot be read and
/// [`FetchError::TooLarge`] when it exceeds the body size limit.
pub async fn read_local_html(path: &Path) -> Result<String, FetchError> {
    let file_error = |source| FetchError::File {
        path: path.display().to_string(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(file_error)?;
    check_size(usize::try_from(metadata.len()).unwrap_or(usize::MAX))?;

    let bytes = tokio::fs::read(path).await.map_err(file_error)?;
    check_size(bytes.len())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

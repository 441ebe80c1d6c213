//! URL validation and normalization.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a URL.
///
/// Adds an `https://` prefix when the input has no `http(s)` scheme, then
/// checks that the result parses, uses http or https, and has a host.
/// Inputs longer than [`MAX_URL_LENGTH`], before or after normalization, are
/// rejected. Logs a warning and returns `None` for any rejected input.
///
/// The returned string is the URL's serialized form, which is also the cache key.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    let parsed = match url::Url::parse(&normalized) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Skipping invalid URL {url}: {e}");
            return None;
        }
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        warn!("Skipping unsupported scheme for URL: {url}");
        return None;
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        warn!("Skipping URL without a host: {url}");
        return None;
    }

    let serialized = parsed.to_string();
    if serialized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized URL exceeding maximum length ({} > {})",
            serialized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }
    Some(serialized)
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;
    use crate::config::MAX_URL_LENGTH;

    #[test]
    fn test_adds_https_scheme() {
        assert_eq!(
            validate_and_normalize_url("example.com"),
            Some("https://example.com/".to_string())
        );
    }

    #[test]
    fn test_preserves_scheme_path_and_query() {
        assert_eq!(
            validate_and_normalize_url("http://example.com/path?query=value"),
            Some("http://example.com/path?query=value".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("example.com:8080/a#frag"),
            Some("https://example.com:8080/a#frag".to_string())
        );
    }

    #[test]
    fn test_lowercases_host() {
        assert_eq!(
            validate_and_normalize_url("https://Example.COM/Page"),
            Some("https://example.com/Page".to_string())
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_and_normalize_url("  example.com/x \n"),
            Some("https://example.com/x".to_string())
        );
        assert_eq!(validate_and_normalize_url("   "), None);
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert_eq!(validate_and_normalize_url("not a valid url!!!"), None);
    }

    #[test]
    fn test_ipv6_hosts() {
        assert_eq!(
            validate_and_normalize_url("[2001:db8::1]/path"),
            Some("https://[2001:db8::1]/path".to_string())
        );
    }

    #[test]
    fn test_rejects_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(validate_and_normalize_url(&url), None);
    }

    #[test]
    fn test_rejects_prefix_pushing_over_limit() {
        // Fits before the https:// prefix is added, not after.
        let url = format!("example.com/{}", "a".repeat(MAX_URL_LENGTH - 12));
        assert_eq!(url.len(), MAX_URL_LENGTH);
        assert_eq!(validate_and_normalize_url(&url), None);
    }
}

//! URL list line parsing.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes one line of the URL list.
///
/// Blank lines and lines starting with `#` are skipped silently. Adds an
/// `https://` prefix when no scheme is present, rejects any scheme other than
/// http/https, and rejects URLs longer than `MAX_URL_LENGTH`. Logs a warning
/// and returns `None` for anything it refuses.
pub fn validate_and_normalize_url(line: &str) -> Option<String> {
    let url = line.trim();
    if url.is_empty() || url.starts_with('#') {
        return None;
    }

    let normalized = if has_scheme(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            preview(&normalized)
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host().is_some() => Some(normalized),
            "http" | "https" => {
                warn!("Skipping URL without host: {url}");
                None
            }
            _ => {
                warn!("Skipping unsupported scheme for URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}

/// Whether the line starts with `<scheme>://`.
///
/// Only the text before the first `://` counts, and it must be a valid scheme
/// name, so a URL embedded in a query string is not mistaken for one.
fn has_scheme(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// First 50 characters of `url`, cut on a character boundary.
fn preview(url: &str) -> String {
    url.chars().take(50).collect()
}

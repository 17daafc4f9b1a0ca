//! URL helpers for rendered output.
//!
//! An inline card shows where it points without spelling out the whole URL:
//! the host, followed by as much of the path as fits in the display budget.
//! Documents come from remote authors, so only a short list of schemes is
//! allowed to become a live `href` or `src`.

use url::{ParseError, Url};

const ELLIPSIS: char = '…';

const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];
const MEDIA_SCHEMES: [&str; 3] = ["http", "https", "blob"];

/// Whether `raw` may be emitted as a link target or image source.
///
/// Absolute URLs must use http, https or mailto. Relative references have no
/// scheme and are allowed.
///
/// ```
/// use adf_babel::common::links::is_safe_url;
///
/// assert!(is_safe_url("https://example.com"));
/// assert!(is_safe_url("../docs/intro"));
/// assert!(!is_safe_url("javascript:alert(1)"));
/// ```
pub fn is_safe_url(raw: &str) -> bool {
    has_scheme_in(raw, &LINK_SCHEMES)
}

/// Whether `raw` may be used as an image source: http, https, blob or relative.
pub fn is_safe_media_url(raw: &str) -> bool {
    has_scheme_in(raw, &MEDIA_SCHEMES)
}

fn has_scheme_in(raw: &str, schemes: &[&str]) -> bool {
    match Url::parse(raw) {
        Ok(url) => schemes.contains(&url.scheme()),
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Shorten `raw` to at most `max_chars` characters for display.
///
/// Parsable URLs keep their host (minus a leading `www.`) and a truncated
/// path; query and fragment are dropped. Anything else is truncated as-is.
/// A budget of `0` disables truncation.
///
/// # Example
///
/// ```
/// use adf_babel::common::links::shorten_url;
///
/// assert_eq!(
///     shorten_url("https://www.example.com/browse/PROJ-1?focus=true", 40),
///     "example.com/browse/PROJ-1"
/// );
/// ```
pub fn shorten_url(raw: &str, max_chars: usize) -> String {
    let display = match Url::parse(raw) {
        Ok(url) => match url.host_str() {
            Some(host) => {
                let host = host.strip_prefix("www.").unwrap_or(host);
                let path = url.path().trim_end_matches('/');
                return fit_host_and_path(host, path, max_chars);
            }
            None => raw.to_string(),
        },
        Err(_) => raw.to_string(),
    };
    truncate_chars(&display, max_chars)
}

fn fit_host_and_path(host: &str, path: &str, max_chars: usize) -> String {
    let full = format!("{host}{path}");
    if max_chars == 0 || full.chars().count() <= max_chars {
        return full;
    }

    let host_len = host.chars().count();
    if host_len + 1 >= max_chars {
        return truncate_chars(host, max_chars);
    }

    let budget = max_chars - host_len - 1;
    let mut shortened = String::with_capacity(max_chars);
    shortened.push_str(host);
    shortened.extend(path.chars().take(budget));
    shortened.push(ELLIPSIS);
    shortened
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push(ELLIPSIS);
    truncated
}

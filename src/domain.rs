/// Domain reduction for grouping tabs by site
use url::Url;

/// Key for URLs that parse but have no usable hostname (about:, file:, IPv6)
pub const OTHER_LOCAL_KEY: &str = "Other / Local";

/// Key for URLs that cannot be parsed at all
pub const INVALID_URL_KEY: &str = "Invalid or Local File";

/// Number of trailing hostname labels kept in a group key
const KEPT_SEGMENTS: usize = 3;

/// Reduce a URL to its domain group key
///
/// Algorithm:
/// 1. Parse the URL; failure → "Invalid or Local File"
/// 2. No hostname, or a hostname containing ":" or "about:" → "Other / Local"
/// 3. Keep the last 3 dot-separated labels of the hostname
///
/// Examples:
/// - https://a.b.mail.google.com/x → mail.google.com
/// - https://google.com → google.com
/// - about:blank → Other / Local
/// - not a url → Invalid or Local File
pub fn domain_key(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return INVALID_URL_KEY.to_string(),
    };

    match parsed.host_str() {
        Some(host) if !host.is_empty() && !host.contains(':') && !host.contains("about:") => {
            reduce_hostname(host)
        }
        _ => OTHER_LOCAL_KEY.to_string(),
    }
}

/// Domain key for a tab whose URL may be missing
pub fn domain_key_for(url: Option<&str>) -> String {
    url.map(domain_key)
        .unwrap_or_else(|| INVALID_URL_KEY.to_string())
}

fn reduce_hostname(host: &str) -> String {
    let parts: Vec<&str> = host.split('.').collect();
    let start = parts.len().saturating_sub(KEPT_SEGMENTS);
    parts[start..].join(".")
}

/// Search pattern covering every page on the URL's host
///
/// Used to pre-fill the search box from the active tab.
pub fn pattern_for_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().filter(|host| !host.is_empty())?;
    Some(format!("*://{}/*", host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_key_basic() {
        assert_eq!(domain_key("https://google.com"), "google.com");
        assert_eq!(domain_key("http://www.google.com/search?q=rust"), "www.google.com");
        assert_eq!(domain_key("https://github.com/rust-lang/rust"), "github.com");
    }

    #[test]
    fn test_domain_key_collapses_deep_subdomains() {
        assert_eq!(domain_key("https://a.b.mail.google.com/x"), "mail.google.com");
        assert_eq!(domain_key("https://x.y.z.docs.microsoft.com"), "docs.microsoft.com");
        assert_eq!(domain_key("https://news.bbc.co.uk/article"), "bbc.co.uk");
    }

    #[test]
    fn test_domain_key_single_label_and_ips() {
        assert_eq!(domain_key("http://localhost:3000/app"), "localhost");
        assert_eq!(domain_key("http://192.168.1.1:8080"), "168.1.1");
    }

    #[test]
    fn test_domain_key_local_pages() {
        assert_eq!(domain_key("about:blank"), OTHER_LOCAL_KEY);
        assert_eq!(domain_key("file:///home/user/notes.html"), OTHER_LOCAL_KEY);
        assert_eq!(domain_key("http://[::1]:8000/"), OTHER_LOCAL_KEY);
        assert_eq!(domain_key("data:text/plain,hello"), OTHER_LOCAL_KEY);
    }

    #[test]
    fn test_domain_key_invalid_urls() {
        assert_eq!(domain_key("not a url"), INVALID_URL_KEY);
        assert_eq!(domain_key(""), INVALID_URL_KEY);
        assert_eq!(domain_key("https://"), INVALID_URL_KEY);
    }

    #[test]
    fn test_domain_key_for_missing_url() {
        assert_eq!(domain_key_for(None), INVALID_URL_KEY);
        assert_eq!(domain_key_for(Some("https://google.com")), "google.com");
    }

    #[test]
    fn test_pattern_for_url() {
        assert_eq!(
            pattern_for_url("https://mail.google.com/mail/u/0/"),
            Some("*://mail.google.com/*".to_string())
        );
        assert_eq!(pattern_for_url("about:blank"), None);
        assert_eq!(pattern_for_url("garbage"), None);
    }
}

//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

/// Accepted banner link shape: optional http(s) scheme, dotted lowercase host, simple path
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$").expect("valid regex")
});

/// Validate a banner destination link
pub fn validate_link(link: &str) -> Result<(), &'static str> {
    let link = link.trim();
    if link.is_empty() {
        return Err("Link is required");
    }
    if !LINK_PATTERN.is_match(link) {
        return Err("Please enter a valid URL");
    }
    Ok(())
}

/// Validate a network identifier taken from a request path
pub fn validate_network(network: &str) -> Result<&str, &'static str> {
    let network = network.trim();
    if network.is_empty() {
        return Err("Network is required");
    }
    if network.chars().any(char::is_control) {
        return Err("Network contains invalid characters");
    }
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_link() {
        assert!(validate_link("https://example.com").is_ok());
        assert!(validate_link("http://news.example.co.uk/promo/spring-sale").is_ok());
        assert!(validate_link("example.com/path").is_ok());
        assert!(validate_link("  https://example.com/  ").is_ok());
        assert!(validate_link("").is_err());
        assert!(validate_link("not a url").is_err());
        assert!(validate_link("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_network() {
        assert_eq!(validate_network(" kathmandu-post "), Ok("kathmandu-post"));
        assert!(validate_network("   ").is_err());
        assert!(validate_network("bad\nid").is_err());
    }
}

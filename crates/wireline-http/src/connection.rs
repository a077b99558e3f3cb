//! `Connection` header semantics.
//!
//! The header value is a comma-separated token list. `close`,
//! `keep-alive`, and `upgrade` are connection options; any other token
//! names a hop-by-hop header to strip when forwarding, which matters to
//! the proxies this parser also serves.

use wireline_core::HttpVersion;

/// Hop-by-hop headers that must never be forwarded, whether or not they
/// appear in the `Connection` header.
pub const STANDARD_HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Parsed `Connection` header directives.
#[derive(Debug, Clone, Default)]
pub struct ConnectionInfo {
    /// `close` token present.
    pub close: bool,
    /// `keep-alive` token present.
    pub keep_alive: bool,
    /// `upgrade` token present.
    pub upgrade: bool,
    /// Additional hop-by-hop header names (lowercased).
    pub hop_by_hop_headers: Vec<String>,
}

impl ConnectionInfo {
    /// Parse a `Connection` header value.
    ///
    /// Tokens are case-insensitive; whitespace around commas and empty
    /// tokens are ignored.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut info = Self::default();
        for token in value.split(',') {
            let token = token.trim().to_ascii_lowercase();
            match token.as_str() {
                "" => {}
                "close" => info.close = true,
                "keep-alive" => info.keep_alive = true,
                "upgrade" => info.upgrade = true,
                _ => {
                    if !STANDARD_HOP_BY_HOP_HEADERS.contains(&token.as_str()) {
                        info.hop_by_hop_headers.push(token);
                    }
                }
            }
        }
        info
    }

    /// Parse an optional `Connection` header value.
    #[must_use]
    pub fn parse_optional(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }

    /// Decide whether the transport survives this message.
    ///
    /// An explicit `close` always wins, an explicit `keep-alive` wins
    /// next; otherwise HTTP/1.1 defaults to keep-alive and HTTP/1.0 to
    /// close.
    #[must_use]
    pub fn should_keep_alive(&self, version: HttpVersion) -> bool {
        if self.close {
            return false;
        }
        if self.keep_alive {
            return true;
        }
        version.is_http11()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_tokens() {
        assert!(ConnectionInfo::parse("close").close);
        assert!(ConnectionInfo::parse("Keep-Alive").keep_alive);
        assert!(ConnectionInfo::parse("UPGRADE").upgrade);
    }

    #[test]
    fn parses_token_lists_with_whitespace() {
        let info = ConnectionInfo::parse("keep-alive ,  X-Custom-Header, upgrade");
        assert!(info.keep_alive);
        assert!(info.upgrade);
        assert!(!info.close);
        assert_eq!(info.hop_by_hop_headers, vec!["x-custom-header"]);
    }

    #[test]
    fn standard_hop_by_hop_names_are_not_duplicated() {
        let info = ConnectionInfo::parse("te, trailer, x-extra");
        assert_eq!(info.hop_by_hop_headers, vec!["x-extra"]);
    }

    #[test]
    fn keep_alive_defaults_follow_version() {
        let none = ConnectionInfo::default();
        assert!(none.should_keep_alive(HttpVersion::Http11));
        assert!(!none.should_keep_alive(HttpVersion::Http10));
    }

    #[test]
    fn close_always_wins() {
        let info = ConnectionInfo::parse("keep-alive, close");
        assert!(!info.should_keep_alive(HttpVersion::Http11));
        assert!(!info.should_keep_alive(HttpVersion::Http10));
    }

    #[test]
    fn explicit_keep_alive_overrides_http10_default() {
        let info = ConnectionInfo::parse("keep-alive");
        assert!(info.should_keep_alive(HttpVersion::Http10));
    }

    #[test]
    fn absent_header_helper() {
        let info = ConnectionInfo::parse_optional(None);
        assert!(info.should_keep_alive(HttpVersion::Http11));
        let info = ConnectionInfo::parse_optional(Some("close"));
        assert!(!info.should_keep_alive(HttpVersion::Http11));
    }
}

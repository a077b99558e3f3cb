//! HTTP method and protocol version.

use std::fmt;

/// HTTP version of a parsed message.
///
/// Only HTTP/1.0 and HTTP/1.1 exist on this wire; anything else in a
/// start-line is rejected during tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub enum HttpVersion {
    /// HTTP/1.0
    Http10,
    /// HTTP/1.1 (default)
    #[default]
    Http11,
}

impl HttpVersion {
    /// Parse an HTTP version from its exact wire spelling.
    ///
    /// `HTTP/2.0` and any other spelling return `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HTTP/1.0" => Some(Self::Http10),
            "HTTP/1.1" => Some(Self::Http11),
            _ => None,
        }
    }

    /// Returns true if this is HTTP/1.1.
    #[must_use]
    pub fn is_http11(self) -> bool {
        matches!(self, Self::Http11)
    }

    /// Returns true if this is HTTP/1.0.
    #[must_use]
    pub fn is_http10(self) -> bool {
        matches!(self, Self::Http10)
    }

    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http10 => "HTTP/1.0",
            Self::Http11 => "HTTP/1.1",
        }
    }
}

impl std::str::FromStr for HttpVersion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP request method.
///
/// The nine standard methods are modeled as unit variants; any other
/// RFC 7230 token is carried verbatim in [`Method::Extension`]. The
/// request-line tokenizer takes the unit-variant fast path and only
/// byte-validates extension tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method.
    Get,
    /// HEAD method.
    Head,
    /// POST method.
    Post,
    /// PUT method.
    Put,
    /// DELETE method.
    Delete,
    /// CONNECT method.
    Connect,
    /// OPTIONS method.
    Options,
    /// TRACE method.
    Trace,
    /// PATCH method.
    Patch,
    /// Any other token method (e.g. `PROPFIND`, `PURGE`).
    Extension(String),
}

impl Method {
    /// Match one of the nine standard methods from raw bytes.
    ///
    /// Returns `None` for anything else, including lowercase spellings;
    /// non-standard tokens go through [`Method::Extension`] after
    /// validation.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            b"GET" => Some(Self::Get),
            b"HEAD" => Some(Self::Head),
            b"POST" => Some(Self::Post),
            b"PUT" => Some(Self::Put),
            b"DELETE" => Some(Self::Delete),
            b"CONNECT" => Some(Self::Connect),
            b"OPTIONS" => Some(Self::Options),
            b"TRACE" => Some(Self::Trace),
            b"PATCH" => Some(Self::Patch),
            _ => None,
        }
    }

    /// Return the method name as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Patch => "PATCH",
            Self::Extension(name) => name,
        }
    }

    /// Returns true if this is a standard (non-extension) method.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        !matches!(self, Self::Extension(_))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parses_exact_spellings_only() {
        assert_eq!(HttpVersion::parse("HTTP/1.0"), Some(HttpVersion::Http10));
        assert_eq!(HttpVersion::parse("HTTP/1.1"), Some(HttpVersion::Http11));
        assert_eq!(HttpVersion::parse("HTTP/2.0"), None);
        assert_eq!(HttpVersion::parse("http/1.1"), None);
        assert_eq!(HttpVersion::parse("HTTP/1.1 "), None);
    }

    #[test]
    fn version_round_trips_through_as_str() {
        for v in [HttpVersion::Http10, HttpVersion::Http11] {
            assert_eq!(HttpVersion::parse(v.as_str()), Some(v));
        }
    }

    #[test]
    fn standard_methods_from_bytes() {
        assert_eq!(Method::from_bytes(b"GET"), Some(Method::Get));
        assert_eq!(Method::from_bytes(b"PATCH"), Some(Method::Patch));
        assert_eq!(Method::from_bytes(b"CONNECT"), Some(Method::Connect));
        assert_eq!(Method::from_bytes(b"get"), None);
        assert_eq!(Method::from_bytes(b"PROPFIND"), None);
        assert_eq!(Method::from_bytes(b""), None);
    }

    #[test]
    fn extension_method_displays_verbatim() {
        let m = Method::Extension("PROPFIND".to_string());
        assert_eq!(m.as_str(), "PROPFIND");
        assert!(!m.is_standard());
        assert!(Method::Get.is_standard());
    }
}

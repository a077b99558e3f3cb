//! HTTP status codes.

use std::fmt;

/// HTTP status code.
///
/// Any integer in `[100, 999]` is representable; the IANA registry only
/// assigns a subset, and [`StatusCode::canonical_reason`] returns `""` for
/// unassigned codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct StatusCode(u16);

impl StatusCode {
    /// 200 OK
    pub const OK: Self = Self(200);
    /// 204 No Content
    pub const NO_CONTENT: Self = Self(204);
    /// 301 Moved Permanently
    pub const MOVED_PERMANENTLY: Self = Self(301);
    /// 304 Not Modified
    pub const NOT_MODIFIED: Self = Self(304);
    /// 400 Bad Request
    pub const BAD_REQUEST: Self = Self(400);
    /// 404 Not Found
    pub const NOT_FOUND: Self = Self(404);
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);

    /// Create a status code without range checking.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Create a status code, rejecting values outside `[100, 999]`.
    #[must_use]
    pub fn from_u16(code: u16) -> Option<Self> {
        if (100..=999).contains(&code) {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if the code is in the representable `[100, 999]` range.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 100 && self.0 <= 999
    }

    /// Returns true for 1xx codes.
    #[must_use]
    pub const fn is_informational(self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Returns true for 2xx codes.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true for 3xx codes.
    #[must_use]
    pub const fn is_redirection(self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Returns true for 4xx codes.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true for 5xx codes.
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns the IANA reason phrase, or `""` for unassigned codes.
    #[must_use]
    pub const fn canonical_reason(self) -> &'static str {
        match self.0 {
            100 => "Continue",
            101 => "Switching Protocols",
            102 => "Processing",
            103 => "Early Hints",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            203 => "Non-Authoritative Information",
            204 => "No Content",
            205 => "Reset Content",
            206 => "Partial Content",
            207 => "Multi-Status",
            208 => "Already Reported",
            226 => "IM Used",
            300 => "Multiple Choices",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            305 => "Use Proxy",
            306 => "Switch Proxy",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            402 => "Payment Required",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            406 => "Not Acceptable",
            407 => "Proxy Authentication Required",
            408 => "Request Timeout",
            409 => "Conflict",
            410 => "Gone",
            411 => "Length Required",
            412 => "Precondition Failed",
            413 => "Payload Too Large",
            414 => "URI Too Long",
            415 => "Unsupported Media Type",
            416 => "Range Not Satisfiable",
            417 => "Expectation Failed",
            418 => "I'm a Teapot",
            421 => "Misdirected Request",
            422 => "Unprocessable Entity",
            423 => "Locked",
            424 => "Failed Dependency",
            425 => "Too Early",
            426 => "Upgrade Required",
            428 => "Precondition Required",
            429 => "Too Many Requests",
            431 => "Request Header Fields Too Large",
            451 => "Unavailable For Legal Reasons",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            505 => "HTTP Version Not Supported",
            506 => "Variant Also Negotiates",
            507 => "Insufficient Storage",
            508 => "Loop Detected",
            510 => "Not Extended",
            511 => "Network Authentication Required",
            _ => "",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.as_u16()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u16_enforces_range() {
        assert_eq!(StatusCode::from_u16(100), Some(StatusCode::new(100)));
        assert_eq!(StatusCode::from_u16(999), Some(StatusCode::new(999)));
        assert_eq!(StatusCode::from_u16(99), None);
        assert_eq!(StatusCode::from_u16(1000), None);
        assert_eq!(StatusCode::from_u16(0), None);
    }

    #[test]
    fn canonical_reason_known_codes() {
        assert_eq!(StatusCode::new(200).canonical_reason(), "OK");
        assert_eq!(StatusCode::new(404).canonical_reason(), "Not Found");
        assert_eq!(
            StatusCode::new(500).canonical_reason(),
            "Internal Server Error"
        );
        assert_eq!(StatusCode::new(103).canonical_reason(), "Early Hints");
        assert_eq!(StatusCode::new(226).canonical_reason(), "IM Used");
        assert_eq!(
            StatusCode::new(451).canonical_reason(),
            "Unavailable For Legal Reasons"
        );
        assert_eq!(
            StatusCode::new(511).canonical_reason(),
            "Network Authentication Required"
        );
    }

    #[test]
    fn canonical_reason_unassigned_is_empty() {
        assert_eq!(StatusCode::new(299).canonical_reason(), "");
        assert_eq!(StatusCode::new(419).canonical_reason(), "");
        assert_eq!(StatusCode::new(509).canonical_reason(), "");
        assert_eq!(StatusCode::new(600).canonical_reason(), "");
    }

    #[test]
    fn class_predicates() {
        assert!(StatusCode::new(101).is_informational());
        assert!(StatusCode::OK.is_success());
        assert!(StatusCode::new(307).is_redirection());
        assert!(StatusCode::NOT_FOUND.is_client_error());
        assert!(StatusCode::new(503).is_server_error());
        assert!(!StatusCode::OK.is_client_error());
    }
}

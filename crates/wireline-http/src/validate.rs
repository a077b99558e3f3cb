//! Pure predicates over wire tokens.
//!
//! RFC 7230 token rules, tightened for safety: every predicate enforces a
//! hard length bound in addition to the byte grammar, and the numeric
//! parsers scan digits explicitly (Rust's `FromStr` for unsigned integers
//! accepts a leading `+`, which the wire grammar does not).

use wireline_core::Method;

/// Longest accepted request method, in bytes.
pub const MAX_METHOD_LENGTH: usize = 100;

/// Longest accepted header name, in bytes.
pub const MAX_HEADER_NAME_LENGTH: usize = 256;

/// Longest accepted header value, in bytes.
pub const MAX_HEADER_VALUE_LENGTH: usize = 8192;

/// Longest accepted request target, in bytes.
pub const MAX_TARGET_LENGTH: usize = 8192;

/// Token separators per RFC 7230, excluding SP and HT which the visible
/// range check already excludes.
fn is_separator(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')'
            | b'<'
            | b'>'
            | b'@'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'"'
            | b'/'
            | b'['
            | b']'
            | b'?'
            | b'='
            | b'{'
            | b'}'
    )
}

/// Returns true for a byte allowed in an RFC 7230 token.
#[must_use]
pub fn is_token_byte(b: u8) -> bool {
    (0x21..0x7f).contains(&b) && !is_separator(b)
}

/// Validate a request method.
///
/// The nine standard methods are accepted without re-scanning; any other
/// non-empty token of at most [`MAX_METHOD_LENGTH`] bytes is also valid.
#[must_use]
pub fn is_valid_method(bytes: &[u8]) -> bool {
    if Method::from_bytes(bytes).is_some() {
        return true;
    }
    !bytes.is_empty()
        && bytes.len() <= MAX_METHOD_LENGTH
        && bytes.iter().all(|&b| is_token_byte(b))
}

/// Validate an HTTP version: exactly `HTTP/1.0` or `HTTP/1.1`.
#[must_use]
pub fn is_valid_version(bytes: &[u8]) -> bool {
    bytes == b"HTTP/1.0" || bytes == b"HTTP/1.1"
}

/// Validate a status code: any integer in `[100, 999]`.
#[must_use]
pub fn is_valid_status_code(code: u16) -> bool {
    (100..=999).contains(&code)
}

/// Validate a header name.
///
/// Same token rule as methods; `allow_underscore` selects whether `_`
/// counts as a token byte.
#[must_use]
pub fn is_valid_header_name(bytes: &[u8], allow_underscore: bool) -> bool {
    !bytes.is_empty()
        && bytes.len() <= MAX_HEADER_NAME_LENGTH
        && bytes
            .iter()
            .all(|&b| is_token_byte(b) && (allow_underscore || b != b'_'))
}

/// Validate a header value.
///
/// Allowed bytes are HTAB, LF, FF, CR, and printable ASCII. Embedded
/// CR/LF do not terminate the value at this layer; line splitting is the
/// block scanner's job.
#[must_use]
pub fn is_valid_header_value(bytes: &[u8]) -> bool {
    bytes.len() <= MAX_HEADER_VALUE_LENGTH
        && bytes
            .iter()
            .all(|&b| matches!(b, 0x09 | 0x0a | 0x0c | 0x0d | 0x20..=0x7e))
}

/// Validate a request target.
///
/// Four shapes are accepted: origin form (starts with `/`), absolute form
/// (contains `://`), asterisk form (`*`), and authority form (contains
/// `:` and no `/`).
#[must_use]
pub fn is_valid_request_target(target: &str) -> bool {
    if target.is_empty() || target.len() > MAX_TARGET_LENGTH {
        return false;
    }
    target.starts_with('/')
        || target.contains("://")
        || target == "*"
        || (target.contains(':') && !target.contains('/'))
}

/// Parse a `Content-Length` value.
///
/// The trimmed value must be pure decimal digits; signs, interior
/// whitespace, and overflow all reject.
#[must_use]
pub fn parse_content_length(value: &str) -> Option<usize> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse a chunk-size line into a byte count.
///
/// The size is case-insensitive hexadecimal; anything after the first `;`
/// is a chunk extension and is ignored. Sizes above `cap` reject.
#[must_use]
pub fn parse_chunk_size(line: &[u8], cap: usize) -> Option<usize> {
    let size_part = match line.iter().position(|&b| b == b';') {
        Some(semi) => &line[..semi],
        None => line,
    };
    let text = std::str::from_utf8(size_part).ok()?.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let size = usize::from_str_radix(text, 16).ok()?;
    if size > cap {
        return None;
    }
    Some(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_methods_are_valid() {
        for method in [
            "GET", "HEAD", "POST", "PUT", "DELETE", "CONNECT", "OPTIONS", "TRACE", "PATCH",
        ] {
            assert!(is_valid_method(method.as_bytes()), "{method}");
        }
    }

    #[test]
    fn extension_methods_follow_token_rule() {
        assert!(is_valid_method(b"PROPFIND"));
        assert!(is_valid_method(b"M-SEARCH"));
        assert!(!is_valid_method(b""));
        assert!(!is_valid_method(b"GE T"));
        assert!(!is_valid_method(b"GET/"));
        assert!(!is_valid_method(b"GET\x01"));
        assert!(!is_valid_method(b"GET{"));
    }

    #[test]
    fn method_length_bound() {
        assert!(is_valid_method(&vec![b'A'; MAX_METHOD_LENGTH]));
        assert!(!is_valid_method(&vec![b'A'; MAX_METHOD_LENGTH + 1]));
    }

    #[test]
    fn version_is_exact_match() {
        assert!(is_valid_version(b"HTTP/1.0"));
        assert!(is_valid_version(b"HTTP/1.1"));
        assert!(!is_valid_version(b"HTTP/2.0"));
        assert!(!is_valid_version(b"HTTP/1.2"));
        assert!(!is_valid_version(b"http/1.1"));
        assert!(!is_valid_version(b"HTTP/1.1 "));
    }

    #[test]
    fn status_code_range() {
        assert!(is_valid_status_code(100));
        assert!(is_valid_status_code(599));
        assert!(is_valid_status_code(999));
        assert!(!is_valid_status_code(99));
        assert!(!is_valid_status_code(1000));
    }

    #[test]
    fn header_name_token_rule() {
        assert!(is_valid_header_name(b"Content-Type", true));
        assert!(is_valid_header_name(b"X-Header-123", true));
        assert!(!is_valid_header_name(b"", true));
        assert!(!is_valid_header_name(b"Bad Header", true));
        assert!(!is_valid_header_name(b"Bad:Header", true));
        assert!(!is_valid_header_name(b"Bad\x00", true));
    }

    #[test]
    fn header_name_underscore_flag() {
        assert!(is_valid_header_name(b"X_Custom", true));
        assert!(!is_valid_header_name(b"X_Custom", false));
        assert!(is_valid_header_name(b"X-Custom", false));
    }

    #[test]
    fn header_name_length_bound() {
        assert!(is_valid_header_name(&vec![b'a'; MAX_HEADER_NAME_LENGTH], true));
        assert!(!is_valid_header_name(
            &vec![b'a'; MAX_HEADER_NAME_LENGTH + 1],
            true
        ));
    }

    #[test]
    fn header_value_byte_set() {
        assert!(is_valid_header_value(b"text/html; charset=utf-8"));
        assert!(is_valid_header_value(b""));
        assert!(is_valid_header_value(b"tab\there"));
        // Embedded CR/LF are allowed at this layer.
        assert!(is_valid_header_value(b"a\r\nb"));
        assert!(is_valid_header_value(b"\x0c"));
        assert!(!is_valid_header_value(b"nul\x00"));
        assert!(!is_valid_header_value(b"\x1b[31m"));
        assert!(!is_valid_header_value(b"high\x80bit"));
        assert!(!is_valid_header_value(b"del\x7f"));
    }

    #[test]
    fn header_value_length_bound() {
        assert!(is_valid_header_value(&vec![b'v'; MAX_HEADER_VALUE_LENGTH]));
        assert!(!is_valid_header_value(&vec![
            b'v';
            MAX_HEADER_VALUE_LENGTH + 1
        ]));
    }

    #[test]
    fn target_shapes() {
        assert!(is_valid_request_target("/"));
        assert!(is_valid_request_target("/path?query=1"));
        assert!(is_valid_request_target("http://example.com/x"));
        assert!(is_valid_request_target("*"));
        assert!(is_valid_request_target("example.com:443"));
        assert!(!is_valid_request_target(""));
        assert!(!is_valid_request_target("no-colon-no-slash"));
        assert!(!is_valid_request_target("**"));
    }

    #[test]
    fn target_length_bound() {
        let long = format!("/{}", "a".repeat(MAX_TARGET_LENGTH - 1));
        assert!(is_valid_request_target(&long));
        assert!(!is_valid_request_target(&format!("{long}a")));
    }

    #[test]
    fn content_length_plain_decimal_only() {
        assert_eq!(parse_content_length("0"), Some(0));
        assert_eq!(parse_content_length("15"), Some(15));
        assert_eq!(parse_content_length("  42  "), Some(42));
        assert_eq!(parse_content_length("00042"), Some(42));
        assert_eq!(parse_content_length("+42"), None);
        assert_eq!(parse_content_length("-1"), None);
        assert_eq!(parse_content_length("4 2"), None);
        assert_eq!(parse_content_length("abc"), None);
        assert_eq!(parse_content_length(""), None);
        assert_eq!(parse_content_length("99999999999999999999999999"), None);
    }

    #[test]
    fn chunk_size_hex_with_extensions() {
        let cap = 10 * 1024 * 1024;
        assert_eq!(parse_chunk_size(b"0", cap), Some(0));
        assert_eq!(parse_chunk_size(b"a", cap), Some(10));
        assert_eq!(parse_chunk_size(b"FF", cap), Some(255));
        assert_eq!(parse_chunk_size(b"1f;ext=1", cap), Some(31));
        assert_eq!(parse_chunk_size(b"  5  ", cap), Some(5));
        assert_eq!(parse_chunk_size(b"", cap), None);
        assert_eq!(parse_chunk_size(b";ext", cap), None);
        assert_eq!(parse_chunk_size(b"zz", cap), None);
        assert_eq!(parse_chunk_size(b"-5", cap), None);
        assert_eq!(parse_chunk_size(b"+5", cap), None);
        assert_eq!(parse_chunk_size(b"FFFFFFFFFFFFFFFFF", cap), None);
    }

    #[test]
    fn chunk_size_cap_enforced() {
        assert_eq!(parse_chunk_size(b"400", 1024), Some(1024));
        assert_eq!(parse_chunk_size(b"401", 1024), None);
    }
}

//! Header-line splitting and header-block parsing.

use crate::validate;
use wireline_core::{ErrorCode, HeaderMap, ParseError, ParserConfig, ParserState};

fn find_crlf(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\r\n")
}

fn trim_lws(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ' && b != b'\t')
        .map_or(start, |p| p + 1);
    &bytes[start..end]
}

/// Split one header line at its first colon.
///
/// Linear whitespace is trimmed from both the name and the value. A line
/// with no colon, an empty name, or an empty value after trimming is
/// rejected — empty values are a deliberate tightening over RFC 7230.
///
/// # Errors
///
/// `InvalidHeader` for any of the rejections above.
pub fn split_header_line(line: &[u8]) -> Result<(&[u8], &[u8]), ParseError> {
    let colon = line.iter().position(|&b| b == b':').ok_or_else(|| {
        ParseError::new(
            ErrorCode::InvalidHeader,
            "header line has no colon",
            ParserState::Headers,
        )
    })?;

    let name = trim_lws(&line[..colon]);
    if name.is_empty() {
        return Err(ParseError::new(
            ErrorCode::InvalidHeader,
            "header name is empty",
            ParserState::Headers,
        ));
    }

    let value = trim_lws(&line[colon + 1..]);
    if value.is_empty() {
        return Err(ParseError::new(
            ErrorCode::InvalidHeader,
            "header value is empty",
            ParserState::Headers,
        ));
    }

    Ok((name, value))
}

/// Parse a header block into a [`HeaderMap`].
///
/// `block` is the byte range after the start-line up to (but not
/// including) the terminating empty line; a trailing CRLF or empty line
/// is tolerated. Folded continuation lines (obs-fold) are invalid.
///
/// # Errors
///
/// - `HeaderValueTooLong` for a line or value over its limit
/// - `HeaderNameTooLong` for a name over its limit
/// - `TooManyHeaders` past the configured entry cap
/// - `InvalidHeader` for malformed lines or failed validation
pub fn parse_header_block(block: &[u8], config: &ParserConfig) -> Result<HeaderMap, ParseError> {
    let mut headers = HeaderMap::new();
    let mut remaining = block;

    while !remaining.is_empty() {
        let line_end = find_crlf(remaining).unwrap_or(remaining.len());
        let line = &remaining[..line_end];
        remaining = if line_end + 2 <= remaining.len() {
            &remaining[line_end + 2..]
        } else {
            &[]
        };

        if line.is_empty() {
            break;
        }
        if line.len() > config.max_header_line_length {
            return Err(ParseError::new(
                ErrorCode::HeaderValueTooLong,
                "header line exceeds length limit",
                ParserState::Headers,
            ));
        }
        if matches!(line.first(), Some(b' ' | b'\t')) {
            return Err(ParseError::new(
                ErrorCode::InvalidHeader,
                "folded header lines are not supported",
                ParserState::Headers,
            ));
        }

        let (name, value) = split_header_line(line)?;

        if config.validate_header_names {
            if name.len() > validate::MAX_HEADER_NAME_LENGTH {
                return Err(ParseError::new(
                    ErrorCode::HeaderNameTooLong,
                    "header name exceeds length limit",
                    ParserState::Headers,
                ));
            }
            if !validate::is_valid_header_name(name, config.allow_underscore_in_headers) {
                return Err(ParseError::new(
                    ErrorCode::InvalidHeader,
                    "header name contains invalid characters",
                    ParserState::Headers,
                ));
            }
        }
        if config.validate_header_values {
            if value.len() > validate::MAX_HEADER_VALUE_LENGTH {
                return Err(ParseError::new(
                    ErrorCode::HeaderValueTooLong,
                    "header value exceeds length limit",
                    ParserState::Headers,
                ));
            }
            if !validate::is_valid_header_value(value) {
                return Err(ParseError::new(
                    ErrorCode::InvalidHeader,
                    "header value contains invalid bytes",
                    ParserState::Headers,
                ));
            }
        }

        if headers.total_entries() >= config.max_headers {
            return Err(ParseError::new(
                ErrorCode::TooManyHeaders,
                "header count exceeds limit",
                ParserState::Headers,
            ));
        }

        headers.append(
            String::from_utf8_lossy(name).into_owned(),
            String::from_utf8_lossy(value).into_owned(),
        );
    }

    Ok(headers)
}

//! Start-line tokenizers.
//!
//! Two routines, one per line form:
//!
//! - request line: `METHOD SP TARGET SP VERSION CRLF`
//! - status line: `VERSION SP STATUS-CODE SP REASON CRLF`
//!
//! Each returns a three-state result: a parsed line with the bytes it
//! consumed, [`Tokenized::Partial`] when more data is needed, or an error.
//! Consumed bytes include the trailing CRLF when one was present; a
//! buffer holding a complete line without CRLF is also accepted and
//! consumed whole.

use crate::validate;
use wireline_core::{
    ErrorCode, HttpVersion, Method, ParseError, ParserState, RequestLine, StatusCode, StatusLine,
};

/// Outcome of a tokenizer attempt that did not fail.
#[derive(Debug)]
pub enum Tokenized<T> {
    /// The line parsed; `consumed` bytes of the input are spoken for.
    Complete {
        /// The parsed line.
        value: T,
        /// Bytes consumed, including the CRLF when present.
        consumed: usize,
    },
    /// The buffer does not yet hold enough bytes to decide.
    Partial,
}

fn find_crlf(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\r\n")
}

/// Tokenize a request line.
///
/// # Errors
///
/// `InvalidMethod`, `InvalidTarget`, or `InvalidVersion` when the
/// corresponding field fails validation; a complete line missing fields
/// is also an error.
pub fn parse_request_line(buffer: &[u8]) -> Result<Tokenized<RequestLine>, ParseError> {
    let line_end = find_crlf(buffer);
    let line = &buffer[..line_end.unwrap_or(buffer.len())];
    let has_crlf = line_end.is_some();
    let consumed = line_end.map_or(buffer.len(), |end| end + 2);

    let Some(sp1) = line.iter().position(|&b| b == b' ') else {
        if !has_crlf {
            return Ok(Tokenized::Partial);
        }
        if !validate::is_valid_method(line) {
            return Err(invalid(ErrorCode::InvalidMethod, "malformed request method"));
        }
        return Err(invalid(ErrorCode::InvalidTarget, "request line has no target"));
    };

    let method_bytes = &line[..sp1];
    if !validate::is_valid_method(method_bytes) {
        return Err(invalid(ErrorCode::InvalidMethod, "malformed request method"));
    }

    let sp2 = line[sp1 + 1..]
        .iter()
        .position(|&b| b == b' ')
        .map(|p| sp1 + 1 + p);
    let (target_bytes, version_bytes) = match sp2 {
        Some(sp2) => (&line[sp1 + 1..sp2], &line[sp2 + 1..]),
        None => {
            if !has_crlf {
                return Ok(Tokenized::Partial);
            }
            return Err(invalid(
                ErrorCode::InvalidVersion,
                "request line has no version",
            ));
        }
    };

    let target = std::str::from_utf8(target_bytes)
        .map_err(|_| invalid(ErrorCode::InvalidTarget, "request target is not UTF-8"))?;
    if !validate::is_valid_request_target(target) {
        return Err(invalid(ErrorCode::InvalidTarget, "malformed request target"));
    }

    if !validate::is_valid_version(version_bytes) {
        return Err(invalid(
            ErrorCode::InvalidVersion,
            "unsupported HTTP version",
        ));
    }
    let version = if version_bytes == b"HTTP/1.0" {
        HttpVersion::Http10
    } else {
        HttpVersion::Http11
    };

    let method = Method::from_bytes(method_bytes).unwrap_or_else(|| {
        Method::Extension(String::from_utf8_lossy(method_bytes).into_owned())
    });

    Ok(Tokenized::Complete {
        value: RequestLine {
            method,
            target: target.to_string(),
            version,
        },
        consumed,
    })
}

/// Tokenize a status line.
///
/// The reason phrase may be empty and may contain spaces; it is decoded
/// lossily, so invalid UTF-8 there becomes replacement characters rather
/// than an error.
///
/// # Errors
///
/// `InvalidVersion` or `InvalidStatusCode` when the corresponding field
/// fails validation.
pub fn parse_status_line(buffer: &[u8]) -> Result<Tokenized<StatusLine>, ParseError> {
    let line_end = find_crlf(buffer);
    let line = &buffer[..line_end.unwrap_or(buffer.len())];
    let has_crlf = line_end.is_some();
    let consumed = line_end.map_or(buffer.len(), |end| end + 2);

    let Some(sp1) = line.iter().position(|&b| b == b' ') else {
        if !has_crlf {
            return Ok(Tokenized::Partial);
        }
        if !validate::is_valid_version(line) {
            return Err(status_invalid(
                ErrorCode::InvalidVersion,
                "unsupported HTTP version",
            ));
        }
        return Err(status_invalid(
            ErrorCode::InvalidStatusCode,
            "status line has no status code",
        ));
    };

    let version_bytes = &line[..sp1];
    if !validate::is_valid_version(version_bytes) {
        return Err(status_invalid(
            ErrorCode::InvalidVersion,
            "unsupported HTTP version",
        ));
    }
    let version = if version_bytes == b"HTTP/1.0" {
        HttpVersion::Http10
    } else {
        HttpVersion::Http11
    };

    let rest = &line[sp1 + 1..];
    let (code_bytes, reason_bytes) = match rest.iter().position(|&b| b == b' ') {
        Some(p) => (&rest[..p], &rest[p + 1..]),
        None => {
            if !has_crlf {
                // A prefix that can no longer become a 3-digit code will
                // never parse; fail now instead of waiting for bytes that
                // cannot help.
                if rest.len() > 3 || !rest.iter().all(u8::is_ascii_digit) {
                    return Err(status_invalid(
                        ErrorCode::InvalidStatusCode,
                        "malformed status code",
                    ));
                }
                return Ok(Tokenized::Partial);
            }
            // Reason phrase is absent; the code extends to the CRLF.
            (rest, &[][..])
        }
    };

    if code_bytes.len() != 3 || !code_bytes.iter().all(u8::is_ascii_digit) {
        return Err(status_invalid(
            ErrorCode::InvalidStatusCode,
            "malformed status code",
        ));
    }
    let code: u16 = std::str::from_utf8(code_bytes)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| status_invalid(ErrorCode::InvalidStatusCode, "malformed status code"))?;
    if !validate::is_valid_status_code(code) {
        return Err(status_invalid(
            ErrorCode::InvalidStatusCode,
            "status code out of range",
        ));
    }

    Ok(Tokenized::Complete {
        value: StatusLine {
            version,
            code: StatusCode::new(code),
            reason: String::from_utf8_lossy(reason_bytes).into_owned(),
        },
        consumed,
    })
}

fn invalid(code: ErrorCode, message: &str) -> ParseError {
    ParseError::new(code, message, ParserState::RequestLine)
}

fn status_invalid(code: ErrorCode, message: &str) -> ParseError {
    ParseError::new(code, message, ParserState::StatusLine)
}

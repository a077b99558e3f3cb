//! Message writers.
//!
//! [`RequestWriter`] and [`ResponseWriter`] serialise messages into the
//! wire format the parser accepts. Writers never fail; they produce
//! whatever bytes result from the inputs given. The internal buffer is
//! reused across `write` calls for connection loops.

use wireline_core::{HeaderMap, Method, StatusCode};

/// Writes HTTP/1.1 requests to a buffer.
///
/// ```
/// use wireline_core::{HeaderMap, Method};
/// use wireline_http::RequestWriter;
///
/// let mut headers = HeaderMap::new();
/// headers.append("Host", "example.com");
///
/// let mut writer = RequestWriter::new();
/// writer.write(&Method::Get, "/", &headers, b"");
/// assert_eq!(
///     writer.as_bytes(),
///     b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n"
/// );
/// ```
pub struct RequestWriter {
    buffer: Vec<u8>,
}

impl RequestWriter {
    /// Create a new request writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Write a request to the internal buffer, replacing prior contents.
    ///
    /// A non-empty body gets a `Content-Length` header appended after the
    /// supplied headers.
    pub fn write(&mut self, method: &Method, target: &str, headers: &HeaderMap, body: &[u8]) {
        self.buffer.clear();

        self.buffer.extend_from_slice(method.as_str().as_bytes());
        self.buffer.push(b' ');
        self.buffer.extend_from_slice(target.as_bytes());
        self.buffer.extend_from_slice(b" HTTP/1.1\r\n");

        write_headers_and_body(&mut self.buffer, headers, body);
    }

    /// The written bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Take the buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for RequestWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes HTTP/1.1 responses to a buffer.
///
/// When no reason phrase is supplied the IANA canonical phrase for the
/// status code is used; unassigned codes get an empty reason.
pub struct ResponseWriter {
    buffer: Vec<u8>,
}

impl ResponseWriter {
    /// Create a new response writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Write a response to the internal buffer, replacing prior contents.
    pub fn write(
        &mut self,
        status: StatusCode,
        reason: Option<&str>,
        headers: &HeaderMap,
        body: &[u8],
    ) {
        self.buffer.clear();

        self.buffer.extend_from_slice(b"HTTP/1.1 ");
        self.buffer
            .extend_from_slice(status.as_u16().to_string().as_bytes());
        self.buffer.push(b' ');
        let reason = reason.unwrap_or_else(|| status.canonical_reason());
        self.buffer.extend_from_slice(reason.as_bytes());
        self.buffer.extend_from_slice(b"\r\n");

        write_headers_and_body(&mut self.buffer, headers, body);
    }

    /// The written bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Take the buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_headers_and_body(buffer: &mut Vec<u8>, headers: &HeaderMap, body: &[u8]) {
    for (name, value) in headers.iter() {
        buffer.extend_from_slice(name.as_bytes());
        buffer.extend_from_slice(b": ");
        buffer.extend_from_slice(value.as_bytes());
        buffer.extend_from_slice(b"\r\n");
    }
    if !body.is_empty() {
        buffer.extend_from_slice(b"Content-Length: ");
        buffer.extend_from_slice(body.len().to_string().as_bytes());
        buffer.extend_from_slice(b"\r\n");
    }
    buffer.extend_from_slice(b"\r\n");
    buffer.extend_from_slice(body);
}

/// Build a request as a standalone byte vector.
#[must_use]
pub fn build_request(method: &Method, target: &str, headers: &HeaderMap, body: &[u8]) -> Vec<u8> {
    let mut writer = RequestWriter::new();
    writer.write(method, target, headers, body);
    writer.into_bytes()
}

/// Build a response as a standalone byte vector.
#[must_use]
pub fn build_response(
    status: StatusCode,
    reason: Option<&str>,
    headers: &HeaderMap,
    body: &[u8],
) -> Vec<u8> {
    let mut writer = ResponseWriter::new();
    writer.write(status, reason, headers, body);
    writer.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_without_body() {
        let mut headers = HeaderMap::new();
        headers.append("Host", "example.com");
        headers.append("Accept", "*/*");

        let bytes = build_request(&Method::Get, "/path?q=1", &headers, b"");
        assert_eq!(
            bytes,
            b"GET /path?q=1 HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n".to_vec()
        );
    }

    #[test]
    fn request_with_body_appends_content_length() {
        let mut headers = HeaderMap::new();
        headers.append("Host", "example.com");

        let bytes = build_request(&Method::Post, "/submit", &headers, b"hello");
        assert_eq!(
            bytes,
            b"POST /submit HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhello"
                .to_vec()
        );
    }

    #[test]
    fn request_headers_keep_insertion_order() {
        let mut headers = HeaderMap::new();
        headers.append("B-Second", "2");
        headers.append("A-First", "1");

        let bytes = build_request(&Method::Get, "/", &headers, b"");
        let text = String::from_utf8(bytes).unwrap();
        let b_pos = text.find("B-Second").unwrap();
        let a_pos = text.find("A-First").unwrap();
        assert!(b_pos < a_pos);
    }

    #[test]
    fn extension_method_is_written_verbatim() {
        let bytes = build_request(
            &Method::Extension("PURGE".to_string()),
            "/cache",
            &HeaderMap::new(),
            b"",
        );
        assert!(bytes.starts_with(b"PURGE /cache HTTP/1.1\r\n"));
    }

    #[test]
    fn response_uses_canonical_reason_when_omitted() {
        let bytes = build_response(StatusCode::NOT_FOUND, None, &HeaderMap::new(), b"");
        assert_eq!(bytes, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
    }

    #[test]
    fn response_with_explicit_reason() {
        let bytes = build_response(
            StatusCode::OK,
            Some("All Good Here"),
            &HeaderMap::new(),
            b"",
        );
        assert!(bytes.starts_with(b"HTTP/1.1 200 All Good Here\r\n"));
    }

    #[test]
    fn response_unknown_code_gets_empty_reason() {
        let bytes = build_response(StatusCode::new(299), None, &HeaderMap::new(), b"");
        assert!(bytes.starts_with(b"HTTP/1.1 299 \r\n"));
    }

    #[test]
    fn response_with_body() {
        let mut headers = HeaderMap::new();
        headers.append("Content-Type", "text/plain");

        let bytes = build_response(StatusCode::OK, None, &headers, b"Hello, World!");
        assert_eq!(
            bytes,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 13\r\n\r\nHello, World!"
                .to_vec()
        );
    }

    #[test]
    fn writer_buffer_is_reused() {
        let mut writer = ResponseWriter::new();
        writer.write(StatusCode::OK, None, &HeaderMap::new(), b"first");
        let first = writer.as_bytes().to_vec();
        writer.write(StatusCode::OK, None, &HeaderMap::new(), b"first");
        assert_eq!(writer.as_bytes(), first.as_slice());

        writer.write(StatusCode::NO_CONTENT, None, &HeaderMap::new(), b"");
        assert_eq!(writer.as_bytes(), b"HTTP/1.1 204 No Content\r\n\r\n");
    }
}

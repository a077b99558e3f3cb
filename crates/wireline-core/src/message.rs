//! Parsed HTTP message types.

use crate::headers::HeaderMap;
use crate::method::{HttpVersion, Method};
use crate::status::StatusCode;
use std::fmt;

/// Parsed request line: `METHOD SP TARGET SP VERSION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Request method.
    pub method: Method,
    /// Request target, kept opaque (origin, absolute, authority, or `*`).
    pub target: String,
    /// Protocol version.
    pub version: HttpVersion,
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.target, self.version)
    }
}

/// Parsed status line: `VERSION SP STATUS SP REASON`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Protocol version.
    pub version: HttpVersion,
    /// Status code in `[100, 999]`.
    pub code: StatusCode,
    /// Reason phrase; may be empty and may contain spaces.
    pub reason: String,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.version, self.code, self.reason)
    }
}

/// Start-line of a message: request line or status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartLine {
    /// A request line.
    Request(RequestLine),
    /// A status line.
    Status(StatusLine),
}

impl StartLine {
    /// Protocol version carried by either line form.
    #[must_use]
    pub fn version(&self) -> HttpVersion {
        match self {
            Self::Request(line) => line.version,
            Self::Status(line) => line.version,
        }
    }
}

/// Whether the message is a request or a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum MessageKind {
    /// Request message.
    Request,
    /// Response message.
    Response,
}

/// How the message body was framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum BodyFraming {
    /// Body length given by `Content-Length`.
    ContentLength,
    /// Body delivered as `Transfer-Encoding: chunked`.
    Chunked,
    /// No framing header; the body is empty.
    Identity,
}

/// A complete parsed HTTP message.
///
/// Emitted by the streaming parser once every byte of the message is
/// present. The header map and body are moved out of the parser, so a
/// `Message` is independent of the parser that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    start: StartLine,
    headers: HeaderMap,
    body: Vec<u8>,
    keep_alive: bool,
    framing: BodyFraming,
    content_length: Option<usize>,
}

impl Message {
    /// Assemble a message from its parts.
    #[must_use]
    pub fn new(
        start: StartLine,
        headers: HeaderMap,
        body: Vec<u8>,
        keep_alive: bool,
        framing: BodyFraming,
        content_length: Option<usize>,
    ) -> Self {
        Self {
            start,
            headers,
            body,
            keep_alive,
            framing,
            content_length,
        }
    }

    /// Request or response.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self.start {
            StartLine::Request(_) => MessageKind::Request,
            StartLine::Status(_) => MessageKind::Response,
        }
    }

    /// The start-line.
    #[must_use]
    pub fn start_line(&self) -> &StartLine {
        &self.start
    }

    /// The request line, if this is a request.
    #[must_use]
    pub fn request_line(&self) -> Option<&RequestLine> {
        match &self.start {
            StartLine::Request(line) => Some(line),
            StartLine::Status(_) => None,
        }
    }

    /// The status line, if this is a response.
    #[must_use]
    pub fn status_line(&self) -> Option<&StatusLine> {
        match &self.start {
            StartLine::Status(line) => Some(line),
            StartLine::Request(_) => None,
        }
    }

    /// The header fields.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Take ownership of the body.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Whether the transport should be reused after this message.
    #[must_use]
    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    /// How the body was framed.
    #[must_use]
    pub fn framing(&self) -> BodyFraming {
        self.framing
    }

    /// The parsed `Content-Length` value, when that framing applied.
    #[must_use]
    pub fn content_length(&self) -> Option<usize> {
        self.content_length
    }
}

//! Incremental HTTP/1.x message parsing.
//!
//! This crate provides the byte-level half of wireline:
//!
//! - [`validate`] — pure predicates over wire tokens
//! - [`start_line`] — request-line and status-line tokenizers
//! - [`header_block`] — header-line splitting and block parsing
//! - [`connection`] — `Connection` header semantics
//! - [`StreamingParser`] — the resumable state machine that turns byte
//!   fragments into complete [`Message`](wireline_core::Message)s
//! - [`RequestWriter`] / [`ResponseWriter`] — wire-format serialisers
//!
//! # Example
//!
//! ```
//! use wireline_http::StreamingParser;
//!
//! let mut parser = StreamingParser::new();
//! let mut messages = parser.parse(b"GET / HTTP/1.1\r\nHost: ex");
//! assert!(messages.is_empty());
//! messages = parser.parse(b"ample.com\r\n\r\n");
//! assert_eq!(messages.len(), 1);
//! ```

#![deny(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::match_same_arms)]

pub mod connection;
pub mod header_block;
mod parser;
pub mod start_line;
pub mod validate;
mod writer;

pub use connection::{ConnectionInfo, STANDARD_HOP_BY_HOP_HEADERS};
pub use header_block::{parse_header_block, split_header_line};
pub use parser::StreamingParser;
pub use start_line::{Tokenized, parse_request_line, parse_status_line};
pub use writer::{RequestWriter, ResponseWriter, build_request, build_response};

// Re-export the message model so callers need only one crate.
pub use wireline_core::{
    BodyFraming, ErrorCode, HeaderMap, HttpVersion, Message, MessageKind, Method, ParseError,
    ParserConfig, ParserState, RequestLine, StartLine, StatusCode, StatusLine,
};

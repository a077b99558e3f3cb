//! Parser configuration.

use std::time::Duration;

/// Default cap on accumulated body bytes (10 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Default cap on header entries per message.
pub const DEFAULT_MAX_HEADERS: usize = 256;

/// Default cap on a single header line.
pub const DEFAULT_MAX_HEADER_LINE_LENGTH: usize = 8 * 1024;

/// Default cap on chunks per chunked body.
pub const DEFAULT_MAX_CHUNKS: usize = 10_000;

/// Limits and switches for the streaming parser.
///
/// All options have defaults; override with the `with_*` builders:
///
/// ```
/// use wireline_core::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_max_headers(64)
///     .with_max_body_size(1024 * 1024);
/// assert_eq!(config.max_headers, 64);
/// ```
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Cap on header entries per message; exceeding fails the parse.
    pub max_headers: usize,
    /// Cap on any single header line, in bytes.
    pub max_header_line_length: usize,
    /// Cap on accumulated body bytes.
    pub max_body_size: usize,
    /// Cap on chunks per chunked body.
    pub max_chunks: usize,
    /// Run the header-name validator during block parsing.
    pub validate_header_names: bool,
    /// Run the header-value validator during block parsing.
    pub validate_header_values: bool,
    /// Treat `_` as a valid header-name character.
    pub allow_underscore_in_headers: bool,
    /// Advisory only; the parser always handles pipelined bytes.
    pub enable_pipelining: bool,
    /// Advisory only; enforcement is the caller's responsibility.
    pub inactivity_timeout: Duration,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_headers: DEFAULT_MAX_HEADERS,
            max_header_line_length: DEFAULT_MAX_HEADER_LINE_LENGTH,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            max_chunks: DEFAULT_MAX_CHUNKS,
            validate_header_names: true,
            validate_header_values: true,
            allow_underscore_in_headers: true,
            enable_pipelining: false,
            inactivity_timeout: Duration::from_millis(30_000),
        }
    }
}

impl ParserConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header entry cap.
    #[must_use]
    pub fn with_max_headers(mut self, max: usize) -> Self {
        self.max_headers = max;
        self
    }

    /// Set the single-header-line length cap.
    #[must_use]
    pub fn with_max_header_line_length(mut self, max: usize) -> Self {
        self.max_header_line_length = max;
        self
    }

    /// Set the body size cap.
    #[must_use]
    pub fn with_max_body_size(mut self, max: usize) -> Self {
        self.max_body_size = max;
        self
    }

    /// Set the per-body chunk count cap.
    #[must_use]
    pub fn with_max_chunks(mut self, max: usize) -> Self {
        self.max_chunks = max;
        self
    }

    /// Enable or disable header-name validation.
    #[must_use]
    pub fn with_validate_header_names(mut self, enabled: bool) -> Self {
        self.validate_header_names = enabled;
        self
    }

    /// Enable or disable header-value validation.
    #[must_use]
    pub fn with_validate_header_values(mut self, enabled: bool) -> Self {
        self.validate_header_values = enabled;
        self
    }

    /// Allow or forbid `_` in header names.
    #[must_use]
    pub fn with_allow_underscore_in_headers(mut self, allowed: bool) -> Self {
        self.allow_underscore_in_headers = allowed;
        self
    }

    /// Record the pipelining preference (advisory).
    #[must_use]
    pub fn with_enable_pipelining(mut self, enabled: bool) -> Self {
        self.enable_pipelining = enabled;
        self
    }

    /// Record the inactivity timeout (advisory).
    #[must_use]
    pub fn with_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.inactivity_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_table() {
        let config = ParserConfig::default();
        assert_eq!(config.max_headers, 256);
        assert_eq!(config.max_header_line_length, 8192);
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
        assert_eq!(config.max_chunks, 10_000);
        assert!(config.validate_header_names);
        assert!(config.validate_header_values);
        assert!(config.allow_underscore_in_headers);
        assert!(!config.enable_pipelining);
        assert_eq!(config.inactivity_timeout, Duration::from_secs(30));
    }

    #[test]
    fn builders_compose() {
        let config = ParserConfig::new()
            .with_max_headers(8)
            .with_max_body_size(512)
            .with_allow_underscore_in_headers(false)
            .with_validate_header_values(false);
        assert_eq!(config.max_headers, 8);
        assert_eq!(config.max_body_size, 512);
        assert!(!config.allow_underscore_in_headers);
        assert!(!config.validate_header_values);
        // Untouched fields keep their defaults.
        assert_eq!(config.max_chunks, 10_000);
    }
}

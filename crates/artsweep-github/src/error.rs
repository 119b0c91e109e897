//! Structured error handling for artifact operations.

use strum::{AsRefStr, Display, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Maximum number of characters of a response body kept in an error.
pub const MAX_ERROR_BODY_CHARS: usize = 1024;

/// Categories of errors that can occur while talking to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The request could not be built (malformed URL or header).
    RequestConstruction,
    /// Network-level failure (DNS, connection refused, timeout).
    Transport,
    /// The provider answered with an unexpected status.
    Api,
    /// The response body does not match the expected shape.
    Decode,
    /// Required settings are missing or malformed.
    Configuration,
}

/// Error type for artifact listing and deletion.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be built.
    #[error("failed to build request: {message}")]
    RequestConstruction {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Network-level failure before a response was received.
    #[error("failed to make request")]
    Transport(#[source] BoxedError),

    /// The provider answered with a status other than the expected one.
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("failed to decode response")]
    Decode(#[from] serde_json::Error),

    /// Configuration is missing or malformed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A single page of a paginated listing failed.
    #[error("failed to fetch page {page}")]
    Page {
        page: u64,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a request construction error.
    pub fn request_construction(message: impl Into<String>) -> Self {
        Self::RequestConstruction {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error from an underlying source.
    pub fn transport(source: impl Into<BoxedError>) -> Self {
        Self::Transport(source.into())
    }

    /// Creates an API error, truncating the body to [`MAX_ERROR_BODY_CHARS`].
    pub fn api(status: u16, body: impl AsRef<str>) -> Self {
        Self::Api {
            status,
            body: body.as_ref().chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }

    /// Creates a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Attaches the page number to an error raised while fetching that page.
    pub fn on_page(self, page: u64) -> Self {
        Self::Page {
            page,
            source: Box::new(self),
        }
    }

    /// Returns the classification of this error, looking through page context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RequestConstruction { .. } => ErrorKind::RequestConstruction,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Api,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Page { source, .. } => source.kind(),
        }
    }

    /// Returns the HTTP status code for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Page { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Returns the page number this error was raised on, if any.
    pub fn page(&self) -> Option<u64> {
        match self {
            Self::Page { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Returns `true` if the provider reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Formats this error followed by each of its sources, joined by `: `.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(error) = source {
            message.push_str(": ");
            message.push_str(&error.to_string());
            source = error.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_body() {
        let error = Error::api(403, "Resource not accessible by integration");
        let display = error.to_string();

        assert!(display.contains("403"));
        assert!(display.contains("Resource not accessible"));
        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.status(), Some(403));
    }

    #[test]
    fn api_error_truncates_long_bodies() {
        let body = "x".repeat(MAX_ERROR_BODY_CHARS * 2);
        let Error::Api { body, .. } = Error::api(500, body) else {
            panic!("expected API error");
        };

        assert_eq!(body.len(), MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn page_context_preserves_inner_classification() {
        let error = Error::api(403, "forbidden").on_page(2);

        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.status(), Some(403));
        assert_eq!(error.page(), Some(2));

        assert_eq!(error.to_string(), "failed to fetch page 2");
        assert_eq!(
            error.chain(),
            "failed to fetch page 2: API request failed with status 403: forbidden"
        );
    }

    #[test]
    fn not_found_detection() {
        assert!(Error::api(404, "Not Found").is_not_found());
        assert!(Error::api(404, "Not Found").on_page(3).is_not_found());
        assert!(!Error::api(410, "Gone").is_not_found());
        assert!(!Error::invalid_config("missing token").is_not_found());
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        assert_eq!(ErrorKind::RequestConstruction.as_ref(), "request_construction");
        assert_eq!(ErrorKind::Configuration.to_string(), "configuration");
        let kind: &'static str = ErrorKind::Decode.into();
        assert_eq!(kind, "decode");
    }

    #[test]
    fn decode_error_from_serde() {
        let source = serde_json::from_str::<u64>("not a number").unwrap_err();
        let error = Error::from(source);

        assert_eq!(error.kind(), ErrorKind::Decode);
        assert!(error.status().is_none());
        assert_eq!(error.to_string(), "failed to decode response");
        assert!(error.chain().starts_with("failed to decode response: expected value"));
    }

    #[test]
    fn chain_names_each_source_once() {
        let error = Error::transport("connection refused").on_page(3);

        assert_eq!(
            error.chain(),
            "failed to fetch page 3: failed to make request: connection refused"
        );
        assert_eq!(error.chain().matches("connection refused").count(), 1);
    }
}

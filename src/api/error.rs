//! API client errors

use thiserror::Error;

use crate::error::{ErrorCategory, ReputationErrorTrait};

/// Errors returned by the admin and public clients
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP client could not be built (bad base URL, bad header value)
    #[error("Initialization error: {0}")]
    Init(String),

    /// Connection refused, DNS failure, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. The message is the response body text so the
    /// operator sees the server's own explanation.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Public resource missing or not served
    #[error("Not found: {0}")]
    NotFound(String),

    /// 2xx response whose body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Build an HTTP error from a status and body. An empty body becomes
    /// `API error: {status}`.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            format!("API error: {status}")
        } else {
            body
        };
        Self::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message for a blocking alert: the server text for HTTP errors,
    /// otherwise the given localized fallback
    pub fn alert_message(&self, fallback: &str) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl ReputationErrorTrait for ApiError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            Self::Init(_) | Self::NotFound(_) | Self::Parse(_) => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Init(msg) => format!("{}: {msg}", crate::i18n::t!("errors.api.init")),
            Self::Network(msg) => format!("{}: {msg}", crate::i18n::t!("errors.api.network")),
            Self::Http { message, .. } => message.clone(),
            Self::NotFound(what) => format!("{}: {what}", crate::i18n::t!("errors.api.not_found")),
            Self::Parse(msg) => format!("{}: {msg}", crate::i18n::t!("errors.api.parse")),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Init(_) => ErrorCategory::Config,
            Self::Network(_) => ErrorCategory::Network,
            Self::Http { status: 404, .. } | Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Http { .. } => ErrorCategory::Network,
            Self::Parse(_) => ErrorCategory::Parsing,
        }
    }
}

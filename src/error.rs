//! Unified error handling for the reputation crate
//!
//! Domain errors stay close to the code that raises them and are gathered
//! here into a single [`Error`] for callers that cross module boundaries.
//!
//! # Architecture
//!
//! - [`ReputationErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use reputation::error::{Error, ReputationErrorTrait};
//!
//! fn report(err: Error) {
//!     if err.is_recoverable() {
//!         eprintln!("{} (다시 시도해 주세요)", err.localized_desc());
//!     } else {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use thiserror::Error;

pub use crate::api::ApiError;
pub use crate::console::ValidationError;
pub use crate::models::TransitionError;

/// Common trait for all reputation error types
pub trait ReputationErrorTrait: std::error::Error {
    /// Check if this error is recoverable (the operator can retry the same action)
    fn is_recoverable(&self) -> bool;

    /// Get localized description for user-facing messages
    fn localized_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection failures and non-2xx API responses
    Network,
    /// The requested hospital, content or report does not exist
    NotFound,
    /// Form input rejected before any request was made
    Validation,
    /// Lifecycle transition not allowed from the current state
    Transition,
    /// Unexpected response or payload shape
    Parsing,
    /// Configuration and startup errors
    Config,
    /// Template registration and page rendering errors
    Render,
}

impl ErrorCategory {
    /// Get localized description for the category
    pub fn localized_desc(&self) -> String {
        match self {
            Self::Network => crate::i18n::t!("errors.category.network").to_string(),
            Self::NotFound => crate::i18n::t!("errors.category.not_found").to_string(),
            Self::Validation => crate::i18n::t!("errors.category.validation").to_string(),
            Self::Transition => crate::i18n::t!("errors.category.transition").to_string(),
            Self::Parsing => crate::i18n::t!("errors.category.parsing").to_string(),
            Self::Config => crate::i18n::t!("errors.category.config").to_string(),
            Self::Render => crate::i18n::t!("errors.category.render").to_string(),
        }
    }
}

/// Unified error type for the reputation crate
#[derive(Error, Debug)]
pub enum Error {
    /// Admin or public API errors
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Console form validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Lifecycle transition errors
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// A page template failed to compile
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// Template rendering errors
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl ReputationErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_recoverable(),
            Self::Validation(_) => true, // fix the input and resubmit
            Self::Transition(_) => false,
            Self::Template(_) | Self::Render(_) => false,
            Self::Config(_) => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Api(e) => e.localized_desc(),
            Self::Validation(e) => e.localized_desc(),
            Self::Transition(e) => {
                format!("{}: {e}", crate::i18n::t!("errors.transition.not_allowed"))
            }
            Self::Template(e) => format!("{}: {e}", crate::i18n::t!("errors.render.template")),
            Self::Render(e) => format!("{}: {e}", crate::i18n::t!("errors.render.error")),
            Self::Config(msg) => format!("{}: {msg}", crate::i18n::t!("errors.config.error")),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Api(e) => e.category(),
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Transition(_) => ErrorCategory::Transition,
            Self::Template(_) | Self::Render(_) => ErrorCategory::Render,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True when the backend reported the resource missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_not_found())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentAction, Lifecycle};

    #[test]
    fn test_error_category() {
        let api_err = Error::Api(ApiError::http(500, ""));
        assert_eq!(api_err.category(), ErrorCategory::Network);

        let missing = Error::Api(ApiError::NotFound("hospitals/none".into()));
        assert_eq!(missing.category(), ErrorCategory::NotFound);
        assert!(missing.is_not_found());

        let invalid = Error::Validation(ValidationError::NoPublishDays);
        assert_eq!(invalid.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::Api(ApiError::http(502, "bad gateway")).is_recoverable());
        assert!(!Error::Api(ApiError::http(400, "Already published")).is_recoverable());
    }

    #[test]
    fn test_transition_error_conversion() {
        let err = Lifecycle::Published
            .apply(ContentAction::Reject)
            .unwrap_err();
        let unified: Error = err.into();
        assert!(matches!(unified, Error::Transition(_)));
        assert!(!unified.is_recoverable());
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("api.timeout_secs must be greater than 0");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(!err.is_recoverable());
        assert!(err.localized_desc().ends_with("api.timeout_secs must be greater than 0"));
    }

    #[test]
    fn test_template_error_conversion() {
        let mut handlebars = handlebars::Handlebars::new();
        let err: Error = handlebars
            .register_template_string("broken", "{{#if open}}never closed")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Template(_)));
        assert_eq!(err.category(), ErrorCategory::Render);
    }
}

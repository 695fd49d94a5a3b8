//! Load state of a console view

use crate::api::ApiError;

/// Data a view is showing: still loading, failed with a message, or ready
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Default for Phase<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Phase<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Phase<U> {
        match self {
            Self::Loading => Phase::Loading,
            Self::Failed(message) => Phase::Failed(message),
            Self::Ready(data) => Phase::Ready(f(data)),
        }
    }
}

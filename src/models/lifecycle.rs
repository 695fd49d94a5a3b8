//! Content lifecycle as the console observes it
//!
//! ```text
//!   (ungenerated) --generate--> DRAFT --publish--> PUBLISHED
//!                                 |
//!                                 +----reject----> REJECTED --regenerate--> DRAFT
//!
//!   READY: produced by the backend before a scheduled publish, shown only
//! ```
//!
//! Generation and regeneration happen on the backend. The console can only
//! request `publish` and `reject`, and only from a generated DRAFT. That
//! guard is carried by [`Actionable`]: the API client's transition methods
//! take one, and one can only be built from a generated DRAFT item.

use thiserror::Error;
use uuid::Uuid;

use super::content::{ContentItem, ContentStatus};

/// Operator-visible lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Slot exists but nothing has been generated (no title yet)
    Ungenerated,
    Draft,
    Ready,
    Published,
    Rejected,
}

/// Operator transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentAction {
    Publish,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action:?} content in state {from:?}")]
    NotAllowed {
        from: Lifecycle,
        action: ContentAction,
    },
}

impl Lifecycle {
    /// Classify a wire status together with the generated title.
    /// A missing or blank title always means the slot is not generated.
    pub fn of(status: ContentStatus, title: Option<&str>) -> Self {
        match title.map(str::trim) {
            None | Some("") => Self::Ungenerated,
            Some(_) => match status {
                ContentStatus::Draft => Self::Draft,
                ContentStatus::Ready => Self::Ready,
                ContentStatus::Published => Self::Published,
                ContentStatus::Rejected => Self::Rejected,
            },
        }
    }

    /// Actions the console offers in this state
    pub fn actions(&self) -> &'static [ContentAction] {
        match self {
            Self::Draft => &[ContentAction::Publish, ContentAction::Reject],
            Self::Ungenerated | Self::Ready | Self::Published | Self::Rejected => &[],
        }
    }

    pub fn is_actionable(&self) -> bool {
        !self.actions().is_empty()
    }

    /// No further operator action will ever be offered
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Published | Self::Rejected)
    }

    /// State the backend is expected to report after a successful request
    pub fn apply(self, action: ContentAction) -> Result<Lifecycle, TransitionError> {
        match (self, action) {
            (Self::Draft, ContentAction::Publish) => Ok(Self::Published),
            (Self::Draft, ContentAction::Reject) => Ok(Self::Rejected),
            (from, action) => Err(TransitionError::NotAllowed { from, action }),
        }
    }

    /// Status cell text. Ungenerated slots show `생성 전` in the title column
    /// and their wire status here.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ungenerated => "생성 전",
            Self::Draft => ContentStatus::Draft.label(),
            Self::Ready => ContentStatus::Ready.label(),
            Self::Published => ContentStatus::Published.label(),
            Self::Rejected => ContentStatus::Rejected.label(),
        }
    }
}

impl ContentAction {
    /// Reject sends the slot back to the nightly queue and must be confirmed
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Self::Reject)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Publish => "발행",
            Self::Reject => "반려",
        }
    }
}

/// Proof that an item is a generated DRAFT
#[derive(Debug, Clone, Copy)]
pub struct Actionable<'a> {
    item: &'a ContentItem,
}

impl<'a> Actionable<'a> {
    pub(crate) fn new(item: &'a ContentItem) -> Option<Self> {
        (item.lifecycle() == Lifecycle::Draft).then_some(Self { item })
    }

    pub fn id(&self) -> Uuid {
        self.item.id
    }

    pub fn item(&self) -> &'a ContentItem {
        self.item
    }

    pub fn title(&self) -> &'a str {
        self.item.title.as_deref().unwrap_or_default()
    }
}

//! Admin console view-models
//!
//! Each view owns its data in a [`Phase`] and talks to the backend through
//! an [`AdminApi`](crate::api::AdminApi) reference, so it can be driven by
//! the CLI or by a fake in tests. Nothing here outlives one session.
//!
//! - [`hospitals`] - hospital list and the creation form
//! - [`profile`] - profile editor and the domain section
//! - [`content`] - content board with publish/reject
//! - [`schedule`] - schedule form
//! - [`reports`] - report list and detail

pub mod confirm;
pub mod content;
pub mod hospitals;
pub mod phase;
pub mod profile;
pub mod reports;
pub mod schedule;
pub mod tags;

pub use confirm::{AutoConfirm, Confirmer, TerminalConfirmer};
pub use content::{ActionOutcome, ContentBoard, ContentRow};
pub use hospitals::{HospitalList, HospitalRow, NewHospitalForm};
pub use phase::Phase;
pub use profile::{
    dns_guide, Activation, DomainPanel, DomainSection, ProfileEditor, TagField, TextField,
};
pub use reports::{ReportBoard, ReportRow};
pub use schedule::ScheduleForm;
pub use tags::TagSet;

use thiserror::Error;

use crate::error::{ErrorCategory, ReputationErrorTrait};

/// Form input rejected before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("hospital name is required")]
    EmptyHospitalName,

    #[error("at least one publish day is required")]
    NoPublishDays,

    #[error("treatment name is required")]
    EmptyTreatmentName,

    #[error("no treatment at position {0}")]
    NoSuchTreatment(usize),
}

impl ReputationErrorTrait for ValidationError {
    fn is_recoverable(&self) -> bool {
        true
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::EmptyHospitalName => crate::i18n::t!("console.hospitals.name_required").to_string(),
            Self::NoPublishDays => crate::i18n::t!("console.schedule.no_days").to_string(),
            Self::EmptyTreatmentName => {
                crate::i18n::t!("console.profile.treatment_name_required").to_string()
            }
            Self::NoSuchTreatment(index) => {
                let position = index + 1;
                crate::i18n::t!("console.profile.no_such_treatment", position = position)
                    .to_string()
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

/// ✅ / ⬜ marker used by the hospital list
pub fn check_mark(done: bool) -> &'static str {
    if done {
        "✅"
    } else {
        "⬜"
    }
}

//! Core data structures shared by the console and the microsite
//!
//! Every enumerated code the API sends (plan, hospital status, content type,
//! content status, report type) is a closed enum here. Labels come from
//! exhaustive matches, so adding a variant without a label fails to compile.

pub mod content;
pub mod hospital;
pub mod lifecycle;
pub mod public;
pub mod report;
pub mod weekday;

pub use content::{ContentItem, ContentQuery, ContentStatus, ContentType};
pub use hospital::{
    BusinessHours, CreateHospital, Hospital, HospitalProfile, HospitalStatus, HospitalSummary,
    Plan, Treatment,
};
pub use lifecycle::{Actionable, ContentAction, Lifecycle, TransitionError};
pub use public::{PublicContent, PublicHospital};
pub use report::{Report, ReportType};
pub use weekday::Weekday;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Korea Standard Time offset (UTC+9), used for every user-facing date
pub const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Deserialize `null` the same way as a missing field: into `T::default()`
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Format a date the way `ko-KR` locales print it: `2024. 1. 15.`
pub fn format_ko_date(date: NaiveDate) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}

/// Format a timestamp as a `ko-KR` date in Korea Standard Time
pub fn format_ko_timestamp(ts: &DateTime<FixedOffset>) -> String {
    match FixedOffset::east_opt(KST_OFFSET_SECS) {
        Some(kst) => format_ko_date(ts.with_timezone(&kst).date_naive()),
        None => format_ko_date(ts.date_naive()),
    }
}

//! Schedule form
//!
//! The backend turns (plan, weekdays, start date) into concrete slots; the
//! form only validates its own input and shows the returned summary.
//! Resubmitting is allowed.

use chrono::{FixedOffset, NaiveDate, Utc};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use uuid::Uuid;

use super::ValidationError;
use crate::api::{AdminApi, ScheduleRequest, ScheduleSummary};
use crate::error::Result;
use crate::i18n::t;
use crate::models::{format_ko_date, Plan, Weekday, KST_OFFSET_SECS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub plan: Plan,
    days: BTreeSet<Weekday>,
    pub active_from: NaiveDate,
}

impl Default for ScheduleForm {
    /// PLAN_16, Tuesday and Friday, starting today in Seoul
    fn default() -> Self {
        Self {
            plan: Plan::Plan16,
            days: [Weekday::Tue, Weekday::Fri].into_iter().collect(),
            active_from: today_kst(),
        }
    }
}

impl ScheduleForm {
    pub fn new(
        plan: Plan,
        days: impl IntoIterator<Item = Weekday>,
        active_from: NaiveDate,
    ) -> Self {
        Self {
            plan,
            days: days.into_iter().collect(),
            active_from,
        }
    }

    /// Select or unselect a day. Returns whether it is now selected.
    pub fn toggle_day(&mut self, day: Weekday) -> bool {
        if self.days.remove(&day) {
            false
        } else {
            self.days.insert(day);
            true
        }
    }

    /// Selected days, Monday first
    pub fn days(&self) -> Vec<Weekday> {
        self.days.iter().copied().collect()
    }

    /// `화, 금` or `없음`
    pub fn days_label(&self) -> String {
        if self.days.is_empty() {
            return t!("console.schedule.no_days_selected").to_string();
        }
        self.days
            .iter()
            .map(Weekday::korean_name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Request body; fails without any network call when no day is selected
    pub fn validate(&self) -> std::result::Result<ScheduleRequest, ValidationError> {
        if self.days.is_empty() {
            return Err(ValidationError::NoPublishDays);
        }
        Ok(ScheduleRequest {
            plan: self.plan,
            publish_days: self.days(),
            active_from: self.active_from,
        })
    }

    pub async fn submit<A: AdminApi + ?Sized>(
        &self,
        api: &A,
        hospital_id: Uuid,
    ) -> Result<ScheduleSummary> {
        let request = self.validate()?;
        let summary = api.set_schedule(hospital_id, &request).await?;
        tracing::info!(
            %hospital_id,
            plan = %summary.plan,
            slots = summary.slots_created,
            "Schedule saved"
        );
        Ok(summary)
    }
}

/// Result text shown after a successful submit
pub fn render_summary(summary: &ScheduleSummary) -> String {
    let mut out = String::new();
    let slots = summary.slots_created;
    let _ = writeln!(out, "{}", t!("console.schedule.created", slots = slots));
    if let Some(first) = summary.first_publish_date {
        let date = format_ko_date(first);
        let _ = writeln!(out, "{}", t!("console.schedule.first_publish", date = date));
    }
    out
}

fn today_kst() -> NaiveDate {
    match FixedOffset::east_opt(KST_OFFSET_SECS) {
        Some(kst) => Utc::now().with_timezone(&kst).date_naive(),
        None => Utc::now().date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let form = ScheduleForm::default();
        assert_eq!(form.plan, Plan::Plan16);
        assert_eq!(form.days(), vec![Weekday::Tue, Weekday::Fri]);
    }

    #[test]
    fn test_toggle_keeps_days_sorted() {
        let mut form = ScheduleForm::default();
        assert!(form.toggle_day(Weekday::Mon));
        assert!(!form.toggle_day(Weekday::Fri));
        assert_eq!(form.days(), vec![Weekday::Mon, Weekday::Tue]);
    }

    #[test]
    fn test_no_days_fails_validation() {
        let mut form = ScheduleForm::default();
        form.toggle_day(Weekday::Tue);
        form.toggle_day(Weekday::Fri);
        assert_eq!(form.validate(), Err(ValidationError::NoPublishDays));
    }

    #[test]
    fn test_request_body() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let form = ScheduleForm::new(Plan::Plan8, [Weekday::Sat, Weekday::Mon], start);
        let request = form.validate().unwrap();
        assert_eq!(request.publish_days, vec![Weekday::Mon, Weekday::Sat]);
        assert_eq!(request.active_from, start);
        assert_eq!(request.plan, Plan::Plan8);
    }
}

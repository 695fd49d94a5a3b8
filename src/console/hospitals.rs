//! Hospital list and registration form

use std::fmt::Write as _;
use uuid::Uuid;

use super::phase::Phase;
use super::{check_mark, ValidationError};
use crate::api::AdminApi;
use crate::error::Result;
use crate::i18n::t;
use crate::models::{CreateHospital, Hospital, HospitalSummary, Plan};

/// One rendered row of the hospital list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HospitalRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub status_label: &'static str,
    /// `-` when no plan is set
    pub plan_label: &'static str,
    pub profile_mark: &'static str,
    pub live_mark: &'static str,
    pub schedule_mark: &'static str,
}

impl From<&HospitalSummary> for HospitalRow {
    fn from(h: &HospitalSummary) -> Self {
        Self {
            id: h.id,
            name: h.name.clone(),
            slug: h.slug.clone(),
            status_label: h.status.label(),
            plan_label: h.plan.as_ref().map_or("-", Plan::label),
            profile_mark: check_mark(h.profile_complete),
            live_mark: check_mark(h.site_live),
            schedule_mark: check_mark(h.schedule_set),
        }
    }
}

/// Hospital list view, in server order
pub struct HospitalList<'a, A: AdminApi + ?Sized> {
    api: &'a A,
    hospitals: Phase<Vec<HospitalSummary>>,
}

impl<'a, A: AdminApi + ?Sized> HospitalList<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            hospitals: Phase::Loading,
        }
    }

    pub async fn load(&mut self) {
        self.hospitals = Phase::Loading;
        self.hospitals = Phase::from_result(self.api.list_hospitals().await);
    }

    pub fn hospitals(&self) -> &Phase<Vec<HospitalSummary>> {
        &self.hospitals
    }

    pub fn rows(&self) -> Vec<HospitalRow> {
        self.hospitals
            .data()
            .map(|list| list.iter().map(HospitalRow::from).collect())
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.hospitals {
            Phase::Loading => out.push_str(&t!("console.common.loading")),
            Phase::Failed(message) => {
                let _ = write!(out, "{}: {message}", t!("console.common.error"));
            }
            Phase::Ready(list) if list.is_empty() => {
                out.push_str(&t!("console.hospitals.empty"));
            }
            Phase::Ready(_) => {
                let _ = writeln!(out, "{}", t!("console.hospitals.header"));
                for row in self.rows() {
                    let _ = writeln!(
                        out,
                        "{}  {}  {}  {}  {}  {}  {}",
                        row.id,
                        row.name,
                        row.status_label,
                        row.plan_label,
                        row.profile_mark,
                        row.live_mark,
                        row.schedule_mark
                    );
                }
            }
        }
        out
    }
}

/// Registration form: name and plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHospitalForm {
    pub name: String,
    pub plan: Plan,
}

impl Default for NewHospitalForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            plan: Plan::Plan16,
        }
    }
}

impl NewHospitalForm {
    pub fn new(name: impl Into<String>, plan: Plan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }

    /// Request body, with the name trimmed
    pub fn validate(&self) -> std::result::Result<CreateHospital, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyHospitalName);
        }
        Ok(CreateHospital {
            name: name.to_string(),
            plan: self.plan,
        })
    }

    /// Validate and register. The returned hospital's id leads to its profile.
    pub async fn submit<A: AdminApi + ?Sized>(&self, api: &A) -> Result<Hospital> {
        let request = self.validate()?;
        let hospital = api.create_hospital(&request).await?;
        tracing::info!(hospital_id = %hospital.id, slug = %hospital.slug, "Hospital registered");
        Ok(hospital)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HospitalStatus;

    fn summary(plan: Option<Plan>, live: bool) -> HospitalSummary {
        HospitalSummary {
            id: Uuid::nil(),
            name: "장편한외과의원".to_string(),
            slug: "jangpyeonhan".to_string(),
            status: HospitalStatus::Onboarding,
            plan,
            profile_complete: true,
            v0_report_done: false,
            site_live: live,
            schedule_set: false,
            created_at: None,
        }
    }

    #[test]
    fn test_row_markers_and_plan_fallback() {
        let row = HospitalRow::from(&summary(None, true));
        assert_eq!(row.plan_label, "-");
        assert_eq!(row.status_label, "온보딩");
        assert_eq!(row.profile_mark, "✅");
        assert_eq!(row.live_mark, "✅");
        assert_eq!(row.schedule_mark, "⬜");

        let row = HospitalRow::from(&summary(Some(Plan::Plan12), false));
        assert_eq!(row.plan_label, "12편/월");
    }

    #[test]
    fn test_form_trims_and_requires_name() {
        let form = NewHospitalForm::new("   ", Plan::Plan8);
        assert_eq!(form.validate(), Err(ValidationError::EmptyHospitalName));

        let form = NewHospitalForm::new("  장편한외과의원 ", Plan::Plan8);
        let body = form.validate().unwrap();
        assert_eq!(body.name, "장편한외과의원");
        assert_eq!(body.plan, Plan::Plan8);
    }

    #[test]
    fn test_form_defaults_to_plan_16() {
        assert_eq!(NewHospitalForm::default().plan, Plan::Plan16);
    }
}

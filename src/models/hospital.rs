//! Hospital profiles, plans and lifecycle status

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::null_as_default;
use super::weekday::Weekday;

/// Commercial plan: number of content pieces produced per month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    #[serde(rename = "PLAN_16")]
    Plan16,
    #[serde(rename = "PLAN_12")]
    Plan12,
    #[serde(rename = "PLAN_8")]
    Plan8,
}

impl Plan {
    /// Content pieces per month
    pub fn monthly_count(&self) -> u32 {
        match self {
            Self::Plan16 => 16,
            Self::Plan12 => 12,
            Self::Plan8 => 8,
        }
    }

    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plan16 => "PLAN_16",
            Self::Plan12 => "PLAN_12",
            Self::Plan8 => "PLAN_8",
        }
    }

    /// Display label, e.g. `16편/월`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plan16 => "16편/월",
            Self::Plan12 => "12편/월",
            Self::Plan8 => "8편/월",
        }
    }

    /// Parse a wire code (`PLAN_16`) or a bare count (`16`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PLAN_16" | "16" => Some(Self::Plan16),
            "PLAN_12" | "12" => Some(Self::Plan12),
            "PLAN_8" | "8" => Some(Self::Plan8),
            _ => None,
        }
    }

    /// All plans, largest first
    pub fn all() -> [Self; 3] {
        [Self::Plan16, Self::Plan12, Self::Plan8]
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::Plan16
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Onboarding pipeline status, owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HospitalStatus {
    Onboarding,
    Analyzing,
    Building,
    PendingDomain,
    Active,
    Paused,
}

impl HospitalStatus {
    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Onboarding => "온보딩",
            Self::Analyzing => "분석중",
            Self::Building => "빌드중",
            Self::PendingDomain => "도메인대기",
            Self::Active => "운영중",
            Self::Paused => "일시정지",
        }
    }
}

impl std::fmt::Display for HospitalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Row of the hospital list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: HospitalStatus,
    pub plan: Option<Plan>,
    pub profile_complete: bool,
    #[serde(default)]
    pub v0_report_done: bool,
    pub site_live: bool,
    #[serde(default)]
    pub schedule_set: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

/// Business hours keyed by weekday, free text per day (`09:00 ~ 18:00 / 휴진`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun: Option<String>,
}

impl BusinessHours {
    fn slot(&self, day: Weekday) -> &Option<String> {
        match day {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }

    fn slot_mut(&mut self, day: Weekday) -> &mut Option<String> {
        match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }

    /// Hours for a day, if any were entered
    pub fn get(&self, day: Weekday) -> Option<&str> {
        self.slot(day).as_deref()
    }

    /// Set the hours text for a day. The text is stored as typed,
    /// including an empty string.
    pub fn set(&mut self, day: Weekday, hours: impl Into<String>) {
        *self.slot_mut(day) = Some(hours.into());
    }

    /// Days with non-blank hours, Monday first
    pub fn entries(&self) -> Vec<(Weekday, &str)> {
        Weekday::all()
            .into_iter()
            .filter_map(|day| {
                self.get(day)
                    .filter(|h| !h.trim().is_empty())
                    .map(|h| (day, h))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// A treatment the hospital offers, shown on the microsite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl Treatment {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Full hospital detail as returned by the admin API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: HospitalStatus,
    pub plan: Option<Plan>,

    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub business_hours: BusinessHours,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub blog_url: Option<String>,
    #[serde(default)]
    pub aeo_domain: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub region: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialties: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub competitors: Vec<String>,

    #[serde(default)]
    pub director_name: Option<String>,
    #[serde(default)]
    pub director_career: Option<String>,
    #[serde(default)]
    pub director_philosophy: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub treatments: Vec<Treatment>,

    pub profile_complete: bool,
    #[serde(default)]
    pub v0_report_done: bool,
    #[serde(default)]
    pub site_built: bool,
    pub site_live: bool,
    #[serde(default)]
    pub schedule_set: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl Hospital {
    /// Editable part of the hospital, as the profile form starts it
    pub fn profile(&self) -> HospitalProfile {
        HospitalProfile {
            director_name: self.director_name.clone().unwrap_or_default(),
            director_career: self.director_career.clone().unwrap_or_default(),
            director_philosophy: self.director_philosophy.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            business_hours: self.business_hours.clone(),
            website_url: self.website_url.clone().unwrap_or_default(),
            blog_url: self.blog_url.clone().unwrap_or_default(),
            region: self.region.clone(),
            specialties: self.specialties.clone(),
            keywords: self.keywords.clone(),
            competitors: self.competitors.clone(),
            treatments: self.treatments.clone(),
            profile_complete: self.profile_complete,
        }
    }

    /// Domain string, treating blank as unset
    pub fn domain(&self) -> Option<&str> {
        self.aeo_domain.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// The profile PATCH body: every mutable field, sent whole
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HospitalProfile {
    pub director_name: String,
    pub director_career: String,
    pub director_philosophy: String,
    pub address: String,
    pub phone: String,
    pub business_hours: BusinessHours,
    pub website_url: String,
    pub blog_url: String,
    pub region: Vec<String>,
    pub specialties: Vec<String>,
    pub keywords: Vec<String>,
    pub competitors: Vec<String>,
    pub treatments: Vec<Treatment>,
    pub profile_complete: bool,
}

/// Body of `POST /admin/hospitals`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateHospital {
    pub name: String,
    pub plan: Plan,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"{
        "id": "7d1f0c8e-3c1a-4d36-9a57-2b0f5d1e6a11",
        "name": "장편한외과의원",
        "slug": "jangpyeonhan",
        "status": "PENDING_DOMAIN",
        "plan": "PLAN_12",
        "address": null,
        "phone": "02-1234-5678",
        "business_hours": {"mon": "09:00 ~ 18:00", "sun": "휴진"},
        "website_url": null,
        "blog_url": null,
        "aeo_domain": null,
        "region": null,
        "specialties": ["외과"],
        "keywords": [],
        "competitors": [],
        "director_name": "홍길동",
        "director_career": null,
        "director_philosophy": null,
        "treatments": [{"name": "하지정맥류", "description": null}],
        "profile_complete": true,
        "v0_report_done": false,
        "site_built": true,
        "site_live": false,
        "schedule_set": false,
        "created_at": "2024-03-01T10:00:00.123456+00:00"
    }"#;

    #[test]
    fn test_plan_wire_codes() {
        assert_eq!(serde_json::to_string(&Plan::Plan16).unwrap(), "\"PLAN_16\"");
        let plan: Plan = serde_json::from_str("\"PLAN_8\"").unwrap();
        assert_eq!(plan, Plan::Plan8);
        assert_eq!(plan.monthly_count(), 8);
        assert_eq!(Plan::parse("12"), Some(Plan::Plan12));
        assert_eq!(Plan::parse("PLAN_20"), None);
    }

    #[test]
    fn test_status_labels_cover_all() {
        let status: HospitalStatus = serde_json::from_str("\"PENDING_DOMAIN\"").unwrap();
        assert_eq!(status.label(), "도메인대기");
        assert_eq!(HospitalStatus::Active.label(), "운영중");
    }

    #[test]
    fn test_detail_normalises_nulls() {
        let hospital: Hospital = serde_json::from_str(DETAIL).unwrap();
        assert!(hospital.region.is_empty());
        assert_eq!(hospital.specialties, vec!["외과"]);
        assert_eq!(hospital.treatments[0].description, "");
        assert_eq!(hospital.business_hours.get(Weekday::Mon), Some("09:00 ~ 18:00"));
        assert_eq!(hospital.domain(), None);
        assert!(hospital.site_built);
    }

    #[test]
    fn test_profile_from_detail() {
        let hospital: Hospital = serde_json::from_str(DETAIL).unwrap();
        let profile = hospital.profile();
        assert_eq!(profile.director_name, "홍길동");
        assert_eq!(profile.address, "");
        assert!(profile.profile_complete);
    }

    #[test]
    fn test_business_hours_entries_skip_blank() {
        let mut hours = BusinessHours::default();
        hours.set(Weekday::Tue, "10:00 ~ 19:00");
        hours.set(Weekday::Wed, "  ");
        let entries = hours.entries();
        assert_eq!(entries, vec![(Weekday::Tue, "10:00 ~ 19:00")]);

        let json = serde_json::to_value(&hours).unwrap();
        assert_eq!(json["tue"], "10:00 ~ 19:00");
        assert!(json.get("mon").is_none());
    }
}

//! Common test utilities

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use reputation::api::{
    ActionReceipt, AdminApi, ApiError, ScheduleRequest, ScheduleSummary,
};
use reputation::config::{ApiConfig, SiteConfig};
use reputation::models::{
    Actionable, ContentItem, ContentQuery, ContentStatus, CreateHospital, Hospital,
    HospitalProfile, HospitalSummary, Report,
};

pub const HOSPITAL_ID: Uuid = Uuid::from_u128(0x7d1f0c8e_3c1a_4d36_9a57_2b0f5d1e6a11);

pub fn content_id(n: u128) -> Uuid {
    Uuid::from_u128(0x0b6f5b8e_8a54_4bb5_a2a4_000000000000 + n)
}

pub fn report_id(n: u128) -> Uuid {
    Uuid::from_u128(0x5c1d2e3f_0000_4000_8000_000000000000 + n)
}

/// Admin hospital detail
pub fn hospital_json(site_built: bool, site_live: bool, domain: Option<&str>) -> Value {
    json!({
        "id": HOSPITAL_ID,
        "name": "장편한외과의원",
        "slug": "jangpyeonhan",
        "status": if site_live { "ACTIVE" } else { "PENDING_DOMAIN" },
        "plan": "PLAN_16",
        "address": "서울 강남구 테헤란로 1",
        "phone": "02-1234-5678",
        "business_hours": {"mon": "09:00 ~ 18:00", "sun": "휴진"},
        "website_url": null,
        "blog_url": null,
        "aeo_domain": domain,
        "region": ["서울", "강남구"],
        "specialties": ["하지정맥류"],
        "keywords": null,
        "competitors": [],
        "director_name": "김원장",
        "director_career": "서울대 의대 졸업",
        "director_philosophy": null,
        "treatments": [{"name": "하지정맥류", "description": "레이저 치료"}],
        "profile_complete": true,
        "v0_report_done": true,
        "site_built": site_built,
        "site_live": site_live,
        "schedule_set": false,
        "created_at": "2024-02-20T10:00:00+09:00"
    })
}

pub fn hospital(site_built: bool, site_live: bool, domain: Option<&str>) -> Hospital {
    serde_json::from_value(hospital_json(site_built, site_live, domain)).unwrap()
}

pub fn hospital_summary_json() -> Value {
    json!({
        "id": HOSPITAL_ID,
        "name": "장편한외과의원",
        "slug": "jangpyeonhan",
        "status": "ONBOARDING",
        "plan": null,
        "profile_complete": false,
        "v0_report_done": false,
        "site_live": false,
        "schedule_set": false,
        "created_at": "2024-02-20T10:00:00+09:00"
    })
}

/// One content slot as the list endpoint returns it
pub fn content_json(n: u128, status: &str, title: Option<&str>) -> Value {
    json!({
        "id": content_id(n),
        "content_type": "DISEASE",
        "sequence_no": n,
        "total_count": 16,
        "title": title,
        "meta_description": title.map(|t| format!("{t} 요약")),
        "image_url": null,
        "scheduled_date": "2024-03-05",
        "status": status,
        "generated_at": title.map(|_| "2024-03-04T02:00:00+09:00"),
        "published_at": null,
        "published_by": null
    })
}

pub fn content(n: u128, status: &str, title: Option<&str>) -> ContentItem {
    serde_json::from_value(content_json(n, status, title)).unwrap()
}

pub fn report_json(n: u128, pdf: Option<&str>) -> Value {
    json!({
        "id": report_id(n),
        "hospital_id": HOSPITAL_ID,
        "period_year": 2024,
        "period_month": 3,
        "report_type": "MONTHLY",
        "pdf_path": pdf,
        "sov_summary": {"chatgpt": 0.25, "note": "상승"},
        "content_summary": null,
        "created_at": "2024-04-01T09:00:00+09:00",
        "sent_at": null
    })
}

pub fn report(n: u128, pdf: Option<&str>) -> Report {
    serde_json::from_value(report_json(n, pdf)).unwrap()
}

/// Public hospital as the microsite API serves it
pub fn public_hospital_json() -> Value {
    json!({
        "id": HOSPITAL_ID,
        "name": "장편한외과의원",
        "slug": "jangpyeonhan",
        "address": "서울 강남구 테헤란로 1",
        "phone": "02-1234-5678",
        "business_hours": {"mon": "09:00 ~ 18:00"},
        "website_url": null,
        "blog_url": null,
        "kakao_channel_url": null,
        "aeo_domain": "info.jangpyeonhan.kr",
        "region": ["서울", "강남구"],
        "specialties": ["하지정맥류", "탈장"],
        "keywords": [],
        "director_name": "김원장",
        "director_career": "서울대 의대 졸업",
        "director_philosophy": "환자 중심 진료",
        "director_photo_url": null,
        "treatments": [{"name": "하지정맥류", "description": "레이저 치료"}]
    })
}

pub fn public_content_json(n: u128, content_type: &str, title: &str) -> Value {
    json!({
        "id": content_id(n),
        "content_type": content_type,
        "title": title,
        "meta_description": null,
        "image_url": null,
        "scheduled_date": "2024-03-05",
        "published_at": "2024-03-05T09:00:00+09:00",
        "body": "## 증상\n\n다리가 붓고 무겁습니다.<script>alert(1)</script>"
    })
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        public_base_url: base_url.to_string(),
        admin_key: "test-key".to_string(),
        timeout_secs: 5,
        ..ApiConfig::default()
    }
}

pub fn site_config() -> SiteConfig {
    SiteConfig {
        site_url: "https://reputation.co.kr".to_string(),
        sitemap_slugs: vec!["jangpyeonhan".to_string()],
        ..SiteConfig::default()
    }
}

/// In-memory backend that records every call
#[derive(Default)]
pub struct FakeAdmin {
    pub hospital: Mutex<Option<Hospital>>,
    pub contents: Mutex<Vec<ContentItem>>,
    pub reports: Vec<Report>,
    /// Detail endpoints (content and report) answer 500
    pub fail_details: bool,
    /// Publish/reject/domain/activate answer with this error
    pub fail_mutations: Option<ApiError>,
    /// The next publish/reject never answers
    pub hang_next_transition: AtomicBool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeAdmin {
    pub fn with_contents(contents: Vec<ContentItem>) -> Self {
        Self {
            contents: Mutex::new(contents),
            ..Default::default()
        }
    }

    pub fn with_hospital(hospital: Hospital) -> Self {
        Self {
            hospital: Mutex::new(Some(hospital)),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn mutation(&self) -> Result<(), ApiError> {
        match &self.fail_mutations {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn maybe_hang(&self) {
        if self.hang_next_transition.swap(false, Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }

    fn set_status(&self, id: Uuid, status: ContentStatus) {
        let mut contents = self.contents.lock().unwrap();
        if let Some(item) = contents.iter_mut().find(|c| c.id == id) {
            item.status = status;
        }
    }

    fn hospital_or_404(&self) -> Result<Hospital, ApiError> {
        self.hospital
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::http(404, r#"{"detail":"Hospital not found"}"#))
    }
}

#[async_trait]
impl AdminApi for FakeAdmin {
    async fn list_hospitals(&self) -> Result<Vec<HospitalSummary>, ApiError> {
        self.record("list_hospitals");
        Ok(vec![serde_json::from_value(hospital_summary_json()).unwrap()])
    }

    async fn create_hospital(&self, body: &CreateHospital) -> Result<Hospital, ApiError> {
        self.record(format!("create_hospital:{}:{}", body.name, body.plan));
        let mut hospital = hospital(false, false, None);
        hospital.name = body.name.clone();
        hospital.plan = Some(body.plan);
        Ok(hospital)
    }

    async fn get_hospital(&self, _hospital_id: Uuid) -> Result<Hospital, ApiError> {
        self.record("get_hospital");
        self.hospital_or_404()
    }

    async fn update_profile(
        &self,
        _hospital_id: Uuid,
        profile: &HospitalProfile,
    ) -> Result<Hospital, ApiError> {
        self.record("update_profile");
        self.mutation()?;
        let mut hospital = self.hospital_or_404()?;
        hospital.region = profile.region.clone();
        hospital.keywords = profile.keywords.clone();
        hospital.treatments = profile.treatments.clone();
        hospital.phone = Some(profile.phone.clone());
        hospital.profile_complete = profile.profile_complete;
        *self.hospital.lock().unwrap() = Some(hospital.clone());
        Ok(hospital)
    }

    async fn set_domain(
        &self,
        _hospital_id: Uuid,
        domain: &str,
    ) -> Result<Option<ActionReceipt>, ApiError> {
        self.record(format!("set_domain:{domain}"));
        self.mutation()?;
        Ok(Some(ActionReceipt {
            detail: format!("Domain {domain} set"),
            published_at: None,
        }))
    }

    async fn activate(&self, _hospital_id: Uuid) -> Result<Option<ActionReceipt>, ApiError> {
        self.record("activate");
        self.mutation()?;
        Ok(None)
    }

    async fn set_schedule(
        &self,
        _hospital_id: Uuid,
        body: &ScheduleRequest,
    ) -> Result<ScheduleSummary, ApiError> {
        let days: Vec<String> = body.publish_days.iter().map(|d| d.index().to_string()).collect();
        self.record(format!("set_schedule:{}:{}", body.plan, days.join(",")));
        Ok(ScheduleSummary {
            schedule_id: Uuid::nil(),
            plan: body.plan,
            publish_days: body.publish_days.clone(),
            slots_created: 16,
            first_publish_date: Some(body.active_from),
        })
    }

    async fn list_content(
        &self,
        _hospital_id: Uuid,
        _query: &ContentQuery,
    ) -> Result<Vec<ContentItem>, ApiError> {
        self.record("list_content");
        Ok(self.contents.lock().unwrap().clone())
    }

    async fn get_content(
        &self,
        _hospital_id: Uuid,
        content_id: Uuid,
    ) -> Result<ContentItem, ApiError> {
        self.record(format!("get_content:{content_id}"));
        if self.fail_details {
            return Err(ApiError::http(500, "Internal Server Error"));
        }
        let mut item = self
            .contents
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == content_id)
            .cloned()
            .ok_or_else(|| ApiError::http(404, "Content not found"))?;
        item.body = Some("## 본문".to_string());
        Ok(item)
    }

    async fn publish(
        &self,
        _hospital_id: Uuid,
        item: Actionable<'_>,
        published_by: &str,
    ) -> Result<Option<ActionReceipt>, ApiError> {
        self.record(format!("publish:{}:{published_by}", item.id()));
        self.maybe_hang().await;
        self.mutation()?;
        self.set_status(item.id(), ContentStatus::Published);
        Ok(Some(ActionReceipt {
            detail: "Published".to_string(),
            published_at: None,
        }))
    }

    async fn reject(
        &self,
        _hospital_id: Uuid,
        item: Actionable<'_>,
    ) -> Result<Option<ActionReceipt>, ApiError> {
        self.record(format!("reject:{}", item.id()));
        self.maybe_hang().await;
        self.mutation()?;
        self.set_status(item.id(), ContentStatus::Rejected);
        Ok(None)
    }

    async fn list_reports(&self, _hospital_id: Uuid) -> Result<Vec<Report>, ApiError> {
        self.record("list_reports");
        Ok(self.reports.clone())
    }

    async fn get_report(&self, _hospital_id: Uuid, report_id: Uuid) -> Result<Report, ApiError> {
        self.record(format!("get_report:{report_id}"));
        if self.fail_details {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        self.reports
            .iter()
            .find(|r| r.id == report_id)
            .cloned()
            .ok_or_else(|| ApiError::http(404, "Report not found"))
    }
}

//! Admin API client
//!
//! Every request carries the static `X-Admin-Key` header. Failures are
//! returned as-is: there is no retry, the operator resubmits.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use super::error::ApiError;
use super::join_url;
use crate::config::ApiConfig;
use crate::metrics;
use crate::models::{
    Actionable, ContentItem, ContentQuery, CreateHospital, Hospital, HospitalProfile,
    HospitalSummary, Plan, Report, Weekday,
};

/// Header carrying the admin credential
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

// ============================================================================
// Request / Response Types
// ============================================================================

/// Body of `POST /admin/hospitals/{id}/schedule`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub plan: Plan,
    pub publish_days: Vec<Weekday>,
    pub active_from: NaiveDate,
}

/// What the backend reports after instantiating slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub schedule_id: Uuid,
    pub plan: Plan,
    pub publish_days: Vec<Weekday>,
    pub slots_created: u32,
    #[serde(default)]
    pub first_publish_date: Option<NaiveDate>,
}

/// Acknowledgement returned by state-changing endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReceipt {
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub published_at: Option<DateTime<FixedOffset>>,
}

#[derive(Serialize)]
struct PublishBody<'a> {
    published_by: &'a str,
}

#[derive(Serialize)]
struct DomainBody<'a> {
    domain: &'a str,
}

// ============================================================================
// AdminApi
// ============================================================================

/// Operations the console performs against the admin API
///
/// Publish and reject take an [`Actionable`], so only a generated DRAFT
/// can be sent. Endpoints that may answer 204 return `Option`.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_hospitals(&self) -> Result<Vec<HospitalSummary>, ApiError>;

    async fn create_hospital(&self, request: &CreateHospital) -> Result<Hospital, ApiError>;

    async fn get_hospital(&self, hospital_id: Uuid) -> Result<Hospital, ApiError>;

    /// Send the whole profile. Last writer wins.
    async fn update_profile(
        &self,
        hospital_id: Uuid,
        profile: &HospitalProfile,
    ) -> Result<Hospital, ApiError>;

    async fn set_domain(
        &self,
        hospital_id: Uuid,
        domain: &str,
    ) -> Result<Option<ActionReceipt>, ApiError>;

    async fn activate(&self, hospital_id: Uuid) -> Result<Option<ActionReceipt>, ApiError>;

    async fn set_schedule(
        &self,
        hospital_id: Uuid,
        request: &ScheduleRequest,
    ) -> Result<ScheduleSummary, ApiError>;

    async fn list_content(
        &self,
        hospital_id: Uuid,
        query: &ContentQuery,
    ) -> Result<Vec<ContentItem>, ApiError>;

    async fn get_content(&self, hospital_id: Uuid, content_id: Uuid)
        -> Result<ContentItem, ApiError>;

    async fn publish(
        &self,
        hospital_id: Uuid,
        item: Actionable<'_>,
        published_by: &str,
    ) -> Result<Option<ActionReceipt>, ApiError>;

    async fn reject(
        &self,
        hospital_id: Uuid,
        item: Actionable<'_>,
    ) -> Result<Option<ActionReceipt>, ApiError>;

    async fn list_reports(&self, hospital_id: Uuid) -> Result<Vec<Report>, ApiError>;

    async fn get_report(&self, hospital_id: Uuid, report_id: Uuid) -> Result<Report, ApiError>;
}

// ============================================================================
// AdminClient
// ============================================================================

/// reqwest-backed [`AdminApi`]
#[derive(Debug, Clone)]
pub struct AdminClient {
    base_url: String,
    http_client: Client,
}

impl AdminClient {
    /// Create a client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.admin_key.is_empty() {
            tracing::warn!("Admin key is empty; the API will likely answer 401/403");
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.admin_key)
            .map_err(|e| ApiError::Init(format!("invalid admin key header: {e}")))?;
        headers.insert(ADMIN_KEY_HEADER, key);

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .user_agent(format!("reputation/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Init(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, join_url(&self.base_url, path))
    }

    // Internal: send, record metrics, map non-2xx to errors. 204 is `None`.
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let started = Instant::now();
        let result = request.send().await;
        let elapsed = started.elapsed().as_secs_f64();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                metrics::record_api_request("admin", endpoint, 0, elapsed);
                tracing::warn!(endpoint, error = %e, "Admin API request failed");
                return Err(ApiError::from(e));
            }
        };

        let status = response.status();
        metrics::record_api_request("admin", endpoint, status.as_u16(), elapsed);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint, status = status.as_u16(), "Admin API returned an error");
            return Err(ApiError::http(status.as_u16(), body));
        }

        tracing::debug!(endpoint, status = status.as_u16(), elapsed_secs = elapsed, "Admin API ok");

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(ApiError::from)?;
        if bytes.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ApiError::Parse(format!("{endpoint}: {e}")))
    }

    // Internal: endpoints that must return a payload
    async fn send_required<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(endpoint, request)
            .await?
            .ok_or_else(|| ApiError::Parse(format!("{endpoint}: empty response")))
    }
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn list_hospitals(&self) -> Result<Vec<HospitalSummary>, ApiError> {
        let request = self.request(Method::GET, "/admin/hospitals");
        Ok(self.send("hospitals.list", request).await?.unwrap_or_default())
    }

    async fn create_hospital(&self, body: &CreateHospital) -> Result<Hospital, ApiError> {
        let request = self.request(Method::POST, "/admin/hospitals").json(body);
        self.send_required("hospitals.create", request).await
    }

    async fn get_hospital(&self, hospital_id: Uuid) -> Result<Hospital, ApiError> {
        let request = self.request(Method::GET, &format!("/admin/hospitals/{hospital_id}"));
        self.send_required("hospitals.get", request).await
    }

    async fn update_profile(
        &self,
        hospital_id: Uuid,
        profile: &HospitalProfile,
    ) -> Result<Hospital, ApiError> {
        let request = self
            .request(
                Method::PATCH,
                &format!("/admin/hospitals/{hospital_id}/profile"),
            )
            .json(profile);
        self.send_required("hospitals.profile", request).await
    }

    async fn set_domain(
        &self,
        hospital_id: Uuid,
        domain: &str,
    ) -> Result<Option<ActionReceipt>, ApiError> {
        let request = self
            .request(
                Method::PATCH,
                &format!("/admin/hospitals/{hospital_id}/domain"),
            )
            .json(&DomainBody { domain });
        self.send("hospitals.domain", request).await
    }

    async fn activate(&self, hospital_id: Uuid) -> Result<Option<ActionReceipt>, ApiError> {
        let request = self.request(
            Method::PATCH,
            &format!("/admin/hospitals/{hospital_id}/activate"),
        );
        self.send("hospitals.activate", request).await
    }

    async fn set_schedule(
        &self,
        hospital_id: Uuid,
        body: &ScheduleRequest,
    ) -> Result<ScheduleSummary, ApiError> {
        let request = self
            .request(
                Method::POST,
                &format!("/admin/hospitals/{hospital_id}/schedule"),
            )
            .json(body);
        self.send_required("schedule.set", request).await
    }

    async fn list_content(
        &self,
        hospital_id: Uuid,
        query: &ContentQuery,
    ) -> Result<Vec<ContentItem>, ApiError> {
        let request = self
            .request(
                Method::GET,
                &format!("/admin/hospitals/{hospital_id}/content"),
            )
            .query(&query.to_pairs());
        Ok(self.send("content.list", request).await?.unwrap_or_default())
    }

    async fn get_content(
        &self,
        hospital_id: Uuid,
        content_id: Uuid,
    ) -> Result<ContentItem, ApiError> {
        let request = self.request(
            Method::GET,
            &format!("/admin/hospitals/{hospital_id}/content/{content_id}"),
        );
        self.send_required("content.get", request).await
    }

    async fn publish(
        &self,
        hospital_id: Uuid,
        item: Actionable<'_>,
        published_by: &str,
    ) -> Result<Option<ActionReceipt>, ApiError> {
        let content_id = item.id();
        tracing::info!(%hospital_id, %content_id, published_by, "Publishing content");
        let request = self
            .request(
                Method::POST,
                &format!("/admin/hospitals/{hospital_id}/content/{content_id}/publish"),
            )
            .json(&PublishBody { published_by });
        self.send("content.publish", request).await
    }

    async fn reject(
        &self,
        hospital_id: Uuid,
        item: Actionable<'_>,
    ) -> Result<Option<ActionReceipt>, ApiError> {
        let content_id = item.id();
        tracing::info!(%hospital_id, %content_id, "Rejecting content");
        let request = self.request(
            Method::POST,
            &format!("/admin/hospitals/{hospital_id}/content/{content_id}/reject"),
        );
        self.send("content.reject", request).await
    }

    async fn list_reports(&self, hospital_id: Uuid) -> Result<Vec<Report>, ApiError> {
        let request = self.request(
            Method::GET,
            &format!("/admin/hospitals/{hospital_id}/reports"),
        );
        Ok(self.send("reports.list", request).await?.unwrap_or_default())
    }

    async fn get_report(&self, hospital_id: Uuid, report_id: Uuid) -> Result<Report, ApiError> {
        let request = self.request(
            Method::GET,
            &format!("/admin/hospitals/{hospital_id}/reports/{report_id}"),
        );
        self.send_required("reports.get", request).await
    }
}

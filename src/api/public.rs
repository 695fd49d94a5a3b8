//! Public API client with revalidating caches
//!
//! Successful reads are kept for a fixed TTL (hospital 1 h, contents 30 min
//! by default) and refetched after expiry. Failures are never cached, so the
//! next request after a backend hiccup goes back to the network.

use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::error::ApiError;
use super::join_url;
use crate::config::{ApiConfig, SiteConfig};
use crate::metrics;
use crate::models::{PublicContent, PublicHospital};

/// Read-only client for `/public/hospitals/...`
#[derive(Clone)]
pub struct PublicClient {
    base_url: String,
    http_client: Client,
    hospitals: Cache<String, PublicHospital>,
    contents: Cache<String, Vec<PublicContent>>,
    content: Cache<(String, Uuid), PublicContent>,
}

impl PublicClient {
    /// Create a client with the configured base URL and cache TTLs
    pub fn new(api: &ApiConfig, site: &SiteConfig) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(format!("reputation-site/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Init(e.to_string()))?;

        Ok(Self {
            base_url: api.public_base_url.clone(),
            http_client,
            hospitals: Cache::builder()
                .max_capacity(site.cache_capacity)
                .time_to_live(site.hospital_ttl())
                .build(),
            contents: Cache::builder()
                .max_capacity(site.cache_capacity)
                .time_to_live(site.content_ttl())
                .build(),
            content: Cache::builder()
                .max_capacity(site.cache_capacity)
                .time_to_live(site.content_ttl())
                .build(),
        })
    }

    /// Hospital by slug. Any non-2xx answer means the page does not exist.
    pub async fn fetch_hospital(&self, slug: &str) -> Result<PublicHospital, ApiError> {
        if let Some(hit) = self.hospitals.get(slug).await {
            metrics::record_cache_lookup("hospital", true);
            return Ok(hit);
        }
        metrics::record_cache_lookup("hospital", false);

        let hospital: PublicHospital = self
            .get_json("hospital", &format!("/hospitals/{slug}"))
            .await
            .map_err(|e| not_found_unless_network(e, format!("Hospital not found: {slug}")))?;

        self.hospitals.insert(slug.to_string(), hospital.clone()).await;
        Ok(hospital)
    }

    /// Published contents, newest first. A failed listing degrades to empty.
    pub async fn fetch_contents(&self, slug: &str) -> Vec<PublicContent> {
        if let Some(hit) = self.contents.get(slug).await {
            metrics::record_cache_lookup("contents", true);
            return hit;
        }
        metrics::record_cache_lookup("contents", false);

        match self
            .get_json::<Vec<PublicContent>>("contents", &format!("/hospitals/{slug}/contents"))
            .await
        {
            Ok(contents) => {
                self.contents.insert(slug.to_string(), contents.clone()).await;
                contents
            }
            Err(e) => {
                tracing::warn!(slug, error = %e, "Content listing failed, rendering empty list");
                Vec::new()
            }
        }
    }

    /// One published content item
    pub async fn fetch_content(
        &self,
        slug: &str,
        content_id: Uuid,
    ) -> Result<PublicContent, ApiError> {
        let key = (slug.to_string(), content_id);
        if let Some(hit) = self.content.get(&key).await {
            metrics::record_cache_lookup("content", true);
            return Ok(hit);
        }
        metrics::record_cache_lookup("content", false);

        let content: PublicContent = self
            .get_json("content", &format!("/hospitals/{slug}/contents/{content_id}"))
            .await
            .map_err(|e| not_found_unless_network(e, format!("Content not found: {content_id}")))?;

        self.content.insert(key, content.clone()).await;
        Ok(content)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        let result = self
            .http_client
            .get(join_url(&self.base_url, path))
            .send()
            .await;
        let elapsed = started.elapsed().as_secs_f64();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                metrics::record_api_request("public", endpoint, 0, elapsed);
                return Err(ApiError::from(e));
            }
        };

        let status = response.status();
        metrics::record_api_request("public", endpoint, status.as_u16(), elapsed);

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http(status.as_u16(), body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(format!("{endpoint}: {e}")))
    }
}

// Non-2xx answers collapse into "not found"; transport failures keep their
// kind so they are logged as outages.
fn not_found_unless_network(err: ApiError, what: String) -> ApiError {
    match err {
        ApiError::Http { .. } | ApiError::NotFound(_) => ApiError::NotFound(what),
        other => other,
    }
}

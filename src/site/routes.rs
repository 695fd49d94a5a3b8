//! Microsite routes and handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pages::{ContentPage, ContentsPage, HomePage, LandingPage, NotFoundPage};
use super::seo;
use super::server::SiteState;
use super::templates::Template;
use crate::api::ApiError;
use crate::error::ReputationErrorTrait;
use crate::metrics;
use crate::models::ContentType;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentsParams {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

// ============================================================================
// Routes
// ============================================================================

/// Create the microsite router
pub fn create_router(state: SiteState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_text))
        .route("/robots.txt", get(robots))
        .route("/sitemap.xml", get(sitemap_index))
        .route("/{slug}", get(landing))
        .route("/{slug}/sitemap.xml", get(hospital_sitemap))
        .route("/{slug}/contents", get(contents))
        .route("/{slug}/contents/{content_id}", get(content_detail))
        .fallback(fallback)
        .with_state(state)
}

// ============================================================================
// Pages
// ============================================================================

async fn home(State(state): State<SiteState>) -> Response {
    let _timer = metrics::start_render_timer("home");
    render(&state, "home", Template::Home, &HomePage::new())
}

async fn landing(State(state): State<SiteState>, Path(slug): Path<String>) -> Response {
    let _timer = metrics::start_render_timer("landing");

    let (hospital, contents) = tokio::join!(
        state.client.fetch_hospital(&slug),
        state.client.fetch_contents(&slug)
    );
    let hospital = match hospital {
        Ok(hospital) => hospital,
        Err(e) => return not_found(&state, "landing", Some(&e)),
    };

    let page = LandingPage::build(state.site.origin(), &hospital, &contents);
    render(&state, "landing", Template::Landing, &page)
}

async fn contents(
    State(state): State<SiteState>,
    Path(slug): Path<String>,
    Query(params): Query<ContentsParams>,
) -> Response {
    let _timer = metrics::start_render_timer("contents");

    let (hospital, contents) = tokio::join!(
        state.client.fetch_hospital(&slug),
        state.client.fetch_contents(&slug)
    );
    let hospital = match hospital {
        Ok(hospital) => hospital,
        Err(e) => return not_found(&state, "contents", Some(&e)),
    };

    // Unknown or `ALL` filters show everything
    let filter = params.content_type.as_deref().and_then(ContentType::parse);
    let page = ContentsPage::build(state.site.origin(), &hospital, &contents, filter);
    render(&state, "contents", Template::Contents, &page)
}

async fn content_detail(
    State(state): State<SiteState>,
    Path((slug, content_id)): Path<(String, String)>,
) -> Response {
    let _timer = metrics::start_render_timer("content");

    let Ok(content_id) = Uuid::parse_str(&content_id) else {
        return not_found(&state, "content", None);
    };

    let (hospital, content, all) = tokio::join!(
        state.client.fetch_hospital(&slug),
        state.client.fetch_content(&slug, content_id),
        state.client.fetch_contents(&slug)
    );
    let (hospital, content) = match (hospital, content) {
        (Ok(hospital), Ok(content)) => (hospital, content),
        (Err(e), _) | (_, Err(e)) => return not_found(&state, "content", Some(&e)),
    };

    let page = ContentPage::build(state.site.origin(), &hospital, &content, &all);
    render(&state, "content", Template::Content, &page)
}

async fn fallback(State(state): State<SiteState>) -> Response {
    not_found(&state, "fallback", None)
}

// ============================================================================
// Crawler Endpoints
// ============================================================================

async fn robots(State(state): State<SiteState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        seo::robots_txt(state.site.origin()),
    )
        .into_response()
}

async fn sitemap_index(State(state): State<SiteState>) -> Response {
    xml(seo::sitemap_index(state.site.origin(), &state.site.sitemap_slugs))
}

async fn hospital_sitemap(State(state): State<SiteState>, Path(slug): Path<String>) -> Response {
    if let Err(e) = state.client.fetch_hospital(&slug).await {
        return not_found(&state, "sitemap", Some(&e));
    }
    let contents = state.client.fetch_contents(&slug).await;
    xml(seo::hospital_sitemap(state.site.origin(), &slug, &contents))
}

// ============================================================================
// Operational Endpoints
// ============================================================================

async fn health_check(State(state): State<SiteState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn metrics_text() -> Response {
    match metrics::encode_metrics() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics unavailable").into_response()
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn render<T: Serialize>(state: &SiteState, route: &str, template: Template, data: &T) -> Response {
    render_with_status(state, route, template, data, StatusCode::OK)
}

fn render_with_status<T: Serialize>(
    state: &SiteState,
    route: &str,
    template: Template,
    data: &T,
    status: StatusCode,
) -> Response {
    match state.templates.render(template, data) {
        Ok(html) => {
            metrics::record_page_render(route, status.as_u16());
            (status, Html(html)).into_response()
        }
        Err(e) => {
            tracing::error!(
                route,
                template = template.name(),
                category = ?e.category(),
                error = %e,
                "Template render failed"
            );
            metrics::record_page_render(route, 500);
            (StatusCode::INTERNAL_SERVER_ERROR, "render error").into_response()
        }
    }
}

fn not_found(state: &SiteState, route: &str, cause: Option<&ApiError>) -> Response {
    match cause {
        Some(e @ ApiError::Network(_)) => {
            tracing::warn!(route, error = %e, "Backend unreachable, rendering not found");
        }
        Some(e) => tracing::debug!(route, error = %e, "Rendering not found"),
        None => tracing::debug!(route, "Rendering not found"),
    }
    render_with_status(
        state,
        route,
        Template::NotFound,
        &NotFoundPage::new(),
        StatusCode::NOT_FOUND,
    )
}

fn xml(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], body).into_response()
}

//! Content board: the monthly slot list with publish and reject
//!
//! Only a generated DRAFT shows controls. Reject asks for confirmation,
//! publish does not. A successful transition reloads the whole list and
//! closes the detail view; a failed one leaves everything as it was and
//! hands back the alert text.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use super::confirm::Confirmer;
use super::phase::Phase;
use crate::api::{ActionReceipt, AdminApi, ApiError};
use crate::i18n::t;
use crate::models::{ContentAction, ContentItem, ContentQuery, Lifecycle};

/// One rendered row of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRow {
    pub id: Uuid,
    pub scheduled_date: String,
    pub type_label: &'static str,
    /// `None` for an ungenerated slot
    pub title: Option<String>,
    pub position: String,
    pub status_label: &'static str,
    /// Controls shown for this row
    pub actions: &'static [ContentAction],
    /// False while a transition request is in flight
    pub enabled: bool,
}

/// Result of a publish or reject request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Backend accepted; the list was reloaded
    Done(Option<ActionReceipt>),
    /// Operator declined the confirmation
    Cancelled,
    /// The item has no such control (not a generated draft, or unknown id)
    Unavailable,
    /// Backend refused or the request failed; show this alert
    Failed(String),
}

/// View-model of the content page for one hospital
pub struct ContentBoard<'a, A: AdminApi + ?Sized> {
    api: &'a A,
    hospital_id: Uuid,
    query: ContentQuery,
    published_by: String,
    items: Phase<Vec<ContentItem>>,
    selected: Option<ContentItem>,
    busy: AtomicBool,
}

/// Holds the in-flight flag for one transition request. Clearing happens on
/// drop, so an abandoned request future releases the controls too.
struct InFlight<'f>(&'f AtomicBool);

impl<'f> InFlight<'f> {
    fn set(flag: &'f AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<'a, A: AdminApi + ?Sized> ContentBoard<'a, A> {
    pub fn new(api: &'a A, hospital_id: Uuid, published_by: impl Into<String>) -> Self {
        Self {
            api,
            hospital_id,
            query: ContentQuery::default(),
            published_by: published_by.into(),
            items: Phase::Loading,
            selected: None,
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_query(mut self, query: ContentQuery) -> Self {
        self.query = query;
        self
    }

    /// Fetch the list and replace whatever was shown
    pub async fn load(&mut self) {
        self.items = Phase::Loading;
        let result = self.api.list_content(self.hospital_id, &self.query).await;
        if let Err(e) = &result {
            tracing::warn!(hospital_id = %self.hospital_id, error = %e, "Content list failed");
        }
        self.items = Phase::from_result(result);
    }

    pub fn items(&self) -> &Phase<Vec<ContentItem>> {
        &self.items
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn selected(&self) -> Option<&ContentItem> {
        self.selected.as_ref()
    }

    pub fn rows(&self) -> Vec<ContentRow> {
        let Some(items) = self.items.data() else {
            return Vec::new();
        };
        let enabled = !self.is_busy();

        items
            .iter()
            .map(|item| {
                let lifecycle = item.lifecycle();
                ContentRow {
                    id: item.id,
                    scheduled_date: item.scheduled_date.format("%Y-%m-%d").to_string(),
                    type_label: item.content_type.label(),
                    title: item.title().map(String::from),
                    position: item.position(),
                    status_label: item.status.label(),
                    actions: lifecycle.actions(),
                    enabled,
                }
            })
            .collect()
    }

    /// Open the detail view. Falls back to the list row when the detail
    /// request fails.
    pub async fn open_detail(&mut self, content_id: Uuid) -> Option<&ContentItem> {
        let row = self.find(content_id).cloned();

        self.selected = match self.api.get_content(self.hospital_id, content_id).await {
            Ok(full) => Some(full),
            Err(e) => {
                tracing::debug!(%content_id, error = %e, "Content detail failed, using list row");
                row
            }
        };
        self.selected.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Publish a generated draft. No confirmation.
    pub async fn publish(&mut self, content_id: Uuid) -> ActionOutcome {
        self.transition(content_id, ContentAction::Publish, None).await
    }

    /// Reject a generated draft after the operator confirms
    pub async fn reject(
        &mut self,
        content_id: Uuid,
        confirmer: &mut dyn Confirmer,
    ) -> ActionOutcome {
        self.transition(content_id, ContentAction::Reject, Some(confirmer))
            .await
    }

    async fn transition(
        &mut self,
        content_id: Uuid,
        action: ContentAction,
        confirmer: Option<&mut dyn Confirmer>,
    ) -> ActionOutcome {
        let Some(item) = self.find(content_id).cloned() else {
            return ActionOutcome::Unavailable;
        };
        let Some(actionable) = item.actionable() else {
            return ActionOutcome::Unavailable;
        };

        if action.requires_confirmation() {
            let confirmed = match confirmer {
                Some(confirmer) => confirmer.confirm(&t!("console.content.reject_confirm")),
                None => false,
            };
            if !confirmed {
                return ActionOutcome::Cancelled;
            }
        }

        let result: Result<Option<ActionReceipt>, ApiError> = {
            let _in_flight = InFlight::set(&self.busy);
            match action {
                ContentAction::Publish => {
                    self.api
                        .publish(self.hospital_id, actionable, &self.published_by)
                        .await
                }
                ContentAction::Reject => self.api.reject(self.hospital_id, actionable).await,
            }
        };

        match result {
            Ok(receipt) => {
                tracing::info!(%content_id, ?action, "Content transition accepted");
                self.load().await;
                self.selected = None;
                ActionOutcome::Done(receipt)
            }
            Err(e) => {
                let fallback = match action {
                    ContentAction::Publish => t!("console.content.publish_failed"),
                    ContentAction::Reject => t!("console.content.reject_failed"),
                };
                tracing::warn!(%content_id, ?action, error = %e, "Content transition failed");
                ActionOutcome::Failed(e.alert_message(&fallback))
            }
        }
    }

    // The selected detail counts too, so a transition can be started from it
    fn find(&self, content_id: Uuid) -> Option<&ContentItem> {
        self.items
            .data()
            .and_then(|items| items.iter().find(|i| i.id == content_id))
            .or_else(|| self.selected.as_ref().filter(|i| i.id == content_id))
    }

    /// Plain-text table of the board
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.items {
            Phase::Loading => out.push_str(&t!("console.common.loading")),
            Phase::Failed(message) => {
                let _ = write!(out, "{}: {message}", t!("console.common.error"));
            }
            Phase::Ready(items) if items.is_empty() => {
                out.push_str(&t!("console.content.empty"));
            }
            Phase::Ready(_) => {
                for row in self.rows() {
                    let title = row
                        .title
                        .clone()
                        .unwrap_or_else(|| Lifecycle::Ungenerated.label().to_string());
                    let actions = row
                        .actions
                        .iter()
                        .filter(|_| row.enabled)
                        .map(|a| format!("[{}]", a.label()))
                        .collect::<Vec<_>>()
                        .join(" ");
                    let _ = writeln!(
                        out,
                        "{}  {:<8}  {:>5}  {:<4}  {}  {}  {}",
                        row.scheduled_date,
                        row.type_label,
                        row.position,
                        row.status_label,
                        row.id,
                        title,
                        actions
                    );
                }
            }
        }
        out
    }
}

/// Plain-text detail view of one item
pub fn render_detail(item: &ContentItem) -> String {
    let mut out = String::new();
    let title = item.title().unwrap_or(Lifecycle::Ungenerated.label());
    let _ = writeln!(out, "[{}] {title}", item.content_type.label());
    let _ = writeln!(
        out,
        "{} {} · {} · {}",
        item.scheduled_date.format("%Y-%m-%d"),
        item.position(),
        item.lifecycle().label(),
        item.id
    );
    if let Some(image) = item.image_url.as_deref() {
        let _ = writeln!(out, "{image}");
    }
    if let Some(meta) = item.meta_description.as_deref() {
        let _ = writeln!(out, "{meta}");
    }
    if let Some(body) = item.body.as_deref() {
        let _ = writeln!(out);
        out.push_str(body);
        out.push('\n');
    }
    out
}

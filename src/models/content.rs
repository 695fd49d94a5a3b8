//! Scheduled content items and their wire enums

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lifecycle::{Actionable, Lifecycle};

/// Kind of article a slot produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Faq,
    Disease,
    Treatment,
    Column,
    Health,
    Local,
    Notice,
}

impl ContentType {
    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Faq => "FAQ",
            Self::Disease => "질환 가이드",
            Self::Treatment => "시술 안내",
            Self::Column => "원장 칼럼",
            Self::Health => "건강 정보",
            Self::Local => "지역 특화",
            Self::Notice => "공지",
        }
    }

    /// Wire code, also used as the `?type=` filter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faq => "FAQ",
            Self::Disease => "DISEASE",
            Self::Treatment => "TREATMENT",
            Self::Column => "COLUMN",
            Self::Health => "HEALTH",
            Self::Local => "LOCAL",
            Self::Notice => "NOTICE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// All types in display order
    pub fn all() -> [Self; 7] {
        [
            Self::Faq,
            Self::Disease,
            Self::Treatment,
            Self::Column,
            Self::Health,
            Self::Local,
            Self::Notice,
        ]
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Wire status of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    Draft,
    Ready,
    Published,
    Rejected,
}

impl ContentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "초안",
            Self::Ready => "대기",
            Self::Published => "발행",
            Self::Rejected => "반려",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Ready => "READY",
            Self::Published => "PUBLISHED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        [Self::Draft, Self::Ready, Self::Published, Self::Rejected]
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One scheduled slot of a hospital's monthly plan
///
/// The list endpoint omits `body` and `image_prompt`; the detail endpoint
/// fills them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub content_type: ContentType,
    pub sequence_no: u32,
    pub total_count: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub scheduled_date: NaiveDate,
    pub status: ContentStatus,
    #[serde(default)]
    pub generated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub published_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub published_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
}

impl ContentItem {
    /// Title, treating blank as not generated
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::of(self.status, self.title.as_deref())
    }

    /// Handle for publish/reject, present only for a generated draft
    pub fn actionable(&self) -> Option<Actionable<'_>> {
        Actionable::new(self)
    }

    /// Slot position, e.g. `3/16`
    pub fn position(&self) -> String {
        format!("{}/{}", self.sequence_no, self.total_count)
    }
}

/// Filters for the content list endpoint. The backend defaults year and
/// month to the current month in Asia/Seoul.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContentStatus>,
}

impl ContentQuery {
    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            status: None,
        }
    }

    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Query pairs for the request URL
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(month) = self.month {
            pairs.push(("month", month.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}

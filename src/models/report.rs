//! Diagnostic and monthly reports

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    /// Initial diagnosis produced once the profile is complete
    #[serde(rename = "V0")]
    V0,
    #[serde(rename = "MONTHLY")]
    Monthly,
}

impl ReportType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::V0 => "V0 진단",
            Self::Monthly => "월간 리포트",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Report row. The list endpoint leaves both summaries null; the detail
/// endpoint fills them once generation is done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub period_year: i32,
    pub period_month: u32,
    pub report_type: ReportType,
    #[serde(default)]
    pub pdf_path: Option<String>,
    #[serde(default)]
    pub sov_summary: Option<Map<String, Value>>,
    #[serde(default)]
    pub content_summary: Option<Map<String, Value>>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub sent_at: Option<DateTime<FixedOffset>>,
}

impl Report {
    /// `2024년 3월`
    pub fn period_label(&self) -> String {
        format!("{}년 {}월", self.period_year, self.period_month)
    }

    /// PDF link, `None` while generation is still running
    pub fn pdf(&self) -> Option<&str> {
        self.pdf_path.as_deref().filter(|p| !p.is_empty())
    }

    pub fn is_generating(&self) -> bool {
        self.pdf().is_none()
    }

    /// Creation date as `ko-KR` prints it, `-` when unknown
    pub fn created_label(&self) -> String {
        self.created_at
            .as_ref()
            .map(super::format_ko_timestamp)
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Render an opaque summary map as display pairs, strings unquoted
pub fn summary_pairs(summary: &Map<String, Value>) -> Vec<(String, String)> {
    summary
        .iter()
        .map(|(key, value)| {
            let shown = match value {
                Value::String(s) => s.clone(),
                Value::Null => "null".to_string(),
                other => other.to_string(),
            };
            (key.clone(), shown)
        })
        .collect()
}

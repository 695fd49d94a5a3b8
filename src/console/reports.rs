//! Report list and detail
//!
//! Read-only. A report without a PDF is still being generated; there is no
//! polling, the operator reloads.

use std::fmt::Write as _;
use uuid::Uuid;

use super::phase::Phase;
use crate::api::AdminApi;
use crate::i18n::t;
use crate::models::report::summary_pairs;
use crate::models::Report;

/// One rendered row of the report list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub id: Uuid,
    pub type_label: &'static str,
    pub period: String,
    pub created: String,
    /// PDF link, or `None` while generating
    pub pdf: Option<String>,
}

impl From<&Report> for ReportRow {
    fn from(r: &Report) -> Self {
        Self {
            id: r.id,
            type_label: r.report_type.label(),
            period: r.period_label(),
            created: r.created_label(),
            pdf: r.pdf().map(String::from),
        }
    }
}

pub struct ReportBoard<'a, A: AdminApi + ?Sized> {
    api: &'a A,
    hospital_id: Uuid,
    reports: Phase<Vec<Report>>,
    selected: Option<Report>,
}

impl<'a, A: AdminApi + ?Sized> ReportBoard<'a, A> {
    pub fn new(api: &'a A, hospital_id: Uuid) -> Self {
        Self {
            api,
            hospital_id,
            reports: Phase::Loading,
            selected: None,
        }
    }

    pub async fn load(&mut self) {
        self.reports = Phase::Loading;
        self.reports = Phase::from_result(self.api.list_reports(self.hospital_id).await);
    }

    pub fn reports(&self) -> &Phase<Vec<Report>> {
        &self.reports
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        self.reports
            .data()
            .map(|list| list.iter().map(ReportRow::from).collect())
            .unwrap_or_default()
    }

    /// Fetch the full report, falling back to the list row on failure
    pub async fn open_detail(&mut self, report_id: Uuid) -> Option<&Report> {
        let row = self
            .reports
            .data()
            .and_then(|list| list.iter().find(|r| r.id == report_id))
            .cloned();

        self.selected = match self.api.get_report(self.hospital_id, report_id).await {
            Ok(full) => Some(full),
            Err(e) => {
                tracing::debug!(%report_id, error = %e, "Report detail failed, using list row");
                row
            }
        };
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Report> {
        self.selected.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.reports {
            Phase::Loading => out.push_str(&t!("console.common.loading")),
            Phase::Failed(message) => {
                let _ = write!(out, "{}: {message}", t!("console.common.error"));
            }
            Phase::Ready(list) if list.is_empty() => {
                out.push_str(&t!("console.reports.empty"));
            }
            Phase::Ready(_) => {
                for row in self.rows() {
                    let pdf = row
                        .pdf
                        .unwrap_or_else(|| t!("console.reports.generating").to_string());
                    let _ = writeln!(
                        out,
                        "{}  {}  {}  {}  {}",
                        row.id, row.type_label, row.period, row.created, pdf
                    );
                }
            }
        }
        out
    }
}

/// Plain-text detail of one report
pub fn render_detail(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} - {}",
        report.report_type.label(),
        report.period_label()
    );

    if let Some(sov) = &report.sov_summary {
        let _ = writeln!(out, "\n{}", t!("console.reports.sov_summary"));
        for (key, value) in summary_pairs(sov) {
            let _ = writeln!(out, "  {key}: {value}");
        }
    }
    if let Some(content) = &report.content_summary {
        let _ = writeln!(out, "\n{}", t!("console.reports.content_summary"));
        for (key, value) in summary_pairs(content) {
            let _ = writeln!(out, "  {key}: {value}");
        }
    }

    if let Some(pdf) = report.pdf() {
        let _ = writeln!(out, "\n{}: {pdf}", t!("console.reports.pdf"));
    }
    out
}

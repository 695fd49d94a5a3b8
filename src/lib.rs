//! reputation - Re:putation admin console and AEO microsite
//!
//! A typed client for the hospital content API, an operator console that
//! drives it, and a public microsite server that renders hospital pages
//! with schema.org structured data for AI answer engines.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Hospitals, content items, reports and the content lifecycle
//! - [`api`] - Admin (authenticated) and public (cached) REST clients
//! - [`console`] - Admin console view-models: list, profile, content, schedule, reports
//! - [`site`] - Public microsite server, page rendering and SEO emission
//!
//! # Example
//!
//! ```no_run
//! use reputation::api::{AdminApi, AdminClient};
//! use reputation::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = AdminClient::new(&config.api)?;
//!     for hospital in client.list_hospitals().await? {
//!         println!("{} {}", hospital.name, hospital.status);
//!     }
//!     Ok(())
//! }
//! ```

// Initialize rust-i18n at crate root level
rust_i18n::i18n!("locales", fallback = "ko");

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod i18n;
pub mod metrics;
pub mod models;
pub mod site;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{AdminApi, AdminClient, ApiError, PublicClient};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, ReputationErrorTrait, Result};
    pub use crate::models::{
        ContentItem, ContentStatus, ContentType, Hospital, HospitalStatus, HospitalSummary,
        Lifecycle, Plan, Report, ReportType, Weekday,
    };
}

// Direct re-exports for convenience
pub use models::{ContentItem, Hospital, Lifecycle, Plan, Report};

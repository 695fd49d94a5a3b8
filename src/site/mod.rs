//! Public hospital microsite
//!
//! Server-rendered pages over the public API:
//!
//! - `/` service landing
//! - `/{slug}` hospital landing with `MedicalClinic` JSON-LD
//! - `/{slug}/contents?type=` content listing with type tabs
//! - `/{slug}/contents/{id}` article with `Article` JSON-LD
//! - `/robots.txt`, `/sitemap.xml`, `/{slug}/sitemap.xml`
//! - `/health`, `/metrics`
//!
//! Any failed hospital or content fetch renders the 404 page.

pub mod markdown;
pub mod pages;
pub mod routes;
pub mod seo;
pub mod server;
pub mod templates;

pub use markdown::render_markdown;
pub use routes::create_router;
pub use server::{ServerError, SiteServer, SiteState};
pub use templates::{SiteTemplates, Template};

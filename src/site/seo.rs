//! Structured data, robots policy and sitemaps
//!
//! JSON-LD follows schema.org: a `MedicalClinic` for the hospital landing
//! page and an `Article` authored by the director's `Physician` for each
//! content page.

use serde_json::{json, Value};
use std::fmt::Write as _;

use crate::models::{PublicContent, PublicHospital};

/// Crawlers explicitly invited in, in addition to the wildcard group
pub const AI_CRAWLERS: [&str; 7] = [
    "GPTBot",
    "PerplexityBot",
    "ClaudeBot",
    "anthropic-ai",
    "Google-Extended",
    "Bingbot",
    "Googlebot",
];

/// `MedicalClinic` for a hospital landing page
pub fn clinic_json_ld(hospital: &PublicHospital) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "MedicalClinic",
        "name": hospital.name,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": hospital.address,
        },
        "telephone": hospital.phone,
        "medicalSpecialty": hospital.specialties,
        "physician": {
            "@type": "Physician",
            "name": hospital.director_name,
        },
    })
}

/// `Article` for a content page
pub fn article_json_ld(hospital: &PublicHospital, content: &PublicContent) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": content.title,
        "author": {
            "@type": "Physician",
            "name": hospital.director_name,
        },
        "publisher": {
            "@type": "MedicalClinic",
            "name": hospital.name,
        },
        "datePublished": content.date_published(),
        "image": content.image_url,
    })
}

/// Serialize JSON-LD for an inline `<script>` element.
///
/// `<`, `>` and `&` are written as unicode escapes so no value can close the
/// script element early.
pub fn script_json(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// `robots.txt`: allow everything, name the AI crawlers, point at the index
pub fn robots_txt(origin: &str) -> String {
    let mut out = String::from("User-Agent: *\nAllow: /\n\n");
    for agent in AI_CRAWLERS {
        let _ = writeln!(out, "User-Agent: {agent}");
    }
    let _ = writeln!(out, "Allow: /\n");
    let _ = writeln!(out, "Sitemap: {origin}/sitemap.xml");
    out
}

/// Sitemap of one hospital: landing page, listing and every published item
pub fn hospital_sitemap(origin: &str, slug: &str, contents: &[PublicContent]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    push_url(&mut out, &format!("{origin}/{slug}"), None);
    push_url(&mut out, &format!("{origin}/{slug}/contents"), None);
    for content in contents {
        let loc = format!("{origin}/{slug}/contents/{}", content.id);
        push_url(&mut out, &loc, Some(&lastmod(content)));
    }

    out.push_str("</urlset>\n");
    out
}

/// Sitemap index over the per-hospital sitemaps
pub fn sitemap_index(origin: &str, slugs: &[String]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for slug in slugs {
        let loc = format!("{origin}/{}/sitemap.xml", slug.trim());
        let _ = writeln!(
            out,
            "  <sitemap><loc>{}</loc></sitemap>",
            html_escape::encode_text(&loc)
        );
    }
    out.push_str("</sitemapindex>\n");
    out
}

fn push_url(out: &mut String, loc: &str, lastmod: Option<&str>) {
    let loc = html_escape::encode_text(loc);
    match lastmod {
        Some(date) => {
            let _ = writeln!(out, "  <url><loc>{loc}</loc><lastmod>{date}</lastmod></url>");
        }
        None => {
            let _ = writeln!(out, "  <url><loc>{loc}</loc></url>");
        }
    }
}

fn lastmod(content: &PublicContent) -> String {
    match &content.published_at {
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => content.scheduled_date.format("%Y-%m-%d").to_string(),
    }
}

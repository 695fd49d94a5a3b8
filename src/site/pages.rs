//! Page view data
//!
//! Each page is a plain serializable struct handed to its template. All
//! formatting (labels, dates, tagline, markdown) happens here so the
//! templates stay free of logic.

use chrono::{Datelike, FixedOffset, Utc};
use serde::Serialize;

use super::markdown::render_markdown;
use super::seo;
use crate::models::{ContentType, PublicContent, PublicHospital, Treatment, KST_OFFSET_SECS};

/// Number of recent items on the landing page
pub const RECENT_LIMIT: usize = 3;
/// Number of related items in the article sidebar
pub const RELATED_LIMIT: usize = 3;

/// Fallback title for pages without a hospital
pub const SITE_TITLE: &str = "AEO 의료정보";

/// `<head>` data shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
    pub canonical: Option<String>,
    /// Pre-escaped JSON-LD for an inline script
    pub json_ld: Option<String>,
}

impl PageMeta {
    fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            canonical: None,
            json_ld: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentCard {
    pub href: String,
    pub title: String,
    pub type_label: &'static str,
    pub image_url: Option<String>,
    pub date: String,
}

impl ContentCard {
    fn new(slug: &str, content: &PublicContent) -> Self {
        Self {
            href: format!("/{slug}/contents/{}", content.id),
            title: content.title.clone(),
            type_label: content.content_type.label(),
            image_url: content.image_url.clone().filter(|u| !u.trim().is_empty()),
            date: content.display_date(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectorView {
    pub name: String,
    pub career: Option<String>,
    pub philosophy: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HoursLine {
    pub day: &'static str,
    pub hours: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub meta: PageMeta,
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            meta: PageMeta {
                description: Some("AI 검색 최적화 병원 의료정보 서비스".to_string()),
                ..PageMeta::titled("Re:putation")
            },
        }
    }
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

/// `/{slug}`
#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    pub meta: PageMeta,
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub director: Option<DirectorView>,
    pub treatments: Vec<Treatment>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Vec<HoursLine>,
    pub kakao_channel_url: Option<String>,
    pub recent: Vec<ContentCard>,
    pub contents_href: String,
    pub year: i32,
}

impl LandingPage {
    pub fn build(origin: &str, hospital: &PublicHospital, contents: &[PublicContent]) -> Self {
        let slug = hospital.slug.clone();
        let json_ld = seo::script_json(&seo::clinic_json_ld(hospital));

        Self {
            meta: PageMeta {
                title: format!("{} | {SITE_TITLE}", hospital.name),
                description: Some(format!(
                    "{}의 진료정보, 원장 소개, 의료 콘텐츠",
                    hospital.name
                )),
                canonical: Some(format!("{origin}/{slug}")),
                json_ld: Some(json_ld),
            },
            name: hospital.name.clone(),
            tagline: hospital.tagline(),
            director: hospital.director().map(|name| DirectorView {
                name: name.to_string(),
                career: non_blank(&hospital.director_career),
                philosophy: non_blank(&hospital.director_philosophy),
                photo_url: non_blank(&hospital.director_photo_url),
            }),
            treatments: hospital
                .treatments
                .iter()
                .filter(|t| !t.name.trim().is_empty())
                .cloned()
                .collect(),
            address: non_blank(&hospital.address),
            phone: non_blank(&hospital.phone),
            hours: hospital
                .business_hours
                .entries()
                .into_iter()
                .map(|(day, hours)| HoursLine {
                    day: day.korean_name(),
                    hours: hours.to_string(),
                })
                .collect(),
            kakao_channel_url: non_blank(&hospital.kakao_channel_url),
            recent: contents
                .iter()
                .take(RECENT_LIMIT)
                .map(|c| ContentCard::new(&slug, c))
                .collect(),
            contents_href: format!("/{slug}/contents"),
            year: current_year(),
            slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterTab {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// `/{slug}/contents?type=`
#[derive(Debug, Clone, Serialize)]
pub struct ContentsPage {
    pub meta: PageMeta,
    pub slug: String,
    pub name: String,
    pub home_href: String,
    pub tabs: Vec<FilterTab>,
    pub cards: Vec<ContentCard>,
}

impl ContentsPage {
    /// `filter` of `None` shows every type
    pub fn build(
        origin: &str,
        hospital: &PublicHospital,
        contents: &[PublicContent],
        filter: Option<ContentType>,
    ) -> Self {
        let slug = hospital.slug.clone();
        let base = format!("/{slug}/contents");

        let mut tabs = vec![FilterTab {
            label: "전체",
            href: base.clone(),
            active: filter.is_none(),
        }];
        tabs.extend(ContentType::all().into_iter().map(|t| FilterTab {
            label: t.label(),
            href: format!("{base}?type={}", t.as_str()),
            active: filter == Some(t),
        }));

        let cards = contents
            .iter()
            .filter(|c| filter.map_or(true, |t| c.content_type == t))
            .map(|c| ContentCard::new(&slug, c))
            .collect();

        Self {
            meta: PageMeta {
                description: Some(format!("{}의 의료 정보 콘텐츠", hospital.name)),
                canonical: Some(format!("{origin}{base}")),
                ..PageMeta::titled(format!("{} 의료 정보 | {SITE_TITLE}", hospital.name))
            },
            name: hospital.name.clone(),
            home_href: format!("/{slug}"),
            tabs,
            cards,
            slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SidebarView {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub home_href: String,
}

/// `/{slug}/contents/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct ContentPage {
    pub meta: PageMeta,
    pub back_href: String,
    pub type_label: &'static str,
    pub title: String,
    pub director: Option<String>,
    pub date: String,
    pub image_url: Option<String>,
    pub body_html: String,
    pub hospital: SidebarView,
    pub related: Vec<ContentCard>,
}

impl ContentPage {
    pub fn build(
        origin: &str,
        hospital: &PublicHospital,
        content: &PublicContent,
        all: &[PublicContent],
    ) -> Self {
        let slug = &hospital.slug;
        let json_ld = seo::script_json(&seo::article_json_ld(hospital, content));

        Self {
            meta: PageMeta {
                title: format!("{} | {}", content.title, hospital.name),
                description: Some(
                    content
                        .meta_description
                        .clone()
                        .filter(|d| !d.trim().is_empty())
                        .unwrap_or_else(|| {
                            format!(
                                "{}의 {} 콘텐츠",
                                hospital.name,
                                content.content_type.label()
                            )
                        }),
                ),
                canonical: Some(format!("{origin}/{slug}/contents/{}", content.id)),
                json_ld: Some(json_ld),
            },
            back_href: format!("/{slug}/contents"),
            type_label: content.content_type.label(),
            title: content.title.clone(),
            director: hospital.director().map(String::from),
            date: content.display_date(),
            image_url: content.image_url.clone().filter(|u| !u.trim().is_empty()),
            body_html: content
                .body
                .as_deref()
                .map(render_markdown)
                .unwrap_or_default(),
            hospital: SidebarView {
                name: hospital.name.clone(),
                address: non_blank(&hospital.address),
                phone: non_blank(&hospital.phone),
                home_href: format!("/{slug}"),
            },
            related: related(content, all)
                .into_iter()
                .map(|c| ContentCard::new(slug, c))
                .collect(),
        }
    }
}

/// Other items of the same type, in listing order
pub fn related<'a>(content: &PublicContent, all: &'a [PublicContent]) -> Vec<&'a PublicContent> {
    all.iter()
        .filter(|c| c.id != content.id && c.content_type == content.content_type)
        .take(RELATED_LIMIT)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundPage {
    pub meta: PageMeta,
}

impl NotFoundPage {
    pub fn new() -> Self {
        Self {
            meta: PageMeta::titled(SITE_TITLE),
        }
    }
}

impl Default for NotFoundPage {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

fn current_year() -> i32 {
    match FixedOffset::east_opt(KST_OFFSET_SECS) {
        Some(kst) => Utc::now().with_timezone(&kst).year(),
        None => Utc::now().year(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hospital() -> PublicHospital {
        serde_json::from_value(json!({
            "id": "7d1f0c8e-3c1a-4d36-9a57-2b0f5d1e6a11",
            "name": "장편한외과의원",
            "slug": "jangpyeonhan",
            "address": "서울 강남구 테헤란로 1",
            "phone": "02-1234-5678",
            "business_hours": {"mon": "09:00 ~ 18:00", "sat": " ", "sun": "휴진"},
            "region": ["서울", "강남구"],
            "specialties": ["하지정맥류", "탈장"],
            "director_name": "김원장",
            "director_philosophy": "",
            "treatments": [{"name": "하지정맥류", "description": null}]
        }))
        .unwrap()
    }

    fn content(id: u128, content_type: &str, published: Option<&str>) -> PublicContent {
        serde_json::from_value(json!({
            "id": uuid::Uuid::from_u128(id),
            "content_type": content_type,
            "title": format!("글 {id}"),
            "scheduled_date": "2024-03-05",
            "published_at": published,
            "body": "## 제목\n본문"
        }))
        .unwrap()
    }

    fn listing() -> Vec<PublicContent> {
        vec![
            content(1, "FAQ", Some("2024-03-08T01:00:00+00:00")),
            content(2, "DISEASE", None),
            content(3, "FAQ", None),
            content(4, "FAQ", None),
            content(5, "FAQ", None),
            content(6, "FAQ", None),
        ]
    }

    #[test]
    fn test_landing_page() {
        let page = LandingPage::build("https://a.kr", &hospital(), &listing());
        assert_eq!(page.meta.title, "장편한외과의원 | AEO 의료정보");
        assert_eq!(page.tagline, "서울 강남구 하지정맥류 · 탈장 전문 클리닉");
        assert_eq!(page.recent.len(), RECENT_LIMIT);
        assert_eq!(page.recent[0].date, "2024. 3. 8.");
        assert_eq!(page.recent[1].date, "2024. 3. 5.");

        let director = page.director.unwrap();
        assert_eq!(director.name, "김원장");
        assert!(director.philosophy.is_none());

        let days: Vec<_> = page.hours.iter().map(|h| h.day).collect();
        assert_eq!(days, vec!["월", "일"]);
        assert!(page.meta.json_ld.unwrap().contains("MedicalClinic"));
    }

    #[test]
    fn test_contents_filter() {
        let all = ContentsPage::build("https://a.kr", &hospital(), &listing(), None);
        assert_eq!(all.cards.len(), 6);
        assert_eq!(all.tabs.len(), 8);
        assert!(all.tabs[0].active);

        let disease = ContentsPage::build(
            "https://a.kr",
            &hospital(),
            &listing(),
            Some(ContentType::Disease),
        );
        assert_eq!(disease.cards.len(), 1);
        assert!(disease.tabs.iter().any(|t| t.active && t.label == "질환 가이드"));
        assert_eq!(disease.tabs[2].href, "/jangpyeonhan/contents?type=DISEASE");
    }

    #[test]
    fn test_related_same_type_excluding_self() {
        let all = listing();
        let related = related(&all[0], &all);
        let ids: Vec<_> = related.iter().map(|c| c.id.as_u128()).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn test_content_page() {
        let all = listing();
        let page = ContentPage::build("https://a.kr", &hospital(), &all[0], &all);
        assert_eq!(page.meta.title, "글 1 | 장편한외과의원");
        assert_eq!(page.meta.description.as_deref(), Some("장편한외과의원의 FAQ 콘텐츠"));
        assert!(page.body_html.contains("<h2>제목</h2>"));
        assert_eq!(page.related.len(), RELATED_LIMIT);
        assert_eq!(page.director.as_deref(), Some("김원장"));
    }
}

//! Reduced models served by the unauthenticated public API

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::content::ContentType;
use super::hospital::{BusinessHours, Treatment};
use super::{format_ko_date, format_ko_timestamp, null_as_default};

/// Hospital as the microsite sees it. Only ACTIVE hospitals are served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicHospital {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub business_hours: BusinessHours,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub blog_url: Option<String>,
    #[serde(default)]
    pub kakao_channel_url: Option<String>,
    #[serde(default)]
    pub aeo_domain: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialties: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub director_name: Option<String>,
    #[serde(default)]
    pub director_career: Option<String>,
    #[serde(default)]
    pub director_philosophy: Option<String>,
    #[serde(default)]
    pub director_photo_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub treatments: Vec<Treatment>,
}

impl PublicHospital {
    /// Hero tagline: `{regions} {specialties joined by ·} 전문 클리닉`
    pub fn tagline(&self) -> String {
        format!(
            "{} {} 전문 클리닉",
            self.region.join(" "),
            self.specialties.join(" · ")
        )
    }

    pub fn director(&self) -> Option<&str> {
        self.director_name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// A published content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicContent {
    pub id: Uuid,
    pub content_type: ContentType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub published_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl PublicContent {
    /// Date shown on cards: publish date, falling back to the scheduled date
    pub fn display_date(&self) -> String {
        match &self.published_at {
            Some(ts) => format_ko_timestamp(ts),
            None => format_ko_date(self.scheduled_date),
        }
    }

    /// `datePublished` for structured data
    pub fn date_published(&self) -> String {
        match &self.published_at {
            Some(ts) => ts.to_rfc3339(),
            None => self.scheduled_date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagline() {
        let hospital: PublicHospital = serde_json::from_str(
            r#"{
                "id": "7d1f0c8e-3c1a-4d36-9a57-2b0f5d1e6a11",
                "name": "장편한외과의원",
                "slug": "jangpyeonhan",
                "region": ["서울", "강남구"],
                "specialties": ["하지정맥류", "탈장"],
                "treatments": null
            }"#,
        )
        .unwrap();
        assert_eq!(hospital.tagline(), "서울 강남구 하지정맥류 · 탈장 전문 클리닉");
        assert!(hospital.treatments.is_empty());
        assert_eq!(hospital.director(), None);
    }

    #[test]
    fn test_dates_fall_back_to_schedule() {
        let mut content: PublicContent = serde_json::from_str(
            r#"{
                "id": "0b6f5b8e-8a54-4bb5-a2a4-5a0d2f8d9c01",
                "content_type": "FAQ",
                "title": "자주 묻는 질문",
                "scheduled_date": "2024-03-05",
                "published_at": null
            }"#,
        )
        .unwrap();
        assert_eq!(content.display_date(), "2024. 3. 5.");
        assert_eq!(content.date_published(), "2024-03-05");

        content.published_at =
            Some(DateTime::parse_from_rfc3339("2024-03-04T16:30:00+00:00").unwrap());
        assert_eq!(content.display_date(), "2024. 3. 5.");
        assert_eq!(content.date_published(), "2024-03-04T16:30:00+00:00");
    }
}

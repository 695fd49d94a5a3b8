//! Profile editor and domain section
//!
//! The editor accumulates changes locally and saves them in one PATCH. The
//! domain section is separate: set a domain, then activate it after the
//! operator confirms DNS is in place.

use std::fmt::Write as _;
use uuid::Uuid;

use super::confirm::Confirmer;
use super::tags::TagSet;
use super::ValidationError;
use crate::api::{AdminApi, ApiError};
use crate::error::Result;
use crate::i18n::t;
use crate::models::{Hospital, HospitalProfile, Treatment, Weekday};

/// CNAME target hospitals point their domain at
pub const CNAME_TARGET: &str = "aeo.motionlabs.io";

/// Free-text profile fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    DirectorName,
    DirectorCareer,
    DirectorPhilosophy,
    Address,
    Phone,
    WebsiteUrl,
    BlogUrl,
}

impl TextField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DirectorName => "원장명",
            Self::DirectorCareer => "약력",
            Self::DirectorPhilosophy => "진료 철학",
            Self::Address => "주소",
            Self::Phone => "전화번호",
            Self::WebsiteUrl => "홈페이지 URL",
            Self::BlogUrl => "블로그 URL",
        }
    }

    /// CLI name, e.g. `director-name`
    pub fn key(&self) -> &'static str {
        match self {
            Self::DirectorName => "director-name",
            Self::DirectorCareer => "director-career",
            Self::DirectorPhilosophy => "director-philosophy",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::WebsiteUrl => "website-url",
            Self::BlogUrl => "blog-url",
        }
    }

    pub fn all() -> [Self; 7] {
        [
            Self::DirectorName,
            Self::DirectorCareer,
            Self::DirectorPhilosophy,
            Self::Address,
            Self::Phone,
            Self::WebsiteUrl,
            Self::BlogUrl,
        ]
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().replace('_', "-");
        Self::all().into_iter().find(|f| f.key() == s)
    }
}

/// The four tag-set fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Region,
    Specialties,
    Keywords,
    Competitors,
}

impl TagField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Region => "지역",
            Self::Specialties => "전문과목",
            Self::Keywords => "핵심 키워드",
            Self::Competitors => "경쟁 병원",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Specialties => "specialties",
            Self::Keywords => "keywords",
            Self::Competitors => "competitors",
        }
    }

    pub fn all() -> [Self; 4] {
        [
            Self::Region,
            Self::Specialties,
            Self::Keywords,
            Self::Competitors,
        ]
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
    }
}

/// Local draft of a hospital profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEditor {
    hospital_id: Uuid,
    draft: HospitalProfile,
}

impl ProfileEditor {
    pub fn new(hospital: &Hospital) -> Self {
        Self {
            hospital_id: hospital.id,
            draft: hospital.profile(),
        }
    }

    pub fn hospital_id(&self) -> Uuid {
        self.hospital_id
    }

    /// Body that `save` will send
    pub fn draft(&self) -> &HospitalProfile {
        &self.draft
    }

    fn text_slot(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::DirectorName => &mut self.draft.director_name,
            TextField::DirectorCareer => &mut self.draft.director_career,
            TextField::DirectorPhilosophy => &mut self.draft.director_philosophy,
            TextField::Address => &mut self.draft.address,
            TextField::Phone => &mut self.draft.phone,
            TextField::WebsiteUrl => &mut self.draft.website_url,
            TextField::BlogUrl => &mut self.draft.blog_url,
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::DirectorName => &self.draft.director_name,
            TextField::DirectorCareer => &self.draft.director_career,
            TextField::DirectorPhilosophy => &self.draft.director_philosophy,
            TextField::Address => &self.draft.address,
            TextField::Phone => &self.draft.phone,
            TextField::WebsiteUrl => &self.draft.website_url,
            TextField::BlogUrl => &self.draft.blog_url,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.text_slot(field) = value.into();
    }

    pub fn set_hours(&mut self, day: Weekday, hours: impl Into<String>) {
        self.draft.business_hours.set(day, hours);
    }

    fn tag_slot(&mut self, field: TagField) -> &mut Vec<String> {
        match field {
            TagField::Region => &mut self.draft.region,
            TagField::Specialties => &mut self.draft.specialties,
            TagField::Keywords => &mut self.draft.keywords,
            TagField::Competitors => &mut self.draft.competitors,
        }
    }

    pub fn tags(&self, field: TagField) -> &[String] {
        match field {
            TagField::Region => &self.draft.region,
            TagField::Specialties => &self.draft.specialties,
            TagField::Keywords => &self.draft.keywords,
            TagField::Competitors => &self.draft.competitors,
        }
    }

    /// Add comma/Enter separated tags. Returns how many were new.
    pub fn add_tags(&mut self, field: TagField, raw: &str) -> usize {
        let slot = self.tag_slot(field);
        let mut set = TagSet::from(std::mem::take(slot));
        let added = set.add_raw(raw);
        *slot = set.into_vec();
        added
    }

    pub fn remove_tag(&mut self, field: TagField, tag: &str) -> bool {
        let slot = self.tag_slot(field);
        let mut set = TagSet::from(std::mem::take(slot));
        let removed = set.remove(tag);
        *slot = set.into_vec();
        removed
    }

    pub fn treatments(&self) -> &[Treatment] {
        &self.draft.treatments
    }

    pub fn add_treatment(
        &mut self,
        name: &str,
        description: &str,
    ) -> std::result::Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyTreatmentName);
        }
        self.draft
            .treatments
            .push(Treatment::new(name, description.trim()));
        Ok(())
    }

    /// Change one treatment in place; `None` leaves that part as it was
    pub fn update_treatment(
        &mut self,
        index: usize,
        name: Option<&str>,
        description: Option<&str>,
    ) -> std::result::Result<(), ValidationError> {
        let treatment = self
            .draft
            .treatments
            .get_mut(index)
            .ok_or(ValidationError::NoSuchTreatment(index))?;
        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptyTreatmentName);
            }
            treatment.name = name.to_string();
        }
        if let Some(description) = description {
            treatment.description = description.trim().to_string();
        }
        Ok(())
    }

    pub fn remove_treatment(
        &mut self,
        index: usize,
    ) -> std::result::Result<Treatment, ValidationError> {
        if index >= self.draft.treatments.len() {
            return Err(ValidationError::NoSuchTreatment(index));
        }
        Ok(self.draft.treatments.remove(index))
    }

    /// Marking the profile complete starts the diagnosis report and site build
    pub fn set_profile_complete(&mut self, complete: bool) {
        self.draft.profile_complete = complete;
    }

    /// Send the whole draft. Replaces the draft with what the server kept.
    pub async fn save<A: AdminApi + ?Sized>(&mut self, api: &A) -> Result<Hospital> {
        let saved = api.update_profile(self.hospital_id, &self.draft).await?;
        tracing::info!(
            hospital_id = %self.hospital_id,
            profile_complete = saved.profile_complete,
            "Profile saved"
        );
        self.draft = saved.profile();
        Ok(saved)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for field in TextField::all() {
            let _ = writeln!(out, "{}: {}", field.label(), self.text(field));
        }

        let _ = writeln!(out, "{}:", t!("console.profile.business_hours"));
        for day in Weekday::all() {
            let hours = self.draft.business_hours.get(day).unwrap_or("");
            let _ = writeln!(out, "  {}  {hours}", day.korean_name());
        }

        for field in TagField::all() {
            let _ = writeln!(out, "{}: {}", field.label(), self.tags(field).join(", "));
        }

        let _ = writeln!(out, "{}:", t!("console.profile.treatments"));
        if self.draft.treatments.is_empty() {
            let _ = writeln!(out, "  {}", t!("console.profile.no_treatments"));
        }
        for (i, treatment) in self.draft.treatments.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} - {}", i + 1, treatment.name, treatment.description);
        }

        let _ = writeln!(
            out,
            "{}: {}",
            t!("console.profile.complete"),
            super::check_mark(self.draft.profile_complete)
        );
        out
    }
}

/// What the domain section shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPanel {
    /// Site not built yet: no section at all
    Hidden,
    /// Domain input; activation is offered only once a domain is set
    Editable {
        domain: Option<String>,
        can_activate: bool,
    },
    /// Static LIVE indicator in place of every control
    Live { domain: Option<String> },
}

impl DomainPanel {
    pub fn of(site_built: bool, site_live: bool, domain: Option<&str>) -> Self {
        let domain = domain
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);
        if !site_built {
            Self::Hidden
        } else if site_live {
            Self::Live { domain }
        } else {
            let can_activate = domain.is_some();
            Self::Editable {
                domain,
                can_activate,
            }
        }
    }

    pub fn for_hospital(hospital: &Hospital) -> Self {
        Self::of(hospital.site_built, hospital.site_live, hospital.domain())
    }

    pub fn can_activate(&self) -> bool {
        matches!(self, Self::Editable { can_activate: true, .. })
    }

    pub fn render(&self) -> String {
        match self {
            Self::Hidden => String::new(),
            Self::Live { domain } => {
                let domain = domain.as_deref().unwrap_or("");
                format!("LIVE {domain}\n{}\n", t!("console.domain.live"))
            }
            Self::Editable {
                domain,
                can_activate,
            } => {
                let mut out = String::new();
                let _ = writeln!(
                    out,
                    "{}: {}",
                    t!("console.domain.label"),
                    domain.as_deref().unwrap_or("-")
                );
                out.push_str(&dns_guide());
                if *can_activate {
                    let _ = writeln!(out, "[LIVE 활성화]");
                }
                out
            }
        }
    }
}

/// How the operator points a domain at the microsite
pub fn dns_guide() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", t!("console.domain.guide.title"));
    let _ = writeln!(out, "1. {}", t!("console.domain.guide.step1"));
    let _ = writeln!(out, "2. {}", t!("console.domain.guide.step2", target = CNAME_TARGET));
    let _ = writeln!(out, "3. {}", t!("console.domain.guide.step3"));
    let _ = writeln!(out, "4. {}", t!("console.domain.guide.step4"));
    let _ = writeln!(out, "5. {}", t!("console.domain.guide.step5"));
    out
}

/// Result of an activation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Activated,
    Cancelled,
    /// Control not shown: no domain, site not built, or already live
    Unavailable,
}

/// Domain controls for one hospital
pub struct DomainSection<'a, A: AdminApi + ?Sized> {
    api: &'a A,
    hospital_id: Uuid,
    site_built: bool,
    site_live: bool,
    domain: Option<String>,
}

impl<'a, A: AdminApi + ?Sized> DomainSection<'a, A> {
    pub fn new(api: &'a A, hospital: &Hospital) -> Self {
        Self {
            api,
            hospital_id: hospital.id,
            site_built: hospital.site_built,
            site_live: hospital.site_live,
            domain: hospital.domain().map(String::from),
        }
    }

    pub fn panel(&self) -> DomainPanel {
        DomainPanel::of(self.site_built, self.site_live, self.domain.as_deref())
    }

    /// Save a domain. A blank domain sends nothing and returns false.
    pub async fn connect(&mut self, domain: &str) -> std::result::Result<bool, ApiError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Ok(false);
        }
        let receipt = self.api.set_domain(self.hospital_id, domain).await?;
        tracing::info!(
            hospital_id = %self.hospital_id,
            domain,
            detail = receipt.as_ref().map(|r| r.detail.as_str()).unwrap_or(""),
            "Domain set"
        );
        self.domain = Some(domain.to_string());
        Ok(true)
    }

    /// Flip the site live after the operator confirms DNS is ready
    pub async fn activate(
        &mut self,
        confirmer: &mut dyn Confirmer,
    ) -> std::result::Result<Activation, ApiError> {
        if !self.panel().can_activate() {
            return Ok(Activation::Unavailable);
        }
        if !confirmer.confirm(&t!("console.domain.activate_confirm")) {
            return Ok(Activation::Cancelled);
        }
        self.api.activate(self.hospital_id).await?;
        tracing::info!(hospital_id = %self.hospital_id, "Site activated");
        self.site_live = true;
        Ok(Activation::Activated)
    }
}

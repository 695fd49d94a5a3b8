//! Handlebars templates for the microsite, embedded at compile time

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

const LAYOUT: &str = include_str!("../../templates/site/layout.hbs");
const HOME: &str = include_str!("../../templates/site/home.hbs");
const LANDING: &str = include_str!("../../templates/site/landing.hbs");
const CONTENTS: &str = include_str!("../../templates/site/contents.hbs");
const CONTENT: &str = include_str!("../../templates/site/content.hbs");
const NOT_FOUND: &str = include_str!("../../templates/site/not_found.hbs");

/// Page templates by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Home,
    Landing,
    Contents,
    Content,
    NotFound,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Landing => "landing",
            Self::Contents => "contents",
            Self::Content => "content",
            Self::NotFound => "not_found",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Self::Home => HOME,
            Self::Landing => LANDING,
            Self::Contents => CONTENTS,
            Self::Content => CONTENT,
            Self::NotFound => NOT_FOUND,
        }
    }

    fn all() -> [Self; 5] {
        [
            Self::Home,
            Self::Landing,
            Self::Contents,
            Self::Content,
            Self::NotFound,
        ]
    }
}

/// Registry holding the shared layout and every page template
pub struct SiteTemplates {
    handlebars: Handlebars<'static>,
}

impl SiteTemplates {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_partial("layout", LAYOUT)?;
        for template in Template::all() {
            handlebars.register_template_string(template.name(), template.source())?;
        }
        Ok(Self { handlebars })
    }

    pub fn render<T: Serialize>(&self, template: Template, data: &T) -> Result<String> {
        Ok(self.handlebars.render(template.name(), data)?)
    }
}

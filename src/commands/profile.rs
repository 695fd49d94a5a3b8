use anyhow::{anyhow, bail, Result};

use reputation::api::AdminApi;
use reputation::console::{ProfileEditor, TagField, TextField};
use reputation::i18n::t;
use reputation::models::Weekday;

use super::{failure, parse_id, Session};

/// Changes requested on the command line, applied in this order:
/// text fields, hours, tag additions, tag removals, treatment removals,
/// treatment additions, completion flag
#[derive(Debug, Default)]
pub struct ProfileEdits {
    /// `field=value`
    pub set: Vec<String>,
    /// `day=hours`
    pub hours: Vec<String>,
    /// `field=tag,tag`
    pub add_tags: Vec<String>,
    /// `field=tag`
    pub remove_tags: Vec<String>,
    /// `name` or `name:description`
    pub add_treatments: Vec<String>,
    /// 1-based positions
    pub remove_treatments: Vec<usize>,
    pub complete: Option<bool>,
}

impl ProfileEdits {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
            && self.hours.is_empty()
            && self.add_tags.is_empty()
            && self.remove_tags.is_empty()
            && self.add_treatments.is_empty()
            && self.remove_treatments.is_empty()
            && self.complete.is_none()
    }

    fn apply(&self, editor: &mut ProfileEditor) -> Result<()> {
        for pair in &self.set {
            let (key, value) = split_pair(pair)?;
            let field = TextField::parse(key).ok_or_else(|| anyhow!("Unknown field: {key}"))?;
            editor.set_text(field, value);
        }

        for pair in &self.hours {
            let (key, value) = split_pair(pair)?;
            let day = Weekday::parse(key).ok_or_else(|| anyhow!("Unknown day: {key}"))?;
            editor.set_hours(day, value);
        }

        for pair in &self.add_tags {
            let (key, value) = split_pair(pair)?;
            let field = TagField::parse(key).ok_or_else(|| anyhow!("Unknown tag field: {key}"))?;
            let added = editor.add_tags(field, value);
            tracing::debug!(field = field.key(), added, "Tags added");
        }

        for pair in &self.remove_tags {
            let (key, value) = split_pair(pair)?;
            let field = TagField::parse(key).ok_or_else(|| anyhow!("Unknown tag field: {key}"))?;
            if !editor.remove_tag(field, value.trim()) {
                tracing::warn!(field = field.key(), tag = value, "Tag not present");
            }
        }

        // Highest position first so earlier removals do not shift later ones
        let mut positions = self.remove_treatments.clone();
        positions.sort_unstable_by(|a, b| b.cmp(a));
        positions.dedup();
        for position in positions {
            let index = position
                .checked_sub(1)
                .ok_or_else(|| anyhow!("Treatment positions start at 1"))?;
            editor
                .remove_treatment(index)
                .map_err(|e| failure(e.into(), ""))?;
        }

        for entry in &self.add_treatments {
            let (name, description) = entry.split_once(':').unwrap_or((entry.as_str(), ""));
            editor
                .add_treatment(name, description)
                .map_err(|e| failure(e.into(), ""))?;
        }

        if let Some(complete) = self.complete {
            editor.set_profile_complete(complete);
        }
        Ok(())
    }
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("Expected KEY=VALUE, got: {pair}"),
    }
}

pub async fn show(session: &Session, id: String) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let api = session.admin()?;
    let hospital = api
        .get_hospital(hospital_id)
        .await
        .map_err(|e| anyhow!(e.alert_message(&t!("console.common.load_failed"))))?;

    println!("{}", hospital.name);
    print!("{}", ProfileEditor::new(&hospital).render());
    Ok(())
}

pub async fn edit(session: &Session, id: String, edits: ProfileEdits) -> Result<()> {
    if edits.is_empty() {
        bail!("Nothing to change");
    }

    let hospital_id = parse_id(&id)?;
    let api = session.admin()?;
    let hospital = api
        .get_hospital(hospital_id)
        .await
        .map_err(|e| anyhow!(e.alert_message(&t!("console.common.load_failed"))))?;

    let mut editor = ProfileEditor::new(&hospital);
    edits.apply(&mut editor)?;

    let completing = editor.draft().profile_complete && !hospital.profile_complete;
    editor
        .save(&api)
        .await
        .map_err(|e| failure(e, &t!("console.profile.save_failed")))?;

    println!("{}", t!("console.profile.saved"));
    if completing {
        println!("{}", t!("console.profile.complete_hint"));
    }
    print!("{}", editor.render());
    Ok(())
}

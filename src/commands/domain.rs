use anyhow::{anyhow, bail, Result};

use reputation::api::AdminApi;
use reputation::console::{Activation, DomainPanel, DomainSection};
use reputation::i18n::t;

use super::{parse_id, Session};

pub async fn set(session: &Session, id: String, domain: String) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let api = session.admin()?;
    let hospital = api
        .get_hospital(hospital_id)
        .await
        .map_err(|e| anyhow!(e.alert_message(&t!("console.common.load_failed"))))?;

    let mut section = DomainSection::new(&api, &hospital);
    match section.panel() {
        DomainPanel::Hidden => bail!("{}", t!("console.domain.not_built")),
        DomainPanel::Live { .. } => bail!("{}", t!("console.domain.already_live")),
        DomainPanel::Editable { .. } => {}
    }

    let connected = section
        .connect(&domain)
        .await
        .map_err(|e| anyhow!(e.alert_message(&t!("console.domain.connect_failed"))))?;
    if !connected {
        bail!("{}", t!("console.domain.required"));
    }

    print!("{}", section.panel().render());
    Ok(())
}

pub async fn activate(session: &Session, id: String) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let api = session.admin()?;
    let hospital = api
        .get_hospital(hospital_id)
        .await
        .map_err(|e| anyhow!(e.alert_message(&t!("console.common.load_failed"))))?;

    let mut section = DomainSection::new(&api, &hospital);
    let mut confirmer = session.confirmer();
    let outcome = section
        .activate(confirmer.as_mut())
        .await
        .map_err(|e| anyhow!(e.alert_message(&t!("console.domain.activate_failed"))))?;

    match outcome {
        Activation::Activated => print!("{}", section.panel().render()),
        Activation::Cancelled => println!("{}", t!("console.common.cancelled")),
        Activation::Unavailable => bail!("{}", t!("console.domain.cannot_activate")),
    }
    Ok(())
}

use anyhow::{anyhow, Result};

use reputation::api::AdminApi;
use reputation::console::{
    check_mark, DomainPanel, HospitalList, NewHospitalForm, Phase, ProfileEditor,
};
use reputation::i18n::t;
use reputation::models::Plan;

use super::{failure, parse_id, Session};

pub async fn list(session: &Session) -> Result<()> {
    let api = session.admin()?;
    let mut view = HospitalList::new(&api);
    view.load().await;

    println!("{}", view.render());
    if let Phase::Failed(message) = view.hospitals() {
        return Err(anyhow!(message.clone()));
    }
    Ok(())
}

pub async fn create(session: &Session, name: String, plan: String) -> Result<()> {
    let plan = Plan::parse(&plan).ok_or_else(|| anyhow!("Unknown plan: {plan}"))?;
    let api = session.admin()?;

    let hospital = NewHospitalForm::new(name, plan)
        .submit(&api)
        .await
        .map_err(|e| failure(e, &t!("console.hospitals.create_failed")))?;

    let name = hospital.name.as_str();
    println!("{}", t!("console.hospitals.created", name = name));
    println!("  id:   {}", hospital.id);
    println!("  slug: {}", hospital.slug);
    println!("  {}: {}", t!("console.hospitals.plan"), plan.label());
    println!();
    println!("reputation profile edit {} ...", hospital.id);
    Ok(())
}

pub async fn show(session: &Session, id: String) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let api = session.admin()?;
    let hospital = api
        .get_hospital(hospital_id)
        .await
        .map_err(|e| anyhow!(e.alert_message(&t!("console.common.load_failed"))))?;

    println!("{} ({})", hospital.name, hospital.slug);
    println!(
        "{} · {}",
        hospital.status.label(),
        hospital.plan.as_ref().map_or("-", Plan::label)
    );
    println!(
        "{} {}  {} {}  V0 {}  LIVE {}  {} {}",
        t!("console.tabs.profile"),
        check_mark(hospital.profile_complete),
        t!("console.hospitals.site_built"),
        check_mark(hospital.site_built),
        check_mark(hospital.v0_report_done),
        check_mark(hospital.site_live),
        t!("console.tabs.schedule"),
        check_mark(hospital.schedule_set),
    );
    println!();
    print!("{}", ProfileEditor::new(&hospital).render());

    let panel = DomainPanel::for_hospital(&hospital);
    if panel != DomainPanel::Hidden {
        println!();
        print!("{}", panel.render());
    }
    Ok(())
}

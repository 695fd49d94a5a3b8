use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use reputation::console::schedule::render_summary;
use reputation::console::ScheduleForm;
use reputation::i18n::t;
use reputation::models::{Plan, Weekday};

use super::{failure, parse_id, Session};

pub async fn set(
    session: &Session,
    id: String,
    plan: String,
    days: Vec<String>,
    from: Option<NaiveDate>,
) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let plan = Plan::parse(&plan).ok_or_else(|| anyhow!("Unknown plan: {plan}"))?;

    let mut form = ScheduleForm::default();
    form.plan = plan;
    if let Some(from) = from {
        form.active_from = from;
    }
    if !days.is_empty() {
        let days = days
            .iter()
            .flat_map(|d| d.split(','))
            .filter(|d| !d.trim().is_empty())
            .map(|d| Weekday::parse(d.trim()).ok_or_else(|| anyhow!("Unknown day: {d}")))
            .collect::<Result<Vec<_>>>()?;
        form = ScheduleForm::new(plan, days, form.active_from);
    }

    println!(
        "{} · {}: {} · {}",
        form.plan.label(),
        t!("console.schedule.days"),
        form.days_label(),
        form.active_from
    );

    let api = session.admin()?;
    let summary = form
        .submit(&api, hospital_id)
        .await
        .map_err(|e| failure(e, &t!("console.schedule.save_failed")))?;

    print!("{}", render_summary(&summary));
    Ok(())
}

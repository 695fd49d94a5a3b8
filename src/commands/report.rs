use anyhow::{anyhow, bail, Result};

use reputation::console::reports::render_detail;
use reputation::console::{Phase, ReportBoard};
use reputation::i18n::t;

use super::{parse_id, Session};

pub async fn list(session: &Session, id: String) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let api = session.admin()?;

    let mut board = ReportBoard::new(&api, hospital_id);
    board.load().await;

    println!("{}", board.render());
    if let Phase::Failed(message) = board.reports() {
        return Err(anyhow!(message.clone()));
    }
    Ok(())
}

pub async fn show(session: &Session, id: String, report_id: String) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let report_id = parse_id(&report_id)?;
    let api = session.admin()?;

    let mut board = ReportBoard::new(&api, hospital_id);
    board.load().await;

    match board.open_detail(report_id).await {
        Some(report) => {
            print!("{}", render_detail(report));
            Ok(())
        }
        None => bail!("{}", t!("console.reports.not_found")),
    }
}

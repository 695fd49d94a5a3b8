use anyhow::{anyhow, bail, Result};

use reputation::console::content::render_detail;
use reputation::console::{ActionOutcome, ContentBoard, Phase};
use reputation::i18n::t;
use reputation::models::{ContentQuery, ContentStatus};

use super::{parse_id, Session};

/// `--year/--month/--status` filters for the list
#[derive(Debug, Default)]
pub struct ListFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub status: Option<String>,
}

impl ListFilter {
    fn to_query(&self) -> Result<ContentQuery> {
        let status = match self.status.as_deref() {
            Some(s) => Some(ContentStatus::parse(s).ok_or_else(|| anyhow!("Unknown status: {s}"))?),
            None => None,
        };
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                bail!("Month must be 1-12, got {month}");
            }
        }
        Ok(ContentQuery {
            year: self.year,
            month: self.month,
            status,
        })
    }
}

pub async fn list(session: &Session, id: String, filter: ListFilter) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let query = filter.to_query()?;
    let api = session.admin()?;

    let mut board =
        ContentBoard::new(&api, hospital_id, session.config.api.published_by.as_str())
            .with_query(query);
    board.load().await;

    println!("{}\n", t!("console.content.title"));
    println!("{}", board.render());
    if let Phase::Failed(message) = board.items() {
        return Err(anyhow!(message.clone()));
    }
    Ok(())
}

pub async fn show(session: &Session, id: String, content_id: String) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let content_id = parse_id(&content_id)?;
    let api = session.admin()?;

    let mut board = ContentBoard::new(&api, hospital_id, session.config.api.published_by.as_str());
    board.load().await;

    match board.open_detail(content_id).await {
        Some(item) => {
            print!("{}", render_detail(item));
            let actions = item.lifecycle().actions();
            if !actions.is_empty() {
                let labels: Vec<_> = actions.iter().map(|a| format!("[{}]", a.label())).collect();
                println!("\n{}", labels.join(" "));
            }
            Ok(())
        }
        None => bail!("{}", t!("console.content.not_found")),
    }
}

pub async fn publish(session: &Session, id: String, content_id: String) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let content_id = parse_id(&content_id)?;
    let api = session.admin()?;

    let mut board = ContentBoard::new(&api, hospital_id, session.config.api.published_by.as_str());
    board.load().await;
    let outcome = board.publish(content_id).await;
    report(outcome, &board.render())
}

pub async fn reject(session: &Session, id: String, content_id: String) -> Result<()> {
    let hospital_id = parse_id(&id)?;
    let content_id = parse_id(&content_id)?;
    let api = session.admin()?;

    let mut board = ContentBoard::new(&api, hospital_id, session.config.api.published_by.as_str());
    board.load().await;
    let mut confirmer = session.confirmer();
    let outcome = board.reject(content_id, confirmer.as_mut()).await;
    report(outcome, &board.render())
}

fn report(outcome: ActionOutcome, refreshed: &str) -> Result<()> {
    match outcome {
        ActionOutcome::Done(receipt) => {
            if let Some(receipt) = receipt.filter(|r| !r.detail.is_empty()) {
                println!("{}", receipt.detail);
            }
            println!("{refreshed}");
            Ok(())
        }
        ActionOutcome::Cancelled => {
            println!("{}", t!("console.common.cancelled"));
            Ok(())
        }
        ActionOutcome::Unavailable => bail!("{}", t!("console.content.not_actionable")),
        ActionOutcome::Failed(message) => Err(anyhow!(message)),
    }
}

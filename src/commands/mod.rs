pub mod content;
pub mod domain;
pub mod hospital;
pub mod profile;
pub mod report;
pub mod schedule;
pub mod serve;

use anyhow::{anyhow, Context as _, Result};
use uuid::Uuid;

use reputation::api::AdminClient;
use reputation::config::Config;
use reputation::console::{AutoConfirm, Confirmer, TerminalConfirmer};
use reputation::error::{Error, ReputationErrorTrait};

/// Everything a console command needs: settings and the prompt policy
pub struct Session {
    pub config: Config,
    pub assume_yes: bool,
}

impl Session {
    pub fn new(config: Config, assume_yes: bool) -> Self {
        Self { config, assume_yes }
    }

    pub fn admin(&self) -> Result<AdminClient> {
        AdminClient::new(&self.config.api).context("Failed to create admin API client")
    }

    /// `--yes` answers every prompt; otherwise ask on the terminal
    pub fn confirmer(&self) -> Box<dyn Confirmer> {
        if self.assume_yes {
            Box::new(AutoConfirm::yes())
        } else {
            Box::new(TerminalConfirmer)
        }
    }
}

pub fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim()).with_context(|| format!("Invalid id: {value}"))
}

/// Operator-facing failure: the server's own text for HTTP errors, the
/// localized description for input errors, the fallback otherwise
pub fn failure(err: Error, fallback: &str) -> anyhow::Error {
    let message = match &err {
        Error::Api(api) => api.alert_message(fallback),
        Error::Validation(_) => err.localized_desc(),
        _ => format!("{fallback} ({err})"),
    };
    tracing::debug!(error = %err, category = ?err.category(), "Command failed");
    anyhow!(message)
}

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reputation::config::Config;

mod commands;

use commands::content::ListFilter;
use commands::profile::ProfileEdits;
use commands::Session;

// The binary translates its own console output
rust_i18n::i18n!("locales", fallback = "ko");

#[derive(Parser)]
#[command(
    name = "reputation",
    version,
    about = "Re:putation admin console and AEO microsite server",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (defaults to REPUTATION_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hospital list and registration
    Hospitals {
        #[command(subcommand)]
        action: HospitalAction,
    },

    /// Hospital profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// AEO domain connection and activation
    Domain {
        #[command(subcommand)]
        action: DomainAction,
    },

    /// Publishing schedule
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Scheduled content slots
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },

    /// Diagnosis and monthly reports
    Reports {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Public microsite
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },
}

#[derive(Subcommand)]
enum HospitalAction {
    /// List every hospital
    List,

    /// Register a hospital
    Create {
        /// Hospital name
        name: String,

        /// Plan (PLAN_16, PLAN_12, PLAN_8)
        #[arg(short, long, default_value = "PLAN_16")]
        plan: String,
    },

    /// Show one hospital
    Show {
        /// Hospital id
        id: String,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile
    Show {
        /// Hospital id
        id: String,
    },

    /// Change profile fields and save them in one request
    Edit {
        /// Hospital id
        id: String,

        /// Text field, e.g. director-name=김원장 (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Business hours, e.g. mon="09:00 ~ 18:00" (repeatable)
        #[arg(long = "hours", value_name = "DAY=HOURS")]
        hours: Vec<String>,

        /// Add comma separated tags, e.g. region=서울,강남구 (repeatable)
        #[arg(long = "add-tag", value_name = "FIELD=TAGS")]
        add_tags: Vec<String>,

        /// Remove one tag, e.g. keywords=탈장 (repeatable)
        #[arg(long = "remove-tag", value_name = "FIELD=TAG")]
        remove_tags: Vec<String>,

        /// Add a treatment, e.g. "하지정맥류:레이저 치료" (repeatable)
        #[arg(long = "add-treatment", value_name = "NAME[:DESCRIPTION]")]
        add_treatments: Vec<String>,

        /// Remove the treatment at a 1-based position (repeatable)
        #[arg(long = "remove-treatment", value_name = "N")]
        remove_treatments: Vec<usize>,

        /// Mark the profile complete (starts the V0 report and site build)
        #[arg(long, conflicts_with = "incomplete")]
        complete: bool,

        /// Mark the profile incomplete
        #[arg(long)]
        incomplete: bool,
    },
}

#[derive(Subcommand)]
enum DomainAction {
    /// Connect an AEO domain
    Set {
        /// Hospital id
        id: String,

        /// Domain, e.g. info.example.co.kr
        domain: String,
    },

    /// Switch the site LIVE after DNS is in place
    Activate {
        /// Hospital id
        id: String,
    },
}

#[derive(Subcommand)]
enum ScheduleAction {
    /// Set plan, publish days and start date
    Set {
        /// Hospital id
        id: String,

        /// Plan (PLAN_16, PLAN_12, PLAN_8)
        #[arg(short, long, default_value = "PLAN_16")]
        plan: String,

        /// Publish days (mon..sun, 0-6 or 월..일), comma separated or repeated.
        /// Defaults to Tuesday and Friday.
        #[arg(short, long)]
        days: Vec<String>,

        /// First active date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        from: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// List content slots
    List {
        /// Hospital id
        id: String,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,

        /// DRAFT, READY, PUBLISHED or REJECTED
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one item with its body
    Show {
        /// Hospital id
        id: String,
        /// Content id
        content_id: String,
    },

    /// Publish a generated draft
    Publish {
        /// Hospital id
        id: String,
        /// Content id
        content_id: String,
    },

    /// Reject a generated draft (it is regenerated overnight)
    Reject {
        /// Hospital id
        id: String,
        /// Content id
        content_id: String,
    },
}

#[derive(Subcommand)]
enum ReportAction {
    /// List reports
    List {
        /// Hospital id
        id: String,
    },

    /// Show one report's summaries
    Show {
        /// Hospital id
        id: String,
        /// Report id
        report_id: String,
    },
}

#[derive(Subcommand)]
enum SiteAction {
    /// Serve the public microsite
    Serve {
        /// Bind address, overrides the config
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;
    reputation::i18n::init_from_env();

    tracing::debug!(api = %config.api.base_url, "Configuration loaded");

    let session = Session::new(config, cli.yes);

    match cli.command {
        Commands::Hospitals { action } => match action {
            HospitalAction::List => commands::hospital::list(&session).await?,
            HospitalAction::Create { name, plan } => {
                tracing::info!(name = %name, plan = %plan, "Starting hospital create");
                commands::hospital::create(&session, name, plan).await?;
            }
            HospitalAction::Show { id } => commands::hospital::show(&session, id).await?,
        },

        Commands::Profile { action } => match action {
            ProfileAction::Show { id } => commands::profile::show(&session, id).await?,
            ProfileAction::Edit {
                id,
                set,
                hours,
                add_tags,
                remove_tags,
                add_treatments,
                remove_treatments,
                complete,
                incomplete,
            } => {
                let edits = ProfileEdits {
                    set,
                    hours,
                    add_tags,
                    remove_tags,
                    add_treatments,
                    remove_treatments,
                    complete: match (complete, incomplete) {
                        (true, _) => Some(true),
                        (_, true) => Some(false),
                        _ => None,
                    },
                };
                tracing::info!(id = %id, "Starting profile edit");
                commands::profile::edit(&session, id, edits).await?;
            }
        },

        Commands::Domain { action } => match action {
            DomainAction::Set { id, domain } => {
                tracing::info!(id = %id, domain = %domain, "Starting domain set");
                commands::domain::set(&session, id, domain).await?;
            }
            DomainAction::Activate { id } => {
                tracing::info!(id = %id, "Starting domain activate");
                commands::domain::activate(&session, id).await?;
            }
        },

        Commands::Schedule { action } => match action {
            ScheduleAction::Set {
                id,
                plan,
                days,
                from,
            } => {
                tracing::info!(id = %id, plan = %plan, days = ?days, from = ?from, "Starting schedule set");
                commands::schedule::set(&session, id, plan, days, from).await?;
            }
        },

        Commands::Content { action } => match action {
            ContentAction::List {
                id,
                year,
                month,
                status,
            } => {
                let filter = ListFilter {
                    year,
                    month,
                    status,
                };
                commands::content::list(&session, id, filter).await?;
            }
            ContentAction::Show { id, content_id } => {
                commands::content::show(&session, id, content_id).await?;
            }
            ContentAction::Publish { id, content_id } => {
                tracing::info!(id = %id, content_id = %content_id, "Starting content publish");
                commands::content::publish(&session, id, content_id).await?;
            }
            ContentAction::Reject { id, content_id } => {
                tracing::info!(id = %id, content_id = %content_id, "Starting content reject");
                commands::content::reject(&session, id, content_id).await?;
            }
        },

        Commands::Reports { action } => match action {
            ReportAction::List { id } => commands::report::list(&session, id).await?,
            ReportAction::Show { id, report_id } => {
                commands::report::show(&session, id, report_id).await?;
            }
        },

        Commands::Site { action } => match action {
            SiteAction::Serve { bind } => {
                commands::serve::site(session.config, bind).await?;
            }
        },
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("reputation=debug,tower_http=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!("reputation={level},tower_http={level},warn"))
        })
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

//! `scrub` - author data cleaning rules from the terminal
//!
//! Drives a headless rule editor session against the rule service:
//!
//! ```text
//! scrub generate --name zip_city --type FD --table1 hospital --body-file fd.txt
//! scrub save --name MyRule1 --table1 hospital --code-file MyRule1.java
//! ```

mod logging;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use scrub_core::RuleType;
use scrub_rule_editor::{ActionOutcome, BannerKind, RuleEditorEvent, RuleEditorView, RuleSeed};
use scrub_services::HttpRuleBackend;
use scrub_settings::ScrubSettings;
use tokio::sync::mpsc::unbounded_channel;

#[derive(Parser, Debug)]
#[command(name = "scrub", version, about = "Author data cleaning rules")]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "SCRUB_SETTINGS")]
    settings: Option<PathBuf>,

    /// Rule service base URL
    #[arg(long, global = true, env = "SCRUB_BACKEND_URL")]
    base_url: Option<String>,

    /// Project the rule belongs to
    #[arg(long, global = true, env = "SCRUB_PROJECT")]
    project: Option<String>,

    /// Also write JSON logs to the log directory
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate code for a rule and print it
    Generate(RuleArgs),
    /// Ask the rule service to verify a rule
    Verify(RuleArgs),
    /// Create the rule
    Save(RuleArgs),
    /// Print the effective settings
    Settings,
}

#[derive(Args, Debug)]
struct RuleArgs {
    #[arg(long)]
    name: String,

    /// FD, UDF, ER or DC
    #[arg(long = "type", default_value = "UDF")]
    rule_type: RuleType,

    #[arg(long)]
    table1: String,

    #[arg(long)]
    table2: Option<String>,

    /// File loaded into the raw code editor
    #[arg(long)]
    code_file: Option<PathBuf>,

    /// File fed to the structured editor
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Height the modal is laid out for
    #[arg(long, default_value_t = 900)]
    viewport_height: u32,
}

impl RuleArgs {
    fn seed(&self) -> RuleSeed {
        RuleSeed {
            name: self.name.clone(),
            rule_type: self.rule_type,
            table1: self.table1.clone(),
            table2: self.table2.clone(),
            code: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Generate,
    Verify,
    Save,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = if cfg!(debug_assertions) {
        logging::LoggingConfig::development()
    } else {
        logging::LoggingConfig::production()
    };
    log_config.enable_json_logs = cli.json_logs;
    logging::init(log_config)?;

    let settings = effective_settings(&cli)?;

    match cli.command {
        Command::Generate(args) => run(Action::Generate, &args, &settings).await,
        Command::Verify(args) => run(Action::Verify, &args, &settings).await,
        Command::Save(args) => run(Action::Save, &args, &settings).await,
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

fn effective_settings(cli: &Cli) -> Result<ScrubSettings> {
    let mut settings = match &cli.settings {
        Some(path) => ScrubSettings::load_from(path)?,
        None => ScrubSettings::load()?,
    };
    if let Some(base_url) = &cli.base_url {
        settings.backend.base_url = base_url.clone();
    }
    if let Some(project) = &cli.project {
        settings.backend.project = project.clone();
    }
    Ok(settings)
}

async fn run(action: Action, args: &RuleArgs, settings: &ScrubSettings) -> Result<()> {
    let backend = Arc::new(HttpRuleBackend::new(&settings.backend)?);
    let (events_tx, mut events_rx) = unbounded_channel();

    let view = RuleEditorView::builder(backend, events_tx)
        .settings(settings.editor.clone())
        .seed(args.seed())
        .build();
    view.on_shown(args.viewport_height)?;

    if let Some(path) = &args.code_file {
        view.set_code(&read_input(path)?);
    }
    if let Some(path) = &args.body_file {
        if !view.set_structured_input(&read_input(path)?) {
            bail!("No structured editor is active for rule type {}", args.rule_type);
        }
    }

    tracing::debug!(?action, rule = %args.name, "running rule action");
    let outcome = match action {
        Action::Generate => view.generate().await,
        Action::Verify => view.verify().await,
        Action::Save => view.save().await,
    }
    .with_context(|| format!("{:?} failed", action))?;

    if let Some(banner) = view.banner() {
        match banner.kind {
            BannerKind::Info => eprintln!("{}", banner.message),
            BannerKind::Error => eprintln!("error: {}", banner.message),
        }
    }

    while let Ok(event) = events_rx.try_recv() {
        if let RuleEditorEvent::RefreshRuleList { info } = event {
            println!("{}", info);
        }
    }

    match outcome {
        ActionOutcome::Completed => {
            if matches!(action, Action::Generate) {
                println!("{}", view.code());
            }
            Ok(())
        }
        ActionOutcome::Invalid(reason) => bail!("{}", reason),
        ActionOutcome::Rejected(message) => bail!("{}", message),
        ActionOutcome::Discarded => Ok(()),
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

use anyhow::Context;
use clap::Parser;
use formflow::catalog::{CatalogClient, TemplateDraft};
use formflow::config::Settings;
use formflow::demo;
use formflow::error::SubmitError;
use formflow::runtime::{SubmitHandler, WizardOutcome, WizardRunner};
use formflow::terminal::Terminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "formflow",
    about = "Publish a template to the catalog from your terminal"
)]
struct Cli {
    /// Catalog service base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Run the wizard without talking to the catalog
    #[arg(long)]
    offline: bool,

    /// Fail the submission on purpose to exercise the retry path
    #[arg(long)]
    fail: bool,

    /// Read settings from this file instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(base_url) = cli.base_url.clone() {
        settings.base_url = base_url;
    }

    init_tracing(&settings);
    info!(base_url = %settings.base_url, offline = cli.offline, "starting the publish wizard");

    let session = demo::build_submission_wizard();
    let terminal = Terminal::new().context("failed to open the terminal")?;
    let handler = submit_handler(&cli, &settings);

    let mut runner = WizardRunner::new(session, terminal, handler);
    let outcome = runner.run().context("wizard run failed")?;

    match outcome {
        WizardOutcome::Submitted => {
            let draft = runner.session().data();
            println!("Published '{}' by {}.", draft.name, draft.author);
        }
        WizardOutcome::Cancelled => println!("Cancelled; nothing was published."),
    }
    Ok(())
}

fn submit_handler(cli: &Cli, settings: &Settings) -> SubmitHandler<TemplateDraft> {
    if cli.fail {
        return Arc::new(|_draft: TemplateDraft| {
            std::thread::sleep(Duration::from_millis(600));
            Err(SubmitError::new("simulated failure; retry or cancel"))
        });
    }
    if cli.offline {
        return Arc::new(|draft: TemplateDraft| {
            // brief pause so the submitting state is visible
            std::thread::sleep(Duration::from_millis(600));
            info!(name = %draft.name, "offline mode; draft not published");
            Ok(())
        });
    }
    let client =
        CatalogClient::new(settings.base_url.clone()).with_timeout(settings.request_timeout());
    Arc::new(move |draft: TemplateDraft| {
        let record = client.create(&draft)?;
        info!(id = %record.id, "draft published");
        Ok(())
    })
}

fn init_tracing(settings: &Settings) {
    use tracing_appender::rolling;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("formflow").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    if let Err(err) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: failed to create log directory: {err}");
    }
    let file_appender = rolling::daily(&log_dir, "formflow.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // The wizard draws on the terminal in raw mode; logs go to the file only.
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

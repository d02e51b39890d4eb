//! Portal watch CLI - facility portal alert monitor.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portal_watch::config::Config;
use portal_watch::notify::{Notifier, WatchEvent};
use portal_watch::portal::{AlertParser, PortalBrowser};
use portal_watch::runner::Watcher;

/// Portal watch CLI - monitor a facility portal and relay alerts.
#[derive(Parser)]
#[command(name = "portal-watch")]
#[command(about = "Facility portal alert monitor")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single watch cycle (for CronJob use)
    Run,

    /// Log in and print the extracted status without notifying
    Probe {
        /// Run with a visible browser window (for local debugging)
        #[arg(long)]
        headful: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("portal_watch=debug,info")
    } else {
        EnvFilter::new("portal_watch=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run => run_watch().await,
        Commands::Probe { headful } => run_probe(headful).await,
    }
}

async fn run_watch() -> Result<()> {
    let config = Config::from_env()?;

    // One notifier per run; the failure path below reuses it.
    let watcher = Watcher::new(config, Notifier::from_env(), true);

    match watcher.run_once().await {
        Ok(report) => {
            println!("\n📊 Watch Run Summary");
            println!("   Alerts: {}", report.alert_count);
            println!("   Notified: {}", report.notified);
            if let Some(message) = &report.message {
                println!("   Portal message: {message}");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Watch run failed");
            report_failure(watcher.notifier(), &e).await;
            Err(e)
        }
    }
}

/// Best-effort run-failure notification.
///
/// Failures here are logged only; the original error is the one the
/// process reports.
async fn report_failure(notifier: &Notifier, err: &anyhow::Error) {
    if !notifier.has_channels() {
        tracing::debug!("No channels configured, skipping failure notification");
        return;
    }

    let event = WatchEvent::RunFailed {
        message: format!("{err:#}"),
        timestamp: Utc::now(),
    };

    for (channel, result) in notifier.notify_and_wait(event).await {
        if let Err(e) = result {
            tracing::error!(
                channel = %channel,
                error = %e,
                "Failed to send run-failure notification"
            );
        }
    }
}

async fn run_probe(headful: bool) -> Result<()> {
    let config = Config::from_env()?;

    println!("🔍 Probing portal status page: {}\n", config.status_url);

    let browser = PortalBrowser::new(!headful);
    let html = browser.fetch_status_page(&config).await?;
    let status = AlertParser::parse(&html);

    if status.alerts.is_empty() {
        println!("✅ No active alerts");
        if let Some(message) = &status.message {
            println!("   Portal message: {message}");
        }
        return Ok(());
    }

    println!("🚨 {} active alert(s)\n", status.alerts.len());
    for (i, alert) in status.alerts.iter().enumerate() {
        println!("[{}] {} | {}", i + 1, alert.datetime, alert.device);
        println!("    {} / {}", alert.kind, alert.name);
        println!("    {}\n", alert.content);
    }

    Ok(())
}

//! Single-run orchestration: log in, extract, notify.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::Config;
use crate::notify::{Notifier, WatchEvent};
use crate::portal::{AlertParser, PortalBrowser};

/// Outcome of a single watch run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Whether the portal reported any active alerts.
    pub has_alert: bool,
    /// Number of alerts found.
    pub alert_count: usize,
    /// Whether alerts were delivered to a notification channel.
    pub notified: bool,
    /// Informational text from the portal, if any.
    pub message: Option<String>,
}

/// Watch run orchestrator.
pub struct Watcher {
    config: Config,
    notifier: Notifier,
    headless: bool,
}

impl Watcher {
    /// Create a new watcher.
    #[must_use]
    pub fn new(config: Config, notifier: Notifier, headless: bool) -> Self {
        Self {
            config,
            notifier,
            headless,
        }
    }

    /// The notifier this watcher delivers through.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Run one fetch-extract-notify cycle.
    ///
    /// Any failure in the browser session or in alert delivery propagates
    /// to the caller; the caller owns the run-failure notification path.
    pub async fn run_once(&self) -> Result<RunReport> {
        tracing::info!("Starting watch run");

        let browser = PortalBrowser::new(self.headless);
        let html = browser.fetch_status_page(&self.config).await?;

        let status = AlertParser::parse(&html);

        if !status.has_alert {
            tracing::info!(
                message = status.message.as_deref().unwrap_or("-"),
                "No active alerts"
            );
            return Ok(RunReport {
                has_alert: false,
                alert_count: 0,
                notified: false,
                message: status.message,
            });
        }

        let alert_count = status.alerts.len();
        tracing::warn!(count = alert_count, "Active alerts found on the portal");

        if !self.notifier.has_channels() {
            tracing::warn!("No notification channels configured; alerts will not be delivered");
            return Ok(RunReport {
                has_alert: true,
                alert_count,
                notified: false,
                message: status.message,
            });
        }

        let event = WatchEvent::AlertsDetected {
            alerts: status.alerts,
            timestamp: Utc::now(),
        };

        // A rejected webhook means the alerts were not relayed; that is a
        // run failure, not a quiet success.
        for (channel, result) in self.notifier.notify_and_wait(event).await {
            result.with_context(|| format!("Delivering alerts via {channel}"))?;
        }

        tracing::info!(count = alert_count, "Alerts delivered");
        Ok(RunReport {
            has_alert: true,
            alert_count,
            notified: true,
            message: status.message,
        })
    }
}

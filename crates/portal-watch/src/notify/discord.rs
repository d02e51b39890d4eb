//! Discord webhook notification channel.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::notify::error::ChannelError;
use crate::notify::events::WatchEvent;
use crate::notify::NotifyChannel;
use crate::portal::AlertRecord;

/// Environment variable for the Discord webhook URL.
const ENV_DISCORD_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";

/// Bot name shown on webhook messages.
const WEBHOOK_USERNAME: &str = "Portal Watch";

/// Discord webhook notification channel.
pub struct DiscordChannel {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl DiscordChannel {
    /// Create a new Discord channel from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let webhook_url = std::env::var(ENV_DISCORD_WEBHOOK_URL).ok();

        if webhook_url.is_some() {
            debug!("Discord notifications enabled");
        } else {
            debug!("Discord notifications disabled (DISCORD_WEBHOOK_URL not set)");
        }

        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a Discord channel with a specific webhook URL.
    #[must_use]
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url: Some(webhook_url),
            client: reqwest::Client::new(),
        }
    }

    /// Format an event as a Discord webhook payload.
    fn format_payload(event: &WatchEvent) -> DiscordPayload {
        let embed = DiscordEmbed {
            title: event.title(),
            color: event.severity().color(),
            footer: DiscordFooter {
                text: format!("portal-watch | {}", event.severity().as_str()),
            },
            timestamp: event.timestamp().to_rfc3339(),
        };

        DiscordPayload {
            username: WEBHOOK_USERNAME.to_string(),
            content: Self::format_content(event),
            embeds: vec![embed],
        }
    }

    /// Format the message body for an event.
    ///
    /// For alerts this renders one block per alert with the five portal
    /// fields under fixed labels, in table row order.
    fn format_content(event: &WatchEvent) -> String {
        match event {
            WatchEvent::AlertsDetected { alerts, timestamp } => {
                let mut content = format!(
                    "🚨 {} active alert(s) on the facility portal | {}",
                    alerts.len(),
                    timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                );

                for (i, alert) in alerts.iter().enumerate() {
                    content.push_str(&format!("\n\n{}", Self::format_alert(i + 1, alert)));
                }

                content
            }

            WatchEvent::RunFailed { message, timestamp } => {
                format!(
                    "⚠️ Portal monitor run failed | {}\n{message}",
                    timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
        }
    }

    /// Format a single alert block with fixed field labels.
    fn format_alert(index: usize, alert: &AlertRecord) -> String {
        format!(
            "[{index}] Time: {}\n    Device: {}\n    Type: {}\n    Alert: {}\n    Detail: {}",
            alert.datetime, alert.device, alert.kind, alert.name, alert.content
        )
    }
}

#[async_trait]
impl NotifyChannel for DiscordChannel {
    fn name(&self) -> &'static str {
        "discord"
    }

    fn enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn send(&self, event: &WatchEvent) -> Result<(), ChannelError> {
        let webhook_url = self
            .webhook_url
            .as_ref()
            .ok_or_else(|| ChannelError::NotConfigured("DISCORD_WEBHOOK_URL".to_string()))?;

        let payload = Self::format_payload(event);

        debug!(channel = "discord", event = %event.title(), "Sending notification");

        let response = self.client.post(webhook_url).json(&payload).send().await?;

        if response.status().is_success() {
            debug!(channel = "discord", "Notification sent successfully");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            warn!(
                channel = "discord",
                status = %status,
                body = %body,
                "Discord webhook request failed"
            );

            Err(ChannelError::Other(format!(
                "Discord returned {status}: {body}"
            )))
        }
    }
}

// =============================================================================
// Discord API types
// =============================================================================

#[derive(Debug, Serialize)]
struct DiscordPayload {
    username: String,
    content: String,
    embeds: Vec<DiscordEmbed>,
}

#[derive(Debug, Serialize)]
struct DiscordEmbed {
    title: String,
    color: u32,
    footer: DiscordFooter,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct DiscordFooter {
    text: String,
}

//! Webhook notification system for the portal monitor.
//!
//! Uses a trait-based channel design: [`NotifyChannel`] defines the
//! interface, [`DiscordChannel`] implements it for Discord webhooks, and
//! [`Notifier`] dispatches events to every enabled channel. Channels are
//! auto-detected from environment variables; with none configured the
//! notifier is a silent no-op.

mod discord;
mod error;
mod events;

pub use discord::DiscordChannel;
pub use error::ChannelError;
pub use events::{Severity, WatchEvent};

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

/// Trait for notification channels (Discord, Slack, etc.).
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Check if this channel is enabled/configured.
    fn enabled(&self) -> bool;

    /// Send a notification event to this channel.
    async fn send(&self, event: &WatchEvent) -> Result<(), ChannelError>;
}

/// Central notification dispatcher.
pub struct Notifier {
    channels: Vec<Arc<dyn NotifyChannel>>,
}

impl Notifier {
    /// Create a new notifier from environment variables.
    ///
    /// Auto-detects which channels are configured and enables them.
    #[must_use]
    pub fn from_env() -> Self {
        let mut channels: Vec<Arc<dyn NotifyChannel>> = vec![];

        let discord = DiscordChannel::from_env();
        if discord.enabled() {
            info!("Discord notifications enabled");
            channels.push(Arc::new(discord));
        }

        if channels.is_empty() {
            warn!("No notification channels configured");
        }

        Self { channels }
    }

    /// Create a notifier with specific channels.
    #[must_use]
    pub fn with_channels(channels: Vec<Arc<dyn NotifyChannel>>) -> Self {
        Self { channels }
    }

    /// Create a notifier with no channels (notifications become no-ops).
    #[must_use]
    pub const fn disabled() -> Self {
        Self { channels: vec![] }
    }

    /// Check if any notification channels are enabled.
    #[must_use]
    pub fn has_channels(&self) -> bool {
        !self.channels.is_empty()
    }

    /// Send a notification and wait for all channels to complete.
    ///
    /// Delivery is awaited and per-channel results are collected; a
    /// single-shot process cannot hand sends off to background tasks it
    /// will not outlive.
    pub async fn notify_and_wait(
        &self,
        event: WatchEvent,
    ) -> Vec<(String, Result<(), ChannelError>)> {
        let mut results = vec![];

        for channel in &self.channels {
            let channel_name = channel.name().to_string();
            let result = channel.send(&event).await;
            results.push((channel_name, result));
        }

        results
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::from_env()
    }
}

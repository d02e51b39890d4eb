//! Facility portal alert monitor.
//!
//! This crate provides:
//! - Headless login and status page capture using browser automation
//! - Alert table extraction from the rendered page
//! - Alert and run-failure delivery to a chat webhook

pub mod config;
pub mod notify;
pub mod portal;
pub mod runner;

// Re-export main types
pub use config::Config;
pub use notify::{ChannelError, DiscordChannel, Notifier, NotifyChannel, WatchEvent};
pub use portal::{AlertParser, AlertRecord, AlertStatus, PortalBrowser};
pub use runner::{RunReport, Watcher};

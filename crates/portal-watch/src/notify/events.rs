//! Notification event types for the portal monitor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::portal::AlertRecord;

/// Severity levels for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational - normal operations
    Info,
    /// Warning - something needs attention
    Warning,
    /// Critical - immediate action required
    Critical,
}

impl Severity {
    /// Get the embed color for this severity.
    #[must_use]
    pub const fn color(&self) -> u32 {
        match self {
            Self::Info => 0x0034_98db,     // Blue
            Self::Warning => 0x00f3_9c12,  // Orange
            Self::Critical => 0x00e7_4c3c, // Red
        }
    }

    /// Get display name for this severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Events that can trigger notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WatchEvent {
    /// The portal reported one or more active alerts.
    AlertsDetected {
        alerts: Vec<AlertRecord>,
        #[serde(default = "Utc::now")]
        timestamp: DateTime<Utc>,
    },

    /// A watch run failed before alerts could be delivered.
    RunFailed {
        message: String,
        #[serde(default = "Utc::now")]
        timestamp: DateTime<Utc>,
    },
}

impl WatchEvent {
    /// Short title for this event.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::AlertsDetected { alerts, .. } => {
                format!("Facility Alert ({} active)", alerts.len())
            }
            Self::RunFailed { .. } => "Monitor Run Failed".to_string(),
        }
    }

    /// Severity of this event.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::AlertsDetected { .. } => Severity::Critical,
            Self::RunFailed { .. } => Severity::Warning,
        }
    }

    /// When this event occurred.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::AlertsDetected { timestamp, .. } | Self::RunFailed { timestamp, .. } => {
                *timestamp
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Info.color(), 0x0034_98db);
        assert_eq!(Severity::Warning.color(), 0x00f3_9c12);
        assert_eq!(Severity::Critical.color(), 0x00e7_4c3c);
    }

    #[test]
    fn test_event_titles() {
        let event = WatchEvent::AlertsDetected {
            alerts: vec![],
            timestamp: Utc::now(),
        };
        assert_eq!(event.title(), "Facility Alert (0 active)");
        assert_eq!(event.severity(), Severity::Critical);

        let event = WatchEvent::RunFailed {
            message: "boom".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(event.title(), "Monitor Run Failed");
        assert_eq!(event.severity(), Severity::Warning);
    }
}

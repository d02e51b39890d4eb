//! Portal alert data types.

use serde::{Deserialize, Serialize};

/// One row of the portal's alert table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// When the alert was raised, as displayed by the portal.
    pub datetime: String,
    /// The device that raised the alert.
    pub device: String,
    /// Alert type/category as shown in the table.
    pub kind: String,
    /// Alert name.
    pub name: String,
    /// Alert detail text.
    pub content: String,
}

/// Parsed result of one status-page fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertStatus {
    /// Whether any alerts are active.
    pub has_alert: bool,
    /// Active alerts, in table row order.
    pub alerts: Vec<AlertRecord>,
    /// Informational text from the portal's "no alert" sentinel row, if shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AlertStatus {
    /// Status for a page without any recognizable alert table.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a status from parsed rows.
    ///
    /// `has_alert` follows from the alert list being non-empty.
    #[must_use]
    pub fn new(alerts: Vec<AlertRecord>, message: Option<String>) -> Self {
        Self {
            has_alert: !alerts.is_empty(),
            alerts,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_status() {
        let status = AlertStatus::empty();
        assert!(!status.has_alert);
        assert!(status.alerts.is_empty());
        assert!(status.message.is_none());
    }

    #[test]
    fn test_has_alert_follows_list() {
        let record = AlertRecord {
            datetime: "2026/08/29 10:00".to_string(),
            device: "AHU-1".to_string(),
            kind: "Fault".to_string(),
            name: "Fan failure".to_string(),
            content: "Supply fan stopped".to_string(),
        };

        let status = AlertStatus::new(vec![record], None);
        assert!(status.has_alert);

        let status = AlertStatus::new(vec![], Some("No alerts".to_string()));
        assert!(!status.has_alert);
    }
}

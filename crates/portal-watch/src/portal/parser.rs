//! Status page HTML parser.

use scraper::{Html, Selector};

use super::types::{AlertRecord, AlertStatus};

/// CSS class of the portal's alert table.
const ALERT_TABLE_SELECTOR: &str = "table.alert-table";

/// Parser for the portal's alert status page.
pub struct AlertParser;

impl AlertParser {
    /// Parse the alert table out of a rendered status page.
    ///
    /// The portal renders one of two row shapes inside the table: a
    /// single-cell row holding an informational "no alert" message, or a
    /// five-cell row describing an active alert. The sentinel row ends
    /// extraction immediately; whatever else the table holds, the status
    /// is "no alerts" with the sentinel text as the message. Rows with any
    /// other cell count are ignored. A page without the table at all is
    /// treated the same as a page reporting no alerts.
    #[must_use]
    pub fn parse(html: &str) -> AlertStatus {
        let document = Html::parse_document(html);

        let table_selector =
            Selector::parse(ALERT_TABLE_SELECTOR).expect("Invalid table selector");
        let row_selector = Selector::parse("tr").expect("Invalid row selector");
        let cell_selector = Selector::parse("td").expect("Invalid cell selector");

        let Some(table) = document.select(&table_selector).next() else {
            tracing::warn!(
                selector = ALERT_TABLE_SELECTOR,
                "Alert table not found in status page; treating as no alerts"
            );
            return AlertStatus::empty();
        };

        let mut alerts = Vec::new();

        for row in table.select(&row_selector) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect();

            let cell_count = cells.len();
            if cell_count == 1 {
                // The portal's "no alert" sentinel row; nothing after it counts.
                let message = cells.into_iter().next();
                tracing::debug!("Found no-alert sentinel row");
                return AlertStatus::new(Vec::new(), message);
            } else if let Ok([datetime, device, kind, name, content]) =
                <[String; 5]>::try_from(cells)
            {
                alerts.push(AlertRecord {
                    datetime,
                    device,
                    kind,
                    name,
                    content,
                });
            } else if cell_count != 0 {
                // Header rows use th cells and match zero td, so only
                // genuinely unexpected shapes are reported here.
                tracing::debug!(cells = cell_count, "Ignoring row with unexpected shape");
            }
        }

        tracing::debug!(count = alerts.len(), "Parsed alert table");
        AlertStatus::new(alerts, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert_row(datetime: &str, device: &str, kind: &str, name: &str, content: &str) -> String {
        format!(
            "<tr><td>{datetime}</td><td>{device}</td><td>{kind}</td>\
             <td>{name}</td><td>{content}</td></tr>"
        )
    }

    fn page(rows: &str) -> String {
        format!("<html><body><table class=\"alert-table\">{rows}</table></body></html>")
    }

    #[test]
    fn test_single_cell_row_is_no_alert() {
        let html = page("<tr><td>No alerts at this time.</td></tr>");
        let status = AlertParser::parse(&html);

        assert!(!status.has_alert);
        assert!(status.alerts.is_empty());
        assert_eq!(status.message.as_deref(), Some("No alerts at this time."));
    }

    #[test]
    fn test_five_cell_rows_become_alerts_in_order() {
        let rows = [
            alert_row("2026/08/29 09:00", "AHU-1", "Fault", "Fan failure", "Supply fan stopped"),
            alert_row("2026/08/29 09:05", "CH-2", "Warning", "High temp", "Chilled water 14C"),
            alert_row("2026/08/29 09:10", "PUMP-3", "Fault", "Trip", "Overcurrent trip"),
        ]
        .join("");
        let status = AlertParser::parse(&page(&rows));

        assert!(status.has_alert);
        assert_eq!(status.alerts.len(), 3);
        assert_eq!(status.alerts[0].device, "AHU-1");
        assert_eq!(status.alerts[1].device, "CH-2");
        assert_eq!(status.alerts[2].device, "PUMP-3");
        assert_eq!(status.alerts[2].content, "Overcurrent trip");
    }

    #[test]
    fn test_missing_table_is_no_alert() {
        let status = AlertParser::parse("<html><body><p>maintenance</p></body></html>");

        assert!(!status.has_alert);
        assert!(status.alerts.is_empty());
        assert!(status.message.is_none());
    }

    #[test]
    fn test_other_row_shapes_are_ignored() {
        let rows = format!(
            "<tr><th>Time</th><th>Device</th></tr>\
             <tr><td>a</td><td>b</td><td>c</td></tr>\
             {}\
             <tr><td>a</td><td>b</td><td>c</td><td>d</td><td>e</td><td>f</td></tr>",
            alert_row("2026/08/29 09:00", "AHU-1", "Fault", "Fan failure", "Supply fan stopped"),
        );
        let status = AlertParser::parse(&page(&rows));

        assert!(status.has_alert);
        assert_eq!(status.alerts.len(), 1);
        assert_eq!(status.alerts[0].name, "Fan failure");
    }

    #[test]
    fn test_sentinel_row_short_circuits() {
        // The sentinel row ends extraction; rows after it are not consulted.
        let rows = format!(
            "<tr><td>No alerts at this time.</td></tr>{}",
            alert_row("2026/08/29 09:00", "AHU-1", "Fault", "Fan failure", "Supply fan stopped"),
        );
        let status = AlertParser::parse(&page(&rows));

        assert!(!status.has_alert);
        assert!(status.alerts.is_empty());
        assert_eq!(status.message.as_deref(), Some("No alerts at this time."));
    }

    #[test]
    fn test_cell_text_is_trimmed() {
        let html = page("<tr><td>  2026/08/29 09:00 </td><td> AHU-1</td><td>Fault </td><td>Fan failure</td><td>\n Supply fan stopped \n</td></tr>");
        let status = AlertParser::parse(&html);

        assert_eq!(status.alerts[0].datetime, "2026/08/29 09:00");
        assert_eq!(status.alerts[0].content, "Supply fan stopped");
    }
}

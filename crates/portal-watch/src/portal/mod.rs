//! Facility portal access module.
//!
//! Provides the browser session driver and status page extraction.

mod browser;
mod parser;
mod types;

pub use browser::PortalBrowser;
pub use parser::AlertParser;
pub use types::{AlertRecord, AlertStatus};

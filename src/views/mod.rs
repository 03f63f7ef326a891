//! Terminal rendering of issue data.
//!
//! Each view is a plain struct holding what it needs to draw itself; none of
//! them own list state. `IssueList::render` and the CLI commands compose them.

pub mod add;
pub mod detail;
pub mod filter;
pub mod icons;
pub mod table;

use chrono::{DateTime, Utc};
use console::style;

/// Calendar date in the `Sun Mar 04 2012` form used across the tables.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// One-line rendering of the notification toast.
pub fn render_toast(message: &str) -> String {
    format!(
        "{}{} {}",
        icons::BELL,
        style("Update Status").bold(),
        message
    )
}

//! The first static version of the issue page: a fixed set of issues held
//! in an explicitly created store, loaded into the table after a delay that
//! stands in for a network round trip.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use console::style;

use crate::issue::{Issue, IssueStatus};
use crate::views::table::IssueTable;

pub const LOAD_DELAY: Duration = Duration::from_millis(500);

/// Read-only source of seed issues.
#[derive(Debug, Clone)]
pub struct SeedStore {
    issues: Vec<Issue>,
}

impl SeedStore {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// The two issues the prototype page starts with.
    pub fn initial() -> Self {
        Self::new(vec![
            Issue {
                id: 1,
                status: IssueStatus::New,
                owner: Some("Maven".into()),
                effort: Some(5),
                created: Utc.with_ymd_and_hms(2012, 3, 4, 0, 0, 0).single(),
                due: None,
                title: "Error in console when clicking Add".into(),
                description: None,
            },
            Issue {
                id: 2,
                status: IssueStatus::Assigned,
                owner: Some("Flash".into()),
                effort: Some(15),
                created: Utc.with_ymd_and_hms(2002, 3, 12, 0, 0, 0).single(),
                due: Utc.with_ymd_and_hms(2004, 5, 4, 0, 0, 0).single(),
                title: "Missing bottom border on panel".into(),
                description: None,
            },
        ])
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

pub struct PrototypeTable {
    store: Arc<SeedStore>,
    issues: Vec<Issue>,
    delay: Duration,
}

impl PrototypeTable {
    pub fn new(store: Arc<SeedStore>) -> Self {
        Self {
            store,
            issues: Vec::new(),
            delay: LOAD_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub async fn load(&mut self) {
        tokio::time::sleep(self.delay).await;
        self.issues = self.store.issues().to_vec();
    }

    pub fn render(&self) -> String {
        IssueTable::new(&self.issues).render()
    }
}

/// Whole prototype page: title, filter and add placeholders around the table.
pub fn render_prototype_page(table: &PrototypeTable) -> String {
    let rule = style("─".repeat(40)).dim().to_string();
    format!(
        "{}\n{}\n{}\n{}{}\n{}\n",
        style("Issue Tracker").bold().underlined(),
        style("This is a placeholder for the issue filter.").dim(),
        rule,
        table.render(),
        rule,
        style("This is a placeholder for the issue add form.").dim(),
    )
}

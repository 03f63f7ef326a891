use std::sync::LazyLock;

use console::style;
use regex::Regex;

use super::icons;
use crate::issue::IssueStatus;
use crate::navigation::{ISSUES_PATH, Location, Navigator, SearchParams};

static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*$").expect("digit pattern is a valid regex"));

/// Editable copy of the filter, applied by navigating to a new search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilterForm {
    status: String,
    effort_min: String,
    effort_max: String,
    changed: bool,
}

impl IssueFilterForm {
    pub fn from_location(location: &Location) -> Self {
        let params = SearchParams::parse(&location.search);
        Self {
            status: params.get("status").unwrap_or_default().to_string(),
            effort_min: params.get("effortMin").unwrap_or_default().to_string(),
            effort_max: params.get("effortMax").unwrap_or_default().to_string(),
            changed: false,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn effort_min(&self) -> &str {
        &self.effort_min
    }

    pub fn effort_max(&self) -> &str {
        &self.effort_max
    }

    /// Whether the form differs from the location it was last reset to.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// `None` selects all statuses.
    pub fn set_status(&mut self, status: Option<IssueStatus>) {
        self.status = status.map(|s| s.as_str().to_string()).unwrap_or_default();
        self.changed = true;
    }

    /// Accepts digits only; anything else is ignored and `false` returned.
    pub fn set_effort_min(&mut self, value: &str) -> bool {
        accept_digits(&mut self.effort_min, value, &mut self.changed)
    }

    pub fn set_effort_max(&mut self, value: &str) -> bool {
        accept_digits(&mut self.effort_max, value, &mut self.changed)
    }

    /// Search string for the current selections; empty fields are left out.
    pub fn search(&self) -> String {
        let mut params = SearchParams::default();
        if !self.status.is_empty() {
            params.append("status", &self.status);
        }
        if !self.effort_min.is_empty() {
            params.append("effortMin", &self.effort_min);
        }
        if !self.effort_max.is_empty() {
            params.append("effortMax", &self.effort_max);
        }
        params.to_search()
    }

    /// Navigate to the issue list with this filter.
    pub fn apply<N: Navigator + ?Sized>(&mut self, navigator: &mut N) {
        navigator.push(Location::new(ISSUES_PATH, self.search()));
        self.changed = false;
    }

    /// Discard edits and re-read the filter from `location`.
    pub fn reset(&mut self, location: &Location) {
        *self = Self::from_location(location);
    }

    pub fn render(&self) -> String {
        let shown = |v: &str| {
            if v.is_empty() {
                style("any".to_string()).dim().to_string()
            } else {
                v.to_string()
            }
        };
        let status = if self.status.is_empty() {
            style("All".to_string()).dim().to_string()
        } else {
            self.status.clone()
        };
        let mut out = format!(
            "{}{} status: {}  effort between: {} - {}",
            icons::FILTER,
            style("Filter").bold(),
            status,
            shown(&self.effort_min),
            shown(&self.effort_max)
        );
        if self.changed {
            out.push_str(&format!("  {}", style("(not applied)").yellow()));
        }
        out
    }
}

fn accept_digits(field: &mut String, value: &str, changed: &mut bool) -> bool {
    if !DIGITS_ONLY.is_match(value) {
        return false;
    }
    *field = value.to_string();
    *changed = true;
    true
}

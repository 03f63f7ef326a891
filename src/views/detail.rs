use console::style;
use serde_json::Value;
use tracing::debug;

use super::icons;
use crate::graphql::{GraphQlTransport, Variables, graphql_fetch, queries, take_field};
use crate::issue::Issue;

/// Description panel for a single issue, fetched on its own.
#[derive(Debug, Clone, Default)]
pub struct IssueDetail {
    issue: Option<Issue>,
    loaded_id: Option<i64>,
}

impl IssueDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Option<&Issue> {
        self.issue.as_ref()
    }

    /// Fetch `id` unless it is already the one displayed.
    pub async fn show<T, F>(&mut self, transport: &T, id: i64, report: F)
    where
        T: GraphQlTransport + ?Sized,
        F: FnMut(String),
    {
        if self.loaded_id == Some(id) {
            return;
        }
        self.load(transport, id, report).await;
    }

    /// Fetch `id`. Whatever was displayed before is cleared, so a failed or
    /// empty fetch leaves nothing shown rather than another issue.
    pub async fn load<T, F>(&mut self, transport: &T, id: i64, mut report: F)
    where
        T: GraphQlTransport + ?Sized,
        F: FnMut(String),
    {
        let mut vars = Variables::new();
        vars.insert("id".into(), Value::from(id));
        debug!(id, "loading issue detail");

        let data = graphql_fetch(transport, queries::ISSUE_DETAIL, vars, &mut report).await;
        self.loaded_id = Some(id);
        self.issue = data.and_then(|mut d| {
            take_field::<Issue>(&mut d, "issue").unwrap_or_else(|message| {
                report(message);
                None
            })
        });
    }

    /// Description wrapped to `width` columns; empty when nothing is loaded.
    pub fn render(&self, width: usize) -> String {
        let Some(issue) = &self.issue else {
            return String::new();
        };
        let mut out = format!(
            "{}{}\n",
            icons::ISSUE,
            style(format!("Description of issue {}", issue.id)).bold()
        );
        let description = issue.description.as_deref().unwrap_or_default();
        if description.is_empty() {
            out.push_str(&style("(no description)").dim().to_string());
            out.push('\n');
        } else {
            for line in textwrap::wrap(description, width.max(20)) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}

/// Current terminal width, or 80 columns when not attached to one.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(80)
}

//! The issue list controller.
//!
//! `IssueList` owns the authoritative list of issues for the current filter
//! and the single notification slot. Every mutation either patches exactly
//! the affected element from the server's response or falls back to a full
//! reload, so the list is never left half-updated.
//!
//! | Operation       | Success                          | Failure               |
//! |-----------------|----------------------------------|-----------------------|
//! | `load`          | list replaced wholesale          | list untouched        |
//! | `create_issue`  | full reload                      | list untouched        |
//! | `close_issue`   | element replaced in place        | full reload           |
//! | `delete_issue`  | leave detail view, splice, toast | full reload           |

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::filter::IssueFilter;
use crate::graphql::{Data, GraphQlTransport, Variables, graphql_fetch, queries, take_field};
use crate::issue::{CreatedIssue, Issue, IssueInput};
use crate::navigation::{ISSUES_PATH, Location, Navigator, detail_path};
use crate::notification::Notification;
use crate::views::table::IssueTable;

pub struct IssueList<T, N> {
    transport: T,
    navigator: N,
    issues: Vec<Issue>,
    notification: Notification,
    /// Search string of the location the current list was loaded for.
    loaded_search: Option<String>,
}

impl<T, N> IssueList<T, N>
where
    T: GraphQlTransport,
    N: Navigator,
{
    pub fn new(transport: T, navigator: N) -> Self {
        Self {
            transport,
            navigator,
            issues: Vec::new(),
            notification: Notification::default(),
            loaded_search: None,
        }
    }

    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = notification;
        self
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Initial load.
    pub async fn mount(&mut self) {
        self.load().await;
    }

    /// Reload if the filter part of the location changed since the last load.
    /// Returns whether a reload happened.
    pub async fn location_changed(&mut self) -> bool {
        let search = self.navigator.location().search;
        if self.loaded_search.as_deref() == Some(search.as_str()) {
            return false;
        }
        self.load().await;
        true
    }

    /// Fetch the list for the current filter and replace local state with it.
    pub async fn load(&mut self) {
        let location = self.navigator.location();
        let vars = IssueFilter::from_search(&location.search).to_variables();
        self.loaded_search = Some(location.search);

        let data = graphql_fetch(&self.transport, queries::ISSUE_LIST, vars, |m| {
            self.notification.show(m)
        })
        .await;

        if let Some(issues) = self.field::<Vec<Issue>>(data, "issueList") {
            info!(count = issues.len(), "loaded issue list");
            self.issues = issues;
        }
    }

    /// Create an issue and reload on success. Returns the new id.
    pub async fn create_issue(&mut self, issue: IssueInput) -> Option<i64> {
        let issue = match serde_json::to_value(&issue) {
            Ok(value) => value,
            Err(e) => {
                self.notification
                    .show(format!("Could not encode issue: {}", e));
                return None;
            }
        };
        let mut vars = Variables::new();
        vars.insert("issue".into(), issue);

        let data = graphql_fetch(&self.transport, queries::ISSUE_ADD, vars, |m| {
            self.notification.show(m)
        })
        .await;

        let created = self.field::<CreatedIssue>(data, "issueAdd")?;
        info!(id = created.id, "created issue");
        self.load().await;
        Some(created.id)
    }

    /// Close the issue at `index`. On success the element is replaced by the
    /// server's copy; otherwise the list is reloaded.
    pub async fn close_issue(&mut self, index: usize) -> bool {
        let Some(id) = self.id_at(index) else {
            return false;
        };

        let data = graphql_fetch(&self.transport, queries::ISSUE_CLOSE, id_variables(id), |m| {
            self.notification.show(m)
        })
        .await;

        match self.field::<Issue>(data, "issueUpdate") {
            Some(updated) => {
                debug!(id, index, "replacing closed issue in place");
                if let Some(slot) = self.issues.get_mut(index) {
                    *slot = updated;
                }
                true
            }
            None => {
                self.load().await;
                false
            }
        }
    }

    /// Delete the issue at `index`. A confirmed deletion leaves the issue's
    /// detail view (if open) before the element is removed.
    pub async fn delete_issue(&mut self, index: usize) -> bool {
        let Some(id) = self.id_at(index) else {
            return false;
        };

        let data = graphql_fetch(&self.transport, queries::ISSUE_DELETE, id_variables(id), |m| {
            self.notification.show(m)
        })
        .await;

        let deleted = self.field::<bool>(data, "issueDelete").unwrap_or(false);
        if !deleted {
            self.load().await;
            return false;
        }

        let location = self.navigator.location();
        if location.pathname == detail_path(id) {
            self.navigator
                .push(Location::new(ISSUES_PATH, location.search));
        }
        if index < self.issues.len() {
            self.issues.remove(index);
        }
        info!(id, "deleted issue");
        self.notification
            .show(format!("Deleted issue {} successfully!", id));
        true
    }

    pub fn show_message(&mut self, message: impl Into<String>) {
        self.notification.show(message);
    }

    pub fn dismiss_toast(&mut self) {
        self.notification.dismiss();
    }

    /// Table of the current list, followed by the toast when it is visible.
    pub fn render(&mut self) -> String {
        let mut out = IssueTable::new(&self.issues).render();
        if self.notification.expire() {
            out.push('\n');
            out.push_str(&crate::views::render_toast(self.notification.message()));
        }
        out
    }

    /// Decode one field of `data`, showing a message when it has the wrong shape.
    fn field<U: DeserializeOwned>(&mut self, data: Option<Data>, name: &str) -> Option<U> {
        let mut data = data?;
        take_field(&mut data, name).unwrap_or_else(|message| {
            self.notification.show(message);
            None
        })
    }

    fn id_at(&mut self, index: usize) -> Option<i64> {
        let id = self.issues.get(index).map(|issue| issue.id);
        if id.is_none() {
            self.notification
                .show(format!("No issue at position {}", index));
        }
        id
    }
}

fn id_variables(id: i64) -> Variables {
    let mut vars = Variables::new();
    vars.insert("id".into(), Value::from(id));
    vars
}

/// Canonical JSON form of an issue as the API returns it, for scripted
/// responses.
#[cfg(test)]
pub(crate) fn issue_json(id: i64, status: &str, effort: u32) -> Value {
    serde_json::json!({
        "id": id,
        "title": format!("Issue {}", id),
        "status": status,
        "owner": "Maven",
        "effort": effort,
        "created": "2019-01-15T00:00:00Z",
        "due": null
    })
}

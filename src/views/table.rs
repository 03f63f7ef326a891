use console::style;

use super::format_date;
use crate::issue::{Issue, IssueStatus};

const HEADERS: [&str; 8] = [
    "#", "ID", "Status", "Owner", "Created", "Effort", "Due Date", "Title",
];

/// One issue as table cells. `position` is the index close/delete address.
pub struct IssueRow<'a> {
    pub position: usize,
    pub issue: &'a Issue,
}

impl IssueRow<'_> {
    pub fn cells(&self) -> [String; 8] {
        let issue = self.issue;
        [
            self.position.to_string(),
            issue.id.to_string(),
            issue.status.to_string(),
            issue.owner.clone().unwrap_or_default(),
            issue.created.as_ref().map(format_date).unwrap_or_default(),
            issue.effort.map(|e| e.to_string()).unwrap_or_default(),
            issue.due.as_ref().map(format_date).unwrap_or_default(),
            issue.title.clone(),
        ]
    }
}

pub struct IssueTable<'a> {
    issues: &'a [Issue],
}

impl<'a> IssueTable<'a> {
    pub fn new(issues: &'a [Issue]) -> Self {
        Self { issues }
    }

    pub fn rows(&self) -> impl Iterator<Item = IssueRow<'a>> + 'a {
        self.issues
            .iter()
            .enumerate()
            .map(|(position, issue)| IssueRow { position, issue })
    }

    pub fn render(&self) -> String {
        let rows: Vec<(IssueStatus, [String; 8])> = self
            .rows()
            .map(|row| (row.issue.status, row.cells()))
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for (_, cells) in &rows {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header = HEADERS
            .iter()
            .zip(widths)
            .map(|(h, w)| format!("{:<w$}", h, w = w))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&style(header.trim_end()).bold().to_string());
        out.push('\n');

        if rows.is_empty() {
            out.push_str(&style("No issues match the current filter.").dim().to_string());
            out.push('\n');
            return out;
        }

        for (status, cells) in rows {
            let line = cells
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(col, (cell, w))| {
                    let padded = format!("{:<w$}", cell, w = w);
                    if col == 2 {
                        status_style(status, padded)
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn status_style(status: IssueStatus, text: String) -> String {
    match status {
        IssueStatus::New => style(text).cyan().to_string(),
        IssueStatus::Assigned => style(text).yellow().to_string(),
        IssueStatus::Fixed => style(text).green().to_string(),
        IssueStatus::Closed => style(text).dim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Vec<Issue> {
        vec![
            Issue {
                id: 1,
                title: "Error in console when clicking Add".into(),
                status: IssueStatus::New,
                owner: Some("Maven".into()),
                effort: Some(5),
                created: Some(Utc.with_ymd_and_hms(2012, 3, 4, 0, 0, 0).unwrap()),
                due: None,
                description: None,
            },
            Issue {
                id: 2,
                title: "Missing bottom border on panel".into(),
                status: IssueStatus::Assigned,
                owner: None,
                effort: None,
                created: None,
                due: Some(Utc.with_ymd_and_hms(2004, 5, 4, 0, 0, 0).unwrap()),
                description: None,
            },
        ]
    }

    #[test]
    fn test_row_cells_leave_missing_fields_empty() {
        let issues = sample();
        let row = IssueRow {
            position: 1,
            issue: &issues[1],
        };
        let cells = row.cells();
        assert_eq!(cells[0], "1");
        assert_eq!(cells[3], "");
        assert_eq!(cells[4], "");
        assert_eq!(cells[5], "");
        assert_eq!(cells[6], "Tue May 04 2004");
    }

    #[test]
    fn test_render_lists_every_issue_in_order() {
        let issues = sample();
        let out = IssueTable::new(&issues).render();
        let plain = console::strip_ansi_codes(&out).to_string();
        let lines: Vec<&str> = plain.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#"));
        assert!(lines[0].ends_with("Title"));
        assert!(lines[1].contains("Sun Mar 04 2012"));
        assert!(lines[1].ends_with("Error in console when clicking Add"));
        assert!(lines[2].contains("Assigned"));
        assert!(lines[2].ends_with("Missing bottom border on panel"));
    }

    #[test]
    fn test_render_empty_table() {
        let out = IssueTable::new(&[]).render();
        let plain = console::strip_ansi_codes(&out).to_string();
        assert!(plain.contains("No issues match the current filter."));
    }
}

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IssueStatus {
    New,
    Assigned,
    Fixed,
    Closed,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::New,
        IssueStatus::Assigned,
        IssueStatus::Fixed,
        IssueStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Assigned => "Assigned",
            Self::Fixed => "Fixed",
            Self::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Assigned" => Ok(Self::Assigned),
            "Fixed" => Ok(Self::Fixed),
            "Closed" => Ok(Self::Closed),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

/// An issue as returned by the API.
///
/// `id` and `created` are assigned by the server and never change. Every other
/// field may be missing from a response, depending on what the query selected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_status")]
    pub status: IssueStatus,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub effort: Option<u32>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_status() -> IssueStatus {
    IssueStatus::New
}

/// Fields sent to `issueAdd`. Unset fields are left to server defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effort: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result payload of `issueAdd`, which only selects the new id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in IssueStatus::ALL {
            assert_eq!(status.as_str().parse::<IssueStatus>().unwrap(), status);
        }
        assert!("closed".parse::<IssueStatus>().is_err());
    }

    #[test]
    fn test_issue_deserialize_list_selection() {
        let json = r#"{
            "id": 7,
            "title": "Missing bottom border on panel",
            "status": "Assigned",
            "owner": "Flash",
            "created": "2019-01-15T00:00:00.000Z",
            "effort": 15,
            "due": null
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, 7);
        assert_eq!(issue.status, IssueStatus::Assigned);
        assert_eq!(issue.owner.as_deref(), Some("Flash"));
        assert_eq!(issue.effort, Some(15));
        assert_eq!(
            issue.created,
            Some(Utc.with_ymd_and_hms(2019, 1, 15, 0, 0, 0).unwrap())
        );
        assert!(issue.due.is_none());
        assert!(issue.description.is_none());
    }

    #[test]
    fn test_issue_deserialize_detail_selection() {
        let json = r#"{"id": 3, "description": "Steps to reproduce"}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, 3);
        assert_eq!(issue.description.as_deref(), Some("Steps to reproduce"));
        assert!(issue.title.is_empty());
    }

    #[test]
    fn test_issue_input_omits_unset_fields() {
        let input = IssueInput {
            title: "Broken link".to_string(),
            owner: Some("Maven".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "Broken link", "owner": "Maven"})
        );
    }
}

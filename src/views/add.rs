use anyhow::{Result, bail};
use chrono::{DateTime, Duration, Utc};

use crate::issue::IssueInput;

/// New issues are due this many days after they are filed.
pub const DEFAULT_DUE_DAYS: i64 = 10;

#[derive(Debug, Clone, Default)]
pub struct IssueAddForm {
    pub owner: String,
    pub title: String,
}

impl IssueAddForm {
    /// Turn the form into an `IssueInput` and clear it. The form is left as
    /// is when the title is empty.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<IssueInput> {
        let title = self.title.trim();
        if title.is_empty() {
            bail!("Title is required");
        }
        let owner = self.owner.trim();
        let input = IssueInput {
            title: title.to_string(),
            owner: (!owner.is_empty()).then(|| owner.to_string()),
            due: Some(now + Duration::days(DEFAULT_DUE_DAYS)),
            ..Default::default()
        };
        *self = Self::default();
        Ok(input)
    }
}

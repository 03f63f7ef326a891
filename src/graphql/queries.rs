//! Query and mutation documents sent to the issue API.

pub const ISSUE_LIST: &str = "query issueList(
  $status: StatusType
  $effortMin: Int
  $effortMax: Int
) {
  issueList(
    status: $status
    effortMin: $effortMin
    effortMax: $effortMax
  ) {
    id title status owner
    created effort due
  }
}";

pub const ISSUE_DETAIL: &str = "query issue($id: Int!) {
  issue(id: $id) {
    id description
  }
}";

pub const ISSUE_ADD: &str = "mutation issueAdd($issue: IssueInputs!) {
  issueAdd(issue: $issue) {
    id
  }
}";

pub const ISSUE_CLOSE: &str = "mutation issueClose($id: Int!) {
  issueUpdate(id: $id, changes: {status: Closed}) {
    id title status owner
    effort created due description
  }
}";

pub const ISSUE_DELETE: &str = "mutation issueDelete($id: Int!) {
  issueDelete(id: $id)
}";

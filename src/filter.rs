use serde_json::Value;

use crate::graphql::Variables;
use crate::navigation::SearchParams;

/// Selection criteria read from the location's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub status: Option<String>,
    pub effort_min: Option<i32>,
    pub effort_max: Option<i32>,
}

impl IssueFilter {
    pub fn from_search(search: &str) -> Self {
        let params = SearchParams::parse(search);
        Self {
            status: params
                .get("status")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            effort_min: params.get("effortMin").and_then(parse_leading_int),
            effort_max: params.get("effortMax").and_then(parse_leading_int),
        }
    }

    /// Variables for `issueList`; unset criteria are left out entirely.
    pub fn to_variables(&self) -> Variables {
        let mut vars = Variables::new();
        if let Some(status) = &self.status {
            vars.insert("status".into(), Value::from(status.clone()));
        }
        if let Some(min) = self.effort_min {
            vars.insert("effortMin".into(), Value::from(min));
        }
        if let Some(max) = self.effort_max {
            vars.insert("effortMax".into(), Value::from(max));
        }
        vars
    }
}

/// Parse the integer at the start of `s`: leading whitespace, an optional
/// sign, then decimal digits. Anything after the digits is ignored.
/// Returns `None` when no digits follow or the value overflows `i32`.
pub fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_params_yields_empty_variables() {
        let filter = IssueFilter::from_search("");
        assert_eq!(filter, IssueFilter::default());
        assert!(filter.to_variables().is_empty());
    }

    #[test]
    fn test_status_and_min_without_max() {
        let vars = IssueFilter::from_search("?status=Assigned&effortMin=3").to_variables();
        assert_eq!(
            Value::Object(vars),
            json!({"status": "Assigned", "effortMin": 3})
        );
    }

    #[test]
    fn test_unparsable_efforts_are_omitted() {
        for search in [
            "?effortMin=abc&effortMax=",
            "?effortMin=-&effortMax=%20",
            "?effortMin=99999999999&effortMax=x1",
        ] {
            let vars = IssueFilter::from_search(search).to_variables();
            assert!(!vars.contains_key("effortMin"), "{search}");
            assert!(!vars.contains_key("effortMax"), "{search}");
        }
    }

    #[test]
    fn test_empty_status_is_not_sent() {
        let vars = IssueFilter::from_search("?status=&effortMax=10").to_variables();
        assert_eq!(Value::Object(vars), json!({"effortMax": 10}));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("3"), Some(3));
        assert_eq!(parse_leading_int("  42"), Some(42));
        assert_eq!(parse_leading_int("3abc"), Some(3));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("+8"), Some(8));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("- 3"), None);
        assert_eq!(parse_leading_int("1.5"), Some(1));
    }
}

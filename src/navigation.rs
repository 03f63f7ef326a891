//! Navigation state: the current location and a history to push onto.
//!
//! The list controller reads its filter from `Location::search` and pushes
//! a new location when the detail view must be left.

use reqwest::Url;

pub const ISSUES_PATH: &str = "/issues";

/// Path of the detail view for one issue.
pub fn detail_path(id: i64) -> String {
    format!("{}/{}", ISSUES_PATH, id)
}

/// Issue id shown by a detail path, if `pathname` is one.
pub fn detail_id(pathname: &str) -> Option<i64> {
    pathname
        .strip_prefix(ISSUES_PATH)?
        .strip_prefix('/')?
        .parse()
        .ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
        }
    }

    pub fn issues() -> Self {
        Self::new(ISSUES_PATH, "")
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::issues()
    }
}

/// Source of the current location and sink for navigation.
pub trait Navigator: Send {
    fn location(&self) -> Location;
    fn push(&mut self, location: Location);
}

/// In-process history stack.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
}

impl MemoryHistory {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::issues())
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> Location {
        self.entries.last().cloned().unwrap_or_default()
    }

    fn push(&mut self, location: Location) {
        self.entries.push(location);
    }
}

/// Decoded `key=value` pairs of a query string, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    pub fn parse(search: &str) -> Self {
        let query = search.strip_prefix('?').unwrap_or(search);
        if query.is_empty() {
            return Self::default();
        }
        let mut url = base_url();
        url.set_query(Some(query));
        Self {
            pairs: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as a search string with a leading `?`, or empty.
    pub fn to_search(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let mut url = base_url();
        url.query_pairs_mut()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        format!("?{}", url.query().unwrap_or_default())
    }
}

fn base_url() -> Url {
    Url::parse("http://localhost/").expect("static base URL is valid")
}

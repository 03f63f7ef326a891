//! A small JSON document store on top of a local libsql database.
//!
//! Each collection is a table of `(_id, body)` rows where `body` is the full
//! JSON document. Every operation is a plain `async fn`; `run_with_callback`
//! and `run_awaited` show the same insert-then-find operation driven with a
//! completion callback and with `.await`.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use futures::FutureExt;
use libsql::{Builder, Connection, Database};
use regex::Regex;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::errors::StoreError;

pub type Document = serde_json::Map<String, Value>;

pub const ID_FIELD: &str = "_id";

static COLLECTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("collection pattern is a valid regex")
});

/// Whether `name` can be used as a collection (and table) name.
pub fn is_valid_collection_name(name: &str) -> bool {
    COLLECTION_NAME.is_match(name)
}

/// Handle on one database file. Every `DocumentDb` and `Collection` taken
/// from it shares its connection, which stays open until the client and
/// all of those handles are dropped.
pub struct DocumentClient {
    _database: Database,
    conn: Arc<Connection>,
    name: String,
}

impl DocumentClient {
    /// Open the database at `location` (a file path, or `:memory:`).
    pub async fn connect(location: &str) -> Result<Self, StoreError> {
        let open_err = |source| StoreError::Open {
            location: location.to_string(),
            source,
        };
        let database = Builder::new_local(location)
            .build()
            .await
            .map_err(open_err)?;
        let conn = database.connect().map_err(open_err)?;
        debug!(location, "connected to document store");
        Ok(Self {
            _database: database,
            conn: Arc::new(conn),
            name: database_name(location),
        })
    }

    /// The database named by the location.
    pub fn db(&self) -> DocumentDb {
        DocumentDb {
            conn: self.conn.clone(),
            name: self.name.clone(),
        }
    }

    /// Drop the client together with collections taken from it, so the
    /// connection is released once this returns.
    pub fn close(self, collections: impl IntoIterator<Item = Collection>) {
        let collections: Vec<Collection> = collections.into_iter().collect();
        debug!(
            name = %self.name,
            collections = collections.len(),
            "closing document store"
        );
        drop(collections);
        drop(self);
    }
}

fn database_name(location: &str) -> String {
    if location == ":memory:" {
        return "memory".to_string();
    }
    Path::new(location)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| location.to_string())
}

pub struct DocumentDb {
    conn: Arc<Connection>,
    name: String,
}

impl DocumentDb {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open a collection, creating it on first use.
    pub async fn collection(&self, name: &str) -> Result<Collection, StoreError> {
        if !is_valid_collection_name(name) {
            return Err(StoreError::InvalidCollection(name.to_string()));
        }
        self.conn
            .execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (_id TEXT PRIMARY KEY, body TEXT NOT NULL)",
                    name
                ),
                (),
            )
            .await?;
        Ok(Collection {
            conn: self.conn.clone(),
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOneResult {
    pub inserted_id: String,
}

pub struct Collection {
    conn: Arc<Connection>,
    name: String,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store one document, assigning a UUID `_id` when it has none.
    /// A non-string `_id` is stored in its JSON text form.
    pub async fn insert_one(&self, document: Value) -> Result<InsertOneResult, StoreError> {
        let Value::Object(mut document) = document else {
            return Err(StoreError::NotAnObject);
        };
        let id = match document.get(ID_FIELD) {
            Some(Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };
        // Ids are always stored as strings so they can be matched by `find`.
        document.insert(ID_FIELD.to_string(), Value::from(id.clone()));
        let body = serde_json::to_string(&document)?;
        self.conn
            .execute(
                &format!("INSERT INTO {} (_id, body) VALUES (?1, ?2)", self.name),
                libsql::params![id.as_str(), body.as_str()],
            )
            .await?;
        info!(collection = %self.name, id = %id, "inserted document");
        Ok(InsertOneResult { inserted_id: id })
    }

    /// Documents whose top-level fields equal every field of `filter`.
    pub fn find(&self, filter: Document) -> Cursor<'_> {
        Cursor {
            collection: self,
            filter,
        }
    }
}

pub struct Cursor<'a> {
    collection: &'a Collection,
    filter: Document,
}

impl Cursor<'_> {
    pub async fn to_array(self) -> Result<Vec<Document>, StoreError> {
        let mut rows = self
            .collection
            .conn
            .query(
                &format!("SELECT body FROM {} ORDER BY rowid", self.collection.name),
                (),
            )
            .await?;

        let mut found = Vec::new();
        while let Some(row) = rows.next().await? {
            let body: String = row.get(0)?;
            let document: Document = serde_json::from_str(&body)?;
            if matches_filter(&document, &self.filter) {
                found.push(document);
            }
        }
        Ok(found)
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

/// Outcome of `insert_and_find`: the insert result and what `find` returned.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertAndFind {
    pub inserted: InsertOneResult,
    pub found: Vec<Document>,
}

/// Insert `document` and read it back by its `_id`.
pub async fn insert_and_find(
    collection: &Collection,
    document: Value,
) -> Result<InsertAndFind, StoreError> {
    let inserted = collection.insert_one(document).await?;
    let mut filter = Document::new();
    filter.insert(
        ID_FIELD.to_string(),
        Value::from(inserted.inserted_id.clone()),
    );
    let found = collection.find(filter).to_array().await?;
    Ok(InsertAndFind { inserted, found })
}

/// Connect, run `insert_and_find` on `collection`, and close the client
/// whether or not the operation succeeded.
pub async fn insert_and_find_at(
    location: String,
    collection: String,
    document: Value,
) -> Result<InsertAndFind, StoreError> {
    let client = DocumentClient::connect(&location).await?;
    let collection = match client.db().collection(&collection).await {
        Ok(collection) => collection,
        Err(e) => {
            client.close(Option::<Collection>::None);
            return Err(e);
        }
    };
    let outcome = insert_and_find(&collection, document).await;
    client.close([collection]);
    outcome
}

/// Run the operation on a background task and hand its outcome to `callback`.
pub fn run_with_callback<F>(
    location: String,
    collection: String,
    document: Value,
    callback: F,
) -> JoinHandle<()>
where
    F: FnOnce(Result<InsertAndFind, StoreError>) + Send + 'static,
{
    tokio::spawn(insert_and_find_at(location, collection, document).map(callback))
}

/// Run the operation in place.
pub async fn run_awaited(
    location: String,
    collection: String,
    document: Value,
) -> Result<InsertAndFind, StoreError> {
    insert_and_find_at(location, collection, document).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    async fn employees() -> (DocumentClient, Collection) {
        let client = DocumentClient::connect(":memory:").await.unwrap();
        let coll = client.db().collection("employees").await.unwrap();
        (client, coll)
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_find_returns_it() {
        let (_client, coll) = employees().await;
        let outcome = insert_and_find(&coll, json!({"id": 1, "name": "A. Callback", "age": 23}))
            .await
            .unwrap();
        let docs = &outcome.found;

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], "A. Callback");
        assert_eq!(docs[0]["age"], 23);
        let id = docs[0][ID_FIELD].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
        assert_eq!(outcome.inserted.inserted_id, id);
    }

    #[tokio::test]
    async fn test_find_filters_on_every_field() {
        let (_client, coll) = employees().await;
        coll.insert_one(json!({"name": "A", "age": 23})).await.unwrap();
        coll.insert_one(json!({"name": "B", "age": 16})).await.unwrap();
        coll.insert_one(json!({"name": "C", "age": 16})).await.unwrap();

        let mut filter = Document::new();
        filter.insert("age".into(), json!(16));
        let young = coll.find(filter.clone()).to_array().await.unwrap();
        assert_eq!(young.len(), 2);
        assert_eq!(young[0]["name"], "B");

        filter.insert("name".into(), json!("C"));
        assert_eq!(coll.find(filter).to_array().await.unwrap().len(), 1);

        assert_eq!(coll.find(Document::new()).to_array().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_explicit_id_is_kept_and_duplicates_rejected() {
        let (_client, coll) = employees().await;
        let result = coll.insert_one(json!({"_id": "emp-1", "name": "A"})).await.unwrap();
        assert_eq!(result.inserted_id, "emp-1");

        let dup = coll.insert_one(json!({"_id": "emp-1", "name": "B"})).await;
        assert!(matches!(dup, Err(StoreError::Query(_))));
    }

    #[tokio::test]
    async fn test_non_object_document_rejected() {
        let (_client, coll) = employees().await;
        let err = coll.insert_one(json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject));
    }

    #[tokio::test]
    async fn test_invalid_collection_name_rejected() {
        let client = DocumentClient::connect(":memory:").await.unwrap();
        let err = client.db().collection("employees; DROP").await.err().unwrap();
        assert!(matches!(err, StoreError::InvalidCollection(_)));
    }

    #[test]
    fn test_collection_name_rule() {
        assert!(is_valid_collection_name("employees"));
        assert!(is_valid_collection_name("_staff2"));
        assert!(!is_valid_collection_name("2staff"));
        assert!(!is_valid_collection_name("employees; DROP"));
        assert!(!is_valid_collection_name(""));
    }

    #[tokio::test]
    async fn test_close_takes_collection_handles() {
        let (client, coll) = employees().await;
        coll.insert_one(json!({"name": "A"})).await.unwrap();
        client.close([coll]);
    }

    #[test]
    fn test_database_name_from_location() {
        assert_eq!(database_name("/var/data/issuetracker.db"), "issuetracker");
        assert_eq!(database_name(":memory:"), "memory");
    }

    #[tokio::test]
    async fn test_callback_and_awaited_drivers_agree() {
        let dir = tempdir().unwrap();
        let location = dir.path().join("issuetracker.db").to_string_lossy().to_string();

        let (tx, rx) = tokio::sync::oneshot::channel();
        run_with_callback(
            location.clone(),
            "employees".into(),
            json!({"id": 1, "name": "A. Callback", "age": 23}),
            move |result| {
                let _ = tx.send(result);
            },
        );
        let from_callback = rx.await.unwrap().unwrap();

        let awaited = run_awaited(
            location.clone(),
            "employees".into(),
            json!({"id": 2, "name": "B. Async", "age": 16}),
        )
        .await
        .unwrap();

        assert_eq!(from_callback.found.len(), 1);
        assert_eq!(from_callback.found[0]["id"], 1);
        assert_eq!(
            from_callback.found[0][ID_FIELD],
            from_callback.inserted.inserted_id.as_str()
        );
        assert_eq!(awaited.found.len(), 1);
        assert_eq!(awaited.found[0]["name"], "B. Async");

        let client = DocumentClient::connect(&location).await.unwrap();
        assert_eq!(client.db().name(), "issuetracker");
        let all = client
            .db()
            .collection("employees")
            .await
            .unwrap()
            .find(Document::new())
            .to_array()
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }
}

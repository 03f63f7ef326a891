//! In-process GraphQL issue API used by the integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

#[derive(Clone, Default)]
pub struct MockState {
    pub issues: Arc<Mutex<Vec<Value>>>,
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl MockState {
    pub fn seeded() -> Self {
        let state = Self::default();
        *state.issues.lock().unwrap() = vec![
            json!({
                "id": 1, "title": "Error in console when clicking Add", "status": "New",
                "owner": "Maven", "effort": 5, "created": "2019-01-15T00:00:00Z",
                "due": null, "description": "Steps to reproduce the console error"
            }),
            json!({
                "id": 2, "title": "Missing bottom border on panel", "status": "Assigned",
                "owner": "Flash", "effort": 15, "created": "2019-01-16T00:00:00Z",
                "due": "2019-02-01T00:00:00Z", "description": null
            }),
        ];
        state
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub state: MockState,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = MockState::seeded();
        let app = Router::new()
            .route("/graphql", post(graphql))
            .route("/broken", post(broken))
            .route("/partial", post(partial))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn endpoint(&self) -> String {
        self.url("/graphql")
    }
}

/// Start a server on its own runtime thread, for tests that drive the binary.
pub fn start_in_background() -> (String, MockState) {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let server = MockServer::start().await;
            tx.send((server.endpoint(), server.state.clone())).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}

async fn graphql(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.requests.lock().unwrap().push(body.clone());
    let query = body["query"].as_str().unwrap_or_default();
    let vars = &body["variables"];
    let mut issues = state.issues.lock().unwrap();

    let response = if query.contains("issueList(") {
        let listed: Vec<Value> = issues
            .iter()
            .filter(|issue| vars.get("status").is_none_or(|s| &issue["status"] == s))
            .filter(|issue| {
                let effort = issue["effort"].as_i64().unwrap_or(0);
                vars.get("effortMin")
                    .and_then(Value::as_i64)
                    .is_none_or(|min| effort >= min)
                    && vars
                        .get("effortMax")
                        .and_then(Value::as_i64)
                        .is_none_or(|max| effort <= max)
            })
            .cloned()
            .collect();
        json!({"data": {"issueList": listed}})
    } else if query.contains("issueAdd(") {
        let issue = &vars["issue"];
        if issue["title"].as_str().unwrap_or_default().len() < 3 {
            return Json(json!({
                "errors": [{
                    "message": "Invalid input(s)",
                    "extensions": {
                        "code": "BAD_USER_INPUT",
                        "exception": {"errors": ["Field \"title\" must be at least 3 characters long."]}
                    }
                }]
            }));
        }
        let id = issues.iter().filter_map(|i| i["id"].as_i64()).max().unwrap_or(0) + 1;
        let mut created = issue.clone();
        created["id"] = json!(id);
        created["status"] = json!(issue["status"].as_str().unwrap_or("New"));
        created["created"] = json!("2019-03-01T00:00:00Z");
        issues.push(created);
        json!({"data": {"issueAdd": {"id": id}}})
    } else if query.contains("issueUpdate(") {
        let id = vars["id"].as_i64();
        match issues.iter_mut().find(|i| i["id"].as_i64() == id) {
            Some(issue) => {
                issue["status"] = json!("Closed");
                json!({"data": {"issueUpdate": issue.clone()}})
            }
            None => json!({"data": {"issueUpdate": null}, "errors": [{"message": "No such issue"}]}),
        }
    } else if query.contains("issueDelete(") {
        let id = vars["id"].as_i64();
        let before = issues.len();
        issues.retain(|i| i["id"].as_i64() != id);
        json!({"data": {"issueDelete": issues.len() < before}})
    } else if query.contains("issue(") {
        let id = vars["id"].as_i64();
        let issue = issues
            .iter()
            .find(|i| i["id"].as_i64() == id)
            .map(|i| json!({"id": i["id"], "description": i["description"]}))
            .unwrap_or(Value::Null);
        json!({"data": {"issue": issue}})
    } else {
        json!({"errors": [{"message": "Unknown operation"}]})
    };
    Json(response)
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn partial() -> Json<Value> {
    Json(json!({
        "data": {"issueList": []},
        "errors": [{"message": "effort out of range", "extensions": {"code": "INTERNAL_SERVER_ERROR"}}]
    }))
}

//! Scripted store double and request helpers shared by the route tests.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use election_api::sql::Statement;
use election_api::{app, AppState, Store, StoreError};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub enum Reply {
    Rows(Vec<Value>),
    Affected(u64),
    Fail(StoreError),
}

/// Replays queued replies in order and records every statement it receives.
#[derive(Default)]
pub struct ScriptedStore {
    replies: Mutex<VecDeque<Reply>>,
    seen: Mutex<Vec<Statement>>,
    down: bool,
}

impl ScriptedStore {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(ScriptedStore {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(ScriptedStore {
            down: true,
            ..Default::default()
        })
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.seen.lock().unwrap().clone()
    }

    fn next(&self, stmt: &Statement) -> Reply {
        self.seen.lock().unwrap().push(stmt.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for: {}", stmt.sql))
    }
}

#[async_trait::async_trait]
impl Store for ScriptedStore {
    async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<Value>, StoreError> {
        match self.next(stmt) {
            Reply::Rows(rows) => Ok(rows),
            Reply::Fail(e) => Err(e),
            Reply::Affected(_) => panic!("expected a query reply for: {}", stmt.sql),
        }
    }

    async fn execute(&self, stmt: &Statement) -> Result<u64, StoreError> {
        match self.next(stmt) {
            Reply::Affected(n) => Ok(n),
            Reply::Fail(e) => Err(e),
            Reply::Rows(_) => panic!("expected an execute reply for: {}", stmt.sql),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.down {
            Err(StoreError::Unavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

pub fn router(store: Arc<ScriptedStore>) -> Router {
    app(AppState::new(store), 64 * 1024)
}

/// Send one request; the body is parsed as JSON when non-empty.
pub async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Option<Value>) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).unwrap())
    };
    (status, json)
}

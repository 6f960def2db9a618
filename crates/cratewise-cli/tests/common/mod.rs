#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cratewise_cli::notify::{Notice, Notifier};
use cratewise_client::client::{BoxFuture, RawResponse, RecommendClient};
use cratewise_client::error::ClientError;
use cratewise_core::query::QueryRequest;
use tokio::sync::oneshot;

/// One scripted backend answer, optionally held until a gate opens.
pub struct Reply {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<RawResponse, ClientError>,
}

impl Reply {
    pub fn ok(status: u16, body: impl Into<String>) -> Self {
        Self {
            gate: None,
            result: Ok(RawResponse {
                status,
                body: body.into(),
            }),
        }
    }

    pub fn unreachable() -> Self {
        // An unparseable URL yields a real reqwest error without touching the network.
        let err = reqwest::Client::new()
            .get("http://[::1")
            .build()
            .unwrap_err();
        Self {
            gate: None,
            result: Err(ClientError::Http(err)),
        }
    }

    pub fn gated(mut self, gate: oneshot::Receiver<()>) -> Self {
        self.gate = Some(gate);
        self
    }
}

/// Backend fake answering requests with scripted replies, in order.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<QueryRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::default(),
        })
    }

    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RecommendClient for ScriptedClient {
    fn recommend<'a>(
        &'a self,
        request: &'a QueryRequest,
    ) -> BoxFuture<'a, Result<RawResponse, ClientError>> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left");
        Box::pin(async move {
            if let Some(gate) = reply.gate {
                let _ = gate.await;
            }
            reply.result
        })
    }

    fn health(&self) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

pub fn crate_json(name: &str, score: f64) -> String {
    format!(
        r#"{{"name": "{name}", "description": "{name} crate", "version": "1.0.0",
            "downloads": 5000000, "last_updated": "2024-05-01T00:00:00Z",
            "score": {score}, "keywords": []}}"#
    )
}

pub fn body(crates: &[String], explanation: &str) -> String {
    format!(
        r#"{{"crates": [{}], "explanation": "{explanation}"}}"#,
        crates.join(",")
    )
}

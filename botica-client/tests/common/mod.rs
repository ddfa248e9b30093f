#![allow(dead_code)]
// Test harness shared by the integration tests: a scripted transport
// and a recording notifier.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use botica_client::{ApiTransport, ClientError, ClientResult, NoticeLevel, Notifier};
use serde_json::{json, Value};

/// One scripted transport reply
pub enum Scripted {
    /// Return this envelope body
    Envelope(Value),
    /// Fail at the transport level (connection refused, bad body)
    TransportError(String),
    /// Never resolve; used to pin a mutation in flight
    Hang,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Transport that replays scripted responses and records every call
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Scripted) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_path(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|c| c.path.clone())
    }

    async fn respond(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Envelope(value)) => Ok(value),
            Some(Scripted::TransportError(message)) => Err(ClientError::InvalidResponse(message)),
            Some(Scripted::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => panic!("unscripted call: {method} {path}"),
        }
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn get(&self, path: &str) -> ClientResult<Value> {
        self.respond("GET", path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.respond("POST", path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.respond("PATCH", path, Some(body)).await
    }

    async fn delete(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.respond("DELETE", path, Some(body)).await
    }
}

/// Notifier that records every notice for assertions
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(NoticeLevel, String)> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().unwrap().push((level, message.to_string()));
    }
}

/// Backend-shaped order JSON
pub fn order_json(id: &str, order_type: &str, status: &str) -> Value {
    json!({
        "id": id,
        "type": order_type,
        "status": status,
        "subtotal": 100.0,
        "tax": 18.0,
        "total": 118.0,
        "currency": "PEN",
        "isActive": true,
        "createdAt": chrono::Utc::now().to_rfc3339(),
    })
}

/// Success envelope
pub fn envelope(data: Value, message: Option<&str>) -> Value {
    match message {
        Some(message) => json!({ "data": data, "message": message }),
        None => json!({ "data": data }),
    }
}

/// Error envelope
pub fn error_envelope(error: &str, status_code: Option<u16>) -> Value {
    match status_code {
        Some(code) => json!({ "error": error, "statusCode": code }),
        None => json!({ "error": error }),
    }
}

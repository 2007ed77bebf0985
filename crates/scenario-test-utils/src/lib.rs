//! Testing utilities for the scenario analyzer workspace
//!
//! Shared fixtures, an in-memory scripted transport, and a local HTTP server
//! standing in for the analysis service.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use scenario_core::{
    AnalysisRequest, AnalysisResult, AnalysisTransport, ConstraintList, ScenarioInput, SubmitError,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{oneshot, Notify};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::Filter;

/// Path served by [`FixtureServer`]
pub const ANALYZE_PATH: &str = "/api/analyze-scenario";

pub fn launch_input() -> ScenarioInput {
    let constraints: ConstraintList = ["Budget: $10,000", "Timeline: 3 months"].into_iter().collect();
    ScenarioInput::new()
        .with_scenario("Launch a product")
        .with_constraints(constraints)
}

pub fn launch_result() -> AnalysisResult {
    AnalysisResult {
        scenario_summary: "Launching a new product within **$10,000** and three months.".to_string(),
        potential_pitfalls: vec![
            "Budget overruns on *marketing*.".to_string(),
            "Slipping the three-month timeline.".to_string(),
        ],
        proposed_strategies: vec![
            "Ship a minimum viable product first.".to_string(),
            "Prioritise low-cost digital channels.".to_string(),
            "Hold weekly milestone reviews.".to_string(),
        ],
        recommended_resources: vec!["[The Lean Startup](https://example.com/lean-startup)".to_string()],
        disclaimer: "This analysis is AI-generated; consult an expert.".to_string(),
    }
}

/// Wire form of [`launch_result`]
pub fn launch_result_json() -> Value {
    json!({
        "scenarioSummary": "Launching a new product within **$10,000** and three months.",
        "potentialPitfalls": [
            "Budget overruns on *marketing*.",
            "Slipping the three-month timeline."
        ],
        "proposedStrategies": [
            "Ship a minimum viable product first.",
            "Prioritise low-cost digital channels.",
            "Hold weekly milestone reviews."
        ],
        "recommendedResources": ["[The Lean Startup](https://example.com/lean-startup)"],
        "disclaimer": "This analysis is AI-generated; consult an expert."
    })
}

/// Transport replaying queued outcomes and recording every request
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<AnalysisResult, SubmitError>>>,
    requests: Mutex<Vec<AnalysisRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one more outcome
    pub fn with_reply(self, reply: Result<AnalysisResult, SubmitError>) -> Self {
        self.replies.lock().push_back(reply);
        self
    }

    /// Hold every request until `gate` is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl AnalysisTransport for ScriptedTransport {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, SubmitError> {
        self.requests.lock().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let reply = self.replies.lock().pop_front();
        reply.unwrap_or_else(|| Err(SubmitError::transport("no scripted reply")))
    }
}

/// What the fixture server answers with
#[derive(Debug, Clone)]
pub enum FixtureReply {
    /// 200 with a JSON body
    Json(Value),
    /// Given status with an empty JSON object body
    Status(u16),
    /// Given status with a raw body
    Raw { status: u16, body: String },
}

impl FixtureReply {
    fn into_reply(self) -> impl warp::Reply {
        let (status, body) = match self {
            Self::Json(value) => (200, value.to_string()),
            Self::Status(status) => (status, "{}".to_string()),
            Self::Raw { status, body } => (status, body),
        };
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warp::reply::with_status(
            warp::reply::with_header(body, "content-type", "application/json"),
            status,
        )
    }
}

/// One request received by [`FixtureServer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// Body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// Local stand-in for the analysis service
///
/// Serves `POST /api/analyze-scenario` on an ephemeral port with a fixed reply
/// and records what it receives. Shuts down on drop.
#[derive(Debug)]
pub struct FixtureServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FixtureServer {
    pub async fn start(reply: FixtureReply) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&received);

        let route = warp::post()
            .and(warp::path!("api" / "analyze-scenario"))
            .and(warp::header::optional::<String>("content-type"))
            .and(warp::body::bytes())
            .map(move |content_type: Option<String>, body: Bytes| {
                recorder.lock().push(RecordedRequest {
                    content_type,
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
                reply.clone().into_reply()
            });

        let (tx, rx) = oneshot::channel::<()>();
        let (addr, server) =
            warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
                let _ = rx.await;
            });
        tokio::spawn(server);

        Self {
            addr,
            received,
            shutdown: Some(tx),
        }
    }

    /// Full analysis URL
    pub fn endpoint(&self) -> String {
        format!("http://{}{}", self.addr, ANALYZE_PATH)
    }

    /// Base URL without a path
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<RecordedRequest> {
        self.received.lock().clone()
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Endpoint on a local port nothing listens on
pub fn unreachable_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{ANALYZE_PATH}")
}

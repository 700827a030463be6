#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use chrono::{DateTime, TimeZone, Timelike, Utc};

use b12_submit::config::Config;
use b12_submit::payload::Clock;
use b12_submit::transport::{HttpResponse, Transport, TransportFailure};

pub const SECRET: &str = "topsecret";

/// Variables from the reference scenario: fixed literals for all six inputs.
pub fn scenario_env() -> HashMap<String, String> {
    [
        ("ACTION_RUN_LINK", "https://x/run/1"),
        ("SUBMISSION_EMAIL", "a@b.com"),
        ("SUBMISSION_NAME", "Jane"),
        ("REPOSITORY_LINK", "https://x/repo"),
        ("RESUME_LINK", "https://x/resume.pdf"),
        ("SIGNING_SECRET", SECRET),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn config_from(env: &HashMap<String, String>) -> Result<Config, String> {
    Config::from_lookup(|key| Ok(env.get(key).cloned()))
}

pub fn scenario_config() -> Config {
    config_from(&scenario_env()).expect("scenario config should load")
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2026-01-02T03:04:05 with 678.999999 ms, to exercise truncation.
pub fn fixed_clock() -> FixedClock {
    let at = Utc
        .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .unwrap()
        .with_nanosecond(678_999_999)
        .unwrap();
    FixedClock(at)
}

pub const SCENARIO_BODY: &str = r#"{"action_run_link":"https://x/run/1","email":"a@b.com","name":"Jane","repository_link":"https://x/repo","resume_link":"https://x/resume.pdf","timestamp":"2026-01-02T03:04:05.678Z"}"#;

pub const SCENARIO_SIGNATURE: &str =
    "sha256=697a0ad32dad5c4d20919c6cd57caff74367043f88f8b3d5ddb135ab7829d60d";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that returns a canned outcome and records what it was asked to send.
pub struct ScriptedTransport {
    outcome: Result<HttpResponse, TransportFailure>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(TransportFailure {
                reason: reason.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportFailure> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        });
        self.outcome.clone()
    }
}

/// Captured stdout/stderr plus exit code of a single run.
pub struct RunOutput {
    pub code: u8,
    pub stdout: String,
    pub stderr: String,
}

pub async fn run_with<T: Transport>(
    submitter: &b12_submit::submitter::Submitter<T>,
    config: &Config,
) -> RunOutput {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = submitter.run(config, &fixed_clock(), &mut out, &mut err).await;
    RunOutput {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

/// A running in-process receiver that answers every POST with a fixed status/body.
pub struct Receiver {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Receiver {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

#[derive(Clone)]
struct ReceiverState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub async fn spawn_receiver(status: u16, body: &str) -> Receiver {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ReceiverState {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/apply/submission", post(receive))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Receiver { addr, requests }
}

async fn receive(
    State(state): State<ReceiverState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(RecordedRequest {
        url: "/apply/submission".to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: body.to_vec(),
    });
    (state.status, state.body.clone())
}

/// Address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

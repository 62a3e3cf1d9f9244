//! In-process Cloud Manager fixture server
//!
//! Serves a fixed set of programs, pipelines and executions on an ephemeral
//! local port and records every request it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use cloudmanager_client::CloudManagerClient;
use cloudmanager_core::domain::link::{REL_ADVANCE, REL_CANCEL, REL_LOGS};
use serde_json::{Value, json};

pub const LOG_CONTENT: &str = "some log line\nsome other log line\n";

/// Size of the binary log served by the fixture, large enough to span many chunks
pub const BINARY_LOG_LEN: usize = 512 * 1024;

/// Deterministic log payload containing every byte value, not valid UTF-8
pub fn binary_log() -> Vec<u8> {
    (0..BINARY_LOG_LEN).map(|i| (i * 31 % 256) as u8).collect()
}

/// A request seen by the fixture server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Fixture {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Handle to a running fixture server
pub struct FixtureServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FixtureServer {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = Fixture {
            base_url: base_url.clone(),
            requests: requests.clone(),
        };
        let app = Router::new().fallback(handle).with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, requests }
    }

    pub fn client(&self) -> CloudManagerClient {
        CloudManagerClient::new(&self.base_url)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// All PUT requests, in order
    pub fn puts(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::PUT)
            .collect()
    }
}

async fn handle(
    State(fixture): State<Fixture>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    fixture.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: header_value(header::CONTENT_TYPE),
        authorization: header_value(header::AUTHORIZATION),
        body,
    });

    route(&fixture.base_url, &method, uri.path())
}

fn route(base_url: &str, method: &Method, path: &str) -> Response {
    if *method == Method::PUT {
        if path.ends_with("/cancel") || path.ends_with("/advance") {
            return StatusCode::ACCEPTED.into_response();
        }
        return match path {
            "/api/program/4/pipeline/3/execution" => {
                json_response(StatusCode::CREATED, execution("3", "8", "RUNNING", vec![]))
            }
            "/api/program/4/pipeline/7/execution" => StatusCode::PRECONDITION_FAILED.into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        };
    }

    if *method != Method::GET {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let redirect = json!({ "redirect": format!("{}/logs/special.txt", base_url) });

    match path {
        "/api/program/4/pipelines" => json_response(StatusCode::OK, pipelines()),
        "/api/program/4/pipeline/2/execution" => json_response(StatusCode::OK, running_build("2", "1")),
        "/api/program/4/pipeline/4/execution" => {
            json_response(StatusCode::OK, execution("4", "1", "RUNNING", vec![]))
        }
        "/api/program/4/pipeline/5/execution" => json_response(StatusCode::OK, no_active_step()),
        "/api/program/4/pipeline/3/execution/1" => json_response(StatusCode::OK, running_build("3", "1")),
        "/api/program/4/pipeline/3/execution/2" => json_response(StatusCode::OK, code_quality_waiting()),
        "/api/program/4/pipeline/3/execution/3" => {
            json_response(StatusCode::OK, code_quality_waiting_without_cancel())
        }
        "/api/program/4/pipeline/3/execution/4" => json_response(StatusCode::OK, approval_waiting()),
        "/api/program/4/pipeline/3/execution/5" => json_response(StatusCode::OK, deploy_waiting("5", true)),
        "/api/program/4/pipeline/3/execution/6" => json_response(StatusCode::OK, deploy_waiting("6", false)),
        "/api/program/4/pipeline/3/execution/7" => json_response(StatusCode::OK, running_build("3", "7")),
        "/api/program/4/pipeline/3/executions" => json_response(
            StatusCode::OK,
            json!({
                "_totalNumberOfItems": 2,
                "_embedded": {
                    "executions": [approval_waiting(), code_quality_waiting()]
                }
            }),
        ),
        "/api/program/4/pipeline/3/execution/4/phase/8565/step/15483/logs" => {
            json_response(StatusCode::OK, redirect)
        }
        "/api/program/4/pipeline/3/execution/2/phase/4596/step/8493/logs" => {
            json_response(StatusCode::OK, json!({ "redirect": null }))
        }
        "/api/program/4/pipeline/3/execution/4/phase/8565/step/15484/logs" => json_response(
            StatusCode::OK,
            json!({ "redirect": format!("{}/logs/binary.log", base_url) }),
        ),
        "/logs/special.txt" => (StatusCode::OK, LOG_CONTENT).into_response(),
        "/logs/binary.log" => (StatusCode::OK, binary_log()).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

// =============================================================================
// Fixture Data
// =============================================================================

fn pipelines() -> Value {
    let pipeline = |id: &str, name: &str, status: &str| {
        json!({ "id": id, "programId": "4", "name": name, "status": status, "trigger": "MANUAL" })
    };

    json!({
        "_totalNumberOfItems": 6,
        "_embedded": {
            "pipelines": [
                pipeline("1", "test1", "IDLE"),
                pipeline("2", "test2", "BUSY"),
                pipeline("3", "test3", "BUSY"),
                pipeline("4", "test4", "BUSY"),
                pipeline("5", "test5", "BUSY"),
                pipeline("7", "test7", "BUSY")
            ]
        }
    })
}

fn execution(pipeline_id: &str, id: &str, status: &str, steps: Vec<Value>) -> Value {
    json!({
        "id": id,
        "programId": "4",
        "pipelineId": pipeline_id,
        "status": status,
        "trigger": "MANUAL",
        "user": "someone@example.com",
        "_embedded": { "stepStates": steps }
    })
}

/// A step state whose links point below its execution
fn step(
    pipeline_id: &str,
    execution_id: &str,
    phase_id: &str,
    id: &str,
    action: &str,
    status: &str,
    links: &[&str],
) -> Value {
    let base = format!(
        "/api/program/4/pipeline/{}/execution/{}/phase/{}/step/{}",
        pipeline_id, execution_id, phase_id, id
    );

    let mut link_map = serde_json::Map::new();
    for rel in links {
        let suffix = match *rel {
            REL_CANCEL => "cancel",
            REL_ADVANCE => "advance",
            _ => "logs",
        };
        link_map.insert(
            rel.to_string(),
            json!({ "href": format!("{}/{}", base, suffix) }),
        );
    }

    json!({
        "id": id,
        "stepId": id,
        "phaseId": phase_id,
        "action": action,
        "status": status,
        "_links": link_map
    })
}

fn running_build(pipeline_id: &str, execution_id: &str) -> Value {
    execution(
        pipeline_id,
        execution_id,
        "RUNNING",
        vec![
            step(pipeline_id, execution_id, "4595", "8491", "validate", "FINISHED", &[]),
            step(pipeline_id, execution_id, "4596", "8492", "build", "RUNNING", &[REL_CANCEL, REL_LOGS]),
            step(pipeline_id, execution_id, "4596", "8493", "codeQuality", "NOT_STARTED", &[]),
        ],
    )
}

fn no_active_step() -> Value {
    execution(
        "5",
        "1",
        "RUNNING",
        vec![
            step("5", "1", "4595", "8491", "validate", "FINISHED", &[]),
            step("5", "1", "4596", "8492", "build", "FINISHED", &[REL_LOGS]),
            step("5", "1", "4596", "8493", "codeQuality", "NOT_STARTED", &[]),
        ],
    )
}

fn code_quality_waiting() -> Value {
    execution(
        "3",
        "2",
        "RUNNING",
        vec![
            step("3", "2", "4595", "8491", "validate", "FINISHED", &[]),
            step("3", "2", "4596", "8492", "build", "FINISHED", &[REL_LOGS]),
            step(
                "3",
                "2",
                "4596",
                "8493",
                "codeQuality",
                "WAITING",
                &[REL_CANCEL, REL_ADVANCE, REL_LOGS],
            ),
        ],
    )
}

fn code_quality_waiting_without_cancel() -> Value {
    execution(
        "3",
        "3",
        "RUNNING",
        vec![
            step("3", "3", "4595", "8491", "validate", "FINISHED", &[]),
            step("3", "3", "4596", "8492", "build", "FINISHED", &[REL_LOGS]),
            step("3", "3", "4596", "8493", "codeQuality", "WAITING", &[REL_ADVANCE]),
        ],
    )
}

fn approval_waiting() -> Value {
    execution(
        "3",
        "4",
        "RUNNING",
        vec![
            step("3", "4", "8564", "15482", "validate", "FINISHED", &[]),
            step("3", "4", "8565", "15483", "build", "FINISHED", &[REL_LOGS]),
            step("3", "4", "8565", "15484", "codeQuality", "FINISHED", &[REL_LOGS]),
            step("3", "4", "8567", "15490", "approval", "WAITING", &[REL_CANCEL, REL_ADVANCE]),
            step("3", "4", "8567", "15492", "deploy", "NOT_STARTED", &[]),
        ],
    )
}

fn deploy_waiting(execution_id: &str, with_advance: bool) -> Value {
    let deploy_links: &[&str] = if with_advance {
        &[REL_CANCEL, REL_ADVANCE]
    } else {
        &[REL_CANCEL]
    };

    execution(
        "3",
        execution_id,
        "RUNNING",
        vec![
            step("3", execution_id, "8565", "15483", "build", "FINISHED", &[REL_LOGS]),
            step("3", execution_id, "8567", "15490", "approval", "FINISHED", &[]),
            step("3", execution_id, "8567", "15492", "deploy", "WAITING", deploy_links),
        ],
    )
}

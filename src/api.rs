//! Remote simplify/derive/solve API.
//!
//! Requests have the shape `GET {base}/{operation}/{url-encoded expression}`
//! and answer `{ "result": "..." }`. Calls are blocking, so the UI hands them
//! to a background worker thread and polls for [`ApiResponse`]s.

use std::fmt;
use std::sync::mpsc;
use std::time::Duration;

use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::{MathSimError, Result};

/// Operation offered by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Simplify an expression.
    Simplify,
    /// Differentiate with respect to x.
    Derive,
    /// Solve an equation.
    Solve,
}

impl ApiOperation {
    /// Path segment of the operation.
    pub fn path(self) -> &'static str {
        match self {
            ApiOperation::Simplify => "simplify",
            ApiOperation::Derive => "derive",
            ApiOperation::Solve => "solve",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A math service that can evaluate an operation on an expression.
pub trait MathApi: Send {
    /// Run `operation` on `expression` and return the textual result.
    fn request(&self, operation: ApiOperation, expression: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    result: String,
}

/// Build the request URL for an operation.
pub fn request_url(base_url: &str, operation: ApiOperation, expression: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        operation.path(),
        urlencoding::encode(expression)
    )
}

/// HTTP client for the remote API.
pub struct HttpMathApi {
    agent: ureq::Agent,
    base_url: String,
}

impl fmt::Debug for HttpMathApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMathApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpMathApi {
    /// Create a client from configuration.
    pub fn new(config: &ApiConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();
        Self {
            agent,
            base_url: config.base_url.clone(),
        }
    }
}

impl MathApi for HttpMathApi {
    fn request(&self, operation: ApiOperation, expression: &str) -> Result<String> {
        let url = request_url(&self.base_url, operation, expression);
        tracing::debug!("GET {}", url);
        let reply: ApiReply = self
            .agent
            .get(&url)
            .call()?
            .into_json()
            .map_err(|e| MathSimError::api(format!("malformed response: {}", e)))?;
        Ok(reply.result)
    }
}

/// Call `api`, retrying up to `retries` extra times on failure.
pub fn request_with_retries(
    api: &dyn MathApi,
    operation: ApiOperation,
    expression: &str,
    retries: u32,
) -> Result<String> {
    let mut attempt = 0;
    loop {
        match api.request(operation, expression) {
            Ok(result) => return Ok(result),
            Err(e) if attempt < retries => {
                attempt += 1;
                tracing::warn!("{} request failed (attempt {}): {}", operation, attempt, e);
            },
            Err(e) => return Err(e),
        }
    }
}

/// Remove all whitespace so answers compare by content only.
pub fn normalize_answer(answer: &str) -> String {
    answer.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whether a learner's answer matches the expected one, ignoring whitespace.
pub fn answers_match(answer: &str, expected: &str) -> bool {
    normalize_answer(answer) == normalize_answer(expected)
}

/// Why a request was made, so the response can be routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPurpose {
    /// Check the learner's answer to the current problem.
    CheckAnswer {
        /// The submitted answer.
        answer: String,
    },
    /// Evaluate a learner-supplied expression.
    SolveCustom,
}

/// A request queued for the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Identifier echoed in the response.
    pub id: u64,
    /// Routing information.
    pub purpose: RequestPurpose,
    /// Operation to run.
    pub operation: ApiOperation,
    /// Expression to run it on.
    pub expression: String,
}

/// Outcome of a request.
#[derive(Debug)]
pub struct ApiResponse {
    /// Identifier of the request.
    pub id: u64,
    /// Routing information copied from the request.
    pub purpose: RequestPurpose,
    /// API result or failure.
    pub result: Result<String>,
}

/// Handle to the background API worker.
#[derive(Debug)]
pub struct ApiWorker {
    requests: mpsc::Sender<ApiRequest>,
    responses: mpsc::Receiver<ApiResponse>,
}

impl ApiWorker {
    /// Spawn the worker thread.
    pub fn spawn(api: Box<dyn MathApi>, retries: u32) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<ApiRequest>();
        let (response_tx, response_rx) = mpsc::channel::<ApiResponse>();

        std::thread::Builder::new()
            .name("mathsim-api".into())
            .spawn(move || worker_loop(api.as_ref(), retries, request_rx, response_tx))?;

        Ok(Self {
            requests: request_tx,
            responses: response_rx,
        })
    }

    /// Queue a request.
    pub fn submit(&self, request: ApiRequest) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| MathSimError::api("worker thread has stopped"))
    }

    /// Next finished response, if any, without blocking.
    pub fn try_recv(&self) -> Option<ApiResponse> {
        self.responses.try_recv().ok()
    }

    /// Wait up to `timeout` for the next response.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ApiResponse> {
        self.responses.recv_timeout(timeout).ok()
    }
}

fn worker_loop(
    api: &dyn MathApi,
    retries: u32,
    requests: mpsc::Receiver<ApiRequest>,
    responses: mpsc::Sender<ApiResponse>,
) {
    for request in requests {
        let result = request_with_retries(api, request.operation, &request.expression, retries);
        if let Err(ref e) = result {
            tracing::warn!("API request {} failed: {}", request.id, e);
        }
        let response = ApiResponse {
            id: request.id,
            purpose: request.purpose,
            result,
        };
        if responses.send(response).is_err() {
            break;
        }
    }
    tracing::debug!("API worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct Flaky {
        failures_left: Arc<AtomicU32>,
    }

    impl MathApi for Flaky {
        fn request(&self, operation: ApiOperation, expression: &str) -> Result<String> {
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(MathSimError::api("boom"));
            }
            Ok(format!("{}:{}", operation, expression))
        }
    }

    #[test]
    fn url_encodes_expression() {
        assert_eq!(
            request_url("https://example.test/api/", ApiOperation::Derive, "x^2 + 1"),
            "https://example.test/api/derive/x%5E2%20%2B%201"
        );
    }

    #[test]
    fn answers_ignore_whitespace() {
        assert!(answers_match(" 6 x + 2 ", "6x+2"));
        assert!(!answers_match("6x+3", "6x+2"));
        assert_eq!(normalize_answer("a \t b\nc"), "abc");
    }

    #[test]
    fn retries_until_success() {
        let api = Flaky {
            failures_left: Arc::new(AtomicU32::new(2)),
        };
        assert!(request_with_retries(&api, ApiOperation::Simplify, "1", 1).is_err());
        assert_eq!(
            request_with_retries(&api, ApiOperation::Simplify, "1", 1).unwrap(),
            "simplify:1"
        );
    }

    #[test]
    fn worker_echoes_request_id() {
        let api = Flaky {
            failures_left: Arc::new(AtomicU32::new(0)),
        };
        let worker = ApiWorker::spawn(Box::new(api), 0).unwrap();
        worker
            .submit(ApiRequest {
                id: 42,
                purpose: RequestPurpose::SolveCustom,
                operation: ApiOperation::Solve,
                expression: "x=1".into(),
            })
            .unwrap();
        let response = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(response.id, 42);
        assert_eq!(response.purpose, RequestPurpose::SolveCustom);
        assert_eq!(response.result.unwrap(), "solve:x=1");
    }
}

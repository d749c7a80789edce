use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// HTTP methods used by the quote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outgoing request handed to an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
            timeout_ms: 10_000,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Raw response returned by an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failure: the request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
    timed_out: bool,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn timed_out(&self) -> bool {
        self.timed_out
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Transport seam used by [`crate::StockApi`].
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(concat!("stockviz/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            builder = builder.timeout(Duration::from_millis(request.timeout_ms));

            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::timeout(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    HttpError::new(format!("connection failed: {e}"))
                } else {
                    HttpError::new(format!("request failed: {e}"))
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::new(format!("failed to read response body: {e}")))?;

            Ok(HttpResponse { status, body })
        })
    }
}

/// Reply produced by a [`ScriptedHttpClient`] route.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Response(HttpResponse),
    Failure(HttpError),
}

#[derive(Debug, Clone)]
struct ScriptedRoute {
    method: HttpMethod,
    url_fragment: String,
    reply: ScriptedReply,
    delay: Duration,
}

/// Deterministic offline transport: answers from registered routes and
/// records every request it receives.
///
/// Routes match on method plus a URL substring; the most recently
/// registered match wins so tests can override a default reply. Unmatched
/// requests get a 404 failure envelope.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<Vec<ScriptedRoute>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: HttpMethod, url_fragment: &str, response: HttpResponse) -> &Self {
        self.push_route(method, url_fragment, ScriptedReply::Response(response), Duration::ZERO)
    }

    pub fn on_delayed(
        &self,
        method: HttpMethod,
        url_fragment: &str,
        response: HttpResponse,
        delay: Duration,
    ) -> &Self {
        self.push_route(method, url_fragment, ScriptedReply::Response(response), delay)
    }

    pub fn fail(&self, method: HttpMethod, url_fragment: &str, error: HttpError) -> &Self {
        self.push_route(method, url_fragment, ScriptedReply::Failure(error), Duration::ZERO)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push_route(
        &self,
        method: HttpMethod,
        url_fragment: &str,
        reply: ScriptedReply,
        delay: Duration,
    ) -> &Self {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ScriptedRoute {
                method,
                url_fragment: url_fragment.to_owned(),
                reply,
                delay,
            });
        self
    }

    fn resolve(&self, request: &HttpRequest) -> (ScriptedReply, Duration) {
        let routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        routes
            .iter()
            .rev()
            .find(|route| route.method == request.method && request.url.contains(&route.url_fragment))
            .map(|route| (route.reply.clone(), route.delay))
            .unwrap_or_else(|| {
                (
                    ScriptedReply::Response(HttpResponse::new(
                        404,
                        r#"{"success":false,"message":"no scripted route","timestamp":0}"#,
                    )),
                    Duration::ZERO,
                )
            })
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let (reply, delay) = self.resolve(&request);
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match reply {
                ScriptedReply::Response(response) => Ok(response),
                ScriptedReply::Failure(error) => Err(error),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_lowercased() {
        let request = HttpRequest::get("https://example.test/api")
            .with_header("Content-Type", "application/json");

        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn scripted_client_prefers_latest_route_and_records_requests() {
        let client = ScriptedHttpClient::new();
        client
            .on(HttpMethod::Get, "/stocks/health", HttpResponse::ok_json("first"))
            .on(HttpMethod::Get, "/stocks/health", HttpResponse::ok_json("second"));

        let response = client
            .execute(HttpRequest::get("http://host/api/stocks/health"))
            .await
            .expect("scripted response");

        assert_eq!(response.body, "second");
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn scripted_client_answers_unmatched_with_404() {
        let client = ScriptedHttpClient::new();
        let response = client
            .execute(HttpRequest::post("http://host/api/stocks/batch"))
            .await
            .expect("scripted response");

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }
}

//! Request pipeline: build, send, decode
//!
//! [`NeonApi`] turns a method and path into an authenticated [`ApiRequest`],
//! hands it to the configured [`HttpTransport`] and classifies the answer:
//!
//! - transport failure: [`NeonError::Request`]
//! - status >= 400: [`NeonError::Api`] (the body only enriches the message)
//! - status < 400 with a non-JSON body: [`NeonError::Decode`]
//! - otherwise: the decoded JSON value

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, trace, warn};

use crate::body::RequestBody;
use crate::error::{DecodeError, MISSING_ERROR_MESSAGE, NeonError, Result};
use crate::query::Query;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};

/// Production control-plane endpoint
pub const DEFAULT_BASE_URL: &str = "https://console.neon.tech/api/v2/";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("neon-api-rs/", env!("CARGO_PKG_VERSION"));

/// Immutable client settings
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    user_agent: String,
}

impl ClientConfig {
    /// Settings for the production API with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Override the base URL; a trailing slash is added if missing
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Low-level API access shared by all resource clients
#[derive(Clone)]
pub struct NeonApi {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

impl NeonApi {
    pub fn new(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Use the default reqwest transport with the given timeout
    pub fn with_timeout(config: ClientConfig, timeout: Duration) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(timeout).map_err(NeonError::Client)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build an authenticated request for `path` (relative to the base URL)
    pub fn build_request(&self, method: Method, path: &str) -> ApiRequest {
        let url = format!("{}{}", self.config.base_url, path);
        ApiRequest::new(method, url)
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json")
            .with_header("Authorization", format!("Bearer {}", self.config.api_key))
            .with_header("User-Agent", self.config.user_agent.clone())
    }

    /// Dispatch a request through the transport
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!(method = %request.method(), url = %request.url(), "Sending Neon API request");
        match self.transport.send(&request).await {
            Ok(response) => {
                trace!(status = response.status(), "Neon API responded");
                Ok(response)
            }
            Err(source) => {
                warn!(url = %request.url(), error = %source, "Neon API request failed in transit");
                Err(NeonError::Request {
                    request: Box::new(request),
                    source,
                })
            }
        }
    }

    /// Classify a response and decode its JSON body
    pub fn decode(&self, response: ApiResponse) -> Result<Value> {
        decode_response(response)
    }

    /// `""` or `?key=value&...`, skipping unset parameters
    pub fn build_query(query: &Query) -> String {
        query.build()
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.execute(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<RequestBody>) -> Result<Value> {
        self.execute(Method::POST, path, body).await
    }

    pub async fn patch(&self, path: &str, body: Option<RequestBody>) -> Result<Value> {
        self.execute(Method::PATCH, path, body).await
    }

    pub async fn put(&self, path: &str, body: Option<RequestBody>) -> Result<Value> {
        self.execute(Method::PUT, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute(Method::DELETE, path, None).await
    }

    /// Build, attach a non-empty body, send and decode
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<Value> {
        let mut request = self.build_request(method, path);
        if let Some(body) = body.filter(|b| !b.is_empty()) {
            let bytes = body.to_json().map_err(NeonError::Encode)?;
            trace!(bytes = bytes.len(), "Attaching request body");
            request = request.with_body(bytes);
        }
        let response = self.send(request).await?;
        self.decode(response)
    }
}

impl fmt::Debug for NeonApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeonApi")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn decode_response(response: ApiResponse) -> Result<Value> {
    let status = response.status();
    if status >= 400 {
        let parsed: Option<Value> = serde_json::from_slice(response.body()).ok();
        let message = parsed
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| MISSING_ERROR_MESSAGE.to_string());
        let code = parsed.as_ref().and_then(|b| b.get("code")).and_then(|c| match c {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        error!(
            "Neon API request failed: [{}:{}] {}",
            status,
            response.reason_phrase(),
            message
        );

        return Err(NeonError::Api {
            status,
            message,
            code,
            response: Box::new(response),
        });
    }

    serde_json::from_slice(response.body()).map_err(|e| {
        warn!(status, "Neon response has invalid JSON");
        NeonError::Decode(DecodeError::Json(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockHttpTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn api_with(transport: MockHttpTransport) -> NeonApi {
        NeonApi::new(
            ClientConfig::new("napi_test").with_base_url("https://example.test/api/v2"),
            Arc::new(transport),
        )
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("napi_test");
        assert_eq!(config.base_url(), "https://console.neon.tech/api/v2/");
        assert!(config.user_agent().starts_with("neon-api-rs/"));
        assert!(!format!("{config:?}").contains("napi_test"));
    }

    #[test]
    fn test_build_request_headers() {
        let api = api_with(MockHttpTransport::new());
        let request = api.build_request(Method::GET, "projects/p-1");

        assert_eq!(request.url(), "https://example.test/api/v2/projects/p-1");
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("Authorization"), Some("Bearer napi_test"));
        assert_eq!(request.header("User-Agent"), Some(USER_AGENT));
        assert!(request.body().is_none());
    }

    #[test]
    fn test_decode_success() {
        let api = api_with(MockHttpTransport::new());
        let value = api
            .decode(ApiResponse::json(200, &json!({"regions": []})))
            .unwrap();
        assert_eq!(value, json!({"regions": []}));
    }

    #[test]
    fn test_decode_api_error_with_message_and_code() {
        let api = api_with(MockHttpTransport::new());
        let body = json!({"message": "not found", "code": "not_found"});
        let response = ApiResponse::json(404, &body);
        let err = api.decode(response).unwrap_err();

        match &err {
            NeonError::Api {
                status,
                message,
                code,
                response,
            } => {
                assert_eq!(*status, 404);
                assert_eq!(message, "not found");
                assert_eq!(code.as_deref(), Some("not_found"));
                assert_eq!(response.status(), 404);
            }
            other => panic!("expected API error, got {other:?}"),
        }
        assert!(err.is_not_found());
    }

    #[test]
    fn test_decode_api_error_without_json_body() {
        let api = api_with(MockHttpTransport::new());
        let err = api
            .decode(ApiResponse::new(502, "<html>bad gateway</html>"))
            .unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(err.code(), None);
        assert!(err.to_string().contains(MISSING_ERROR_MESSAGE));
    }

    #[test]
    fn test_decode_numeric_code() {
        let api = api_with(MockHttpTransport::new());
        let err = api
            .decode(ApiResponse::json(429, &json!({"code": 429})))
            .unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(err.code(), Some("429"));
    }

    #[test]
    fn test_decode_invalid_json_on_success() {
        let api = api_with(MockHttpTransport::new());
        let err = api.decode(ApiResponse::new(200, "not-json")).unwrap_err();
        assert!(err.is_decode());
        assert!(matches!(err, NeonError::Decode(DecodeError::Json(_))));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_build_query() {
        let query = Query::new()
            .param("a", 1)
            .param("b", None::<&str>)
            .param("c", "x");
        assert_eq!(NeonApi::build_query(&query), "?a=1&c=x");
        assert_eq!(NeonApi::build_query(&Query::new()), "");
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_request() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err("connection refused".into()));
        let api = api_with(transport);

        let err = api.get("regions").await.unwrap_err();
        let request = err.request().expect("request attached");
        assert_eq!(request.url(), "https://example.test/api/v2/regions");
        assert_eq!(request.method(), &Method::GET);
        let cause = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(cause.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method() == Method::POST
                    && request.json_body() == Some(json!({"key_name": "ci"}))
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::json(200, &json!({"id": 1, "key": "k"}))));
        let api = api_with(transport);

        let body = RequestBody::try_from(json!({"key_name": "ci"})).unwrap();
        let value = api.post("api_keys", Some(body)).await.unwrap();
        assert_eq!(value["key"], "k");
    }

    #[tokio::test]
    async fn test_empty_body_is_not_sent() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request| request.body().is_none())
            .times(1)
            .returning(|_| Ok(ApiResponse::json(200, &json!({}))));
        let api = api_with(transport);

        let body = RequestBody::try_from(json!({})).unwrap();
        api.patch("projects/p-1", Some(body)).await.unwrap();
    }
}

//! HTTP client adapter.
//!
//! Every request is resolved against the configured base URL, carries the
//! configured timeout and, when a session is active, a bearer token read
//! from the [`SessionContext`] at send time. A 401 on an authenticated call
//! tears the session down.

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use roomflow_types::ApiEnvelope;
use roomflow_types::api::error_message_from_body;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::session::SessionContext;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionContext) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidOperation(format!("bad endpoint '{}': {}", path, e)))
    }

    /// A request with the bearer token attached when signed in.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.http.request(method, self.url(path)?);
        Ok(match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// `data` of the response envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (status, body) = self.execute(self.request(Method::GET, path)?).await?;
        envelope_data(status, body)
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path)?.json(body);
        let (status, body) = self.execute(builder).await?;
        envelope_data(status, body)
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let mut builder = self.request(Method::PUT, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (status, body) = self.execute(builder).await?;
        envelope_data(status, body)
    }

    /// Status and body of a call made without the bearer token. The caller
    /// judges the status; a 401 here leaves the session alone.
    pub async fn post_anonymous<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, Value)> {
        let builder = self.http.request(Method::POST, self.url(path)?).json(body);
        self.send(builder).await
    }

    /// Send and check the envelope's acknowledgement; returns its message.
    pub async fn ack<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<String>> {
        let mut builder = self.request(method, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (status, body) = self.execute(builder).await?;
        envelope_ack(status, body)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(StatusCode, Value)> {
        let request = builder.build().map_err(Error::from)?;
        let method = request.method().clone();
        let url = request.url().clone();
        let (status, body) = self.send_request(request).await?;

        if let Err(err) = check_status(status, &body) {
            if matches!(err, Error::Unauthorized) {
                tracing::warn!("{} {} returned 401, clearing session", method, url);
                if let Err(clear_err) = self.session.end() {
                    tracing::warn!("Failed to clear session: {}", clear_err);
                }
            } else if err.is_expected() {
                tracing::debug!("{} {} rejected ({}): {}", method, url, status, err);
            } else {
                tracing::error!("{} {} failed ({}): {}", method, url, status, err);
            }
            return Err(err);
        }
        Ok((status, body))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<(StatusCode, Value)> {
        let request = builder.build().map_err(Error::from)?;
        self.send_request(request).await
    }

    async fn send_request(&self, request: reqwest::Request) -> Result<(StatusCode, Value)> {
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!("{} {}", method, url);

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                let err = Error::from(err);
                tracing::debug!("{} {} failed: {}", method, url, err);
                return Err(err);
            }
        };
        let status = response.status();
        let bytes = response.bytes().await.map_err(Error::from)?;
        let body = parse_body(&bytes, status)?;
        Ok((status, body))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized)
        .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", raw, e)))
}

/// Empty bodies read as `null`. Non-JSON error bodies are kept as text so
/// the status check can still report something.
fn parse_body(bytes: &[u8], status: StatusCode) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => {
            Ok(Value::String(String::from_utf8_lossy(bytes).into_owned()))
        }
        Err(err) => Err(Error::Decode(err.to_string())),
    }
}

/// The message a failed response carries, from JSON or a plain-text body.
pub fn backend_message(body: &Value) -> Option<String> {
    error_message_from_body(body).or_else(|| match body {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    })
}

/// Map a non-success status to an error carrying the backend's message.
pub fn check_status(status: StatusCode, body: &Value) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized);
    }
    let message = backend_message(body).unwrap_or_else(|| {
        format!(
            "Request failed: {}",
            status.canonical_reason().unwrap_or(status.as_str())
        )
    });
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

pub fn envelope_data<T: DeserializeOwned>(status: StatusCode, body: Value) -> Result<T> {
    let envelope: ApiEnvelope<T> = serde_json::from_value(body)?;
    if envelope.success == Some(false) {
        return Err(rejected(status, &envelope));
    }
    let message = envelope.message.clone();
    envelope.into_data().ok_or_else(|| {
        Error::Decode(match message {
            Some(message) => format!("response has no data ({})", message),
            None => "response has no data".to_string(),
        })
    })
}

/// Rejected only when `success` is false and no data came back.
pub fn envelope_ack(status: StatusCode, body: Value) -> Result<Option<String>> {
    if body.is_null() {
        return Ok(None);
    }
    let envelope: ApiEnvelope<Value> = serde_json::from_value(body)?;
    let has_data = envelope.data.as_ref().is_some_and(|d| !d.is_null());
    if envelope.success != Some(false) || has_data {
        return Ok(envelope.message);
    }
    Err(rejected(status, &envelope))
}

fn rejected<T>(status: StatusCode, envelope: &ApiEnvelope<T>) -> Error {
    Error::Api {
        status: status.as_u16(),
        message: envelope
            .error_message()
            .unwrap_or_else(|| "Request was not accepted".to_string()),
    }
}

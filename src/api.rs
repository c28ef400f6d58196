// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Backend boundary: the response envelope, error kinds, and the transport
//! that carries one request per call.

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::{Config, ConfigError};
use crate::services::{CatalogService, ClientService, QuoteService};

const UA: &str = concat!("cotiza/", env!("CARGO_PKG_VERSION"));

/// Header carrying the static API key on every request (`XApiKey`).
pub const API_KEY_HEADER: &str = "xapikey";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response came back: network failure, refused connection, timeout.
    #[error("Error: {0}")]
    Client(String),
    /// The backend answered with an HTTP error status.
    #[error("Error code: {status}, message: {message}")]
    Server { status: u16, message: String },
    /// The backend answered 2xx with `success: false`.
    #[error("{message}")]
    Rejected { code: i32, message: String },
    /// A 2xx body that is not a valid envelope.
    #[error("Unreadable backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Tagged form of the `{ type, code, success, message, data }` wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success { code: i32, message: String, data: T },
    Failure { code: i32, message: String },
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type", default)]
    _kind: i32,
    #[serde(default)]
    code: i32,
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// `data` is only decoded when `success` is true.
    pub fn from_body(body: &str) -> ApiResult<Self> {
        let raw: RawEnvelope = serde_json::from_str(body)?;
        let message = raw.message.unwrap_or_default();
        if raw.success {
            let data = serde_json::from_value(raw.data)?;
            Ok(Envelope::Success {
                code: raw.code,
                message,
                data,
            })
        } else {
            Ok(Envelope::Failure {
                code: raw.code,
                message,
            })
        }
    }
}

impl<T> Envelope<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Envelope::Success {
                code,
                message,
                data,
            } => Envelope::Success {
                code,
                message,
                data: f(data),
            },
            Envelope::Failure { code, message } => Envelope::Failure { code, message },
        }
    }

    pub fn into_result(self) -> ApiResult<T> {
        match self {
            Envelope::Success { data, .. } => Ok(data),
            Envelope::Failure { code, message } => Err(ApiError::Rejected { code, message }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Relative to the configured base URL, e.g. `Clientes/Listar`.
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(method: Method, path: impl Into<String>, body: Value) -> Self {
        Self {
            method,
            path: path.into(),
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Executes a single request. Implementations make exactly one attempt.
pub trait Transport {
    fn execute(&self, request: &ApiRequest) -> ApiResult<RawResponse>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key).map_err(|_| ConfigError::InvalidApiKey)?;
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(UA)
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> ApiResult<RawResponse> {
        let url = format!("{}/{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let resp = builder.send().map_err(|e| ApiError::Client(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

/// Entry point to the backend. Services borrow it; it owns the transport.
pub struct ApiClient {
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self)
    }

    pub fn clients(&self) -> ClientService<'_> {
        ClientService::new(self)
    }

    pub fn quotes(&self) -> QuoteService<'_> {
        QuoteService::new(self)
    }

    pub fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<Envelope<T>> {
        debug!(method = %request.method, path = %request.path, "backend request");
        let outcome = self.transport.execute(&request).and_then(|resp| {
            if (200..300).contains(&resp.status) {
                Envelope::from_body(&resp.body)
            } else {
                Err(ApiError::Server {
                    status: resp.status,
                    message: server_message(&resp),
                })
            }
        });
        if let Err(err) = &outcome {
            error!(path = %request.path, %err, "backend request failed");
        }
        outcome
    }
}

/// Prefer the envelope's own message; fall back to the status reason.
fn server_message(resp: &RawResponse) -> String {
    serde_json::from_str::<RawEnvelope>(&resp.body)
        .ok()
        .and_then(|raw| raw.message)
        .filter(|m| !m.is_empty())
        .or_else(|| {
            reqwest::StatusCode::from_u16(resp.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_ignores_data_shape() {
        let env: Envelope<Vec<i64>> =
            Envelope::from_body(r#"{"type":0,"code":409,"success":false,"message":"in use","data":{"x":1}}"#)
                .unwrap();
        assert_eq!(
            env,
            Envelope::Failure {
                code: 409,
                message: "in use".into()
            }
        );
    }

    #[test]
    fn server_message_falls_back_to_reason() {
        let resp = RawResponse {
            status: 404,
            body: "<html>not found</html>".into(),
        };
        assert_eq!(server_message(&resp), "Not Found");
        let resp = RawResponse {
            status: 500,
            body: r#"{"success":false,"message":"db down"}"#.into(),
        };
        assert_eq!(server_message(&resp), "db down");
    }

    #[test]
    fn error_display_distinguishes_origin() {
        assert_eq!(ApiError::Client("refused".into()).to_string(), "Error: refused");
        let e = ApiError::Server {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(e.to_string(), "Error code: 503, message: Service Unavailable");
    }
}

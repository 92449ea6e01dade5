//! HTTP Store Client Module
//!
//! Talks to a parameter service over a small JSON protocol:
//!
//! - `GET  {endpoint}/parameter?name=N&with_decryption=B` -> `{name, value, version}`
//! - `GET  {endpoint}/parameter-metadata?name=N` -> `{name, version}`
//! - `PUT  {endpoint}/parameter` with `{name, value, encrypted, overwrite}` -> `{version}`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::{Parameter, ParameterMetadata, StoreClient, StoreError};

#[derive(Debug, Serialize)]
struct WriteBody<'a> {
    name: &'a str,
    value: &'a str,
    encrypted: bool,
    overwrite: bool,
}

#[derive(Debug, Deserialize)]
struct WriteReply {
    version: i64,
}

// == HTTP Store Client ==
/// [`StoreClient`] backed by a remote parameter service.
#[derive(Debug, Clone)]
pub struct HttpStoreClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpStoreClient {
    // == Constructor ==
    /// Creates a client for the service at `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, endpoint))
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { http, endpoint }
    }

    /// Returns the base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }
}

/// Maps non-success statuses onto [`StoreError`] and decodes the body.
async fn decode<T: DeserializeOwned>(name: &str, response: Response) -> Result<T, StoreError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()));
    }

    let message = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => StoreError::NotFound(name.to_string()),
        StatusCode::CONFLICT => StoreError::AlreadyExists(name.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::AccessDenied(message),
        StatusCode::SERVICE_UNAVAILABLE => StoreError::Unavailable(message),
        _ => StoreError::Remote {
            status: status.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl StoreClient for HttpStoreClient {
    async fn fetch_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Parameter, StoreError> {
        debug!(parameter = name, with_decryption, "fetching parameter");
        let response = self
            .http
            .get(self.url("parameter"))
            .query(&[("name", name), ("with_decryption", bool_str(with_decryption))])
            .send()
            .await?;
        decode(name, response).await
    }

    async fn fetch_parameter_metadata(&self, name: &str) -> Result<ParameterMetadata, StoreError> {
        debug!(parameter = name, "fetching parameter metadata");
        let response = self
            .http
            .get(self.url("parameter-metadata"))
            .query(&[("name", name)])
            .send()
            .await?;
        decode(name, response).await
    }

    async fn write_parameter(
        &self,
        name: &str,
        value: &str,
        encrypted: bool,
        overwrite: bool,
    ) -> Result<i64, StoreError> {
        debug!(parameter = name, encrypted, overwrite, "writing parameter");
        let body = WriteBody {
            name,
            value,
            encrypted,
            overwrite,
        };
        let response = self.http.put(self.url("parameter")).json(&body).send().await?;
        let reply: WriteReply = decode(name, response).await?;
        Ok(reply.version)
    }
}

fn bool_str(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

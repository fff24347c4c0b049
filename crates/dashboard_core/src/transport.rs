//! HTTP transport for the cats resource.
//!
//! Every call maps onto exactly one request. Non-2xx responses are folded into
//! [`TransportError::Status`] with a message derived from the service's
//! `detail` convention; nothing above this module looks at response bodies.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Cat, CatId},
    error::describe_failure,
    protocol::{NewCat, SalaryUpdate},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The service could not be reached or did not answer.
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Decode(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[async_trait]
pub trait CatsTransport: Send + Sync {
    async fn list(&self) -> TransportResult<Vec<Cat>>;
    async fn create(&self, payload: &NewCat) -> TransportResult<Cat>;
    async fn patch_salary(&self, id: CatId, salary: f64) -> TransportResult<Cat>;
    async fn delete(&self, id: CatId) -> TransportResult<()>;
}

pub struct HttpCatsTransport {
    http: Client,
    api_base: String,
}

impl HttpCatsTransport {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_base)
    }

    pub fn with_client(http: Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn collection_url(&self) -> String {
        format!("{}/cats/", self.api_base)
    }

    fn record_url(&self, id: CatId) -> String {
        format!("{}/cats/{}", self.api_base, id.0)
    }
}

#[async_trait]
impl CatsTransport for HttpCatsTransport {
    async fn list(&self) -> TransportResult<Vec<Cat>> {
        let res = self
            .http
            .get(self.collection_url())
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await?;
        decode(ensure_success(res).await?).await
    }

    async fn create(&self, payload: &NewCat) -> TransportResult<Cat> {
        let res = self
            .http
            .post(self.collection_url())
            .json(payload)
            .send()
            .await?;
        decode(ensure_success(res).await?).await
    }

    async fn patch_salary(&self, id: CatId, salary: f64) -> TransportResult<Cat> {
        let res = self
            .http
            .patch(format!("{}/salary", self.record_url(id)))
            .json(&SalaryUpdate { salary })
            .send()
            .await?;
        decode(ensure_success(res).await?).await
    }

    async fn delete(&self, id: CatId) -> TransportResult<()> {
        let res = self.http.delete(self.record_url(id)).send().await?;
        ensure_success(res).await?;
        Ok(())
    }
}

async fn ensure_success(res: Response) -> TransportResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let url = res.url().to_string();
    // An unreadable body is treated like an unparseable one.
    let body = res.bytes().await.unwrap_or_default();
    let message = describe_failure(status.as_u16(), &body);
    debug!("transport: request failed url={url} status={status} message={message}");
    Err(TransportError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(res: Response) -> TransportResult<T> {
    let body = res.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| TransportError::Decode(err.to_string()))
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;

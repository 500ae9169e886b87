use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("order api request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("order api returned status {0}")]
    Status(StatusCode),
}

/// Raw access to the order API. The service layer only ever sees the decoded
/// JSON body; tests substitute a scripted implementation.
#[async_trait]
pub trait OrderTransport: Send + Sync {
    async fn fetch(&self) -> Result<Value, TransportError>;
}

pub struct HttpOrderTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOrderTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), endpoint: endpoint.into() }
    }
}

#[async_trait]
impl OrderTransport for HttpOrderTransport {
    async fn fetch(&self) -> Result<Value, TransportError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        // A body that is not valid JSON surfaces as a decode error here and
        // is handled exactly like a failed request.
        Ok(response.json::<Value>().await?)
    }
}

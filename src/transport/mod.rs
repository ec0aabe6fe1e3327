use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::TransportError;

/// Sends one JSON body to the endpoint and hands back the parsed JSON reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value, TransportError>;
}

// reqwest-backed transport; no timeout is set so a request runs until the server answers
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value, TransportError> {
        info!("POST {}", url);
        debug!("Payload: {}", body);

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let response_json: Value =
            serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))?;
        debug!("Response JSON: {}", response_json);

        Ok(response_json)
    }
}

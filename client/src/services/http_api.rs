//! REST client for the results backend
//!
//! Talks to the relay's `/api` routes. A full fetch must answer 200 with a
//! JSON array; anything else is reported as a fetch error.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

use shared::{CreatedResponse, ProcessId, ResultDraft, ResultId, ResultRecord, process_debug};

use crate::error::{ClientError, ClientResult};
use crate::traits::ResultsApi;

/// Real REST implementation of `ResultsApi`
#[derive(Clone)]
pub struct RealResultsApi {
    client: Client,
    base_url: Url,
}

impl RealResultsApi {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: Url, timeout: Duration) -> ClientResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::ConfigError {
                field: "api_url".to_string(),
                value: base_url.to_string(),
            });
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// `<base>/api` or `<base>/api/<id>`
    fn endpoint(&self, id: Option<&ResultId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("api");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    /// Turn a non-success response into a mutation error carrying the
    /// backend's own message when it sent one
    async fn mutation_error(operation: &str, response: Response) -> ClientError {
        let status = response.status();
        let body: Option<serde_json::Value> = response.json().await.ok();
        let detail = body
            .as_ref()
            .and_then(|body| body.get("error").or_else(|| body.get("message")))
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("status {}", status.as_u16()));

        ClientError::mutation(operation, detail)
    }
}

#[async_trait]
impl ResultsApi for RealResultsApi {
    async fn fetch_all(&self) -> ClientResult<Vec<ResultRecord>> {
        let url = self.endpoint(None);
        process_debug!(ProcessId::current(), "📥 Fetching results from {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        if !body.is_array() {
            return Err(ClientError::UnexpectedPayload {
                details: "Expected array response".to_string(),
            });
        }

        serde_json::from_value(body).map_err(|e| ClientError::UnexpectedPayload {
            details: e.to_string(),
        })
    }

    async fn create(&self, draft: ResultDraft) -> ClientResult<ResultRecord> {
        let response = self.client.post(self.endpoint(None)).json(&draft).send().await?;
        if !response.status().is_success() {
            return Err(Self::mutation_error("Add", response).await);
        }

        let created: CreatedResponse = response.json().await?;
        Ok(created.data)
    }

    async fn update(&self, id: &ResultId, draft: ResultDraft) -> ClientResult<ResultRecord> {
        let response = self.client.put(self.endpoint(Some(id))).json(&draft).send().await?;
        if !response.status().is_success() {
            return Err(Self::mutation_error("Edit", response).await);
        }

        Ok(response.json().await?)
    }

    async fn delete(&self, id: &ResultId) -> ClientResult<()> {
        let response = self.client.delete(self.endpoint(Some(id))).send().await?;
        if !response.status().is_success() {
            return Err(Self::mutation_error("Delete", response).await);
        }

        Ok(())
    }
}

//! Native gateway over reqwest

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{is_success, member_url, RecordGateway};
use crate::error::{FailureCause, GatewayError};
use crate::record::{Record, RecordDraft, RecordId};

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait(?Send)]
impl RecordGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<Record>, GatewayError> {
        debug!(url = %self.base_url, "GET");
        fetch_json(self.client.get(&self.base_url))
            .await
            .map_err(GatewayError::FetchFailed)
    }

    async fn create(&self, draft: &RecordDraft) -> Result<Record, GatewayError> {
        debug!(url = %self.base_url, "POST");
        fetch_json(self.client.post(&self.base_url).json(draft))
            .await
            .map_err(GatewayError::CreateFailed)
    }

    async fn update(&self, id: &RecordId, draft: &RecordDraft) -> Result<Record, GatewayError> {
        let url = member_url(&self.base_url, id);
        debug!(url = %url, "PUT");
        fetch_json(self.client.put(&url).json(draft))
            .await
            .map_err(GatewayError::UpdateFailed)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), GatewayError> {
        let url = member_url(&self.base_url, id);
        debug!(url = %url, "DELETE");
        send(self.client.delete(&url))
            .await
            .map(|_| ())
            .map_err(GatewayError::DeleteFailed)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, FailureCause> {
    let response = request
        .send()
        .await
        .map_err(|e| FailureCause::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    if is_success(status) {
        Ok(response)
    } else {
        Err(FailureCause::Status(status))
    }
}

async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FailureCause> {
    send(request)
        .await?
        .json::<T>()
        .await
        .map_err(|e| FailureCause::Decode(e.to_string()))
}

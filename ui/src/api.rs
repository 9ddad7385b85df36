//! Browser gateway to the remote user collection

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use userdesk::error::{FailureCause, GatewayError};
use userdesk::gateway::{is_success, member_url, RecordGateway};
use userdesk::record::{Record, RecordDraft, RecordId};

const DEFAULT_API_BASE: &str = "https://699319588f29113acd3ff867.mockapi.io/user-crud/user-crud";

/// Collection endpoint, fixed at build time through `USERDESK_API_URL`
pub fn api_base_url() -> &'static str {
    option_env!("USERDESK_API_URL").unwrap_or(DEFAULT_API_BASE)
}

#[derive(Debug, Clone)]
pub struct FetchGateway {
    base_url: String,
}

impl FetchGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait(?Send)]
impl RecordGateway for FetchGateway {
    async fn list(&self) -> Result<Vec<Record>, GatewayError> {
        fetch_json(Request::get(&self.base_url))
            .await
            .map_err(GatewayError::FetchFailed)
    }

    async fn create(&self, draft: &RecordDraft) -> Result<Record, GatewayError> {
        send_json(Request::post(&self.base_url), draft)
            .await
            .map_err(GatewayError::CreateFailed)
    }

    async fn update(&self, id: &RecordId, draft: &RecordDraft) -> Result<Record, GatewayError> {
        send_json(Request::put(&member_url(&self.base_url, id)), draft)
            .await
            .map_err(GatewayError::UpdateFailed)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), GatewayError> {
        let response = Request::delete(&member_url(&self.base_url, id))
            .send()
            .await
            .map_err(|e| FailureCause::Transport(format!("Request failed: {}", e)))
            .and_then(check_status);
        response.map(|_| ()).map_err(GatewayError::DeleteFailed)
    }
}

fn check_status(response: Response) -> Result<Response, FailureCause> {
    if is_success(response.status()) {
        Ok(response)
    } else {
        Err(FailureCause::Status(response.status()))
    }
}

async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FailureCause> {
    let response = request
        .send()
        .await
        .map_err(|e| FailureCause::Transport(format!("Request failed: {}", e)))?;

    check_status(response)?
        .json()
        .await
        .map_err(|e| FailureCause::Decode(format!("Failed to parse response: {}", e)))
}

async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    body: &RecordDraft,
) -> Result<T, FailureCause> {
    let response = request
        .json(body)
        .map_err(|e| FailureCause::Transport(format!("Failed to serialize body: {}", e)))?
        .send()
        .await
        .map_err(|e| FailureCause::Transport(format!("Request failed: {}", e)))?;

    check_status(response)?
        .json()
        .await
        .map_err(|e| FailureCause::Decode(format!("Failed to parse response: {}", e)))
}

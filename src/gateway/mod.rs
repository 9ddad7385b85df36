//! Remote sync gateway
//!
//! One request/response cycle per operation against the remote collection:
//!
//! - `GET <base>` lists records
//! - `POST <base>` creates one (body: record without id)
//! - `PUT <base>/<id>` replaces one (body: record without id)
//! - `DELETE <base>/<id>` removes one
//!
//! Any non-2xx status is a failure. There are no retries; retrying is a user
//! action.

#[cfg(feature = "client")]
pub mod http;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::record::{Record, RecordDraft, RecordId};

#[cfg(feature = "client")]
pub use http::HttpGateway;

/// Transport-agnostic access to the remote collection.
///
/// Futures are not required to be `Send` so browser fetch implementations
/// can satisfy the trait.
#[async_trait(?Send)]
pub trait RecordGateway {
    async fn list(&self) -> Result<Vec<Record>, GatewayError>;

    /// Server assigns the id of the returned record
    async fn create(&self, draft: &RecordDraft) -> Result<Record, GatewayError>;

    async fn update(&self, id: &RecordId, draft: &RecordDraft) -> Result<Record, GatewayError>;

    async fn delete(&self, id: &RecordId) -> Result<(), GatewayError>;
}

/// `<base>/<id>` with the id percent-encoded
pub fn member_url(base_url: &str, id: &RecordId) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(id.as_str())
    )
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

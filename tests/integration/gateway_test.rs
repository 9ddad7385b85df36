use super::common;

use common::test_server::{user, TestServer};
use userdesk::error::{FailureCause, GatewayError};
use userdesk::gateway::{HttpGateway, RecordGateway};
use userdesk::record::{RecordDraft, RecordId};

#[tokio::test]
async fn test_list_decodes_records() {
    let server = TestServer::with_records(vec![user("1", "Ann", "Bo"), user("2", "Jo", "Lee")]).await;
    let gateway = HttpGateway::new(&server.base_url);

    let records = gateway.list().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id, RecordId::new("2"));
    assert_eq!(records[1].value("lastName"), "Lee");
    assert_eq!(records[1].value("createdAt"), "2024-01-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_create_sends_body_without_id() {
    let server = TestServer::new().await;
    let gateway = HttpGateway::new(&server.base_url);
    let draft = RecordDraft::new().with("firstName", "Kim").with("email", "kim@x.com");

    let created = gateway.create(&draft).await.unwrap();

    assert_eq!(created.id, RecordId::new("1"));
    assert_eq!(created.value("firstName"), "Kim");
    assert_eq!(server.records()[0]["email"], "kim@x.com");
    assert_eq!(server.requests(), ["POST /users"]);
}

#[tokio::test]
async fn test_update_targets_member_url() {
    let server = TestServer::with_records(vec![user("7", "Jo", "Lee")]).await;
    let gateway = HttpGateway::new(format!("{}/", server.base_url));
    let draft = RecordDraft::new().with("firstName", "Jo").with("lastName", "Park");

    let updated = gateway.update(&RecordId::new("7"), &draft).await.unwrap();

    assert_eq!(updated.value("lastName"), "Park");
    assert_eq!(server.requests(), ["PUT /users/7"]);
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = TestServer::with_records(vec![user("3", "Al", "Roe")]).await;
    let gateway = HttpGateway::new(&server.base_url);

    gateway.delete(&RecordId::new("3")).await.unwrap();

    assert!(server.records().is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let server = TestServer::new().await;
    server.fail_with(500);
    let gateway = HttpGateway::new(&server.base_url);

    let err = gateway.list().await.unwrap_err();
    assert_eq!(err, GatewayError::FetchFailed(FailureCause::Status(500)));

    let err = gateway.delete(&RecordId::new("1")).await.unwrap_err();
    assert_eq!(err, GatewayError::DeleteFailed(FailureCause::Status(500)));
}

#[tokio::test]
async fn test_missing_record_is_update_failure() {
    let server = TestServer::new().await;
    let gateway = HttpGateway::new(&server.base_url);

    let err = gateway
        .update(&RecordId::new("404"), &RecordDraft::new())
        .await
        .unwrap_err();
    assert_eq!(err, GatewayError::UpdateFailed(FailureCause::Status(404)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() {
    let gateway = HttpGateway::new("http://127.0.0.1:9/users");

    let err = gateway.list().await.unwrap_err();
    assert!(matches!(err.cause(), FailureCause::Transport(_)));
}

use super::common;

use std::sync::Arc;

use common::test_server::{user, TestServer};
use userdesk::cli::{run, Command};
use userdesk::clock::ManualClock;
use userdesk::config::Settings;
use userdesk::gateway::HttpGateway;
use userdesk::orchestrator::Orchestrator;
use userdesk::schema::user_schema;

async fn exec(server: &TestServer, command: Command, stdin: &str) -> (bool, String) {
    let settings = Settings::from_file(None).unwrap();
    let gateway = HttpGateway::new(&server.base_url);
    let mut app = Orchestrator::new(user_schema(), Arc::new(ManualClock::new(0)));
    let mut out = Vec::new();
    let mut input = stdin.as_bytes();

    let ok = run(&command, &settings, &mut app, &gateway, &mut out, &mut input)
        .await
        .unwrap();
    (ok, String::from_utf8(out).unwrap())
}

fn set(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn test_list_prints_table() {
    let server = TestServer::with_records(vec![user("1", "Ann", "Bo")]).await;

    let (ok, out) = exec(&server, Command::List { cards: false }, "").await;

    assert!(ok);
    assert!(out.starts_with("Users (1)\n"));
    assert!(out.contains("Ann"));
}

#[tokio::test]
async fn test_list_failure_prints_banner() {
    let server = TestServer::new().await;
    server.fail_with(503);

    let (ok, out) = exec(&server, Command::List { cards: true }, "").await;

    assert!(!ok);
    assert!(out.contains("Failed to fetch users. Run the command again to retry."));
    assert!(out.contains("[error] Failed to fetch users"));
}

#[tokio::test]
async fn test_add_rejects_invalid_without_request() {
    let server = TestServer::new().await;
    let command = Command::Add {
        set: set(&[
            ("firstName", "A"),
            ("lastName", "Lee"),
            ("phone", "555-123-4567"),
            ("email", "a@x.com"),
        ]),
    };

    let (ok, out) = exec(&server, command, "").await;

    assert!(!ok);
    assert!(out.contains("firstName: Must be at least 2 characters"));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_add_creates_user() {
    let server = TestServer::new().await;
    let command = Command::Add {
        set: set(&[
            ("firstName", "Jo"),
            ("lastName", "Lee"),
            ("phone", "555-123-4567"),
            ("email", "jo@x.com"),
        ]),
    };

    let (ok, out) = exec(&server, command, "").await;

    assert!(ok);
    assert_eq!(out, "[success] User \"Jo Lee\" created successfully!\n");
    assert_eq!(server.records().len(), 1);
}

#[tokio::test]
async fn test_edit_unknown_id() {
    let server = TestServer::with_records(vec![user("1", "Ann", "Bo")]).await;
    let command = Command::Edit {
        id: "9".into(),
        set: set(&[("lastName", "Park")]),
    };

    let (ok, out) = exec(&server, command, "").await;

    assert!(!ok);
    assert!(out.contains("No user with id 9"));
}

#[tokio::test]
async fn test_edit_updates_user() {
    let server = TestServer::with_records(vec![user("2", "Jo", "Lee")]).await;
    let command = Command::Edit {
        id: "2".into(),
        set: set(&[("lastName", "Park")]),
    };

    let (ok, out) = exec(&server, command, "").await;

    assert!(ok);
    assert!(out.contains("[success] User \"Jo Park\" updated successfully!"));
    assert_eq!(server.records()[0]["lastName"], "Park");
}

#[tokio::test]
async fn test_delete_declined_keeps_user() {
    let server = TestServer::with_records(vec![user("3", "Al", "Roe")]).await;
    let command = Command::Delete {
        id: "3".into(),
        yes: false,
    };

    let (ok, out) = exec(&server, command, "n\n").await;

    assert!(ok);
    assert!(out.contains("Are you sure you want to delete \"Al Roe\"? This action cannot be undone. [y/N] "));
    assert!(out.contains("Cancelled"));
    assert_eq!(server.records().len(), 1);
}

#[tokio::test]
async fn test_delete_confirmed() {
    let server = TestServer::with_records(vec![user("3", "Al", "Roe")]).await;
    let command = Command::Delete {
        id: "3".into(),
        yes: false,
    };

    let (ok, out) = exec(&server, command, "y\n").await;

    assert!(ok);
    assert!(out.contains("[success] User \"Al Roe\" deleted."));
    assert!(server.records().is_empty());
}

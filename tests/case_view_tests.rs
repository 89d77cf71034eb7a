//! End-to-end tests of the read-only case views and the health probe.

mod common;

use common::factory::{CASE_REFERENCE, case_record};
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn health_probe_reports_ok() {
    let app = spawn_app().await;

    let response = app.client.get("/health").await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn case_list_links_to_each_case() {
    let app = spawn_app().await;
    app.case_api.seed_record(CASE_REFERENCE, case_record());
    app.case_api.seed_record("PC-2001-0001", case_record());

    let response = app.client.get("/cases").await;

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("/cases/PC-1922-1879/client-details"));
    assert!(body.contains("/cases/PC-2001-0001/client-details"));
}

#[tokio::test]
async fn case_search_filters_by_reference() {
    let app = spawn_app().await;
    app.case_api.seed_record(CASE_REFERENCE, case_record());
    app.case_api.seed_record("PC-2001-0001", case_record());

    let response = app.client.get("/cases/search?query=1922").await;

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("PC-1922-1879"));
    assert!(!body.contains("PC-2001-0001"));
}

#[tokio::test]
async fn client_details_page_shows_the_record() {
    let app = spawn_app().await;
    app.case_api.seed_record(CASE_REFERENCE, case_record());

    let response = app.client.get("/cases/PC-1922-1879/client-details").await;

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Jane Doe"));
    assert!(body.contains("jane.doe@example.org"));
}

#[tokio::test]
async fn client_details_page_shows_nested_blocks() {
    let app = spawn_app().await;
    app.case_api.seed_record(CASE_REFERENCE, case_record());

    let response = app.client.get("/cases/PC-1922-1879/client-details").await;

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Sam Carer"));
    assert!(body.contains("Support worker"));
    assert!(body.contains("thirdParty.fullName"));
    assert!(body.contains("clientSupportNeeds.textRelay"));
}

#[tokio::test]
async fn client_details_for_an_unknown_case_is_not_found() {
    let app = spawn_app().await;

    let response = app.client.get("/cases/PC-0000-0000/client-details").await;

    assert_eq!(response.status(), 404);
}

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use uptime_dashboard::{ApiClient, Dashboard, DashboardError, render_page};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(format!("{}/api/", server.uri()), Duration::from_secs(2)).unwrap()
}

async fn mount_json(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_both_endpoints_with_json_accept_header() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/instant",
        json!({"data": [{"timestamp": "2024-03-31T09:00:00Z", "up": true}]}),
    )
    .await;
    mount_json(
        &server,
        "/api/daily",
        json!({"data": [{"day": "2024-03-31", "up": 9, "down": 1}]}),
    )
    .await;

    let fetched = client_for(&server).fetch_all().await;

    assert_eq!(fetched.instant.as_ref().map(Vec::len), Some(1));
    let daily = fetched.daily.unwrap();
    assert_eq!(daily[0].day, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    assert_eq!((daily[0].up, daily[0].down), (9, 1));
}

#[tokio::test]
async fn non_ok_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/daily"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_daily().await;

    assert!(matches!(
        result,
        Err(DashboardError::UnexpectedStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn malformed_json_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/instant"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": [oops"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_instant().await;

    assert!(matches!(result, Err(DashboardError::Json(_))));
}

#[tokio::test]
async fn failed_request_only_drops_its_own_chart() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/instant",
        json!({"data": [{"timestamp": "2024-03-31T09:00:00Z", "up": false}]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/daily"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetched = client_for(&server).fetch_all().await;
    assert!(fetched.daily.is_none());

    let dashboard = Dashboard::build(
        fetched.instant.as_deref(),
        fetched.daily.as_deref(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    );
    let ids: Vec<&str> = dashboard.charts().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["chart-instant"]);

    let html = render_page(&dashboard).unwrap();
    assert!(html.contains("\"chart-instant\":{"));
    assert!(!html.contains("\"chart-today\":"));
}

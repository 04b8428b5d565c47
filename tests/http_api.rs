use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use gdp_dashboard::config::DashboardConfig;
use gdp_dashboard::data::loader::read_csv;
use gdp_dashboard::data::model::Dataset;
use gdp_dashboard::server::{create_router, DashboardState};

fn router() -> Router {
    let csv = "country,2000,2001\nA,100,110\nB,2k,2100\n";
    let table = read_csv(csv::Reader::from_reader(csv.as_bytes())).unwrap();
    let dataset = Dataset::from_raw(table).unwrap();
    let state = DashboardState::new(dataset, &DashboardConfig::default());
    create_router(Arc::new(state))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn render(body: Value) -> (StatusCode, Value) {
    let request = Request::post("/api/render")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(request).await
}

#[tokio::test]
async fn index_page_is_html() {
    let response = router()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("gdp-graph"));
}

#[tokio::test]
async fn health_reports_dataset_shape() {
    let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "countries": 2, "years": 2}));
}

#[tokio::test]
async fn layout_seeds_controls_and_initial_figure() {
    let (status, body) = send(Request::get("/api/layout").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dropdown"]["options"], json!(["A", "B"]));
    assert_eq!(body["slider"]["min"], 2000);
    assert_eq!(body["slider"]["max"], 2001);
    assert_eq!(body["slider"]["value"], json!([2000, 2001]));
    assert_eq!(body["slider"]["marks"], json!({"2000": "2000"}));
    assert_eq!(body["figure"]["series"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_request_renders_everything() {
    let (status, body) = render(json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "GDP Per Capita Over Time");
    assert_eq!(body["series"][1]["name"], "B");
    assert_eq!(
        body["series"][1]["points"],
        json!([{"year": "2000", "value": 2000.0}, {"year": "2001", "value": 2100.0}])
    );
}

#[tokio::test]
async fn filters_by_country_and_year() {
    let (status, body) = render(json!({"countries": ["A"], "year_range": [2000, 2000]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["series"],
        json!([{
            "name": "A",
            "color": body["series"][0]["color"],
            "points": [{"year": "2000", "value": 100.0}]
        }])
    );
}

#[tokio::test]
async fn unknown_country_is_not_an_error() {
    let (status, body) = render(json!({"countries": ["Z"], "year_range": [2000, 2001]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["series"], json!([]));
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let (status, body) = render(json!({"year_range": [2001, 2000]})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("2001"));

    let (status, _) = render(json!({"year_range": [2000]})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn fractional_year_gets_json_error() {
    let (status, body) = render(json!({"year_range": [2000.5, 2001]})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let request = Request::post("/api/render")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"countries\": ["))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let request = Request::post("/api/render").body(Body::from("{}")).unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"].is_string());
}

//! HTTP front-end: serves the page, the layout, and the render callback.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::chart::{self, ChartSpec};
use crate::config::DashboardConfig;
use crate::data::filter::Selection;
use crate::data::model::Dataset;
use crate::error::DashboardError;
use crate::layout::{self, Layout};

const INDEX_HTML: &str = include_str!("index.html");

/// Read-only state shared by every request. Built once before serving.
pub struct DashboardState {
    pub dataset: Dataset,
    pub layout: Layout,
}

impl DashboardState {
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Self {
        let layout = layout::build_layout(&dataset, config);
        Self { dataset, layout }
    }
}

/// Body of `POST /api/render`. Both fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub countries: Option<Vec<String>>,
    #[serde(default)]
    pub year_range: Option<Vec<i32>>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub countries: usize,
    pub years: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Request-level failure mapped onto an HTTP status. Always answered with
/// a JSON `{"error": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    Dashboard(DashboardError),
    /// The body was not a valid `RenderRequest`.
    Rejected(JsonRejection),
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        ApiError::Dashboard(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Dashboard(err) if err.is_selection_error() => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            ApiError::Dashboard(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Rejected(rejection) => (rejection.status(), rejection.body_text()),
        };
        warn!("Render request failed ({status}): {error}");
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Create the dashboard router.
pub fn create_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health_check))
        .route("/api/layout", get(layout_json))
        .route("/api/render", post(render_chart))
        .with_state(state)
}

/// Bind the configured address and serve until the process stops.
pub async fn serve(state: Arc<DashboardState>, config: &DashboardConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).await
}

async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check(State(state): State<Arc<DashboardState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        countries: state.dataset.len(),
        years: state.dataset.years().len(),
    })
}

async fn layout_json(State(state): State<Arc<DashboardState>>) -> Json<Layout> {
    Json(state.layout.clone())
}

async fn render_chart(
    State(state): State<Arc<DashboardState>>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<ChartSpec>, ApiError> {
    let Json(request) = payload?;
    let selection = Selection::from_controls(request.countries, request.year_range.as_deref())?;
    let chart = chart::render_selection(&state.dataset, &selection);
    debug!(
        "Rendered {} series ({} points) for {:?}",
        chart.series.len(),
        chart.point_count(),
        selection
    );
    Ok(Json(chart))
}

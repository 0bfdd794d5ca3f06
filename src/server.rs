//! Host page server: the city form with the weather document embedded.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::error::LookupError;
use crate::model::DisplayBundle;
use crate::pipeline::WeatherService;
use crate::render::{PageView, Renderer};

/// Shared by all requests; nothing in here changes after startup.
#[derive(Debug)]
pub struct AppState {
    pub service: WeatherService,
    pub renderer: Renderer,
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    #[serde(default)]
    pub city: Option<String>,
}

impl CityQuery {
    fn city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Failed request as an HTTP response.
enum ApiError {
    /// No `city` query parameter, or only whitespace.
    MissingCity,
    Lookup(LookupError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingCity => StatusCode::BAD_REQUEST,
            Self::Lookup(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Lookup(LookupError::Render(_) | LookupError::Client(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Lookup(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingCity => "Type a city name and try again.".to_string(),
            Self::Lookup(e) => e.user_message(),
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        Self::Lookup(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/document", get(document))
        .route("/api/weather", get(weather_json))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

pub async fn run(bind: &str, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    info!("Web server running at http://{bind}");
    axum::serve(listener, router(state)).await.context("serving")?;
    Ok(())
}

/* ============================ handlers ============================ */

#[instrument(skip(state))]
async fn index(State(state): State<Arc<AppState>>, Query(q): Query<CityQuery>) -> Response {
    let page = match q.city() {
        None => state.renderer.render_page(&PageView::Prompt),
        Some(city) => match state.service.lookup(city).await {
            Ok(bundle) => state.renderer.render_page(&PageView::Display { city, bundle: &bundle }),
            Err(e) => state.renderer.render_page(&PageView::Failure { city, error: &e }),
        },
    };
    match page {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "page rendering failed");
            ApiError::Lookup(e).into_response()
        }
    }
}

#[instrument(skip(state))]
async fn document(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CityQuery>,
) -> Result<Html<String>, ApiError> {
    let city = q.city().ok_or(ApiError::MissingCity)?;
    let bundle = state.service.lookup(city).await?;
    Ok(Html(state.renderer.render_document(&bundle)?))
}

#[instrument(skip(state))]
async fn weather_json(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CityQuery>,
) -> Result<Json<DisplayBundle>, Response> {
    let result = match q.city() {
        Some(city) => state.service.lookup(city).await.map_err(ApiError::Lookup),
        None => Err(ApiError::MissingCity),
    };
    result.map(Json).map_err(|err| {
        let body = serde_json::json!({ "error": err.message() });
        (err.status(), Json(body)).into_response()
    })
}

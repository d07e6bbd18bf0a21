use axum::{
    routing::{get, post},
    Router,
    extract::{Form, Json, State},
    response::{Html, IntoResponse, Redirect},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use chrono::Utc;

use crate::error::{AppError, Result};
use crate::api::models::{AnalyzeRequest, AnalyzeResponse, HealthResponse};
use crate::api::response;
use crate::render::render_page;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_form_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/page", get(page_handler))
        .route("/api/notifications/dismiss", post(dismiss_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let view = state.analyzer.page().view_and_dismiss();
    Html(render_page(&view))
}

/// Form submission from the rendered page. The run continues in the
/// background; the browser is sent straight back to watch its progress.
async fn analyze_form_handler(
    State(state): State<AppState>,
    Form(req): Form<AnalyzeRequest>,
) -> Result<Redirect> {
    match state.analyzer.start(&req.url) {
        Ok(_running) => Ok(Redirect::to("/")),
        Err(AppError::BusyError) => Err(AppError::BusyError),
        // Already on the page as a notification.
        Err(_) => Ok(Redirect::to("/")),
    }
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    tracing::info!(url = %req.url, "Processing analysis request");

    match state.analyzer.submit(&req.url).await {
        Ok(outcome) => response::success(AnalyzeResponse {
            novel: outcome.novel,
            characters: outcome.characters,
            notifications: outcome.notifications,
            analyzed_at: Utc::now(),
        }),
        Err(err) => response::error(&err),
    }
}

async fn page_handler(State(state): State<AppState>) -> impl IntoResponse {
    response::success(state.analyzer.page().view())
}

async fn dismiss_handler(State(state): State<AppState>) -> impl IntoResponse {
    response::success(state.analyzer.page().dismiss_notifications())
}

async fn health_handler() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// 🌐 HTTP API - JSON surface for the lookup form
//
// Validation failures and misses are ordinary results, so /api/lookup always
// answers 200 with a typed LookupResult plus the view state to render.

use crate::directory::StaticDirectory;
use crate::resolver::{LookupQuery, LookupResult, Resolver};
use crate::view::ViewState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<Resolver<StaticDirectory>>,
    reset_notice: Arc<str>,
}

impl AppState {
    pub fn new(directory: StaticDirectory, reset_notice: impl Into<String>) -> Self {
        AppState {
            resolver: Arc::new(Resolver::new(directory)),
            reset_notice: Arc::from(reset_notice.into()),
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    fn error(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub result: LookupResult,
    pub view: ViewState,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub records: usize,
    pub fingerprint: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoticeResponse {
    pub message: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/lookup - Resolve identifier + name
async fn lookup(
    State(state): State<AppState>,
    payload: Result<Json<LookupQuery>, JsonRejection>,
) -> Response {
    let Json(query) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(status = %rejection.status(), "rejected lookup body");
            return (
                rejection.status(),
                Json(ApiResponse::error((), rejection.body_text())),
            )
                .into_response();
        }
    };

    let result = state.resolver.resolve_query(&query);
    let view = ViewState::from_result(&result);
    info!(outcome = result.kind(), "lookup request");

    Json(ApiResponse::ok(LookupResponse { result, view })).into_response()
}

/// GET /api/directory - Directory size and version fingerprint
async fn directory_info(State(state): State<AppState>) -> impl IntoResponse {
    let directory = state.resolver.directory();
    Json(ApiResponse::ok(DirectoryResponse {
        records: directory.len(),
        fingerprint: directory.fingerprint(),
    }))
}

/// GET /api/reset-credentials - Static notice, never touches the resolver
async fn reset_credentials(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(NoticeResponse {
        message: state.reset_notice.to_string(),
    }))
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/lookup", post(lookup))
        .route("/directory", get(directory_info))
        .route("/reset-credentials", get(reset_credentials))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================

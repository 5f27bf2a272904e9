//! HTTP transport implementation.
//!
//! JSON API over the shared dispatcher plus the browser console page:
//! - `GET /` - console page
//! - `GET /api/tools` - `{ tools: [...] }`
//! - `POST /api/call` - `{ name, arguments }` -> `{ content: [...] }`
//! - `GET /health` - liveness probe
//!
//! Failed calls answer `{ error: message }`: `400` for client-input faults
//! (unknown tool, invalid arguments, malformed body), `500` for handler or
//! internal faults.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::domains::tools::{Dispatcher, ToolCall, ToolDescriptor, ToolError};

/// Console page served at `/`.
const CONSOLE_PAGE: &str = include_str!("../../../static/index.html");

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
}

/// Body of `GET /api/tools`.
#[derive(Debug, Serialize)]
pub struct ToolsResponse<'a> {
    pub tools: &'a [ToolDescriptor],
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until the listener fails.
    pub async fn run(self, dispatcher: Arc<Dispatcher>) -> TransportResult<()> {
        let addr = self.address();
        let app = router(dispatcher, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - web interface on http://{} (CORS {})",
            addr, cors_status
        );
        info!("  → Tools:   GET /api/tools");
        info!("  → Call:    POST /api/call");
        info!("  → Health:  GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the HTTP router over the shared dispatcher.
pub fn router(dispatcher: Arc<Dispatcher>, enable_cors: bool) -> Router {
    let state = AppState { dispatcher };

    let mut app = Router::new()
        .route("/", get(console_page))
        .route("/health", get(health_check))
        .route("/api/tools", get(list_tools))
        .route("/api/call", post(call_tool))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Status code for a failed dispatch.
pub fn status_for(err: &ToolError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Root handler - serves the console page.
async fn console_page() -> Html<&'static str> {
    Html(CONSOLE_PAGE)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle `GET /api/tools`.
#[instrument(skip_all)]
async fn list_tools(State(state): State<AppState>) -> Response {
    info!("Processing tools list request");
    Json(ToolsResponse {
        tools: state.dispatcher.list_tools(),
    })
    .into_response()
}

/// Handle `POST /api/call`.
#[instrument(skip_all)]
async fn call_tool(
    State(state): State<AppState>,
    payload: Result<Json<ToolCall>, JsonRejection>,
) -> Response {
    let Json(call) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected call body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };
    info!("Processing call request: {}", call.name);

    match state.dispatcher.dispatch(call).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(e) => error_response(status_for(&e), e.to_string()),
    }
}

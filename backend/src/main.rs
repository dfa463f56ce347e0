use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use infer_core::inference::{
    Constraint, Diagnostic, InferenceConfig, InferenceEngine, InferenceError, RawCurve, Tolerance,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

// Application State
struct AppState {
    /// Used when a request carries no config of its own
    engine: InferenceEngine,
}

#[derive(Debug, Deserialize)]
struct InferRequest {
    curves: Vec<RawCurve>,
    #[serde(default)]
    config: Option<InferenceConfig>,
}

#[derive(Debug, Serialize)]
struct InferResponse {
    constraints: Vec<Constraint>,
    diagnostics: Vec<Diagnostic>,
    tolerance: Tolerance,
}

/// Inference failure as a JSON body for the client
struct ApiError(InferenceError);

impl ApiError {
    fn code(&self) -> &'static str {
        match &self.0 {
            InferenceError::NonPlanar { .. } => "NON_PLANAR",
            InferenceError::UnsupportedGeometry { .. } => "UNSUPPORTED_GEOMETRY",
            InferenceError::Degenerate { .. } => "DEGENERATE",
            InferenceError::InvalidConfig(_) => "INVALID_CONFIG",
            InferenceError::Config(_) => "CONFIG_PARSE",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "code": self.code(),
            "message": self.0.to_string(),
        });
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        ApiError(err)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let shared_state = Arc::new(AppState {
        engine: InferenceEngine::default(),
    });

    let app = Router::new()
        .route("/", get(root))
        .route("/api/infer", post(infer))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    let raw_addr = std::env::var("INFER_BACKEND_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = raw_addr.parse()?;
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn root() -> &'static str {
    "Constraint inference backend"
}

async fn infer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InferRequest>,
) -> Result<Json<InferResponse>, ApiError> {
    let custom;
    let engine = match request.config {
        Some(config) => {
            custom = InferenceEngine::new(config)?;
            &custom
        }
        None => &state.engine,
    };

    let report = engine.run(&request.curves).map_err(|err| {
        warn!("inference failed: {}", err);
        ApiError::from(err)
    })?;

    info!(
        curves = request.curves.len(),
        constraints = report.constraints.len(),
        "inferred constraints"
    );

    Ok(Json(InferResponse {
        constraints: report.constraints,
        diagnostics: report.diagnostics,
        tolerance: report.tolerance,
    }))
}

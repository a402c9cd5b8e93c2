//! Preview and print handlers for each document kind.
//!
//! Bodies are the bare request objects (no `kind` tag); the route picks the
//! kind. Bodies are read as text and parsed here so that malformed JSON is
//! reported with the same error shape as every other validation failure.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

use crate::adapter::{self, Composition};
use crate::document::Line;
use crate::error::{DenpyoError, Diagnostic, ErrorKind};
use crate::json_api::{OrderSlipRequest, PrintRequest, ReceiptRequest, TextRequest, parse_body};
use crate::transport::DeviceSink;

use super::super::state::AppState;

/// A [`DenpyoError`] rendered as a JSON failure with the matching status.
#[derive(Debug)]
pub struct ApiError(pub DenpyoError);

impl From<DenpyoError> for ApiError {
    fn from(e: DenpyoError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Validation | ErrorKind::ItemParse => StatusCode::BAD_REQUEST,
            ErrorKind::Configuration => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Output => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "success": false,
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        });
        (status, Json(body)).into_response()
    }
}

/// Body of a successful preview.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub text: String,
    pub lines: Vec<Line>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Body of a successful print.
#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub success: bool,
    pub diagnostics: Vec<Diagnostic>,
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, DenpyoError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| DenpyoError::Validation(format!("request is not valid JSON: {}", e)))?;
    parse_body(value)
}

fn preview(state: &AppState, request: PrintRequest) -> Result<Json<PreviewResponse>, ApiError> {
    let Composition {
        document,
        diagnostics,
    } = adapter::compose_request(&request, &state.config.profile)?;

    Ok(Json(PreviewResponse {
        text: document.text(),
        lines: document.lines().to_vec(),
        diagnostics,
    }))
}

async fn print(
    state: Arc<AppState>,
    request: PrintRequest,
) -> Result<Json<PrintResponse>, ApiError> {
    let Composition {
        document,
        diagnostics,
    } = adapter::compose_request(&request, &state.config.profile)?;

    // Print to device (blocking operation, run in separate thread)
    let device_path = state.config.device_path.clone();
    let delivered = tokio::task::spawn_blocking(move || {
        let mut sink = DeviceSink::open(&device_path)?;
        adapter::deliver(&document, &mut sink)
    })
    .await;

    match delivered {
        Ok(Ok(())) => Ok(Json(PrintResponse {
            success: true,
            diagnostics,
        })),
        Ok(Err(e)) => Err(e.into()),
        Err(e) => {
            warn!(error = %e, "print task failed");
            Err(DenpyoError::Output(format!("Task error: {}", e)).into())
        }
    }
}

/// POST /api/receipt/preview
pub async fn preview_receipt(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<PreviewResponse>, ApiError> {
    let request = parse::<ReceiptRequest>(&body)?;
    preview(&state, PrintRequest::Receipt(request))
}

/// POST /api/receipt/print
pub async fn print_receipt(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<PrintResponse>, ApiError> {
    let request = parse::<ReceiptRequest>(&body)?;
    print(state, PrintRequest::Receipt(request)).await
}

/// POST /api/order-slip/preview
pub async fn preview_order_slip(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<PreviewResponse>, ApiError> {
    let request = parse::<OrderSlipRequest>(&body)?;
    preview(&state, PrintRequest::OrderSlip(request))
}

/// POST /api/order-slip/print
pub async fn print_order_slip(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<PrintResponse>, ApiError> {
    let request = parse::<OrderSlipRequest>(&body)?;
    print(state, PrintRequest::OrderSlip(request)).await
}

/// POST /api/text/preview
pub async fn preview_text(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<PreviewResponse>, ApiError> {
    let request = parse::<TextRequest>(&body)?;
    preview(&state, PrintRequest::Text(request))
}

/// POST /api/text/print
pub async fn print_text(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<PrintResponse>, ApiError> {
    let request = parse::<TextRequest>(&body)?;
    print(state, PrintRequest::Text(request)).await
}

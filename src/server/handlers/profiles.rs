//! Profile API handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::printer::PrinterConfig;

use super::super::state::AppState;

/// One entry of `GET /api/profiles`.
#[derive(Debug, Serialize)]
pub struct ProfileInfo {
    #[serde(flatten)]
    pub config: PrinterConfig,
    pub columns: usize,
    /// True for the profile the server composes with.
    pub active: bool,
}

/// GET /api/profiles - List built-in profiles.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<ProfileInfo>> {
    let active = state.config.profile;
    Json(
        PrinterConfig::built_in()
            .iter()
            .map(|config| ProfileInfo {
                config: *config,
                columns: config.columns(),
                active: *config == active,
            })
            .collect(),
    )
}

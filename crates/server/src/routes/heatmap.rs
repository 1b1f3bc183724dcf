use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use explorer_core::filters::{PlayerColor, RatingBracket};
use explorer_core::heatmap;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct HeatmapQuery {
    pub rating: Option<String>,
    pub color: Option<String>,
}

/// GET /api/heatmap?rating=1200-1399&color=white
/// Check-delivery counts for all 64 squares. With no color selection the
/// rating bracket is ignored.
pub async fn get_heatmap(
    Extension(state): Extension<AppState>,
    Query(q): Query<HeatmapQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let bracket = match q.rating.as_deref() {
        None => None,
        Some(value) => RatingBracket::parse(value)?,
    };
    let color: Option<PlayerColor> = match q.color.as_deref() {
        None => None,
        Some(value) => Some(value.parse()?),
    };

    let squares = heatmap::check_squares(&state.records, bracket, color);

    Ok(Json(json!({ "squares": squares })))
}

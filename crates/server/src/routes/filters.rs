use axum::{Extension, Json};
use serde_json::{json, Value as JsonValue};

use explorer_core::filters::FilterEvent;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/filters — the current shared ECO selection.
pub async fn get_filters(Extension(state): Extension<AppState>) -> Json<JsonValue> {
    match state.selection() {
        Some(event) => Json(json!(event)),
        None => Json(json!({
            "ecoCategory": null,
            "ratingBracket": null,
            "sourceComponent": null,
        })),
    }
}

/// POST /api/filters/eco — broadcast a shared-filter change. A null
/// ecoCategory clears the selection; every view recomputes on its next
/// request.
pub async fn set_eco_filter(
    Extension(state): Extension<AppState>,
    Json(event): Json<FilterEvent>,
) -> Result<Json<JsonValue>, AppError> {
    if let Some(category) = event.eco_category.as_deref() {
        if !matches!(category, "A" | "B" | "C" | "D" | "E") {
            return Err(AppError::BadRequest(format!(
                "ECO category must be one of A-E, got '{category}'"
            )));
        }
    }

    tracing::info!(
        source = %event.source_component,
        eco = ?event.eco_category,
        "eco filter broadcast"
    );
    state.broadcast(event.clone());

    Ok(Json(json!({ "selection": event })))
}

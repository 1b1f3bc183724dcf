use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use explorer_core::filters::{PlayerColor, RatingBracket, TreeFilters};
use explorer_core::opening_tree;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OpeningTreeQuery {
    pub rating: Option<String>,
    pub color: Option<String>,
}

/// GET /api/opening-tree?rating=all&color=white
/// The full move-sequence tree for the sunburst, rebuilt from scratch on
/// every request. The ECO filter comes from the shared cross-view selection.
pub async fn get_opening_tree(
    Extension(state): Extension<AppState>,
    Query(q): Query<OpeningTreeQuery>,
) -> Result<Json<JsonValue>, AppError> {
    // The sunburst defaults to White's perspective when no color is selected.
    let color: PlayerColor = match q.color.as_deref() {
        None => PlayerColor::White,
        Some(value) => value.parse()?,
    };
    let bracket = match q.rating.as_deref() {
        None => None,
        Some(value) => RatingBracket::parse(value)?,
    };
    let eco = state.eco_filter();

    let filters = TreeFilters { bracket, color, eco };
    let root = opening_tree::build_tree(&state.records, &filters);
    if root.children.is_empty() {
        tracing::debug!("no moves matched the current filters");
    }

    let mut body = serde_json::to_value(&root).map_err(|e| AppError::Internal(e.to_string()))?;
    body["color"] = json!(color);
    body["ecoFilter"] = match eco {
        Some(category) => json!(category.to_string()),
        None => JsonValue::Null,
    };

    Ok(Json(body))
}

use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use explorer_core::brackets;
use explorer_core::filters::{PlayerColor, RatingBracket};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BracketsQuery {
    pub rating: Option<String>,
    pub color: Option<String>,
}

/// GET /api/opening-brackets?rating=all&color=black
/// Per-bracket game counts for the five ECO categories. Selections never
/// filter this view; the current ones are echoed back for highlighting.
pub async fn get_opening_brackets(
    Extension(state): Extension<AppState>,
    Query(q): Query<BracketsQuery>,
) -> Result<Json<JsonValue>, AppError> {
    // This view defaults to the black rating when no color is selected.
    let color: PlayerColor = match q.color.as_deref() {
        None => PlayerColor::Black,
        Some(value) => value.parse()?,
    };
    let rating = q.rating.unwrap_or_else(|| "all".to_string());
    let bracket = RatingBracket::parse(&rating)?;

    let stacks = brackets::category_stacks(&state.records, color);

    let rating_field = match color {
        PlayerColor::White => "whiteRating",
        PlayerColor::Black => "blackRating",
        PlayerColor::All => "combinedRating",
    };

    Ok(Json(json!({
        "ratingField": rating_field,
        "brackets": stacks,
        "selection": {
            "ratingBracket": bracket.map(|_| rating.clone()),
            "ecoCategory": state.selection().and_then(|event| event.eco_category),
        },
    })))
}

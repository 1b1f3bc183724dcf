use axum::{extract::Query, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use explorer_core::board;
use explorer_core::filters::PlayerColor;

use crate::error::AppError;

#[derive(Deserialize)]
pub struct BoardQuery {
    pub moves: Option<String>,
    pub color: Option<String>,
}

/// GET /api/board?moves=e4%20e5%20Nf3&color=all
/// Replays a hovered node's move sequence from the starting position and
/// returns the resulting board, rank 8 first.
pub async fn get_board(Query(q): Query<BoardQuery>) -> Result<Json<JsonValue>, AppError> {
    let color: PlayerColor = match q.color.as_deref() {
        None => PlayerColor::All,
        Some(value) => value.parse()?,
    };
    let moves = q.moves.unwrap_or_default();
    let tokens: Vec<&str> = moves.split_whitespace().collect();

    let position = board::replay(&tokens, color);

    Ok(Json(json!({
        "moves": moves,
        "perspective": color,
        "board": position.rows(),
    })))
}

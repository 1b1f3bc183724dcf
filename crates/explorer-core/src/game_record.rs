use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

/// One game row from the preprocessed dataset. Moves are SAN tokens with
/// White's plies at even 0-based indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub white_rating: i32,
    pub black_rating: i32,
    pub winner: Winner,
    pub opening_eco: String, // e.g. "C50"
    pub opening_name: String,
    pub moves: Vec<String>,
}

impl GameRecord {
    /// Broad opening family: the first letter of the ECO code (A–E).
    pub fn eco_category(&self) -> Option<char> {
        self.opening_eco.chars().next()
    }
}

//! Check-delivery heatmap aggregation.

use serde::Serialize;

use crate::filters::{PlayerColor, RatingBracket};
use crate::game_record::GameRecord;

pub const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SquareCount {
    pub file: char,
    pub rank: u8,
    pub count: u64,
}

/// Count the squares checks are delivered on, one tuple per board square
/// (files a–h, ranks 1–8). `color` is the raw selector state: `None` means
/// nothing is selected, which also disables the rating filter.
pub fn check_squares(
    records: &[GameRecord],
    bracket: Option<RatingBracket>,
    color: Option<PlayerColor>,
) -> Vec<SquareCount> {
    let mut counts = [[0u64; 8]; 8]; // [file][rank - 1]

    for record in records {
        // The rating filter needs a color selection to pick its field.
        if let (Some(bracket), Some(color)) = (bracket, color) {
            let rating = match color {
                PlayerColor::White => record.white_rating,
                PlayerColor::Black | PlayerColor::All => record.black_rating,
            };
            if !bracket.contains(rating) {
                continue;
            }
        }

        for (ply, token) in record.moves.iter().enumerate() {
            let selected = match color {
                Some(PlayerColor::White) => ply % 2 == 0,
                Some(PlayerColor::Black) => ply % 2 == 1,
                Some(PlayerColor::All) | None => true,
            };
            if !selected || !token.contains('+') {
                continue;
            }
            if let Some((file, rank)) = check_square(token) {
                counts[file][rank - 1] += 1;
            }
        }
    }

    let mut squares = Vec::with_capacity(64);
    for (f, &file) in FILES.iter().enumerate() {
        for rank in 1..=8usize {
            squares.push(SquareCount {
                file,
                rank: rank as u8,
                count: counts[f][rank - 1],
            });
        }
    }
    squares
}

/// Square a checking token lands on. Castling checks are not attributed to a
/// square. Promotions ("c1=Q+") name the square at the token head, everything
/// else two characters before the decoration.
fn check_square(token: &str) -> Option<(usize, usize)> {
    if token.contains("O-O") {
        return None;
    }
    let bytes = token.as_bytes();
    let (file_byte, rank_byte) = if token.contains('=') {
        (*bytes.first()?, *bytes.get(1)?)
    } else {
        if bytes.len() < 3 {
            return None;
        }
        (bytes[bytes.len() - 3], bytes[bytes.len() - 2])
    };

    if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
        return None;
    }
    Some(((file_byte - b'a') as usize, (rank_byte - b'0') as usize))
}

//! Opening-category counts per rating bracket (the stacked-bar view).

use serde::Serialize;

use crate::filters::PlayerColor;
use crate::game_record::GameRecord;

pub const BRACKET_MIN: i32 = 700;
pub const BRACKET_WIDTH: i32 = 200;
pub const BRACKET_COUNT: usize = 10;

pub const ECO_CATEGORIES: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Games per ECO category within one rating bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketCounts {
    pub bracket: String,
    #[serde(rename = "A")]
    pub a: u64,
    #[serde(rename = "B")]
    pub b: u64,
    #[serde(rename = "C")]
    pub c: u64,
    #[serde(rename = "D")]
    pub d: u64,
    #[serde(rename = "E")]
    pub e: u64,
}

/// Bracket labels in display order: "700-899" through "2500-2699".
pub fn bracket_labels() -> Vec<String> {
    (0..BRACKET_COUNT)
        .map(|i| {
            let lo = BRACKET_MIN + i as i32 * BRACKET_WIDTH;
            format!("{}-{}", lo, lo + BRACKET_WIDTH - 1)
        })
        .collect()
}

/// The rating that places a game in a bracket for the given color selection.
pub fn rating_for(record: &GameRecord, color: PlayerColor) -> i32 {
    match color {
        PlayerColor::White => record.white_rating,
        PlayerColor::Black => record.black_rating,
        // The combined view brackets on the rounded mean of both ratings.
        PlayerColor::All => {
            ((record.white_rating + record.black_rating) as f64 / 2.0).round() as i32
        }
    }
}

/// Stack the full record set into rating brackets by ECO category. Bracket
/// and ECO selections never filter this view; the renderer only dims
/// non-matching stacks.
pub fn category_stacks(records: &[GameRecord], color: PlayerColor) -> Vec<BracketCounts> {
    let mut grid = [[0u64; ECO_CATEGORIES.len()]; BRACKET_COUNT];

    for record in records {
        let rating = rating_for(record, color);
        let index = (rating - BRACKET_MIN).div_euclid(BRACKET_WIDTH);
        if !(0..BRACKET_COUNT as i32).contains(&index) {
            continue;
        }
        let Some(category) = record.eco_category() else {
            continue;
        };
        let Some(c) = ECO_CATEGORIES.iter().position(|&e| e == category) else {
            continue;
        };
        grid[index as usize][c] += 1;
    }

    bracket_labels()
        .into_iter()
        .zip(grid)
        .map(|(bracket, row)| BracketCounts {
            bracket,
            a: row[0],
            b: row[1],
            c: row[2],
            d: row[3],
            e: row[4],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_record::Winner;

    fn record(white: i32, black: i32, eco: &str) -> GameRecord {
        GameRecord {
            white_rating: white,
            black_rating: black,
            winner: Winner::Draw,
            opening_eco: eco.to_string(),
            opening_name: String::new(),
            moves: vec!["e4".to_string()],
        }
    }

    fn bracket<'a>(stacks: &'a [BracketCounts], label: &str) -> &'a BracketCounts {
        stacks.iter().find(|b| b.bracket == label).unwrap()
    }

    #[test]
    fn test_bracket_labels() {
        let labels = bracket_labels();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0], "700-899");
        assert_eq!(labels[9], "2500-2699");
    }

    #[test]
    fn test_stacks_by_selected_color_rating() {
        let records = vec![record(950, 1450, "B20"), record(950, 1450, "C41")];

        let white = category_stacks(&records, PlayerColor::White);
        assert_eq!(bracket(&white, "900-1099").b, 1);
        assert_eq!(bracket(&white, "900-1099").c, 1);
        assert_eq!(bracket(&white, "1300-1499").b, 0);

        let black = category_stacks(&records, PlayerColor::Black);
        assert_eq!(bracket(&black, "1300-1499").b, 1);
        assert_eq!(bracket(&black, "1300-1499").c, 1);
    }

    #[test]
    fn test_combined_uses_rounded_mean() {
        // mean of 1000 and 1101 is 1050.5, rounding into 900-1099
        let records = vec![record(1000, 1101, "A40")];
        let all = category_stacks(&records, PlayerColor::All);
        assert_eq!(bracket(&all, "900-1099").a, 1);
    }

    #[test]
    fn test_out_of_range_ratings_dropped() {
        let records = vec![record(650, 650, "A00"), record(2700, 2700, "E60")];
        let stacks = category_stacks(&records, PlayerColor::White);
        let total: u64 = stacks.iter().map(|b| b.a + b.b + b.c + b.d + b.e).sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_unknown_category_dropped() {
        let records = vec![record(1000, 1000, "X99"), record(1000, 1000, "")];
        let stacks = category_stacks(&records, PlayerColor::White);
        let total: u64 = stacks.iter().map(|b| b.a + b.b + b.c + b.d + b.e).sum();
        assert_eq!(total, 0);
    }
}

//! Dataset loading and field coercion.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::game_record::{GameRecord, Winner};

/// Games with either rating at or above this are dropped at load time.
pub const RATING_CAP: i32 = 2700;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset at '{0}' contains no usable records")]
    Empty(String),
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    white_rating: String,
    #[serde(default)]
    black_rating: String,
    #[serde(default)]
    winner: String,
    #[serde(default)]
    opening_eco: String,
    #[serde(default)]
    opening_name: String,
    #[serde(default)]
    moves: String,
}

/// Load the preprocessed games CSV. Rows that fail coercion are dropped with
/// a warning; an unreadable or fully-unusable file is an error the caller
/// treats as terminal.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<GameRecord>, DatasetError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in reader.deserialize::<RawRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable dataset row");
                dropped += 1;
                continue;
            }
        };
        match coerce(row) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "dropped rows during dataset coercion");
    }
    if records.is_empty() {
        return Err(DatasetError::Empty(path.display().to_string()));
    }
    tracing::info!(games = records.len(), "dataset loaded");
    Ok(records)
}

fn coerce(row: RawRow) -> Option<GameRecord> {
    let white_rating: i32 = row.white_rating.trim().parse().ok()?;
    let black_rating: i32 = row.black_rating.trim().parse().ok()?;
    if white_rating >= RATING_CAP || black_rating >= RATING_CAP {
        return None;
    }
    if row.winner.is_empty() || row.opening_eco.is_empty() {
        return None;
    }
    let winner = match row.winner.as_str() {
        "white" => Winner::White,
        "black" => Winner::Black,
        // Draws and unusual results never count as a win for either side.
        _ => Winner::Draw,
    };
    let moves: Vec<String> = row
        .moves
        .split_whitespace()
        .map(str::to_string)
        .collect();

    Some(GameRecord {
        white_rating,
        black_rating,
        winner,
        opening_eco: row.opening_eco,
        opening_name: row.opening_name,
        moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "explorer-core-test-{}-{}.csv",
            std::process::id(),
            content.len()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    const HEADER: &str = "white_rating,black_rating,winner,opening_eco,opening_name,moves\n";

    #[test]
    fn test_load_and_coerce() {
        let csv = format!(
            "{HEADER}1500,1480,white,C50,Italian Game,e4 e5 Nf3 Nc6 Bc4\n1200,1250,black,B20,Sicilian Defence,e4 c5\n"
        );
        let path = write_csv(&csv);
        let records = load_dataset(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].winner, Winner::White);
        assert_eq!(records[0].moves[0], "e4");
        assert_eq!(records[1].opening_eco, "B20");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_high_rated_and_incomplete_rows_dropped() {
        let csv = format!(
            "{HEADER}2700,1500,white,C50,Italian Game,e4\n1500,1500,,C50,Italian Game,e4\n1500,1500,draw,,Unknown,e4\nabc,1500,white,C50,Italian Game,e4\n1000,1000,draw,A00,Polish Opening,b4\n"
        );
        let path = write_csv(&csv);
        let records = load_dataset(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].winner, Winner::Draw);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let csv = format!("{HEADER}2800,2800,white,C50,Italian Game,e4\n");
        let path = write_csv(&csv);
        assert!(matches!(load_dataset(&path), Err(DatasetError::Empty(_))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            load_dataset("/nonexistent/games.csv"),
            Err(DatasetError::Csv(_))
        ));
    }
}

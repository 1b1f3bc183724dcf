//! Shared filter state passed into the aggregations. The core never reads UI
//! state; the host hands it in as typed values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Rating bracket must be 'all' or '<min>-<max>', got '{0}'")]
    Bracket(String),

    #[error("Color must be 'white', 'black' or 'all', got '{0}'")]
    Color(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    White,
    Black,
    All,
}

impl FromStr for PlayerColor {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "white" => Ok(PlayerColor::White),
            "black" => Ok(PlayerColor::Black),
            "all" => Ok(PlayerColor::All),
            _ => Err(FilterError::Color(s.to_string())),
        }
    }
}

/// Inclusive rating range from a bracket selector value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBracket {
    pub min: i32,
    pub max: i32,
}

impl RatingBracket {
    /// Parse a selector value; `"all"` means no bracket is active.
    pub fn parse(value: &str) -> Result<Option<Self>, FilterError> {
        if value == "all" {
            return Ok(None);
        }
        let (min, max) = value
            .split_once('-')
            .ok_or_else(|| FilterError::Bracket(value.to_string()))?;
        let min = min
            .trim()
            .parse()
            .map_err(|_| FilterError::Bracket(value.to_string()))?;
        let max = max
            .trim()
            .parse()
            .map_err(|_| FilterError::Bracket(value.to_string()))?;
        Ok(Some(Self { min, max }))
    }

    pub fn contains(&self, rating: i32) -> bool {
        rating >= self.min && rating <= self.max
    }
}

/// Cross-view notification, broadcast whenever any view changes the shared
/// ECO filter. All views recompute on receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEvent {
    pub eco_category: Option<String>, // single letter A–E, None clears
    pub rating_bracket: Option<String>,
    pub source_component: String,
}

/// Filter selection handed to the sequence aggregator.
#[derive(Debug, Clone, Copy)]
pub struct TreeFilters {
    pub bracket: Option<RatingBracket>,
    pub color: PlayerColor,
    pub eco: Option<char>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bracket() {
        let bracket = RatingBracket::parse("1200-1399").unwrap().unwrap();
        assert_eq!(bracket.min, 1200);
        assert_eq!(bracket.max, 1399);
        assert!(bracket.contains(1200));
        assert!(bracket.contains(1399));
        assert!(!bracket.contains(1400));
    }

    #[test]
    fn test_parse_bracket_all() {
        assert!(RatingBracket::parse("all").unwrap().is_none());
    }

    #[test]
    fn test_parse_bracket_invalid() {
        assert!(RatingBracket::parse("1200").is_err());
        assert!(RatingBracket::parse("low-high").is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!("White".parse::<PlayerColor>().unwrap(), PlayerColor::White);
        assert_eq!("all".parse::<PlayerColor>().unwrap(), PlayerColor::All);
        assert!("green".parse::<PlayerColor>().is_err());
    }
}

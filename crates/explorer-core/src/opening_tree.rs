//! Move-sequence prefix tree with win-rate statistics.
//!
//! Built in two passes: a scratch arena of mutable nodes carrying per-node
//! identity sets (so a game counts once per node no matter how it is
//! visited), then frozen into an immutable output tree holding only counts
//! and rates.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::filters::{PlayerColor, TreeFilters};
use crate::game_record::{GameRecord, Winner};

/// Opening plies kept per game.
pub const MAX_TREE_DEPTH: usize = 5;

const SENTINEL: &str = "-1";

/// Frozen prefix-tree node, shaped for the sunburst renderer. Children are
/// unique per move token, most played first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceNode {
    #[serde(rename = "move")]
    pub move_token: String,
    /// Space-joined sequence from the first ply down to this node.
    pub moves: String,
    pub eco: Option<String>,
    pub opening_eco: Option<String>,
    pub opening_name: Option<String>,
    pub games: u64,
    pub wins: u64,
    pub win_rate: f64,
    pub children: Vec<SequenceNode>,
}

impl SequenceNode {
    /// Child for an exact move token, if present.
    pub fn child(&self, token: &str) -> Option<&SequenceNode> {
        self.children.iter().find(|c| c.move_token == token)
    }
}

struct BuildNode {
    move_token: String,
    moves: String,
    eco: Option<String>,
    opening_eco: Option<String>,
    opening_name: Option<String>,
    game_ids: HashSet<usize>,
    win_ids: HashSet<usize>,
    children: HashMap<String, BuildNode>,
}

impl BuildNode {
    fn new(move_token: &str, moves: &str) -> Self {
        Self {
            move_token: move_token.to_string(),
            moves: moves.to_string(),
            eco: None,
            opening_eco: None,
            opening_name: None,
            game_ids: HashSet::new(),
            win_ids: HashSet::new(),
            children: HashMap::new(),
        }
    }
}

/// Build the prefix tree over the filtered record set. Always a full pass;
/// the returned tree replaces any previous one wholesale.
pub fn build_tree(records: &[GameRecord], filters: &TreeFilters) -> SequenceNode {
    let mut root = BuildNode::new("root", "");

    for (game_id, record) in records.iter().enumerate() {
        if let Some(bracket) = filters.bracket {
            let rating = match filters.color {
                PlayerColor::White => record.white_rating,
                // Upstream convention: the combined view filters on the
                // black rating too.
                PlayerColor::Black | PlayerColor::All => record.black_rating,
            };
            if !bracket.contains(rating) {
                continue;
            }
        }
        if let Some(eco) = filters.eco {
            if record.eco_category() != Some(eco) {
                continue;
            }
        }

        let moves = selected_moves(record, filters.color);
        if moves.is_empty() {
            continue;
        }

        let won = match filters.color {
            // The combined perspective scores wins from White's side.
            PlayerColor::White | PlayerColor::All => record.winner == Winner::White,
            PlayerColor::Black => record.winner == Winner::Black,
        };

        root.game_ids.insert(game_id);
        let mut current = &mut root;
        for token in moves {
            let path = if current.moves.is_empty() {
                token.to_string()
            } else {
                format!("{} {}", current.moves, token)
            };
            current = current
                .children
                .entry(token.to_string())
                .or_insert_with(|| {
                    let mut node = BuildNode::new(token, &path);
                    node.eco = record.eco_category().map(|c| c.to_string());
                    node.opening_eco = Some(record.opening_eco.clone());
                    node.opening_name = Some(record.opening_name.clone());
                    node
                });
            current.game_ids.insert(game_id);
            if won {
                current.win_ids.insert(game_id);
            }
        }
    }

    freeze(root)
}

/// The plies a record contributes under a perspective: White's moves, Black's
/// moves, or the first plies of the game. Stops at the first sentinel.
fn selected_moves(record: &GameRecord, color: PlayerColor) -> Vec<&str> {
    let plies: Box<dyn Iterator<Item = &str>> = match color {
        PlayerColor::White => Box::new(record.moves.iter().step_by(2).map(String::as_str)),
        PlayerColor::Black => Box::new(record.moves.iter().skip(1).step_by(2).map(String::as_str)),
        PlayerColor::All => Box::new(record.moves.iter().map(String::as_str)),
    };
    plies
        .take(MAX_TREE_DEPTH)
        .take_while(|token| !token.is_empty() && *token != SENTINEL)
        .collect()
}

fn freeze(node: BuildNode) -> SequenceNode {
    let games = node.game_ids.len() as u64;
    let wins = node.win_ids.len() as u64;

    let mut children: Vec<SequenceNode> = node.children.into_values().map(freeze).collect();
    // Most played first; token order breaks ties so rebuilds are identical.
    children.sort_by(|a, b| {
        b.games
            .cmp(&a.games)
            .then_with(|| a.move_token.cmp(&b.move_token))
    });

    SequenceNode {
        move_token: node.move_token,
        moves: node.moves,
        eco: node.eco,
        opening_eco: node.opening_eco,
        opening_name: node.opening_name,
        games,
        wins,
        win_rate: if games > 0 {
            wins as f64 / games as f64
        } else {
            0.0
        },
        children,
    }
}

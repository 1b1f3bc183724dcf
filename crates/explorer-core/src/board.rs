//! Board state, move-source resolution and sequence replay.
//!
//! Positions only need to look right for opening display. The resolver is
//! not a legal-move generator: pawns, knights and bishops get real geometry,
//! everything else is first-match (see DESIGN.md for the kept
//! approximations).

use crate::filters::PlayerColor;
use crate::notation::{self, CastleSide, MoveDescriptor, PieceKind};

/// Total plies applied (real + pass) when replaying one color's moves.
const SINGLE_COLOR_PLY_CAP: usize = 10;
/// Total plies applied when replaying the combined move list.
const COMBINED_PLY_CAP: usize = 8;

const SENTINEL: &str = "-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

/// 8×8 grid of piece letters. Row 0 is rank 8 (Black's back rank), col 0 is
/// file a. Uppercase is White, `' '` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPosition {
    cells: [[char; 8]; 8],
}

impl BoardPosition {
    /// A fresh standard starting position.
    pub fn starting() -> Self {
        Self {
            cells: [
                ['r', 'n', 'b', 'q', 'k', 'b', 'n', 'r'],
                ['p'; 8],
                [' '; 8],
                [' '; 8],
                [' '; 8],
                [' '; 8],
                ['P'; 8],
                ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R'],
            ],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> char {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, piece: char) {
        self.cells[row][col] = piece;
    }

    /// Piece at an algebraic coordinate like `"e4"`, if the coordinate is
    /// valid.
    pub fn at(&self, coord: &str) -> Option<char> {
        let &[file, rank] = coord.as_bytes() else {
            return None;
        };
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        let col = (file - b'a') as usize;
        let row = (8 - (rank - b'0')) as usize;
        Some(self.cells[row][col])
    }

    /// Rank strings for the renderer, rank 8 first.
    pub fn rows(&self) -> Vec<String> {
        self.cells.iter().map(|row| row.iter().collect()).collect()
    }
}

/// Opening shortcuts: {precondition, fixed source square} rules checked
/// before the general scan. These reproduce the common kingside-first
/// development choices; they are a documented approximation, not a
/// disambiguator.
fn opening_shortcut(position: &BoardPosition, desc: &MoveDescriptor, is_white: bool) -> Option<Square> {
    if !is_white {
        return None;
    }
    match desc.piece {
        // Nf3 with both knights at home: the g1 knight develops.
        PieceKind::Knight if desc.target_rank == 5 && desc.target_file == 5 => {
            if position.get(7, 1) == 'N' && position.get(7, 6) == 'N' {
                return Some(Square { row: 7, col: 6 });
            }
            None
        }
        // Bc4 with both bishops at home: the f1 bishop goes out.
        PieceKind::Bishop if desc.target_rank == 4 && desc.target_file == 2 => {
            if position.get(7, 2) == 'B' && position.get(7, 5) == 'B' {
                return Some(Square { row: 7, col: 5 });
            }
            None
        }
        _ => None,
    }
}

/// Find the square a described move originates from, or `None` when no
/// candidate matches (the caller leaves the board unchanged for that ply).
pub fn resolve_source(position: &BoardPosition, desc: &MoveDescriptor, is_white: bool) -> Option<Square> {
    let piece_char = desc.piece.piece_char(is_white);

    if desc.piece == PieceKind::Pawn {
        return resolve_pawn_source(position, desc, is_white, piece_char);
    }

    if let Some(square) = opening_shortcut(position, desc, is_white) {
        return Some(square);
    }

    let mut candidates = Vec::new();
    for row in 0..8 {
        for col in 0..8 {
            if position.get(row, col) != piece_char {
                continue;
            }
            let reachable = match desc.piece {
                PieceKind::Knight => knight_reaches(row, col, desc.target_rank, desc.target_file),
                PieceKind::Bishop => {
                    bishop_reaches(position, row, col, desc.target_rank, desc.target_file)
                }
                // No path validation for the remaining kinds; opening data
                // never needs their disambiguation.
                _ => true,
            };
            if reachable
                && desc.source_file.map_or(true, |f| f == col)
                && desc.source_rank.map_or(true, |r| r == row)
            {
                candidates.push(Square { row, col });
            }
        }
    }

    if candidates.len() > 1 {
        if let Some(file) = desc.source_file {
            if let Some(square) = candidates.iter().find(|s| s.col == file) {
                return Some(*square);
            }
        }
        if let Some(rank) = desc.source_rank {
            if let Some(square) = candidates.iter().find(|s| s.row == rank) {
                return Some(*square);
            }
        }
    }
    candidates.first().copied()
}

fn resolve_pawn_source(
    position: &BoardPosition,
    desc: &MoveDescriptor,
    is_white: bool,
    piece_char: char,
) -> Option<Square> {
    // White pawns move toward row 0, Black toward row 7.
    let dir: i32 = if is_white { -1 } else { 1 };
    let home_row: usize = if is_white { 6 } else { 1 };
    let behind = desc.target_rank as i32 - dir;

    // Explicit source file (capture shape): exactly one row behind the
    // target at that file.
    if let Some(file) = desc.source_file {
        if (0..8).contains(&behind) && position.get(behind as usize, file) == piece_char {
            return Some(Square {
                row: behind as usize,
                col: file,
            });
        }
        return None;
    }

    // One square forward.
    if (0..8).contains(&behind) && position.get(behind as usize, desc.target_file) == piece_char {
        return Some(Square {
            row: behind as usize,
            col: desc.target_file,
        });
    }

    // Two squares forward, only from the home rank with a clear path.
    let two_square_target = if is_white { 4 } else { 3 };
    if desc.target_rank == two_square_target && position.get(home_row, desc.target_file) == piece_char {
        let intermediate = (home_row as i32 + dir) as usize;
        if position.get(intermediate, desc.target_file) == ' '
            && position.get(desc.target_rank, desc.target_file) == ' '
        {
            return Some(Square {
                row: home_row,
                col: desc.target_file,
            });
        }
    }

    // Diagonal capture: one row behind on either adjacent file.
    if desc.is_capture && (0..8).contains(&behind) {
        for offset in [-1i32, 1] {
            let col = desc.target_file as i32 + offset;
            if (0..8).contains(&col) && position.get(behind as usize, col as usize) == piece_char {
                return Some(Square {
                    row: behind as usize,
                    col: col as usize,
                });
            }
        }
    }

    None
}

fn knight_reaches(row: usize, col: usize, target_rank: usize, target_file: usize) -> bool {
    let row_diff = (target_rank as i32 - row as i32).abs();
    let col_diff = (target_file as i32 - col as i32).abs();
    (row_diff == 1 && col_diff == 2) || (row_diff == 2 && col_diff == 1)
}

fn bishop_reaches(
    position: &BoardPosition,
    row: usize,
    col: usize,
    target_rank: usize,
    target_file: usize,
) -> bool {
    let row_diff = (target_rank as i32 - row as i32).abs();
    let col_diff = (target_file as i32 - col as i32).abs();
    if row_diff != col_diff || row_diff == 0 {
        return false;
    }
    let row_step = if target_rank > row { 1i32 } else { -1 };
    let col_step = if target_file > col { 1i32 } else { -1 };
    for i in 1..row_diff {
        let r = (row as i32 + i * row_step) as usize;
        let c = (col as i32 + i * col_step) as usize;
        if position.get(r, c) != ' ' {
            return false;
        }
    }
    true
}

/// Replay a move sequence from the standard starting position.
///
/// For the single-color perspectives the token list holds only that color's
/// moves; synthetic pass plies are inserted for the opponent so each real
/// move is applied as the correct color. The combined perspective applies the
/// tokens as a normal alternating game.
pub fn replay<S: AsRef<str>>(tokens: &[S], perspective: PlayerColor) -> BoardPosition {
    let mut position = BoardPosition::starting();

    match perspective {
        PlayerColor::All => {
            let mut is_white = true;
            for token in tokens.iter().take(COMBINED_PLY_CAP) {
                let token = token.as_ref();
                if token.is_empty() || token == SENTINEL {
                    // Sentinel plies do not advance the turn.
                    continue;
                }
                apply_token(&mut position, token, is_white);
                is_white = !is_white;
            }
        }
        color => {
            // Rebuild the implied alternating game around this color's moves.
            let mut plies: Vec<Option<&str>> = Vec::new();
            if color == PlayerColor::Black {
                plies.push(None);
            }
            for (i, token) in tokens.iter().enumerate() {
                if i > 0 {
                    plies.push(None);
                }
                plies.push(Some(token.as_ref()));
            }
            let mut is_white = true;
            for ply in plies.into_iter().take(SINGLE_COLOR_PLY_CAP) {
                if let Some(token) = ply {
                    if !token.is_empty() && token != SENTINEL {
                        apply_token(&mut position, token, is_white);
                    }
                }
                is_white = !is_white;
            }
        }
    }

    position
}

/// Apply one SAN token for the given color. Unparseable or unresolvable
/// tokens leave the board unchanged.
fn apply_token(position: &mut BoardPosition, token: &str, is_white: bool) {
    let desc = match notation::parse_move(token) {
        Ok(desc) => desc,
        Err(err) => {
            tracing::debug!(token, %err, "skipping unparseable move token");
            return;
        }
    };

    if let Some(side) = desc.castle {
        apply_castle(position, side, is_white);
        return;
    }

    let Some(source) = resolve_source(position, &desc, is_white) else {
        tracing::debug!(token, is_white, "no source square found for move");
        return;
    };

    position.set(source.row, source.col, ' ');
    let placed = desc.promotion.unwrap_or(desc.piece).piece_char(is_white);
    position.set(desc.target_rank, desc.target_file, placed);
}

/// Castles bypass the resolver: every square is fixed by color and side.
fn apply_castle(position: &mut BoardPosition, side: CastleSide, is_white: bool) {
    let row = if is_white { 7 } else { 0 };
    let (king, rook) = if is_white { ('K', 'R') } else { ('k', 'r') };
    match side {
        CastleSide::Kingside => {
            position.set(row, 4, ' ');
            position.set(row, 7, ' ');
            position.set(row, 6, king);
            position.set(row, 5, rook);
        }
        CastleSide::Queenside => {
            position.set(row, 4, ' ');
            position.set(row, 0, ' ');
            position.set(row, 2, king);
            position.set(row, 3, rook);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let position = BoardPosition::starting();
        assert_eq!(position.at("e1"), Some('K'));
        assert_eq!(position.at("e8"), Some('k'));
        assert_eq!(position.at("a2"), Some('P'));
        assert_eq!(position.at("e4"), Some(' '));
    }

    #[test]
    fn test_replay_combined_opening() {
        let position = replay(&["e4", "e5", "Nf3"], PlayerColor::All);
        assert_eq!(position.at("e4"), Some('P'));
        assert_eq!(position.at("e2"), Some(' '));
        assert_eq!(position.at("e5"), Some('p'));
        assert_eq!(position.at("e7"), Some(' '));
        assert_eq!(position.at("f3"), Some('N'));
        assert_eq!(position.at("g1"), Some(' '));
    }

    #[test]
    fn test_replay_white_perspective_inserts_passes() {
        // All three tokens are White's own moves; Black pass plies keep the
        // colors straight, so e5 is the e4 pawn advancing.
        let position = replay(&["e4", "e5", "Nf3"], PlayerColor::White);
        assert_eq!(position.at("e5"), Some('P'));
        assert_eq!(position.at("e4"), Some(' '));
        assert_eq!(position.at("f3"), Some('N'));
        // Black never moved.
        assert_eq!(position.at("e7"), Some('p'));
        assert_eq!(position.at("d7"), Some('p'));
    }

    #[test]
    fn test_replay_black_perspective_leading_pass() {
        let position = replay(&["e5", "Nc6"], PlayerColor::Black);
        assert_eq!(position.at("e5"), Some('p'));
        assert_eq!(position.at("e7"), Some(' '));
        assert_eq!(position.at("c6"), Some('n'));
        assert_eq!(position.at("b8"), Some(' '));
        // White never moved.
        assert_eq!(position.at("e2"), Some('P'));
    }

    #[test]
    fn test_replay_caps_combined_at_eight_plies() {
        let tokens = ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6", "O-O"];
        let position = replay(&tokens, PlayerColor::All);
        // The ninth ply (O-O) is beyond the cap.
        assert_eq!(position.at("e1"), Some('K'));
        assert_eq!(position.at("h1"), Some('R'));
    }

    #[test]
    fn test_kingside_castle() {
        let position = replay(&["O-O"], PlayerColor::White);
        assert_eq!(position.at("g1"), Some('K'));
        assert_eq!(position.at("f1"), Some('R'));
        assert_eq!(position.at("e1"), Some(' '));
        assert_eq!(position.at("h1"), Some(' '));
    }

    #[test]
    fn test_queenside_castle_black() {
        let position = replay(&["O-O-O"], PlayerColor::Black);
        assert_eq!(position.at("c8"), Some('k'));
        assert_eq!(position.at("d8"), Some('r'));
        assert_eq!(position.at("e8"), Some(' '));
        assert_eq!(position.at("a8"), Some(' '));
    }

    #[test]
    fn test_pawn_capture_resolves_source_file() {
        let mut position = BoardPosition::starting();
        position.set(4, 4, 'P'); // White pawn on e4
        position.set(6, 4, ' ');
        position.set(3, 3, 'n'); // Black knight on d5
        apply_token(&mut position, "exd5", true);
        assert_eq!(position.at("e4"), Some(' '));
        assert_eq!(position.at("d5"), Some('P'));
    }

    #[test]
    fn test_two_square_push_requires_clear_path() {
        let mut position = BoardPosition::starting();
        position.set(5, 4, 'n'); // blocker on e3
        let desc = notation::parse_move("e4").unwrap();
        assert_eq!(resolve_source(&position, &desc, true), None);
    }

    #[test]
    fn test_knight_opening_shortcut() {
        let position = BoardPosition::starting();
        let desc = notation::parse_move("Nf3").unwrap();
        let source = resolve_source(&position, &desc, true).unwrap();
        assert_eq!(source, Square { row: 7, col: 6 }); // g1
    }

    #[test]
    fn test_bishop_opening_shortcut() {
        let position = BoardPosition::starting();
        let desc = notation::parse_move("Bc4").unwrap();
        let source = resolve_source(&position, &desc, true).unwrap();
        assert_eq!(source, Square { row: 7, col: 5 }); // f1
    }

    #[test]
    fn test_bishop_path_must_be_clear() {
        // Without e2 vacated the f1 bishop cannot reach b5.
        let desc = notation::parse_move("Bb5").unwrap();
        assert_eq!(resolve_source(&BoardPosition::starting(), &desc, true), None);

        let mut position = BoardPosition::starting();
        position.set(6, 4, ' '); // clear e2
        let source = resolve_source(&position, &desc, true).unwrap();
        assert_eq!(source, Square { row: 7, col: 5 });
    }

    #[test]
    fn test_file_disambiguation_prefers_named_file() {
        let mut position = BoardPosition::starting();
        position.set(7, 6, ' ');
        position.set(5, 5, 'N'); // knights on b1 and f3 can both reach d2
        position.set(6, 3, ' '); // clear d2
        let desc = notation::parse_move("Nbd2").unwrap();
        let source = resolve_source(&position, &desc, true).unwrap();
        assert_eq!(source, Square { row: 7, col: 1 });
    }

    #[test]
    fn test_promotion_places_promoted_piece() {
        let mut position = BoardPosition::starting();
        position.set(1, 0, 'P'); // White pawn on a7
        position.set(0, 0, ' '); // a8 vacated
        apply_token(&mut position, "a8=Q", true);
        assert_eq!(position.at("a8"), Some('Q'));
        assert_eq!(position.at("a7"), Some(' '));
    }

    #[test]
    fn test_unparseable_token_leaves_board_unchanged() {
        let position = replay(&["??", "e4"], PlayerColor::All);
        // The bad token consumed White's turn; e4 was applied as Black.
        assert_eq!(position.at("e2"), Some('P'));
    }

    #[test]
    fn test_sentinel_tokens_skipped() {
        let position = replay(&["e4", "-1", "-1"], PlayerColor::White);
        assert_eq!(position.at("e4"), Some('P'));
    }

    #[test]
    fn test_replay_returns_fresh_board() {
        let first = replay(&["e4"], PlayerColor::All);
        let second = replay::<&str>(&[], PlayerColor::All);
        assert_eq!(first.at("e4"), Some('P'));
        assert_eq!(second, BoardPosition::starting());
    }
}

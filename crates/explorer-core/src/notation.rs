//! SAN move-token parsing.
//!
//! Display-grade notation support: enough to replace opening sequences on a
//! board, with no legality checking. Castle tokens short-circuit; everything
//! else is consumed character by character after a shape check.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Piece kinds as they appear in SAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    fn from_san_byte(b: u8) -> Option<Self> {
        match b {
            b'N' => Some(PieceKind::Knight),
            b'B' => Some(PieceKind::Bishop),
            b'R' => Some(PieceKind::Rook),
            b'Q' => Some(PieceKind::Queen),
            b'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Board letter in the given color's case.
    pub fn piece_char(&self, is_white: bool) -> char {
        let letter = match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        if is_white {
            letter
        } else {
            letter.to_ascii_lowercase()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Structured form of a single SAN token. Files/ranks are board indices:
/// col 0 = file a, row 0 = rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDescriptor {
    pub piece: PieceKind,
    pub is_capture: bool,
    pub promotion: Option<PieceKind>,
    pub source_file: Option<usize>,
    pub source_rank: Option<usize>,
    pub target_file: usize,
    pub target_rank: usize,
    pub castle: Option<CastleSide>,
}

impl MoveDescriptor {
    /// Castle plies carry no square data; the replayer derives every square
    /// from the color and side.
    fn castle(side: CastleSide) -> Self {
        Self {
            piece: PieceKind::King,
            is_capture: false,
            promotion: None,
            source_file: None,
            source_rank: None,
            target_file: 0,
            target_rank: 0,
            castle: Some(side),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed move token '{0}'")]
    Malformed(String),
}

// Same move shape the PGN extractor matches, anchored to the whole token.
static SAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?|O-O-O|O-O)$").unwrap()
});

/// Parse one SAN token into a [`MoveDescriptor`]. Pure; check/checkmate
/// decorations are ignored. Callers recover from errors by skipping the ply.
pub fn parse_move(token: &str) -> Result<MoveDescriptor, ParseError> {
    let stripped = token.trim_end_matches(['+', '#']);
    if stripped == "O-O" {
        return Ok(MoveDescriptor::castle(CastleSide::Kingside));
    }
    if stripped == "O-O-O" {
        return Ok(MoveDescriptor::castle(CastleSide::Queenside));
    }
    if !SAN_RE.is_match(stripped) {
        return Err(ParseError::Malformed(token.to_string()));
    }

    let mut rest = stripped;
    let mut promotion = None;
    if let Some((head, promo)) = rest.split_once('=') {
        promotion = promo.bytes().next().and_then(PieceKind::from_san_byte);
        rest = head;
    }
    let is_capture = rest.contains('x');

    let mut s = rest.as_bytes();
    let piece = match s.first().copied().and_then(PieceKind::from_san_byte) {
        Some(p) => {
            s = &s[1..];
            p
        }
        None => PieceKind::Pawn,
    };

    let mut source_file = None;
    if s.len() > 2 && (b'a'..=b'h').contains(&s[0]) {
        source_file = Some((s[0] - b'a') as usize);
        s = &s[1..];
    }
    let mut source_rank = None;
    if s.len() > 2 && (b'1'..=b'8').contains(&s[0]) {
        source_rank = Some((8 - (s[0] - b'0')) as usize);
        s = &s[1..];
    }

    let squares: Vec<u8> = s.iter().copied().filter(|&b| b != b'x').collect();
    let &[file, rank] = squares.as_slice() else {
        return Err(ParseError::Malformed(token.to_string()));
    };
    let target_file = (file - b'a') as usize;
    let target_rank = (8 - (rank - b'0')) as usize;

    // Pawn captures name their source file implicitly; with the explicit
    // disambiguation already consumed, what remains is the target file.
    if piece == PieceKind::Pawn && is_capture && source_file.is_none() {
        source_file = Some(target_file);
    }

    Ok(MoveDescriptor {
        piece,
        is_capture,
        promotion,
        source_file,
        source_rank,
        target_file,
        target_rank,
        castle: None,
    })
}

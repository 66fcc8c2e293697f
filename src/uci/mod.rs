//! Universal Chess Interface (UCI) protocol front end.
//!
//! Converts between the engine's move/square/score representation and the
//! protocol's coordinate notation, and drives the engine from protocol
//! commands (see [`handler`]) or from a file of positions (see [`batch`]).

use std::time::Instant;

use crate::engine::SearchLimits;
use crate::position::Position;
use crate::types::{
    Move, MoveKind, Square, Value, MAX_PLY, PAWN_VALUE_EG, VALUE_INFINITE, VALUE_MATE,
};

pub mod batch;
pub mod command;
pub mod error;
pub mod handler;
pub mod options;
pub mod print;

pub use batch::{read_descriptors, run_batch, run_batch_file};
pub use error::{OptionError, UciError};
pub use handler::{CommandResult, UciHandler};
pub use options::{OptionAction, OptionKind, OptionsMap, UciOption};
pub use print::Output;

/// Descriptor of the standard initial position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Text for "no move"
pub const NONE_MOVE: &str = "(none)";
/// Text for the null move
pub const NULL_MOVE: &str = "0000";

/// Convert a score to protocol text.
///
/// * `cp <x>`   centipawns from the engine's point of view
/// * `mate <y>` mate in `y` moves (not plies); negative when getting mated
///
/// `v` must lie strictly between `-VALUE_INFINITE` and `VALUE_INFINITE`.
#[must_use]
pub fn value(v: Value) -> String {
    debug_assert!(-VALUE_INFINITE < v && v < VALUE_INFINITE, "score {v} out of range");

    if v.abs() < VALUE_MATE - MAX_PLY {
        format!("cp {}", v * 100 / PAWN_VALUE_EG)
    } else {
        let plies = if v > 0 { VALUE_MATE - v + 1 } else { -VALUE_MATE - v };
        format!("mate {}", plies / 2)
    }
}

/// Square in algebraic notation (g1, a7, ...)
#[must_use]
pub fn square(s: Square) -> String {
    s.to_string()
}

/// Move in coordinate notation (g1f3, a7a8q).
///
/// Castling is stored as king-takes-rook. Outside Chess960 it is shown as the
/// king's conventional landing square (e1g1); in Chess960 as e1h1.
#[must_use]
pub fn move_to_uci(m: Move, chess960: bool) -> String {
    if m == Move::NONE {
        return NONE_MOVE.to_string();
    }
    if m == Move::NULL {
        return NULL_MOVE.to_string();
    }

    let from = m.from_sq();
    let mut to = m.to_sq();

    if m.kind() == MoveKind::Castling && !chess960 {
        let file = if to > from { 6 } else { 2 };
        to = Square::make(file, from.rank());
    }

    let mut text = square(from);
    text.push_str(&square(to));
    if m.kind() == MoveKind::Promotion {
        text.push(m.promotion_type().to_char());
    }
    text
}

/// Find the legal move of `pos` whose notation is `text`.
///
/// A five-character promotion suffix is accepted in either case. The text is
/// only ever matched against generated legal moves, so anything that is not a
/// legal move in `pos` yields `None`.
#[must_use]
pub fn to_move<P: Position>(pos: &P, text: &str) -> Option<Move> {
    let text = normalize_promotion(text);
    let chess960 = pos.is_chess960();
    pos.legal_moves()
        .into_iter()
        .find(|&m| move_to_uci(m, chess960) == text)
}

fn normalize_promotion(text: &str) -> String {
    let mut text = text.to_string();
    if text.len() == 5 && text.is_char_boundary(4) {
        let lower = text[4..].to_ascii_lowercase();
        text.replace_range(4.., &lower);
    }
    text
}

/// Parse the arguments of a tokenized `go` command.
///
/// Unknown tokens and unparsable numbers are skipped. `searchmoves` consumes
/// tokens for as long as they decode to legal moves of `pos`.
#[must_use]
pub fn parse_limits<P: Position>(pos: &P, args: &[&str], start_time: Instant) -> SearchLimits {
    let mut limits = SearchLimits::new(start_time);
    let mut tokens = args.iter().copied().peekable();

    while let Some(token) = tokens.next() {
        match token {
            "searchmoves" => {
                while let Some(m) = tokens.peek().and_then(|t| to_move(pos, t)) {
                    limits.search_moves.push(m);
                    tokens.next();
                }
            }
            "wtime" => limits.time[0] = next_number(&mut tokens),
            "btime" => limits.time[1] = next_number(&mut tokens),
            "winc" => limits.inc[0] = next_number(&mut tokens),
            "binc" => limits.inc[1] = next_number(&mut tokens),
            "movestogo" => limits.moves_to_go = next_number(&mut tokens),
            "depth" => limits.depth = next_number(&mut tokens),
            "nodes" => limits.nodes = next_number(&mut tokens),
            "movetime" => limits.move_time = next_number(&mut tokens),
            "mate" => limits.mate = next_number(&mut tokens),
            "perft" => limits.perft = next_number(&mut tokens),
            "infinite" => limits.infinite = true,
            "ponder" => limits.ponder = true,
            other => log::debug!("ignoring go token '{other}'"),
        }
    }

    limits
}

fn next_number<'a, T, I>(tokens: &mut I) -> Option<T>
where
    T: std::str::FromStr,
    I: Iterator<Item = &'a str>,
{
    tokens.next().and_then(|t| t.parse().ok())
}

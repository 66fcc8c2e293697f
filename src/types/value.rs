//! Evaluation values as reported by the search.

/// Score in internal evaluation units, from the side to move's point of view.
pub type Value = i32;

pub const VALUE_ZERO: Value = 0;
/// Score of delivering mate on the current ply
pub const VALUE_MATE: Value = 32000;
/// Sentinel bound; every real score lies strictly inside (-INFINITE, INFINITE)
pub const VALUE_INFINITE: Value = 32001;

/// Maximum search depth in plies
pub const MAX_PLY: i32 = 128;

/// One pawn in endgame evaluation units; scores are normalized to centipawns by it
pub const PAWN_VALUE_EG: Value = 258;

//! Search limits handed to the search collaborator.

use std::time::Instant;

use crate::types::Move;

/// Limits for one search. Every bound left unset means "engine default".
#[derive(Clone, Debug)]
pub struct SearchLimits {
    /// When the go request arrived; time budgets count from here
    pub start_time: Instant,
    /// Restrict the root to these moves (empty = all legal moves)
    pub search_moves: Vec<Move>,
    /// Remaining clock time in milliseconds, `[white, black]`
    pub time: [Option<u64>; 2],
    /// Increment per move in milliseconds, `[white, black]`
    pub inc: [Option<u64>; 2],
    pub moves_to_go: Option<u32>,
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub move_time: Option<u64>,
    /// Search for a mate in this many moves
    pub mate: Option<u32>,
    pub perft: Option<u32>,
    pub infinite: bool,
    pub ponder: bool,
}

impl SearchLimits {
    /// Empty limits stamped with `start_time`
    #[must_use]
    pub fn new(start_time: Instant) -> Self {
        SearchLimits {
            start_time,
            search_moves: Vec::new(),
            time: [None; 2],
            inc: [None; 2],
            moves_to_go: None,
            depth: None,
            nodes: None,
            move_time: None,
            mate: None,
            perft: None,
            infinite: false,
            ponder: false,
        }
    }

    /// True when the search should budget its own time from the clock
    #[must_use]
    pub fn use_time_management(&self) -> bool {
        self.mate.is_none()
            && self.move_time.is_none()
            && self.depth.is_none()
            && self.nodes.is_none()
            && self.perft.is_none()
            && !self.infinite
    }

    /// True when no bound at all was given
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.use_time_management()
            && self.time.iter().all(Option::is_none)
            && self.inc.iter().all(Option::is_none)
            && self.moves_to_go.is_none()
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

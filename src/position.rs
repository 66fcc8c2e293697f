//! The position collaborator seam.
//!
//! Board representation, FEN parsing, move generation and make-move live
//! outside this crate. The front end only needs the narrow surface below:
//! set a position from a descriptor, apply a move onto a fresh state record,
//! enumerate legal moves and query the variant flag.

use std::fmt;

use crate::states::{StateChain, StateId};
use crate::types::Move;

/// Identifies the search worker a position is set up for.
///
/// Positions may keep per-worker statistics; the front end always sets up
/// positions for the main worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkerContext {
    pub index: usize,
}

impl WorkerContext {
    pub const MAIN: WorkerContext = WorkerContext { index: 0 };

    #[must_use]
    pub fn is_main(self) -> bool {
        self.index == 0
    }
}

/// A mutable game position backed by records in a [`StateChain`].
///
/// The position never owns its state records. It keeps a [`StateId`] handle
/// to the record it was last bound to; the chain keeps the records alive.
pub trait Position: Clone + Default + Send + 'static {
    /// Incrementally cached metadata needed to undo a move and test repetition.
    type State: Clone + Default + Send + Sync + 'static;
    /// Descriptor rejection reason.
    type Error: fmt::Display;

    /// Initialize from a descriptor (FEN-like text), binding to the `root` record.
    fn set(
        &mut self,
        descriptor: &str,
        chess960: bool,
        states: &mut StateChain<Self::State>,
        root: StateId,
        worker: WorkerContext,
    ) -> Result<(), Self::Error>;

    /// Apply a legal move, filling in and binding to the freshly appended `state`.
    fn do_move(&mut self, mv: Move, states: &mut StateChain<Self::State>, state: StateId);

    /// All legal moves in the current position, in generation order.
    fn legal_moves(&self) -> Vec<Move>;

    /// Whether castling is displayed as king-takes-rook.
    fn is_chess960(&self) -> bool;
}

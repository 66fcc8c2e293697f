//! Position history: the append-only chain of state records.
//!
//! A position keeps a [`StateId`] handle into the chain instead of a
//! reference, so replacing the chain can never leave a dangling pointer.
//! Every chain carries a generation tag; handles minted by a discarded chain
//! no longer resolve against its successor.

use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::position::{Position, WorkerContext};
use crate::types::Move;

static NEXT_GENERATION: AtomicU32 = AtomicU32::new(1);

/// Handle to one record in a [`StateChain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateId {
    generation: u32,
    index: u32,
}

impl StateId {
    /// Position of the record in its chain (root is 0)
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Ordered, append-only sequence of state records. Never empty.
#[derive(Clone, Debug)]
pub struct StateChain<S> {
    generation: u32,
    records: Vec<S>,
}

impl<S: Default> StateChain<S> {
    /// Create a chain holding a single default root record
    #[must_use]
    pub fn new() -> Self {
        StateChain {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            records: vec![S::default()],
        }
    }
}

impl<S: Default> Default for StateChain<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateChain<S> {
    fn id(&self, index: usize) -> StateId {
        StateId {
            generation: self.generation,
            index: index as u32,
        }
    }

    fn slot(&self, id: StateId) -> Option<usize> {
        let index = id.index();
        (id.generation == self.generation && index < self.records.len()).then_some(index)
    }

    /// Handle to the root record
    #[inline]
    #[must_use]
    pub fn root(&self) -> StateId {
        self.id(0)
    }

    /// Handle to the most recently appended record
    #[inline]
    #[must_use]
    pub fn tail(&self) -> StateId {
        self.id(self.records.len() - 1)
    }

    /// Append a record and return its handle
    pub fn push(&mut self, record: S) -> StateId {
        self.records.push(record);
        self.tail()
    }

    /// Number of records, root included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; a chain holds at least its root
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `id` was minted by this chain
    #[must_use]
    pub fn contains(&self, id: StateId) -> bool {
        self.slot(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: StateId) -> Option<&S> {
        self.slot(id).map(|i| &self.records[i])
    }

    pub fn get_mut(&mut self, id: StateId) -> Option<&mut S> {
        let i = self.slot(id)?;
        Some(&mut self.records[i])
    }

    /// Handle to the record before `id`, if any
    #[must_use]
    pub fn previous(&self, id: StateId) -> Option<StateId> {
        let index = self.slot(id)?;
        index.checked_sub(1).map(|i| self.id(i))
    }

    /// Walk from `id` back towards the root, `id` first
    pub fn ancestors(&self, id: StateId) -> impl Iterator<Item = &S> + '_ {
        let end = self.slot(id).map_or(0, |i| i + 1);
        self.records[..end].iter().rev()
    }

    /// Records in application order, root first
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.records.iter()
    }
}

impl<S> Index<StateId> for StateChain<S> {
    type Output = S;

    fn index(&self, id: StateId) -> &Self::Output {
        match self.slot(id) {
            Some(i) => &self.records[i],
            None => panic!("stale state handle {id:?} (chain generation {})", self.generation),
        }
    }
}

impl<S> IndexMut<StateId> for StateChain<S> {
    fn index_mut(&mut self, id: StateId) -> &mut Self::Output {
        match self.slot(id) {
            Some(i) => &mut self.records[i],
            None => panic!("stale state handle {id:?} (chain generation {})", self.generation),
        }
    }
}

/// Owns the state chain for the current position setup.
///
/// The chain is shared with a running search through an `Arc`; the caller
/// guarantees no setup or move is applied while a search holds it, so
/// `Arc::make_mut` never actually copies.
pub struct PositionHistory<P: Position> {
    states: Arc<StateChain<P::State>>,
}

impl<P: Position> Default for PositionHistory<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Position> PositionHistory<P> {
    #[must_use]
    pub fn new() -> Self {
        PositionHistory {
            states: Arc::new(StateChain::new()),
        }
    }

    /// Discard the whole chain and start a fresh one with a single root record
    pub fn reset(&mut self) -> StateId {
        self.states = Arc::new(StateChain::new());
        self.states.root()
    }

    /// Reset, then build a position from `descriptor` bound to the new root
    pub fn setup(
        &mut self,
        descriptor: &str,
        chess960: bool,
        worker: WorkerContext,
    ) -> Result<P, P::Error> {
        let root = self.reset();
        let mut pos = P::default();
        pos.set(descriptor, chess960, Arc::make_mut(&mut self.states), root, worker)?;
        Ok(pos)
    }

    /// Append a record and advance `pos` by `mv` onto it
    pub fn apply_move(&mut self, pos: &mut P, mv: Move) {
        let states = Arc::make_mut(&mut self.states);
        let state = states.push(P::State::default());
        pos.do_move(mv, states, state);
    }

    /// Shared handle on the current chain
    #[must_use]
    pub fn states(&self) -> &Arc<StateChain<P::State>> {
        &self.states
    }

    /// Number of records in the current chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

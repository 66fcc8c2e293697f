//! Engine collaborators and the state the front end keeps for them.
//!
//! The search algorithm, transposition table and tablebase prober are
//! external; this module defines the narrow interfaces the front end drives
//! them through, plus the worker plumbing that runs a search asynchronously.

mod limits;
mod threads;
pub mod time;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::position::Position;
use crate::sync::StopFlag;
use crate::types::{Move, Value};

pub use limits::SearchLimits;
pub use threads::{SearchJob, Threads};
pub use time::{SharedTimeManager, TimeManager};

/// Result of one finished search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `Move::NONE` when the root has no legal move
    pub best_move: Move,
    /// Expected reply, `Move::NONE` if unknown
    pub ponder_move: Move,
    pub depth: u32,
    /// Score of the best line, if the search produced one
    pub score: Option<Value>,
}

impl SearchOutcome {
    #[must_use]
    pub fn new(best_move: Move) -> Self {
        SearchOutcome {
            best_move,
            ponder_move: Move::NONE,
            depth: 0,
            score: None,
        }
    }
}

/// The search algorithm.
pub trait Search: Send + 'static {
    type Position: Position;

    /// Search the job's position until a limit is hit or `stop` is raised
    fn think(&mut self, job: &SearchJob<Self::Position>, stop: &StopFlag) -> SearchOutcome;

    /// Forget everything learned in previous searches (history tables, etc.)
    fn clear(&mut self);
}

/// Transposition table storage.
pub trait TranspositionTable {
    /// Reallocate to `mb` megabytes, discarding all entries
    fn resize(&mut self, mb: usize);
}

/// Endgame tablebase prober.
pub trait Tablebases {
    /// (Re)load tablebases from `path`; `<empty>` or an empty string disables probing
    fn init(&mut self, path: &str);
}

/// The front end's handle on all engine collaborators.
pub struct Engine<S: Search, T, B> {
    threads: Threads<S>,
    tt: T,
    tablebases: B,
    time: SharedTimeManager,
}

impl<S, T, B> Engine<S, T, B>
where
    S: Search,
    T: TranspositionTable,
    B: Tablebases,
{
    #[must_use]
    pub fn new(search: S, tt: T, tablebases: B) -> Self {
        Engine {
            threads: Threads::new(search),
            tt,
            tablebases,
            time: Arc::new(Mutex::new(TimeManager::new())),
        }
    }

    /// Reset everything that must not leak from one game into the next
    pub fn new_game(&mut self, hash_mb: usize, syzygy_path: &str) {
        self.threads.wait_for_search_finished();
        self.tt.resize(hash_mb);
        self.threads.clear();
        self.tablebases.init(syzygy_path);
        self.time.lock().available_nodes = 0;
        log::debug!("new game: hash {hash_mb} MB, tablebases '{syzygy_path}'");
    }

    pub fn resize_hash(&mut self, mb: usize) {
        self.threads.wait_for_search_finished();
        self.tt.resize(mb);
    }

    pub fn init_tablebases(&mut self, path: &str) {
        self.threads.wait_for_search_finished();
        self.tablebases.init(path);
    }

    #[must_use]
    pub fn threads(&self) -> &Threads<S> {
        &self.threads
    }

    pub fn threads_mut(&mut self) -> &mut Threads<S> {
        &mut self.threads
    }

    #[must_use]
    pub fn tt(&self) -> &T {
        &self.tt
    }

    #[must_use]
    pub fn tablebases(&self) -> &B {
        &self.tablebases
    }

    #[must_use]
    pub fn time(&self) -> &SharedTimeManager {
        &self.time
    }
}

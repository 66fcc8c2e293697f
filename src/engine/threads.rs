//! Search worker management.
//!
//! The controlling thread starts a search on a dedicated worker and may then
//! block until the worker signals completion. Completion, stop and ponderhit
//! are all signalled through one condition variable; nothing polls.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use crate::position::{Position, WorkerContext};
use crate::states::StateChain;
use crate::sync::StopFlag;

use super::limits::SearchLimits;
use super::time::SharedTimeManager;
use super::{Search, SearchOutcome};

/// Search thread stack size (32 MB)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Everything the search collaborator gets for one search.
///
/// The position is a private copy; the state chain is shared read-only for
/// the duration of the search.
pub struct SearchJob<P: Position> {
    pub position: P,
    pub states: Arc<StateChain<P::State>>,
    pub limits: SearchLimits,
    pub time: SharedTimeManager,
    pub worker: WorkerContext,
}

#[derive(Debug, Default)]
struct WorkerState {
    searching: bool,
    pondering: bool,
}

#[derive(Debug, Default)]
struct Signals {
    stop: StopFlag,
    state: Mutex<WorkerState>,
    changed: Condvar,
}

impl Signals {
    fn begin(&self, pondering: bool) {
        self.stop.reset();
        let mut state = self.state.lock();
        state.searching = true;
        state.pondering = pondering;
    }

    fn finish(&self) {
        let mut state = self.state.lock();
        state.searching = false;
        state.pondering = false;
        self.changed.notify_all();
    }

    fn stop(&self) {
        self.stop.stop();
        let _state = self.state.lock();
        self.changed.notify_all();
    }

    fn ponderhit(&self) {
        let mut state = self.state.lock();
        state.pondering = false;
        self.changed.notify_all();
    }

    /// The best move must not be reported while pondering or in an infinite
    /// search until the GUI says so.
    fn hold_report(&self, infinite: bool) {
        let mut state = self.state.lock();
        while !self.stop.is_stopped() && (state.pondering || infinite) {
            self.changed.wait(&mut state);
        }
    }

    fn wait_finished(&self) {
        let mut state = self.state.lock();
        while state.searching {
            self.changed.wait(&mut state);
        }
    }

    fn is_searching(&self) -> bool {
        self.state.lock().searching
    }
}

/// Owner of the search collaborator and its worker thread.
pub struct Threads<S: Search> {
    search: Arc<Mutex<S>>,
    signals: Arc<Signals>,
    handle: Option<JoinHandle<()>>,
}

impl<S: Search> Threads<S> {
    #[must_use]
    pub fn new(search: S) -> Self {
        Threads {
            search: Arc::new(Mutex::new(search)),
            signals: Arc::new(Signals::default()),
            handle: None,
        }
    }

    /// Context positions are set up for
    #[must_use]
    pub fn main(&self) -> WorkerContext {
        WorkerContext::MAIN
    }

    /// Start a search asynchronously.
    ///
    /// Waits for any previous search first. `on_finish` runs on the worker
    /// with the searched position once the result may be reported; the
    /// worker signals completion only after it returns.
    pub fn start_thinking<F>(
        &mut self,
        pos: &S::Position,
        states: &Arc<StateChain<<S::Position as Position>::State>>,
        limits: SearchLimits,
        time: SharedTimeManager,
        on_finish: F,
    ) -> io::Result<()>
    where
        F: FnOnce(&S::Position, SearchOutcome) + Send + 'static,
    {
        self.wait_for_search_finished();
        self.signals.begin(limits.ponder);

        let job = SearchJob {
            position: pos.clone(),
            states: Arc::clone(states),
            limits,
            time,
            worker: self.main(),
        };
        let search = Arc::clone(&self.search);
        let signals = Arc::clone(&self.signals);

        let spawned = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let outcome = search.lock().think(&job, &signals.stop);
                signals.hold_report(job.limits.infinite);

                // Release the chain before the controller may touch it again.
                let SearchJob {
                    position, states, ..
                } = job;
                drop(states);

                on_finish(&position, outcome);
                signals.finish();
            });

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.signals.finish();
                Err(e)
            }
        }
    }

    /// Block until the current search (if any) has signalled completion
    pub fn wait_for_search_finished(&mut self) {
        self.signals.wait_finished();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("search worker panicked");
            }
        }
    }

    /// Ask the running search to stop (non-blocking)
    pub fn stop(&self) {
        self.signals.stop();
    }

    /// Switch a pondering search to a normal one
    pub fn ponderhit(&self) {
        self.signals.ponderhit();
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.signals.is_searching()
    }

    /// Clear search-internal learned state
    pub fn clear(&mut self) {
        self.wait_for_search_finished();
        self.search.lock().clear();
    }

    /// Run a closure with exclusive access to the idle search collaborator
    pub fn with_search<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut S) -> R,
    {
        self.wait_for_search_finished();
        f(&mut self.search.lock())
    }
}

impl<S: Search> Drop for Threads<S> {
    fn drop(&mut self) {
        self.stop();
        self.wait_for_search_finished();
    }
}

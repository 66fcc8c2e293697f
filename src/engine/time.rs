//! Time management state owned by the front end.
//!
//! The budgeting itself belongs to the search collaborator; the front end
//! only resets the node budget used in nodes-as-time mode.

use std::sync::Arc;

use parking_lot::Mutex;

/// State the time manager keeps across searches of one game.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimeManager {
    /// Remaining node budget when the `nodestime` option turns nodes into time.
    /// Zero means "not yet initialized for this game".
    pub available_nodes: i64,
}

impl TimeManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Time manager shared between the controller and the search worker.
pub type SharedTimeManager = Arc<Mutex<TimeManager>>;

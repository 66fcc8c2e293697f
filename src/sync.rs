//! Stop signal shared between the protocol thread and the search worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Raised by the controller (`stop`, `quit`) and polled by the search.
///
/// Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Re-arm for the next search
    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

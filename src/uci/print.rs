//! Protocol output.
//!
//! The controlling thread and the search worker both write protocol lines;
//! [`Output`] serializes them so lines never interleave.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::SearchOutcome;
use crate::types::Move;

use super::{move_to_uci, value};

/// Engine name reported by `uci`
pub const ENGINE_NAME: &str = concat!("uci_driver ", env!("CARGO_PKG_VERSION"));
pub const ENGINE_AUTHOR: &str = "the uci_driver developers";

/// Line-synchronized protocol writer, cheap to clone.
pub struct Output<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for Output<W> {
    fn clone(&self) -> Self {
        Output {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Output<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Output::new(io::stdout())
    }
}

impl<W: Write> Output<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Output {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Write `text` followed by a newline, then flush
    pub fn line(&self, text: impl Display) {
        let mut w = self.inner.lock();
        if let Err(e) = writeln!(w, "{text}").and_then(|()| w.flush()) {
            log::warn!("failed to write protocol output: {e}");
        }
    }

    /// Write `text` without a newline, then flush
    pub fn text(&self, text: impl Display) {
        let mut w = self.inner.lock();
        if let Err(e) = write!(w, "{text}").and_then(|()| w.flush()) {
            log::warn!("failed to write protocol output: {e}");
        }
    }

    /// Run a closure with exclusive access to the writer
    pub fn with<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

/// Echo of a batch descriptor preceding its search output
#[must_use]
pub fn format_descriptor_echo(descriptor: &str) -> String {
    format!("\"{descriptor}\" ")
}

#[must_use]
pub fn format_bestmove(best: Move, ponder: Move, chess960: bool) -> String {
    let mut line = format!("bestmove {}", move_to_uci(best, chess960));
    if ponder != Move::NONE {
        line.push_str(" ponder ");
        line.push_str(&move_to_uci(ponder, chess960));
    }
    line
}

/// Final report of a finished search: an optional score line, then `bestmove`.
/// Both lines go out in one write.
pub fn print_outcome<W: Write>(out: &Output<W>, outcome: &SearchOutcome, chess960: bool) {
    let bestmove = format_bestmove(outcome.best_move, outcome.ponder_move, chess960);
    match outcome.score {
        Some(score) => out.line(format_args!(
            "info depth {} score {}\n{bestmove}",
            outcome.depth,
            value(score)
        )),
        None => out.line(bestmove),
    }
}

pub fn print_id<W: Write>(out: &Output<W>) {
    out.line(format_args!("id name {ENGINE_NAME}"));
    out.line(format_args!("id author {ENGINE_AUTHOR}"));
}

pub fn print_ready<W: Write>(out: &Output<W>) {
    out.line("readyok");
}

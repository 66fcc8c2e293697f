//! Fake collaborators shared by the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;

use uci_driver::engine::SearchJob;
use uci_driver::sync::StopFlag;
use uci_driver::types::PieceType;
use uci_driver::uci::Output;
use uci_driver::{
    Engine, Move, Position, Search, SearchOutcome, Square, StateChain, StateId, Tablebases,
    TranspositionTable, UciHandler, WorkerContext,
};

pub fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

/// Toy position: a descriptor `"<name> <side>"` and a fixed per-side menu of moves.
#[derive(Clone, Debug, Default)]
pub struct ToyPosition {
    pub name: String,
    pub white_first: bool,
    pub chess960: bool,
    pub played: Vec<Move>,
    pub state: Option<StateId>,
}

impl ToyPosition {
    fn white_to_move(&self) -> bool {
        (self.played.len() % 2 == 0) == self.white_first
    }
}

impl Position for ToyPosition {
    /// Ply count stored per record
    type State = usize;
    type Error = String;

    fn set(
        &mut self,
        descriptor: &str,
        chess960: bool,
        states: &mut StateChain<usize>,
        root: StateId,
        _worker: WorkerContext,
    ) -> Result<(), String> {
        let mut tokens = descriptor.split_whitespace();
        let name = tokens.next().ok_or("no position name")?;
        let white_first = match tokens.next() {
            Some("w") | None => true,
            Some("b") => false,
            Some(other) => return Err(format!("bad side '{other}'")),
        };
        *self = ToyPosition {
            name: name.to_string(),
            white_first,
            chess960,
            played: Vec::new(),
            state: Some(root),
        };
        states[root] = 0;
        Ok(())
    }

    fn do_move(&mut self, mv: Move, states: &mut StateChain<usize>, state: StateId) {
        self.played.push(mv);
        self.state = Some(state);
        states[state] = self.played.len();
    }

    fn legal_moves(&self) -> Vec<Move> {
        if self.white_to_move() {
            vec![
                Move::new(sq("e2"), sq("e4")),
                Move::new(sq("g1"), sq("f3")),
                Move::castling(sq("e1"), sq("h1")),
                Move::promotion(sq("b7"), sq("b8"), PieceType::Queen),
            ]
        } else {
            vec![
                Move::new(sq("e7"), sq("e5")),
                Move::new(sq("g8"), sq("f6")),
                Move::castling(sq("e8"), sq("a8")),
            ]
        }
    }

    fn is_chess960(&self) -> bool {
        self.chess960
    }
}

/// Snapshot of one search request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seen {
    pub name: String,
    pub played: Vec<Move>,
    pub states: usize,
}

/// Plays the last legal move, replying with the opponent's first
#[derive(Clone, Default)]
pub struct ToySearch {
    pub seen: Arc<Mutex<Vec<Seen>>>,
    pub clears: Arc<Mutex<usize>>,
}

impl Search for ToySearch {
    type Position = ToyPosition;

    fn think(&mut self, job: &SearchJob<ToyPosition>, _stop: &StopFlag) -> SearchOutcome {
        self.seen.lock().push(Seen {
            name: job.position.name.clone(),
            played: job.position.played.clone(),
            states: job.states.len(),
        });
        let best = job.position.legal_moves().last().copied().unwrap_or(Move::NONE);
        let mut outcome = SearchOutcome::new(best);
        outcome.depth = 5;
        outcome.score = Some(-40);
        outcome
    }

    fn clear(&mut self) {
        *self.clears.lock() += 1;
    }
}

#[derive(Clone, Default)]
pub struct ToyTable(pub Arc<Mutex<Vec<usize>>>);

impl TranspositionTable for ToyTable {
    fn resize(&mut self, mb: usize) {
        self.0.lock().push(mb);
    }
}

#[derive(Clone, Default)]
pub struct ToyTablebases(pub Arc<Mutex<Vec<String>>>);

impl Tablebases for ToyTablebases {
    fn init(&mut self, path: &str) {
        self.0.lock().push(path.to_string());
    }
}

/// In-memory protocol sink readable while the handler holds it
#[derive(Clone, Default)]
pub struct Sink(Arc<Mutex<Vec<u8>>>);

impl Sink {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl std::io::Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub struct Harness {
    pub handler: UciHandler<ToySearch, ToyTable, ToyTablebases, Sink>,
    pub search: ToySearch,
    pub table: ToyTable,
    pub tablebases: ToyTablebases,
    pub sink: Sink,
}

pub fn harness() -> Harness {
    let search = ToySearch::default();
    let table = ToyTable::default();
    let tablebases = ToyTablebases::default();
    let sink = Sink::default();
    let engine = Engine::new(search.clone(), table.clone(), tablebases.clone());
    Harness {
        handler: UciHandler::new(engine, Output::new(sink.clone())),
        search,
        table,
        tablebases,
        sink,
    }
}

//! Scripted collaborators for unit tests.
//!
//! `ScriptedPosition` is not chess: each side has a fixed menu of moves that
//! covers every move kind the codec distinguishes, and a running key makes
//! repetitions observable through the state chain.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::engine::{Engine, Search, SearchJob, SearchLimits, SearchOutcome, Tablebases, TranspositionTable};
use crate::position::{Position, WorkerContext};
use crate::states::{StateChain, StateId};
use crate::sync::StopFlag;
use crate::types::{Move, MoveKind, PieceType, Square, VALUE_ZERO};
use crate::uci::{Output, UciHandler};

pub fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

/// Normal move from "e2e4", promotion from "a7a8q"
pub fn mv(text: &str) -> Move {
    let from = sq(&text[0..2]);
    let to = sq(&text[2..4]);
    match text[4..].chars().next() {
        Some(c) => Move::promotion(from, to, PieceType::from_char(c).unwrap()),
        None => Move::new(from, to),
    }
}

fn menu(white: bool) -> Vec<Move> {
    let mut moves = Vec::new();
    if white {
        moves.extend(["e2e4", "d2d4", "g1f3"].map(mv));
        moves.push(Move::castling(sq("e1"), sq("h1")));
        moves.extend(PieceType::PROMOTIONS.map(|p| Move::promotion(sq("a7"), sq("a8"), p)));
        moves.push(Move::make(MoveKind::EnPassant, sq("e5"), sq("d6"), PieceType::Knight));
    } else {
        moves.extend(["e7e5", "d7d5", "b8c6"].map(mv));
        moves.push(Move::castling(sq("e8"), sq("a8")));
        moves.extend(PieceType::PROMOTIONS.map(|p| Move::promotion(sq("a2"), sq("a1"), p)));
    }
    moves
}

fn move_key(m: Move) -> u64 {
    let mut hasher = DefaultHasher::new();
    m.as_u16().hash(&mut hasher);
    hasher.finish()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptedState {
    pub key: u64,
    pub ply: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ScriptedPosition {
    descriptor: String,
    black_first: bool,
    chess960: bool,
    moves: Vec<Move>,
    key: u64,
    state: Option<StateId>,
}

impl ScriptedPosition {
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn state(&self) -> StateId {
        self.state.expect("position was never set")
    }

    fn white_to_move(&self) -> bool {
        (self.moves.len() % 2 == 0) != self.black_first
    }

    /// Same key seen earlier in the chain
    pub fn is_repetition(&self, states: &Arc<StateChain<ScriptedState>>) -> bool {
        states.ancestors(self.state()).skip(1).any(|s| s.key == self.key)
    }
}

impl PartialEq for ScriptedPosition {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
            && self.black_first == other.black_first
            && self.chess960 == other.chess960
            && self.moves == other.moves
            && self.key == other.key
            && self.state.map(StateId::index) == other.state.map(StateId::index)
    }
}

impl Position for ScriptedPosition {
    type State = ScriptedState;
    type Error = String;

    fn set(
        &mut self,
        descriptor: &str,
        chess960: bool,
        states: &mut StateChain<ScriptedState>,
        root: StateId,
        _worker: WorkerContext,
    ) -> Result<(), String> {
        if descriptor.trim().is_empty() {
            return Err("empty descriptor".to_string());
        }
        let mut hasher = DefaultHasher::new();
        descriptor.hash(&mut hasher);

        *self = ScriptedPosition {
            descriptor: descriptor.to_string(),
            black_first: descriptor.split_whitespace().nth(1) == Some("b"),
            chess960,
            moves: Vec::new(),
            key: hasher.finish(),
            state: Some(root),
        };
        states[root] = ScriptedState { key: self.key, ply: 0 };
        Ok(())
    }

    fn do_move(&mut self, mv: Move, states: &mut StateChain<ScriptedState>, state: StateId) {
        self.moves.push(mv);
        self.key ^= move_key(mv);
        self.state = Some(state);
        states[state] = ScriptedState {
            key: self.key,
            ply: self.moves.len(),
        };
    }

    fn legal_moves(&self) -> Vec<Move> {
        menu(self.white_to_move())
    }

    fn is_chess960(&self) -> bool {
        self.chess960
    }
}

/// What the search saw for one job
#[derive(Clone, Debug)]
pub struct RecordedJob {
    pub descriptor: String,
    pub moves: Vec<Move>,
    pub states_len: usize,
    pub limits: SearchLimits,
    pub worker: WorkerContext,
}

/// Plays the first legal move at score 0 and records every job
#[derive(Debug, Default)]
pub struct RecordingSearch {
    jobs: Vec<RecordedJob>,
    learned: Vec<Move>,
    clears: usize,
}

impl RecordingSearch {
    pub fn jobs(&self) -> &[RecordedJob] {
        &self.jobs
    }

    pub fn learned(&self) -> &[Move] {
        &self.learned
    }

    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Search for RecordingSearch {
    type Position = ScriptedPosition;

    fn think(&mut self, job: &SearchJob<ScriptedPosition>, _stop: &StopFlag) -> SearchOutcome {
        self.jobs.push(RecordedJob {
            descriptor: job.position.descriptor.clone(),
            moves: job.position.moves.clone(),
            states_len: job.states.len(),
            limits: job.limits.clone(),
            worker: job.worker,
        });

        let best = job.position.legal_moves().first().copied().unwrap_or(Move::NONE);
        self.learned.push(best);

        let mut outcome = SearchOutcome::new(best);
        outcome.depth = job.limits.depth.unwrap_or(1);
        outcome.score = Some(VALUE_ZERO);
        outcome
    }

    fn clear(&mut self) {
        self.learned.clear();
        self.clears += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingTable {
    pub size_mb: usize,
    pub resizes: usize,
}

impl TranspositionTable for RecordingTable {
    fn resize(&mut self, mb: usize) {
        self.size_mb = mb;
        self.resizes += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingTablebases {
    pub path: String,
    pub inits: usize,
}

impl Tablebases for RecordingTablebases {
    fn init(&mut self, path: &str) {
        self.path = path.to_string();
        self.inits += 1;
    }
}

pub type TestEngine = Engine<RecordingSearch, RecordingTable, RecordingTablebases>;
pub type TestHandler = UciHandler<RecordingSearch, RecordingTable, RecordingTablebases, Vec<u8>>;

pub fn test_engine() -> TestEngine {
    Engine::new(
        RecordingSearch::default(),
        RecordingTable::default(),
        RecordingTablebases::default(),
    )
}

/// Read side of an in-memory [`Output`]
pub struct Captured(Output<Vec<u8>>);

impl Captured {
    pub fn contents(&self) -> String {
        self.0.with(|buf| String::from_utf8_lossy(buf).into_owned())
    }
}

pub fn captured() -> (Output<Vec<u8>>, Captured) {
    let out = Output::new(Vec::new());
    (out.clone(), Captured(out))
}

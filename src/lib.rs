pub mod engine;
pub mod position;
pub mod states;
pub mod sync;
pub mod types;
pub mod uci;

#[cfg(test)]
mod testing;

pub use engine::{Engine, Search, SearchLimits, SearchOutcome, Tablebases, TranspositionTable};
pub use position::{Position, WorkerContext};
pub use states::{PositionHistory, StateChain, StateId};
pub use types::{Move, MoveKind, PieceType, Square};
pub use uci::{Output, UciHandler};

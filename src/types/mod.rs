//! Core value types shared by the protocol front end and its collaborators.
//!
//! Squares, piece kinds, packed moves and evaluation values. The encodings
//! match what the position and search collaborators produce, so moves can be
//! passed across the collaborator seam without translation.

mod error;
mod moves;
mod piece;
mod square;
mod value;

pub use error::SquareError;
pub use moves::{Move, MoveKind};
pub use piece::PieceType;
pub use square::Square;
pub use value::{Value, MAX_PLY, PAWN_VALUE_EG, VALUE_INFINITE, VALUE_MATE, VALUE_ZERO};

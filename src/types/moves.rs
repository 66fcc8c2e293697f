//! Packed move representation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::PieceType;
use super::square::Square;

const TO_MASK: u16 = 0x3F;
const FROM_SHIFT: u16 = 6;
const PROMO_SHIFT: u16 = 12;
const KIND_SHIFT: u16 = 14;

/// Move kind tag stored in the top two bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Promotion,
    EnPassant,
    /// Stored as "king captures own rook"
    Castling,
}

impl MoveKind {
    const fn bits(self) -> u16 {
        match self {
            MoveKind::Normal => 0,
            MoveKind::Promotion => 1,
            MoveKind::EnPassant => 2,
            MoveKind::Castling => 3,
        }
    }
}

/// Compact 16-bit move.
///
/// Encoding:
/// - bits 0-5:   destination square
/// - bits 6-11:  origin square
/// - bits 12-13: promotion piece (knight..queen), meaningful only for promotions
/// - bits 14-15: move kind
///
/// Two values are reserved: [`Move::NONE`] (0) and [`Move::NULL`] (origin and
/// destination both b1). Neither can be a real move since origin and
/// destination would coincide.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    pub const NONE: Move = Move(0);
    pub const NULL: Move = Move(65);

    /// Create a normal move
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Move(((from.index() as u16) << FROM_SHIFT) | to.index() as u16)
    }

    /// Create a move of the given kind.
    ///
    /// `promotion` is only stored for [`MoveKind::Promotion`]; it must be one of
    /// knight, bishop, rook or queen.
    #[inline]
    #[must_use]
    pub const fn make(kind: MoveKind, from: Square, to: Square, promotion: PieceType) -> Self {
        let promo = match promotion {
            PieceType::Bishop => 1,
            PieceType::Rook => 2,
            PieceType::Queen => 3,
            _ => 0,
        };
        let promo = if matches!(kind, MoveKind::Promotion) { promo } else { 0 };
        Move(
            (kind.bits() << KIND_SHIFT)
                | (promo << PROMO_SHIFT)
                | ((from.index() as u16) << FROM_SHIFT)
                | to.index() as u16,
        )
    }

    /// Create a castling move, encoded as the king moving onto its own rook
    #[inline]
    #[must_use]
    pub const fn castling(king: Square, rook: Square) -> Self {
        Move::make(MoveKind::Castling, king, rook, PieceType::Knight)
    }

    /// Create a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion(from: Square, to: Square, piece: PieceType) -> Self {
        Move::make(MoveKind::Promotion, from, to, piece)
    }

    /// Origin square
    #[inline]
    #[must_use]
    pub const fn from_sq(self) -> Square {
        Square::from_index(((self.0 >> FROM_SHIFT) & 0x3F) as u8)
    }

    /// Destination square (the rook's square for castling)
    #[inline]
    #[must_use]
    pub const fn to_sq(self) -> Square {
        Square::from_index((self.0 & TO_MASK) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        match self.0 >> KIND_SHIFT {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castling,
        }
    }

    /// Promotion piece; only meaningful when `kind()` is [`MoveKind::Promotion`]
    #[inline]
    #[must_use]
    pub const fn promotion_type(self) -> PieceType {
        PieceType::PROMOTIONS[((self.0 >> PROMO_SHIFT) & 3) as usize]
    }

    /// False for [`Move::NONE`] and [`Move::NULL`]
    #[inline]
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.from_sq().index() != self.to_sq().index()
    }

    /// Raw 16-bit value (for hashing/storage)
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Create from raw 16-bit value
    #[inline]
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        Move(value)
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::NONE => return write!(f, "Move(none)"),
            Move::NULL => return write!(f, "Move(null)"),
            _ => {}
        }
        write!(f, "Move({}{}", self.from_sq(), self.to_sq())?;
        match self.kind() {
            MoveKind::Normal => {}
            MoveKind::Promotion => write!(f, "={}", self.promotion_type().to_char())?,
            MoveKind::EnPassant => write!(f, " ep")?,
            MoveKind::Castling => write!(f, " castle")?,
        }
        write!(f, ")")
    }
}

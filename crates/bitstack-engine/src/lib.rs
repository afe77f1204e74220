//! Bit-packed falling-block board and piece geometry.
//!
//! The crate is organized leaves first:
//!
//! - [`Piece`] and [`Rotation`] - the 7 shapes, 4 orientations and the rotation table
//! - [`PieceLocation`] - a piece anchored on the board
//! - [`BitBoard`] - 10 columns stored as `u64` bitmasks (bit `i` = row `i`, row 0 at the floor)
//! - [`GarbageGenerator`] - seeded choice of the garbage hole column
//!
//! # Example
//!
//! ```
//! use bitstack_engine::{BitBoard, Piece, PieceLocation, Rotation};
//!
//! let mut board = BitBoard::new();
//! let loc = PieceLocation::new(Piece::T, Rotation::North, 4, 10);
//!
//! let landed = board.hard_drop(loc);
//! assert_eq!(landed.y(), 0);
//! assert!(!board.obstructed(landed));
//!
//! board.put_piece(landed);
//! assert_eq!(board.remove_lines(), 0);
//! ```

pub use self::{core::*, garbage::*};

pub mod core;
pub mod garbage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding with occupied cells")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("block ({x}, {y}) is outside of the board")]
pub struct OutOfBoundsError {
    pub x: i32,
    pub y: i32,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum PlacementError {
    #[display("piece cannot be placed: {_0}")]
    OutOfBounds(OutOfBoundsError),
    #[display("piece cannot be placed: {_0}")]
    Collision(PieceCollisionError),
}

use serde::{Deserialize, Serialize};

use super::piece::{Piece, Rotation};

/// A piece anchored at a board position with a given rotation.
///
/// `PieceLocation` is a plain value: translating or rotating it returns a new
/// location and leaves the original untouched. The board never stores
/// locations; callers build one per query or placement.
///
/// # Coordinate System
///
/// - `x` is the column, increasing to the right (`0..10` on the board)
/// - `y` is the row, increasing upward from the floor (`0..64` on the board)
/// - The anchor itself may lie anywhere; only [`Self::blocks`] must stay in range
///   when the location is passed to [`BitBoard`](super::bit_board::BitBoard)
///
/// # Example
///
/// ```
/// use bitstack_engine::{Piece, PieceLocation, Rotation};
///
/// let loc = PieceLocation::new(Piece::T, Rotation::North, 4, 0);
/// assert_eq!(loc.blocks(), [(3, 0), (4, 0), (5, 0), (4, 1)]);
///
/// let moved = loc.with_offset(1, 2).with_rotation(Rotation::South);
/// assert_eq!((moved.x(), moved.y()), (5, 2));
/// assert_eq!(loc.x(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceLocation {
    piece: Piece,
    rotation: Rotation,
    x: i32,
    y: i32,
}

impl Serialize for PieceLocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "piece#rotation@x,y" (e.g., "T#1@4,18")
        let s = format!(
            "{}#{}@{},{}",
            self.piece.as_char(),
            self.rotation.index(),
            self.x,
            self.y
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for PieceLocation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let (piece_str, rest) = s.split_once('#').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing '#' in format 'piece#rotation@x,y', got '{s}'"
            ))
        })?;
        let (rotation_str, position_str) = rest.split_once('@').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing '@' in format 'piece#rotation@x,y', got '{s}'"
            ))
        })?;
        let (x_str, y_str) = position_str.split_once(',').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing ',' in format 'piece#rotation@x,y', got '{s}'"
            ))
        })?;

        let mut chars = piece_str.chars();
        let piece = match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_char(c)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid piece: {c}")))?,
            _ => {
                return Err(serde::de::Error::custom(format!(
                    "piece must be single character, got '{piece_str}'"
                )));
            }
        };

        let rotation_num = rotation_str.parse::<u8>().map_err(|e| {
            serde::de::Error::custom(format!("invalid rotation: {rotation_str} ({e})"))
        })?;
        let rotation = Rotation::from_index(rotation_num).ok_or_else(|| {
            serde::de::Error::custom(format!("rotation must be 0-3, got {rotation_num}"))
        })?;

        let x = x_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid x position: {x_str} ({e})")))?;
        let y = y_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid y position: {y_str} ({e})")))?;

        Ok(PieceLocation::new(piece, rotation, x, y))
    }
}

impl PieceLocation {
    #[must_use]
    pub const fn new(piece: Piece, rotation: Rotation, x: i32, y: i32) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
        }
    }

    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the 4 absolute `(column, row)` cells occupied by this piece.
    #[inline]
    #[must_use]
    pub fn blocks(&self) -> [(i32, i32); 4] {
        self.piece
            .offsets(self.rotation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Returns a copy with the anchor translated by `(dx, dy)`.
    #[must_use]
    pub const fn with_offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns a copy with the rotation replaced; the anchor stays in place.
    #[must_use]
    pub const fn with_rotation(&self, rotation: Rotation) -> Self {
        Self { rotation, ..*self }
    }

    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        self.with_rotation(self.rotation.rotate_cw())
    }

    #[must_use]
    pub const fn rotated_ccw(&self) -> Self {
        self.with_rotation(self.rotation.rotate_ccw())
    }

    #[must_use]
    pub const fn rotated_180(&self) -> Self {
        self.with_rotation(self.rotation.rotate_180())
    }
}

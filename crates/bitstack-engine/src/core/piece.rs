use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Cell offset `(dx, dy)` relative to a piece anchor.
///
/// `dx` grows to the right, `dy` grows upward (towards higher rows).
pub type Offset = (i32, i32);

/// Enum representing the shape of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Piece {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<Piece> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Piece {
        Piece::ALL[rng.random_range(0..Piece::LEN)]
    }
}

impl Piece {
    /// Number of piece shapes (7).
    pub const LEN: usize = 7;

    pub const ALL: [Piece; Piece::LEN] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    /// Returns the 4 cell offsets of this piece in the given rotation.
    ///
    /// The offsets come from [`ROTATION_TABLE`], so every call returns the same
    /// `'static` reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitstack_engine::{Piece, Rotation};
    ///
    /// assert_eq!(Piece::I.offsets(Rotation::North), &[(-1, 0), (0, 0), (1, 0), (2, 0)]);
    /// assert_eq!(Piece::I.offsets(Rotation::East), &[(0, 1), (0, 0), (0, -1), (0, -2)]);
    /// ```
    #[inline]
    #[must_use]
    pub fn offsets(self, rotation: Rotation) -> &'static [Offset; 4] {
        &ROTATION_TABLE[self as usize][rotation as usize]
    }

    /// Returns the single character representation of this piece.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitstack_engine::Piece;
    ///
    /// assert_eq!(Piece::I.as_char(), 'I');
    /// assert_eq!(Piece::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::T => 'T',
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::J => 'J',
            Piece::L => 'L',
        }
    }

    /// Parses a piece from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitstack_engine::Piece;
    ///
    /// assert_eq!(Piece::from_char('S'), Some(Piece::S));
    /// assert_eq!(Piece::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Piece::I),
            'O' => Some(Piece::O),
            'T' => Some(Piece::T),
            'S' => Some(Piece::S),
            'Z' => Some(Piece::Z),
            'J' => Some(Piece::J),
            'L' => Some(Piece::L),
            _ => None,
        }
    }

    const fn base_offsets(self) -> [Offset; 4] {
        match self {
            Piece::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            Piece::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Piece::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
            Piece::S => [(-1, 0), (0, 0), (0, 1), (1, 1)],
            Piece::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
            Piece::J => [(-1, 0), (0, 0), (1, 0), (-1, 1)],
            Piece::L => [(-1, 0), (0, 0), (1, 0), (1, 1)],
        }
    }
}

/// Orientation of a piece.
///
/// The four states form a cycle `North -> East -> South -> West -> North`;
/// every transform wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Rotation {
    /// Spawn orientation.
    #[default]
    North = 0,
    /// 90° clockwise.
    East = 1,
    /// 180°.
    South = 2,
    /// 270° clockwise (90° counterclockwise).
    West = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rotation::North),
            1 => Some(Rotation::East),
            2 => Some(Rotation::South),
            3 => Some(Rotation::West),
            _ => None,
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn rotate_cw(self) -> Self {
        Self::ALL[(self as usize + 1) % 4]
    }

    #[must_use]
    pub const fn rotate_ccw(self) -> Self {
        Self::ALL[(self as usize + 3) % 4]
    }

    #[must_use]
    pub const fn rotate_180(self) -> Self {
        Self::ALL[(self as usize + 2) % 4]
    }
}

/// Rotates an offset about the anchor by the given orientation.
///
/// Each step is an exact 90° clockwise turn, so applying `East` four times is
/// the identity.
#[must_use]
pub const fn rotate_offset((x, y): Offset, rotation: Rotation) -> Offset {
    match rotation {
        Rotation::North => (x, y),
        Rotation::East => (y, -x),
        Rotation::South => (-x, -y),
        Rotation::West => (-y, x),
    }
}

const fn offset_rotations(base: [Offset; 4]) -> [[Offset; 4]; 4] {
    let mut rotations = [base; 4];
    let mut r = 0;
    while r < 4 {
        let mut i = 0;
        while i < 4 {
            rotations[r][i] = rotate_offset(base[i], Rotation::ALL[r]);
            i += 1;
        }
        r += 1;
    }
    rotations
}

/// Cell offsets for every piece and rotation, indexed by `[piece][rotation]`.
///
/// Evaluated at compile time from the North offsets of each piece.
pub static ROTATION_TABLE: [[[Offset; 4]; 4]; Piece::LEN] = {
    let mut table = [[[(0, 0); 4]; 4]; Piece::LEN];
    let mut p = 0;
    while p < Piece::LEN {
        table[p] = offset_rotations(Piece::ALL[p].base_offsets());
        p += 1;
    }
    table
};

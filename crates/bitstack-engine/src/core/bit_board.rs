use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{OutOfBoundsError, PieceCollisionError, PlacementError};

use super::piece_location::PieceLocation;

const WIDTH: usize = 10;
const HEIGHT: usize = 64;

/// `BitBoard` for collision detection, drop distances, garbage and line clearing.
///
/// The board is stored column-wise: each of the 10 columns is a `u64` where
/// bit `i` set means row `i` of that column is occupied.
///
/// # Bit Layout
///
/// - Row 0 is the floor (bit 0, LSB)
/// - Row 63 is the ceiling (bit 63, MSB)
/// - Column 0 is the leftmost column
///
/// Anything shifted above row 63 is discarded, so the board height is fixed.
///
/// # Caller Contract
///
/// [`Self::obstructed`], [`Self::put_piece`] and [`Self::distance_to_ground`]
/// do not validate their input. Every block of the location must lie in
/// `[0, 10) × [0, 64)`; out of range input panics or produces meaningless
/// bits. Use [`Self::check_bounds`] or [`Self::try_put_piece`] when the
/// placement is not known to be valid.
///
/// # Example
///
/// ```
/// use bitstack_engine::{BitBoard, Piece, PieceLocation, Rotation};
///
/// let mut board = BitBoard::new();
/// board.add_garbage_with_hole(2, 0);
///
/// // A vertical I-piece fills the hole and completes both garbage rows.
/// let loc = PieceLocation::new(Piece::I, Rotation::East, 0, 10);
/// let landed = board.hard_drop(loc);
/// assert_eq!(landed.blocks(), [(0, 3), (0, 2), (0, 1), (0, 0)]);
///
/// board.put_piece(landed);
/// assert_eq!(board.remove_lines(), 2);
/// assert_eq!(board.column(0), 0b11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard {
    columns: [u64; WIDTH],
}

impl Default for BitBoard {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Serialize for BitBoard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "0000000000000003,0000000000000001,..." (column 0 first)
        let hex_string = self
            .columns
            .iter()
            .map(|column| format!("{column:016x}"))
            .collect::<Vec<_>>()
            .join(",");
        serializer.serialize_str(&hex_string)
    }
}

impl<'de> Deserialize<'de> for BitBoard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != WIDTH {
            return Err(serde::de::Error::custom(format!(
                "expected {} comma-separated hex values, got {}",
                WIDTH,
                parts.len()
            )));
        }

        let mut columns = [0; WIDTH];
        for (x, hex_str) in parts.iter().enumerate() {
            columns[x] = u64::from_str_radix(hex_str, 16).map_err(|e| {
                serde::de::Error::custom(format!("invalid hex at column {x}: {hex_str} ({e})"))
            })?;
        }

        Ok(BitBoard { columns })
    }
}

/// Renders the board as ASCII art, top row first.
///
/// Only rows up to the highest occupied cell are printed (at least one row).
/// `#` is an occupied cell and `.` an empty one; the output can be read back
/// with [`BitBoard::from_ascii`].
impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let height = self.max_height().max(1);
        for y in (0..height).rev() {
            for x in 0..WIDTH {
                f.write_char(if self.is_occupied(x, y) { '#' } else { '.' })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

impl BitBoard {
    pub const WIDTH: usize = WIDTH;
    pub const HEIGHT: usize = HEIGHT;

    pub const EMPTY: Self = Self {
        columns: [0; WIDTH],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    #[must_use]
    pub const fn from_columns(columns: [u64; WIDTH]) -> Self {
        Self { columns }
    }

    /// Returns all columns as bitmasks, bit `i` = row `i`.
    #[must_use]
    pub const fn columns(&self) -> &[u64; WIDTH] {
        &self.columns
    }

    #[must_use]
    pub const fn column(&self, x: usize) -> u64 {
        self.columns[x]
    }

    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        (self.columns[x] >> y) & 1 != 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|&c| c == 0)
    }

    /// Returns, per column, the index of the highest occupied row plus one.
    #[must_use]
    pub fn column_heights(&self) -> [usize; WIDTH] {
        self.columns.map(column_height)
    }

    #[must_use]
    pub fn max_height(&self) -> usize {
        self.columns.iter().copied().map(column_height).max().unwrap_or(0)
    }

    /// Returns a mask of the rows occupied in every column.
    #[must_use]
    pub fn full_rows_mask(&self) -> u64 {
        self.columns.iter().fold(u64::MAX, |acc, &c| acc & c)
    }

    /// Returns the indices of the full rows in ascending order.
    #[must_use]
    pub fn full_rows(&self) -> ArrayVec<usize, HEIGHT> {
        let mut rows = ArrayVec::new();
        let mut mask = self.full_rows_mask();
        while mask != 0 {
            rows.push(mask.trailing_zeros() as usize);
            mask &= mask - 1;
        }
        rows
    }

    /// Checks that every block of the location lies on the board.
    #[expect(clippy::unused_self)]
    pub fn check_bounds(&self, loc: PieceLocation) -> Result<(), OutOfBoundsError> {
        match loc.blocks().into_iter().find(|&(x, y)| !in_bounds(x, y)) {
            Some((x, y)) => Err(OutOfBoundsError { x, y }),
            None => Ok(()),
        }
    }

    /// Checks if any block of the location overlaps an occupied cell.
    #[must_use]
    pub fn obstructed(&self, loc: PieceLocation) -> bool {
        loc.blocks().into_iter().any(|(x, y)| {
            let (x, y) = cell_index(x, y);
            (self.columns[x] >> y) & 1 != 0
        })
    }

    /// Sets the cells covered by the location.
    ///
    /// Cells that are already occupied stay occupied; no collision check is
    /// performed.
    pub fn put_piece(&mut self, loc: PieceLocation) {
        for (x, y) in loc.blocks() {
            let (x, y) = cell_index(x, y);
            self.columns[x] |= 1 << y;
        }
    }

    /// Locks the piece after validating bounds and collision.
    ///
    /// The board is left untouched when an error is returned.
    pub fn try_put_piece(&mut self, loc: PieceLocation) -> Result<(), PlacementError> {
        self.check_bounds(loc)?;
        if self.obstructed(loc) {
            return Err(PieceCollisionError.into());
        }
        self.put_piece(loc);
        Ok(())
    }

    /// Returns how many rows the piece can fall before it lands.
    ///
    /// Each block may fall through the empty cells directly below it, down to
    /// the first occupied cell of its column or the floor. The piece moves
    /// rigidly, so the smallest per-block distance wins.
    #[must_use]
    pub fn distance_to_ground(&self, loc: PieceLocation) -> usize {
        loc.blocks()
            .into_iter()
            .map(|(x, y)| {
                let (x, y) = cell_index(x, y);
                if y == 0 {
                    return 0;
                }
                // Rows y-1, y-2, ... end up at the top; the zeros shifted in
                // below row 0 stop the count at the floor.
                ((!self.columns[x]) << (HEIGHT - y)).leading_ones() as usize
            })
            .min()
            .unwrap_or(0)
    }

    /// Returns the location moved straight down by [`Self::distance_to_ground`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn hard_drop(&self, loc: PieceLocation) -> PieceLocation {
        loc.with_offset(0, -(self.distance_to_ground(loc) as i32))
    }

    /// Pushes `lines` garbage rows with a uniformly random hole.
    ///
    /// Returns the hole column.
    pub fn add_garbage<R>(&mut self, lines: usize, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        let hole = rng.random_range(0..WIDTH);
        self.add_garbage_with_hole(lines, hole);
        hole
    }

    /// Pushes `lines` garbage rows at the bottom of the board.
    ///
    /// Every column is shifted up by `lines` rows. The vacated rows are filled
    /// in every column except `hole`, which stays empty. Rows pushed above the
    /// ceiling are lost.
    ///
    /// # Panics
    ///
    /// Panics if `hole` is not a valid column.
    pub fn add_garbage_with_hole(&mut self, lines: usize, hole: usize) {
        assert!(hole < WIDTH, "hole column {hole} is outside of the board");
        for (x, column) in self.columns.iter_mut().enumerate() {
            *column = if x == hole {
                shift_up(*column, lines)
            } else {
                !shift_up(!*column, lines)
            };
        }
    }

    /// Clears full rows and returns the number of rows cleared.
    ///
    /// Rows above each cleared row drop down by one; rows below are kept as
    /// they are. The same rows are removed from every column.
    pub fn remove_lines(&mut self) -> usize {
        let full = self.full_rows_mask();
        if full == 0 {
            return 0;
        }
        for column in &mut self.columns {
            *column = collapse_rows(*column, full);
        }
        full.count_ones() as usize
    }

    /// Creates a `BitBoard` from ASCII art representation.
    ///
    /// `#` is an occupied cell, `.` an empty one. Each row must have exactly 10
    /// cells. Rows are written from top to bottom; the last row is row 0.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= HEIGHT,
            "At most {HEIGHT} rows are allowed, got {}",
            lines.len()
        );

        for (y, line) in lines.iter().rev().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                WIDTH,
                "Each row must have exactly {} cells, got {} at row {}",
                WIDTH,
                chars.len(),
                y
            );

            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.columns[x] |= 1 << y;
                }
            }
        }
        board
    }
}

fn in_bounds(x: i32, y: i32) -> bool {
    usize::try_from(x).is_ok_and(|x| x < WIDTH) && usize::try_from(y).is_ok_and(|y| y < HEIGHT)
}

#[inline]
#[expect(clippy::cast_sign_loss)]
fn cell_index(x: i32, y: i32) -> (usize, usize) {
    debug_assert!(in_bounds(x, y), "block ({x}, {y}) is outside of the board");
    (x as usize, y as usize)
}

fn column_height(column: u64) -> usize {
    HEIGHT - column.leading_zeros() as usize
}

fn shift_up(column: u64, lines: usize) -> u64 {
    u32::try_from(lines)
        .ok()
        .and_then(|lines| column.checked_shl(lines))
        .unwrap_or(0)
}

/// Removes the rows set in `rows` from `column`, lowest first.
///
/// After each removal the remaining row indices move down by one, matching the
/// collapsed column.
const fn collapse_rows(mut column: u64, mut rows: u64) -> u64 {
    while rows != 0 {
        let y = rows.trailing_zeros();
        let below: u64 = (1 << y) - 1;
        column = (column & below) | ((column >> 1) & !below);
        rows &= !(1u64 << y);
        rows >>= 1;
    }
    column
}

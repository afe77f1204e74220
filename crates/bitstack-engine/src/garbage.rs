//! Seeded garbage hole generation.
//!
//! [`BitBoard::add_garbage`] accepts any [`rand::Rng`]. [`GarbageGenerator`]
//! bundles a seeded `Pcg32` so that a sequence of garbage holes can be
//! reproduced from a [`GarbageSeed`], for example when replaying a recorded
//! game or comparing search results.

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::BitBoard;

/// Seed for deterministic garbage generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator that picks hole columns. The same seed always yields the same
/// sequence of holes.
///
/// # Example
///
/// ```
/// use bitstack_engine::{GarbageGenerator, GarbageSeed};
/// use rand::Rng as _;
///
/// let seed: GarbageSeed = rand::rng().random();
///
/// let mut generator1 = GarbageGenerator::with_seed(seed);
/// let mut generator2 = GarbageGenerator::with_seed(seed);
/// assert_eq!(generator1.next_hole(), generator2.next_hole());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GarbageSeed([u8; 16]);

impl Serialize for GarbageSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        serializer.serialize_str(&format!("{num:032x}"))
    }
}

impl<'de> Deserialize<'de> for GarbageSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<GarbageSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GarbageSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GarbageSeed(seed)
    }
}

impl From<[u8; 16]> for GarbageSeed {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

/// Picks garbage hole columns uniformly in `[0, 10)`.
///
/// A new hole is drawn for every call; the hole is never fixed per board.
///
/// # Example
///
/// ```
/// use bitstack_engine::{BitBoard, GarbageGenerator};
///
/// let mut generator = GarbageGenerator::new();
/// let mut board = BitBoard::new();
///
/// let hole = generator.add_garbage(&mut board, 2);
/// assert_eq!(board.column(hole), 0);
/// assert_eq!(board.remove_lines(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GarbageGenerator {
    rng: Pcg32,
}

impl Default for GarbageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GarbageGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For reproducible holes, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(seed: GarbageSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next hole column.
    pub fn next_hole(&mut self) -> usize {
        self.rng.random_range(0..BitBoard::WIDTH)
    }

    /// Pushes `lines` garbage rows onto `board` and returns the hole column.
    pub fn add_garbage(&mut self, board: &mut BitBoard, lines: usize) -> usize {
        board.add_garbage(lines, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> GarbageSeed {
        GarbageSeed::from(bytes)
    }

    #[test]
    fn test_roundtrip_random_seed() {
        let seed: GarbageSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: GarbageSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn test_known_value_sequential_bytes() {
        // Big-endian: bytes appear in order as hex pairs
        let seed = seed_from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let upper: GarbageSeed =
            serde_json::from_str("\"0123456789ABCDEFFEDCBA9876543210\"").unwrap();
        assert_eq!(upper, seed);
    }

    #[test]
    fn test_seed_error_cases() {
        for json in [
            "\"\"",
            "\"0123456789abcdef0123456789abcde\"",
            "\"0123456789abcdef0123456789abcdef0\"",
            "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
        ] {
            let err = serde_json::from_str::<GarbageSeed>(json).unwrap_err();
            assert!(err.to_string().contains("invalid hex"), "{json}: {err}");
        }
    }

    #[test]
    fn test_deterministic_holes() {
        let seed = seed_from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);

        let mut generator1 = GarbageGenerator::with_seed(seed);
        let mut generator2 = GarbageGenerator::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(generator1.next_hole(), generator2.next_hole());
        }
    }

    #[test]
    fn test_holes_cover_all_columns() {
        let mut generator = GarbageGenerator::with_seed(seed_from_bytes([7; 16]));
        let mut seen = [false; BitBoard::WIDTH];
        for _ in 0..1000 {
            seen[generator.next_hole()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_add_garbage_rechooses_hole() {
        let seed = seed_from_bytes([3; 16]);
        let mut generator = GarbageGenerator::with_seed(seed);
        let mut board = BitBoard::new();

        let holes: Vec<usize> = (0..30)
            .map(|_| generator.add_garbage(&mut board, 1))
            .collect();

        // Holes come from the same stream as `next_hole`.
        let mut replay = GarbageGenerator::with_seed(seed);
        let expected: Vec<usize> = (0..30).map(|_| replay.next_hole()).collect();
        assert_eq!(holes, expected);

        // Row i (from the bottom) was pushed by the (30 - i)th call.
        for (i, &hole) in holes.iter().rev().enumerate() {
            for x in 0..BitBoard::WIDTH {
                assert_eq!(board.is_occupied(x, i), x != hole, "row {i}, column {x}");
            }
        }
        assert_eq!(board.max_height(), 30);
    }
}

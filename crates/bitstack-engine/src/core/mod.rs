pub use self::{bit_board::*, piece::*, piece_location::*};

pub(crate) mod bit_board;
pub(crate) mod piece;
pub(crate) mod piece_location;

//! Board game primitives shared by the server and its clients.
//!
//! Nothing in here performs I/O: boards are generated from a caller supplied
//! random source and movement is a pure function of position and step count.

pub mod board;
pub mod position;
pub mod spiral;

pub use board::{Board, TileKind, BOARD_SIZE};
pub use position::Position;
pub use spiral::advance;

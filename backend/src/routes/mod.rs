mod imports;

pub mod health_check;
pub mod lobby;
pub mod lobby_ws;
pub mod questions;

pub use health_check::health_check;

pub mod client;
pub mod lobbies;
pub mod lobby;

mod health_check;
mod helpers;
mod lobby_api;
mod lobby_ws;

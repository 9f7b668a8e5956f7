pub mod conf;
pub mod error;
pub mod mp;
pub mod questions;
pub mod startup;
pub mod telemetry;

mod routes;

pub mod application;
pub mod config;
pub mod error;
pub mod telemetry;

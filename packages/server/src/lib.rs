//! Core library for the Deskmarket API server.
//!
//! Hosts list offices, visitors browse and reserve them, admins approve
//! listings. The HTTP surface is a small REST API; all persistence goes
//! through Postgres via sqlx.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::Config;

//! Compound catalog web server library.
//!
//! Exposes the server internals for integration testing.
//! The main entry point for running the server is the `chemdb` binary.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod theme;

pub use config::{Config, StoreConfig};
pub use state::AppState;

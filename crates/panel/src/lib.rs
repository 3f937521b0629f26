//! `zonectl-panel` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod app;
pub mod commands;
pub mod config;
pub mod terminal;

//! Shared types for the zone irrigation job-control panel.
//!
//! Everything in this crate is free of I/O: status payload decoding,
//! the panel state machine, and the pure button/progress rendering that
//! the client crate pushes into a view.

pub mod display;
pub mod error;
pub mod state;
pub mod status;
pub mod telemetry;

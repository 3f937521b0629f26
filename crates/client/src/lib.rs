//! Job-control client for the zone irrigation controller.
//!
//! Provides the HTTP API wrapper, the [`view::PanelView`] seam the panel
//! renders into, the [`controller::PanelController`] that ties status
//! polling and start/stop clicks to the view, and the cancellable
//! [`poller`] task.

pub mod api;
pub mod controller;
pub mod poller;
pub mod view;

//! patchdeck library crate
//!
//! Exposes the viewer state, diff renderer and backend client so benchmarks
//! can exercise them without going through CLI startup.

pub mod accept;
pub mod api;
pub mod app;
pub mod config;
pub mod diff;
pub mod logging;
pub mod store;
pub mod ui;
pub mod util;

#[cfg(test)]
mod testing;

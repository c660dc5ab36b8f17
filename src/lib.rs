//! SciVal topic cluster dashboard library crate.
//!
//! Holds everything that does not draw: loading, filtering, derived views,
//! export, colour scale, and dashboard state. The egui front end lives in
//! the binary (`main.rs`, `app.rs`, `ui/`).

pub mod color;
pub mod config;
pub mod data;
pub mod state;

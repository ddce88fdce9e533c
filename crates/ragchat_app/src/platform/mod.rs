//! Terminal platform layer: wires the pure core to stdin, stdout and the engine.
mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;

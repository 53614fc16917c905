//! Process setup for the collector binary: environment, logging, exit codes.
mod app;
mod config;
mod logging;

pub use app::run;

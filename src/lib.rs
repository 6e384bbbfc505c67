// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod collect;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod fetch;
pub mod gui;
pub mod log;
pub mod preprocess;
pub mod progress;
pub mod runner;
pub mod schema;
pub mod store;

pub use error::PipelineError;

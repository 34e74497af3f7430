//! Vidmark Core Library
//!
//! Configuration and logging shared by the `vidmark` binary.

pub mod colored_logger;
pub mod config;

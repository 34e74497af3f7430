//! vidmark-processing - FFmpeg overlay invocation
//!
//! Builds the filter graph and argument vector for a logo or text overlay,
//! runs the tool to completion and reports its captured output.

pub mod command;
pub mod error;
pub mod filter;
pub mod runner;

pub use command::OverlayCommand;
pub use error::{ProcessingError, Result};
pub use filter::{filter_graph, OverlaySource, Placement};
pub use runner::{check_tool, run, ToolOutput};

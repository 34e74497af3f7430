//! HTTP route handlers

pub mod health;
pub mod overlay;

pub use health::*;
pub use overlay::*;

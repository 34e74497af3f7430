//! Vidmark web service - logo and text overlay over HTTP

pub mod error;
pub mod form;
pub mod routes;
pub mod server;
pub mod state;
pub mod workspace;

pub use error::ApiError;
pub use server::{router, serve, ServerSettings};
pub use state::AppState;
pub use workspace::{RequestWorkspace, ScratchRoot};

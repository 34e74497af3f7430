//! Shared application state

use crate::workspace::ScratchRoot;
use std::path::PathBuf;
use std::sync::Arc;

/// Read-only state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Root under which request workspaces are allocated
    pub scratch: Arc<ScratchRoot>,

    /// FFmpeg executable
    pub ffmpeg: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(scratch: ScratchRoot, ffmpeg: PathBuf) -> Self {
        Self {
            scratch: Arc::new(scratch),
            ffmpeg,
        }
    }
}

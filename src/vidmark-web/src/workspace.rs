//! Per-request scratch directories
//!
//! Every request gets `<root>/<uuid>/`. Directories are kept after the
//! response is sent so inputs and outputs can be inspected; the whole root
//! is only removed by [`ScratchRoot::purge`] on orderly shutdown.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Container extension used when the upload name has none
pub const DEFAULT_EXTENSION: &str = "mp4";

/// Fixed directory under which request workspaces are created
#[derive(Debug)]
pub struct ScratchRoot {
    root: PathBuf,
}

impl ScratchRoot {
    /// Create the root directory. Called once at startup.
    pub fn init(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        info!("scratch root: {:?}", root);
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create a fresh, uniquely named directory for one request
    pub async fn allocate(&self) -> io::Result<RequestWorkspace> {
        let id = Uuid::new_v4();
        let dir = self.root.join(id.to_string());
        tokio::fs::create_dir(&dir).await?;
        Ok(RequestWorkspace { id, dir })
    }

    /// Remove the root and everything under it
    pub fn purge(&self) -> io::Result<()> {
        match std::fs::remove_dir_all(&self.root) {
            Ok(()) => {
                info!("removed scratch root {:?}", self.root);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("failed to remove scratch root {:?}: {}", self.root, e);
                Err(e)
            }
        }
    }
}

/// Scratch directory owned by a single request
#[derive(Debug)]
pub struct RequestWorkspace {
    id: Uuid,
    dir: PathBuf,
}

impl RequestWorkspace {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn input_path(&self, ext: &str) -> PathBuf {
        self.dir.join(format!("input.{ext}"))
    }

    /// Logos are always staged as PNG regardless of the declared type
    pub fn logo_path(&self) -> PathBuf {
        self.dir.join("logo.png")
    }

    pub fn output_path(&self, ext: &str) -> PathBuf {
        self.dir.join(format!("output.{ext}"))
    }

    /// Write `data` into the workspace, returning the staged path
    pub async fn stage(&self, path: PathBuf, data: &[u8]) -> io::Result<PathBuf> {
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }
}

/// Extension of the uploaded file name, without the dot
pub fn video_extension(filename: &str) -> &str {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_extension() {
        assert_eq!(video_extension("clip.mov"), "mov");
        assert_eq!(video_extension("archive.tar.mkv"), "mkv");
        assert_eq!(video_extension("noext"), "mp4");
        assert_eq!(video_extension(".hidden"), "mp4");
        assert_eq!(video_extension(""), "mp4");
    }

    #[tokio::test]
    async fn test_allocate_creates_distinct_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let root = ScratchRoot::init(tmp.path().join("scratch")).unwrap();

        let a = root.allocate().await.unwrap();
        let b = root.allocate().await.unwrap();

        assert_ne!(a.id(), b.id());
        assert_ne!(a.dir(), b.dir());
        assert!(a.dir().is_dir());
        assert!(a.dir().starts_with(root.path()));
        assert_eq!(a.input_path("mov").file_name().unwrap(), "input.mov");
        assert_eq!(a.output_path("mov").file_name().unwrap(), "output.mov");
        assert_eq!(a.logo_path().file_name().unwrap(), "logo.png");
    }

    #[tokio::test]
    async fn test_purge_removes_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let root = ScratchRoot::init(tmp.path().join("scratch")).unwrap();
        let ws = root.allocate().await.unwrap();
        ws.stage(ws.input_path("mp4"), b"abc").await.unwrap();

        root.purge().unwrap();
        assert!(!root.path().exists());

        // second purge is a no-op
        root.purge().unwrap();
    }
}

//! Run FFmpeg to completion and capture its output

use crate::command::OverlayCommand;
use crate::error::{ProcessingError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info};

/// Captured result of a finished tool process
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Spawn the overlay command directly (no shell) and wait for it.
///
/// There is no timeout: the caller's task is suspended until FFmpeg exits.
/// A zero exit is only a success if the output file exists afterwards.
pub async fn run(cmd: &OverlayCommand) -> Result<ToolOutput> {
    let program = cmd.program.to_string_lossy().into_owned();

    let output = Command::new(&cmd.program)
        .args(cmd.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| {
            error!("failed to spawn {}: {}", program, source);
            ProcessingError::Spawn { program, source }
        })?;

    let result = ToolOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    info!("ffmpeg return code: {:?}", result.code);
    if !result.stdout.is_empty() {
        debug!("ffmpeg stdout: {}", result.stdout);
    }
    if !result.stderr.is_empty() {
        info!("ffmpeg stderr: {}", result.stderr);
    }

    if !output.status.success() {
        error!("ffmpeg failed with code {:?}", result.code);
        return Err(ProcessingError::ToolFailed {
            code: result.code,
            stderr: result.stderr,
        });
    }

    if !tokio::fs::try_exists(cmd.output()).await.unwrap_or(false) {
        error!("output file was not created: {:?}", cmd.output());
        return Err(ProcessingError::OutputMissing(cmd.output().to_path_buf()));
    }

    Ok(result)
}

/// Check if the tool can be executed
pub fn check_tool(program: &Path) -> bool {
    std::process::Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::filter::{OverlaySource, Placement};
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn fake_tool(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-ffmpeg");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn text_command(program: PathBuf, dir: &Path) -> OverlayCommand {
        OverlayCommand {
            program,
            video: dir.join("input.mp4"),
            source: OverlaySource::Text {
                text: "Hello".to_string(),
                font_size: 24,
                font_color: "white".to_string(),
            },
            placement: Placement { x: 5, y: 5 },
            output: dir.join("output.mp4"),
        }
    }

    #[tokio::test]
    async fn test_success_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), r#"for last; do :; done; printf data > "$last""#);

        let out = run(&text_command(tool, dir.path())).await.unwrap();
        assert_eq!(out.code, Some(0));
        assert!(dir.path().join("output.mp4").exists());
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "echo 'No such filter: drawtext' >&2; exit 1");

        match run(&text_command(tool, dir.path())).await {
            Err(ProcessingError::ToolFailed { code, stderr }) => {
                assert_eq!(code, Some(1));
                assert!(stderr.contains("No such filter: drawtext"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_exit_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "exit 0");

        let err = run(&text_command(tool, dir.path())).await.unwrap_err();
        assert!(matches!(err, ProcessingError::OutputMissing(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = text_command(dir.path().join("does-not-exist"), dir.path());

        let err = run(&cmd).await.unwrap_err();
        assert!(matches!(err, ProcessingError::Spawn { .. }));
    }

    #[test]
    fn test_check_tool() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_tool(&fake_tool(dir.path(), "exit 0")));
        assert!(!check_tool(&dir.path().join("nope")));
    }
}

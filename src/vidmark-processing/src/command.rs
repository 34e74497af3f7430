//! FFmpeg argument vector for an overlay run

use crate::filter::{filter_graph, OverlaySource, Placement};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Audio is always re-encoded so the output carries no source metadata
pub const AUDIO_CODEC: &str = "aac";
pub const AUDIO_BITRATE: &str = "192k";

/// A fully specified overlay invocation
#[derive(Debug, Clone)]
pub struct OverlayCommand {
    /// FFmpeg executable (name on PATH or absolute path)
    pub program: PathBuf,
    pub video: PathBuf,
    pub source: OverlaySource,
    pub placement: Placement,
    pub output: PathBuf,
}

impl OverlayCommand {
    /// Filter expression passed to `-filter_complex` or `-vf`
    pub fn filter(&self) -> String {
        filter_graph(&self.source, self.placement)
    }

    /// Arguments in invocation order, program excluded
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), self.video.clone().into()];

        match &self.source {
            OverlaySource::Image { logo, .. } => {
                args.push("-i".into());
                args.push(logo.clone().into());
                args.push("-filter_complex".into());
            }
            OverlaySource::Text { .. } => args.push("-vf".into()),
        }
        args.push(self.filter().into());

        for flag in [
            "-map_metadata", "-1",
            "-fflags", "+bitexact",
            "-flags:v", "+bitexact",
            "-flags:a", "+bitexact",
            "-c:a", AUDIO_CODEC,
            "-b:a", AUDIO_BITRATE,
        ] {
            args.push(flag.into());
        }

        args.push(self.output.clone().into());
        args
    }

    /// Human-readable command line for logs; never handed to a shell
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str().to_os_string())
            .chain(self.args())
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cmd: &OverlayCommand) -> Vec<String> {
        cmd.args()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_image_args() {
        let cmd = OverlayCommand {
            program: PathBuf::from("ffmpeg"),
            video: PathBuf::from("/w/input.mov"),
            source: OverlaySource::Image {
                logo: PathBuf::from("/w/logo.png"),
                width: 100,
            },
            placement: Placement { x: 10, y: 20 },
            output: PathBuf::from("/w/output.mov"),
        };

        assert_eq!(
            strings(&cmd),
            vec![
                "-y", "-i", "/w/input.mov", "-i", "/w/logo.png",
                "-filter_complex", "[1:v]scale=100:-1[logo];[0:v][logo]overlay=10:20",
                "-map_metadata", "-1",
                "-fflags", "+bitexact", "-flags:v", "+bitexact", "-flags:a", "+bitexact",
                "-c:a", "aac", "-b:a", "192k",
                "/w/output.mov",
            ]
        );
    }

    #[test]
    fn test_text_args_use_single_input() {
        let cmd = OverlayCommand {
            program: PathBuf::from("ffmpeg"),
            video: PathBuf::from("/w/input.mp4"),
            source: OverlaySource::Text {
                text: "Hello".to_string(),
                font_size: 24,
                font_color: "red".to_string(),
            },
            placement: Placement { x: 5, y: 5 },
            output: PathBuf::from("/w/output.mp4"),
        };

        let args = strings(&cmd);
        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 1);
        let vf = args.iter().position(|a| a == "-vf").unwrap();
        assert_eq!(args[vf + 1], "drawtext=text='Hello':x=5:y=5:fontsize=24:fontcolor=red");
        assert_eq!(args.last().unwrap(), "/w/output.mp4");
    }

    #[test]
    fn test_command_line_starts_with_program() {
        let cmd = OverlayCommand {
            program: PathBuf::from("/opt/ffmpeg"),
            video: PathBuf::from("in.mp4"),
            source: OverlaySource::Text {
                text: "hi".to_string(),
                font_size: 10,
                font_color: "white".to_string(),
            },
            placement: Placement { x: 0, y: 0 },
            output: PathBuf::from("out.mp4"),
        };

        let line = cmd.command_line();
        assert!(line.starts_with("/opt/ffmpeg -y -i in.mp4 -vf"));
        assert!(line.ends_with("-b:a 192k out.mp4"));
    }
}

//! FFmpeg filter expressions for the two overlay kinds
//!
//! Position and size values are written into the expression untouched:
//! negative or out-of-frame offsets are left for FFmpeg to interpret.

use std::path::PathBuf;

/// What gets drawn on top of the video
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlaySource {
    /// Staged image fed as the second input (`[1:v]`), scaled to `width`
    /// pixels with the height keeping its aspect ratio
    Image { logo: PathBuf, width: i64 },

    /// `drawtext` with inline parameters
    Text {
        text: String,
        font_size: i64,
        font_color: String,
    },
}

impl OverlaySource {
    pub fn is_image(&self) -> bool {
        matches!(self, OverlaySource::Image { .. })
    }
}

/// Pixel offset of the overlay's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
}

/// Build the filter expression for an overlay.
///
/// Images produce a `-filter_complex` graph over inputs 0 and 1; text
/// produces a single `-vf` filter. Text is interpolated verbatim, so a
/// value containing `'` or `:` changes the meaning of the expression.
pub fn filter_graph(source: &OverlaySource, placement: Placement) -> String {
    let Placement { x, y } = placement;
    match source {
        OverlaySource::Image { width, .. } => {
            format!("[1:v]scale={width}:-1[logo];[0:v][logo]overlay={x}:{y}")
        }
        OverlaySource::Text {
            text,
            font_size,
            font_color,
        } => format!(
            "drawtext=text='{text}':x={x}:y={y}:fontsize={font_size}:fontcolor={font_color}"
        ),
    }
}

//! Multipart form binding for `POST /overlay`

use crate::ApiError;
use axum::extract::Multipart;
use bytes::Bytes;

/// Name used when the video part carries no filename
const FALLBACK_VIDEO_NAME: &str = "video.mp4";

const DEFAULT_FONT_COLOR: &str = "white";

/// An uploaded file held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

/// Raw overlay request, fully read before anything touches the disk
#[derive(Debug, Clone)]
pub struct OverlayForm {
    pub video: Upload,
    pub logo: Option<Upload>,
    pub text: Option<String>,
    pub x: i64,
    pub y: i64,
    pub size: i64,
    pub font_color: String,
}

/// The validated overlay choice
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayInput<'a> {
    Logo(&'a Upload),
    Text(&'a str),
}

impl OverlayForm {
    /// Read every part of the request body
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut video = None;
        let mut logo = None;
        let mut text = None;
        let mut x = None;
        let mut y = None;
        let mut size = None;
        let mut font_color = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "video" | "logo" => {
                    let filename = field.file_name().map(str::to_string);
                    let data = field.bytes().await?;
                    if name == "video" {
                        video = Some(Upload {
                            filename: filename
                                .filter(|f| !f.is_empty())
                                .unwrap_or_else(|| FALLBACK_VIDEO_NAME.to_string()),
                            data,
                        });
                    } else {
                        logo = Some(Upload {
                            filename: filename.unwrap_or_default(),
                            data,
                        });
                    }
                }
                "text" => text = Some(field.text().await?),
                "x" => x = Some(field.text().await?),
                "y" => y = Some(field.text().await?),
                "size" => size = Some(field.text().await?),
                "font_color" => font_color = Some(field.text().await?),
                _ => {}
            }
        }

        Ok(Self {
            video: video.ok_or_else(|| missing("video"))?,
            logo,
            text: text.filter(|t| !t.is_empty()),
            x: parse_int("x", x)?,
            y: parse_int("y", y)?,
            size: parse_int("size", size)?,
            font_color: font_color.unwrap_or_else(|| DEFAULT_FONT_COLOR.to_string()),
        })
    }

    /// Exactly one of logo and text must be present
    pub fn validate(&self) -> Result<OverlayInput<'_>, ApiError> {
        match (&self.logo, &self.text) {
            (None, None) => Err(ApiError::neither_provided()),
            (Some(_), Some(_)) => Err(ApiError::both_provided()),
            (Some(logo), None) => Ok(OverlayInput::Logo(logo)),
            (None, Some(text)) => Ok(OverlayInput::Text(text)),
        }
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::BadRequest(format!("missing field `{field}`"))
}

fn parse_int(field: &str, value: Option<String>) -> Result<i64, ApiError> {
    let value = value.ok_or_else(|| missing(field))?;
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("field `{field}` must be an integer, got {value:?}")))
}

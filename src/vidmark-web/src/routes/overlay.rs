//! Logo and text overlay endpoint

use crate::form::{OverlayForm, OverlayInput};
use crate::workspace::video_extension;
use crate::{ApiError, AppState};
use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, info};
use vidmark_processing::{runner, OverlayCommand, OverlaySource, Placement};

/// Media type of every processed video, whatever the container
const OUTPUT_MEDIA_TYPE: &str = "video/mp4";

/// POST /overlay - Overlay a logo or text on an uploaded video
pub async fn overlay_video(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = OverlayForm::from_multipart(multipart).await?;

    match process(&state, &form).await {
        Ok(response) => Ok(response),
        Err(err) => {
            if let ApiError::Unexpected(msg) = &err {
                error!("unexpected error: {}", msg);
            }
            Err(err)
        }
    }
}

async fn process(state: &AppState, form: &OverlayForm) -> Result<Response, ApiError> {
    info!("new overlay request received");
    info!("video filename: {}", form.video.filename);
    info!("logo provided: {}", form.logo.is_some());
    info!("text provided: {:?}", form.text);
    info!("position: x={}, y={}", form.x, form.y);
    info!("size: {}", form.size);
    info!("font color: {}", form.font_color);

    let input = form.validate().map_err(|e| {
        error!("{}", e);
        e
    })?;

    let workspace = state.scratch.allocate().await?;
    info!("request id: {}", workspace.id());
    info!("working directory: {:?}", workspace.dir());

    let ext = video_extension(&form.video.filename);
    let video_path = workspace
        .stage(workspace.input_path(ext), &form.video.data)
        .await?;
    info!("video saved: {:?} ({} bytes)", video_path, form.video.data.len());

    let output_path = workspace.output_path(ext);

    let source = match input {
        OverlayInput::Logo(upload) => {
            let logo_path = workspace.stage(workspace.logo_path(), &upload.data).await?;
            info!("logo saved: {:?} ({} bytes)", logo_path, upload.data.len());

            if upload.data.is_empty() {
                error!("logo file is empty");
                return Err(ApiError::EmptyAsset);
            }
            OverlaySource::Image {
                logo: logo_path,
                width: form.size,
            }
        }
        OverlayInput::Text(text) => OverlaySource::Text {
            text: text.to_string(),
            font_size: form.size,
            font_color: form.font_color.clone(),
        },
    };

    let cmd = OverlayCommand {
        program: state.ffmpeg.clone(),
        video: video_path,
        source,
        placement: Placement { x: form.x, y: form.y },
        output: output_path,
    };

    if cmd.source.is_image() {
        info!("filter complex: {}", cmd.filter());
    } else {
        info!("video filter: {}", cmd.filter());
    }
    info!("ffmpeg command: {}", cmd.command_line());

    runner::run(&cmd).await?;

    let file = tokio::fs::File::open(cmd.output()).await?;
    let file_size = file.metadata().await?.len();
    info!("output video created: {:?} ({} bytes)", cmd.output(), file_size);

    let body = Body::from_stream(tokio_util::io::ReaderStream::new(file));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, OUTPUT_MEDIA_TYPE.to_string()),
            (header::CONTENT_LENGTH, file_size.to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment(&format!("processed_{}", form.video.filename)),
            ),
        ],
        body,
    )
        .into_response())
}

/// `Content-Disposition` value, percent-encoded when the name is not plain ASCII
fn attachment(filename: &str) -> String {
    let encoded = urlencoding::encode(filename);
    if encoded == filename {
        format!("attachment; filename=\"{filename}\"")
    } else {
        format!("attachment; filename*=utf-8''{encoded}")
    }
}

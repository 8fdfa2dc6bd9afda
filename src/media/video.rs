// SPDX-License-Identifier: MPL-2.0
//! Single-frame extraction from video files via FFmpeg.

use crate::error::{Result, VideoError};
use image_rs::DynamicImage;
use std::path::Path;
use std::sync::OnceLock;

/// One-shot FFmpeg initialization outcome, kept so a failure stays visible
/// to every later caller.
static FFMPEG_INIT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Initialize FFmpeg with a quiet log level.
///
/// Safe to call multiple times; initialization happens once and its outcome
/// is sticky. The log level is raised to ERROR to suppress container
/// warnings on odd files.
pub fn init_ffmpeg() -> Result<()> {
    let outcome = FFMPEG_INIT.get_or_init(|| {
        ffmpeg_next::init().map_err(|e| format!("FFmpeg initialization failed: {e}"))?;

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
        Ok(())
    });

    outcome
        .clone()
        .map_err(|msg| VideoError::DecodingFailed(msg).into())
}

/// Extracts one frame at `offset_ms` from the start of a video file.
///
/// The demuxer seeks to the nearest keyframe before the offset and the first
/// decodable frame from there is returned as an RGB image. A file from which
/// no frame can be decoded at that position is treated as unsupported.
pub fn extract_frame_at(path: &Path, offset_ms: i64) -> Result<DynamicImage> {
    init_ffmpeg()?;

    let mut ictx = ffmpeg_next::format::input(&path)
        .map_err(|e| VideoError::IoError(format!("Failed to open video file: {e}")))?;

    let input = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or(VideoError::NoVideoStream)?;
    let video_stream_index = input.index();

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| VideoError::DecodingFailed(format!("Failed to create codec context: {e}")))?;
    let mut decoder = context_decoder
        .decoder()
        .video()
        .map_err(|e| VideoError::DecodingFailed(format!("Failed to create video decoder: {e}")))?;

    let width = decoder.width();
    let height = decoder.height();
    if width == 0 || height == 0 {
        return Err(VideoError::DecodingFailed(format!(
            "Invalid video dimensions: {width}x{height}"
        ))
        .into());
    }

    // Seek to the sampling offset (AV_TIME_BASE units). A failed seek is not
    // fatal: short clips fall back to decoding from the start.
    let target_ts = offset_ms * i64::from(ffmpeg_next::ffi::AV_TIME_BASE) / 1000;
    let _ = ictx.seek(target_ts, ..target_ts);

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        width,
        height,
        ffmpeg_next::format::Pixel::RGB24,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| VideoError::DecodingFailed(format!("Failed to create scaler: {e}")))?;

    let mut rgb_frame = ffmpeg_next::frame::Video::empty();
    let mut got_frame = false;

    for (stream, packet) in ictx.packets() {
        if stream.index() != video_stream_index {
            continue;
        }
        if decoder.send_packet(&packet).is_err() {
            continue;
        }

        let mut decoded = ffmpeg_next::frame::Video::empty();
        if decoder.receive_frame(&mut decoded).is_ok() {
            scaler
                .run(&decoded, &mut rgb_frame)
                .map_err(|e| VideoError::DecodingFailed(format!("Failed to scale frame: {e}")))?;
            got_frame = true;
            break;
        }
    }

    if !got_frame {
        return Err(VideoError::NoFrameAtOffset.into());
    }

    frame_to_image(&rgb_frame, width, height)
}

/// Copies an RGB24 frame into an `image` buffer, honoring the row stride.
fn frame_to_image(frame: &ffmpeg_next::frame::Video, width: u32, height: u32) -> Result<DynamicImage> {
    let stride = frame.stride(0);
    let data = frame.data(0);
    let row_len = width as usize * 3;

    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for y in 0..height as usize {
        let start = y * stride;
        pixels.extend_from_slice(&data[start..start + row_len]);
    }

    let rgb = image_rs::RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| VideoError::DecodingFailed("Frame buffer size mismatch".to_string()))?;

    Ok(DynamicImage::ImageRgb8(rgb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn init_ffmpeg_outcome_is_stable_across_calls() {
        let first = init_ffmpeg().is_ok();
        let second = init_ffmpeg().is_ok();
        assert_eq!(first, second);
        assert!(first, "FFmpeg failed to initialize");
    }

    #[test]
    fn missing_file_maps_to_io_error() {
        let err = extract_frame_at(&PathBuf::from("/nonexistent/clip.mp4"), 1000).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Video(VideoError::IoError(_))
        ));
    }

    #[test]
    fn garbage_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("garbage.mp4");
        std::fs::write(&path, b"definitely not an mp4").expect("write");
        assert!(extract_frame_at(&path, 1000).is_err());
    }
}

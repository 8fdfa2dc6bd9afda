// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Application-level errors surfaced to the user or the log.
#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    /// A still image could not be decoded.
    Image(String),
    /// A video frame could not be extracted.
    Video(VideoError),
    /// The classification backend failed to initialize or predict.
    Model(String),
    /// The encyclopedia lookup failed (logged only, never shown as an error).
    Lookup(String),
    /// The selected file has an extension outside the supported sets.
    UnsupportedFile(String),
}

impl Error {
    /// Returns the Fluent message key used to render this error in the UI.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Image(_) => "error-unreadable-image",
            Error::Video(e) => e.i18n_key(),
            Error::Model(_) => "error-model",
            Error::Lookup(_) => "error-lookup",
            Error::UnsupportedFile(_) => "error-unsupported-file",
        }
    }
}

/// Specific failure modes when sampling a frame from a video file.
#[derive(Debug, Clone)]
pub enum VideoError {
    /// File exists but contains no video stream.
    NoVideoStream,

    /// No frame could be decoded at the sampling offset.
    NoFrameAtOffset,

    /// Decoder or demuxer failure.
    DecodingFailed(String),

    /// I/O error (file not found, permission denied, etc.).
    IoError(String),
}

impl VideoError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            VideoError::NoVideoStream => "error-video-no-stream",
            VideoError::NoFrameAtOffset => "error-video-no-frame",
            VideoError::DecodingFailed(_) => "error-video-decoding",
            VideoError::IoError(_) => "error-io",
        }
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::NoVideoStream => write!(f, "No video stream found"),
            VideoError::NoFrameAtOffset => write!(f, "No frame decodable at sampling offset"),
            VideoError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            VideoError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Video(e) => write!(f, "Video Error: {}", e),
            Error::Model(e) => write!(f, "Model Error: {}", e),
            Error::Lookup(e) => write!(f, "Lookup Error: {}", e),
            Error::UnsupportedFile(ext) => write!(f, "Unsupported file type: {}", ext),
        }
    }
}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn unsupported_file_carries_extension() {
        let err = Error::UnsupportedFile(".txt".into());
        assert_eq!(format!("{}", err), "Unsupported file type: .txt");
        assert_eq!(err.i18n_key(), "error-unsupported-file");
    }

    #[test]
    fn video_error_i18n_keys() {
        assert_eq!(VideoError::NoVideoStream.i18n_key(), "error-video-no-stream");
        assert_eq!(VideoError::NoFrameAtOffset.i18n_key(), "error-video-no-frame");
        assert_eq!(
            Error::Video(VideoError::NoFrameAtOffset).i18n_key(),
            "error-video-no-frame"
        );
    }

    #[test]
    fn video_error_display() {
        let err = VideoError::DecodingFailed("bad packet".to_string());
        assert!(format!("{}", err).contains("bad packet"));
    }
}

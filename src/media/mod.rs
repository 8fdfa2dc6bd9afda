// SPDX-License-Identifier: MPL-2.0
//! Media decoding: turning a picked file into one classifiable image.
//!
//! Still images are decoded directly; videos contribute a single frame
//! sampled shortly after the start. Anything else is rejected with a
//! user-visible error.

pub mod video;

use crate::config::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS, VIDEO_SAMPLE_OFFSET_MS};
use crate::error::{Error, Result};
use image_rs::DynamicImage;
use std::path::Path;

/// Classification of a file by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Determines the media kind from the file extension, case-insensitive.
    /// Returns `None` for unsupported extensions.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// Loads the classifiable frame for a picked file.
///
/// Images are decoded and converted to RGB (alpha dropped). Videos yield the
/// frame sampled at the fixed offset. Unsupported extensions and undecodable
/// content map to the error taxonomy in [`crate::error`].
pub fn load_frame(path: &Path) -> Result<DynamicImage> {
    match MediaKind::from_path(path) {
        Some(MediaKind::Image) => {
            let image = image_rs::open(path)?;
            Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
        }
        Some(MediaKind::Video) => video::extract_frame_at(path, VIDEO_SAMPLE_OFFSET_MS),
        None => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map_or_else(String::new, |e| format!(".{}", e.to_lowercase()));
            Err(Error::UnsupportedFile(ext))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn classifies_image_extensions_case_insensitively() {
        for ext in ["jpg", "JPG", "png", "WebP"] {
            let path = PathBuf::from(format!("photo.{ext}"));
            assert_eq!(MediaKind::from_path(&path), Some(MediaKind::Image), "{ext}");
        }
    }

    #[test]
    fn classifies_video_extensions() {
        for ext in ["mp4", "avi", "mov", "MKV"] {
            let path = PathBuf::from(format!("clip.{ext}"));
            assert_eq!(MediaKind::from_path(&path), Some(MediaKind::Video), "{ext}");
        }
    }

    #[test]
    fn rejects_unsupported_extensions() {
        assert_eq!(MediaKind::from_path(&PathBuf::from("notes.txt")), None);
        assert_eq!(MediaKind::from_path(&PathBuf::from("no_extension")), None);
    }

    #[test]
    fn load_frame_rejects_unsupported_file() {
        let err = load_frame(&PathBuf::from("notes.txt")).unwrap_err();
        match err {
            Error::UnsupportedFile(ext) => assert_eq!(ext, ".txt"),
            other => panic!("expected UnsupportedFile, got {other:?}"),
        }
    }

    #[test]
    fn load_frame_decodes_png_to_rgb() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pixel.png");
        image_rs::RgbaImage::from_pixel(4, 4, image_rs::Rgba([10, 20, 30, 200]))
            .save(&path)
            .expect("save png");

        let frame = load_frame(&path).expect("decodes");
        assert_eq!(frame.color(), image_rs::ColorType::Rgb8);
        assert_eq!((frame.width(), frame.height()), (4, 4));
    }

    #[test]
    fn load_frame_reports_corrupt_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").expect("write");
        assert!(load_frame(&path).is_err());
    }
}

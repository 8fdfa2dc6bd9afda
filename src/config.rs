// SPDX-License-Identifier: MPL-2.0
//! Static application configuration.
//!
//! Nothing here is persisted: every launch starts from the defaults below,
//! with only the UI language self-selecting from the OS locale.

/// Image extensions accepted by the file picker and the loader.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp"];

/// Video extensions accepted by the file picker and the loader.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];

/// Offset into a video at which the single classification frame is sampled.
pub const VIDEO_SAMPLE_OFFSET_MS: i64 = 1000;

/// Download URL for the pretrained MobileNetV2 ImageNet model.
pub const MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/classification/mobilenet/model/mobilenetv2-12.onnx";

/// Download URL for the ImageNet synset labels matching the model output.
pub const LABELS_URL: &str =
    "https://raw.githubusercontent.com/onnx/models/main/validated/vision/classification/synset.txt";

/// Filename for the model in the application data directory.
pub const MODEL_FILENAME: &str = "mobilenetv2-12.onnx";

/// Filename for the labels file in the application data directory.
pub const LABELS_FILENAME: &str = "synset.txt";

// TODO: pin the BLAKE3 checksums once the 0.1 release artifacts are frozen.
/// Expected BLAKE3 hash of the model file; `None` skips verification.
pub const MODEL_BLAKE3: Option<&str> = None;

/// Side length of the square model input, in pixels.
pub const MODEL_INPUT_SIZE: u32 = 224;

/// Number of output classes of the model.
pub const CLASS_COUNT: usize = 1000;

/// Number of predictions shown to the user.
pub const TOP_K: usize = 3;

/// Text size profiles selectable from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    /// Multiplier applied to the typography scale.
    pub fn scale(self) -> f32 {
        match self {
            TextSize::Small => 0.85,
            TextSize::Medium => 1.0,
            TextSize::Large => 1.2,
        }
    }

    /// Fluent key for the profile name.
    pub fn i18n_key(self) -> &'static str {
        match self {
            TextSize::Small => "text-size-small",
            TextSize::Medium => "text-size-medium",
            TextSize::Large => "text-size-large",
        }
    }

    /// Next profile in cycling order (the toolbar button cycles through).
    pub fn next(self) -> Self {
        match self {
            TextSize::Small => TextSize::Medium,
            TextSize::Medium => TextSize::Large,
            TextSize::Large => TextSize::Small,
        }
    }
}

/// Window size profiles selectable from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowProfile {
    Compact,
    #[default]
    Standard,
    Spacious,
}

impl WindowProfile {
    /// Logical window size for this profile.
    pub fn size(self) -> iced::Size {
        match self {
            WindowProfile::Compact => iced::Size::new(540.0, 620.0),
            WindowProfile::Standard => iced::Size::new(640.0, 720.0),
            WindowProfile::Spacious => iced::Size::new(780.0, 860.0),
        }
    }

    /// Fluent key for the profile name.
    pub fn i18n_key(self) -> &'static str {
        match self {
            WindowProfile::Compact => "window-size-compact",
            WindowProfile::Standard => "window-size-standard",
            WindowProfile::Spacious => "window-size-spacious",
        }
    }

    /// Next profile in cycling order.
    pub fn next(self) -> Self {
        match self {
            WindowProfile::Compact => WindowProfile::Standard,
            WindowProfile::Standard => WindowProfile::Spacious,
            WindowProfile::Spacious => WindowProfile::Compact,
        }
    }
}

/// Minimum window size, below which the layout degrades.
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 560.0;

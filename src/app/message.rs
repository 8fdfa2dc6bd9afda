// SPDX-License-Identifier: MPL-2.0
//! Message and launch-flag types for the application.

use crate::classifier::Prediction;
use crate::error::Error;
use crate::lookup::LookupResult;
use crate::ui::results;
use iced::widget::image;
use std::path::PathBuf;
use unic_langid::LanguageIdentifier;

/// Startup parameters from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// UI language override (`--lang`).
    pub lang: Option<String>,
    /// Data directory override (`--data-dir`).
    pub data_dir: Option<String>,
    /// Optional file to classify once the model is ready.
    pub file_path: Option<String>,
}

/// Decoded frame and its classification, produced on a blocking task and
/// marshaled back to the update loop.
#[derive(Debug, Clone)]
pub struct ClassifiedFrame {
    pub thumbnail: image::Handle,
    pub prediction: Prediction,
}

/// All events the update loop reacts to.
#[derive(Debug, Clone)]
pub enum Message {
    /// Model download progress in `[0, 1]`; `1.0` means the session is
    /// being built.
    ModelProgress(f32),
    /// Download and session build finished; carries the label vocabulary.
    ModelSetupFinished(Result<Vec<String>, String>),

    UploadPressed,
    /// File picker closed; `None` means cancelled.
    FileSelected(Option<PathBuf>),
    /// Classification task finished. Stale generations are discarded.
    ClassificationFinished {
        generation: u64,
        result: Result<ClassifiedFrame, Error>,
    },
    ResetPressed,

    SearchInputChanged(String),
    SearchSubmitted,
    LabelSearchPressed,
    /// Events bubbling up from the results card.
    Results(results::Message),
    /// Encyclopedia lookup finished. Stale generations are discarded.
    LookupFinished {
        generation: u64,
        result: LookupResult,
    },
    PopupDismissed,
    ErrorDismissed,

    ThemeToggled,
    LanguageSelected(LanguageIdentifier),
    TextSizeCycled,
    WindowProfileCycled,

    /// Periodic tick driving the spinner while one is visible.
    Tick(std::time::Instant),
}

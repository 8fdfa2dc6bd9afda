// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct owns every piece of mutable state. Long-running work
//! (model acquisition, decoding, inference, encyclopedia lookups) runs on
//! background tasks and reports back through [`Message`]s; state mutation
//! happens only inside `update`, on the main loop.

mod message;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{ClassifiedFrame, Flags, Message};
pub use screen::ScreenMode;

use crate::classifier::{Classifier, ModelStatus, Prediction, VocabularySearch};
use crate::config::{self, TextSize, WindowProfile};
use crate::i18n::I18n;
use crate::lookup::{LookupResult, WikiClient};
use crate::paths;
use crate::ui::theme::ThemeMode;
use iced::widget::image;
use iced::{window, Subscription, Task, Theme};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Transient popup shown above the main content during and after a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    /// A lookup is in flight.
    Searching { query: String },
    /// The lookup finished; `summary: None` renders as "page not found".
    Result(LookupResult),
}

/// Root application state.
pub struct App {
    pub i18n: I18n,
    classifier: Arc<Mutex<Classifier>>,
    wiki: WikiClient,

    mode: ScreenMode,
    model_status: ModelStatus,
    /// Humanized label vocabulary, filled when the model becomes ready.
    vocabulary: Vec<String>,

    theme_mode: ThemeMode,
    text_size: TextSize,
    window_profile: WindowProfile,

    /// Non-null exactly when `mode == Results`.
    last_prediction: Option<Prediction>,
    thumbnail: Option<image::Handle>,
    search_input: String,
    label_search: Option<VocabularySearch>,
    popup: Option<Popup>,
    /// Fluent key of the error shown in the banner, if any.
    error_banner: Option<&'static str>,

    /// Generation tokens; results carrying an older token are discarded.
    prediction_generation: u64,
    lookup_generation: u64,
    spinner_rotation: f32,

    /// File passed on the command line, classified once the model is ready.
    pending_file: Option<PathBuf>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            classifier: Arc::new(Mutex::new(Classifier::new())),
            wiki: WikiClient::new(),
            mode: ScreenMode::Initial,
            model_status: ModelStatus::default(),
            vocabulary: Vec::new(),
            theme_mode: ThemeMode::default(),
            text_size: TextSize::default(),
            window_profile: WindowProfile::default(),
            last_prediction: None,
            thumbnail: None,
            search_input: String::new(),
            label_search: None,
            popup: None,
            error_banner: None,
            prediction_generation: 0,
            lookup_generation: 0,
            spinner_rotation: 0.0,
            pending_file: None,
        }
    }
}

/// Builds the window settings from the default window profile.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: WindowProfile::default().size(),
        min_size: Some(iced::Size::new(
            config::MIN_WINDOW_WIDTH,
            config::MIN_WINDOW_HEIGHT,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes state from `Flags` and kicks off model acquisition.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_override(flags.data_dir);

        let mut app = App {
            i18n: I18n::new(flags.lang),
            theme_mode: ThemeMode::from_system(),
            ..Self::default()
        };
        app.pending_file = flags.file_path.map(PathBuf::from);

        let task = update::setup_model_task(Arc::clone(&app.classifier));
        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        if self.theme_mode.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::tick(self.spinner_visible())
    }

    /// Whether any spinner is on screen, which drives the tick subscription.
    fn spinner_visible(&self) -> bool {
        self.mode == ScreenMode::Loading
            || matches!(self.popup, Some(Popup::Searching { .. }))
            || (self.mode == ScreenMode::Initial && self.model_status == ModelStatus::Loading)
    }

    /// Whether the upload button accepts presses. `Failed` stays enabled so
    /// the user can retry model acquisition without restarting.
    fn upload_enabled(&self) -> bool {
        matches!(
            self.model_status,
            ModelStatus::Ready | ModelStatus::Failed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::PredictionEntry;
    use crate::error::Error;

    fn ready_app() -> App {
        let mut app = App::default();
        app.model_status = ModelStatus::Ready;
        app.vocabulary = vec!["Gazelle".to_string(), "Zebra".to_string()];
        app
    }

    fn sample_frame() -> ClassifiedFrame {
        ClassifiedFrame {
            thumbnail: image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255]),
            prediction: Prediction {
                entries: vec![PredictionEntry {
                    class_id: "n02391049".to_string(),
                    label: "Zebra".to_string(),
                    score: 0.9,
                }],
            },
        }
    }

    fn assert_prediction_invariant(app: &App) {
        assert_eq!(
            app.last_prediction.is_some(),
            app.mode == ScreenMode::Results
        );
    }

    #[test]
    fn starts_in_initial_mode_without_prediction() {
        let app = App::default();
        assert_eq!(app.mode, ScreenMode::Initial);
        assert_prediction_invariant(&app);
        assert!(!app.upload_enabled());
    }

    #[test]
    fn model_ready_enables_upload() {
        let mut app = App::default();
        let _ = app.update(Message::ModelSetupFinished(Ok(vec!["Zebra".to_string()])));
        assert_eq!(app.model_status, ModelStatus::Ready);
        assert!(app.upload_enabled());
        assert_eq!(app.vocabulary, vec!["Zebra".to_string()]);
    }

    #[test]
    fn model_failure_keeps_upload_enabled_for_retry() {
        let mut app = App::default();
        let _ = app.update(Message::ModelSetupFinished(Err("offline".to_string())));
        assert!(matches!(app.model_status, ModelStatus::Failed(_)));
        assert!(app.upload_enabled());
        assert_eq!(app.error_banner, Some("error-model"));
    }

    #[test]
    fn cancelled_picker_changes_nothing() {
        let mut app = ready_app();
        let _ = app.update(Message::FileSelected(None));
        assert_eq!(app.mode, ScreenMode::Initial);
        assert_prediction_invariant(&app);
    }

    #[test]
    fn selecting_a_file_enters_loading() {
        let mut app = ready_app();
        let _ = app.update(Message::FileSelected(Some(PathBuf::from("zebra.jpg"))));
        assert_eq!(app.mode, ScreenMode::Loading);
        assert_prediction_invariant(&app);
    }

    #[test]
    fn successful_classification_enters_results() {
        let mut app = ready_app();
        let _ = app.update(Message::FileSelected(Some(PathBuf::from("zebra.jpg"))));
        let generation = app.prediction_generation;
        let _ = app.update(Message::ClassificationFinished {
            generation,
            result: Ok(sample_frame()),
        });
        assert_eq!(app.mode, ScreenMode::Results);
        assert_prediction_invariant(&app);
        // The top label is copied into the search field and looked up.
        assert_eq!(app.search_input, "Zebra");
        assert!(matches!(app.popup, Some(Popup::Searching { .. })));
    }

    #[test]
    fn failed_classification_returns_to_initial() {
        let mut app = ready_app();
        let _ = app.update(Message::FileSelected(Some(PathBuf::from("notes.txt"))));
        let generation = app.prediction_generation;
        let _ = app.update(Message::ClassificationFinished {
            generation,
            result: Err(Error::UnsupportedFile(".txt".to_string())),
        });
        assert_eq!(app.mode, ScreenMode::Initial);
        assert_prediction_invariant(&app);
        assert_eq!(app.error_banner, Some("error-unsupported-file"));
    }

    #[test]
    fn stale_classification_is_discarded() {
        let mut app = ready_app();
        let _ = app.update(Message::FileSelected(Some(PathBuf::from("a.jpg"))));
        let stale = app.prediction_generation;
        let _ = app.update(Message::FileSelected(Some(PathBuf::from("b.jpg"))));
        let _ = app.update(Message::ClassificationFinished {
            generation: stale,
            result: Ok(sample_frame()),
        });
        // The result of the superseded request never lands.
        assert_eq!(app.mode, ScreenMode::Loading);
        assert_prediction_invariant(&app);
    }

    #[test]
    fn reset_cancels_an_inflight_classification() {
        let mut app = ready_app();
        let _ = app.update(Message::FileSelected(Some(PathBuf::from("zebra.jpg"))));
        let generation = app.prediction_generation;

        let _ = app.update(Message::ResetPressed);
        let _ = app.update(Message::ClassificationFinished {
            generation,
            result: Ok(sample_frame()),
        });

        // A result dispatched before the reset must not land after it.
        assert_eq!(app.mode, ScreenMode::Initial);
        assert!(app.popup.is_none());
        assert!(app.search_input.is_empty());
        assert_prediction_invariant(&app);
    }

    #[test]
    fn reset_cancels_an_inflight_lookup() {
        let mut app = ready_app();
        let _ = app.update(Message::SearchInputChanged("zebra".to_string()));
        let _ = app.update(Message::SearchSubmitted);
        let generation = app.lookup_generation;

        let _ = app.update(Message::ResetPressed);
        let _ = app.update(Message::LookupFinished {
            generation,
            result: LookupResult {
                title: "Zebra".to_string(),
                summary: Some("Striped equid.".to_string()),
            },
        });

        assert!(app.popup.is_none());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut app = ready_app();
        let _ = app.update(Message::FileSelected(Some(PathBuf::from("zebra.jpg"))));
        let generation = app.prediction_generation;
        let _ = app.update(Message::ClassificationFinished {
            generation,
            result: Ok(sample_frame()),
        });

        let _ = app.update(Message::ResetPressed);
        assert_eq!(app.mode, ScreenMode::Initial);
        assert_prediction_invariant(&app);
        assert!(app.search_input.is_empty());

        let _ = app.update(Message::ResetPressed);
        assert_eq!(app.mode, ScreenMode::Initial);
        assert_prediction_invariant(&app);
    }

    #[test]
    fn label_search_matches_case_insensitively() {
        let mut app = ready_app();
        let _ = app.update(Message::SearchInputChanged("zebra".to_string()));
        let _ = app.update(Message::LabelSearchPressed);
        match &app.label_search {
            Some(VocabularySearch::Found { count, preview }) => {
                assert!(*count >= 1);
                assert!(preview.contains(&"Zebra".to_string()));
            }
            other => panic!("expected matches, got {other:?}"),
        }
    }

    #[test]
    fn stale_lookup_is_discarded() {
        let mut app = ready_app();
        let _ = app.update(Message::SearchInputChanged("okapi".to_string()));
        let _ = app.update(Message::SearchSubmitted);
        let stale = app.lookup_generation;
        let _ = app.update(Message::SearchSubmitted);
        let _ = app.update(Message::LookupFinished {
            generation: stale,
            result: LookupResult {
                title: "Okapi".to_string(),
                summary: Some("stale".to_string()),
            },
        });
        assert!(matches!(app.popup, Some(Popup::Searching { .. })));

        let current = app.lookup_generation;
        let _ = app.update(Message::LookupFinished {
            generation: current,
            result: LookupResult {
                title: "Okapi".to_string(),
                summary: Some("fresh".to_string()),
            },
        });
        match &app.popup {
            Some(Popup::Result(result)) => assert_eq!(result.summary.as_deref(), Some("fresh")),
            other => panic!("expected result popup, got {other:?}"),
        }
    }

    #[test]
    fn empty_search_opens_no_popup() {
        let mut app = ready_app();
        let _ = app.update(Message::SearchInputChanged("   ".to_string()));
        let _ = app.update(Message::SearchSubmitted);
        assert_eq!(app.popup, None);
    }

    #[test]
    fn theme_toggle_round_trips() {
        let mut app = App::default();
        let initial = app.theme_mode;
        let _ = app.update(Message::ThemeToggled);
        assert_ne!(app.theme_mode, initial);
        let _ = app.update(Message::ThemeToggled);
        assert_eq!(app.theme_mode, initial);
    }

    #[test]
    fn cycling_profiles_mutates_state_only() {
        let mut app = App::default();
        let _ = app.update(Message::TextSizeCycled);
        assert_eq!(app.text_size, TextSize::default().next());
        let _ = app.update(Message::WindowProfileCycled);
        assert_eq!(app.window_profile, WindowProfile::default().next());
        assert_eq!(app.mode, ScreenMode::Initial);
    }

    #[test]
    fn tick_advances_spinner() {
        let mut app = App::default();
        let before = app.spinner_rotation;
        let _ = app.update(Message::Tick(std::time::Instant::now()));
        assert!(app.spinner_rotation > before);
    }

    #[test]
    fn dismissals_clear_transient_surfaces() {
        let mut app = ready_app();
        app.error_banner = Some("error-io");
        app.popup = Some(Popup::Result(LookupResult {
            title: "Zebra".to_string(),
            summary: None,
        }));
        let _ = app.update(Message::ErrorDismissed);
        assert_eq!(app.error_banner, None);
        let _ = app.update(Message::PopupDismissed);
        assert_eq!(app.popup, None);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.
//!
//! Every state mutation happens here, on the main loop. Background work is
//! expressed as `Task`s whose completion messages route back into `update`.

use super::message::ClassifiedFrame;
use super::{App, Message, Popup, ScreenMode};
use crate::classifier::{self, download, Classifier, ModelStatus};
use crate::config::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::error::{Error, Result as AppResult};
use crate::lookup::WikiClient;
use crate::media;
use crate::ui::results;
use iced::widget::image;
use iced::{window, Task};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Spinner advance per tick, in radians.
const SPINNER_STEP: f32 = 0.35;

/// Longest side of the thumbnail kept for the results header.
const THUMBNAIL_MAX_SIDE: u32 = 256;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ModelProgress(progress) => {
                if matches!(
                    self.model_status,
                    ModelStatus::Downloading { .. } | ModelStatus::Loading
                ) {
                    self.model_status = if progress >= 1.0 {
                        ModelStatus::Loading
                    } else {
                        ModelStatus::Downloading { progress }
                    };
                }
                Task::none()
            }
            Message::ModelSetupFinished(Ok(vocabulary)) => {
                self.model_status = ModelStatus::Ready;
                self.vocabulary = vocabulary;
                match self.pending_file.take() {
                    Some(path) => self.begin_classification(path),
                    None => Task::none(),
                }
            }
            Message::ModelSetupFinished(Err(reason)) => {
                eprintln!("Model setup failed: {reason}");
                self.model_status = ModelStatus::Failed(reason);
                self.error_banner = Some("error-model");
                Task::none()
            }
            Message::UploadPressed => {
                if matches!(self.model_status, ModelStatus::Ready) {
                    self.open_file_dialog()
                } else if matches!(self.model_status, ModelStatus::Failed(_)) {
                    // Retry acquisition without restarting the process.
                    self.error_banner = None;
                    self.model_status = ModelStatus::Loading;
                    setup_model_task(Arc::clone(&self.classifier))
                } else {
                    Task::none()
                }
            }
            Message::FileSelected(None) => Task::none(),
            Message::FileSelected(Some(path)) => self.begin_classification(path),
            Message::ClassificationFinished { generation, result } => {
                if generation != self.prediction_generation {
                    // A newer request superseded this one.
                    return Task::none();
                }
                match result {
                    Ok(frame) => {
                        let top_label = frame.prediction.top_label().map(str::to_string);
                        self.thumbnail = Some(frame.thumbnail);
                        self.last_prediction = Some(frame.prediction);
                        self.mode = ScreenMode::Results;
                        match top_label {
                            Some(label) => {
                                self.search_input = label.clone();
                                self.begin_lookup(label)
                            }
                            None => Task::none(),
                        }
                    }
                    Err(e) => {
                        eprintln!("Classification failed: {e}");
                        self.error_banner = Some(e.i18n_key());
                        self.mode = ScreenMode::Initial;
                        self.last_prediction = None;
                        self.thumbnail = None;
                        Task::none()
                    }
                }
            }
            Message::ResetPressed => {
                self.mode = ScreenMode::Initial;
                self.last_prediction = None;
                self.thumbnail = None;
                self.label_search = None;
                self.popup = None;
                self.search_input.clear();
                // Invalidate in-flight work so a result dispatched before the
                // reset cannot land afterwards.
                self.prediction_generation += 1;
                self.lookup_generation += 1;
                Task::none()
            }
            Message::SearchInputChanged(value) => {
                self.search_input = value;
                Task::none()
            }
            Message::SearchSubmitted => {
                let query = self.search_input.trim().to_string();
                if query.is_empty() {
                    return Task::none();
                }
                self.begin_lookup(query)
            }
            Message::LabelSearchPressed => {
                self.label_search = Some(classifier::search_vocabulary(
                    &self.search_input,
                    &self.vocabulary,
                ));
                Task::none()
            }
            Message::Results(results::Message::LabelClicked(label)) => {
                self.search_input = label.clone();
                self.begin_lookup(label)
            }
            Message::LookupFinished { generation, result } => {
                if generation == self.lookup_generation {
                    self.popup = Some(Popup::Result(result));
                }
                Task::none()
            }
            Message::PopupDismissed => {
                self.popup = None;
                Task::none()
            }
            Message::ErrorDismissed => {
                self.error_banner = None;
                Task::none()
            }
            Message::ThemeToggled => {
                self.theme_mode = self.theme_mode.toggled();
                Task::none()
            }
            Message::LanguageSelected(locale) => {
                self.i18n.set_locale(locale);
                Task::none()
            }
            Message::TextSizeCycled => {
                self.text_size = self.text_size.next();
                Task::none()
            }
            Message::WindowProfileCycled => {
                self.window_profile = self.window_profile.next();
                let size = self.window_profile.size();
                window::latest().and_then(move |id| window::resize(id, size))
            }
            Message::Tick(_) => {
                self.spinner_rotation =
                    (self.spinner_rotation + SPINNER_STEP) % (2.0 * std::f32::consts::PI);
                Task::none()
            }
        }
    }

    /// Starts a classification for `path`: enters `Loading`, bumps the
    /// generation so an in-flight result cannot land, and dispatches the
    /// decode + inference to a blocking task.
    fn begin_classification(&mut self, path: PathBuf) -> Task<Message> {
        self.mode = ScreenMode::Loading;
        self.last_prediction = None;
        self.thumbnail = None;
        self.label_search = None;
        self.prediction_generation += 1;
        classify_task(
            Arc::clone(&self.classifier),
            path,
            self.prediction_generation,
        )
    }

    /// Starts an encyclopedia lookup and opens the searching popup.
    fn begin_lookup(&mut self, query: String) -> Task<Message> {
        self.lookup_generation += 1;
        self.popup = Some(Popup::Searching {
            query: query.clone(),
        });
        lookup_task(
            self.wiki.clone(),
            query,
            self.i18n.lookup_language(),
            self.lookup_generation,
        )
    }

    fn open_file_dialog(&self) -> Task<Message> {
        let title = self.i18n.tr("file-dialog-title");
        let images = self.i18n.tr("file-types-images");
        let videos = self.i18n.tr("file-types-videos");
        let all = self.i18n.tr("file-types-all");

        Task::perform(
            async move {
                let all_extensions: Vec<&str> = IMAGE_EXTENSIONS
                    .iter()
                    .chain(VIDEO_EXTENSIONS.iter())
                    .copied()
                    .collect();

                rfd::AsyncFileDialog::new()
                    .set_title(&title)
                    .add_filter(&all, &all_extensions)
                    .add_filter(&images, IMAGE_EXTENSIONS)
                    .add_filter(&videos, VIDEO_EXTENSIONS)
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::FileSelected,
        )
    }
}

/// Acquires the model (download if missing, then session build + warm-up) on
/// background tasks, streaming progress back as messages.
pub(super) fn setup_model_task(classifier: Arc<Mutex<Classifier>>) -> Task<Message> {
    use iced::futures::channel::{mpsc, oneshot};
    use iced::futures::{stream, StreamExt};

    enum Phase {
        Start(Arc<Mutex<Classifier>>),
        ReceivingProgress {
            progress_rx: mpsc::Receiver<f32>,
            result_rx: oneshot::Receiver<Result<Vec<String>, String>>,
        },
        WaitingForResult {
            result_rx: oneshot::Receiver<Result<Vec<String>, String>>,
        },
        Completed,
    }

    let setup_stream = stream::unfold(Phase::Start(classifier), |phase| async move {
        match phase {
            Phase::Start(classifier) => {
                let (progress_tx, progress_rx) = mpsc::channel::<f32>(100);
                let (result_tx, result_rx) = oneshot::channel::<Result<Vec<String>, String>>();

                // The worker runs independently; the stream below relays its
                // progress and result to the update loop.
                tokio::spawn(async move {
                    let mut progress_tx = progress_tx;
                    let downloaded = download::ensure_model(|progress| {
                        let _ = progress_tx.try_send(progress);
                    })
                    .await;

                    let result = match downloaded {
                        Ok(()) => load_session(classifier).await,
                        Err(e) => Err(e.to_string()),
                    };
                    let _ = result_tx.send(result);
                    // progress_tx is dropped here, closing the channel
                });

                Some((
                    Message::ModelProgress(0.0),
                    Phase::ReceivingProgress {
                        progress_rx,
                        result_rx,
                    },
                ))
            }
            Phase::ReceivingProgress {
                mut progress_rx,
                result_rx,
            } => match progress_rx.next().await {
                Some(progress) => Some((
                    Message::ModelProgress(progress),
                    Phase::ReceivingProgress {
                        progress_rx,
                        result_rx,
                    },
                )),
                None => {
                    // Progress channel closed; the session build is running.
                    Some((
                        Message::ModelProgress(1.0),
                        Phase::WaitingForResult { result_rx },
                    ))
                }
            },
            Phase::WaitingForResult { result_rx } => {
                let result = match result_rx.await {
                    Ok(result) => result,
                    Err(_) => Err("Model setup task cancelled".to_string()),
                };
                Some((Message::ModelSetupFinished(result), Phase::Completed))
            }
            Phase::Completed => None, // Terminate the stream
        }
    });

    Task::stream(setup_stream)
}

/// Builds the session on a blocking task and returns the vocabulary.
async fn load_session(classifier: Arc<Mutex<Classifier>>) -> Result<Vec<String>, String> {
    tokio::task::spawn_blocking(move || {
        let mut guard = classifier
            .lock()
            .map_err(|_| "classifier lock poisoned".to_string())?;
        guard.load().map_err(|e| e.to_string())?;
        Ok(guard.vocabulary().to_vec())
    })
    .await
    .unwrap_or_else(|e| Err(e.to_string()))
}

/// Decodes, preprocesses, and classifies `path` on a blocking task.
fn classify_task(
    classifier: Arc<Mutex<Classifier>>,
    path: PathBuf,
    generation: u64,
) -> Task<Message> {
    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || classify_file(&classifier, &path))
                .await
                .unwrap_or_else(|e| Err(Error::Model(e.to_string())))
        },
        move |result| Message::ClassificationFinished { generation, result },
    )
}

/// The blocking classification pipeline: decode, preprocess, predict.
fn classify_file(classifier: &Mutex<Classifier>, path: &Path) -> AppResult<ClassifiedFrame> {
    let frame = media::load_frame(path)?;
    let tensor = classifier::preprocess(&frame);

    let prediction = {
        let mut guard = classifier
            .lock()
            .map_err(|_| Error::Model("classifier lock poisoned".to_string()))?;
        guard
            .predict(&tensor)
            .ok_or_else(|| Error::Model("prediction unavailable".to_string()))?
    };

    let thumbnail = frame.thumbnail(THUMBNAIL_MAX_SIDE, THUMBNAIL_MAX_SIDE);
    let rgba = thumbnail.to_rgba8();
    let handle = image::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw());

    Ok(ClassifiedFrame {
        thumbnail: handle,
        prediction,
    })
}

/// Fetches a summary from the Wikipedia edition matching `lang`.
fn lookup_task(wiki: WikiClient, query: String, lang: String, generation: u64) -> Task<Message> {
    Task::perform(
        async move { wiki.fetch_summary(&query, &lang).await },
        move |result| Message::LookupFinished { generation, result },
    )
}

// SPDX-License-Identifier: MPL-2.0
//! ImageNet classification backed by a MobileNetV2 ONNX model.
//!
//! The [`Classifier`] owns the ONNX Runtime session and the label vocabulary.
//! Loading is a one-time operation: the session is built from the downloaded
//! model file, the synset labels are parsed alongside it, and a discarded
//! warm-up inference pays the lazy initialization cost before the first
//! user-facing prediction.

pub mod download;

use crate::config::{CLASS_COUNT, MODEL_INPUT_SIZE, TOP_K};
use image_rs::DynamicImage;
use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};

/// ImageNet channel statistics used by the model's documented input contract.
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Number of vocabulary matches included in the search preview.
const PREVIEW_LIMIT: usize = 5;

/// Result type for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Errors that can occur while acquiring or running the model.
#[derive(Debug, Clone)]
pub enum ClassifierError {
    /// Model file not found at the expected path.
    ModelNotFound,
    /// Failed to download the model or labels file.
    DownloadFailed(String),
    /// Model checksum verification failed.
    ChecksumMismatch { expected: String, actual: String },
    /// The labels file is missing, truncated, or malformed.
    LabelsInvalid(String),
    /// ONNX inference failed.
    InferenceFailed(String),
    /// IO error occurred.
    Io(String),
    /// Model session not initialized.
    SessionNotInitialized,
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierError::ModelNotFound => write!(f, "Model file not found"),
            ClassifierError::DownloadFailed(msg) => write!(f, "Download failed: {msg}"),
            ClassifierError::ChecksumMismatch { expected, actual } => {
                write!(f, "Checksum mismatch: expected {expected}, got {actual}")
            }
            ClassifierError::LabelsInvalid(msg) => write!(f, "Labels file invalid: {msg}"),
            ClassifierError::InferenceFailed(msg) => write!(f, "Inference failed: {msg}"),
            ClassifierError::Io(msg) => write!(f, "IO error: {msg}"),
            ClassifierError::SessionNotInitialized => write!(f, "ONNX session not initialized"),
        }
    }
}

impl std::error::Error for ClassifierError {}

/// Lifecycle of the classification model, as shown in the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelStatus {
    /// The model file is being downloaded.
    Downloading { progress: f32 },
    /// The session is being built and warmed up.
    Loading,
    /// Predictions are available. Reached at most once per process.
    Ready,
    /// Acquisition or loading failed; the reason is logged and shown once.
    Failed(String),
}

impl Default for ModelStatus {
    fn default() -> Self {
        ModelStatus::Loading
    }
}

/// One entry of a classification result.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionEntry {
    /// Raw class identifier (WordNet synset id, e.g. `n02391049`).
    pub class_id: String,
    /// Humanized display label (e.g. `Zebra`).
    pub label: String,
    /// Softmax confidence in `[0, 1]`.
    pub score: f32,
}

/// Top-k classification output for one input image, ordered by descending
/// score. Replaced wholesale on each classification; never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub entries: Vec<PredictionEntry>,
}

impl Prediction {
    /// Display label of the best match.
    pub fn top_label(&self) -> Option<&str> {
        self.entries.first().map(|e| e.label.as_str())
    }
}

/// One parsed line of the synset labels file.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEntry {
    pub class_id: String,
    pub label: String,
}

/// Outcome of a vocabulary search, rendered under the search bar.
#[derive(Debug, Clone, PartialEq)]
pub enum VocabularySearch {
    /// The query was empty or whitespace.
    EmptyQuery,
    /// The vocabulary has not been loaded yet.
    NotLoaded,
    /// No label contained the query.
    NoMatch,
    /// At least one label matched.
    Found {
        count: usize,
        preview: Vec<String>,
    },
}

/// Owns the ONNX session and the label vocabulary.
///
/// The session is not guaranteed reentrant; callers serialize access by
/// keeping the classifier behind a mutex and issuing one prediction at a
/// time.
pub struct Classifier {
    session: Option<Session>,
    labels: Vec<LabelEntry>,
    vocabulary: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: None,
            labels: Vec::new(),
            vocabulary: Vec::new(),
        }
    }

    /// Loads the session, the labels, and runs the warm-up inference.
    ///
    /// Idempotent: returns immediately when the session is already loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the model or labels file is missing or malformed,
    /// or if the ONNX session fails to initialize.
    pub fn load(&mut self) -> ClassifierResult<()> {
        if self.session.is_some() {
            return Ok(());
        }

        let model_path = download::model_path();
        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound);
        }

        let labels_text = std::fs::read_to_string(download::labels_path())
            .map_err(|e| ClassifierError::LabelsInvalid(e.to_string()))?;
        let labels = parse_labels(&labels_text)?;

        let session = Session::builder()
            .map_err(|e| ClassifierError::InferenceFailed(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ClassifierError::InferenceFailed(e.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|e| ClassifierError::InferenceFailed(e.to_string()))?;

        let mut vocabulary: Vec<String> = labels.iter().map(|l| l.label.clone()).collect();
        vocabulary.sort();

        self.session = Some(session);
        self.labels = labels;
        self.vocabulary = vocabulary;

        // Warm-up: one discarded inference on an all-zero input so the first
        // user-facing prediction does not pay graph initialization costs.
        let warm_up = Array4::<f32>::zeros((
            1,
            3,
            MODEL_INPUT_SIZE as usize,
            MODEL_INPUT_SIZE as usize,
        ));
        self.run(&warm_up)?;

        Ok(())
    }

    /// Whether `load` has completed successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Humanized label vocabulary, sorted alphabetically. Empty before
    /// `load` succeeds.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Runs a forward pass and decodes the top-3 classes.
    ///
    /// Returns `None` before `load` succeeds or when the backend errors;
    /// failures are logged, never propagated.
    pub fn predict(&mut self, input: &Array4<f32>) -> Option<Prediction> {
        if self.session.is_none() {
            return None;
        }

        match self.run(input) {
            Ok(scores) => Some(decode_scores(&scores, &self.labels, TOP_K)),
            Err(e) => {
                eprintln!("Prediction failed: {e}");
                None
            }
        }
    }

    /// Executes the session and returns the raw class scores.
    fn run(&mut self, input: &Array4<f32>) -> ClassifierResult<Vec<f32>> {
        let session = self
            .session
            .as_mut()
            .ok_or(ClassifierError::SessionNotInitialized)?;

        let input = input.as_standard_layout().into_owned();

        let input_name = session
            .inputs
            .first()
            .map_or_else(|| "input".to_string(), |i| i.name.clone());

        let input_ref = ort::value::TensorRef::from_array_view(&input)
            .map_err(|e| ClassifierError::InferenceFailed(e.to_string()))?;

        let outputs = session
            .run(ort::inputs![input_name.as_str() => input_ref])
            .map_err(|e| ClassifierError::InferenceFailed(e.to_string()))?;

        let (_, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| ClassifierError::InferenceFailed("No output tensor".to_string()))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e: ort::Error| ClassifierError::InferenceFailed(e.to_string()))?;

        Ok(data.to_vec())
    }
}

/// Resizes and normalizes an image into the model's NCHW input tensor.
///
/// The alpha channel is dropped and pixel values follow the documented
/// contract: scaled to `[0, 1]`, then standardized with the ImageNet
/// channel statistics. Pure function of the input image.
#[must_use]
pub fn preprocess(image: &DynamicImage) -> Array4<f32> {
    let side = MODEL_INPUT_SIZE;
    let resized = image.resize_exact(side, side, image_rs::imageops::FilterType::Lanczos3);
    let rgb = resized.to_rgb8();

    let hw = (side * side) as usize;
    let mut data = vec![0f32; 3 * hw];
    for (i, pixel) in rgb.pixels().enumerate() {
        for c in 0..3 {
            data[c * hw + i] = (f32::from(pixel[c]) / 255.0 - MEAN[c]) / STD[c];
        }
    }

    Array4::from_shape_vec((1, 3, side as usize, side as usize), data)
        .expect("tensor dimensions match buffer length")
}

/// Applies softmax over the raw scores and picks the top-k entries in
/// descending score order.
#[must_use]
pub fn decode_scores(scores: &[f32], labels: &[LabelEntry], k: usize) -> Prediction {
    let max_score = scores.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp_sum: f32 = scores.iter().map(|&x| (x - max_score).exp()).sum();
    let probabilities: Vec<f32> = scores
        .iter()
        .map(|&x| (x - max_score).exp() / exp_sum)
        .collect();

    let mut indexed: Vec<(usize, f32)> = probabilities.into_iter().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let entries = indexed
        .into_iter()
        .take(k)
        .map(|(idx, score)| {
            let (class_id, label) = labels.get(idx).map_or_else(
                || (format!("class_{idx}"), format!("Class {idx}")),
                |l| (l.class_id.clone(), l.label.clone()),
            );
            PredictionEntry {
                class_id,
                label,
                score,
            }
        })
        .collect();

    Prediction { entries }
}

/// Parses the synset labels file: one `<wordnet-id> <name>[, synonyms]` line
/// per class, in class index order.
pub fn parse_labels(text: &str) -> ClassifierResult<Vec<LabelEntry>> {
    let mut labels = Vec::with_capacity(CLASS_COUNT);

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((class_id, names)) = line.split_once(' ') else {
            return Err(ClassifierError::LabelsInvalid(format!(
                "line {} has no label text",
                line_no + 1
            )));
        };
        let first_name = names.split(',').next().unwrap_or(names).trim();
        labels.push(LabelEntry {
            class_id: class_id.to_string(),
            label: humanize(first_name),
        });
    }

    if labels.len() != CLASS_COUNT {
        return Err(ClassifierError::LabelsInvalid(format!(
            "expected {} classes, found {}",
            CLASS_COUNT,
            labels.len()
        )));
    }

    Ok(labels)
}

/// Turns a raw class name into a display label: underscores become spaces
/// and the first letter is capitalized.
#[must_use]
pub fn humanize(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

/// Case-insensitive substring search over the label vocabulary.
///
/// Purely synchronous: no network, no background dispatch.
#[must_use]
pub fn search_vocabulary(query: &str, vocabulary: &[String]) -> VocabularySearch {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return VocabularySearch::EmptyQuery;
    }
    if vocabulary.is_empty() {
        return VocabularySearch::NotLoaded;
    }

    let matches: Vec<&String> = vocabulary
        .iter()
        .filter(|label| label.to_lowercase().contains(&query))
        .collect();

    if matches.is_empty() {
        return VocabularySearch::NoMatch;
    }

    VocabularySearch::Found {
        count: matches.len(),
        preview: matches
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|s| (*s).clone())
            .collect(),
    }
}

// SPDX-License-Identifier: MPL-2.0
//! One-time acquisition of the model and labels files.
//!
//! Both files are streamed into the application data directory with download
//! progress reported to the UI. Partial files are deleted on failure so a
//! later retry starts clean.

use super::{ClassifierError, ClassifierResult};
use crate::config::{LABELS_FILENAME, LABELS_URL, MODEL_BLAKE3, MODEL_FILENAME, MODEL_URL};
use crate::paths;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};

/// Minimum expected model size (10 MB) to detect failed downloads; the
/// MobileNetV2 export is ~14 MB.
const MIN_MODEL_SIZE_BYTES: u64 = 10_000_000;

/// Minimum expected labels size; the synset file is ~30 KB.
const MIN_LABELS_SIZE_BYTES: u64 = 10_000;

/// Fraction of the reported progress devoted to the model file; the labels
/// file accounts for the remainder.
const MODEL_PROGRESS_SHARE: f32 = 0.97;

/// Returns the path where the model is/will be stored.
#[must_use]
pub fn model_path() -> PathBuf {
    paths::data_file(MODEL_FILENAME)
}

/// Returns the path where the labels file is/will be stored.
#[must_use]
pub fn labels_path() -> PathBuf {
    paths::data_file(LABELS_FILENAME)
}

/// Checks whether both files exist with plausible sizes.
#[must_use]
pub fn is_model_downloaded() -> bool {
    file_has_min_size(&model_path(), MIN_MODEL_SIZE_BYTES)
        && file_has_min_size(&labels_path(), MIN_LABELS_SIZE_BYTES)
}

fn file_has_min_size(path: &Path, min_size: u64) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => meta.len() >= min_size,
        Err(_) => false,
    }
}

/// Downloads the model and labels files unless they are already present.
///
/// `progress` receives values in `[0, 1]`. When a checksum is pinned the
/// model file is verified after download.
///
/// # Errors
///
/// Returns an error on HTTP failure, short reads, or checksum mismatch.
pub async fn ensure_model(mut progress: impl FnMut(f32) + Send) -> ClassifierResult<()> {
    if is_model_downloaded() {
        progress(1.0);
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(concat!("WildLens/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ClassifierError::DownloadFailed(e.to_string()))?;

    let model_path = model_path();
    download_file(
        &client,
        MODEL_URL,
        &model_path,
        MIN_MODEL_SIZE_BYTES,
        |p| progress(p * MODEL_PROGRESS_SHARE),
    )
    .await?;

    if let Some(expected) = MODEL_BLAKE3 {
        if let Err(e) = verify_checksum(&model_path, expected) {
            let _ = std::fs::remove_file(&model_path);
            return Err(e);
        }
    }

    download_file(
        &client,
        LABELS_URL,
        &labels_path(),
        MIN_LABELS_SIZE_BYTES,
        |p| progress(MODEL_PROGRESS_SHARE + p * (1.0 - MODEL_PROGRESS_SHARE)),
    )
    .await?;

    progress(1.0);
    Ok(())
}

/// Streams one file to disk, reporting fractional progress.
async fn download_file(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
    min_size: u64,
    mut progress: impl FnMut(f32),
) -> ClassifierResult<()> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ClassifierError::DownloadFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ClassifierError::DownloadFailed(format!(
            "HTTP status: {}",
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ClassifierError::Io(e.to_string()))?;
    }

    let mut file = std::fs::File::create(path).map_err(|e| ClassifierError::Io(e.to_string()))?;

    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                let _ = std::fs::remove_file(path);
                return Err(ClassifierError::DownloadFailed(e.to_string()));
            }
        };
        if let Err(e) = std::io::Write::write_all(&mut file, &chunk) {
            let _ = std::fs::remove_file(path);
            return Err(ClassifierError::Io(e.to_string()));
        }

        downloaded += chunk.len() as u64;

        if total_size > 0 {
            #[allow(clippy::cast_precision_loss)]
            progress(downloaded as f32 / total_size as f32);
        }
    }

    if downloaded < min_size {
        // Delete the incomplete/invalid file
        let _ = std::fs::remove_file(path);
        return Err(ClassifierError::DownloadFailed(format!(
            "Downloaded file too small ({downloaded} bytes) from {url}"
        )));
    }

    Ok(())
}

/// Verifies a file's integrity against a BLAKE3 hash.
///
/// # Errors
///
/// Returns an error when the file is missing, unreadable, or the hash does
/// not match.
pub fn verify_checksum(path: &Path, expected_hash: &str) -> ClassifierResult<()> {
    if !path.exists() {
        return Err(ClassifierError::ModelNotFound);
    }

    let file_data = std::fs::read(path).map_err(|e| ClassifierError::Io(e.to_string()))?;
    let actual_hash = blake3::hash(&file_data).to_hex().to_string();

    if actual_hash != expected_hash {
        return Err(ClassifierError::ChecksumMismatch {
            expected: expected_hash.to_string(),
            actual: actual_hash,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn paths_use_configured_filenames() {
        assert!(model_path().to_string_lossy().ends_with(MODEL_FILENAME));
        assert!(labels_path().to_string_lossy().ends_with(LABELS_FILENAME));
    }

    #[test]
    fn missing_file_fails_min_size_check() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.onnx");
        assert!(!file_has_min_size(&path, 1));
    }

    #[test]
    fn short_file_fails_min_size_check() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("short.onnx");
        std::fs::write(&path, b"tiny").expect("write");
        assert!(!file_has_min_size(&path, 1024));
        assert!(file_has_min_size(&path, 4));
    }

    #[test]
    fn verify_checksum_accepts_matching_hash() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.onnx");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(b"model bytes").expect("write");

        let expected = blake3::hash(b"model bytes").to_hex().to_string();
        assert!(verify_checksum(&path, &expected).is_ok());
    }

    #[test]
    fn verify_checksum_rejects_mismatch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"model bytes").expect("write");

        let result = verify_checksum(&path, "deadbeef");
        assert!(matches!(
            result,
            Err(ClassifierError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn verify_checksum_rejects_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.onnx");
        assert!(matches!(
            verify_checksum(&path, "00"),
            Err(ClassifierError::ModelNotFound)
        ));
    }
}

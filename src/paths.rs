// SPDX-License-Identifier: MPL-2.0
//! Application data directory resolution.
//!
//! Resolution order:
//! 1. Explicit override passed by tests.
//! 2. `--data-dir` CLI flag, registered once at startup.
//! 3. `WILDLENS_DATA_DIR` environment variable.
//! 4. Platform default via the `dirs` crate.
//!
//! Only the downloaded model and labels file live here; user preferences are
//! never persisted.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Directory name under the platform data directory.
const APP_NAME: &str = "WildLens";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "WILDLENS_DATA_DIR";

/// CLI override, set once at startup.
static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers the `--data-dir` CLI override.
///
/// Must be called at most once, before any path resolution.
pub fn init_cli_override(data_dir: Option<String>) {
    CLI_DATA_DIR
        .set(data_dir.map(PathBuf::from))
        .expect("CLI data dir override already initialized");
}

/// Returns the application data directory, if one can be resolved.
pub fn app_data_dir() -> Option<PathBuf> {
    if let Some(Some(dir)) = CLI_DATA_DIR.get() {
        return Some(dir.clone());
    }

    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }

    dirs::data_local_dir().map(|mut p| {
        p.push(APP_NAME);
        p
    })
}

/// Joins `filename` onto the data directory, falling back to the current
/// directory when no data directory can be resolved.
pub fn data_file(filename: &str) -> PathBuf {
    app_data_dir().map_or_else(
        || PathBuf::from(filename),
        |mut p| {
            p.push(filename);
            p
        },
    )
}

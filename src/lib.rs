// SPDX-License-Identifier: MPL-2.0
//! `wildlens` is a small desktop image identifier built with the Iced GUI
//! framework.
//!
//! A user picks an image or video file, a pretrained ImageNet model returns
//! the top-3 labels with confidence scores, and each label (or a free-text
//! query) can be looked up on Wikipedia. The interface supports light/dark
//! themes, five languages, and adjustable text and window sizes.

pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod i18n;
pub mod lookup;
pub mod media;
pub mod paths;
pub mod ui;

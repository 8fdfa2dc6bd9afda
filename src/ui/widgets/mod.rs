// SPDX-License-Identifier: MPL-2.0
//! Custom widgets drawn on a canvas.

pub mod spinner;

pub use spinner::AnimatedSpinner;

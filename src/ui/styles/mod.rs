// SPDX-License-Identifier: MPL-2.0
//! Style functions composing the design tokens into widget styles.

pub mod button;
pub mod container;
pub mod progress;

// SPDX-License-Identifier: MPL-2.0
//! Presentation layer: tokens, themes, styles, and reusable widgets.

pub mod design_tokens;
pub mod results;
pub mod styles;
pub mod theme;
pub mod widgets;

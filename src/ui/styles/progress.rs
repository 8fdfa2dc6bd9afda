// SPDX-License-Identifier: MPL-2.0
//! Confidence bar style for result rows.

use crate::ui::design_tokens::sizing;
use crate::ui::theme::ColorScheme;
use iced::widget::progress_bar;
use iced::{Background, Border, Theme};

/// Blue confidence bar on the tertiary surface track.
pub fn score_bar(scheme: &ColorScheme) -> impl Fn(&Theme) -> progress_bar::Style {
    let track = scheme.surface_tertiary;
    let bar = scheme.accent_info;
    move |_theme: &Theme| progress_bar::Style {
        background: Background::Color(track),
        bar: Background::Color(bar),
        border: Border {
            radius: (sizing::SCORE_BAR_HEIGHT / 2.0).into(),
            ..Border::default()
        },
    }
}

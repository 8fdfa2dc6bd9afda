// SPDX-License-Identifier: MPL-2.0
//! Centralized container styles.

use crate::ui::design_tokens::{opacity, palette, radius};
use crate::ui::theme::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Root window surface.
pub fn root(scheme: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let background = scheme.surface_primary;
    let text = scheme.text_primary;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(text),
        ..container::Style::default()
    }
}

/// Card holding the results list.
pub fn card(scheme: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    rounded(scheme.surface_secondary, scheme.text_primary, radius::LG)
}

/// Placeholder/loading panel on the initial screen.
pub fn placeholder(scheme: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    rounded(scheme.surface_tertiary, scheme.text_secondary, radius::LG)
}

/// Rounded search bar background.
pub fn search_bar(scheme: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    rounded(scheme.surface_tertiary, scheme.text_primary, radius::PILL)
}

/// Popup card shown above the scrim.
pub fn popup_card(scheme: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    rounded(scheme.surface_secondary, scheme.text_primary, radius::LG)
}

/// Dimming layer behind the popup.
pub fn scrim(_scheme: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SCRIM,
            ..palette::BLACK
        })),
        ..container::Style::default()
    }
}

/// Error banner across the top of the content area.
pub fn error_banner(scheme: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let background = scheme.accent_destructive;
    let text = scheme.button_text;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(text),
        border: Border {
            radius: radius::MD.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

fn rounded(
    background: Color,
    text: Color,
    corner_radius: f32,
) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(text),
        border: Border {
            radius: corner_radius.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

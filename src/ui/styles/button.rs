// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.
//!
//! Rounded corners come from `Border::radius`; drawing is composed here
//! instead of patching the toolkit's primitives.

use crate::ui::design_tokens::radius;
use crate::ui::theme::ColorScheme;
use iced::widget::button;
use iced::{Background, Border, Color, Shadow, Theme};

/// Primary action button (green pill). Pressed state darkens; the disabled
/// state falls back to the tertiary surface with muted text.
pub fn primary(scheme: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    accent_pill(
        scheme.accent_primary,
        scheme.accent_primary_pressed,
        scheme.button_text,
        scheme.surface_tertiary,
        scheme.text_secondary,
    )
}

/// Destructive action button (red pill), used for the reset action.
pub fn destructive(scheme: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    accent_pill(
        scheme.accent_destructive,
        scheme.accent_destructive_pressed,
        scheme.button_text,
        scheme.surface_tertiary,
        scheme.text_secondary,
    )
}

fn accent_pill(
    normal: Color,
    pressed: Color,
    text: Color,
    disabled_bg: Color,
    disabled_text: Color,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let (background, text_color) = match status {
            button::Status::Pressed => (pressed, text),
            button::Status::Disabled => (disabled_bg, disabled_text),
            button::Status::Active | button::Status::Hovered => (normal, text),
        };

        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                radius: radius::PILL.into(),
                ..Border::default()
            },
            shadow: Shadow::default(),
            snap: true,
        }
    }
}

/// Flat icon button that blends into its parent surface.
pub fn icon(scheme: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let text = scheme.text_primary;
    let hover_bg = scheme.surface_tertiary;
    move |_theme: &Theme, status: button::Status| {
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => {
                Some(Background::Color(hover_bg))
            }
            _ => None,
        };

        button::Style {
            background,
            text_color: text,
            border: Border {
                radius: radius::SM.into(),
                ..Border::default()
            },
            shadow: Shadow::default(),
            snap: true,
        }
    }
}

/// Clickable prediction row: invisible until hovered.
pub fn result_row(scheme: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let text = scheme.text_primary;
    let hover_bg = scheme.surface_tertiary;
    move |_theme: &Theme, status: button::Status| {
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => {
                Some(Background::Color(hover_bg))
            }
            _ => None,
        };

        button::Style {
            background,
            text_color: text,
            border: Border {
                radius: radius::MD.into(),
                ..Border::default()
            },
            shadow: Shadow::default(),
            snap: true,
        }
    }
}

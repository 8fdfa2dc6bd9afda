// SPDX-License-Identifier: MPL-2.0
//! Light/dark color schemes with explicit named roles.
//!
//! Each role is a struct field, so a missing color is a compile error rather
//! than a silent lookup failure. The tables are static data; only the active
//! selector ever changes at runtime.

use crate::ui::design_tokens::palette;
use iced::Color;

/// Complete set of color roles for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    // Surfaces
    pub surface_primary: Color,
    pub surface_secondary: Color,
    pub surface_tertiary: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,

    // Accents
    pub accent_info: Color,
    pub accent_primary: Color,
    pub accent_primary_pressed: Color,
    pub accent_destructive: Color,
    pub accent_destructive_pressed: Color,

    /// Text drawn on top of accent-colored buttons.
    pub button_text: Color,
}

impl ColorScheme {
    /// Light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::GRAY_050,
            surface_secondary: palette::WHITE,
            surface_tertiary: palette::GRAY_100,

            text_primary: palette::BLACK,
            text_secondary: palette::MUTED_LIGHT,

            accent_info: palette::BLUE_500,
            accent_primary: palette::GREEN_500,
            accent_primary_pressed: palette::GREEN_600,
            accent_destructive: palette::RED_500,
            accent_destructive_pressed: palette::RED_600,

            button_text: palette::WHITE,
        }
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::BLACK,
            surface_secondary: palette::GRAY_850,
            surface_tertiary: palette::GRAY_800,

            text_primary: palette::WHITE,
            text_secondary: palette::MUTED_DARK,

            accent_info: palette::BLUE_400,
            accent_primary: palette::GREEN_400,
            accent_primary_pressed: palette::GREEN_450,
            accent_destructive: palette::RED_400,
            accent_destructive_pressed: palette::RED_450,

            button_text: palette::WHITE,
        }
    }
}

/// Active theme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Detects the OS preference for the initial theme; defaults to light
    /// when detection fails.
    #[must_use]
    pub fn from_system() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    /// The opposite mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    /// Color scheme for this mode. Pure function of the mode.
    #[must_use]
    pub fn scheme(self) -> ColorScheme {
        match self {
            ThemeMode::Light => ColorScheme::light(),
            ThemeMode::Dark => ColorScheme::dark(),
        }
    }
}

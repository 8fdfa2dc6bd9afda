// SPDX-License-Identifier: MPL-2.0
//! Centralized design tokens: palette, opacity, spacing, radii, typography.
//!
//! Tokens are designed to be consistent; before changing one, check the
//! impact on every component that consumes it.

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale surfaces
    pub const WHITE: Color = Color::WHITE;
    pub const BLACK: Color = Color::BLACK;
    pub const GRAY_050: Color = Color::from_rgb(0.941, 0.941, 0.941); // #f0f0f0
    pub const GRAY_100: Color = Color::from_rgb(0.898, 0.898, 0.898); // #e5e5e5
    pub const GRAY_800: Color = Color::from_rgb(0.173, 0.173, 0.180); // #2c2c2e
    pub const GRAY_850: Color = Color::from_rgb(0.110, 0.110, 0.118); // #1c1c1e

    // Muted label grays
    pub const MUTED_LIGHT: Color = Color::from_rgb(0.541, 0.541, 0.557); // #8a8a8e
    pub const MUTED_DARK: Color = Color::from_rgb(0.553, 0.553, 0.573); // #8d8d92

    // Accent: blue (informational, progress bars)
    pub const BLUE_500: Color = Color::from_rgb(0.0, 0.478, 1.0); // #007aff
    pub const BLUE_400: Color = Color::from_rgb(0.039, 0.518, 1.0); // #0a84ff

    // Accent: green (primary action)
    pub const GREEN_500: Color = Color::from_rgb(0.204, 0.78, 0.349); // #34c759
    pub const GREEN_600: Color = Color::from_rgb(0.176, 0.643, 0.306); // #2da44e
    pub const GREEN_400: Color = Color::from_rgb(0.188, 0.82, 0.345); // #30d158
    pub const GREEN_450: Color = Color::from_rgb(0.157, 0.655, 0.271); // #28a745

    // Accent: red (destructive action, errors)
    pub const RED_500: Color = Color::from_rgb(1.0, 0.231, 0.188); // #ff3b30
    pub const RED_600: Color = Color::from_rgb(0.851, 0.204, 0.169); // #d9342b
    pub const RED_400: Color = Color::from_rgb(1.0, 0.271, 0.227); // #ff453a
    pub const RED_450: Color = Color::from_rgb(0.902, 0.224, 0.275); // #e63946
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    /// Scrim behind modal popups.
    pub const SCRIM: f32 = 0.5;
    /// Subtle track behind spinner arcs.
    pub const TRACK: f32 = 0.25;
}

// ============================================================================
// Spacing Scale (8px grid)
// ============================================================================

pub mod spacing {
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

// ============================================================================
// Border Radii
// ============================================================================

pub mod radius {
    pub const SM: f32 = 6.0;
    pub const MD: f32 = 10.0;
    pub const LG: f32 = 20.0;
    /// Fully rounded action buttons.
    pub const PILL: f32 = 25.0;
}

// ============================================================================
// Typography Scale (logical pixels before text-size scaling)
// ============================================================================

pub mod typography {
    pub const TITLE: f32 = 26.0;
    pub const SECTION: f32 = 15.0;
    pub const BUTTON: f32 = 14.0;
    pub const BODY: f32 = 13.0;
}

// ============================================================================
// Component Sizes
// ============================================================================

pub mod sizing {
    /// Side length of the result thumbnail.
    pub const THUMBNAIL: f32 = 60.0;
    /// Diameter of the loading spinner.
    pub const SPINNER: f32 = 48.0;
    /// Height of the confidence bars in result rows.
    pub const SCORE_BAR_HEIGHT: f32 = 8.0;
    /// Height of the rounded action buttons.
    pub const BUTTON_HEIGHT: f32 = 50.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_monotonic() {
        assert!(spacing::XS < spacing::SM);
        assert!(spacing::SM < spacing::MD);
        assert!(spacing::MD < spacing::LG);
        assert!(spacing::LG < spacing::XL);
    }

    #[test]
    fn accent_colors_are_saturated() {
        assert!(palette::GREEN_500.g > palette::GREEN_500.r);
        assert!(palette::RED_500.r > palette::RED_500.g);
        assert!(palette::BLUE_500.b > palette::BLUE_500.r);
    }
}

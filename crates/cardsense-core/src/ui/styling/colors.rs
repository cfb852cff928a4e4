//! Color definitions and palette management
//!
//! Colors are RGB565, the native format of 16-bit embedded displays.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Base Colors
// ============================================================================

/// Screen background - near-black slate
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(20 >> 3, 22 >> 2, 30 >> 3);

/// Card and panel surface - slightly lighter than background
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(34 >> 3, 38 >> 2, 52 >> 3);

/// Border/stroke color - medium gray
pub const COLOR_STROKE: Rgb565 = Rgb565::new(70 >> 3, 76 >> 2, 92 >> 3);

/// Accent for buttons and the avatar ring - muted violet
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(103 >> 3, 80 >> 2, 164 >> 3);

/// Secondary accent - teal
pub const COLOR_ACCENT_SECONDARY: Rgb565 = Rgb565::new(76 >> 3, 154 >> 2, 150 >> 3);

/// Warning/absent capability - muted red
pub const COLOR_WARNING: Rgb565 = Rgb565::new(190 >> 3, 95 >> 2, 95 >> 3);

// ============================================================================
// Text Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Medium gray - for roles and captions
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

// ============================================================================
// Color Palette
// ============================================================================

/// A cohesive color palette for consistent UI theming.
///
/// # Examples
///
/// ```ignore
/// let palette = ColorPalette::default();
/// let accent = palette.primary;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    /// Primary accent color - used for key interactive elements
    pub primary: Rgb565,

    /// Secondary accent color - used for less prominent actions
    pub secondary: Rgb565,

    /// Main background color
    pub background: Rgb565,

    /// Surface color for cards, panels, and the die body
    pub surface: Rgb565,

    /// Color for warnings such as a missing sensor
    pub warning: Rgb565,

    /// Primary text color - high contrast
    pub text_primary: Rgb565,

    /// Secondary text color - lower contrast for less important information
    pub text_secondary: Rgb565,

    /// Border color for separators and outlines
    pub border: Rgb565,
}

impl Default for ColorPalette {
    /// Returns the default dark theme palette
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorPalette {
    /// Dark theme: light text on dark backgrounds.
    pub fn dark() -> Self {
        Self {
            primary: COLOR_ACCENT,
            secondary: COLOR_ACCENT_SECONDARY,
            background: COLOR_BACKGROUND,
            surface: COLOR_SURFACE,
            warning: COLOR_WARNING,
            text_primary: WHITE,
            text_secondary: GRAY,
            border: COLOR_STROKE,
        }
    }
}

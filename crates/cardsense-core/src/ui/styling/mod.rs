//! Styling primitives: colors, palettes, and element styles
//!
//! All colors are RGB565. Components derive their concrete [`Style`] from a
//! [`ColorPalette`], so switching palette restyles every screen:
//!
//! ```ignore
//! let palette = ColorPalette::default();
//! let button_style = ButtonVariant::Primary.to_style(&palette);
//! ```

pub mod colors;
pub mod style;

pub use colors::{
    COLOR_ACCENT, COLOR_BACKGROUND, COLOR_STROKE, COLOR_SURFACE, ColorPalette, GRAY, WHITE,
};
pub use style::{ButtonVariant, Padding, Style};

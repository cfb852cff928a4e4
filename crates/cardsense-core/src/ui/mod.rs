//! cardsense UI system - a small retained-mode toolkit for embedded displays
//!
//! This module provides:
//! - Core traits for drawable and touchable elements
//! - Styled components (buttons, text)
//! - Colors and per-variant styles

pub mod components;
pub mod core;
pub mod styling;

// Re-export commonly used items
pub use components::{Button, TextComponent, TextSize};
pub use self::core::{Action, Drawable, PageId, TouchEvent, TouchPoint, TouchResult, Touchable};
pub use styling::{ButtonVariant, ColorPalette, Padding, Style};

/// Display width in pixels (portrait orientation).
pub const DISPLAY_WIDTH_PX: u16 = 240;

/// Display height in pixels (portrait orientation).
pub const DISPLAY_HEIGHT_PX: u16 = 320;

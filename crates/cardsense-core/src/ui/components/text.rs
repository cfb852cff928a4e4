//! Text component for displaying a single styled line

use crate::ui::core::Drawable;
use crate::ui::styling::Style;
use core::fmt;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text as EgText, TextStyleBuilder};

/// Maximum text length in bytes.
pub const MAX_TEXT_LEN: usize = 64;

/// Text size variants
///
/// - `Small`: 5x8 font
/// - `Medium`: 6x10 font (default)
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &embedded_graphics::mono_font::ascii::FONT_5X8,
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &embedded_graphics::mono_font::ascii::FONT_10X20,
        }
    }
}

/// Single line of styled text
///
/// Marks itself dirty only when its content actually changes, so pages can
/// call [`TextComponent::set_text`] on every update pass.
///
/// # Examples
/// ```ignore
/// let text = TextComponent::new(
///     Rectangle::new(Point::new(16, 60), Size::new(208, 20)),
///     "Proximity: 0.0",
///     TextSize::Medium,
/// )
/// .with_alignment(Alignment::Left);
/// ```
pub struct TextComponent {
    bounds: Rectangle,
    text: heapless::String<MAX_TEXT_LEN>,
    size: TextSize,
    alignment: Alignment,
    style: Style,
    dirty: bool,
}

impl TextComponent {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        let mut component = Self {
            bounds,
            text: heapless::String::new(),
            size,
            alignment: Alignment::Left,
            style: Style::default(),
            dirty: true,
        };
        component.push_truncated(text);
        component
    }

    /// Set the text alignment (Left, Center, or Right).
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace the text, marking the component dirty if it changed.
    ///
    /// Text past [`MAX_TEXT_LEN`] bytes is cut at a character boundary.
    pub fn set_text(&mut self, text: &str) {
        if self.text.as_str() != text {
            self.text.clear();
            self.push_truncated(text);
            self.dirty = true;
        }
    }

    /// Replace the text with formatted output.
    pub fn set_fmt(&mut self, args: fmt::Arguments<'_>) {
        let mut formatted = heapless::String::<MAX_TEXT_LEN>::new();
        // Overflow just truncates the line.
        fmt::write(&mut formatted, args).ok();
        self.set_text(&formatted);
    }

    /// Get the current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn push_truncated(&mut self, text: &str) {
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
    }

    fn text_position(&self) -> Point {
        let top = self.bounds.top_left.y + self.style.padding.top as i32;
        match self.alignment {
            Alignment::Left => Point::new(
                self.bounds.top_left.x + self.style.padding.left as i32,
                top,
            ),
            Alignment::Center => Point::new(self.bounds.center().x, top),
            Alignment::Right => Point::new(
                self.bounds.top_left.x + self.bounds.size.width as i32
                    - self.style.padding.right as i32,
                top,
            ),
        }
    }
}

impl Drawable for TextComponent {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.style.background_color.is_some() {
            self.bounds
                .into_styled(self.style.to_primitive_style())
                .draw(display)?;
        }

        let text_color = self.style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(self.size.font(), text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        EgText::with_text_style(&self.text, self.text_position(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(initial: &str) -> TextComponent {
        TextComponent::new(
            Rectangle::new(Point::zero(), Size::new(200, 20)),
            initial,
            TextSize::Medium,
        )
    }

    #[test]
    fn unchanged_text_stays_clean() {
        let mut component = text("Proximity: 0.0");
        component.mark_clean();

        component.set_text("Proximity: 0.0");
        assert!(!component.is_dirty());

        component.set_text("Proximity: 5.0");
        assert!(component.is_dirty());
        assert_eq!(component.text(), "Proximity: 5.0");
    }

    #[test]
    fn formatted_text() {
        let mut component = text("");
        component.set_fmt(format_args!("Light Level: {}", 12));
        assert_eq!(component.text(), "Light Level: 12");
    }

    #[test]
    fn long_text_is_truncated() {
        let long = "x".repeat(MAX_TEXT_LEN + 10);
        let component = text(&long);
        assert_eq!(component.text().len(), MAX_TEXT_LEN);
    }
}

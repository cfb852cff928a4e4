//! Button component with visual variants and pressed state

use crate::ui::core::{Action, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::{ButtonVariant, ColorPalette, Style};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment as TextAlignment, Baseline, Text, TextStyleBuilder};

/// Button state
#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonState {
    Normal,
    Pressed,
}

/// Button component with label and action
///
/// Triggers its action immediately on press and shows a darkened background
/// while pressed. Call [`Button::release`] to restore the normal look.
///
/// # Examples
/// ```ignore
/// let button = Button::new(
///     Rectangle::new(Point::new(20, 240), Size::new(200, 36)),
///     "Roll a Dice",
///     Action::NavigateToPage(PageId::Dice),
/// )
/// .with_variant(ButtonVariant::Primary);
/// ```
pub struct Button {
    bounds: Rectangle,
    label: heapless::String<32>,
    action: Action,
    state: ButtonState,
    variant: ButtonVariant,
    palette: ColorPalette,
    border_radius: u32,
    dirty: bool,
}

impl Button {
    /// Create a new button. Labels longer than 32 bytes are dropped.
    pub fn new(bounds: Rectangle, label: &str, action: Action) -> Self {
        let mut label_string = heapless::String::new();
        label_string.push_str(label).ok();

        Self {
            bounds,
            label: label_string,
            action,
            state: ButtonState::Normal,
            variant: ButtonVariant::Primary,
            palette: ColorPalette::default(),
            border_radius: 8,
            dirty: true,
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self.dirty = true;
        self
    }

    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self.dirty = true;
        self
    }

    /// Set the border radius for rounded corners. Default is 8 pixels.
    pub fn with_border_radius(mut self, radius: u32) -> Self {
        self.border_radius = radius;
        self.dirty = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the action that will be triggered when the button is pressed.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Return to the unpressed look, e.g. when the page is shown again.
    pub fn release(&mut self) {
        if self.state != ButtonState::Normal {
            self.state = ButtonState::Normal;
            self.dirty = true;
        }
    }

    fn get_style(&self) -> Style {
        let base_style = self.variant.to_style(&self.palette);

        match self.state {
            ButtonState::Normal => base_style,
            ButtonState::Pressed => {
                // Darken the background for pressed state
                let bg = base_style.background_color.unwrap_or(self.palette.primary);
                let darkened = Rgb565::new(
                    bg.r().saturating_sub(4),
                    bg.g().saturating_sub(8),
                    bg.b().saturating_sub(4),
                );
                base_style.with_background(darkened)
            }
        }
    }
}

impl Drawable for Button {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let style = self.get_style();

        let corner_radius = Size::new(self.border_radius, self.border_radius);
        RoundedRectangle::with_equal_corners(self.bounds, corner_radius)
            .into_styled(style.to_primitive_style())
            .draw(display)?;

        let text_color = style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(&FONT_6X10, text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(TextAlignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(&self.label, self.bounds.center(), character_style, text_style)
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

impl Touchable for Button {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                self.state = ButtonState::Pressed;
                self.dirty = true;

                // Trigger action immediately on press
                TouchResult::Action(self.action)
            }
            TouchEvent::Press(_) => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::core::PageId;

    fn button() -> Button {
        Button::new(
            Rectangle::new(Point::new(10, 10), Size::new(100, 30)),
            "Roll a Dice",
            Action::NavigateToPage(PageId::Dice),
        )
    }

    #[test]
    fn press_inside_triggers_action() {
        let mut button = button();
        button.mark_clean();

        let result = button.handle_touch(TouchEvent::Press(TouchPoint::new(20, 20)));

        assert_eq!(result, TouchResult::Action(Action::NavigateToPage(PageId::Dice)));
        assert!(button.is_dirty());
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut button = button();
        let result = button.handle_touch(TouchEvent::Press(TouchPoint::new(200, 200)));
        assert_eq!(result, TouchResult::NotHandled);
    }

    #[test]
    fn release_restores_normal_state() {
        let mut button = button();
        button.handle_touch(TouchEvent::Press(TouchPoint::new(20, 20)));
        button.mark_clean();

        button.release();
        assert!(button.is_dirty());

        button.mark_clean();
        button.release();
        assert!(!button.is_dirty());
    }
}

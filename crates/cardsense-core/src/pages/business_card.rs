//! Business card page
//!
//! Static profile: avatar placeholder, name, role, contact lines, and the two
//! buttons leading to the sensor-driven pages.

use alloc::string::String;
use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::{
    Drawable as EgDrawable,
    pixelcolor::Rgb565,
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::Alignment,
};

use crate::config::CardProfile;
use crate::pages::constants::{
    AVATAR_DIAMETER_PX, AVATAR_RING_WIDTH_PX, AVATAR_TOP_PX, BUTTON_GAP_PX, BUTTON_HEIGHT_PX,
    BUTTON_WIDTH_PX, CARD_BUTTONS_TOP_PX, CONTACT_ROW_HEIGHT_PX, CONTACTS_TOP_PX, NAME_TOP_PX,
    PAGE_MARGIN_PX, ROLE_TOP_PX, TEXT_ROW_HEIGHT_PX, TITLE_ROW_HEIGHT_PX,
};
use crate::pages::page::Page;
use crate::pages::{centered_row, screen_bounds};
use crate::ui::{
    Action, Button, ButtonVariant, ColorPalette, Drawable, PageId, Style, TextComponent,
    TextSize, TouchEvent, TouchResult, Touchable,
};

/// Bounds of the "View Sensor Data" button on a full-screen card.
pub fn sensors_button_bounds() -> Rectangle {
    centered_row(
        screen_bounds(),
        CARD_BUTTONS_TOP_PX,
        Size::new(BUTTON_WIDTH_PX, BUTTON_HEIGHT_PX),
    )
}

/// Bounds of the "Roll a Dice" button on a full-screen card.
pub fn dice_button_bounds() -> Rectangle {
    centered_row(
        screen_bounds(),
        CARD_BUTTONS_TOP_PX + (BUTTON_HEIGHT_PX + BUTTON_GAP_PX) as i32,
        Size::new(BUTTON_WIDTH_PX, BUTTON_HEIGHT_PX),
    )
}

pub struct BusinessCardPage {
    bounds: Rectangle,
    palette: ColorPalette,
    avatar: Circle,
    initials: TextComponent,
    name: TextComponent,
    role: TextComponent,
    contacts: [TextComponent; 3],
    sensors_button: Button,
    dice_button: Button,
    dirty: bool,
}

impl BusinessCardPage {
    pub fn new(bounds: Rectangle, profile: &CardProfile<'_>) -> Self {
        let palette = ColorPalette::default();
        let content_width = bounds.size.width - 2 * PAGE_MARGIN_PX;

        let avatar_box = centered_row(
            bounds,
            AVATAR_TOP_PX,
            Size::new(AVATAR_DIAMETER_PX, AVATAR_DIAMETER_PX),
        );
        let avatar = Circle::new(avatar_box.top_left, AVATAR_DIAMETER_PX);

        let initials_box = Rectangle::new(
            Point::new(
                avatar_box.top_left.x,
                avatar.center().y - TITLE_ROW_HEIGHT_PX as i32 / 3,
            ),
            Size::new(AVATAR_DIAMETER_PX, TITLE_ROW_HEIGHT_PX),
        );
        let initials = TextComponent::new(initials_box, &profile.initials(), TextSize::Large)
            .with_alignment(Alignment::Center);

        let row = |top: i32, height: u32| {
            centered_row(bounds, top, Size::new(content_width, height))
        };

        let name = TextComponent::new(
            row(NAME_TOP_PX, TEXT_ROW_HEIGHT_PX),
            &profile.full_name(),
            TextSize::Large,
        )
        .with_alignment(Alignment::Center);

        let role = TextComponent::new(
            row(ROLE_TOP_PX, TEXT_ROW_HEIGHT_PX),
            &profile.role,
            TextSize::Medium,
        )
        .with_alignment(Alignment::Center)
        .with_style(Style::new().with_foreground(palette.text_secondary));

        let mut phone = String::new();
        let mut email = String::new();
        // Writing into a String cannot fail.
        write!(phone, "Tel: {}", profile.phone_number).ok();
        write!(email, "Mail: {}", profile.email).ok();
        let mut twitter = String::from("Twitter: ");
        twitter.push_str(&profile.twitter_handle());

        let contact = |index: u32, text: &str| {
            TextComponent::new(
                row(
                    CONTACTS_TOP_PX + (index * CONTACT_ROW_HEIGHT_PX) as i32,
                    CONTACT_ROW_HEIGHT_PX,
                ),
                text,
                TextSize::Medium,
            )
            .with_alignment(Alignment::Center)
        };
        let contacts = [contact(0, &phone), contact(1, &email), contact(2, &twitter)];

        let sensors_button = Button::new(
            centered_row(
                bounds,
                CARD_BUTTONS_TOP_PX,
                Size::new(BUTTON_WIDTH_PX, BUTTON_HEIGHT_PX),
            ),
            "View Sensor Data",
            Action::NavigateToPage(PageId::Sensors),
        )
        .with_palette(palette);

        let dice_button = Button::new(
            centered_row(
                bounds,
                CARD_BUTTONS_TOP_PX + (BUTTON_HEIGHT_PX + BUTTON_GAP_PX) as i32,
                Size::new(BUTTON_WIDTH_PX, BUTTON_HEIGHT_PX),
            ),
            "Roll a Dice",
            Action::NavigateToPage(PageId::Dice),
        )
        .with_variant(ButtonVariant::Secondary)
        .with_palette(palette);

        Self {
            bounds,
            palette,
            avatar,
            initials,
            name,
            role,
            contacts,
            sensors_button,
            dice_button,
            dirty: true,
        }
    }

    pub fn name_text(&self) -> &str {
        self.name.text()
    }

    pub fn contact_lines(&self) -> [&str; 3] {
        [
            self.contacts[0].text(),
            self.contacts[1].text(),
            self.contacts[2].text(),
        ]
    }
}

impl Page for BusinessCardPage {
    fn id(&self) -> PageId {
        PageId::BusinessCard
    }

    fn title(&self) -> &str {
        "Business Card"
    }

    fn on_activate(&mut self) {
        self.sensors_button.release();
        self.dice_button.release();
        self.dirty = true;
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        for button in [&mut self.sensors_button, &mut self.dice_button] {
            match button.handle_touch(event) {
                TouchResult::Action(action) => return Some(action),
                TouchResult::Handled | TouchResult::NotHandled => {}
            }
        }
        None
    }

    fn update(&mut self) {}

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        Drawable::draw(self, display)
    }

    fn bounds(&self) -> Rectangle {
        Drawable::bounds(self)
    }

    fn is_dirty(&self) -> bool {
        Drawable::is_dirty(self)
    }

    fn mark_clean(&mut self) {
        Drawable::mark_clean(self)
    }

    fn mark_dirty(&mut self) {
        Drawable::mark_dirty(self)
    }
}

impl Drawable for BusinessCardPage {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.palette.background))
            .draw(display)?;

        self.avatar
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .fill_color(self.palette.surface)
                    .stroke_color(self.palette.primary)
                    .stroke_width(AVATAR_RING_WIDTH_PX)
                    .build(),
            )
            .draw(display)?;
        self.initials.draw(display)?;

        self.name.draw(display)?;
        self.role.draw(display)?;
        for line in &self.contacts {
            line.draw(display)?;
        }

        self.sensors_button.draw(display)?;
        self.dice_button.draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.sensors_button.is_dirty() || self.dice_button.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.initials.mark_clean();
        self.name.mark_clean();
        self.role.mark_clean();
        for line in &mut self.contacts {
            line.mark_clean();
        }
        self.sensors_button.mark_clean();
        self.dice_button.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::TouchPoint;

    fn press_center(rect: Rectangle) -> TouchEvent {
        let center = rect.center();
        TouchEvent::Press(TouchPoint::new(center.x as u16, center.y as u16))
    }

    #[test]
    fn shows_profile_text() {
        let page = BusinessCardPage::new(screen_bounds(), &CardProfile::default());

        assert_eq!(page.name_text(), "Aryendra Pratap Singh");
        assert_eq!(
            page.contact_lines(),
            [
                "Tel: +1 (123) 456-7890",
                "Mail: aryendraps18@gmail.com",
                "Twitter: @aryendraps18",
            ]
        );
    }

    #[test]
    fn buttons_navigate_to_sensor_pages() {
        let mut page = BusinessCardPage::new(screen_bounds(), &CardProfile::default());

        assert_eq!(
            page.handle_touch(press_center(sensors_button_bounds())),
            Some(Action::NavigateToPage(PageId::Sensors))
        );
        assert_eq!(
            page.handle_touch(press_center(dice_button_bounds())),
            Some(Action::NavigateToPage(PageId::Dice))
        );
        assert_eq!(
            page.handle_touch(TouchEvent::Press(TouchPoint::new(5, 5))),
            None
        );
    }

    #[test]
    fn draws_avatar_ring_and_clears_dirty() {
        let mut page = BusinessCardPage::new(screen_bounds(), &CardProfile::default());
        let mut display = FrameBuffer::new();

        page.draw_page(&mut display).unwrap();
        Page::mark_clean(&mut page);

        let ring = Rectangle::new(
            Point::new(0, AVATAR_TOP_PX),
            Size::new(screen_bounds().size.width, AVATAR_DIAMETER_PX),
        );
        assert!(display.count_color(&ring, ColorPalette::default().primary) > 0);
        assert!(!Page::is_dirty(&page));
    }
}

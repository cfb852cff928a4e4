pub mod business_card;
pub mod constants;
pub mod dice;
pub mod page;
pub mod page_manager;
pub mod sensors;

pub use business_card::BusinessCardPage;
pub use dice::DicePage;
pub use page::{Page, PageWrapper};
pub use page_manager::PageManager;
pub use sensors::SensorPage;

use crate::ui::core::Action;
use crate::ui::{Button, ButtonVariant, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use constants::{BACK_BUTTON_TOP_PX, BUTTON_HEIGHT_PX, BUTTON_WIDTH_PX};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Full-screen bounding rectangle.
pub fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
    )
}

/// Rectangle of the given size centred horizontally in `bounds` at `top`.
pub(crate) fn centered_row(bounds: Rectangle, top: i32, size: Size) -> Rectangle {
    let x = bounds.top_left.x + (bounds.size.width as i32 - size.width as i32) / 2;
    Rectangle::new(Point::new(x, bounds.top_left.y + top), size)
}

/// Outline button at the bottom of sensor-driven pages.
pub(crate) fn back_button(bounds: Rectangle) -> Button {
    Button::new(
        centered_row(
            bounds,
            BACK_BUTTON_TOP_PX,
            Size::new(BUTTON_WIDTH_PX, BUTTON_HEIGHT_PX),
        ),
        "Back",
        Action::GoBack,
    )
    .with_variant(ButtonVariant::Outline)
}

//! Dice page
//!
//! Shows the ambient light level and a die whose face is derived from it.
//! The face is recomputed from the latest reading on every draw.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use embedded_graphics::text::Alignment;

use crate::dice::DiceFace;
use crate::format::Reading;
use crate::pages::constants::{
    DICE_CAPTION_TOP_PX, DIE_CORNER_RADIUS_PX, DIE_SIZE_PX, DIE_TOP_PX, PAGE_MARGIN_PX,
    PIP_DIAMETER_PX, PIP_SPACING_PX, TEXT_ROW_HEIGHT_PX,
};
use crate::pages::page::Page;
use crate::pages::{back_button, centered_row};
use crate::sensors::{SensorKind, SensorService};
use crate::state::{ChannelBinding, ObservableFloat, ObservableReader, SensorSubscription};
use crate::ui::{
    Action, Button, ColorPalette, Drawable, PageId, TextComponent, TextSize, TouchEvent,
    TouchResult, Touchable,
};

pub struct DicePage<S: SensorService + Clone> {
    bounds: Rectangle,
    palette: ColorPalette,
    service: S,
    subscription: Option<SensorSubscription<S>>,
    light: ObservableReader,
    caption: TextComponent,
    die: Rectangle,
    back_button: Button,
    dirty: bool,
}

impl<S: SensorService + Clone> DicePage<S> {
    pub fn new(bounds: Rectangle, service: S) -> Self {
        let palette = ColorPalette::default();
        let caption = TextComponent::new(
            centered_row(
                bounds,
                DICE_CAPTION_TOP_PX,
                Size::new(bounds.size.width - 2 * PAGE_MARGIN_PX, TEXT_ROW_HEIGHT_PX),
            ),
            "",
            TextSize::Large,
        )
        .with_alignment(Alignment::Center);

        let mut page = Self {
            bounds,
            palette,
            service,
            subscription: None,
            light: ObservableFloat::shared("light").watch(),
            caption,
            die: centered_row(bounds, DIE_TOP_PX, Size::new(DIE_SIZE_PX, DIE_SIZE_PX)),
            back_button: back_button(bounds).with_palette(palette),
            dirty: true,
        };
        page.refresh_caption();
        page
    }

    /// Latest light level in lux.
    pub fn light_level(&self) -> f32 {
        self.light.peek()
    }

    /// Face for the current light level.
    pub fn face(&self) -> DiceFace {
        DiceFace::from_light_level(self.light.peek())
    }

    pub fn caption(&self) -> &str {
        self.caption.text()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Area covered by the die body.
    pub fn die_bounds(&self) -> Rectangle {
        self.die
    }

    fn refresh_caption(&mut self) {
        if let Some(lux) = self.light.poll() {
            self.caption
                .set_fmt(format_args!("Light Level: {}", Reading(lux)));
        }
    }

    fn draw_die<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let body_style = PrimitiveStyleBuilder::new()
            .fill_color(self.palette.surface)
            .stroke_color(self.palette.border)
            .stroke_width(2)
            .build();
        RoundedRectangle::with_equal_corners(
            self.die,
            Size::new(DIE_CORNER_RADIUS_PX, DIE_CORNER_RADIUS_PX),
        )
        .into_styled(body_style)
        .draw(display)?;

        let pip_style = PrimitiveStyleBuilder::new()
            .fill_color(self.palette.text_primary)
            .build();
        let center = self.die.center();
        for (column, row) in self.face().pips() {
            let offset = Point::new(
                *column as i32 * PIP_SPACING_PX,
                *row as i32 * PIP_SPACING_PX,
            );
            Circle::with_center(center + offset, PIP_DIAMETER_PX)
                .into_styled(pip_style)
                .draw(display)?;
        }
        Ok(())
    }
}

impl<S: SensorService + Clone> Page for DicePage<S> {
    fn id(&self) -> PageId {
        PageId::Dice
    }

    fn title(&self) -> &str {
        "Roll a Dice"
    }

    fn on_activate(&mut self) {
        self.subscription = None;
        self.light.cell().reset();
        self.subscription = Some(SensorSubscription::activate(
            self.service.clone(),
            &[ChannelBinding::new(SensorKind::Light, self.light.cell())],
        ));
        self.back_button.release();
        self.refresh_caption();
        self.dirty = true;
    }

    fn on_deactivate(&mut self) {
        self.subscription = None;
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self.back_button.handle_touch(event) {
            TouchResult::Action(action) => Some(action),
            TouchResult::Handled | TouchResult::NotHandled => None,
        }
    }

    fn update(&mut self) {
        self.refresh_caption();
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        display.fill_solid(&self.bounds, self.palette.background)?;
        self.caption.draw(display)?;
        self.draw_die(display)?;
        self.back_button.draw(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.caption.is_dirty() || self.back_button.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.caption.mark_clean();
        self.back_button.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::pages::screen_bounds;
    use crate::sensors::SimulatedSensorService;
    use alloc::sync::Arc;

    type Service = Arc<SimulatedSensorService>;

    fn active_page(service: &Service) -> DicePage<Service> {
        let mut page = DicePage::new(screen_bounds(), service.clone());
        page.on_activate();
        page
    }

    fn pip_pixels(page: &mut DicePage<Service>) -> usize {
        let mut display = FrameBuffer::new();
        page.draw_page(&mut display).unwrap();
        display.count_color(&page.die_bounds(), ColorPalette::default().text_primary)
    }

    #[test]
    fn binds_light_only() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let page = active_page(&service);

        assert!(page.is_subscribed());
        assert_eq!(service.listener_count_for(SensorKind::Light), 1);
        assert_eq!(service.listener_count(), 1);
    }

    #[test]
    fn face_follows_light_level() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let mut page = active_page(&service);
        assert_eq!(page.face(), DiceFace::One);
        assert_eq!(page.caption(), "Light Level: 0.0");

        service.emit(SensorKind::Light, 321.7);
        assert_eq!(page.face(), DiceFace::Four);

        page.update();
        assert_eq!(page.caption(), "Light Level: 321.7");
        assert!(page.is_dirty());
    }

    #[test]
    fn drawn_pips_match_the_face() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let mut page = active_page(&service);

        let one = pip_pixels(&mut page);
        service.emit(SensorKind::Light, 5.0);
        page.update();
        let six = pip_pixels(&mut page);

        assert!(one > 0);
        assert_eq!(six, one * 6);
    }

    #[test]
    fn no_light_sensor_shows_face_one() {
        let service = Arc::new(SimulatedSensorService::new().with_sensor(SensorKind::Proximity));
        let mut page = active_page(&service);

        service.emit(SensorKind::Light, 3.0);
        page.update();

        assert_eq!(service.listener_count(), 0);
        assert_eq!(page.face(), DiceFace::One);
        assert_eq!(page.caption(), "Light Level: 0.0");
    }

    #[test]
    fn deactivation_freezes_the_face() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let mut page = active_page(&service);
        service.emit(SensorKind::Light, 2.0);
        page.on_deactivate();
        service.emit(SensorKind::Light, 4.0);

        assert!(!page.is_subscribed());
        assert_eq!(page.face(), DiceFace::Three);
        assert_eq!(page.light_level(), 2.0);
    }
}

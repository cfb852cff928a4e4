//! Sensor readout page
//!
//! Shows the ambient light level, the proximity distance, and whether the
//! device has a magnetometer. Light and proximity are bound through a
//! [`SensorSubscription`] that lives exactly as long as the page is active.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Alignment;
use log::debug;

use crate::format::Reading;
use crate::pages::constants::{
    PAGE_MARGIN_PX, READING_ROW_STRIDE_PX, READINGS_TOP_PX, TEXT_ROW_HEIGHT_PX,
    TITLE_ROW_HEIGHT_PX,
};
use crate::pages::page::Page;
use crate::pages::{back_button, centered_row};
use crate::sensors::{SensorKind, SensorService};
use crate::state::{ChannelBinding, ObservableFloat, ObservableReader, SensorSubscription};
use crate::ui::{
    Action, Button, ColorPalette, Drawable, PageId, Style, TextComponent, TextSize, TouchEvent,
    TouchResult, Touchable,
};

const MAGNETOMETER_PRESENT: &str = "There's a magnetometer.";
const MAGNETOMETER_ABSENT: &str = "No magnetometer found.";

pub struct SensorPage<S: SensorService + Clone> {
    bounds: Rectangle,
    palette: ColorPalette,
    service: S,
    subscription: Option<SensorSubscription<S>>,
    light: ObservableReader,
    proximity: ObservableReader,
    has_magnetometer: bool,
    title: TextComponent,
    light_text: TextComponent,
    proximity_text: TextComponent,
    magnetometer_text: TextComponent,
    back_button: Button,
    dirty: bool,
}

impl<S: SensorService + Clone> SensorPage<S> {
    pub fn new(bounds: Rectangle, service: S) -> Self {
        let palette = ColorPalette::default();
        let row_size = Size::new(bounds.size.width - 2 * PAGE_MARGIN_PX, TEXT_ROW_HEIGHT_PX);
        let row = |index: i32| {
            centered_row(bounds, READINGS_TOP_PX + index * READING_ROW_STRIDE_PX, row_size)
        };

        let title = TextComponent::new(
            centered_row(
                bounds,
                PAGE_MARGIN_PX as i32,
                Size::new(row_size.width, TITLE_ROW_HEIGHT_PX),
            ),
            "Sensor Data",
            TextSize::Large,
        )
        .with_alignment(Alignment::Center)
        .with_style(Style::new().with_foreground(palette.primary));

        let mut page = Self {
            bounds,
            palette,
            service,
            subscription: None,
            light: ObservableFloat::shared("light").watch(),
            proximity: ObservableFloat::shared("proximity").watch(),
            has_magnetometer: false,
            title,
            light_text: TextComponent::new(row(0), "", TextSize::Medium),
            proximity_text: TextComponent::new(row(1), "", TextSize::Medium),
            magnetometer_text: TextComponent::new(row(2), MAGNETOMETER_ABSENT, TextSize::Medium)
                .with_style(Style::new().with_foreground(palette.text_secondary)),
            back_button: back_button(bounds).with_palette(palette),
            dirty: true,
        };
        page.refresh_readings();
        page
    }

    /// Latest light level in lux.
    pub fn light_level(&self) -> f32 {
        self.light.peek()
    }

    /// Latest proximity distance in centimetres.
    pub fn proximity(&self) -> f32 {
        self.proximity.peek()
    }

    /// Magnetometer presence, sampled when the page was last activated.
    pub fn has_magnetometer(&self) -> bool {
        self.has_magnetometer
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn light_line(&self) -> &str {
        self.light_text.text()
    }

    pub fn proximity_line(&self) -> &str {
        self.proximity_text.text()
    }

    pub fn magnetometer_line(&self) -> &str {
        self.magnetometer_text.text()
    }

    fn refresh_readings(&mut self) {
        if let Some(lux) = self.light.poll() {
            self.light_text
                .set_fmt(format_args!("Current Light Level: {}", Reading(lux)));
        }
        if let Some(distance) = self.proximity.poll() {
            self.proximity_text
                .set_fmt(format_args!("Proximity: {}", Reading(distance)));
        }
    }
}

impl<S: SensorService + Clone> Page for SensorPage<S> {
    fn id(&self) -> PageId {
        PageId::Sensors
    }

    fn title(&self) -> &str {
        "Sensor Data"
    }

    fn on_activate(&mut self) {
        // Release before re-registering so the service never sees both.
        self.subscription = None;
        self.light.cell().reset();
        self.proximity.cell().reset();

        self.has_magnetometer = self
            .service
            .default_sensor(SensorKind::MagneticField)
            .is_some();
        self.magnetometer_text.set_text(if self.has_magnetometer {
            MAGNETOMETER_PRESENT
        } else {
            MAGNETOMETER_ABSENT
        });

        let bindings = [
            ChannelBinding::new(SensorKind::Light, self.light.cell()),
            ChannelBinding::new(SensorKind::Proximity, self.proximity.cell()),
        ];
        self.subscription = Some(SensorSubscription::activate(
            self.service.clone(),
            &bindings,
        ));
        debug!(
            "Sensor page active, magnetometer present: {}",
            self.has_magnetometer
        );

        self.back_button.release();
        self.refresh_readings();
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
        self.refresh_readings();
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        display.fill_solid(&self.bounds, self.palette.background)?;

        self.title.draw(display)?;

        // Divider under the title
        Rectangle::new(
            Point::new(
                self.bounds.top_left.x + PAGE_MARGIN_PX as i32,
                READINGS_TOP_PX - READING_ROW_STRIDE_PX / 2,
            ),
            Size::new(self.bounds.size.width - 2 * PAGE_MARGIN_PX, 1),
        )
        .into_styled(PrimitiveStyle::with_fill(self.palette.border))
        .draw(display)?;

        self.light_text.draw(display)?;
        self.proximity_text.draw(display)?;
        self.magnetometer_text.draw(display)?;
        self.back_button.draw(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.light_text.is_dirty()
            || self.proximity_text.is_dirty()
            || self.magnetometer_text.is_dirty()
            || self.back_button.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.title.mark_clean();
        self.light_text.mark_clean();
        self.proximity_text.mark_clean();
        self.magnetometer_text.mark_clean();
        self.back_button.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

//! Core page abstraction and type-erased wrapper for the UI page system.
//!
//! [`Page`] defines the lifecycle, rendering, and interaction contract for
//! every screen. [`PageWrapper`] is an enum over the concrete pages so the
//! [`PageManager`](super::page_manager::PageManager) can hold them without
//! `dyn`.

use crate::sensors::SensorService;
use crate::ui::core::{Action, PageId, TouchEvent};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use alloc::boxed::Box;

use super::{BusinessCardPage, DicePage, SensorPage};

// ---------------------------------------------------------------------------
// Page trait
// ---------------------------------------------------------------------------

/// Trait that all navigable UI pages must implement.
///
/// The [`PageManager`](super::page_manager::PageManager) calls these methods
/// in a well-defined order:
///
/// 1. **`on_activate`**: once, when the page becomes the active page. Pages
///    bound to sensors acquire their subscription here.
/// 2. **`update`**: once per frame to drain new readings.
/// 3. **`handle_touch`**: when a touch event targets this page.
/// 4. **`draw_page`**: when `is_dirty()` is true.
/// 5. **`on_deactivate`**: once, when navigating away. Sensor subscriptions
///    are released here.
pub trait Page {
    /// Unique identifier used for navigation and lookup.
    fn id(&self) -> PageId;

    /// Human-readable title (may appear in headers or debug logs).
    fn title(&self) -> &str;

    /// Called once when this page becomes the active page.
    fn on_activate(&mut self) {}

    /// Called once when this page is no longer the active page.
    fn on_deactivate(&mut self) {}

    /// Process a touch event and optionally return a navigation [`Action`].
    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action>;

    /// Advance per-frame state.
    fn update(&mut self);

    /// Render the entire page to the given display target.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D)
    -> Result<(), D::Error>;

    /// Bounding rectangle of this page (typically the full screen).
    fn bounds(&self) -> Rectangle;

    /// Whether the page needs redrawing.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force the page to be redrawn on the next frame.
    fn mark_dirty(&mut self);
}

// ---------------------------------------------------------------------------
// PageWrapper
// ---------------------------------------------------------------------------

/// Enum-based wrapper that stores one of the concrete page types.
///
/// Each variant boxes its page to keep the enum size uniform. When adding a
/// page, add a variant here and extend the delegation below.
pub enum PageWrapper<S: SensorService + Clone> {
    BusinessCard(Box<BusinessCardPage>),
    Sensors(Box<SensorPage<S>>),
    Dice(Box<DicePage<S>>),
}

impl<S: SensorService + Clone> From<BusinessCardPage> for PageWrapper<S> {
    fn from(page: BusinessCardPage) -> Self {
        PageWrapper::BusinessCard(Box::new(page))
    }
}

impl<S: SensorService + Clone> From<SensorPage<S>> for PageWrapper<S> {
    fn from(page: SensorPage<S>) -> Self {
        PageWrapper::Sensors(Box::new(page))
    }
}

impl<S: SensorService + Clone> From<DicePage<S>> for PageWrapper<S> {
    fn from(page: DicePage<S>) -> Self {
        PageWrapper::Dice(Box::new(page))
    }
}

impl<S: SensorService + Clone> Page for PageWrapper<S> {
    fn id(&self) -> PageId {
        match self {
            PageWrapper::BusinessCard(page) => page.id(),
            PageWrapper::Sensors(page) => page.id(),
            PageWrapper::Dice(page) => page.id(),
        }
    }

    fn title(&self) -> &str {
        match self {
            PageWrapper::BusinessCard(page) => page.title(),
            PageWrapper::Sensors(page) => page.title(),
            PageWrapper::Dice(page) => page.title(),
        }
    }

    fn on_activate(&mut self) {
        match self {
            PageWrapper::BusinessCard(page) => page.on_activate(),
            PageWrapper::Sensors(page) => page.on_activate(),
            PageWrapper::Dice(page) => page.on_activate(),
        }
    }

    fn on_deactivate(&mut self) {
        match self {
            PageWrapper::BusinessCard(page) => page.on_deactivate(),
            PageWrapper::Sensors(page) => page.on_deactivate(),
            PageWrapper::Dice(page) => page.on_deactivate(),
        }
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self {
            PageWrapper::BusinessCard(page) => page.handle_touch(event),
            PageWrapper::Sensors(page) => page.handle_touch(event),
            PageWrapper::Dice(page) => page.handle_touch(event),
        }
    }

    fn update(&mut self) {
        match self {
            PageWrapper::BusinessCard(page) => page.update(),
            PageWrapper::Sensors(page) => page.update(),
            PageWrapper::Dice(page) => page.update(),
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        match self {
            PageWrapper::BusinessCard(page) => page.draw_page(display),
            PageWrapper::Sensors(page) => page.draw_page(display),
            PageWrapper::Dice(page) => page.draw_page(display),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            PageWrapper::BusinessCard(page) => Page::bounds(page.as_ref()),
            PageWrapper::Sensors(page) => Page::bounds(page.as_ref()),
            PageWrapper::Dice(page) => Page::bounds(page.as_ref()),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            PageWrapper::BusinessCard(page) => Page::is_dirty(page.as_ref()),
            PageWrapper::Sensors(page) => Page::is_dirty(page.as_ref()),
            PageWrapper::Dice(page) => Page::is_dirty(page.as_ref()),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            PageWrapper::BusinessCard(page) => Page::mark_clean(page.as_mut()),
            PageWrapper::Sensors(page) => Page::mark_clean(page.as_mut()),
            PageWrapper::Dice(page) => Page::mark_clean(page.as_mut()),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            PageWrapper::BusinessCard(page) => Page::mark_dirty(page.as_mut()),
            PageWrapper::Sensors(page) => Page::mark_dirty(page.as_mut()),
            PageWrapper::Dice(page) => Page::mark_dirty(page.as_mut()),
        }
    }
}

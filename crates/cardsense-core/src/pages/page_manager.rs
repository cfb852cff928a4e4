//! Page manager with navigation and lifecycle dispatching.
//!
//! Exactly one page is active at a time. Navigating deactivates the current
//! page before activating the next one, so a sensor-driven page always
//! releases its subscription before another page acquires its own.

use crate::pages::page::{Page, PageWrapper};
use crate::sensors::SensorService;
use crate::ui::core::{Action, PageId, TouchEvent};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use log::{debug, info, warn};

/// Maximum number of registered pages.
pub const MAX_PAGES: usize = 4;

/// Maximum depth of the back stack. The oldest entry is dropped when full.
pub const MAX_HISTORY: usize = 8;

/// Manages page navigation, rendering, and lifecycle.
pub struct PageManager<S: SensorService + Clone> {
    pages: Vec<PageWrapper<S>, MAX_PAGES>,
    current_page: PageId,
    navigation_stack: Vec<PageId, MAX_HISTORY>,
    display_bounds: Rectangle,
    started: bool,
}

impl<S: SensorService + Clone> PageManager<S> {
    pub fn new(initial_page: PageId, display_bounds: Rectangle) -> Self {
        Self {
            pages: Vec::new(),
            current_page: initial_page,
            navigation_stack: Vec::new(),
            display_bounds,
            started: false,
        }
    }

    /// Register a page. Returns `false` if the table is full or the id is
    /// already taken.
    pub fn register_page(&mut self, page: PageWrapper<S>) -> bool {
        if self.pages.iter().any(|p| p.id() == page.id()) {
            warn!("Page {:?} is already registered", page.id());
            return false;
        }
        let id = page.id();
        if self.pages.push(page).is_err() {
            warn!("Page table full, dropping {:?}", id);
            return false;
        }
        true
    }

    /// Activate the initial page. Calling it again has no effect.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!("Starting on {}", self.current_page.route());
        if let Some(page) = self.get_current_page_mut() {
            page.on_activate();
        }
    }

    /// Navigate to a specific page. Unregistered pages are ignored.
    pub fn navigate_to(&mut self, page_id: PageId) -> bool {
        if !self.is_registered(page_id) {
            warn!("No page registered for {:?}", page_id);
            return false;
        }

        if let Some(current) = self.get_current_page_mut() {
            current.on_deactivate();
        }

        // Push current page to stack for back navigation
        if self.navigation_stack.is_full() {
            self.navigation_stack.remove(0);
        }
        self.navigation_stack.push(self.current_page).ok();
        self.current_page = page_id;
        info!("Navigated to {}", page_id.route());

        if let Some(new_page) = self.get_current_page_mut() {
            new_page.on_activate();
        }
        true
    }

    /// Navigate by route name, e.g. `"sensorScreen"`.
    pub fn navigate_to_route(&mut self, route: &str) -> bool {
        match PageId::from_route(route) {
            Some(id) => self.navigate_to(id),
            None => {
                warn!("Unknown route {:?}", route);
                false
            }
        }
    }

    /// Go back to previous page
    pub fn go_back(&mut self) -> bool {
        let Some(prev_page) = self.navigation_stack.pop() else {
            return false;
        };

        if let Some(current) = self.get_current_page_mut() {
            current.on_deactivate();
        }
        self.current_page = prev_page;
        info!("Back to {}", prev_page.route());
        if let Some(page) = self.get_current_page_mut() {
            page.on_activate();
        }
        true
    }

    /// Apply a navigation action. Returns `true` if the active page changed.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::NavigateToPage(page_id) => self.navigate_to(page_id),
            Action::GoBack => self.go_back(),
        }
    }

    /// Get mutable reference to current page
    fn get_current_page_mut(&mut self) -> Option<&mut PageWrapper<S>> {
        self.pages.iter_mut().find(|p| p.id() == self.current_page)
    }

    /// Get reference to current page
    pub fn current_page(&self) -> Option<&PageWrapper<S>> {
        self.pages.iter().find(|p| p.id() == self.current_page)
    }

    fn is_registered(&self, page_id: PageId) -> bool {
        self.pages.iter().any(|p| p.id() == page_id)
    }

    /// Handle touch events, returns action if any
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        debug!("Processing touch event: {:?}", event);
        let result = self.get_current_page_mut()?.handle_touch(event);
        debug!("Touch result: {:?}", result);
        result
    }

    /// Update current page state
    pub fn update(&mut self) {
        if let Some(page) = self.get_current_page_mut() {
            page.update();
        }
    }

    /// Draw the current page (full redraw)
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        if let Some(page) = self.get_current_page_mut() {
            page.draw_page(display)?;
            page.mark_clean();
        }
        Ok(())
    }

    /// Draw the current page only if it changed. Returns whether it drew.
    pub fn draw_dirty<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        match self.get_current_page_mut() {
            Some(page) if page.is_dirty() => {
                page.draw_page(display)?;
                page.mark_clean();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Check if current page is dirty
    pub fn is_dirty(&self) -> bool {
        self.current_page().is_some_and(|page| page.is_dirty())
    }

    /// Get current page ID
    pub fn current_page_id(&self) -> PageId {
        self.current_page
    }

    /// Number of entries on the back stack.
    pub fn history_len(&self) -> usize {
        self.navigation_stack.len()
    }

    /// Get display bounds
    pub fn display_bounds(&self) -> Rectangle {
        self.display_bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardProfile;
    use crate::framebuffer::FrameBuffer;
    use crate::pages::{BusinessCardPage, DicePage, SensorPage, screen_bounds};
    use crate::sensors::{SensorKind, SimulatedSensorService};
    use crate::ui::core::TouchPoint;
    use alloc::sync::Arc;

    type Service = Arc<SimulatedSensorService>;

    fn manager(service: &Service) -> PageManager<Service> {
        let bounds = screen_bounds();
        let mut manager = PageManager::new(PageId::BusinessCard, bounds);
        manager.register_page(BusinessCardPage::new(bounds, &CardProfile::default()).into());
        manager.register_page(SensorPage::new(bounds, service.clone()).into());
        manager.register_page(DicePage::new(bounds, service.clone()).into());
        manager.start();
        manager
    }

    #[test]
    fn business_card_page_holds_no_subscription() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let manager = manager(&service);

        assert_eq!(manager.current_page_id(), PageId::BusinessCard);
        assert_eq!(service.listener_count(), 0);
    }

    #[test]
    fn navigation_moves_the_subscription() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let mut manager = manager(&service);

        assert!(manager.navigate_to(PageId::Sensors));
        assert_eq!(service.listener_count_for(SensorKind::Light), 1);
        assert_eq!(service.listener_count_for(SensorKind::Proximity), 1);

        assert!(manager.navigate_to(PageId::Dice));
        assert_eq!(service.listener_count_for(SensorKind::Light), 1);
        assert_eq!(service.listener_count_for(SensorKind::Proximity), 0);

        assert!(manager.go_back());
        assert_eq!(manager.current_page_id(), PageId::Sensors);
        assert_eq!(service.listener_count(), 2);

        assert!(manager.go_back());
        assert_eq!(manager.current_page_id(), PageId::BusinessCard);
        assert_eq!(service.listener_count(), 0);
        assert!(!manager.go_back());
    }

    #[test]
    fn touching_card_buttons_navigates() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let mut manager = manager(&service);
        let mut display = FrameBuffer::new();
        manager.draw(&mut display).unwrap();

        let sensors_button = crate::pages::business_card::sensors_button_bounds().center();
        let action = manager
            .handle_touch(TouchEvent::Press(TouchPoint::new(
                sensors_button.x as u16,
                sensors_button.y as u16,
            )))
            .unwrap();

        assert_eq!(action, Action::NavigateToPage(PageId::Sensors));
        assert!(manager.handle_action(action));
        assert_eq!(manager.current_page_id(), PageId::Sensors);
    }

    #[test]
    fn routes_resolve_to_pages() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let mut manager = manager(&service);

        assert!(manager.navigate_to_route("DiceInterface"));
        assert_eq!(manager.current_page_id(), PageId::Dice);
        assert!(!manager.navigate_to_route("settings"));
        assert_eq!(manager.current_page_id(), PageId::Dice);
    }

    #[test]
    fn unregistered_pages_are_rejected() {
        let bounds = screen_bounds();
        let mut manager: PageManager<Service> = PageManager::new(PageId::BusinessCard, bounds);
        manager.register_page(BusinessCardPage::new(bounds, &CardProfile::default()).into());
        manager.start();

        assert!(!manager.navigate_to(PageId::Dice));
        assert_eq!(manager.current_page_id(), PageId::BusinessCard);
        assert_eq!(manager.history_len(), 0);
        assert!(!manager.register_page(
            BusinessCardPage::new(bounds, &CardProfile::default()).into()
        ));
    }

    #[test]
    fn back_stack_is_bounded() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let mut manager = manager(&service);

        for _ in 0..(MAX_HISTORY * 2) {
            manager.navigate_to(PageId::Dice);
            manager.navigate_to(PageId::Sensors);
        }

        assert_eq!(manager.history_len(), MAX_HISTORY);
        assert_eq!(service.listener_count(), 2);
    }

    #[test]
    fn dropping_the_manager_releases_sensors() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let mut manager = manager(&service);
        manager.navigate_to(PageId::Sensors);
        assert_eq!(service.listener_count(), 2);

        drop(manager);

        assert_eq!(service.listener_count(), 0);
    }

    #[test]
    fn draw_dirty_only_draws_changes() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let mut manager = manager(&service);
        let mut display = FrameBuffer::new();
        manager.navigate_to(PageId::Sensors);
        manager.update();

        assert!(manager.draw_dirty(&mut display).unwrap());
        manager.update();
        assert!(!manager.draw_dirty(&mut display).unwrap());

        service.emit(SensorKind::Light, 42.0);
        manager.update();
        assert!(manager.is_dirty());
        assert!(manager.draw_dirty(&mut display).unwrap());
    }
}

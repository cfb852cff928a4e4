//! Scoped sensor subscription.
//!
//! A [`SensorSubscription`] is acquired when a page becomes active and
//! dropped when it goes away. While alive it forwards readings for each bound
//! channel into that channel's [`ObservableFloat`]. Dropping it unregisters
//! every listener it registered, exactly once.

use alloc::sync::Arc;
use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use heapless::Vec;
use log::{debug, warn};

use super::observable::ObservableFloat;
use crate::sensors::{
    ListenerId, MAX_CHANNELS, SamplingRate, SensorKind, SensorListener, SensorReading,
    SensorService,
};

/// Requested pairing of a channel kind with the cell it writes into.
#[derive(Debug, Clone)]
pub struct ChannelBinding {
    pub kind: SensorKind,
    pub cell: Arc<ObservableFloat>,
}

impl ChannelBinding {
    pub fn new(kind: SensorKind, cell: &Arc<ObservableFloat>) -> Self {
        Self {
            kind,
            cell: Arc::clone(cell),
        }
    }
}

/// Cleared when the subscription is torn down. Checked and written under the
/// same lock as the cell update, so no write can land after teardown.
type LiveFlag = Mutex<CriticalSectionRawMutex, Cell<bool>>;

/// Listener writing each reading into the cell bound to its kind.
struct ChannelListener {
    bindings: Vec<ChannelBinding, MAX_CHANNELS>,
    live: Arc<LiveFlag>,
}

impl SensorListener for ChannelListener {
    fn on_sensor_changed(&self, reading: &SensorReading) {
        let Some(binding) = self.bindings.iter().find(|b| b.kind == reading.kind) else {
            return;
        };
        self.live.lock(|live| {
            if live.get() {
                binding.cell.set(reading.value);
            }
        });
    }
}

/// Live registration of one listener against a set of sensor channels.
pub struct SensorSubscription<S: SensorService> {
    service: S,
    registrations: Vec<(SensorKind, ListenerId), MAX_CHANNELS>,
    live: Arc<LiveFlag>,
}

impl<S: SensorService> SensorSubscription<S> {
    /// Register a listener for every requested channel the device exposes.
    ///
    /// Channels without a default sensor are skipped; so are channels the
    /// service refuses to register. Their cells keep whatever value they had.
    /// Bindings beyond [`MAX_CHANNELS`] are ignored.
    pub fn activate(service: S, channels: &[ChannelBinding]) -> Self {
        let mut bound: Vec<ChannelBinding, MAX_CHANNELS> = Vec::new();
        for binding in channels {
            if bound.iter().any(|b| b.kind == binding.kind) {
                continue;
            }
            if bound.push(binding.clone()).is_err() {
                warn!("Too many channel bindings, ignoring {}", binding.kind.name());
            }
        }

        let live = Arc::new(Mutex::new(Cell::new(true)));
        let listener: Arc<dyn SensorListener> = Arc::new(ChannelListener {
            bindings: bound.clone(),
            live: live.clone(),
        });

        let mut registrations = Vec::new();
        for binding in &bound {
            let Some(sensor) = service.default_sensor(binding.kind) else {
                debug!("No {} sensor, skipping registration", binding.kind.name());
                continue;
            };

            match service.register_listener(listener.clone(), &sensor, SamplingRate::Normal) {
                Ok(id) => {
                    // Capacity matches `bound`, so this cannot overflow.
                    registrations.push((binding.kind, id)).ok();
                }
                Err(e) => {
                    warn!("Failed to register {} listener: {}", binding.kind.name(), e);
                }
            }
        }

        debug!(
            "Sensor subscription active with {} of {} channels",
            registrations.len(),
            bound.len()
        );

        Self {
            service,
            registrations,
            live,
        }
    }

    /// Whether a listener is registered for `kind`.
    pub fn is_bound(&self, kind: SensorKind) -> bool {
        self.registrations.iter().any(|(k, _)| *k == kind)
    }

    /// Number of listener registrations held.
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }
}

impl<S: SensorService> Drop for SensorSubscription<S> {
    fn drop(&mut self) {
        // Deliveries already in flight see this and discard their reading.
        self.live.lock(|live| live.set(false));
        for (kind, id) in self.registrations.iter() {
            debug!("Releasing {} listener {:?}", kind.name(), id);
            self.service.unregister_listener(*id);
        }
        self.registrations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{SensorAccuracy, SimulatedSensorService};
    use core::sync::atomic::{AtomicBool, Ordering};

    /// Holds each delivery until `open` is set.
    #[derive(Default)]
    struct GateListener {
        entered: AtomicBool,
        open: AtomicBool,
    }

    impl SensorListener for GateListener {
        fn on_sensor_changed(&self, _reading: &SensorReading) {
            self.entered.store(true, Ordering::SeqCst);
            while !self.open.load(Ordering::SeqCst) {
                std::thread::yield_now();
            }
        }
    }

    fn light_and_proximity() -> (Arc<ObservableFloat>, Arc<ObservableFloat>) {
        (
            ObservableFloat::shared("light"),
            ObservableFloat::shared("proximity"),
        )
    }

    #[test]
    fn readings_land_in_matching_cells() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let (light, proximity) = light_and_proximity();
        let _subscription = SensorSubscription::activate(
            service.clone(),
            &[
                ChannelBinding::new(SensorKind::Light, &light),
                ChannelBinding::new(SensorKind::Proximity, &proximity),
            ],
        );

        service.emit(SensorKind::Light, 321.5);
        service.emit(SensorKind::Proximity, 5.0);
        service.emit(SensorKind::Light, 17.0);

        assert_eq!(light.get(), 17.0);
        assert_eq!(proximity.get(), 5.0);
    }

    #[test]
    fn missing_channel_is_skipped_silently() {
        let service = Arc::new(SimulatedSensorService::new().with_sensor(SensorKind::Light));
        let (light, proximity) = light_and_proximity();
        let subscription = SensorSubscription::activate(
            service.clone(),
            &[
                ChannelBinding::new(SensorKind::Light, &light),
                ChannelBinding::new(SensorKind::Proximity, &proximity),
            ],
        );

        assert!(subscription.is_bound(SensorKind::Light));
        assert!(!subscription.is_bound(SensorKind::Proximity));
        assert_eq!(subscription.registration_count(), 1);

        service.emit(SensorKind::Light, 80.0);
        service.emit(SensorKind::Proximity, 3.0);

        assert_eq!(light.get(), 80.0);
        assert_eq!(proximity.get(), 0.0);
        assert_eq!(proximity.version(), 0);
    }

    #[test]
    fn drop_unregisters_every_listener() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let (light, proximity) = light_and_proximity();
        let subscription = SensorSubscription::activate(
            service.clone(),
            &[
                ChannelBinding::new(SensorKind::Light, &light),
                ChannelBinding::new(SensorKind::Proximity, &proximity),
            ],
        );
        assert_eq!(service.listener_count(), 2);
        service.emit(SensorKind::Light, 9.0);

        drop(subscription);

        assert_eq!(service.listener_count(), 0);
        assert_eq!(service.emit(SensorKind::Light, 250.0), 0);
        assert_eq!(service.emit(SensorKind::Proximity, 1.0), 0);
        assert_eq!(light.get(), 9.0);
        assert_eq!(proximity.get(), 0.0);
    }

    #[test]
    fn registers_at_normal_rate() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let light = ObservableFloat::shared("light");
        let _subscription = SensorSubscription::activate(
            service.clone(),
            &[ChannelBinding::new(SensorKind::Light, &light)],
        );

        assert_eq!(
            service.requested_period(SensorKind::Light),
            Some(SamplingRate::Normal.period())
        );
    }

    #[test]
    fn duplicate_kinds_register_once() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let light = ObservableFloat::shared("light");
        let subscription = SensorSubscription::activate(
            service.clone(),
            &[
                ChannelBinding::new(SensorKind::Light, &light),
                ChannelBinding::new(SensorKind::Light, &light),
            ],
        );

        assert_eq!(subscription.registration_count(), 1);
        assert_eq!(service.listener_count_for(SensorKind::Light), 1);
    }

    #[test]
    fn accuracy_changes_leave_cells_alone() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let light = ObservableFloat::shared("light");
        let _subscription = SensorSubscription::activate(
            service.clone(),
            &[ChannelBinding::new(SensorKind::Light, &light)],
        );

        assert_eq!(
            service.change_accuracy(SensorKind::Light, SensorAccuracy::Unreliable),
            1
        );
        assert_eq!(light.version(), 0);
    }

    #[test]
    fn events_from_a_sensor_thread_reach_the_cell() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let light = ObservableFloat::shared("light");
        let _subscription = SensorSubscription::activate(
            service.clone(),
            &[ChannelBinding::new(SensorKind::Light, &light)],
        );

        let feeder = service.clone();
        std::thread::spawn(move || {
            for lux in [10.0, 20.0, 30.0] {
                feeder.emit(SensorKind::Light, lux);
            }
        })
        .join()
        .unwrap();

        assert_eq!(light.get(), 30.0);
        assert_eq!(light.version(), 3);
    }

    #[test]
    fn in_flight_reading_is_discarded_after_teardown() {
        let service = Arc::new(SimulatedSensorService::with_all_sensors());
        let light = ObservableFloat::shared("light");

        // Registered first, so it runs before the subscription's listener.
        let gate = Arc::new(GateListener::default());
        let sensor = service.default_sensor(SensorKind::Light).unwrap();
        service
            .register_listener(gate.clone(), &sensor, SamplingRate::Normal)
            .unwrap();

        let subscription = SensorSubscription::activate(
            service.clone(),
            &[ChannelBinding::new(SensorKind::Light, &light)],
        );

        let feeder = service.clone();
        let delivery = std::thread::spawn(move || feeder.emit(SensorKind::Light, 77.0));
        while !gate.entered.load(Ordering::SeqCst) {
            std::thread::yield_now();
        }

        drop(subscription);
        light.reset();
        let version_after_reset = light.version();

        gate.open.store(true, Ordering::SeqCst);
        assert_eq!(delivery.join().unwrap(), 2);

        assert_eq!(light.get(), 0.0);
        assert_eq!(light.version(), version_after_reset);
    }
}

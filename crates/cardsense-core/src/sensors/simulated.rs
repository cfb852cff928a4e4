//! In-memory sensor service.
//!
//! Exposes a fixed set of sensors chosen at construction and delivers
//! readings pushed through [`SimulatedSensorService::emit`] to every matching
//! registration. The registration table sits behind a critical-section mutex
//! so readings can be emitted from any thread; listener callbacks run outside
//! the lock.

use alloc::sync::Arc;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;
use heapless::Vec;
use log::debug;

use super::{
    ListenerId, SamplingRate, Sensor, SensorAccuracy, SensorError, SensorKind, SensorListener,
    SensorReading, SensorService,
};

/// Maximum number of live registrations the service will accept.
pub const MAX_REGISTRATIONS: usize = 8;

const SENSOR_SLOTS: usize = SensorKind::ALL.len();

struct Registration {
    id: ListenerId,
    sensor: Sensor,
    rate: SamplingRate,
    listener: Arc<dyn SensorListener>,
}

struct Registry {
    next_id: u32,
    entries: Vec<Registration, MAX_REGISTRATIONS>,
}

/// Sensor service backed by memory instead of hardware.
pub struct SimulatedSensorService {
    sensors: Vec<Sensor, SENSOR_SLOTS>,
    registry: Mutex<CriticalSectionRawMutex, RefCell<Registry>>,
}

impl Default for SimulatedSensorService {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSensorService {
    /// A device with no sensors at all.
    pub fn new() -> Self {
        Self {
            sensors: Vec::new(),
            registry: Mutex::new(RefCell::new(Registry {
                next_id: 1,
                entries: Vec::new(),
            })),
        }
    }

    /// A device exposing every supported sensor kind.
    pub fn with_all_sensors() -> Self {
        SensorKind::ALL
            .iter()
            .fold(Self::new(), |service, kind| service.with_sensor(*kind))
    }

    /// Expose a default sensor of `kind`. Adding a kind twice has no effect.
    pub fn with_sensor(mut self, kind: SensorKind) -> Self {
        if !self.sensors.iter().any(|s| s.kind() == kind) {
            let name = match kind {
                SensorKind::Light => "Simulated light sensor",
                SensorKind::Proximity => "Simulated proximity sensor",
                SensorKind::MagneticField => "Simulated magnetometer",
            };
            self.sensors.push(Sensor::new(kind, name)).ok();
        }
        self
    }

    /// Deliver a reading to every listener registered for `kind`.
    ///
    /// Returns the number of listeners that received it.
    pub fn emit(&self, kind: SensorKind, value: f32) -> usize {
        self.emit_reading(SensorReading::new(kind, value))
    }

    pub fn emit_reading(&self, reading: SensorReading) -> usize {
        let targets = self.listeners_for(reading.kind);
        for listener in &targets {
            listener.on_sensor_changed(&reading);
        }
        targets.len()
    }

    /// Notify listeners registered for `kind` of an accuracy change.
    pub fn change_accuracy(&self, kind: SensorKind, accuracy: SensorAccuracy) -> usize {
        let Some(sensor) = self.default_sensor(kind) else {
            return 0;
        };
        let targets = self.listeners_for(kind);
        for listener in &targets {
            listener.on_accuracy_changed(&sensor, accuracy);
        }
        targets.len()
    }

    /// Total number of live registrations.
    pub fn listener_count(&self) -> usize {
        self.registry.lock(|registry| registry.borrow().entries.len())
    }

    /// Number of live registrations for `kind`.
    pub fn listener_count_for(&self, kind: SensorKind) -> usize {
        self.registry.lock(|registry| {
            registry
                .borrow()
                .entries
                .iter()
                .filter(|entry| entry.sensor.kind() == kind)
                .count()
        })
    }

    /// Shortest delivery period requested for `kind`, if anyone listens.
    pub fn requested_period(&self, kind: SensorKind) -> Option<Duration> {
        self.registry.lock(|registry| {
            registry
                .borrow()
                .entries
                .iter()
                .filter(|entry| entry.sensor.kind() == kind)
                .map(|entry| entry.rate.period())
                .min()
        })
    }

    fn listeners_for(&self, kind: SensorKind) -> Vec<Arc<dyn SensorListener>, MAX_REGISTRATIONS> {
        self.registry.lock(|registry| {
            registry
                .borrow()
                .entries
                .iter()
                .filter(|entry| entry.sensor.kind() == kind)
                .map(|entry| entry.listener.clone())
                .collect()
        })
    }
}

impl SensorService for SimulatedSensorService {
    fn default_sensor(&self, kind: SensorKind) -> Option<Sensor> {
        self.sensors.iter().find(|s| s.kind() == kind).copied()
    }

    fn register_listener(
        &self,
        listener: Arc<dyn SensorListener>,
        sensor: &Sensor,
        rate: SamplingRate,
    ) -> Result<ListenerId, SensorError> {
        if self.default_sensor(sensor.kind()).is_none() {
            return Err(SensorError::SensorUnavailable(sensor.kind()));
        }

        self.registry.lock(|registry| {
            let mut registry = registry.borrow_mut();
            let id = ListenerId(registry.next_id);
            registry
                .entries
                .push(Registration {
                    id,
                    sensor: *sensor,
                    rate,
                    listener,
                })
                .map_err(|_| SensorError::ListenerTableFull {
                    capacity: MAX_REGISTRATIONS,
                })?;
            registry.next_id = registry.next_id.wrapping_add(1);
            debug!(
                "Registered listener {:?} for {} at {:?}",
                id,
                sensor.name(),
                rate
            );
            Ok(id)
        })
    }

    fn unregister_listener(&self, id: ListenerId) {
        self.registry.lock(|registry| {
            let mut registry = registry.borrow_mut();
            if let Some(index) = registry.entries.iter().position(|entry| entry.id == id) {
                registry.entries.swap_remove(index);
                debug!("Unregistered listener {:?}", id);
            }
        });
    }
}

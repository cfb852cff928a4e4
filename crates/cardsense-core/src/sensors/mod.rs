//! Sensor service port and the types flowing across it.
//!
//! The platform sensor service is an external collaborator: it knows which
//! hardware sensors the device exposes and delivers readings to registered
//! listeners, possibly from a thread other than the one running the UI.
//! This module only describes that boundary. [`simulated`] provides an
//! in-memory implementation for tests and the desktop simulator.

pub mod simulated;

use alloc::sync::Arc;
use embassy_time::Duration;
use thiserror_no_std::Error;

pub use simulated::SimulatedSensorService;

/// Maximum number of distinct channel kinds a single subscription can bind.
pub const MAX_CHANNELS: usize = 3;

/// Category of physical sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Ambient light, in lux.
    Light,
    /// Distance to the nearest object, in centimetres.
    Proximity,
    /// Magnetic field strength, in microtesla.
    MagneticField,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Light,
        SensorKind::Proximity,
        SensorKind::MagneticField,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            SensorKind::Light => "light",
            SensorKind::Proximity => "proximity",
            SensorKind::MagneticField => "magnetic field",
        }
    }

    pub const fn unit(&self) -> &'static str {
        match self {
            SensorKind::Light => "lx",
            SensorKind::Proximity => "cm",
            SensorKind::MagneticField => "uT",
        }
    }
}

/// Handle to one hardware sensor exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    kind: SensorKind,
    name: &'static str,
}

impl Sensor {
    pub const fn new(kind: SensorKind, name: &'static str) -> Self {
        Self { kind, name }
    }

    pub const fn kind(&self) -> SensorKind {
        self.kind
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Reported accuracy of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorAccuracy {
    Unreliable,
    Low,
    Medium,
    High,
}

/// One scalar reading delivered by the sensor service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub kind: SensorKind,
    pub value: f32,
    pub accuracy: SensorAccuracy,
    /// Monotonic timestamp in microseconds.
    pub timestamp_us: u64,
}

impl SensorReading {
    pub fn new(kind: SensorKind, value: f32) -> Self {
        Self {
            kind,
            value,
            accuracy: SensorAccuracy::High,
            timestamp_us: 0,
        }
    }

    pub fn with_timestamp(mut self, timestamp_us: u64) -> Self {
        self.timestamp_us = timestamp_us;
        self
    }
}

/// Requested delivery rate for a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingRate {
    Fastest,
    Game,
    Ui,
    Normal,
}

impl SamplingRate {
    /// Nominal interval between deliveries at this rate.
    pub const fn period(&self) -> Duration {
        match self {
            SamplingRate::Fastest => Duration::from_micros(0),
            SamplingRate::Game => Duration::from_micros(20_000),
            SamplingRate::Ui => Duration::from_micros(66_667),
            SamplingRate::Normal => Duration::from_micros(200_000),
        }
    }
}

/// Identifies one listener registration inside a sensor service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("No {0:?} sensor is available on this device")]
    SensorUnavailable(SensorKind),
    #[error("Listener table is full ({capacity} registrations)")]
    ListenerTableFull { capacity: usize },
}

/// Callback receiving asynchronous sensor events.
///
/// Implementations may be invoked from any thread, so they must only touch
/// thread-safe state.
pub trait SensorListener: Send + Sync {
    fn on_sensor_changed(&self, reading: &SensorReading);

    fn on_accuracy_changed(&self, _sensor: &Sensor, _accuracy: SensorAccuracy) {}
}

/// The platform sensor service.
pub trait SensorService {
    /// Default sensor for `kind`, or `None` when the device has none.
    fn default_sensor(&self, kind: SensorKind) -> Option<Sensor>;

    /// Start delivering events from `sensor` to `listener`.
    fn register_listener(
        &self,
        listener: Arc<dyn SensorListener>,
        sensor: &Sensor,
        rate: SamplingRate,
    ) -> Result<ListenerId, SensorError>;

    /// Stop delivering events for a registration. Unknown ids are ignored.
    fn unregister_listener(&self, id: ListenerId);
}

impl<T: SensorService + ?Sized> SensorService for Arc<T> {
    fn default_sensor(&self, kind: SensorKind) -> Option<Sensor> {
        (**self).default_sensor(kind)
    }

    fn register_listener(
        &self,
        listener: Arc<dyn SensorListener>,
        sensor: &Sensor,
        rate: SamplingRate,
    ) -> Result<ListenerId, SensorError> {
        (**self).register_listener(listener, sensor, rate)
    }

    fn unregister_listener(&self, id: ListenerId) {
        (**self).unregister_listener(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_rate_is_200ms() {
        assert_eq!(SamplingRate::Normal.period().as_micros(), 200_000);
        assert!(SamplingRate::Game.period() < SamplingRate::Ui.period());
    }

    #[test]
    fn units_match_kind() {
        assert_eq!(SensorKind::Light.unit(), "lx");
        assert_eq!(SensorKind::Proximity.unit(), "cm");
        assert_eq!(SensorKind::MagneticField.unit(), "uT");
    }
}

//! Live sensor state shared between listener callbacks and pages.

pub mod observable;
pub mod subscription;

pub use observable::{DEFAULT_READING, ObservableFloat, ObservableReader};
pub use subscription::{ChannelBinding, SensorSubscription};

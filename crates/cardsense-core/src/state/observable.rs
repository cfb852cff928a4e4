//! Lock-free single-value cells shared between sensor callbacks and pages.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};

/// Value every cell holds before its first write.
pub const DEFAULT_READING: f32 = 0.0;

/// Named single-slot mailbox holding the latest reading of one channel.
///
/// The value lives in an [`AtomicU32`] as raw `f32` bits. Each write bumps a
/// version counter after storing the value, so a reader that observes a new
/// version is guaranteed to see a value at least that fresh. Writes are
/// last-write-wins; nothing is queued.
#[derive(Debug)]
pub struct ObservableFloat {
    name: &'static str,
    bits: AtomicU32,
    version: AtomicU32,
}

impl ObservableFloat {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            // 0.0f32 has an all-zero bit pattern.
            bits: AtomicU32::new(0),
            version: AtomicU32::new(0),
        }
    }

    /// Create a cell already wrapped for sharing with a listener.
    pub fn shared(name: &'static str) -> Arc<Self> {
        Arc::new(Self::new(name))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Latest value written to the cell.
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Number of writes since the cell was created, wrapping.
    pub fn version(&self) -> u32 {
        self.version.load(Ordering::Acquire)
    }

    /// Overwrite the value. Only sensor listeners write readings.
    pub(crate) fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Release);
        self.version.fetch_add(1, Ordering::AcqRel);
    }

    /// Put the cell back to [`DEFAULT_READING`].
    ///
    /// Counts as a write so readers redraw the default.
    pub fn reset(&self) {
        self.set(DEFAULT_READING);
    }

    /// Reader that reports each change exactly once.
    pub fn watch(self: &Arc<Self>) -> ObservableReader {
        ObservableReader {
            cell: Arc::clone(self),
            seen: None,
        }
    }
}

/// Drains changes from an [`ObservableFloat`] on the update pass.
#[derive(Debug)]
pub struct ObservableReader {
    cell: Arc<ObservableFloat>,
    seen: Option<u32>,
}

impl ObservableReader {
    /// Return the current value if it changed since the last poll.
    ///
    /// The first poll always reports the current value.
    pub fn poll(&mut self) -> Option<f32> {
        let version = self.cell.version();
        if self.seen == Some(version) {
            return None;
        }
        self.seen = Some(version);
        Some(self.cell.get())
    }

    /// Current value without consuming the change notification.
    pub fn peek(&self) -> f32 {
        self.cell.get()
    }

    pub fn cell(&self) -> &Arc<ObservableFloat> {
        &self.cell
    }
}

//! Running elevation aggregates for one generation session.
//!
//! Two forms: [`ElevationTracker`] is a plain value each worker owns privately
//! and merges afterward; [`AtomicMinMax`] is the shared form, serializing
//! writes through two compare-and-swap scalars. Either way, every elevation a
//! session produces must be recorded before the range is meaningful.

use std::sync::atomic::{AtomicU32, Ordering};

/// Running min/max of the elevations produced during one generation session.
///
/// Starts empty (`+inf, -inf`); [`record`](Self::record) every sample, then
/// read [`range`](Self::range) after the full pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationTracker {
    min: f32,
    max: f32,
}

impl ElevationTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    /// Record one elevation sample.
    pub fn record(&mut self, elevation: f32) {
        if elevation < self.min {
            self.min = elevation;
        }
        if elevation > self.max {
            self.max = elevation;
        }
    }

    /// Fold another tracker into this one (per-worker aggregation).
    pub fn merge(&mut self, other: &ElevationTracker) {
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }

    /// Smallest recorded elevation, `+inf` while empty.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Largest recorded elevation, `-inf` while empty.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// `(min, max)` of everything recorded so far.
    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// `true` until the first sample is recorded.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

impl Default for ElevationTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared-session form of [`ElevationTracker`].
///
/// Stores each bound as the bit pattern of an `f32` in an [`AtomicU32`] and
/// updates it with a compare-exchange loop, so any number of workers can
/// record concurrently without a lock. Elevations must be finite, non-NaN
/// values (they are: the compositor produces plain arithmetic over finite
/// settings).
#[derive(Debug)]
pub struct AtomicMinMax {
    min: AtomicU32,
    max: AtomicU32,
}

impl AtomicMinMax {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self {
            min: AtomicU32::new(f32::INFINITY.to_bits()),
            max: AtomicU32::new(f32::NEG_INFINITY.to_bits()),
        }
    }

    /// Record one elevation sample: update max if greater, min if lesser.
    pub fn record(&self, elevation: f32) {
        cas_update(&self.min, elevation, |current, new| new < current);
        cas_update(&self.max, elevation, |current, new| new > current);
    }

    /// `(min, max)` of everything recorded so far.
    pub fn range(&self) -> (f32, f32) {
        (
            f32::from_bits(self.min.load(Ordering::Acquire)),
            f32::from_bits(self.max.load(Ordering::Acquire)),
        )
    }

    /// Snapshot into a value tracker, e.g. to merge with per-worker results.
    pub fn snapshot(&self) -> ElevationTracker {
        let (min, max) = self.range();
        ElevationTracker { min, max }
    }
}

impl Default for AtomicMinMax {
    fn default() -> Self {
        Self::new()
    }
}

fn cas_update(cell: &AtomicU32, value: f32, replaces: impl Fn(f32, f32) -> bool) {
    let mut current = cell.load(Ordering::Relaxed);
    while replaces(f32::from_bits(current), value) {
        match cell.compare_exchange_weak(
            current,
            value.to_bits(),
            Ordering::AcqRel,
            Ordering::Relaxed,
        ) {
            Ok(_) => return,
            Err(observed) => current = observed,
        }
    }
}

//! Host-side view of a sampler.
//!
//! The core only knows how to create, start and stop samplers. The simulator
//! additionally polls them for readings on simulated time and, for the
//! injector, applies pressure nudges.

use altimeter_common::pressure::Reading;
use altimeter_common::sampler::Sampler;
use altimeter_common::simulation::{PressureInjector, PressureNudge};

/// Owned payload of a reading callback.
#[derive(Clone, PartialEq, Debug)]
pub enum SimReading {
    Single(f64),
    Batch(Vec<f64>),
}

impl SimReading {
    pub fn as_reading(&self) -> Reading<'_> {
        match self {
            Self::Single(value) => Reading::single(*value),
            Self::Batch(values) => Reading::batch(values),
        }
    }
}

/// A sampler the simulator event loop can drive.
pub trait HostSampler: Sampler {
    /// Reading due at `now_s`, if any.
    fn poll(
        &mut self,
        now_s: f64,
    ) -> Option<SimReading>;

    /// Apply a synthetic pressure change. Only the injector supports this.
    fn nudge(
        &mut self,
        _nudge: PressureNudge,
    ) -> Option<SimReading> {
        None
    }
}

impl HostSampler for PressureInjector<'_> {
    fn poll(
        &mut self,
        _now_s: f64,
    ) -> Option<SimReading> {
        if !self.is_running() {
            return None;
        }
        self.latest().map(SimReading::Single)
    }

    fn nudge(
        &mut self,
        nudge: PressureNudge,
    ) -> Option<SimReading> {
        self.inject(nudge).map(SimReading::Single)
    }
}

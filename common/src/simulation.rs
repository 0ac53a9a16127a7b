//! Synthetic pressure source.
//!
//! [`PressureInjector`] stands in for the barometer behind the regular
//! [`Sampler`] interface, so the altitude and trend pipeline runs unchanged
//! without hardware. The host nudges a shared pressure cell and then feeds the
//! resulting value through a normal reading event.

use core::cell::Cell;

use crate::error::SamplerError;
use crate::sampler::{Sampler, SamplerFactory};
use crate::sampling::SamplingConfig;
use crate::thresholds::SEA_LEVEL_PRESSURE_PA;

/// Pressure step of an increase/decrease nudge (Pa).
pub const NUDGE_STEP_PA: f64 = 30.0;

/// Pressure step of a jitter nudge (Pa).
pub const JITTER_STEP_PA: f64 = 1.0;

/// Synthetic pressure change.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PressureNudge {
    Increase,
    Decrease,
    /// ±1 Pa; the caller picks the sign.
    Jitter { positive: bool },
}

impl PressureNudge {
    pub const fn delta_pa(self) -> f64 {
        match self {
            Self::Increase => NUDGE_STEP_PA,
            Self::Decrease => -NUDGE_STEP_PA,
            Self::Jitter { positive: true } => JITTER_STEP_PA,
            Self::Jitter { positive: false } => -JITTER_STEP_PA,
        }
    }
}

/// Sampler reading from a pressure cell shared with the host.
pub struct PressureInjector<'a> {
    pressure: &'a Cell<f64>,
    running: bool,
}

impl<'a> PressureInjector<'a> {
    pub const fn new(pressure: &'a Cell<f64>) -> Self {
        Self {
            pressure,
            running: false,
        }
    }

    #[inline]
    pub const fn is_running(&self) -> bool { self.running }

    /// Apply `nudge` and return the new pressure, or `None` while stopped.
    pub fn inject(
        &self,
        nudge: PressureNudge,
    ) -> Option<f64> {
        if !self.running {
            return None;
        }
        let pressure = self.pressure.get() + nudge.delta_pa();
        self.pressure.set(pressure);
        Some(pressure)
    }
}

impl Sampler for PressureInjector<'_> {
    fn start(&mut self) -> Result<(), SamplerError> {
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SamplerError> {
        self.running = false;
        Ok(())
    }

    fn latest(&self) -> Option<f64> { Some(self.pressure.get()) }
}

/// Hands out injectors over one shared pressure cell.
pub struct InjectorFactory<'a> {
    pressure: &'a Cell<f64>,
    created: u32,
}

impl<'a> InjectorFactory<'a> {
    pub const fn new(pressure: &'a Cell<f64>) -> Self {
        Self { pressure, created: 0 }
    }

    /// Number of injectors created so far.
    #[inline]
    pub const fn created(&self) -> u32 { self.created }
}

impl<'a> SamplerFactory for InjectorFactory<'a> {
    type Sampler = PressureInjector<'a>;

    fn create(
        &mut self,
        _config: Option<SamplingConfig>,
    ) -> Result<Self::Sampler, SamplerError> {
        self.created += 1;
        Ok(PressureInjector::new(self.pressure))
    }
}

/// Starting pressure for a simulated session.
pub const fn sea_level() -> Cell<f64> { Cell::new(SEA_LEVEL_PRESSURE_PA) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudge_deltas() {
        assert_eq!(PressureNudge::Increase.delta_pa(), 30.0);
        assert_eq!(PressureNudge::Decrease.delta_pa(), -30.0);
        assert_eq!(PressureNudge::Jitter { positive: true }.delta_pa(), 1.0);
        assert_eq!(PressureNudge::Jitter { positive: false }.delta_pa(), -1.0);
    }

    #[test]
    fn test_inject_requires_running() {
        let pressure = sea_level();
        let mut injector = PressureInjector::new(&pressure);
        assert_eq!(injector.inject(PressureNudge::Increase), None);
        assert_eq!(pressure.get(), SEA_LEVEL_PRESSURE_PA);

        injector.start().unwrap();
        assert_eq!(injector.inject(PressureNudge::Decrease), Some(101_295.0));
        assert_eq!(injector.latest(), Some(101_295.0));

        injector.stop().unwrap();
        assert!(!injector.is_running());
        assert_eq!(injector.inject(PressureNudge::Decrease), None);
    }

    #[test]
    fn test_factory_shares_cell() {
        let pressure = sea_level();
        let mut factory = InjectorFactory::new(&pressure);
        let mut first = factory.create(None).unwrap();
        first.start().unwrap();
        first.inject(PressureNudge::Increase);
        first.stop().unwrap();

        let second = factory.create(Some(SamplingConfig::NORMAL)).unwrap();
        assert_eq!(second.latest(), Some(101_355.0));
        assert_eq!(factory.created(), 2);
    }
}

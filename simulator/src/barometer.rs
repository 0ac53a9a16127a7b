//! Simulated barometer.
//!
//! Pressure follows a slow sine (a climb and descent of roughly ten meters)
//! plus deterministic sensor noise. Samplers deliver readings on simulated
//! time: the settle sampler produces one fast single value, configured
//! samplers produce one batch per `batch_size / frequency` seconds.

use std::f64::consts::TAU;

use altimeter_common::error::SamplerError;
use altimeter_common::sampler::{Sampler, SamplerFactory};
use altimeter_common::sampling::SamplingConfig;
use altimeter_common::thresholds::SEA_LEVEL_PRESSURE_PA;

use crate::host::{HostSampler, SimReading};

/// Delay before the settle sampler delivers its first value.
pub const SETTLE_DELAY_S: f64 = 0.5;

/// Shape of the simulated pressure signal.
#[derive(Clone, Copy, Debug)]
pub struct PressureProfile {
    pub base_pa: f64,
    /// Peak deviation from the base (Pa).
    pub swing_pa: f64,
    pub period_s: f64,
    /// Peak sensor noise (Pa).
    pub noise_pa: f64,
}

impl PressureProfile {
    pub const DEFAULT: Self = Self {
        base_pa: SEA_LEVEL_PRESSURE_PA,
        swing_pa: 120.0,
        period_s: 180.0,
        noise_pa: 0.6,
    };

    /// Pressure at simulated time `t_s` for the `sample`-th reading.
    pub fn pressure_at(
        &self,
        t_s: f64,
        sample: u64,
    ) -> f64 {
        self.swing_pa
            .mul_add(-(t_s * TAU / self.period_s).sin(), self.base_pa)
            + self.noise_pa * noise(sample)
    }
}

impl Default for PressureProfile {
    fn default() -> Self { Self::DEFAULT }
}

/// Deterministic noise in `[-1, 1)` (splitmix64 finalizer).
fn noise(sample: u64) -> f64 {
    let mut x = sample.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    (x >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
}

/// One sampler instance.
pub struct SimSampler {
    profile: PressureProfile,
    config: Option<SamplingConfig>,
    running: bool,
    next_due_s: Option<f64>,
    samples: u64,
    latest: Option<f64>,
}

impl SimSampler {
    fn interval_s(&self) -> f64 {
        self.config
            .as_ref()
            .map_or(SETTLE_DELAY_S, SamplingConfig::batch_interval_s)
    }

    fn sample(
        &mut self,
        t_s: f64,
    ) -> f64 {
        let pressure = self.profile.pressure_at(t_s, self.samples);
        self.samples += 1;
        self.latest = Some(pressure);
        pressure
    }
}

impl Sampler for SimSampler {
    fn start(&mut self) -> Result<(), SamplerError> {
        self.running = true;
        self.next_due_s = None;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SamplerError> {
        self.running = false;
        Ok(())
    }

    fn latest(&self) -> Option<f64> { self.latest }
}

impl HostSampler for SimSampler {
    fn poll(
        &mut self,
        now_s: f64,
    ) -> Option<SimReading> {
        if !self.running {
            return None;
        }
        let interval = self.interval_s();
        let due = *self.next_due_s.get_or_insert(now_s + interval);
        if now_s < due {
            return None;
        }
        self.next_due_s = Some(now_s + interval);

        match self.config {
            None => Some(SimReading::Single(self.sample(now_s))),
            Some(config) => {
                let count = config.batch_size;
                let batch = (0..count)
                    .map(|i| {
                        let age = f64::from(count - 1 - i) / config.frequency_hz;
                        self.sample(now_s - age)
                    })
                    .collect();
                Some(SimReading::Batch(batch))
            }
        }
    }
}

/// Factory handing out [`SimSampler`]s over one pressure profile.
pub struct SimBarometer {
    profile: PressureProfile,
    samples: u64,
}

impl SimBarometer {
    pub const fn new(profile: PressureProfile) -> Self { Self { profile, samples: 0 } }
}

impl SamplerFactory for SimBarometer {
    type Sampler = SimSampler;

    fn create(
        &mut self,
        config: Option<SamplingConfig>,
    ) -> Result<SimSampler, SamplerError> {
        // Keep the noise sequence going across instances.
        self.samples += 1_000;
        Ok(SimSampler {
            profile: self.profile,
            config,
            running: false,
            next_due_s: None,
            samples: self.samples,
            latest: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(config: Option<SamplingConfig>) -> SimSampler {
        let mut factory = SimBarometer::new(PressureProfile::DEFAULT);
        let mut sampler = factory.create(config).unwrap();
        sampler.start().unwrap();
        sampler
    }

    #[test]
    fn test_noise_range() {
        for sample in 0..1_000 {
            let n = noise(sample);
            assert!((-1.0..1.0).contains(&n));
        }
        assert_ne!(noise(1), noise(2));
    }

    #[test]
    fn test_profile_stays_near_base() {
        let profile = PressureProfile::DEFAULT;
        for t in 0..360 {
            let pressure = profile.pressure_at(f64::from(t), t as u64);
            assert!((pressure - profile.base_pa).abs() <= profile.swing_pa + profile.noise_pa);
        }
    }

    #[test]
    fn test_settle_delivers_single_value() {
        let mut sampler = started(None);
        assert!(sampler.poll(0.0).is_none());
        assert!(matches!(sampler.poll(SETTLE_DELAY_S), Some(SimReading::Single(_))));
        assert!(sampler.latest().is_some());
    }

    #[test]
    fn test_configured_sampler_delivers_batches() {
        let mut sampler = started(Some(SamplingConfig::NORMAL));
        assert!(sampler.poll(10.0).is_none());
        assert!(sampler.poll(12.5).is_none());
        match sampler.poll(13.0) {
            Some(SimReading::Batch(batch)) => assert_eq!(batch.len(), 3),
            other => panic!("expected a batch, got {other:?}"),
        }
        assert!(sampler.poll(14.0).is_none());
    }

    #[test]
    fn test_stopped_sampler_is_silent() {
        let mut sampler = started(None);
        sampler.stop().unwrap();
        assert!(sampler.poll(100.0).is_none());
    }
}

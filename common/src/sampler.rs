//! Host adapter interfaces consumed by the core.
//!
//! - [`SamplerFactory`] / [`Sampler`]: the barometer, one instance per
//!   configuration.
//! - [`TickSource`]: the minute clock the face subscribes to.
//!
//! [`ActiveSampler`] owns a started sampler and guarantees it is stopped when
//! it goes away, whether through [`ActiveSampler::release`] or by being
//! dropped on an abnormal path.

use crate::error::SamplerError;
use crate::sampling::SamplingConfig;

/// One sampler instance created by the host.
pub trait Sampler {
    fn start(&mut self) -> Result<(), SamplerError>;

    fn stop(&mut self) -> Result<(), SamplerError>;

    /// Last pressure the sensor reported, if the host exposes it.
    fn latest(&self) -> Option<f64> { None }
}

/// Creates sampler instances.
pub trait SamplerFactory {
    type Sampler: Sampler;

    /// `None` asks for the host's default configuration (settle phase).
    fn create(
        &mut self,
        config: Option<SamplingConfig>,
    ) -> Result<Self::Sampler, SamplerError>;
}

/// Host clock delivering minute ticks.
pub trait TickSource {
    fn subscribe(&mut self);

    fn unsubscribe(&mut self);
}

/// A started sampler that is stopped exactly once.
pub struct ActiveSampler<S: Sampler> {
    inner: S,
    config: Option<SamplingConfig>,
    running: bool,
}

impl<S: Sampler> ActiveSampler<S> {
    /// Start `inner`. If the host refuses, `inner` is dropped without a stop
    /// call since it never ran.
    pub fn start(
        mut inner: S,
        config: Option<SamplingConfig>,
    ) -> Result<Self, SamplerError> {
        inner.start()?;
        Ok(Self {
            inner,
            config,
            running: true,
        })
    }

    /// Configuration the sampler was created with (`None` = host default).
    #[inline]
    pub const fn config(&self) -> Option<SamplingConfig> { self.config }

    #[inline]
    pub fn latest(&self) -> Option<f64> { self.inner.latest() }

    #[inline]
    pub const fn get(&self) -> &S { &self.inner }

    #[inline]
    pub fn get_mut(&mut self) -> &mut S { &mut self.inner }

    /// Stop the sampler. It counts as released even if the host refused.
    pub fn release(mut self) -> Result<(), SamplerError> {
        self.running = false;
        self.inner.stop()
    }
}

impl<S: Sampler> Drop for ActiveSampler<S> {
    fn drop(&mut self) {
        if self.running {
            self.running = false;
            // Nothing to report to on this path.
            let _ = self.inner.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::SamplerOp;

    struct CountingSampler<'a> {
        starts: &'a Cell<u32>,
        stops: &'a Cell<u32>,
        fail_start: bool,
    }

    impl Sampler for CountingSampler<'_> {
        fn start(&mut self) -> Result<(), SamplerError> {
            if self.fail_start {
                return Err(SamplerError::new(SamplerOp::Start));
            }
            self.starts.set(self.starts.get() + 1);
            Ok(())
        }

        fn stop(&mut self) -> Result<(), SamplerError> {
            self.stops.set(self.stops.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_release_stops_once() {
        let (starts, stops) = (Cell::new(0), Cell::new(0));
        let sampler = CountingSampler {
            starts: &starts,
            stops: &stops,
            fail_start: false,
        };
        let active = ActiveSampler::start(sampler, Some(SamplingConfig::NORMAL)).unwrap();
        assert_eq!(active.config(), Some(SamplingConfig::NORMAL));
        assert_eq!(active.latest(), None);
        active.release().unwrap();
        assert_eq!(starts.get(), 1);
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_drop_stops_running_sampler() {
        let (starts, stops) = (Cell::new(0), Cell::new(0));
        {
            let sampler = CountingSampler {
                starts: &starts,
                stops: &stops,
                fail_start: false,
            };
            let _active = ActiveSampler::start(sampler, None).unwrap();
        }
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_failed_start_is_not_stopped() {
        let (starts, stops) = (Cell::new(0), Cell::new(0));
        let sampler = CountingSampler {
            starts: &starts,
            stops: &stops,
            fail_start: true,
        };
        let result = ActiveSampler::start(sampler, None);
        assert_eq!(result.err(), Some(SamplerError::new(SamplerOp::Start)));
        assert_eq!(starts.get(), 0);
        assert_eq!(stops.get(), 0);
    }
}

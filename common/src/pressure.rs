//! Pressure readings as delivered by the Sampler Adapter.
//!
//! A reading event may carry a single value, a batch, both, or neither. The
//! core never assumes which; [`Reading::sample`] picks the best available
//! source and [`PressureSample::aggregate`] collapses it to one scalar.

/// One pressure observation in Pascals.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PressureSample<'a> {
    Single(f64),
    /// Non-empty, in arrival order.
    Batch(&'a [f64]),
}

impl PressureSample<'_> {
    /// Arithmetic mean of the sample.
    pub fn aggregate(&self) -> f64 {
        match self {
            Self::Single(value) => *value,
            Self::Batch(values) => values.iter().sum::<f64>() / values.len() as f64,
        }
    }
}

/// Payload of one sampler reading event.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Reading<'a> {
    pub value: Option<f64>,
    pub batch: Option<&'a [f64]>,
}

impl<'a> Reading<'a> {
    pub const fn single(value: f64) -> Self {
        Self {
            value: Some(value),
            batch: None,
        }
    }

    pub const fn batch(values: &'a [f64]) -> Self {
        Self {
            value: None,
            batch: Some(values),
        }
    }

    /// Reading event with no payload at all.
    pub const fn empty() -> Self {
        Self {
            value: None,
            batch: None,
        }
    }

    /// A non-empty batch wins over the scalar value.
    pub fn sample(&self) -> Option<PressureSample<'a>> {
        match (self.batch, self.value) {
            (Some(values), _) if !values.is_empty() => Some(PressureSample::Batch(values)),
            (_, Some(value)) => Some(PressureSample::Single(value)),
            _ => None,
        }
    }

    /// Aggregated pressure, if the event carried any.
    #[inline]
    pub fn pressure(&self) -> Option<f64> { self.sample().map(|sample| sample.aggregate()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_collapses_to_mean() {
        let batch = [100_000.0, 100_010.0, 100_020.0];
        let reading = Reading::batch(&batch);
        assert_eq!(reading.pressure(), Some(100_010.0));
    }

    #[test]
    fn test_single_value() {
        let reading = Reading::single(99_500.0);
        assert_eq!(reading.sample(), Some(PressureSample::Single(99_500.0)));
        assert_eq!(reading.pressure(), Some(99_500.0));
    }

    #[test]
    fn test_batch_preferred_over_single() {
        let batch = [90_000.0, 92_000.0];
        let reading = Reading {
            value: Some(50_000.0),
            batch: Some(&batch),
        };
        assert_eq!(reading.pressure(), Some(91_000.0));
    }

    #[test]
    fn test_empty_batch_falls_back_to_single() {
        let reading = Reading {
            value: Some(98_000.0),
            batch: Some(&[]),
        };
        assert_eq!(reading.pressure(), Some(98_000.0));
    }

    #[test]
    fn test_no_payload() {
        assert_eq!(Reading::empty().sample(), None);
        assert_eq!(Reading::batch(&[]).pressure(), None);
        assert_eq!(Reading::default(), Reading::empty());
    }
}

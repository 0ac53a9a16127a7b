//! Altitude trend detection.
//!
//! A hysteresis filter with two debounces:
//!
//! - **Magnitude**: movements smaller than the delta threshold (2.3 m) are
//!   noise and never change the reference altitude.
//! - **Time**: a trend that is not corroborated by a significant movement for
//!   the time threshold (20 s) decays back to [`Trend::None`].
//!
//! The decision does not depend on how many readings arrived in between;
//! only the altitude band and the elapsed time matter.

use crate::thresholds::{DELTA_THRESHOLD_M, TIME_THRESHOLD_S};

/// Coarse direction of altitude change.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Trend {
    #[default]
    None,
    Up,
    Down,
}

impl Trend {
    /// Short label for logs and the debug page.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "--",
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

/// Debounce thresholds of the detector.
///
/// The defaults come from [`crate::thresholds`]; any other value is a debug
/// override supplied through the application config.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TrendThresholds {
    pub delta_m: f64,
    pub time_s: i64,
}

impl TrendThresholds {
    pub const DEFAULT: Self = Self {
        delta_m: DELTA_THRESHOLD_M,
        time_s: TIME_THRESHOLD_S,
    };
}

impl Default for TrendThresholds {
    fn default() -> Self { Self::DEFAULT }
}

/// State owned by the trend detector.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct TrendState {
    /// Reference altitude (meters); set on first observation and on every
    /// significant change.
    pub last_relevant_altitude: Option<f64>,
    /// Seconds of the last reference or decay update.
    pub last_update_timestamp: i64,
    pub current_trend: Trend,
}

impl TrendState {
    pub const fn new() -> Self {
        Self {
            last_relevant_altitude: None,
            last_update_timestamp: 0,
            current_trend: Trend::None,
        }
    }
}

/// Feed one altitude observation using the default thresholds.
#[inline]
pub fn update_trend(
    state: &mut TrendState,
    new_altitude_m: f64,
    now_s: i64,
) -> Trend {
    update_trend_with(state, new_altitude_m, now_s, &TrendThresholds::DEFAULT)
}

/// Feed one altitude observation.
pub fn update_trend_with(
    state: &mut TrendState,
    new_altitude_m: f64,
    now_s: i64,
    thresholds: &TrendThresholds,
) -> Trend {
    let Some(reference) = state.last_relevant_altitude else {
        // First observation can't have a direction.
        state.last_relevant_altitude = Some(new_altitude_m);
        state.last_update_timestamp = now_s;
        return Trend::None;
    };

    let time_diff = now_s - state.last_update_timestamp;
    let alt_diff = new_altitude_m - reference;

    if libm::fabs(alt_diff) < thresholds.delta_m {
        if time_diff < thresholds.time_s {
            return state.current_trend;
        }
        state.last_update_timestamp = now_s;
        state.current_trend = Trend::None;
        return Trend::None;
    }

    state.last_relevant_altitude = Some(new_altitude_m);
    state.last_update_timestamp = now_s;
    state.current_trend = if alt_diff > 0.0 { Trend::Up } else { Trend::Down };
    state.current_trend
}

/// Trend state bundled with the thresholds it is evaluated against.
#[derive(Clone, Copy, Debug)]
pub struct TrendDetector {
    state: TrendState,
    thresholds: TrendThresholds,
}

impl TrendDetector {
    pub const fn new(thresholds: TrendThresholds) -> Self {
        Self {
            state: TrendState::new(),
            thresholds,
        }
    }

    #[inline]
    pub fn update(
        &mut self,
        new_altitude_m: f64,
        now_s: i64,
    ) -> Trend {
        update_trend_with(&mut self.state, new_altitude_m, now_s, &self.thresholds)
    }

    #[inline]
    pub const fn state(&self) -> &TrendState { &self.state }

    #[inline]
    pub const fn trend(&self) -> Trend { self.state.current_trend }

    #[inline]
    pub const fn thresholds(&self) -> &TrendThresholds { &self.thresholds }
}

impl Default for TrendDetector {
    fn default() -> Self { Self::new(TrendThresholds::DEFAULT) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altitude::pressure_altitude_m;

    const T: i64 = 1_000;
    const A: f64 = 250.0;

    /// State with reference altitude `A` committed at time `T` with `trend`.
    fn committed(trend: Trend) -> TrendState {
        TrendState {
            last_relevant_altitude: Some(A),
            last_update_timestamp: T,
            current_trend: trend,
        }
    }

    #[test]
    fn test_bootstrap_returns_none() {
        for altitude in [0.0, -12.5, 4_000.0] {
            let mut state = TrendState::new();
            assert_eq!(update_trend(&mut state, altitude, T), Trend::None);
            assert_eq!(state.last_relevant_altitude, Some(altitude));
            assert_eq!(state.current_trend, Trend::None);
        }
    }

    #[test]
    fn test_small_change_keeps_trend_within_window() {
        let mut state = committed(Trend::Up);
        assert_eq!(update_trend(&mut state, A + 1.0, T + 5), Trend::Up);
        assert_eq!(state.last_relevant_altitude, Some(A));
        assert_eq!(state.last_update_timestamp, T);

        let mut state = committed(Trend::Down);
        assert_eq!(update_trend(&mut state, A - 2.0, T + 19), Trend::Down);
    }

    #[test]
    fn test_small_change_decays_after_window() {
        let mut state = committed(Trend::Up);
        assert_eq!(update_trend(&mut state, A + 1.0, T + 25), Trend::None);
        assert_eq!(state.current_trend, Trend::None);
        assert_eq!(state.last_update_timestamp, T + 25);
        // Reference altitude is untouched by a decay
        assert_eq!(state.last_relevant_altitude, Some(A));
    }

    #[test]
    fn test_decay_boundary_is_inclusive() {
        let mut state = committed(Trend::Down);
        assert_eq!(update_trend(&mut state, A, T + TIME_THRESHOLD_S), Trend::None);
    }

    #[test]
    fn test_rise() {
        let mut state = committed(Trend::None);
        assert_eq!(update_trend(&mut state, A + 3.0, T + 1), Trend::Up);
        assert_eq!(state.last_relevant_altitude, Some(A + 3.0));
        assert_eq!(state.last_update_timestamp, T + 1);
    }

    #[test]
    fn test_fall() {
        let mut state = committed(Trend::Up);
        assert_eq!(update_trend(&mut state, A - 3.0, T + 1), Trend::Down);
        assert_eq!(state.last_relevant_altitude, Some(A - 3.0));
        assert_eq!(state.current_trend, Trend::Down);
    }

    #[test]
    fn test_threshold_edge_counts_as_movement() {
        let mut state = committed(Trend::None);
        assert_eq!(update_trend(&mut state, A + DELTA_THRESHOLD_M, T + 1), Trend::Up);
    }

    #[test]
    fn test_slow_drift_does_not_accumulate() {
        // Sub-threshold steps are always measured against the same reference,
        // so the trend only flips once the total drift clears the band.
        let mut state = committed(Trend::None);
        assert_eq!(update_trend(&mut state, A + 1.0, T + 1), Trend::None);
        assert_eq!(update_trend(&mut state, A + 2.0, T + 2), Trend::None);
        assert_eq!(update_trend(&mut state, A + 2.5, T + 3), Trend::Up);
    }

    #[test]
    fn test_pressure_sequence_scenario() {
        let mut state = TrendState::new();
        let pressures = [101_325.0, 101_000.0, 100_500.0];
        let expected_altitudes = [0.0, 27.1, 68.9];
        let expected_trends = [Trend::None, Trend::Up, Trend::Up];

        for (i, pressure) in pressures.iter().enumerate() {
            let altitude = pressure_altitude_m(*pressure).unwrap();
            assert!((altitude - expected_altitudes[i]).abs() < 0.5, "altitude {altitude} at step {i}");
            let trend = update_trend(&mut state, altitude, T + i as i64);
            assert_eq!(trend, expected_trends[i], "trend at step {i}");
        }
    }

    #[test]
    fn test_detector_with_override() {
        let mut detector = TrendDetector::new(TrendThresholds {
            delta_m: 0.5,
            time_s: 5,
        });
        assert_eq!(detector.update(A, T), Trend::None);
        assert_eq!(detector.update(A + 1.0, T + 1), Trend::Up);
        assert_eq!(detector.update(A + 1.2, T + 3), Trend::Up);
        assert_eq!(detector.update(A + 1.2, T + 6), Trend::None);
        assert_eq!(detector.trend(), Trend::None);

        // The same sequence is noise with the default thresholds
        let mut detector = TrendDetector::default();
        detector.update(A, T);
        assert_eq!(detector.update(A + 1.0, T + 1), Trend::None);
    }

    #[test]
    fn test_trend_labels() {
        assert_eq!(Trend::None.label(), "--");
        assert_eq!(Trend::Down.label(), "DOWN");
    }
}

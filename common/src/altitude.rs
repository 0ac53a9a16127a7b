//! Pressure altitude estimation.
//!
//! Altitude is always computed and stored in meters. The user's unit
//! preference only matters when a value is turned into a [`RenderFrame`],
//! so the trend thresholds stay unit independent.

use crate::error::AltimeterError;
use crate::thresholds::{METERS_PER_FOOT, PRESSURE_ALTITUDE_SCALE_FT, PRESSURE_EXPONENT, SEA_LEVEL_PRESSURE_PA};
use crate::trend::Trend;

/// Distance unit used for display.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    /// Unit label rendered next to the altitude value.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Metric => "m",
            Self::Imperial => "ft",
        }
    }

    /// Convert a canonical altitude in meters to this unit.
    #[inline]
    pub fn convert(
        self,
        meters: f64,
    ) -> f64 {
        match self {
            Self::Metric => meters,
            Self::Imperial => meters_to_feet(meters),
        }
    }
}

#[inline]
pub fn meters_to_feet(meters: f64) -> f64 { meters / METERS_PER_FOOT }

#[inline]
pub fn feet_to_meters(feet: f64) -> f64 { feet * METERS_PER_FOOT }

/// Reject pressures the atmosphere model cannot handle.
pub fn validate_pressure(pressure_pa: f64) -> Result<f64, AltimeterError> {
    if pressure_pa.is_finite() && pressure_pa > 0.0 {
        Ok(pressure_pa)
    } else {
        Err(AltimeterError::InvalidPressure(pressure_pa))
    }
}

/// Pressure altitude in meters (ISA approximation, no temperature correction).
///
/// `(1 - (p / 101325)^0.190284) * 145366.45` feet, converted to meters.
pub fn pressure_altitude_m(pressure_pa: f64) -> Result<f64, AltimeterError> {
    let pressure_pa = validate_pressure(pressure_pa)?;
    let ratio = pressure_pa / SEA_LEVEL_PRESSURE_PA;
    let feet = (1.0 - libm::pow(ratio, PRESSURE_EXPONENT)) * PRESSURE_ALTITUDE_SCALE_FT;
    Ok(feet_to_meters(feet))
}

/// Pressure altitude expressed in `unit`.
pub fn estimate_altitude(
    pressure_pa: f64,
    unit: Unit,
) -> Result<f64, AltimeterError> {
    pressure_altitude_m(pressure_pa).map(|meters| unit.convert(meters))
}

/// What the rendering collaborator draws for one update.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RenderFrame {
    /// Altitude in `unit`, floored to a whole number.
    pub altitude: i64,
    pub unit: Unit,
    pub trend: Trend,
}

impl RenderFrame {
    pub fn new(
        altitude_m: f64,
        unit: Unit,
        trend: Trend,
    ) -> Self {
        Self {
            altitude: libm::floor(unit.convert(altitude_m)) as i64,
            unit,
            trend,
        }
    }

    #[inline]
    pub const fn unit_label(&self) -> &'static str { self.unit.label() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sea_level_is_zero() {
        let altitude = estimate_altitude(101_325.0, Unit::Metric).unwrap();
        assert!(altitude.abs() < 1e-6);
    }

    #[test]
    fn test_altitude_decreases_with_pressure() {
        let mut previous = f64::INFINITY;
        let mut pressure = 1_000.0;
        while pressure <= 101_325.0 {
            let altitude = pressure_altitude_m(pressure).unwrap();
            assert!(altitude < previous, "not decreasing at {pressure} Pa");
            previous = altitude;
            pressure += 250.0;
        }
    }

    #[test]
    fn test_feet_round_trip() {
        for meters in [0.0, 1.0, 27.083, 1_234.5, -40.0, 8_848.86] {
            let back = feet_to_meters(meters_to_feet(meters));
            assert!((back - meters).abs() < 1e-9);
        }
    }

    #[test]
    fn test_imperial_matches_formula_feet() {
        let pressure = 90_000.0;
        let expected_ft = (1.0 - libm::pow(pressure / 101_325.0, 0.190_284)) * 145_366.45;
        let feet = estimate_altitude(pressure, Unit::Imperial).unwrap();
        assert!((feet - expected_ft).abs() < 1e-6);
    }

    #[test]
    fn test_known_altitude() {
        // 100500 Pa sits roughly 69 m above the reference level
        let altitude = pressure_altitude_m(100_500.0).unwrap();
        assert!((altitude - 68.9).abs() < 0.5, "got {altitude}");
    }

    #[test]
    fn test_rejects_invalid_pressure() {
        assert_eq!(pressure_altitude_m(0.0), Err(AltimeterError::InvalidPressure(0.0)));
        assert_eq!(pressure_altitude_m(-5.0), Err(AltimeterError::InvalidPressure(-5.0)));
        assert!(pressure_altitude_m(f64::NAN).is_err());
        assert!(pressure_altitude_m(f64::INFINITY).is_err());
        assert!(estimate_altitude(f64::NEG_INFINITY, Unit::Imperial).is_err());
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(Unit::Metric.label(), "m");
        assert_eq!(Unit::Imperial.label(), "ft");
        assert_eq!(Unit::default(), Unit::Metric);
    }

    #[test]
    fn test_render_frame_floors_value() {
        let frame = RenderFrame::new(27.9, Unit::Metric, Trend::Up);
        assert_eq!(frame.altitude, 27);
        assert_eq!(frame.unit_label(), "m");

        let frame = RenderFrame::new(-0.5, Unit::Metric, Trend::None);
        assert_eq!(frame.altitude, -1);

        let frame = RenderFrame::new(30.5, Unit::Imperial, Trend::Down);
        assert_eq!(frame.altitude, 100);
        assert_eq!(frame.unit_label(), "ft");
    }
}

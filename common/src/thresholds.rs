//! Centralized altimeter constants.
//!
//! All thresholds are compile-time constants with validation assertions, the
//! same way for the atmosphere model, the trend detector and the sampler
//! configurations. The trend detector can only be retuned at runtime through
//! [`TrendThresholds`](crate::trend::TrendThresholds), which defaults to the
//! values below.
//!
//! # Usage
//!
//! ```ignore
//! use altimeter_common::thresholds::{DELTA_THRESHOLD_M, TIME_THRESHOLD_S};
//! ```

// =============================================================================
// ISA Pressure Altitude Model
// =============================================================================

/// Standard sea level pressure in Pascals. Yields zero altitude.
pub const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;

/// Exponent of the pressure ratio in the pressure altitude formula.
pub const PRESSURE_EXPONENT: f64 = 0.190_284;

/// Scale of the pressure altitude formula, in feet.
pub const PRESSURE_ALTITUDE_SCALE_FT: f64 = 145_366.45;

/// Exact length of one international foot in meters.
pub const METERS_PER_FOOT: f64 = 0.3048;

const _: () = assert!(PRESSURE_EXPONENT > 0.0 && PRESSURE_EXPONENT < 1.0);
const _: () = assert!(METERS_PER_FOOT > 0.0);

// =============================================================================
// Trend Detection
// =============================================================================

/// Altitude change (meters) below which a movement is treated as noise.
pub const DELTA_THRESHOLD_M: f64 = 2.3;

/// Seconds a sticky trend may persist without a significant movement.
pub const TIME_THRESHOLD_S: i64 = 20;

const _: () = assert!(DELTA_THRESHOLD_M > 0.0);
const _: () = assert!(TIME_THRESHOLD_S > 0);

// =============================================================================
// Sampling Rates
// =============================================================================

/// Sampling frequency while the display is active.
pub const NORMAL_FREQUENCY_HZ: f64 = 1.0;

/// Readings per batch while the display is active.
pub const NORMAL_BATCH_SIZE: u32 = 3;

/// Sampling frequency in always-on-dim mode.
pub const LOW_POWER_FREQUENCY_HZ: f64 = 0.5;

/// Readings per batch in always-on-dim mode.
pub const LOW_POWER_BATCH_SIZE: u32 = 30;

// Low-power mode must wake the host less often than normal mode.
const _: () = assert!(LOW_POWER_FREQUENCY_HZ < NORMAL_FREQUENCY_HZ);
const _: () = assert!(NORMAL_BATCH_SIZE < LOW_POWER_BATCH_SIZE);
const _: () = assert!(NORMAL_BATCH_SIZE > 0);

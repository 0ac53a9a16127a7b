//! Timing constants for the simulator.
//!
//! These use `std::time::Duration` or simulated seconds, so they live here
//! rather than in the `no_std` common crate.

#[cfg(feature = "window")]
use std::time::Duration;

/// Target frame time of the interactive window (~20 FPS).
#[cfg(feature = "window")]
pub const FRAME_TIME: Duration = Duration::from_millis(50);

/// Simulated seconds that popups remain visible.
pub const POPUP_DURATION_S: f64 = 2.0;

/// Simulated seconds per step of a headless session.
pub const SIM_STEP_S: f64 = 0.5;

/// Default headless session length in simulated seconds.
pub const DEFAULT_SESSION_S: u32 = 240;

/// Simulated seconds between two scripted pressure nudges.
pub const NUDGE_INTERVAL_S: f64 = 6.0;

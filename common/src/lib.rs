//! Platform-agnostic core of the barometric altimeter watch face.
//!
//! - [`altitude`]: pressure to altitude conversion, display units
//! - [`trend`]: magnitude and time debounced trend detector
//! - [`sampling`]: sampling-rate controller driven by the display power state
//! - [`sampler`]: host adapter traits and the scoped sampler guard
//! - [`app`]: owned application context and event dispatch
//! - [`simulation`]: synthetic pressure source behind the sampler interface
//! - [`log_buffer`]: diagnostic ring buffer
//! - [`widgets`], [`render`], [`styles`], [`colors`], [`config`]: the face
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` outside of tests and has no dependency on
//! `std::time`; time arrives with the host events.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod altitude;
pub mod app;
pub mod clock;
pub mod colors;
pub mod config;
pub mod error;
pub mod log_buffer;
pub mod pressure;
pub mod render;
pub mod sampler;
pub mod sampling;
pub mod simulation;
pub mod styles;
pub mod thresholds;
pub mod trend;
pub mod widgets;

// Re-export commonly used items
pub use altitude::{RenderFrame, Unit, estimate_altitude, pressure_altitude_m};
pub use app::{Altimeter, AppConfig, Event, Update};
pub use clock::{ClockFormat, ClockTime, format_clock};
pub use error::{AltimeterError, SamplerError, SamplerOp};
pub use pressure::{PressureSample, Reading};
pub use sampler::{ActiveSampler, Sampler, SamplerFactory, TickSource};
pub use sampling::{DisplayPowerState, SamplingConfig, SamplingController, SamplingMode};
pub use trend::{Trend, TrendState, update_trend};

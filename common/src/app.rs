//! Application context and event dispatch.
//!
//! [`Altimeter`] is created once at startup and owns everything the face
//! needs between events: the sampler factory and the running sampler, the
//! tick subscription, the sampling controller, the trend detector, the last
//! accepted altitude and the diagnostic log.
//!
//! The host delivers events one at a time through [`Altimeter::handle`] and
//! renders whatever comes back in the [`Update`]. Handlers run to completion
//! and never call back into the host except through the sampler factory.

use core::fmt;

use crate::altitude::{RenderFrame, Unit, pressure_altitude_m};
use crate::clock::{ClockFormat, ClockText, ClockTime, format_clock};
use crate::error::{AltimeterError, SamplerError};
use crate::log_buffer::{DebugLog, LogLevel};
use crate::pressure::Reading;
use crate::sampler::{ActiveSampler, SamplerFactory, TickSource};
use crate::sampling::{DisplayPowerState, SamplerAction, SamplingController, SamplingMode, Transition};
use crate::trend::{Trend, TrendDetector, TrendThresholds};

// =============================================================================
// Configuration
// =============================================================================

/// User preferences and host capabilities, fixed at startup.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AppConfig {
    pub unit: Unit,
    pub clock_format: ClockFormat,
    /// Outcome of the host's always-on-dim permission check.
    pub aod_allowed: bool,
    pub trend: TrendThresholds,
    /// Lowest level kept in the diagnostic log.
    pub log_level: LogLevel,
}

impl AppConfig {
    pub const DEFAULT: Self = Self {
        unit: Unit::Metric,
        clock_format: ClockFormat::H24,
        aod_allowed: true,
        trend: TrendThresholds::DEFAULT,
        log_level: LogLevel::Trace,
    };
}

impl Default for AppConfig {
    fn default() -> Self { Self::DEFAULT }
}

// =============================================================================
// Events
// =============================================================================

/// Input delivered by the host event loop.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Event<'a> {
    /// Minute tick from the clock adapter.
    Tick(ClockTime),
    /// Reading callback from the running sampler.
    Reading { reading: Reading<'a>, now_s: i64 },
    DisplayChanged(DisplayPowerState),
}

/// Output for the rendering collaborator. Empty fields mean "unchanged".
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Update {
    pub clock: Option<ClockText>,
    pub frame: Option<RenderFrame>,
}

impl Update {
    #[inline]
    pub fn is_empty(&self) -> bool { self.clock.is_none() && self.frame.is_none() }

    const fn with_frame(frame: Option<RenderFrame>) -> Self { Self { clock: None, frame } }
}

// =============================================================================
// Context
// =============================================================================

/// The altimeter face.
pub struct Altimeter<F: SamplerFactory, T: TickSource> {
    config: AppConfig,
    factory: F,
    ticks: T,
    sampler: Option<ActiveSampler<F::Sampler>>,
    controller: SamplingController,
    trend: TrendDetector,
    power: DisplayPowerState,
    /// Last accepted altitude in meters.
    altitude_m: Option<f64>,
    now_s: i64,
    log: DebugLog,
    running: bool,
}

impl<F: SamplerFactory, T: TickSource> Altimeter<F, T> {
    /// Subscribe to ticks and start the sampler with the host default
    /// configuration. Host failures are logged and leave the context in
    /// [`SamplingMode::Faulted`].
    pub fn start(
        config: AppConfig,
        factory: F,
        ticks: T,
        power: DisplayPowerState,
        now_s: i64,
    ) -> Self {
        let mut app = Self {
            config,
            factory,
            ticks,
            sampler: None,
            controller: SamplingController::new(config.aod_allowed),
            trend: TrendDetector::new(config.trend),
            power,
            altitude_m: None,
            now_s,
            log: DebugLog::with_min_level(config.log_level),
            running: true,
        };

        app.note(LogLevel::Info, format_args!("Altimeter start ({})", power.label()));
        if !config.aod_allowed {
            app.note(LogLevel::Error, format_args!("AOD not permitted, low power off"));
        }
        if config.trend != TrendThresholds::DEFAULT {
            app.note(
                LogLevel::Debug,
                format_args!("Trend override {} m / {} s", config.trend.delta_m, config.trend.time_s),
            );
        }

        app.ticks.subscribe();
        let settle = app.factory.create(None).and_then(|sampler| ActiveSampler::start(sampler, None));
        match settle {
            Ok(sampler) => app.sampler = Some(sampler),
            Err(err) => app.fail(err),
        }
        app
    }

    /// Dispatch one host event.
    pub fn handle(
        &mut self,
        event: Event<'_>,
    ) -> Update {
        match event {
            Event::Tick(time) => self.on_tick(time),
            Event::Reading { reading, now_s } => self.on_reading(reading, now_s),
            Event::DisplayChanged(power) => self.on_display_change(power),
        }
    }

    /// Minute tick: clock text, plus the altitude while dimmed.
    pub fn on_tick(
        &mut self,
        time: ClockTime,
    ) -> Update {
        if !self.running {
            return Update::default();
        }
        self.now_s = time.epoch_s;

        let frame = match self.power {
            DisplayPowerState::AlwaysOnDim => self.frame(),
            DisplayPowerState::Active | DisplayPowerState::Off => None,
        };
        Update {
            clock: Some(format_clock(time.hours, time.minutes, self.config.clock_format)),
            frame,
        }
    }

    /// Sampler reading: estimate, update the trend, leave the settle phase.
    pub fn on_reading(
        &mut self,
        reading: Reading<'_>,
        now_s: i64,
    ) -> Update {
        if !self.running {
            return Update::default();
        }
        self.now_s = now_s;

        let Some(sampler) = &self.sampler else {
            // Stale delivery from a sampler that is already gone.
            self.note(LogLevel::Trace, format_args!("Reading with no sampler dropped"));
            return Update::default();
        };

        let altitude_m = reading
            .pressure()
            .or_else(|| sampler.latest())
            .ok_or(AltimeterError::NoReading)
            .and_then(pressure_altitude_m);
        let altitude_m = match altitude_m {
            Ok(altitude_m) => altitude_m,
            Err(err) => {
                self.note(LogLevel::Warn, format_args!("{err}"));
                return Update::default();
            }
        };

        self.altitude_m = Some(altitude_m);
        let trend = self.trend.update(altitude_m, now_s);
        self.note(LogLevel::Trace, format_args!("Alt {altitude_m:.1} m {}", trend.label()));

        if self.controller.mode() == SamplingMode::Settling {
            let transition = self.controller.on_first_reading(self.power);
            self.note(LogLevel::Info, format_args!("Settled -> {}", transition.to.label()));
            self.apply(transition);
        }

        match self.power {
            DisplayPowerState::Active => Update::with_frame(self.frame()),
            // The dim face refreshes on the minute tick.
            DisplayPowerState::AlwaysOnDim | DisplayPowerState::Off => Update::default(),
        }
    }

    /// Display power change: reconfigure sampling and redraw if visible.
    pub fn on_display_change(
        &mut self,
        power: DisplayPowerState,
    ) -> Update {
        if !self.running || power == self.power {
            return Update::default();
        }
        self.power = power;
        self.note(LogLevel::Debug, format_args!("Display {}", power.label()));

        let transition = self.controller.on_power_change(power);
        self.apply(transition);

        match power {
            DisplayPowerState::Active | DisplayPowerState::AlwaysOnDim => Update::with_frame(self.frame()),
            DisplayPowerState::Off => Update::default(),
        }
    }

    /// Release the sampler and the tick subscription. Idempotent; events
    /// delivered afterwards are ignored.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;

        if let Some(sampler) = self.sampler.take()
            && let Err(err) = sampler.release()
        {
            self.note(LogLevel::Error, format_args!("{err}"));
        }
        self.ticks.unsubscribe();
        self.note(LogLevel::Info, format_args!("Altimeter stopped"));
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn config(&self) -> &AppConfig { &self.config }

    #[inline]
    pub const fn mode(&self) -> SamplingMode { self.controller.mode() }

    #[inline]
    pub const fn power(&self) -> DisplayPowerState { self.power }

    #[inline]
    pub const fn trend(&self) -> Trend { self.trend.trend() }

    #[inline]
    pub const fn altitude_m(&self) -> Option<f64> { self.altitude_m }

    #[inline]
    pub const fn is_running(&self) -> bool { self.running }

    #[inline]
    pub const fn log(&self) -> &DebugLog { &self.log }

    #[inline]
    pub const fn sampler(&self) -> Option<&ActiveSampler<F::Sampler>> { self.sampler.as_ref() }

    #[inline]
    pub fn sampler_mut(&mut self) -> Option<&mut ActiveSampler<F::Sampler>> { self.sampler.as_mut() }

    /// Frame for the last accepted altitude, if any.
    pub fn frame(&self) -> Option<RenderFrame> {
        self.altitude_m
            .map(|altitude_m| RenderFrame::new(altitude_m, self.config.unit, self.trend.trend()))
    }

    // -------------------------------------------------------------------------
    // Sampler lifecycle
    // -------------------------------------------------------------------------

    fn apply(
        &mut self,
        transition: Transition,
    ) {
        match transition.action {
            SamplerAction::Keep => {}
            SamplerAction::Stop => {
                if self.release_sampler().is_ok() {
                    self.note(LogLevel::Info, format_args!("Sampling stopped ({})", transition.to.label()));
                }
            }
            SamplerAction::Reconfigure(config) => {
                // The old instance is fully stopped before the new one exists.
                if self.release_sampler().is_err() {
                    return;
                }
                let started = self
                    .factory
                    .create(Some(config))
                    .and_then(|sampler| ActiveSampler::start(sampler, Some(config)));
                match started {
                    Ok(sampler) => {
                        self.sampler = Some(sampler);
                        self.note(
                            LogLevel::Info,
                            format_args!("Sampler {} Hz x{}", config.frequency_hz, config.batch_size),
                        );
                    }
                    Err(err) => self.fail(err),
                }
            }
        }
    }

    fn release_sampler(&mut self) -> Result<(), SamplerError> {
        let Some(sampler) = self.sampler.take() else {
            return Ok(());
        };
        sampler.release().inspect_err(|err| self.fail(*err))
    }

    fn fail(
        &mut self,
        err: SamplerError,
    ) {
        self.controller.fault();
        self.sampler = None;
        self.note(LogLevel::Error, format_args!("{err}, monitoring off"));
    }

    fn note(
        &mut self,
        level: LogLevel,
        args: fmt::Arguments<'_>,
    ) {
        self.log.push_fmt(level, args, self.now_s);
    }
}

impl<F: SamplerFactory, T: TickSource> Drop for Altimeter<F, T> {
    fn drop(&mut self) { self.shutdown(); }
}

// =============================================================================
// Tests
// =============================================================================

//! One simulator run: the altimeter core plus the host plumbing around it.
//!
//! [`Session`] plays the platform's part. It owns the altimeter, polls the
//! running sampler and the minute clock on simulated time, applies display
//! power changes and pressure nudges, and renders the result to a simulator
//! display. The interactive window and headless sessions both drive it.

use altimeter_common::altitude::RenderFrame;
use altimeter_common::app::{Altimeter, AppConfig, Event, Update};
use altimeter_common::clock::ClockText;
use altimeter_common::colors::BLACK;
use altimeter_common::log_buffer::LogLevel;
use altimeter_common::render::FaceRenderState;
use altimeter_common::sampler::SamplerFactory;
use altimeter_common::sampling::DisplayPowerState;
use altimeter_common::simulation::PressureNudge;
use altimeter_common::widgets::{draw_face, draw_status_popup};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::SimulatorDisplay;

use crate::clock::{SimClock, TickPoller};
use crate::host::{HostSampler, SimReading};
use crate::popup::{Popup, PopupKind};
use crate::screens::{Page, draw_debug_page};

pub struct Session<F>
where
    F: SamplerFactory,
    F::Sampler: HostSampler,
{
    app: Altimeter<F, SimClock>,
    ticks: TickPoller,
    face: FaceRenderState,
    clock: ClockText,
    frame: Option<RenderFrame>,
    page: Page,
    popup: Option<Popup>,
    /// Screen already blanked for [`DisplayPowerState::Off`].
    blank: bool,
    /// Log entries already mirrored to the host logger.
    mirrored: u32,
    start_epoch_s: i64,
    now_s: f64,
}

impl<F> Session<F>
where
    F: SamplerFactory,
    F::Sampler: HostSampler,
{
    /// Start the altimeter with the display active at `start_epoch_s`.
    pub fn new(
        config: AppConfig,
        factory: F,
        start_epoch_s: i64,
    ) -> Self {
        let (clock, ticks) = SimClock::pair();
        let app = Altimeter::start(config, factory, clock, DisplayPowerState::Active, start_epoch_s);
        let mut session = Self {
            app,
            ticks,
            face: FaceRenderState::new(),
            clock: ClockText::new(),
            frame: None,
            page: Page::default(),
            popup: None,
            blank: false,
            mirrored: 0,
            start_epoch_s,
            now_s: 0.0,
        };
        session.mirror_log();
        session
    }

    /// Advance simulated time to `now_s` seconds after the start.
    pub fn step(
        &mut self,
        now_s: f64,
    ) {
        self.now_s = now_s;
        let epoch_s = self.epoch_s();

        if let Some(time) = self.ticks.poll(epoch_s) {
            let update = self.app.on_tick(time);
            self.apply(update);
        }

        let polled = self.app.sampler_mut().and_then(|sampler| sampler.get_mut().poll(now_s));
        if let Some(reading) = polled {
            self.deliver(&reading);
        }

        if self.popup.is_some_and(|popup| popup.is_expired(now_s)) {
            self.popup = None;
        }
        self.mirror_log();
    }

    pub fn set_power(
        &mut self,
        power: DisplayPowerState,
    ) {
        let update = self.app.handle(Event::DisplayChanged(power));
        self.apply(update);
        self.popup = Some(Popup::new(PopupKind::Display(power), self.now_s));
        self.mirror_log();
    }

    /// Apply a synthetic pressure change through the running sampler and
    /// deliver the resulting reading.
    pub fn nudge(
        &mut self,
        nudge: PressureNudge,
    ) {
        let injected = self.app.sampler_mut().and_then(|sampler| sampler.get_mut().nudge(nudge));
        let kind = match injected {
            Some(reading) => {
                self.deliver(&reading);
                PopupKind::Nudge(nudge)
            }
            None => PopupKind::InjectUnavailable,
        };
        self.popup = Some(Popup::new(kind, self.now_s));
        self.mirror_log();
    }

    pub fn toggle_page(&mut self) {
        self.page = self.page.toggle();
        self.popup = None;
        self.face.mark_display_cleared();
    }

    /// Draw the current page.
    pub fn render(
        &mut self,
        display: &mut SimulatorDisplay<Rgb565>,
    ) {
        if self.app.power() == DisplayPowerState::Off {
            if !self.blank {
                display.clear(BLACK).ok();
                self.blank = true;
            }
            self.face.mark_display_cleared();
            return;
        }
        self.blank = false;

        match self.page {
            Page::Face => {
                self.face.update_popup(self.popup.map(|popup| popup.kind()));
                let dim = self.app.power() == DisplayPowerState::AlwaysOnDim;
                if self.face.needs_redraw(self.frame, &self.clock, dim) {
                    draw_face(display, self.frame.as_ref(), &self.clock, dim);
                }
                if let Some(popup) = self.popup {
                    draw_status_popup(display, popup.message());
                }
            }
            Page::Debug => draw_debug_page(display, &self.app),
        }
        self.face.end_frame();
    }

    /// Stop the altimeter and flush its last log entries.
    pub fn shutdown(&mut self) {
        self.app.shutdown();
        self.mirror_log();
    }

    #[inline]
    pub const fn app(&self) -> &Altimeter<F, SimClock> { &self.app }

    /// Frame currently shown on the face.
    #[inline]
    pub const fn frame(&self) -> Option<RenderFrame> { self.frame }

    fn epoch_s(&self) -> i64 { self.start_epoch_s + self.now_s.floor() as i64 }

    fn deliver(
        &mut self,
        reading: &SimReading,
    ) {
        let now_s = self.epoch_s();
        let update = self.app.handle(Event::Reading {
            reading: reading.as_reading(),
            now_s,
        });
        self.apply(update);
    }

    fn apply(
        &mut self,
        update: Update,
    ) {
        if let Some(clock) = update.clock {
            self.clock = clock;
        }
        if let Some(frame) = update.frame {
            self.frame = Some(frame);
        }
    }

    /// Forward new diagnostic log entries to the host logger.
    fn mirror_log(&mut self) {
        let entries = self.app.log();
        for entry in entries.since(self.mirrored) {
            let level = match entry.level {
                LogLevel::Trace => log::Level::Trace,
                LogLevel::Debug => log::Level::Debug,
                LogLevel::Info => log::Level::Info,
                LogLevel::Warn => log::Level::Warn,
                LogLevel::Error => log::Level::Error,
            };
            log::log!(target: "altimeter", level, "[{}] {}", entry.timestamp_s, entry.message);
        }
        self.mirrored = entries.total();
    }
}

/// Ring buffer level matching the host logger filter, so the debug page
/// keeps what the console shows. With logging off only errors are kept.
pub const fn log_level_for(filter: log::LevelFilter) -> LogLevel {
    match filter {
        log::LevelFilter::Off | log::LevelFilter::Error => LogLevel::Error,
        log::LevelFilter::Warn => LogLevel::Warn,
        log::LevelFilter::Info => LogLevel::Info,
        log::LevelFilter::Debug => LogLevel::Debug,
        log::LevelFilter::Trace => LogLevel::Trace,
    }
}

//! Altimeter watch face simulator for desktop.
//!
//! Runs the altimeter core against a simulated barometer (or the synthetic
//! pressure injector with `--inject`) and renders the face with the
//! embedded-graphics-simulator crate. Without the `window` feature, or with
//! `--headless`, a scripted session walks through every display state and
//! can save the final frame as PNG.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod barometer;
mod cli;
mod clock;
mod error;
mod host;
mod popup;
mod screens;
mod script;
mod session;
mod timing;

use std::path::Path;
use std::process::ExitCode;

use altimeter_common::config::SCREEN_SIZE;
use altimeter_common::sampler::SamplerFactory;
use altimeter_common::simulation::{InjectorFactory, sea_level};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use env_logger::Env;
use log::{error, info};

use crate::barometer::{PressureProfile, SimBarometer};
use crate::cli::SimOptions;
use crate::clock::{jitter_sign, wall_clock_s};
use crate::error::SimError;
use crate::host::HostSampler;
use crate::script::{ScriptAction, scripted_actions};
use crate::session::{Session, log_level_for};
use crate::timing::SIM_STEP_S;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), SimError> {
    let mut options = cli::parse()?;
    options.config.log_level = log_level_for(log::max_level());

    if options.inject {
        let pressure = sea_level();
        run(&options, InjectorFactory::new(&pressure))
    } else {
        run(&options, SimBarometer::new(PressureProfile::DEFAULT))
    }
}

fn run<F>(
    options: &SimOptions,
    factory: F,
) -> Result<(), SimError>
where
    F: SamplerFactory,
    F::Sampler: HostSampler,
{
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(SCREEN_SIZE);
    let mut session = Session::new(options.config, factory, wall_clock_s());

    #[cfg(feature = "window")]
    {
        if !options.headless {
            window::run(&mut session, &mut display);
        }
    }
    if options.headless {
        run_headless(&mut session, &mut display, options);
    }

    session.shutdown();
    match session.frame() {
        Some(frame) => info!(
            "Session over: {} {}, trend {}, {} log entries",
            frame.altitude,
            frame.unit_label(),
            frame.trend.label(),
            session.app().log().total()
        ),
        None => info!("Session over without a reading"),
    }

    if let Some(path) = &options.snapshot {
        save_snapshot(&display, path)?;
        info!("Snapshot saved to {}", path.display());
    }
    Ok(())
}

fn run_headless<F>(
    session: &mut Session<F>,
    display: &mut SimulatorDisplay<Rgb565>,
    options: &SimOptions,
) where
    F: SamplerFactory,
    F::Sampler: HostSampler,
{
    let actions = scripted_actions(options.seconds, options.inject, jitter_sign);
    let mut pending = actions.iter().peekable();
    let end_s = f64::from(options.seconds);
    let mut now_s = 0.0;

    while now_s <= end_s {
        while let Some((_, action)) = pending.next_if(|(at, _)| *at <= now_s) {
            match *action {
                ScriptAction::Power(power) => session.set_power(power),
                ScriptAction::Nudge(nudge) => session.nudge(nudge),
                ScriptAction::TogglePage => session.toggle_page(),
            }
        }
        session.step(now_s);
        session.render(display);
        now_s += SIM_STEP_S;
    }
}

fn save_snapshot(
    display: &SimulatorDisplay<Rgb565>,
    path: &Path,
) -> Result<(), SimError> {
    display
        .to_rgb_output_image(&OutputSettingsBuilder::new().build())
        .save_png(path)
        .map_err(|err| SimError::Snapshot {
            path: path.to_owned(),
            message: err.to_string(),
        })
}

#[cfg(feature = "window")]
mod window {
    use std::thread;
    use std::time::Instant;

    use altimeter_common::sampler::SamplerFactory;
    use altimeter_common::sampling::DisplayPowerState;
    use altimeter_common::simulation::PressureNudge;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics_simulator::sdl2::Keycode;
    use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

    use crate::clock::jitter_sign;
    use crate::host::HostSampler;
    use crate::session::Session;
    use crate::timing::FRAME_TIME;

    /// Interactive loop until the window closes.
    ///
    /// A toggles always-on-dim, B the screen, Up/Down climb and descend
    /// through the injector, J jitters and Y switches to the debug page.
    pub fn run<F>(
        session: &mut Session<F>,
        display: &mut SimulatorDisplay<Rgb565>,
    ) where
        F: SamplerFactory,
        F::Sampler: HostSampler,
    {
        let output_settings = OutputSettingsBuilder::new().scale(2).build();
        let mut window = Window::new("Altimeter Sim", &output_settings);
        let started = Instant::now();

        session.render(display);
        window.update(display);

        loop {
            let frame_start = Instant::now();

            for ev in window.events() {
                match ev {
                    SimulatorEvent::Quit => return,
                    SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                        if repeat {
                            continue;
                        }
                        match keycode {
                            Keycode::A => session.set_power(toggle_aod(session.app().power())),
                            Keycode::B => session.set_power(toggle_screen(session.app().power())),
                            Keycode::Up => session.nudge(PressureNudge::Decrease),
                            Keycode::Down => session.nudge(PressureNudge::Increase),
                            Keycode::J => session.nudge(PressureNudge::Jitter {
                                positive: jitter_sign(),
                            }),
                            Keycode::Y => session.toggle_page(),
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            session.step(started.elapsed().as_secs_f64());
            session.render(display);
            window.update(display);

            if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    const fn toggle_aod(power: DisplayPowerState) -> DisplayPowerState {
        match power {
            DisplayPowerState::AlwaysOnDim => DisplayPowerState::Active,
            DisplayPowerState::Active | DisplayPowerState::Off => DisplayPowerState::AlwaysOnDim,
        }
    }

    const fn toggle_screen(power: DisplayPowerState) -> DisplayPowerState {
        match power {
            DisplayPowerState::Off => DisplayPowerState::Active,
            DisplayPowerState::Active | DisplayPowerState::AlwaysOnDim => DisplayPowerState::Off,
        }
    }
}

//! Command-line options.

use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use altimeter_common::altitude::Unit;
use altimeter_common::app::AppConfig;
use altimeter_common::clock::ClockFormat;
use clap::{App, Arg, ArgMatches};

use crate::error::SimError;
use crate::timing::DEFAULT_SESSION_S;

/// Everything the simulator needs from the command line.
#[derive(Clone, Debug)]
pub struct SimOptions {
    pub config: AppConfig,
    /// Drive the face from the pressure injector instead of the barometer.
    pub inject: bool,
    /// Length of a headless session in simulated seconds.
    pub seconds: u32,
    /// Save the final frame as PNG.
    pub snapshot: Option<PathBuf>,
    /// Run the scripted session instead of the interactive window. Always
    /// set without the `window` feature.
    pub headless: bool,
}

fn app() -> App<'static, 'static> {
    App::new("simulator")
        .about("Barometric altimeter watch face simulator")
        .arg(Arg::with_name("imperial").long("imperial").help("Display altitude in feet"))
        .arg(Arg::with_name("12h").long("12h").help("12-hour clock"))
        .arg(Arg::with_name("no-aod").long("no-aod").help("Deny the always-on-dim permission"))
        .arg(Arg::with_name("inject").long("inject").help("Use the synthetic pressure injector"))
        .arg(Arg::with_name("headless").long("headless").help("Run a scripted session without a window"))
        .arg(
            Arg::with_name("trend-delta")
                .long("trend-delta")
                .help("Trend threshold override in meters")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seconds")
                .long("seconds")
                .help("Headless session length in simulated seconds")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("snapshot")
                .long("snapshot")
                .help("Save the final frame to this PNG file")
                .takes_value(true),
        )
}

fn parse_value<T: FromStr>(
    matches: &ArgMatches<'_>,
    flag: &'static str,
) -> Result<Option<T>, SimError> {
    matches
        .value_of(flag)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| SimError::InvalidArgument {
                flag,
                value: raw.to_owned(),
            })
        })
        .transpose()
}

/// Parse options from `args` (program name first). Exits on `--help` and on
/// unknown flags.
pub fn parse_from<I, T>(args: I) -> Result<SimOptions, SimError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = app().get_matches_from(args);

    let mut config = AppConfig {
        unit: if matches.is_present("imperial") { Unit::Imperial } else { Unit::Metric },
        clock_format: if matches.is_present("12h") { ClockFormat::H12 } else { ClockFormat::H24 },
        aod_allowed: !matches.is_present("no-aod"),
        ..AppConfig::default()
    };

    if let Some(delta_m) = parse_value::<f64>(&matches, "trend-delta")? {
        if !(delta_m.is_finite() && delta_m > 0.0) {
            return Err(SimError::InvalidArgument {
                flag: "trend-delta",
                value: delta_m.to_string(),
            });
        }
        config.trend.delta_m = delta_m;
    }

    let seconds = parse_value::<u32>(&matches, "seconds")?.unwrap_or(DEFAULT_SESSION_S);
    if seconds == 0 {
        return Err(SimError::InvalidArgument {
            flag: "seconds",
            value: seconds.to_string(),
        });
    }

    Ok(SimOptions {
        config,
        inject: matches.is_present("inject"),
        seconds,
        snapshot: matches.value_of("snapshot").map(PathBuf::from),
        headless: matches.is_present("headless") || !cfg!(feature = "window"),
    })
}

pub fn parse() -> Result<SimOptions, SimError> { parse_from(std::env::args_os()) }

//! Clock face text.
//!
//! Ticks arrive at minute granularity and carry the wall-clock time plus the
//! epoch seconds the trend detector uses as "now".

use core::fmt::Write;

use heapless::String;

/// Capacity of the formatted clock text (`HH:MM`).
pub const CLOCK_TEXT_LEN: usize = 5;

pub type ClockText = String<CLOCK_TEXT_LEN>;

/// Hour display preference.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ClockFormat {
    #[default]
    H24,
    H12,
}

/// Payload of a clock tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClockTime {
    /// 0..=23
    pub hours: u8,
    /// 0..=59
    pub minutes: u8,
    pub epoch_s: i64,
}

impl ClockTime {
    /// Wall-clock time derived from seconds since the Unix epoch (UTC).
    pub const fn from_epoch(epoch_s: i64) -> Self {
        let seconds_of_day = epoch_s.rem_euclid(86_400);
        Self {
            hours: (seconds_of_day / 3_600) as u8,
            minutes: (seconds_of_day % 3_600 / 60) as u8,
            epoch_s,
        }
    }
}

/// Format `hours:minutes` for the face.
///
/// 24h pads the hour to two digits; 12h shows 1..=12 without padding.
/// Out-of-range values are clamped to 23:59.
pub fn format_clock(
    hours: u8,
    minutes: u8,
    format: ClockFormat,
) -> ClockText {
    let hours = hours.min(23);
    let minutes = minutes.min(59);
    let mut text = ClockText::new();
    let written = match format {
        ClockFormat::H24 => write!(text, "{hours:02}:{minutes:02}"),
        ClockFormat::H12 => {
            let hours = match hours % 12 {
                0 => 12,
                h => h,
            };
            write!(text, "{hours}:{minutes:02}")
        }
    };
    written.ok();
    text
}

//! Debug page: sampling status and the diagnostic log.

use core::fmt::Write;

use altimeter_common::app::Altimeter;
use altimeter_common::colors::{BLACK, GRAY, GREEN, WHITE};
use altimeter_common::config::{
    CENTER_X,
    DEBUG_LINE_HEIGHT,
    DEBUG_MARGIN_X,
    DEBUG_TOP_Y,
    DEBUG_VISIBLE_LINES,
};
use altimeter_common::log_buffer::DebugLog;
use altimeter_common::sampler::{SamplerFactory, TickSource};
use altimeter_common::styles::{CENTERED, LEFT_ALIGNED, LOG_FONT};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

const TITLE_Y: i32 = 30;
const MODE_Y: i32 = 46;
const ALTITUDE_Y: i32 = 58;

const HEADER_COLOR: Rgb565 = GREEN;
const VALUE_COLOR: Rgb565 = WHITE;
const SECTION_COLOR: Rgb565 = GRAY;

pub fn draw_debug_page<F, T>(
    display: &mut SimulatorDisplay<Rgb565>,
    app: &Altimeter<F, T>,
) where
    F: SamplerFactory,
    T: TickSource,
{
    display.clear(BLACK).ok();
    draw_status(display, app);
    draw_log_terminal(display, app.log());
}

fn draw_status<F, T>(
    display: &mut SimulatorDisplay<Rgb565>,
    app: &Altimeter<F, T>,
) where
    F: SamplerFactory,
    T: TickSource,
{
    let header_style = MonoTextStyle::new(LOG_FONT, HEADER_COLOR);
    let value_style = MonoTextStyle::new(LOG_FONT, VALUE_COLOR);
    let section_style = MonoTextStyle::new(LOG_FONT, SECTION_COLOR);

    Text::with_text_style("DEBUG VIEW", Point::new(CENTER_X, TITLE_Y), header_style, CENTERED)
        .draw(display)
        .ok();

    let mut s: String<40> = String::new();
    let _ = write!(s, "{} / {}", app.mode().label(), app.power().label());
    if let Some(config) = app.sampler().and_then(|sampler| sampler.config()) {
        let _ = write!(s, " {}Hz x{}", config.frequency_hz, config.batch_size);
    }
    Text::with_text_style(&s, Point::new(CENTER_X, MODE_Y), value_style, CENTERED)
        .draw(display)
        .ok();

    let mut s: String<40> = String::new();
    match app.altitude_m() {
        Some(altitude_m) => {
            let _ = write!(s, "ALT {altitude_m:.1} m  {}", app.trend().label());
        }
        None => {
            let _ = s.push_str("ALT --");
        }
    }
    Text::with_text_style(&s, Point::new(CENTER_X, ALTITUDE_Y), section_style, CENTERED)
        .draw(display)
        .ok();
}

fn draw_log_terminal(
    display: &mut SimulatorDisplay<Rgb565>,
    log: &DebugLog,
) {
    let skip = log.len().saturating_sub(DEBUG_VISIBLE_LINES);
    let mut y = DEBUG_TOP_Y;

    for entry in log.iter().skip(skip) {
        let style = MonoTextStyle::new(LOG_FONT, entry.level.color());
        let mut line: String<56> = String::new();
        let _ = write!(line, "{} {}", entry.level.prefix(), entry.message);
        Text::with_text_style(&line, Point::new(DEBUG_MARGIN_X, y), style, LEFT_ALIGNED)
            .draw(display)
            .ok();
        y += DEBUG_LINE_HEIGHT;
    }
}

//! The altimeter watch face.
//!
//! Active face: teal background, ring, clock, outlined altitude, unit label
//! and the trend arrow. The always-on-dim face keeps the clock and the
//! altitude in gray on black and hides the trend.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;

use super::primitives::{draw_ring, draw_trend_arrow, draw_value_with_outline};
use crate::altitude::RenderFrame;
use crate::colors::{BACKGROUND, BLACK, DARK_GRAY, GRAY, GREEN, RED, WHITE};
use crate::config::{
    ALTITUDE_PLACEHOLDER,
    ALTITUDE_POS,
    CENTER,
    CLOCK_POS,
    RING_DIAMETER,
    TREND_ARROW_SIZE,
    TREND_POS,
    UNIT_POS,
};
use crate::styles::{CENTERED, CLOCK_STYLE, CLOCK_STYLE_DIM, UNIT_STYLE, VALUE_FONT};
use crate::trend::Trend;

/// Longest altitude text: sign plus 19 digits of an `i64`.
const ALTITUDE_TEXT_LEN: usize = 20;

/// Background color of the face.
#[inline]
pub const fn face_background(dim: bool) -> Rgb565 { if dim { BLACK } else { BACKGROUND } }

/// Arrow color for a trend.
#[inline]
pub const fn trend_color(trend: Trend) -> Rgb565 {
    match trend {
        Trend::Up => GREEN,
        Trend::Down => RED,
        Trend::None => GRAY,
    }
}

/// Altitude value as displayed, or the placeholder before the first reading.
pub fn altitude_text(frame: Option<&RenderFrame>) -> String<ALTITUDE_TEXT_LEN> {
    let mut text = String::new();
    match frame {
        Some(frame) => {
            let _ = write!(text, "{}", frame.altitude);
        }
        None => {
            let _ = text.push_str(ALTITUDE_PLACEHOLDER);
        }
    }
    text
}

/// Draw the clock text.
pub fn draw_clock<D>(
    display: &mut D,
    clock: &str,
    dim: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = if dim { CLOCK_STYLE_DIM } else { CLOCK_STYLE };
    Text::with_text_style(clock, CLOCK_POS, style, CENTERED).draw(display).ok();
}

/// Draw the altitude value, its unit label and, on the active face, the trend.
pub fn draw_altitude<D>(
    display: &mut D,
    frame: Option<&RenderFrame>,
    dim: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let text = altitude_text(frame);
    if dim {
        Text::with_text_style(&text, ALTITUDE_POS, MonoTextStyle::new(VALUE_FONT, GRAY), CENTERED)
            .draw(display)
            .ok();
    } else {
        draw_value_with_outline(display, &text, ALTITUDE_POS, VALUE_FONT, WHITE, CENTERED);
    }

    let Some(frame) = frame else {
        return;
    };
    Text::with_text_style(frame.unit_label(), UNIT_POS, UNIT_STYLE, CENTERED)
        .draw(display)
        .ok();

    if !dim {
        draw_trend_arrow(display, TREND_POS, TREND_ARROW_SIZE, frame.trend, trend_color(frame.trend));
    }
}

/// Redraw the whole face.
pub fn draw_face<D>(
    display: &mut D,
    frame: Option<&RenderFrame>,
    clock: &str,
    dim: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(face_background(dim)).ok();
    if !dim {
        draw_ring(display, CENTER, RING_DIAMETER, DARK_GRAY);
    }
    draw_clock(display, clock, dim);
    draw_altitude(display, frame, dim);
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::altitude::Unit;
    use crate::config::SCREEN_SIZE;

    /// Full-screen framebuffer; `MockDisplay` is too small for the face.
    struct Framebuffer {
        pixels: Vec<Rgb565>,
    }

    impl Framebuffer {
        fn new() -> Self {
            Self {
                pixels: vec![BLACK; (SCREEN_SIZE.width * SCREEN_SIZE.height) as usize],
            }
        }

        fn count_in(
            &self,
            area: Rectangle,
            color: Rgb565,
        ) -> usize {
            area.points()
                .filter(|p| self.pixels[(p.y as u32 * SCREEN_SIZE.width + p.x as u32) as usize] == color)
                .count()
        }
    }

    impl OriginDimensions for Framebuffer {
        fn size(&self) -> Size { SCREEN_SIZE }
    }

    impl DrawTarget for Framebuffer {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            let bounds = self.bounding_box();
            for Pixel(point, color) in pixels {
                if bounds.contains(point) {
                    self.pixels[(point.y as u32 * SCREEN_SIZE.width + point.x as u32) as usize] = color;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_trend_arrow_only_on_active_face() {
        let frame = RenderFrame {
            altitude: 27,
            unit: Unit::Metric,
            trend: Trend::Up,
        };
        let side = (TREND_ARROW_SIZE * 2 + 2) as u32;
        let arrow_area = Rectangle::with_center(TREND_POS, Size::new(side, side));

        let mut active = Framebuffer::new();
        draw_face(&mut active, Some(&frame), "12:00", false);
        assert!(active.count_in(arrow_area, GREEN) > 0);

        let mut dim = Framebuffer::new();
        draw_face(&mut dim, Some(&frame), "12:00", true);
        assert_eq!(dim.count_in(arrow_area, GREEN), 0);
        assert_eq!(dim.count_in(arrow_area, BLACK), arrow_area.points().count());
    }

    #[test]
    fn test_altitude_text() {
        let frame = RenderFrame {
            altitude: -12,
            unit: Unit::Metric,
            trend: Trend::Down,
        };
        assert_eq!(altitude_text(Some(&frame)).as_str(), "-12");
        assert_eq!(altitude_text(None).as_str(), ALTITUDE_PLACEHOLDER);

        let frame = RenderFrame {
            altitude: i64::MIN,
            ..frame
        };
        assert_eq!(altitude_text(Some(&frame)).len(), ALTITUDE_TEXT_LEN);
    }

    #[test]
    fn test_dim_background_is_black() {
        assert_eq!(face_background(true), BLACK);
        assert_eq!(face_background(false), BACKGROUND);
    }

    #[test]
    fn test_trend_colors() {
        assert_eq!(trend_color(Trend::Up), GREEN);
        assert_eq!(trend_color(Trend::Down), RED);
    }
}

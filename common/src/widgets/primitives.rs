//! Low-level drawing primitives shared across widgets.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Triangle};
use embedded_graphics::text::{Text, TextStyle};

use crate::colors::{BLACK, WHITE};
use crate::trend::Trend;

/// Draw a filled trend arrow centered on `center`. Nothing is drawn for
/// [`Trend::None`].
pub fn draw_trend_arrow<D>(
    display: &mut D,
    center: Point,
    half_height: i32,
    trend: Trend,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let (tip, base) = match trend {
        Trend::Up => (center.y - half_height, center.y + half_height),
        Trend::Down => (center.y + half_height, center.y - half_height),
        Trend::None => return,
    };

    Triangle::new(
        Point::new(center.x, tip),
        Point::new(center.x - half_height, base),
        Point::new(center.x + half_height, base),
    )
    .into_styled(PrimitiveStyle::with_fill(color))
    .draw(display)
    .ok();
}

/// Draw a circular outline of `diameter` centered on `center`.
pub fn draw_ring<D>(
    display: &mut D,
    center: Point,
    diameter: u32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::with_center(center, diameter)
        .into_styled(PrimitiveStyle::with_stroke(color, 2))
        .draw(display)
        .ok();
}

/// Pick black or white outline based on perceived brightness of text color.
#[inline]
fn outline_color_for_text(text_color: Rgb565) -> Rgb565 {
    let raw = text_color.into_storage();
    let r5 = u32::from((raw >> 11) & 0x1F);
    let g6 = u32::from((raw >> 5) & 0x3F);
    let b5 = u32::from(raw & 0x1F);
    let r8 = (r5 << 3) | (r5 >> 2);
    let g8 = (g6 << 2) | (g6 >> 4);
    let b8 = (b5 << 3) | (b5 >> 2);
    let luma = (r8 * 77 + g8 * 150 + b8 * 29) >> 8;

    if luma >= 128 { BLACK } else { WHITE }
}

/// Draw text with a contrasting outline so it stays readable on the face
/// background.
///
/// With the `simple-outline` feature only a bottom-right shadow is drawn
/// (3 draw calls instead of 9).
pub fn draw_value_with_outline<D>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    text_color: Rgb565,
    text_style: TextStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let outline_char_style = MonoTextStyle::new(font, outline_color_for_text(text_color));
    let main_char_style = MonoTextStyle::new(font, text_color);

    #[cfg(feature = "simple-outline")]
    const OFFSETS: [(i32, i32); 2] = [(1, 1), (1, 0)];

    #[cfg(not(feature = "simple-outline"))]
    const OFFSETS: [(i32, i32); 8] = [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

    for (dx, dy) in OFFSETS {
        Text::with_text_style(text, position + Point::new(dx, dy), outline_char_style, text_style)
            .draw(display)
            .ok();
    }

    Text::with_text_style(text, position, main_char_style, text_style)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::colors::{GREEN, YELLOW};

    #[test]
    fn test_outline_contrast() {
        assert_eq!(outline_color_for_text(WHITE), BLACK);
        assert_eq!(outline_color_for_text(YELLOW), BLACK);
        assert_eq!(outline_color_for_text(BLACK), WHITE);
    }

    #[test]
    fn test_no_arrow_without_trend() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        draw_trend_arrow(&mut display, Point::new(30, 30), 10, Trend::None, GREEN);
        assert_eq!(display.affected_area(), Rectangle::zero());
    }

    #[test]
    fn test_arrow_direction() {
        // Narrow near the tip, wide near the base
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        draw_trend_arrow(&mut display, Point::new(30, 30), 10, Trend::Up, GREEN);
        assert_eq!(display.get_pixel(Point::new(25, 38)), Some(GREEN));
        assert_eq!(display.get_pixel(Point::new(25, 22)), None);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        draw_trend_arrow(&mut display, Point::new(30, 30), 10, Trend::Down, GREEN);
        assert_eq!(display.get_pixel(Point::new(25, 22)), Some(GREEN));
        assert_eq!(display.get_pixel(Point::new(25, 38)), None);
    }
}

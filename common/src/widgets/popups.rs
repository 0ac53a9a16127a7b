//! Non-modal popup overlays for status messages.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::colors::{BLACK, ORANGE};
use crate::config::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::styles::{CENTERED, TITLE_STYLE_WHITE};

const POPUP_WIDTH: u32 = 200;
const POPUP_HEIGHT: u32 = 50;
const POPUP_X: i32 = (SCREEN_WIDTH - POPUP_WIDTH) as i32 / 2;
const POPUP_Y: i32 = (SCREEN_HEIGHT - POPUP_HEIGHT) as i32 / 2;

const TEXT_POS: Point = Point::new(CENTER_X, CENTER_Y + 5);

const BORDER_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(ORANGE);
const BG_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

const BORDER_POS: Point = Point::new(POPUP_X - 3, POPUP_Y - 3);
const BORDER_SIZE: Size = Size::new(POPUP_WIDTH + 6, POPUP_HEIGHT + 6);
const BG_POS: Point = Point::new(POPUP_X, POPUP_Y);
const BG_SIZE: Size = Size::new(POPUP_WIDTH, POPUP_HEIGHT);

/// Centered one-line status message (display mode, injected pressure, ...).
pub fn draw_status_popup<D>(
    display: &mut D,
    message: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(BORDER_POS, BORDER_SIZE)
        .into_styled(BORDER_FILL)
        .draw(display)
        .ok();

    Rectangle::new(BG_POS, BG_SIZE).into_styled(BG_FILL).draw(display).ok();

    Text::with_text_style(message, TEXT_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

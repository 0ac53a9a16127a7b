//! Face layout constants.
//!
//! All positions are computed at compile time so the draw functions never do
//! layout arithmetic per frame.

use embedded_graphics::prelude::{Point, Size};

// =============================================================================
// Display Configuration
// =============================================================================

/// Watch display width in pixels (square face).
pub const SCREEN_WIDTH: u32 = 336;

/// Watch display height in pixels.
pub const SCREEN_HEIGHT: u32 = 336;

pub const SCREEN_SIZE: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

/// Screen center X coordinate, pre-computed as i32 for drawing code.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

pub const CENTER: Point = Point::new(CENTER_X, CENTER_Y);

// =============================================================================
// Face Layout
// =============================================================================

/// Clock text baseline, upper third of the face.
pub const CLOCK_POS: Point = Point::new(CENTER_X, CENTER_Y - 70);

/// Altitude value baseline, slightly below center.
pub const ALTITUDE_POS: Point = Point::new(CENTER_X, CENTER_Y + 12);

/// Unit label baseline, under the altitude value.
pub const UNIT_POS: Point = Point::new(CENTER_X, CENTER_Y + 40);

/// Trend arrow center, lower third of the face.
pub const TREND_POS: Point = Point::new(CENTER_X, CENTER_Y + 85);

/// Half-height of the trend arrow in pixels.
pub const TREND_ARROW_SIZE: i32 = 14;

/// Diameter of the decorative ring around the face.
pub const RING_DIAMETER: u32 = SCREEN_WIDTH - 12;

/// Text shown in place of the altitude before the first reading.
pub const ALTITUDE_PLACEHOLDER: &str = "---";

// =============================================================================
// Debug Page Layout
// =============================================================================

/// Left margin of the debug log lines.
pub const DEBUG_MARGIN_X: i32 = 40;

/// First debug log baseline.
pub const DEBUG_TOP_Y: i32 = 70;

/// Line height of the debug log (6x10 font plus spacing).
pub const DEBUG_LINE_HEIGHT: i32 = 12;

/// Log lines that fit on the round face.
pub const DEBUG_VISIBLE_LINES: usize = 16;

const _: () = assert!(CLOCK_POS.y > 0 && TREND_POS.y + TREND_ARROW_SIZE < SCREEN_HEIGHT as i32);
const _: () = assert!(DEBUG_TOP_Y + DEBUG_LINE_HEIGHT * DEBUG_VISIBLE_LINES as i32 <= SCREEN_HEIGHT as i32);

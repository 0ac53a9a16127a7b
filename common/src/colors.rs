//! Color constants for the altimeter face.
//!
//! Standard colors come from the `RgbColor` trait constants; the rest are
//! hand-tuned RGB565 values (5 bits red, 6 bits green, 5 bits blue).

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Always-on-dim background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Altitude digits and clock.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Error log entries and the descending arrow.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Ascending arrow.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Warning log entries.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Mid gray for the unit label and dimmed text.
/// RGB565: (16, 32, 16) - roughly 50% brightness.
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray for rings and trace log entries.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const DARK_GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Deep teal background of the active face.
/// RGB565: (0, 12, 8) - blue-green, well below full cyan.
pub const BACKGROUND: Rgb565 = Rgb565::new(0, 12, 8);

/// Orange accent for the status popup border.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

//! Pre-computed text styles.
//!
//! Styles are `const` so they live in read-only data and are never rebuilt
//! per frame. Dim variants use gray text for the always-on-dim face.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Alignment, TextStyle, TextStyleBuilder};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{GRAY, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text alignment. Used for every face element and popup text.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for the debug log.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

// =============================================================================
// Font References
// =============================================================================

/// Altitude digits font (`ProFont` 24pt).
pub const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Small font for log lines. Exposed for per-level colored styles.
pub const LOG_FONT: &MonoFont = &FONT_6X10;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Clock on the active face (`ProFont` 18pt).
pub const CLOCK_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, WHITE);

/// Clock on the dim face.
pub const CLOCK_STYLE_DIM: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, GRAY);

/// Unit label under the altitude.
pub const UNIT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, GRAY);

/// Popup and page titles.
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

//! Widget components for the altimeter face.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` for platform independence.

mod face;
mod popups;
mod primitives;

pub use face::{altitude_text, draw_altitude, draw_clock, draw_face, face_background, trend_color};
pub use popups::draw_status_popup;
pub use primitives::{draw_ring, draw_trend_arrow, draw_value_with_outline};

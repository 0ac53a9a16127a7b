//! Render state tracking for the watch face.
//!
//! The face changes at most once per reading or tick, so the host only
//! redraws when something visible changed:
//!
//! | Element | Strategy |
//! |---------|----------|
//! | Altitude / unit / trend | Redraw when the frame changes |
//! | Clock | Redraw when the text changes |
//! | Background | Full redraw when dim mode toggles |
//! | Popups | Full redraw when a popup closes or switches |
//!
//! A page switch clears the display externally; [`FaceRenderState::mark_display_cleared`]
//! forces a full redraw when returning to the face.

use crate::altitude::RenderFrame;
use crate::clock::ClockText;

/// Tracks what the face currently shows.
pub struct FaceRenderState {
    prev_frame: Option<RenderFrame>,
    prev_clock: ClockText,
    prev_dim: bool,
    /// Previous popup kind (discriminant only, for detecting switches).
    prev_popup_kind: Option<u8>,
    popup_just_closed: bool,
    first_frame: bool,
    display_cleared: bool,
}

impl FaceRenderState {
    pub const fn new() -> Self {
        Self {
            prev_frame: None,
            prev_clock: ClockText::new(),
            prev_dim: false,
            prev_popup_kind: None,
            popup_just_closed: false,
            first_frame: true,
            display_cleared: false,
        }
    }

    /// Whether the face must be redrawn to show `frame`, `clock` and `dim`.
    /// Records them as drawn.
    pub fn needs_redraw(
        &mut self,
        frame: Option<RenderFrame>,
        clock: &str,
        dim: bool,
    ) -> bool {
        let dirty = self.first_frame
            || self.popup_just_closed
            || self.display_cleared
            || frame != self.prev_frame
            || clock != self.prev_clock.as_str()
            || dim != self.prev_dim;

        self.prev_frame = frame;
        self.prev_dim = dim;
        if clock != self.prev_clock.as_str() {
            self.prev_clock.clear();
            // Clock text never exceeds its capacity.
            let _ = self.prev_clock.push_str(clock);
        }
        dirty
    }

    /// Update popup state with the current popup kind.
    ///
    /// Closing a popup or switching to a different one both require a full
    /// redraw to remove remnants.
    pub fn update_popup(
        &mut self,
        popup_kind: Option<u8>,
    ) {
        let changed = popup_kind != self.prev_popup_kind;
        let was_visible = self.prev_popup_kind.is_some();
        self.prev_popup_kind = popup_kind;

        if changed && was_visible {
            self.popup_just_closed = true;
        }
    }

    #[inline]
    pub const fn popup_just_closed(&self) -> bool { self.popup_just_closed }

    #[inline]
    pub const fn is_first_frame(&self) -> bool { self.first_frame }

    /// Call when the display was cleared by something other than the face.
    #[inline]
    pub fn mark_display_cleared(&mut self) { self.display_cleared = true; }

    /// Call at end of frame to reset per-frame state.
    pub fn end_frame(&mut self) {
        self.first_frame = false;
        self.popup_just_closed = false;
        self.display_cleared = false;
    }
}

impl Default for FaceRenderState {
    fn default() -> Self { Self::new() }
}

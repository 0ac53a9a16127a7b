//! Popup state management with time-based expiration.
//!
//! Popups are timed against simulated seconds so headless sessions and the
//! interactive window behave the same.

use altimeter_common::sampling::DisplayPowerState;
use altimeter_common::simulation::PressureNudge;

use crate::timing::POPUP_DURATION_S;

/// What a popup announces.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PopupKind {
    Display(DisplayPowerState),
    Nudge(PressureNudge),
    /// A nudge was requested but the running sampler is not an injector.
    InjectUnavailable,
}

/// Active popup with the simulated time it was shown.
#[derive(Clone, Copy, Debug)]
pub struct Popup {
    kind: PopupKind,
    shown_at_s: f64,
}

impl Popup {
    pub const fn new(
        kind: PopupKind,
        now_s: f64,
    ) -> Self {
        Self { kind, shown_at_s: now_s }
    }

    #[inline]
    pub fn is_expired(
        &self,
        now_s: f64,
    ) -> bool {
        now_s - self.shown_at_s >= POPUP_DURATION_S
    }

    /// Popup kind as a u8 discriminant for render state tracking.
    pub const fn kind(&self) -> u8 {
        match self.kind {
            PopupKind::Display(_) => 0,
            PopupKind::Nudge(_) => 1,
            PopupKind::InjectUnavailable => 2,
        }
    }

    pub const fn message(&self) -> &'static str {
        match self.kind {
            PopupKind::Display(DisplayPowerState::Active) => "DISPLAY ON",
            PopupKind::Display(DisplayPowerState::AlwaysOnDim) => "ALWAYS ON",
            PopupKind::Display(DisplayPowerState::Off) => "SCREEN OFF",
            PopupKind::Nudge(PressureNudge::Increase) => "+30 Pa",
            PopupKind::Nudge(PressureNudge::Decrease) => "-30 Pa",
            PopupKind::Nudge(PressureNudge::Jitter { positive: true }) => "+1 Pa",
            PopupKind::Nudge(PressureNudge::Jitter { positive: false }) => "-1 Pa",
            PopupKind::InjectUnavailable => "NO INJECTOR",
        }
    }
}

//! Scripted input for headless sessions.
//!
//! A session walks the face through every display state: active, always-on
//! dim, active, screen off and back on, then shows the debug page for a
//! moment. With the injector, a nudge sequence climbs, jitters and descends
//! to exercise the trend detector.

use altimeter_common::sampling::DisplayPowerState;
use altimeter_common::simulation::PressureNudge;

use crate::timing::NUDGE_INTERVAL_S;

/// One scripted host input.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ScriptAction {
    Power(DisplayPowerState),
    Nudge(PressureNudge),
    TogglePage,
}

/// Display changes as fractions of the session length.
const POWER_SCHEDULE: [(f64, DisplayPowerState); 4] = [
    (0.40, DisplayPowerState::AlwaysOnDim),
    (0.60, DisplayPowerState::Active),
    (0.75, DisplayPowerState::Off),
    (0.85, DisplayPowerState::Active),
];

/// Debug page shown between these fractions of the session.
const DEBUG_PAGE: [f64; 2] = [0.90, 0.95];

/// Actions with their simulated time, sorted by time. `jitter_positive`
/// supplies the jitter signs.
pub fn scripted_actions(
    seconds: u32,
    inject: bool,
    mut jitter_positive: impl FnMut() -> bool,
) -> Vec<(f64, ScriptAction)> {
    let length_s = f64::from(seconds);
    let mut actions: Vec<(f64, ScriptAction)> = POWER_SCHEDULE
        .iter()
        .map(|(fraction, power)| (fraction * length_s, ScriptAction::Power(*power)))
        .collect();
    actions.extend(DEBUG_PAGE.iter().map(|fraction| (fraction * length_s, ScriptAction::TogglePage)));

    if inject {
        let mut at = NUDGE_INTERVAL_S;
        let mut step = 0usize;
        while at < length_s {
            let nudge = match step % 6 {
                0 | 1 => PressureNudge::Decrease,
                2 | 5 => PressureNudge::Jitter {
                    positive: jitter_positive(),
                },
                _ => PressureNudge::Increase,
            };
            actions.push((at, ScriptAction::Nudge(nudge)));
            at += NUDGE_INTERVAL_S;
            step += 1;
        }
    }

    actions.sort_by(|a, b| a.0.total_cmp(&b.0));
    actions
}

//! Sampling-rate control driven by the display power state.
//!
//! [`SamplingController`] is a pure state machine: it decides which sampler
//! configuration the current display state calls for and tells the caller
//! what to do with the sampler via a [`SamplerAction`]. Acquiring and
//! releasing the actual sampler handle is left to the application context.
//!
//! # States
//!
//! ```text
//! Settling --first reading--> Normal | LowPower | Stopped
//! Normal   <--always-on-dim--> LowPower
//! Normal | LowPower --off--> Stopped --on--> Normal | LowPower
//! any --sampler failure--> Faulted (terminal)
//! ```

use crate::thresholds::{LOW_POWER_BATCH_SIZE, LOW_POWER_FREQUENCY_HZ, NORMAL_BATCH_SIZE, NORMAL_FREQUENCY_HZ};

/// Sampler parameters requested from the host.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SamplingConfig {
    pub frequency_hz: f64,
    pub batch_size: u32,
}

impl SamplingConfig {
    /// Steady-state configuration while the display is active.
    pub const NORMAL: Self = Self {
        frequency_hz: NORMAL_FREQUENCY_HZ,
        batch_size: NORMAL_BATCH_SIZE,
    };

    /// Steady-state configuration in always-on-dim mode.
    pub const LOW_POWER: Self = Self {
        frequency_hz: LOW_POWER_FREQUENCY_HZ,
        batch_size: LOW_POWER_BATCH_SIZE,
    };

    /// Seconds between two reading events (one per full batch).
    #[inline]
    pub fn batch_interval_s(&self) -> f64 { self.batch_size as f64 / self.frequency_hz }
}

/// Power state reported by the host display.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DisplayPowerState {
    #[default]
    Active,
    AlwaysOnDim,
    Off,
}

impl DisplayPowerState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::AlwaysOnDim => "AOD",
            Self::Off => "OFF",
        }
    }
}

/// Current sampling mode.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum SamplingMode {
    /// Host default configuration, waiting for the first reading.
    #[default]
    Settling,
    Normal,
    LowPower,
    /// No sampler running; nothing is rendered.
    Stopped,
    /// The host refused a sampler operation. Monitoring stays off.
    Faulted,
}

impl SamplingMode {
    /// Steady-state configuration for this mode, if it samples at all.
    pub const fn config(self) -> Option<SamplingConfig> {
        match self {
            Self::Normal => Some(SamplingConfig::NORMAL),
            Self::LowPower => Some(SamplingConfig::LOW_POWER),
            Self::Settling | Self::Stopped | Self::Faulted => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Settling => "SETTLING",
            Self::Normal => "NORMAL",
            Self::LowPower => "LOW POWER",
            Self::Stopped => "STOPPED",
            Self::Faulted => "FAULTED",
        }
    }
}

/// What the caller must do with the sampler after a transition.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SamplerAction {
    /// Leave the current sampler as is.
    Keep,
    /// Release the current sampler (if any), then start one with this config.
    Reconfigure(SamplingConfig),
    /// Release the current sampler and start nothing.
    Stop,
}

/// Result of feeding an event to the controller.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transition {
    pub from: SamplingMode,
    pub to: SamplingMode,
    pub action: SamplerAction,
}

impl Transition {
    #[inline]
    pub fn changed(&self) -> bool { self.from != self.to }
}

/// Sampling-rate state machine.
#[derive(Clone, Copy, Debug)]
pub struct SamplingController {
    mode: SamplingMode,
    aod_allowed: bool,
}

impl SamplingController {
    /// Controller in the settle phase. `aod_allowed` is the outcome of the
    /// host permission check for always-on-dim.
    pub const fn new(aod_allowed: bool) -> Self {
        Self {
            mode: SamplingMode::Settling,
            aod_allowed,
        }
    }

    #[inline]
    pub const fn mode(&self) -> SamplingMode { self.mode }

    #[inline]
    pub const fn aod_allowed(&self) -> bool { self.aod_allowed }

    /// Steady-state mode the display state calls for.
    pub const fn target_mode(
        &self,
        power: DisplayPowerState,
    ) -> SamplingMode {
        match power {
            DisplayPowerState::Active => SamplingMode::Normal,
            DisplayPowerState::AlwaysOnDim if self.aod_allowed => SamplingMode::LowPower,
            DisplayPowerState::AlwaysOnDim | DisplayPowerState::Off => SamplingMode::Stopped,
        }
    }

    /// Leave the settle phase once the first reading arrived.
    pub fn on_first_reading(
        &mut self,
        power: DisplayPowerState,
    ) -> Transition {
        if self.mode != SamplingMode::Settling {
            return self.keep();
        }
        let to = self.target_mode(power);
        self.enter(to)
    }

    /// React to a display power state change.
    pub fn on_power_change(
        &mut self,
        power: DisplayPowerState,
    ) -> Transition {
        let to = self.target_mode(power);
        match self.mode {
            SamplingMode::Faulted => self.keep(),
            // Still waiting for the fast first sample while the screen is on.
            SamplingMode::Settling if to == SamplingMode::Normal => self.keep(),
            mode if mode == to => self.keep(),
            _ => self.enter(to),
        }
    }

    /// A sampler operation failed; monitoring is over.
    pub fn fault(&mut self) -> Transition {
        let from = self.mode;
        self.mode = SamplingMode::Faulted;
        Transition {
            from,
            to: SamplingMode::Faulted,
            action: SamplerAction::Stop,
        }
    }

    fn enter(
        &mut self,
        to: SamplingMode,
    ) -> Transition {
        let from = self.mode;
        self.mode = to;
        let action = match to.config() {
            Some(config) => SamplerAction::Reconfigure(config),
            None => SamplerAction::Stop,
        };
        Transition { from, to, action }
    }

    const fn keep(&self) -> Transition {
        Transition {
            from: self.mode,
            to: self.mode,
            action: SamplerAction::Keep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_configs() {
        assert_eq!(SamplingConfig::NORMAL.frequency_hz, 1.0);
        assert_eq!(SamplingConfig::NORMAL.batch_size, 3);
        assert_eq!(SamplingConfig::LOW_POWER.frequency_hz, 0.5);
        assert_eq!(SamplingConfig::LOW_POWER.batch_size, 30);
        assert_eq!(SamplingConfig::NORMAL.batch_interval_s(), 3.0);
        assert_eq!(SamplingConfig::LOW_POWER.batch_interval_s(), 60.0);
    }

    #[test]
    fn test_starts_settling() {
        let controller = SamplingController::new(true);
        assert_eq!(controller.mode(), SamplingMode::Settling);
        assert_eq!(SamplingMode::default(), SamplingMode::Settling);
    }

    #[test]
    fn test_first_reading_active_goes_normal() {
        let mut controller = SamplingController::new(true);
        let transition = controller.on_first_reading(DisplayPowerState::Active);
        assert_eq!(transition.from, SamplingMode::Settling);
        assert_eq!(transition.to, SamplingMode::Normal);
        assert_eq!(transition.action, SamplerAction::Reconfigure(SamplingConfig::NORMAL));
        assert!(transition.changed());
    }

    #[test]
    fn test_first_reading_dim_goes_low_power() {
        let mut controller = SamplingController::new(true);
        let transition = controller.on_first_reading(DisplayPowerState::AlwaysOnDim);
        assert_eq!(transition.to, SamplingMode::LowPower);
        assert_eq!(transition.action, SamplerAction::Reconfigure(SamplingConfig::LOW_POWER));
    }

    #[test]
    fn test_first_reading_only_once() {
        let mut controller = SamplingController::new(true);
        controller.on_first_reading(DisplayPowerState::Active);
        let transition = controller.on_first_reading(DisplayPowerState::Active);
        assert_eq!(transition.action, SamplerAction::Keep);
        assert!(!transition.changed());
    }

    #[test]
    fn test_normal_low_power_round_trip() {
        let mut controller = SamplingController::new(true);
        controller.on_first_reading(DisplayPowerState::Active);

        let transition = controller.on_power_change(DisplayPowerState::AlwaysOnDim);
        assert_eq!(transition.to, SamplingMode::LowPower);
        assert_eq!(transition.action, SamplerAction::Reconfigure(SamplingConfig::LOW_POWER));

        let transition = controller.on_power_change(DisplayPowerState::Active);
        assert_eq!(transition.from, SamplingMode::LowPower);
        assert_eq!(transition.to, SamplingMode::Normal);
        assert_eq!(transition.action, SamplerAction::Reconfigure(SamplingConfig::NORMAL));
    }

    #[test]
    fn test_off_stops_and_on_restarts() {
        let mut controller = SamplingController::new(true);
        controller.on_first_reading(DisplayPowerState::Active);

        let transition = controller.on_power_change(DisplayPowerState::Off);
        assert_eq!(transition.to, SamplingMode::Stopped);
        assert_eq!(transition.action, SamplerAction::Stop);

        // Repeated off notifications are no-ops
        assert_eq!(controller.on_power_change(DisplayPowerState::Off).action, SamplerAction::Keep);

        let transition = controller.on_power_change(DisplayPowerState::AlwaysOnDim);
        assert_eq!(transition.from, SamplingMode::Stopped);
        assert_eq!(transition.to, SamplingMode::LowPower);
    }

    #[test]
    fn test_same_state_keeps_sampler() {
        let mut controller = SamplingController::new(true);
        controller.on_first_reading(DisplayPowerState::Active);
        assert_eq!(controller.on_power_change(DisplayPowerState::Active).action, SamplerAction::Keep);
    }

    #[test]
    fn test_dim_without_permission_stops() {
        let mut controller = SamplingController::new(false);
        assert_eq!(controller.target_mode(DisplayPowerState::AlwaysOnDim), SamplingMode::Stopped);
        controller.on_first_reading(DisplayPowerState::Active);

        let transition = controller.on_power_change(DisplayPowerState::AlwaysOnDim);
        assert_eq!(transition.to, SamplingMode::Stopped);
        assert_eq!(transition.action, SamplerAction::Stop);
    }

    #[test]
    fn test_power_change_while_settling() {
        let mut controller = SamplingController::new(true);
        assert_eq!(controller.on_power_change(DisplayPowerState::Active).action, SamplerAction::Keep);
        assert_eq!(controller.mode(), SamplingMode::Settling);

        let transition = controller.on_power_change(DisplayPowerState::AlwaysOnDim);
        assert_eq!(transition.to, SamplingMode::LowPower);

        let mut controller = SamplingController::new(true);
        let transition = controller.on_power_change(DisplayPowerState::Off);
        assert_eq!(transition.to, SamplingMode::Stopped);
        assert_eq!(transition.action, SamplerAction::Stop);
    }

    #[test]
    fn test_fault_is_terminal() {
        let mut controller = SamplingController::new(true);
        controller.on_first_reading(DisplayPowerState::Active);
        let transition = controller.fault();
        assert_eq!(transition.from, SamplingMode::Normal);
        assert_eq!(transition.to, SamplingMode::Faulted);

        assert_eq!(controller.on_power_change(DisplayPowerState::AlwaysOnDim).action, SamplerAction::Keep);
        assert_eq!(controller.on_power_change(DisplayPowerState::Active).action, SamplerAction::Keep);
        assert_eq!(controller.on_first_reading(DisplayPowerState::Active).action, SamplerAction::Keep);
        assert_eq!(controller.mode(), SamplingMode::Faulted);
    }
}

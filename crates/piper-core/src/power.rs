//! Idle tracking, sleep screen timing and the final power-off.

use log::info;

/// Board power collaborator.
pub trait PowerControl {
    type Error;

    /// Battery charge in percent, `0..=100`.
    fn battery_percent(&mut self) -> Result<u8, Self::Error>;

    /// Cuts power. The panel keeps showing the last frame.
    fn power_off(&mut self) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PowerPhase {
    Awake,
    /// The sleep screen is up and power-off is due at `power_off_at_ms`.
    Holding { power_off_at_ms: u64 },
    Off,
}

/// What the control loop must do this tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PowerStep {
    Stay,
    /// Draw the sleep screen now.
    EnterSleep,
    /// Issue the power-off command now.
    PowerOff,
    /// Power-off was already issued; nothing more will happen.
    Halted,
}

/// Awake, holding the sleep screen, then off. Never goes back.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PowerLifecycle {
    idle_timeout_ms: u64,
    hold_ms: u64,
    last_activity_ms: u64,
    phase: PowerPhase,
}

impl PowerLifecycle {
    pub const fn new(now_ms: u64, idle_timeout_ms: u64, hold_ms: u64) -> Self {
        Self {
            idle_timeout_ms,
            hold_ms,
            last_activity_ms: now_ms,
            phase: PowerPhase::Awake,
        }
    }

    pub fn phase(&self) -> PowerPhase {
        self.phase
    }

    pub fn is_awake(&self) -> bool {
        self.phase == PowerPhase::Awake
    }

    /// Restarts the idle clock. Ignored once the sleep screen is up.
    pub fn record_activity(&mut self, now_ms: u64) {
        if self.is_awake() {
            self.last_activity_ms = now_ms;
        }
    }

    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_activity_ms)
    }

    pub fn evaluate(&mut self, now_ms: u64) -> PowerStep {
        match self.phase {
            PowerPhase::Awake => {
                if self.idle_ms(now_ms) > self.idle_timeout_ms {
                    info!("power: idle for {} ms, sleeping", self.idle_ms(now_ms));
                    self.phase = PowerPhase::Holding {
                        power_off_at_ms: now_ms.saturating_add(self.hold_ms),
                    };
                    PowerStep::EnterSleep
                } else {
                    PowerStep::Stay
                }
            }
            PowerPhase::Holding { power_off_at_ms } => {
                if now_ms >= power_off_at_ms {
                    info!("power: hold elapsed, powering off");
                    self.phase = PowerPhase::Off;
                    PowerStep::PowerOff
                } else {
                    PowerStep::Stay
                }
            }
            PowerPhase::Off => PowerStep::Halted,
        }
    }
}

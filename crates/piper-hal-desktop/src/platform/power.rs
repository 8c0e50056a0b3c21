//! Host stand-in for the board's battery gauge and power latch.

use std::{fs, io, path::PathBuf};

use log::{info, warn};
use piper_core::power::PowerControl;

/// Battery level reported when no gauge is configured.
pub const MAINS_BATTERY_PERCENT: u8 = 100;

#[derive(Debug)]
pub struct HostPower {
    gauge: Option<PathBuf>,
    powered_off: bool,
}

impl HostPower {
    /// Reports a full battery.
    pub const fn mains() -> Self {
        Self {
            gauge: None,
            powered_off: false,
        }
    }

    /// Reads the charge from a sysfs-style capacity file, e.g.
    /// `/sys/class/power_supply/BAT0/capacity`.
    pub fn with_gauge(path: impl Into<PathBuf>) -> Self {
        Self {
            gauge: Some(path.into()),
            powered_off: false,
        }
    }

    pub fn is_powered_off(&self) -> bool {
        self.powered_off
    }
}

impl PowerControl for HostPower {
    type Error = io::Error;

    fn battery_percent(&mut self) -> Result<u8, Self::Error> {
        let Some(path) = &self.gauge else {
            return Ok(MAINS_BATTERY_PERCENT);
        };

        let raw = fs::read_to_string(path)?;
        let percent: u16 = raw
            .trim()
            .parse()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "capacity is not a number"))?;
        Ok(percent.min(100) as u8)
    }

    fn power_off(&mut self) -> Result<(), Self::Error> {
        if self.powered_off {
            warn!("power: already off");
            return Ok(());
        }
        self.powered_off = true;
        info!("power: latch released");
        Ok(())
    }
}

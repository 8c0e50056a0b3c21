use super::{AccelSample, MotionSensor, TouchProvider, TouchSample};

/// Touch source for boards without a touch controller.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoTouch;

impl NoTouch {
    pub const fn new() -> Self {
        Self
    }
}

impl TouchProvider for NoTouch {
    type Error = core::convert::Infallible;

    fn poll_touch(&mut self) -> Result<Option<TouchSample>, Self::Error> {
        Ok(None)
    }
}

/// Motion source reporting a constant tilt, or nothing.
#[derive(Default, Debug, Clone, Copy)]
pub struct FixedTilt {
    sample: Option<AccelSample>,
}

impl FixedTilt {
    pub const fn none() -> Self {
        Self { sample: None }
    }

    pub const fn new(sample: AccelSample) -> Self {
        Self {
            sample: Some(sample),
        }
    }
}

impl MotionSensor for FixedTilt {
    type Error = core::convert::Infallible;

    fn read_accel(&mut self) -> Result<Option<AccelSample>, Self::Error> {
        Ok(self.sample)
    }
}

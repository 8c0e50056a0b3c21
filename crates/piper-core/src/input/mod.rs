//! Touch and motion input abstractions.

pub mod gesture;
pub mod mock;
pub mod orientation;

/// What the touch controller recognised for one contact.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TouchGesture {
    /// A fast drag with signed travel; negative `dx` is leftward, negative `dy` upward.
    Flick { dx: i32, dy: i32 },
    /// A short press and release.
    Tap,
    /// A finger is down but no gesture completed yet.
    Contact,
}

/// One touch sample in logical screen coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
    pub gesture: TouchGesture,
}

impl TouchSample {
    pub const fn new(x: i32, y: i32, gesture: TouchGesture) -> Self {
        Self { x, y, gesture }
    }
}

/// Polled touch controller; at most one sample per tick.
pub trait TouchProvider {
    type Error;

    fn poll_touch(&mut self) -> Result<Option<TouchSample>, Self::Error>;
}

/// Acceleration in g along the panel axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelSample {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Polled accelerometer.
pub trait MotionSensor {
    type Error;

    fn read_accel(&mut self) -> Result<Option<AccelSample>, Self::Error>;
}

#![cfg_attr(not(test), no_std)]

//! ED047TC1 (4.7" 960x540 e-paper, M5PaperS3) canvas primitives.
//!
//! The canvas keeps the native 4-bit grayscale frame the panel retains after
//! power-off and maps logical coordinates through a quarter-turn rotation.

extern crate alloc;

mod canvas;
pub mod geometry;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use canvas::{Canvas, UpdateMode};
pub use geometry::Rotation;

/// Gray level of a fully black pixel.
pub const BLACK: u8 = 0x0;
/// Gray level of a fully white pixel.
pub const WHITE: u8 = 0xF;

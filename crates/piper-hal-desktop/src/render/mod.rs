pub mod raster;
pub mod text;

use epd_canvas::{BLACK, WHITE};
use piper_core::render::Tone;

/// Gray level used for footer button outlines.
pub const LIGHT_GREY: u8 = 0xB;

/// Maps an engine tone onto a 4-bit panel level.
pub const fn tone_level(tone: Tone) -> u8 {
    match tone {
        Tone::White => WHITE,
        Tone::LightGrey => LIGHT_GREY,
        Tone::Black => BLACK,
    }
}

/// Quantises 8-bit luma to the panel's 16 gray levels.
pub const fn luma_level(luma: u8) -> u8 {
    luma >> 4
}

//! In-memory frame for the ED047TC1.

use alloc::{boxed::Box, vec, vec::Vec};

use crate::{
    WHITE,
    geometry::{BUFFER_SIZE, HEIGHT, ROW_BYTES, Rotation, WIDTH},
};

/// Panel waveform requested for the next present.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UpdateMode {
    /// GC16-style full update with flashing.
    #[default]
    Quality,
    /// DU-style fast partial update.
    Fast,
}

/// 4bpp grayscale frame, `0` black to `15` white.
///
/// Nibble mapping within one byte: the high nibble is the even native column.
#[derive(Clone)]
pub struct Canvas {
    bytes: Box<[u8]>,
    rotation: Rotation,
    update_mode: UpdateMode,
    presents: u32,
    last_presented: Option<UpdateMode>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Creates a white canvas in the default rotation.
    pub fn new() -> Self {
        Self {
            bytes: vec![0xFF; BUFFER_SIZE].into_boxed_slice(),
            rotation: Rotation::default(),
            update_mode: UpdateMode::default(),
            presents: 0,
            last_presented: None,
        }
    }

    /// Returns the native frame bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Logical width in the current rotation.
    pub fn width(&self) -> usize {
        self.rotation.logical_size().0
    }

    /// Logical height in the current rotation.
    pub fn height(&self) -> usize {
        self.rotation.logical_size().1
    }

    /// Fills the whole frame with `level`.
    pub fn clear(&mut self, level: u8) {
        let level = level & 0x0F;
        self.bytes.fill((level << 4) | level);
    }

    /// Writes a native pixel. Returns `false` when out of bounds.
    pub fn set_native_pixel(&mut self, x: usize, y: usize, level: u8) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        let Some(byte) = self.bytes.get_mut(y * ROW_BYTES + x / 2) else {
            return false;
        };
        let level = level & 0x0F;
        *byte = if x % 2 == 0 {
            (*byte & 0x0F) | (level << 4)
        } else {
            (*byte & 0xF0) | level
        };
        true
    }

    /// Reads a native pixel.
    pub fn native_pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        let byte = *self.bytes.get(y * ROW_BYTES + x / 2)?;
        Some(if x % 2 == 0 { byte >> 4 } else { byte & 0x0F })
    }

    /// Writes a pixel in logical coordinates. Off-panel points are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, level: u8) -> bool {
        match self.rotation.to_native(x, y) {
            Some((nx, ny)) => self.set_native_pixel(nx, ny, level),
            None => false,
        }
    }

    /// Reads a pixel in logical coordinates.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        let (nx, ny) = self.rotation.to_native(x, y)?;
        self.native_pixel(nx, ny)
    }

    /// Fills a logical rectangle, clipped to the panel.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, level: u8) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width() as i32);
        let y1 = y.saturating_add(h).min(self.height() as i32);

        for py in y0..y1 {
            for px in x0..x1 {
                let _ = self.set_pixel(px, py, level);
            }
        }
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    pub fn set_update_mode(&mut self, mode: UpdateMode) {
        self.update_mode = mode;
    }

    /// Marks the frame as pushed to the panel with the current update mode.
    pub fn present(&mut self) -> u32 {
        self.presents = self.presents.wrapping_add(1);
        self.last_presented = Some(self.update_mode);
        self.presents
    }

    pub fn presents(&self) -> u32 {
        self.presents
    }

    pub fn last_presented(&self) -> Option<UpdateMode> {
        self.last_presented
    }

    /// 8-bit luma of the logical view, row-major.
    pub fn to_luma8(&self) -> Vec<u8> {
        let (w, h) = (self.width() as i32, self.height() as i32);
        let mut out = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            for x in 0..w {
                out.push(self.pixel(x, y).unwrap_or(WHITE) * 17);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BLACK;

    #[test]
    fn nibble_mapping_is_high_first_within_byte() {
        let mut canvas = Canvas::new();
        canvas.clear(BLACK);

        assert!(canvas.set_native_pixel(0, 0, 0xA));
        assert!(canvas.set_native_pixel(1, 0, 0x5));
        assert!(canvas.set_native_pixel(3, 0, 0xF));

        assert_eq!(canvas.bytes()[0], 0xA5);
        assert_eq!(canvas.bytes()[1], 0x0F);
    }

    #[test]
    fn out_of_bounds_pixel_is_ignored() {
        let mut canvas = Canvas::new();

        assert!(!canvas.set_native_pixel(WIDTH, 0, BLACK));
        assert!(!canvas.set_pixel(-1, 5, BLACK));
        assert!(canvas.bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn logical_pixels_follow_rotation() {
        let mut canvas = Canvas::new();
        canvas.set_rotation(Rotation::R1);

        assert!(canvas.set_pixel(0, 0, BLACK));
        assert_eq!(canvas.native_pixel(0, HEIGHT - 1), Some(BLACK));
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));

        canvas.set_rotation(Rotation::R0);
        assert_eq!(canvas.pixel(0, HEIGHT as i32 - 1), Some(BLACK));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut canvas = Canvas::new();
        canvas.set_rotation(Rotation::R0);
        canvas.fill_rect(-5, -5, 10, 10, BLACK);

        assert_eq!(canvas.pixel(4, 4), Some(BLACK));
        assert_eq!(canvas.pixel(5, 5), Some(WHITE));
    }

    #[test]
    fn present_records_update_mode() {
        let mut canvas = Canvas::new();
        canvas.set_update_mode(UpdateMode::Fast);

        assert_eq!(canvas.present(), 1);
        assert_eq!(canvas.last_presented(), Some(UpdateMode::Fast));
    }

    #[test]
    fn luma_export_uses_logical_orientation() {
        let mut canvas = Canvas::new();
        canvas.set_pixel(1, 0, BLACK);

        let luma = canvas.to_luma8();
        assert_eq!(luma.len(), WIDTH * HEIGHT);
        assert_eq!(luma[0], 255);
        assert_eq!(luma[1], 0);
    }
}

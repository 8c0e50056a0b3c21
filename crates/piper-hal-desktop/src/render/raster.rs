//! Off-screen decode cache and direct image blits.

use epd_canvas::{Canvas, WHITE};
use image::{GrayImage, ImageFormat};
use log::debug;
use piper_core::render::{Codec, Point, RasterError, Size};

use super::luma_level;

/// Largest decode cache the host accepts, in pixels.
pub const MAX_RASTER_PIXELS: u64 = 4 * 1024 * 1024;

/// Native-resolution grayscale copy of the last decoded image.
#[derive(Debug)]
pub struct RasterCache {
    size: Size,
    levels: Vec<u8>,
}

impl RasterCache {
    /// Reserves a white cache of `size`, failing when it exceeds `budget_pixels`
    /// or the allocator refuses.
    pub fn allocate(size: Size, budget_pixels: u64) -> Result<Self, RasterError> {
        let pixels = u64::from(size.width) * u64::from(size.height);
        if pixels == 0 || pixels > budget_pixels {
            return Err(RasterError::OutOfMemory);
        }
        let len = usize::try_from(pixels).map_err(|_| RasterError::OutOfMemory)?;

        let mut levels = Vec::new();
        levels
            .try_reserve_exact(len)
            .map_err(|_| RasterError::OutOfMemory)?;
        levels.resize(len, WHITE);

        Ok(Self { size, levels })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Decodes a JPEG whose dimensions must match the cache.
    pub fn decode_jpeg(&mut self, bytes: &[u8]) -> Result<(), RasterError> {
        let gray = decode_gray(bytes, ImageFormat::Jpeg).ok_or(RasterError::Decode)?;
        if gray.width() != self.size.width || gray.height() != self.size.height {
            debug!(
                "raster: size mismatch cache={}x{} image={}x{}",
                self.size.width,
                self.size.height,
                gray.width(),
                gray.height()
            );
            return Err(RasterError::NotAllocated);
        }

        for (level, pixel) in self.levels.iter_mut().zip(gray.pixels()) {
            *level = luma_level(pixel.0[0]);
        }
        Ok(())
    }

    pub fn level(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let index = y as usize * self.size.width as usize + x as usize;
        self.levels.get(index).copied()
    }

    /// Nearest-neighbour draw of the cache scaled by `scale`, rotated by
    /// `angle_deg` and centred on `center`.
    pub fn push(&self, canvas: &mut Canvas, center: Point, scale: f32, angle_deg: f32) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }

        let half_w = self.size.width as f32 / 2.0;
        let half_h = self.size.height as f32 / 2.0;
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let reach = (half_w.hypot(half_h) * scale).ceil() as i32;

        let x0 = (center.x - reach).max(0);
        let y0 = (center.y - reach).max(0);
        let x1 = center.x.saturating_add(reach).min(canvas.width() as i32);
        let y1 = center.y.saturating_add(reach).min(canvas.height() as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                let rx = (x as f32 + 0.5 - center.x as f32) / scale;
                let ry = (y as f32 + 0.5 - center.y as f32) / scale;
                let sx = rx * cos + ry * sin + half_w;
                let sy = ry * cos - rx * sin + half_h;
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                if let Some(level) = self.level(sx as u32, sy as u32) {
                    let _ = canvas.set_pixel(x, y, level);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn from_levels(size: Size, levels: Vec<u8>) -> Self {
        assert_eq!(levels.len(), (size.width * size.height) as usize);
        Self { size, levels }
    }
}

/// Decodes `bytes` and draws them unscaled with the top-left at `at`.
pub fn blit_encoded(canvas: &mut Canvas, codec: Codec, bytes: &[u8], at: Point) -> bool {
    let format = match codec {
        Codec::Jpeg => ImageFormat::Jpeg,
        Codec::Png => ImageFormat::Png,
    };
    let Some(gray) = decode_gray(bytes, format) else {
        return false;
    };

    let x0 = at.x.max(0);
    let y0 = at.y.max(0);
    let x1 = at
        .x
        .saturating_add(gray.width() as i32)
        .min(canvas.width() as i32);
    let y1 = at
        .y
        .saturating_add(gray.height() as i32)
        .min(canvas.height() as i32);

    for y in y0..y1 {
        for x in x0..x1 {
            let pixel = gray.get_pixel((x - at.x) as u32, (y - at.y) as u32);
            let _ = canvas.set_pixel(x, y, luma_level(pixel.0[0]));
        }
    }
    true
}

fn decode_gray(bytes: &[u8], format: ImageFormat) -> Option<GrayImage> {
    match image::load_from_memory_with_format(bytes, format) {
        Ok(decoded) => Some(decoded.into_luma8()),
        Err(err) => {
            debug!("raster: {:?} decode failed: {}", format, err);
            None
        }
    }
}

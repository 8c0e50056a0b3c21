//! Minimal JPEG marker scan that recovers frame dimensions.

use crate::render::Size;

const SOI: u16 = 0xFFD8;
const MARKER_PREFIX: u8 = 0xFF;
const SOF0_BASELINE: u8 = 0xC0;
const SOF2_PROGRESSIVE: u8 = 0xC2;

/// Reasons the probe reports "unknown".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProbeError {
    /// Fewer bytes than the smallest possible header.
    TooShort,
    /// Missing start-of-image marker.
    NotJpeg,
    /// A segment did not start with `0xFF`.
    BadMarker,
    /// A segment length smaller than its own length field.
    BadSegmentLength,
    /// A read ran past the end of the data.
    Truncated,
    /// The frame header declares a zero width or height.
    ZeroDimension,
}

/// Bounds-checked big-endian reader; every out-of-range access is an error.
struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn read_u8(&mut self) -> Result<u8, ProbeError> {
        let byte = *self.bytes.get(self.pos).ok_or(ProbeError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_u16_be(&mut self) -> Result<u16, ProbeError> {
        let hi = self.read_u8()?;
        let lo = self.read_u8()?;
        Ok(u16::from_be_bytes([hi, lo]))
    }

    fn skip(&mut self, count: usize) -> Result<(), ProbeError> {
        if count > self.remaining() {
            return Err(ProbeError::Truncated);
        }
        self.pos += count;
        Ok(())
    }
}

/// Returns the frame dimensions of a baseline or progressive JPEG.
///
/// Walks `marker, length` segments after SOI until SOF0/SOF2, whose payload is
/// `precision, height, width`. Anything unexpected aborts the scan.
pub fn probe_dimensions(bytes: &[u8]) -> Result<Size, ProbeError> {
    if bytes.len() < 4 {
        return Err(ProbeError::TooShort);
    }

    let mut cursor = ByteCursor::new(bytes);
    if cursor.read_u16_be()? != SOI {
        return Err(ProbeError::NotJpeg);
    }

    loop {
        if cursor.read_u8()? != MARKER_PREFIX {
            return Err(ProbeError::BadMarker);
        }
        let marker = cursor.read_u8()?;
        let length = cursor.read_u16_be()? as usize;
        if length < 2 {
            return Err(ProbeError::BadSegmentLength);
        }

        if marker == SOF0_BASELINE || marker == SOF2_PROGRESSIVE {
            let _precision = cursor.read_u8()?;
            let height = cursor.read_u16_be()?;
            let width = cursor.read_u16_be()?;
            if width == 0 || height == 0 {
                return Err(ProbeError::ZeroDimension);
            }
            return Ok(Size::new(width as u32, height as u32));
        }

        cursor.skip(length - 2)?;
    }
}

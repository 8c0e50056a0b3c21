//! Panel dimensions and logical-to-native coordinate mapping.

/// Native panel width in pixels.
pub const WIDTH: usize = 960;
/// Native panel height in pixels.
pub const HEIGHT: usize = 540;
/// Bytes per native row; two 4-bit pixels per byte.
pub const ROW_BYTES: usize = WIDTH / 2;
/// Total frame size in bytes.
pub const BUFFER_SIZE: usize = ROW_BYTES * HEIGHT;

/// Quarter-turn rotation of the logical drawing space.
///
/// `R1` and `R3` are portrait; `R1` is the board's upright orientation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Rotation {
    R0,
    #[default]
    R1,
    R2,
    R3,
}

impl Rotation {
    pub const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Self::R0,
            1 => Self::R1,
            2 => Self::R2,
            _ => Self::R3,
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::R0 => 0,
            Self::R1 => 1,
            Self::R2 => 2,
            Self::R3 => 3,
        }
    }

    pub const fn is_portrait(self) -> bool {
        matches!(self, Self::R1 | Self::R3)
    }

    /// Logical `(width, height)` in this rotation.
    pub const fn logical_size(self) -> (usize, usize) {
        if self.is_portrait() {
            (HEIGHT, WIDTH)
        } else {
            (WIDTH, HEIGHT)
        }
    }

    /// Native pixel under logical `(x, y)`, or `None` when off-panel.
    #[inline]
    pub fn to_native(self, x: i32, y: i32) -> Option<(usize, usize)> {
        let (w, h) = self.logical_size();
        if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
            return None;
        }

        let (lx, ly) = (x as usize, y as usize);
        Some(match self {
            Self::R0 => (lx, ly),
            Self::R1 => (ly, HEIGHT - 1 - lx),
            Self::R2 => (WIDTH - 1 - lx, HEIGHT - 1 - ly),
            Self::R3 => (WIDTH - 1 - ly, lx),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_rotations_swap_dimensions() {
        assert_eq!(Rotation::R0.logical_size(), (960, 540));
        assert_eq!(Rotation::R1.logical_size(), (540, 960));
        assert_eq!(Rotation::R3.logical_size(), (540, 960));
    }

    #[test]
    fn logical_origin_lands_on_expected_native_corner() {
        assert_eq!(Rotation::R0.to_native(0, 0), Some((0, 0)));
        assert_eq!(Rotation::R1.to_native(0, 0), Some((0, HEIGHT - 1)));
        assert_eq!(Rotation::R2.to_native(0, 0), Some((WIDTH - 1, HEIGHT - 1)));
        assert_eq!(Rotation::R3.to_native(0, 0), Some((WIDTH - 1, 0)));
    }

    #[test]
    fn far_logical_corner_is_in_bounds() {
        for index in 0..4 {
            let rotation = Rotation::from_index(index);
            let (w, h) = rotation.logical_size();
            let native = rotation.to_native(w as i32 - 1, h as i32 - 1);
            assert!(native.is_some_and(|(nx, ny)| nx < WIDTH && ny < HEIGHT));
        }
    }

    #[test]
    fn off_panel_points_are_rejected() {
        assert_eq!(Rotation::R1.to_native(-1, 0), None);
        assert_eq!(Rotation::R1.to_native(540, 0), None);
        assert_eq!(Rotation::R0.to_native(0, 540), None);
    }
}

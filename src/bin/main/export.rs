use std::path::Path;

use piper_hal_desktop::platform::display::PanelSurface;

use super::BoardError;

/// Writes what the panel retains after power-off.
pub(super) fn save_retained(surface: &PanelSurface, path: &Path) -> Result<(), BoardError> {
    let frame = surface.retained_frame().ok_or(BoardError::Frame)?;
    frame.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn unwritable_path_surfaces_as_image_error() {
        let surface = PanelSurface::new();
        let path = env::temp_dir().join("paper-piper-missing-dir").join("frame.png");

        let err = save_retained(&surface, &path).expect_err("missing directory");
        assert!(matches!(err, BoardError::Image(_)));
        assert!(err.to_string().starts_with("image: "));
    }

    #[test]
    fn io_failures_convert() {
        let err = BoardError::from(std::io::Error::other("gone"));
        assert_eq!(err.to_string(), "io: gone");
    }
}

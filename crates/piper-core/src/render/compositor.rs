//! Places uploaded images on the surface through the decode cache.

use log::{debug, warn};

use super::{Codec, Point, Size, Surface};
use crate::content::{image::ImageFrame, jpeg::probe_dimensions};

/// How a compose call ended up drawing the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CompositeOutcome {
    /// Drawn from the decode cache at `scale`.
    Scaled { scale: f32 },
    /// Drawn unscaled at the origin by `codec`.
    Direct(Codec),
    /// Nothing usable was drawn.
    Failed,
    /// The cache did not hold this frame, so nothing was drawn.
    Skipped,
}

/// Tracks what the surface's decode cache currently holds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ImageCompositor {
    cache: Option<Size>,
    decoded_generation: Option<u32>,
}

impl ImageCompositor {
    pub const fn new() -> Self {
        Self {
            cache: None,
            decoded_generation: None,
        }
    }

    pub fn cached_size(&self) -> Option<Size> {
        self.cache
    }

    /// Draws `frame` filling the whole surface ("cover"), cropping overflow.
    ///
    /// The cache is resized only when the probed dimensions change and the
    /// bytes are decoded once per upload. Unknown formats and allocation
    /// failures fall back to an unscaled draw at the origin.
    pub fn compose<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        frame: &ImageFrame,
    ) -> CompositeOutcome {
        let size = match probe_dimensions(frame.bytes()) {
            Ok(size) => size,
            Err(err) => {
                debug!(
                    "image: probe failed err={:?} bytes={}, drawing direct",
                    err,
                    frame.len()
                );
                return draw_direct(surface, frame.bytes(), &[Codec::Jpeg, Codec::Png]);
            }
        };

        if self.cache != Some(size) {
            surface.release_raster();
            self.cache = None;
            self.decoded_generation = None;

            if let Err(err) = surface.allocate_raster(size) {
                warn!(
                    "image: cache allocation failed err={:?} width={} height={}",
                    err, size.width, size.height
                );
                return draw_direct(surface, frame.bytes(), &[Codec::Jpeg]);
            }
            self.cache = Some(size);
        }

        if self.decoded_generation != Some(frame.generation()) {
            if let Err(err) = surface.decode_into_raster(frame.bytes()) {
                warn!(
                    "image: decode failed err={:?} generation={}",
                    err,
                    frame.generation()
                );
                return draw_direct(surface, frame.bytes(), &[Codec::Jpeg, Codec::Png]);
            }
            self.decoded_generation = Some(frame.generation());
        }

        let screen = screen_size(surface);
        let scale = cover_scale(screen, size);
        surface.push_raster(screen_center(screen), scale, 0.0);
        debug!(
            "image: cover width={} height={} scale={}",
            size.width, size.height, scale
        );
        CompositeOutcome::Scaled { scale }
    }

    /// Redraws the cached frame for the sleep screen, letterboxed ("contain").
    ///
    /// Unlike [`Self::compose`] this never touches the cache: when it does not
    /// hold `frame` the image area is left blank.
    pub fn compose_for_sleep<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &ImageFrame,
    ) -> CompositeOutcome {
        let Ok(size) = probe_dimensions(frame.bytes()) else {
            return CompositeOutcome::Skipped;
        };
        if self.cache != Some(size) || self.decoded_generation != Some(frame.generation()) {
            return CompositeOutcome::Skipped;
        }

        let screen = screen_size(surface);
        let scale = contain_scale(screen, size);
        surface.push_raster(screen_center(screen), scale, 0.0);
        CompositeOutcome::Scaled { scale }
    }
}

fn draw_direct<S: Surface + ?Sized>(
    surface: &mut S,
    bytes: &[u8],
    codecs: &[Codec],
) -> CompositeOutcome {
    for &codec in codecs {
        if surface.draw_encoded(codec, bytes, Point::new(0, 0)) {
            return CompositeOutcome::Direct(codec);
        }
    }
    warn!("image: no codec accepted bytes={}", bytes.len());
    CompositeOutcome::Failed
}

fn screen_size<S: Surface + ?Sized>(surface: &S) -> Size {
    Size::new(surface.width().max(0) as u32, surface.height().max(0) as u32)
}

fn screen_center(screen: Size) -> Point {
    Point::new((screen.width / 2) as i32, (screen.height / 2) as i32)
}

fn axis_scales(screen: Size, image: Size) -> (f32, f32) {
    let sx = screen.width as f32 / image.width.max(1) as f32;
    let sy = screen.height as f32 / image.height.max(1) as f32;
    (sx, sy)
}

/// Uniform scale that fills `screen`, cropping the longer image axis.
pub fn cover_scale(screen: Size, image: Size) -> f32 {
    let (sx, sy) = axis_scales(screen, image);
    sx.max(sy)
}

/// Uniform scale that fits the whole image inside `screen`.
pub fn contain_scale(screen: Size, image: Size) -> f32 {
    let (sx, sy) = axis_scales(screen, image);
    sx.min(sy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content::{ImageTag, jpeg::tests::jpeg_header},
        testing::{DrawOp, TestSurface},
    };

    fn uploaded(bytes: &[u8]) -> ImageFrame {
        let mut frame = ImageFrame::new();
        frame.begin(ImageTag::Photo);
        frame.append(bytes);
        frame.finish();
        frame
    }

    #[test]
    fn cover_and_contain_pick_opposite_axes() {
        let screen = Size::new(540, 960);
        let image = Size::new(1080, 960);
        assert_eq!(cover_scale(screen, image), 1.0);
        assert_eq!(contain_scale(screen, image), 0.5);
    }

    #[test]
    fn jpeg_is_decoded_once_and_scaled_to_cover() {
        let mut surface = TestSurface::new(540, 960);
        let mut compositor = ImageCompositor::new();
        let frame = uploaded(&jpeg_header(0xC0, 270, 240));

        let outcome = compositor.compose(&mut surface, &frame);
        assert_eq!(outcome, CompositeOutcome::Scaled { scale: 4.0 });
        assert_eq!(surface.count(|op| matches!(op, DrawOp::AllocateRaster(_))), 1);
        assert_eq!(surface.count(|op| matches!(op, DrawOp::DecodeRaster)), 1);
        assert!(surface.ops.contains(&DrawOp::PushRaster {
            center: Point::new(270, 480),
            scale: 4.0
        }));

        compositor.compose(&mut surface, &frame);
        assert_eq!(surface.count(|op| matches!(op, DrawOp::AllocateRaster(_))), 1);
        assert_eq!(surface.count(|op| matches!(op, DrawOp::DecodeRaster)), 1);
    }

    #[test]
    fn same_size_new_upload_is_decoded_again_without_reallocating() {
        let mut surface = TestSurface::new(540, 960);
        let mut compositor = ImageCompositor::new();
        let mut frame = uploaded(&jpeg_header(0xC0, 100, 100));
        compositor.compose(&mut surface, &frame);

        frame.begin(ImageTag::Map);
        frame.append(&jpeg_header(0xC2, 100, 100));
        frame.finish();
        compositor.compose(&mut surface, &frame);

        assert_eq!(surface.count(|op| matches!(op, DrawOp::AllocateRaster(_))), 1);
        assert_eq!(surface.count(|op| matches!(op, DrawOp::DecodeRaster)), 2);
    }

    #[test]
    fn png_falls_back_to_direct_draw() {
        let mut surface = TestSurface::new(540, 960);
        surface.accepted_codecs = &[Codec::Png];
        let mut compositor = ImageCompositor::new();
        let frame = uploaded(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

        let outcome = compositor.compose(&mut surface, &frame);
        assert_eq!(outcome, CompositeOutcome::Direct(Codec::Png));
        assert_eq!(surface.count(|op| matches!(op, DrawOp::AllocateRaster(_))), 0);
        assert_eq!(
            surface.count(|op| matches!(op, DrawOp::DrawEncoded(Codec::Jpeg))),
            1
        );
    }

    #[test]
    fn allocation_failure_draws_jpeg_direct() {
        let mut surface = TestSurface::new(540, 960);
        surface.raster_budget = Some(10);
        let mut compositor = ImageCompositor::new();
        let frame = uploaded(&jpeg_header(0xC0, 640, 480));

        let outcome = compositor.compose(&mut surface, &frame);
        assert_eq!(outcome, CompositeOutcome::Direct(Codec::Jpeg));
        assert_eq!(compositor.cached_size(), None);
        assert_eq!(surface.count(|op| matches!(op, DrawOp::PushRaster { .. })), 0);
    }

    #[test]
    fn unreadable_bytes_fail_without_panicking() {
        let mut surface = TestSurface::new(540, 960);
        surface.accepted_codecs = &[];
        let mut compositor = ImageCompositor::new();

        let outcome = compositor.compose(&mut surface, &uploaded(b"nope"));
        assert_eq!(outcome, CompositeOutcome::Failed);
    }

    #[test]
    fn sleep_redraw_letterboxes_only_a_cached_frame() {
        let mut surface = TestSurface::new(540, 960);
        let mut compositor = ImageCompositor::new();
        let frame = uploaded(&jpeg_header(0xC0, 1080, 960));

        assert_eq!(
            compositor.compose_for_sleep(&mut surface, &frame),
            CompositeOutcome::Skipped
        );

        compositor.compose(&mut surface, &frame);
        assert_eq!(
            compositor.compose_for_sleep(&mut surface, &frame),
            CompositeOutcome::Scaled { scale: 0.5 }
        );
    }
}

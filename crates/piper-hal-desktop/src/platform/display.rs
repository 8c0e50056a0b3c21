use embedded_graphics::{
    Drawable,
    geometry::{Point as GfxPoint, Size as GfxSize},
    pixelcolor::Gray4,
    prelude::Primitive,
    primitives::{Line, PrimitiveStyle, Rectangle},
};
use epd_canvas::{Canvas, UpdateMode};
use image::GrayImage;
use log::debug;
use piper_core::render::{
    Codec, FontScale, Point, RasterError, Rect, RefreshMode, Rotation, Size, Surface, TextAnchor,
    TextMetrics, Tone,
};

use crate::render::{
    raster::{MAX_RASTER_PIXELS, RasterCache, blit_encoded},
    text::{anchor_origin, draw_row, glyph_height, row_chars, text_width, wrap_rows},
    tone_level,
};

/// Engine surface backed by an in-memory ED047TC1 frame.
pub struct PanelSurface {
    canvas: Canvas,
    raster: Option<RasterCache>,
    raster_budget: u64,
}

impl Default for PanelSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelSurface {
    pub fn new() -> Self {
        Self::with_raster_budget(MAX_RASTER_PIXELS)
    }

    /// Surface whose decode cache refuses anything above `budget_pixels`.
    pub fn with_raster_budget(budget_pixels: u64) -> Self {
        Self {
            canvas: Canvas::new(),
            raster: None,
            raster_budget: budget_pixels,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn raster_size(&self) -> Option<Size> {
        self.raster.as_ref().map(RasterCache::size)
    }

    /// What the panel currently retains, in the logical orientation.
    pub fn retained_frame(&self) -> Option<GrayImage> {
        GrayImage::from_raw(
            self.canvas.width() as u32,
            self.canvas.height() as u32,
            self.canvas.to_luma8(),
        )
    }

    fn stroke(tone: Tone) -> PrimitiveStyle<Gray4> {
        PrimitiveStyle::with_stroke(Gray4::new(tone_level(tone)), 1)
    }
}

fn panel_rotation(rotation: Rotation) -> epd_canvas::Rotation {
    epd_canvas::Rotation::from_index(rotation.index())
}

impl TextMetrics for PanelSurface {
    fn text_width(&self, text: &str, scale: FontScale) -> i32 {
        text_width(text, scale)
    }

    fn font_height(&self, scale: FontScale) -> i32 {
        glyph_height(scale)
    }

    fn wrapped_rows(&self, text: &str, scale: FontScale, max_width: i32) -> i32 {
        wrap_rows(text, row_chars(max_width, scale)).len() as i32
    }
}

impl Surface for PanelSurface {
    fn width(&self) -> i32 {
        self.canvas.width() as i32
    }

    fn height(&self) -> i32 {
        self.canvas.height() as i32
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.canvas.set_rotation(panel_rotation(rotation));
        debug!(
            "display: rotation={} logical={}x{}",
            rotation.index(),
            self.canvas.width(),
            self.canvas.height()
        );
    }

    fn set_refresh_mode(&mut self, mode: RefreshMode) {
        self.canvas.set_update_mode(match mode {
            RefreshMode::Quality => UpdateMode::Quality,
            RefreshMode::Fast => UpdateMode::Fast,
        });
    }

    fn fill_screen(&mut self, tone: Tone) {
        self.canvas.clear(tone_level(tone));
    }

    fn fill_rect(&mut self, rect: Rect, tone: Tone) {
        self.canvas
            .fill_rect(rect.x, rect.y, rect.w, rect.h, tone_level(tone));
    }

    fn draw_rect(&mut self, rect: Rect, tone: Tone) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let Ok(()) = Rectangle::new(
            GfxPoint::new(rect.x, rect.y),
            GfxSize::new(rect.w as u32, rect.h as u32),
        )
        .into_styled(Self::stroke(tone))
        .draw(&mut self.canvas);
    }

    fn draw_line(&mut self, from: Point, to: Point, tone: Tone) {
        let Ok(()) = Line::new(GfxPoint::new(from.x, from.y), GfxPoint::new(to.x, to.y))
            .into_styled(Self::stroke(tone))
            .draw(&mut self.canvas);
    }

    fn draw_text(&mut self, text: &str, at: Point, anchor: TextAnchor, scale: FontScale) {
        let origin = anchor_origin(at, anchor, text_width(text, scale), glyph_height(scale));
        draw_row(&mut self.canvas, text, origin, scale);
    }

    fn draw_text_wrapped(
        &mut self,
        text: &str,
        at: Point,
        scale: FontScale,
        max_width: i32,
        line_height: i32,
    ) {
        let mut y = at.y;
        for row in wrap_rows(text, row_chars(max_width, scale)) {
            if y >= self.height() {
                break;
            }
            draw_row(&mut self.canvas, row, Point::new(at.x, y), scale);
            y += line_height;
        }
    }

    fn allocate_raster(&mut self, size: Size) -> Result<(), RasterError> {
        self.raster = None;
        let cache = RasterCache::allocate(size, self.raster_budget)?;
        debug!("display: raster cache {}x{}", size.width, size.height);
        self.raster = Some(cache);
        Ok(())
    }

    fn release_raster(&mut self) {
        self.raster = None;
    }

    fn decode_into_raster(&mut self, bytes: &[u8]) -> Result<(), RasterError> {
        self.raster
            .as_mut()
            .ok_or(RasterError::NotAllocated)?
            .decode_jpeg(bytes)
    }

    fn push_raster(&mut self, center: Point, scale: f32, angle_deg: f32) {
        if let Some(raster) = &self.raster {
            raster.push(&mut self.canvas, center, scale, angle_deg);
        }
    }

    fn draw_encoded(&mut self, codec: Codec, bytes: &[u8], at: Point) -> bool {
        blit_encoded(&mut self.canvas, codec, bytes, at)
    }

    fn present(&mut self) {
        let count = self.canvas.present();
        debug!(
            "display: present #{} mode={:?}",
            count,
            self.canvas.update_mode()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::raster::tests::split_image;
    use epd_canvas::{BLACK, WHITE};
    use image::ImageFormat;
    use piper_core::{
        content::{ImageTag, image::ImageFrame, stream::StreamBuffer},
        layout::TextArea,
        render::compositor::{CompositeOutcome, ImageCompositor},
    };

    fn black_pixels(surface: &PanelSurface) -> usize {
        let mut count = 0;
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if surface.canvas().pixel(x, y) == Some(BLACK) {
                    count += 1;
                }
            }
        }
        count
    }

    fn frame(bytes: &[u8]) -> ImageFrame {
        let mut frame = ImageFrame::new();
        frame.begin(ImageTag::Photo);
        frame.append(bytes);
        frame.finish();
        frame
    }

    #[test]
    fn default_rotation_is_portrait() {
        let surface = PanelSurface::new();
        assert_eq!((surface.width(), surface.height()), (540, 960));
    }

    #[test]
    fn rotation_swaps_logical_size() {
        let mut surface = PanelSurface::new();
        surface.set_rotation(Rotation::Deg0);
        assert_eq!((surface.width(), surface.height()), (960, 540));
        surface.set_rotation(Rotation::Deg270);
        assert_eq!((surface.width(), surface.height()), (540, 960));
    }

    #[test]
    fn refresh_mode_reaches_the_canvas() {
        let mut surface = PanelSurface::new();
        surface.set_refresh_mode(RefreshMode::Fast);
        surface.present();
        assert_eq!(surface.canvas().last_presented(), Some(UpdateMode::Fast));
        assert_eq!(surface.canvas().presents(), 1);
    }

    #[test]
    fn outline_rect_leaves_interior() {
        let mut surface = PanelSurface::new();
        surface.draw_rect(Rect::new(10, 10, 20, 10), Tone::Black);

        assert_eq!(surface.canvas().pixel(10, 10), Some(BLACK));
        assert_eq!(surface.canvas().pixel(29, 19), Some(BLACK));
        assert_eq!(surface.canvas().pixel(15, 15), Some(WHITE));
        assert_eq!(black_pixels(&surface), 2 * 20 + 2 * 8);
    }

    #[test]
    fn light_grey_is_between_black_and_white() {
        let mut surface = PanelSurface::new();
        surface.fill_rect(Rect::new(0, 0, 4, 4), Tone::LightGrey);
        let level = surface.canvas().pixel(1, 1).expect("on screen");
        assert!(level > BLACK && level < WHITE);
    }

    #[test]
    fn wrapped_text_breaks_on_newline_and_width() {
        let mut surface = PanelSurface::new();
        let scale = FontScale::new(1);
        surface.draw_text_wrapped("ab\ncd", Point::new(0, 0), scale, 540, 20);
        let two_rows = black_pixels(&surface);

        let mut narrow = PanelSurface::new();
        narrow.draw_text_wrapped("abcd", Point::new(0, 0), scale, 12, 20);

        assert!(two_rows > 0);
        assert_eq!(black_pixels(&narrow), two_rows);
        assert!((10..20).all(|y| (0..12).all(|x| surface.canvas().pixel(x, y) == Some(WHITE))));
    }

    #[test]
    fn reserved_stream_rows_match_drawn_rows() {
        let mut surface = PanelSurface::new();
        let scale = FontScale::new(2);
        let long = "x".repeat(130);
        assert_eq!(surface.wrapped_rows(&long, scale, 520), 4);
        assert_eq!(surface.wrapped_rows("", scale, 520), 1);

        let mut buffer = StreamBuffer::new();
        buffer.push_bytes(format!("{long}\nnew\n").as_bytes());
        let area = TextArea { width: 520, height: 0 };
        let placed = buffer.visible_lines(&surface, scale, area, 0, 200, 20);
        assert_eq!(placed[0].1, 180);
        assert_eq!(placed[1].1, 100);

        surface.draw_text_wrapped(&long, Point::new(10, placed[1].1), scale, area.width, 20);
        let ink_in = |rows: core::ops::Range<i32>| {
            rows.flat_map(|y| (0..540).map(move |x| (x, y)))
                .any(|(x, y)| surface.canvas().pixel(x, y) == Some(BLACK))
        };
        assert!(ink_in(160..180));
        assert!(!ink_in(180..200));
    }

    #[test]
    fn centred_text_straddles_anchor() {
        let mut surface = PanelSurface::new();
        surface.draw_text("MMMM", Point::new(270, 480), TextAnchor::MiddleCenter, FontScale::DEFAULT);

        let left = (246..270).any(|x| (470..490).any(|y| surface.canvas().pixel(x, y) == Some(BLACK)));
        let right = (270..294).any(|x| (470..490).any(|y| surface.canvas().pixel(x, y) == Some(BLACK)));
        assert!(left && right);
        assert!((0..246).all(|x| surface.canvas().pixel(x, 480) == Some(WHITE)));
    }

    #[test]
    fn raster_decode_requires_allocation() {
        let mut surface = PanelSurface::new();
        let bytes = split_image(16, 16, ImageFormat::Jpeg);

        assert_eq!(
            surface.decode_into_raster(&bytes),
            Err(RasterError::NotAllocated)
        );
        surface.allocate_raster(Size::new(16, 16)).expect("fits");
        assert_eq!(surface.decode_into_raster(&bytes), Ok(()));
        surface.release_raster();
        assert_eq!(surface.raster_size(), None);
    }

    #[test]
    fn failed_allocation_drops_previous_cache() {
        let mut surface = PanelSurface::with_raster_budget(1_000);
        surface.allocate_raster(Size::new(10, 10)).expect("fits");

        assert_eq!(
            surface.allocate_raster(Size::new(100, 100)),
            Err(RasterError::OutOfMemory)
        );
        assert_eq!(surface.raster_size(), None);
    }

    #[test]
    fn compositor_fills_screen_with_jpeg() {
        let mut surface = PanelSurface::new();
        let frame = frame(&split_image(54, 96, ImageFormat::Jpeg));
        let mut compositor = ImageCompositor::new();

        let outcome = compositor.compose(&mut surface, &frame);

        assert_eq!(outcome, CompositeOutcome::Scaled { scale: 10.0 });
        assert!(surface.canvas().pixel(10, 480).is_some_and(|level| level <= 2));
        assert!(surface.canvas().pixel(530, 480).is_some_and(|level| level >= 13));
    }

    #[test]
    fn compositor_falls_back_to_png_blit() {
        let mut surface = PanelSurface::new();
        let frame = frame(&split_image(20, 20, ImageFormat::Png));
        let mut compositor = ImageCompositor::new();

        let outcome = compositor.compose(&mut surface, &frame);

        assert_eq!(outcome, CompositeOutcome::Direct(Codec::Png));
        assert_eq!(surface.canvas().pixel(0, 0), Some(BLACK));
        assert_eq!(surface.canvas().pixel(19, 19), Some(WHITE));
    }

    #[test]
    fn retained_frame_matches_logical_size() {
        let mut surface = PanelSurface::new();
        surface.fill_rect(Rect::new(0, 0, 1, 1), Tone::Black);

        let frame = surface.retained_frame().expect("frame");
        assert_eq!(frame.dimensions(), (540, 960));
        assert_eq!(frame.get_pixel(0, 0).0[0], 0);
        assert_eq!(frame.get_pixel(1, 0).0[0], 255);
    }
}

//! Test doubles shared by the unit tests.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::render::{
    Codec, FontScale, Point, RasterError, Rect, RefreshMode, Rotation, Size, Surface, TextAnchor,
    TextMetrics, Tone,
};

/// Monospace metrics: every glyph is `glyph_w` x `glyph_h` at scale 1.
#[derive(Clone, Copy, Debug)]
pub struct MonoMetrics {
    glyph_w: i32,
    glyph_h: i32,
}

impl MonoMetrics {
    pub const fn new(glyph_w: i32, glyph_h: i32) -> Self {
        Self { glyph_w, glyph_h }
    }
}

impl TextMetrics for MonoMetrics {
    fn text_width(&self, text: &str, scale: FontScale) -> i32 {
        text.chars().count() as i32 * self.glyph_w * i32::from(scale.get())
    }

    fn font_height(&self, scale: FontScale) -> i32 {
        self.glyph_h * i32::from(scale.get())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Rotation(Rotation),
    Refresh(RefreshMode),
    FillScreen(Tone),
    FillRect(Rect, Tone),
    DrawRect(Rect, Tone),
    Line(Point, Point),
    Text { text: String, at: Point },
    Wrapped { text: String, at: Point },
    AllocateRaster(Size),
    ReleaseRaster,
    DecodeRaster,
    PushRaster { center: Point, scale: f32 },
    DrawEncoded(Codec),
    Present,
}

/// Records every call; geometry follows the rotation like the real panel.
pub struct TestSurface {
    native_w: i32,
    native_h: i32,
    rotation: Rotation,
    metrics: MonoMetrics,
    raster: Option<Size>,
    pub ops: Vec<DrawOp>,
    /// Codecs `draw_encoded` accepts.
    pub accepted_codecs: &'static [Codec],
    /// Largest raster, in pixels, that can be allocated.
    pub raster_budget: Option<u64>,
}

impl TestSurface {
    /// A surface whose logical size is `width` x `height` at the default rotation.
    pub fn new(width: i32, height: i32) -> Self {
        let (native_w, native_h) = if Rotation::default().is_quarter_turn() {
            (height, width)
        } else {
            (width, height)
        };
        Self {
            native_w,
            native_h,
            rotation: Rotation::default(),
            metrics: MonoMetrics::new(6, 8),
            raster: None,
            ops: Vec::new(),
            accepted_codecs: &[Codec::Jpeg, Codec::Png],
            raster_budget: None,
        }
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Single-row and wrapped texts in draw order.
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } | DrawOp::Wrapped { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn presents(&self) -> usize {
        self.count(|op| matches!(op, DrawOp::Present))
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl TextMetrics for TestSurface {
    fn text_width(&self, text: &str, scale: FontScale) -> i32 {
        self.metrics.text_width(text, scale)
    }

    fn font_height(&self, scale: FontScale) -> i32 {
        self.metrics.font_height(scale)
    }
}

impl Surface for TestSurface {
    fn width(&self) -> i32 {
        if self.rotation.is_quarter_turn() {
            self.native_h
        } else {
            self.native_w
        }
    }

    fn height(&self) -> i32 {
        if self.rotation.is_quarter_turn() {
            self.native_w
        } else {
            self.native_h
        }
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.ops.push(DrawOp::Rotation(rotation));
    }

    fn set_refresh_mode(&mut self, mode: RefreshMode) {
        self.ops.push(DrawOp::Refresh(mode));
    }

    fn fill_screen(&mut self, tone: Tone) {
        self.ops.push(DrawOp::FillScreen(tone));
    }

    fn fill_rect(&mut self, rect: Rect, tone: Tone) {
        self.ops.push(DrawOp::FillRect(rect, tone));
    }

    fn draw_rect(&mut self, rect: Rect, tone: Tone) {
        self.ops.push(DrawOp::DrawRect(rect, tone));
    }

    fn draw_line(&mut self, from: Point, to: Point, _tone: Tone) {
        self.ops.push(DrawOp::Line(from, to));
    }

    fn draw_text(&mut self, text: &str, at: Point, _anchor: TextAnchor, _scale: FontScale) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
        });
    }

    fn draw_text_wrapped(
        &mut self,
        text: &str,
        at: Point,
        _scale: FontScale,
        _max_width: i32,
        _line_height: i32,
    ) {
        self.ops.push(DrawOp::Wrapped {
            text: text.to_string(),
            at,
        });
    }

    fn allocate_raster(&mut self, size: Size) -> Result<(), RasterError> {
        self.ops.push(DrawOp::AllocateRaster(size));
        let pixels = u64::from(size.width) * u64::from(size.height);
        if self.raster_budget.is_some_and(|budget| pixels > budget) {
            return Err(RasterError::OutOfMemory);
        }
        self.raster = Some(size);
        Ok(())
    }

    fn release_raster(&mut self) {
        if self.raster.take().is_some() {
            self.ops.push(DrawOp::ReleaseRaster);
        }
    }

    fn decode_into_raster(&mut self, _bytes: &[u8]) -> Result<(), RasterError> {
        self.ops.push(DrawOp::DecodeRaster);
        self.raster.map(|_| ()).ok_or(RasterError::NotAllocated)
    }

    fn push_raster(&mut self, center: Point, scale: f32, _angle_deg: f32) {
        self.ops.push(DrawOp::PushRaster { center, scale });
    }

    fn draw_encoded(&mut self, codec: Codec, _bytes: &[u8], _at: Point) -> bool {
        self.ops.push(DrawOp::DrawEncoded(codec));
        self.accepted_codecs.contains(&codec)
    }

    fn present(&mut self) {
        self.ops.push(DrawOp::Present);
    }
}

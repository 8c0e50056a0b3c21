//! Mono font text with integer magnification.

use core::convert::Infallible;

use embedded_graphics::{
    Pixel,
    geometry::{OriginDimensions, Point as GfxPoint, Size as GfxSize},
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::{Gray4, GrayColor},
    prelude::{DrawTarget, Drawable},
    text::{Baseline, Text},
};
use epd_canvas::Canvas;
use piper_core::render::{FontScale, Point, TextAnchor};

pub const BASE_FONT: &MonoFont<'static> = &FONT_6X10;

pub fn glyph_advance(scale: FontScale) -> i32 {
    (BASE_FONT.character_size.width + BASE_FONT.character_spacing) as i32 * i32::from(scale.get())
}

pub fn glyph_height(scale: FontScale) -> i32 {
    BASE_FONT.character_size.height as i32 * i32::from(scale.get())
}

pub fn text_width(text: &str, scale: FontScale) -> i32 {
    text.chars().count() as i32 * glyph_advance(scale)
}

/// Whole glyphs that fit in `max_width`; at least one.
pub fn row_chars(max_width: i32, scale: FontScale) -> usize {
    (max_width / glyph_advance(scale)).max(1) as usize
}

/// Top-left corner of a `width` x `height` box placed at `at` with `anchor`.
pub fn anchor_origin(at: Point, anchor: TextAnchor, width: i32, height: i32) -> Point {
    match anchor {
        TextAnchor::TopLeft => at,
        TextAnchor::MiddleCenter => Point::new(at.x - width / 2, at.y - height / 2),
        TextAnchor::BottomCenter => Point::new(at.x - width / 2, at.y - height),
    }
}

/// Splits `text` into rows of at most `max_chars` characters. `\n` always
/// ends a row; a blank segment yields an empty row.
pub fn wrap_rows(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut rows = Vec::new();

    for segment in text.split('\n') {
        if segment.is_empty() {
            rows.push(segment);
            continue;
        }

        let mut start = 0;
        let mut count = 0;
        for (offset, _) in segment.char_indices() {
            if count == max_chars {
                rows.push(&segment[start..offset]);
                start = offset;
                count = 0;
            }
            count += 1;
        }
        rows.push(&segment[start..]);
    }

    rows
}

/// Draws one row of black text with its top-left corner at `origin`.
pub fn draw_row(canvas: &mut Canvas, text: &str, origin: Point, scale: FontScale) {
    let mut target = Magnified {
        canvas,
        origin,
        factor: i32::from(scale.get()),
    };
    let style = MonoTextStyle::new(BASE_FONT, Gray4::BLACK);
    let Ok(_) = Text::with_baseline(text, GfxPoint::zero(), style, Baseline::Top).draw(&mut target);
}

/// Draw target that expands each font pixel into a `factor` square block.
struct Magnified<'a> {
    canvas: &'a mut Canvas,
    origin: Point,
    factor: i32,
}

impl DrawTarget for Magnified<'_> {
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.canvas.fill_rect(
                self.origin.x + point.x * self.factor,
                self.origin.y + point.y * self.factor,
                self.factor,
                self.factor,
                color.luma(),
            );
        }
        Ok(())
    }
}

impl OriginDimensions for Magnified<'_> {
    fn size(&self) -> GfxSize {
        let factor = self.factor.max(1) as usize;
        GfxSize::new(
            (self.canvas.width() / factor) as u32,
            (self.canvas.height() / factor) as u32,
        )
    }
}

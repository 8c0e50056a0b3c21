//! Fixed screen bands and the text areas derived from them.

use crate::render::{FontScale, TextMetrics};

pub const HEADER_HEIGHT: i32 = 44;
pub const FOOTER_HEIGHT: i32 = 60;
pub const MARGIN: i32 = 10;
pub const FOOTER_ZONES: i32 = 5;
pub const SLEEP_BAND_HEIGHT: i32 = 50;
/// Top padding of content redrawn without chrome for the sleep screen.
pub const SLEEP_TOP_PADDING: i32 = 20;
pub const HEADER_FONT: FontScale = FontScale::DEFAULT;

/// Space available to paginated or streamed text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextArea {
    pub width: i32,
    pub height: i32,
}

/// Text area for a `screen_w` x `screen_h` surface.
///
/// With visible chrome the header, the footer and one extra margin below the
/// header are removed before the outer margins.
pub fn page_area(screen_w: i32, screen_h: i32, ui_visible: bool) -> TextArea {
    let mut height = screen_h;
    if ui_visible {
        height -= HEADER_HEIGHT + FOOTER_HEIGHT + MARGIN;
    }

    TextArea {
        width: (screen_w - MARGIN * 2).max(0),
        height: (height - MARGIN * 2).max(0),
    }
}

/// First content row below the header band.
pub const fn content_top(ui_visible: bool) -> i32 {
    if ui_visible {
        MARGIN + HEADER_HEIGHT + MARGIN
    } else {
        MARGIN
    }
}

/// Row advance for paginated text: 1.2x the font height.
pub fn page_line_height<M: TextMetrics + ?Sized>(metrics: &M, scale: FontScale) -> i32 {
    (metrics.font_height(scale) * 12 / 10).max(1)
}

/// Row advance for streamed lines: 1.1x the font height.
pub fn stream_line_height<M: TextMetrics + ?Sized>(metrics: &M, scale: FontScale) -> i32 {
    (metrics.font_height(scale) * 11 / 10).max(1)
}

/// Top edge of the footer band.
pub const fn footer_top(screen_h: i32) -> i32 {
    screen_h - FOOTER_HEIGHT
}

/// Footer button zone (0..=4) under `x`.
pub fn footer_zone(x: i32, screen_w: i32) -> usize {
    let zone_w = (screen_w / FOOTER_ZONES).max(1);
    (x.max(0) / zone_w).min(FOOTER_ZONES - 1) as usize
}

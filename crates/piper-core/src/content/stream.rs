//! Bounded line log fed byte-by-byte from the stream socket.

use alloc::{borrow::Cow, string::String, vec::Vec};

use heapless::Deque;

use crate::{
    layout::TextArea,
    render::{FontScale, TextMetrics},
};

/// Completed lines kept; the oldest is evicted first.
pub const STREAM_CAPACITY: usize = 100;
/// A partial line this long is completed without waiting for `\n`.
pub const MAX_PARTIAL_LINE: usize = 4096;

/// FIFO of completed lines, a partial-line accumulator and the redraw debounce.
pub struct StreamBuffer {
    lines: Deque<Vec<u8>, STREAM_CAPACITY>,
    partial: Vec<u8>,
    dirty: bool,
    last_draw_ms: Option<u64>,
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamBuffer {
    pub const fn new() -> Self {
        Self {
            lines: Deque::new(),
            partial: Vec::new(),
            dirty: false,
            last_draw_ms: None,
        }
    }

    /// Clears the log for a new connection.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.partial.clear();
        self.dirty = false;
        self.last_draw_ms = None;
    }

    /// Feeds one byte. Returns `true` when it completed a line.
    pub fn push_byte(&mut self, byte: u8) -> bool {
        match byte {
            b'\r' => false,
            b'\n' => self.complete_line(),
            _ => {
                self.partial.push(byte);
                if self.partial.len() >= MAX_PARTIAL_LINE {
                    self.complete_line()
                } else {
                    false
                }
            }
        }
    }

    /// Feeds a burst of bytes. Returns the number of completed lines.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&byte| self.push_byte(byte)).count()
    }

    fn complete_line(&mut self) -> bool {
        if self.partial.is_empty() {
            return false;
        }

        let mut line = core::mem::take(&mut self.partial);
        while let Err(rejected) = self.lines.push_back(line) {
            self.lines.pop_front();
            line = rejected;
        }
        self.dirty = true;
        true
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Completed lines, oldest first.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &[u8]> {
        self.lines.iter().map(Vec::as_slice)
    }

    pub fn partial_line(&self) -> &[u8] {
        &self.partial
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether a debounced redraw should be issued at `now_ms`.
    pub fn redraw_due(&self, now_ms: u64, min_interval_ms: u64) -> bool {
        self.dirty
            && self
                .last_draw_ms
                .is_none_or(|last| now_ms.saturating_sub(last) > min_interval_ms)
    }

    pub fn mark_drawn(&mut self, now_ms: u64) {
        self.dirty = false;
        self.last_draw_ms = Some(now_ms);
    }

    /// Places the newest lines bottom-up in the band `top..bottom`.
    ///
    /// Each line takes [`TextMetrics::wrapped_rows`] rows of `line_height`.
    /// Older lines that no longer fit are left out whole.
    /// Returned pairs are `(text, y)` ordered newest first.
    pub fn visible_lines<M: TextMetrics + ?Sized>(
        &self,
        metrics: &M,
        scale: FontScale,
        area: TextArea,
        top: i32,
        bottom: i32,
        line_height: i32,
    ) -> Vec<(Cow<'_, str>, i32)> {
        let mut placed = Vec::new();
        let mut y = bottom;

        for line in self.lines().rev() {
            let text = String::from_utf8_lossy(line);
            let rows = metrics.wrapped_rows(&text, scale, area.width);

            y -= rows * line_height;
            if y < top {
                break;
            }
            placed.push((text, y));
        }

        placed
    }
}

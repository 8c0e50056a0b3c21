//! Greedy word wrapping of source text into screen-sized pages.

use alloc::{string::String, vec::Vec};

use crate::{
    layout::TextArea,
    render::{FontScale, TextMetrics},
};

/// Splits `text` into pages that fit `area` at `scale`.
///
/// Newlines always end a line and empty lines are dropped. Words are separated
/// on single spaces and keep their trailing space; a line breaks before the
/// word that would make it wider than `area.width`, and a word wider than a
/// whole line stays on its own line.
/// Lines within a page are joined with `\n`. The result is never empty.
pub fn paginate<M>(text: &str, metrics: &M, scale: FontScale, area: TextArea) -> Vec<String>
where
    M: TextMetrics + ?Sized,
{
    let line_height = crate::layout::page_line_height(metrics, scale);
    let mut pages = PageBuilder::new(lines_per_page(area, line_height));

    for paragraph in text.split_terminator('\n') {
        if paragraph.is_empty() {
            continue;
        }

        let mut line = String::new();
        let mut pieces = paragraph.split(' ').peekable();
        while let Some(piece) = pieces.next() {
            let previous_len = line.len();
            line.push_str(piece);
            if pieces.peek().is_some() {
                line.push(' ');
            }

            if previous_len > 0 && metrics.text_width(&line, scale) > area.width {
                let word = line.split_off(previous_len);
                pages.push_line(&line);
                line = word;
            }
        }

        if !line.is_empty() {
            pages.push_line(&line);
        }
    }

    pages.finish()
}

/// Rows of `line_height` that fit vertically; at least one.
pub fn lines_per_page(area: TextArea, line_height: i32) -> usize {
    let rows = area.height / line_height.max(1);
    rows.max(1) as usize
}

struct PageBuilder {
    pages: Vec<String>,
    page: String,
    lines: usize,
    max_lines: usize,
}

impl PageBuilder {
    fn new(max_lines: usize) -> Self {
        Self {
            pages: Vec::new(),
            page: String::new(),
            lines: 0,
            max_lines: max_lines.max(1),
        }
    }

    fn push_line(&mut self, line: &str) {
        if self.lines > 0 {
            self.page.push('\n');
        }
        self.page.push_str(line);
        self.lines += 1;

        if self.lines >= self.max_lines {
            self.pages.push(core::mem::take(&mut self.page));
            self.lines = 0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        if self.lines > 0 {
            self.pages.push(self.page);
        }
        if self.pages.is_empty() {
            self.pages.push(String::new());
        }
        self.pages
    }
}

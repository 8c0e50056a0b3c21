//! Paginated text document shown in Text and MessageFeed modes.

use alloc::{string::String, vec, vec::Vec};

use crate::{
    layout::TextArea,
    pagination::paginate,
    render::{FontScale, TextMetrics},
};

/// Source text plus its current pagination.
///
/// `pages` is never empty and `current_page < pages.len()` always holds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    source: String,
    pages: Vec<String>,
    current_page: usize,
    font_scale: FontScale,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            source: String::new(),
            pages: vec![String::new()],
            current_page: 0,
            font_scale: FontScale::DEFAULT,
        }
    }

    /// Replaces the source text. Call [`Self::reflow`] afterwards.
    pub fn set_source(&mut self, source: String, font_scale: FontScale) {
        self.source = source;
        self.font_scale = font_scale;
    }

    /// Recomputes pages for `area` and returns to the first page.
    pub fn reflow<M: TextMetrics + ?Sized>(&mut self, metrics: &M, area: TextArea) {
        self.pages = paginate(&self.source, metrics, self.font_scale, area);
        self.current_page = 0;
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn font_scale(&self) -> FontScale {
        self.font_scale
    }

    /// Returns `true` when the scale changed. Call [`Self::reflow`] afterwards.
    pub fn set_font_scale(&mut self, scale: FontScale) -> bool {
        let changed = self.font_scale != scale;
        self.font_scale = scale;
        changed
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_index(&self) -> usize {
        self.current_page
    }

    pub fn current_page(&self) -> &str {
        self.pages.get(self.current_page).map_or("", String::as_str)
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page + 1 >= self.pages.len()
    }

    pub fn next_page(&mut self) -> bool {
        if self.is_last_page() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if self.is_first_page() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn first_page(&mut self) -> bool {
        let moved = self.current_page != 0;
        self.current_page = 0;
        moved
    }

    pub fn last_page(&mut self) -> bool {
        let last = self.pages.len().saturating_sub(1);
        let moved = self.current_page != last;
        self.current_page = last;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MonoMetrics;

    fn three_page_document() -> Document {
        let mut doc = Document::new();
        doc.set_source(String::from("a\nb\nc"), FontScale::MIN);
        doc.reflow(&MonoMetrics::new(6, 8), TextArea { width: 60, height: 9 });
        doc
    }

    #[test]
    fn new_document_has_one_empty_page() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.current_page(), "");
        assert!(doc.is_first_page() && doc.is_last_page());
    }

    #[test]
    fn navigation_is_bounded() {
        let mut doc = three_page_document();
        assert_eq!(doc.page_count(), 3);

        assert!(!doc.previous_page());
        assert!(doc.next_page());
        assert!(doc.next_page());
        assert!(!doc.next_page());
        assert_eq!(doc.page_index(), 2);
        assert_eq!(doc.current_page(), "c");

        assert!(doc.first_page());
        assert!(!doc.first_page());
        assert!(doc.last_page());
        assert!(!doc.last_page());
    }

    #[test]
    fn reflow_resets_to_first_page() {
        let mut doc = three_page_document();
        doc.last_page();

        doc.reflow(&MonoMetrics::new(6, 8), TextArea { width: 60, height: 90 });
        assert_eq!(doc.page_index(), 0);
        assert_eq!(doc.page_count(), 1);
    }
}

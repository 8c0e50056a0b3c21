//! Raw image bytes received from the upload path.

use alloc::vec::Vec;

use super::ImageTag;

/// Upload capacity; bytes beyond it are dropped.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// The most recent upload.
///
/// `generation` increases on every completed upload so the decode cache can
/// tell a new image from a redraw of the same one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ImageFrame {
    bytes: Vec<u8>,
    tag: ImageTag,
    generation: u32,
    truncated: bool,
}

impl ImageFrame {
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            tag: ImageTag::Photo,
            generation: 0,
            truncated: false,
        }
    }

    /// Starts a new upload, discarding the previous bytes.
    pub fn begin(&mut self, tag: ImageTag) {
        self.bytes.clear();
        self.tag = tag;
        self.truncated = false;
    }

    /// Appends a chunk, keeping only what fits. Returns the bytes accepted.
    pub fn append(&mut self, chunk: &[u8]) -> usize {
        let room = MAX_IMAGE_BYTES.saturating_sub(self.bytes.len());
        let accepted = chunk.len().min(room);
        if accepted < chunk.len() {
            self.truncated = true;
        }
        if let Some(head) = chunk.get(..accepted) {
            self.bytes.extend_from_slice(head);
        }
        accepted
    }

    /// Marks the upload complete.
    pub fn finish(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn tag(&self) -> ImageTag {
        self.tag
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether the last upload overflowed [`MAX_IMAGE_BYTES`].
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn begin_discards_previous_upload() {
        let mut frame = ImageFrame::new();
        frame.begin(ImageTag::Map);
        frame.append(b"abc");
        frame.finish();

        frame.begin(ImageTag::Photo);
        assert!(frame.is_empty());
        assert_eq!(frame.tag(), ImageTag::Photo);
        assert_eq!(frame.generation(), 1);
    }

    #[test]
    fn bytes_beyond_capacity_are_dropped() {
        let mut frame = ImageFrame::new();
        frame.begin(ImageTag::Photo);

        let chunk = vec![0xAB; MAX_IMAGE_BYTES - 10];
        assert_eq!(frame.append(&chunk), MAX_IMAGE_BYTES - 10);
        assert_eq!(frame.append(&[1u8; 25]), 10);
        assert_eq!(frame.append(&[2u8; 5]), 0);

        assert_eq!(frame.len(), MAX_IMAGE_BYTES);
        assert!(frame.was_truncated());
        assert_eq!(frame.bytes().last(), Some(&1));
    }
}

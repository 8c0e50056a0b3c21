//! Content ingestion events and the buffers they fill.

pub mod document;
pub mod image;
pub mod jpeg;
pub mod stream;

use alloc::{string::String, vec::Vec};

use crate::render::FontScale;

/// Auxiliary label carried by an image upload.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ImageTag {
    #[default]
    Photo,
    Map,
}

impl ImageTag {
    /// Parses the upload's content-type label; only `"map"` is recognised.
    pub fn from_label(label: &str) -> Self {
        if label == "map" { Self::Map } else { Self::Photo }
    }

    pub const fn header_label(self) -> &'static str {
        match self {
            Self::Photo => "IMAGE",
            Self::Map => "MAP",
        }
    }
}

/// One event produced by the network layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContentEvent {
    /// Posted text with an optional font scale.
    TextSet {
        text: String,
        font_scale: Option<FontScale>,
    },
    /// An upload started; previous image bytes are discarded.
    ImageStart { tag: ImageTag },
    ImageChunk(Vec<u8>),
    /// The upload finished and the image should be shown.
    ImageEnd,
    /// A new client connected to the line stream.
    StreamConnected,
    StreamBytes(Vec<u8>),
    /// A message-feed subscription was configured successfully.
    FeedConnected { broker: String, topic: String },
    /// One message payload from the subscribed feed.
    FeedText(String),
}

/// Polled content collaborator.
///
/// The three polls mirror the transports of the board and are called once per
/// tick in this order: requests, stream socket, message feed.
pub trait ContentSource {
    type Error;

    /// Text posts, image uploads and feed configuration requests.
    fn poll_request(&mut self) -> Result<Option<ContentEvent>, Self::Error>;

    /// Line-stream connection and bytes.
    fn poll_stream(&mut self) -> Result<Option<ContentEvent>, Self::Error> {
        Ok(None)
    }

    /// Message-feed payloads.
    fn poll_feed(&mut self) -> Result<Option<ContentEvent>, Self::Error> {
        Ok(None)
    }
}

/// Drops carriage returns and expands literal `\n` escapes to newlines.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {}
            '\\' if chars.peek() == Some(&'n') => {
                chars.next();
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_cr_and_expands_escapes() {
        assert_eq!(normalize_text("a\r\nb\\nc"), "a\nb\nc");
        assert_eq!(normalize_text("path\\to"), "path\\to");
        assert_eq!(normalize_text("\\"), "\\");
    }

    #[test]
    fn only_map_label_is_special() {
        assert_eq!(ImageTag::from_label("map"), ImageTag::Map);
        assert_eq!(ImageTag::from_label("MAP"), ImageTag::Photo);
        assert_eq!(ImageTag::from_label(""), ImageTag::Photo);
    }
}

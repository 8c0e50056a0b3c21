//! Active presentation mode.

/// Exactly one mode is active at a time; the device cold-starts at [`Mode::None`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    #[default]
    None,
    Text,
    Image,
    Stream,
    MessageFeed,
}

impl Mode {
    /// Modes that render a paginated [`crate::content::document::Document`].
    pub const fn is_paged(self) -> bool {
        matches!(self, Self::Text | Self::MessageFeed)
    }

    /// Modes where vertical flicks change the font scale.
    pub const fn has_font_scale(self) -> bool {
        matches!(self, Self::Text | Self::Stream | Self::MessageFeed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
            Self::Stream => "STREAM",
            Self::MessageFeed => "FEED",
        }
    }
}

//! Drawing surface contract and render-side value types.

pub mod chrome;
pub mod compositor;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Pixel dimensions of an image or raster.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tone {
    White,
    LightGrey,
    Black,
}

/// Panel waveform used for the next update.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RefreshMode {
    /// Full-quality update with flashing; used for static views.
    Quality,
    /// Fast partial update; used for the scrolling stream.
    Fast,
}

/// Which point of the text box `at` refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextAnchor {
    TopLeft,
    MiddleCenter,
    BottomCenter,
}

/// Quarter-turn display rotation, numbered 0..=3 like the panel controller.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Rotation {
    Deg0,
    #[default]
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn index(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    pub const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// Whether logical width and height are swapped relative to the native panel.
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// Integer text magnification applied to the base font.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct FontScale(u8);

impl FontScale {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(6);
    pub const DEFAULT: Self = Self(2);

    /// Clamps `value` into `MIN..=MAX`.
    pub const fn new(value: u8) -> Self {
        if value < Self::MIN.0 {
            Self::MIN
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn larger(self) -> Option<Self> {
        (self < Self::MAX).then(|| Self(self.0 + 1))
    }

    pub fn smaller(self) -> Option<Self> {
        (self > Self::MIN).then(|| Self(self.0 - 1))
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Synchronous text measurement.
pub trait TextMetrics {
    /// Rendered width of `text` in pixels on a single row.
    fn text_width(&self, text: &str, scale: FontScale) -> i32;

    /// Height of one glyph row in pixels.
    fn font_height(&self, scale: FontScale) -> i32;

    /// Rows [`Surface::draw_text_wrapped`] uses for `text` within `max_width`.
    /// Implementors that wrap differently must override this so reserved and
    /// drawn rows agree.
    fn wrapped_rows(&self, text: &str, scale: FontScale, max_width: i32) -> i32 {
        let max_width = max_width.max(1);
        let width = self.text_width(text, scale);
        ((width + max_width - 1) / max_width).max(1)
    }
}

/// Codecs available for direct, unscaled draws.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Codec {
    Jpeg,
    Png,
}

impl Codec {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }
}

/// Decode-cache failures reported by a [`Surface`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RasterError {
    /// The cache could not be allocated at the requested size.
    OutOfMemory,
    /// No cache exists or its size does not match the decoded image.
    NotAllocated,
    /// The codec rejected the bytes.
    Decode,
}

/// Drawing surface of the bistable panel.
///
/// The surface also owns the off-screen decode cache; it is single-writer by
/// construction since only the control loop holds it.
pub trait Surface: TextMetrics {
    /// Logical width for the current rotation.
    fn width(&self) -> i32;
    /// Logical height for the current rotation.
    fn height(&self) -> i32;

    fn set_rotation(&mut self, rotation: Rotation);
    fn set_refresh_mode(&mut self, mode: RefreshMode);

    fn fill_screen(&mut self, tone: Tone);
    fn fill_rect(&mut self, rect: Rect, tone: Tone);
    fn draw_rect(&mut self, rect: Rect, tone: Tone);
    fn draw_line(&mut self, from: Point, to: Point, tone: Tone);

    /// Draws a single row of black text.
    fn draw_text(&mut self, text: &str, at: Point, anchor: TextAnchor, scale: FontScale);

    /// Draws black text from the top-left `at`, continuing on the next row of
    /// `line_height` whenever the row would exceed `max_width`. `\n` starts a
    /// new row.
    fn draw_text_wrapped(
        &mut self,
        text: &str,
        at: Point,
        scale: FontScale,
        max_width: i32,
        line_height: i32,
    );

    /// Creates the decode cache at `size`, replacing any previous one.
    fn allocate_raster(&mut self, size: Size) -> Result<(), RasterError>;
    fn release_raster(&mut self);
    /// Decodes JPEG `bytes` at native resolution into the decode cache.
    fn decode_into_raster(&mut self, bytes: &[u8]) -> Result<(), RasterError>;
    /// Draws the decode cache scaled by `scale` and rotated by `angle_deg`,
    /// centred on `center`. Pixels outside the screen are cropped.
    fn push_raster(&mut self, center: Point, scale: f32, angle_deg: f32);

    /// Decodes and draws `bytes` unscaled with its top-left corner at `at`.
    /// Returns `false` when the codec rejects the bytes.
    fn draw_encoded(&mut self, codec: Codec, bytes: &[u8], at: Point) -> bool;

    /// Pushes the composed frame to the panel.
    fn present(&mut self);
}

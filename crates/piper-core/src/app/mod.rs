//! Mode controller: owns every piece of display state and drives the collaborators.

use alloc::{format, string::String};

use log::{debug, info, warn};

use crate::{
    config::PiperConfig,
    content::{
        ContentEvent, ContentSource, document::Document, image::ImageFrame, normalize_text,
        stream::StreamBuffer,
    },
    input::{
        AccelSample, MotionSensor, TouchProvider, TouchSample,
        gesture::{GestureClassifier, GestureContext, NavAction},
        orientation::OrientationFilter,
    },
    layout::{
        MARGIN, SLEEP_BAND_HEIGHT, SLEEP_TOP_PADDING, content_top, page_area, page_line_height,
        stream_line_height,
    },
    mode::Mode,
    power::{PowerControl, PowerLifecycle, PowerPhase, PowerStep},
    render::{
        FontScale, Point, Rect, RefreshMode, Rotation, Surface, Tone,
        chrome::{draw_footer, draw_header, draw_sleep_band, draw_welcome},
        compositor::ImageCompositor,
    },
};

/// Upper bound of events drained from one source in a single tick.
const MAX_EVENTS_PER_POLL: usize = 64;
const ADDRESS_BYTES: usize = 48;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    Idle,
    Redrawn,
    /// The sleep screen is shown; power-off is pending.
    Sleeping,
    PoweredOff,
}

/// Board-facing summary of the current display state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusSnapshot {
    pub mode: Mode,
    pub screen_w: i32,
    pub screen_h: i32,
    pub rotation: Rotation,
    pub page_index: usize,
    pub page_count: usize,
    pub font_scale: FontScale,
    pub stream_lines: usize,
    pub ui_visible: bool,
    pub image_bytes: usize,
    pub idle_ms: u64,
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum Redraw {
    None,
    /// Stream area only, fast refresh.
    Stream,
    Full,
}

pub struct PaperApp<S, C, T, M, P>
where
    S: Surface,
    C: ContentSource,
    T: TouchProvider,
    M: MotionSensor,
    P: PowerControl,
{
    surface: S,
    content: C,
    touch: T,
    motion: M,
    power: P,
    config: PiperConfig,
    mode: Mode,
    ui_visible: bool,
    font_scale: FontScale,
    document: Document,
    stream: StreamBuffer,
    image: ImageFrame,
    compositor: ImageCompositor,
    orientation: OrientationFilter,
    gestures: GestureClassifier,
    lifecycle: PowerLifecycle,
    address: heapless::String<ADDRESS_BYTES>,
    pending_redraw: Redraw,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");

impl<S, C, T, M, P> PaperApp<S, C, T, M, P>
where
    S: Surface,
    C: ContentSource,
    T: TouchProvider,
    M: MotionSensor,
    P: PowerControl,
{
    pub fn new(
        mut surface: S,
        content: C,
        touch: T,
        motion: M,
        power: P,
        config: PiperConfig,
        now_ms: u64,
    ) -> Self {
        let config = config.sanitized();
        surface.set_rotation(config.initial_rotation);

        Self {
            surface,
            content,
            touch,
            motion,
            power,
            mode: Mode::None,
            ui_visible: true,
            font_scale: config.default_font_scale,
            document: Document::new(),
            stream: StreamBuffer::new(),
            image: ImageFrame::new(),
            compositor: ImageCompositor::new(),
            orientation: OrientationFilter::new(
                config.initial_rotation,
                config.tilt_threshold_g,
                config.tilt_settle_ms,
                config.tilt_cooldown_ms,
            ),
            gestures: GestureClassifier::new(config.page_settle_ms, config.toggle_settle_ms),
            lifecycle: PowerLifecycle::new(now_ms, config.idle_timeout_ms, config.sleep_hold_ms),
            address: heapless::String::new(),
            pending_redraw: Redraw::Full,
            config,
        }
    }

    /// Network address shown in the header; truncated to fit.
    pub fn set_address(&mut self, address: &str) {
        self.address.clear();
        for ch in address.chars() {
            if self.address.push(ch).is_err() {
                break;
            }
        }
        self.request_redraw(Redraw::Full);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn ui_visible(&self) -> bool {
        self.ui_visible
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn stream(&self) -> &StreamBuffer {
        &self.stream
    }

    pub fn image(&self) -> &ImageFrame {
        &self.image
    }

    pub fn rotation(&self) -> Rotation {
        self.orientation.committed()
    }

    pub fn power_phase(&self) -> PowerPhase {
        self.lifecycle.phase()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn status(&self, now_ms: u64) -> StatusSnapshot {
        StatusSnapshot {
            mode: self.mode,
            screen_w: self.surface.width(),
            screen_h: self.surface.height(),
            rotation: self.orientation.committed(),
            page_index: self.document.page_index(),
            page_count: self.document.page_count(),
            font_scale: self.font_scale,
            stream_lines: self.stream.len(),
            ui_visible: self.ui_visible,
            image_bytes: self.image.len(),
            idle_ms: self.lifecycle.idle_ms(now_ms),
        }
    }

    fn request_redraw(&mut self, redraw: Redraw) {
        self.pending_redraw = self.pending_redraw.max(redraw);
    }

    /// Full redraw, or the stream area when streaming.
    fn request_view_redraw(&mut self) {
        if self.mode == Mode::Stream {
            self.request_redraw(Redraw::Stream);
        } else {
            self.request_redraw(Redraw::Full);
        }
    }

    fn enter_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            info!("mode: {} -> {}", self.mode.as_str(), mode.as_str());
        }
        self.mode = mode;
    }

    /// Repaginates the document for the current surface and chrome.
    fn reflow(&mut self) {
        let area = page_area(self.surface.width(), self.surface.height(), self.ui_visible);
        self.document.reflow(&self.surface, area);
        debug!(
            "text: reflow pages={} scale={} area={}x{}",
            self.document.page_count(),
            self.document.font_scale().get(),
            area.width,
            area.height
        );
    }

    fn show_text(&mut self, text: String, mode: Mode, font_scale: FontScale) {
        self.font_scale = font_scale;
        self.document.set_source(text, font_scale);
        self.enter_mode(mode);
        self.reflow();
        self.request_redraw(Redraw::Full);
    }

    fn apply_content_event(&mut self, event: ContentEvent, now_ms: u64) {
        self.lifecycle.record_activity(now_ms);

        match event {
            ContentEvent::TextSet { text, font_scale } => {
                let scale = font_scale.unwrap_or(self.config.default_font_scale);
                self.show_text(normalize_text(&text), Mode::Text, scale);
            }
            ContentEvent::ImageStart { tag } => {
                debug!("image: upload start tag={}", tag.header_label());
                self.image.begin(tag);
            }
            ContentEvent::ImageChunk(chunk) => {
                let accepted = self.image.append(&chunk);
                if accepted < chunk.len() {
                    debug!(
                        "image: capacity reached, dropped {} bytes",
                        chunk.len() - accepted
                    );
                }
            }
            ContentEvent::ImageEnd => {
                self.image.finish();
                info!(
                    "image: upload complete bytes={} truncated={}",
                    self.image.len(),
                    self.image.was_truncated()
                );
                self.enter_mode(Mode::Image);
                self.request_redraw(Redraw::Full);
            }
            ContentEvent::StreamConnected => {
                self.stream.reset();
                self.enter_mode(Mode::Stream);
                self.request_redraw(Redraw::Full);
            }
            ContentEvent::StreamBytes(bytes) => {
                let completed = self.stream.push_bytes(&bytes);
                if completed > 0 {
                    debug!("stream: +{} lines total={}", completed, self.stream.len());
                }
            }
            ContentEvent::FeedConnected { broker, topic } => {
                info!("feed: subscribed broker={} topic={}", broker, topic);
                let banner = format!(
                    "Feed connected\n\nBroker: {broker}\nTopic: {topic}\n\nWaiting for messages..."
                );
                self.show_text(banner, Mode::MessageFeed, self.font_scale);
            }
            ContentEvent::FeedText(text) => {
                self.show_text(
                    normalize_text(&text),
                    Mode::MessageFeed,
                    self.config.default_font_scale,
                );
            }
        }
    }

    fn battery_level(&mut self) -> Option<u8> {
        match self.power.battery_percent() {
            Ok(level) => Some(level.min(100)),
            Err(_) => {
                warn!("power: battery query failed");
                None
            }
        }
    }
}

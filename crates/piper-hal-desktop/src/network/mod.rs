//! Content ingestion for the host: in-process request and feed queues plus the
//! TCP line stream.

pub mod stream;

use core::fmt::Write as _;
use std::{
    io,
    net::IpAddr,
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
};

use log::debug;
use piper_core::{
    content::{ContentEvent, ContentSource, ImageTag},
    render::FontScale,
};
use thiserror::Error;

use self::stream::LineStreamListener;

/// Image bytes per upload chunk, the size of one HTTP upload buffer.
pub const UPLOAD_CHUNK_BYTES: usize = 1436;
pub const ADDRESS_BYTES: usize = 48;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("socket error: {0}")]
    Io(#[from] io::Error),
    /// The engine side of the queue is gone.
    #[error("content queue closed")]
    Closed,
}

/// Producer side handed to whatever accepts requests on the host.
#[derive(Clone, Debug)]
pub struct ContentHandle {
    requests: Sender<ContentEvent>,
    feed: Sender<ContentEvent>,
}

impl ContentHandle {
    pub fn post_text(
        &self,
        text: impl Into<String>,
        font_scale: Option<FontScale>,
    ) -> Result<(), NetworkError> {
        self.send_request(ContentEvent::TextSet {
            text: text.into(),
            font_scale,
        })
    }

    /// Queues `bytes` as a chunked upload.
    pub fn upload_image(&self, bytes: &[u8], tag: ImageTag) -> Result<(), NetworkError> {
        self.send_request(ContentEvent::ImageStart { tag })?;
        for chunk in bytes.chunks(UPLOAD_CHUNK_BYTES) {
            self.send_request(ContentEvent::ImageChunk(chunk.to_vec()))?;
        }
        debug!("network: upload queued bytes={} tag={:?}", bytes.len(), tag);
        self.send_request(ContentEvent::ImageEnd)
    }

    pub fn connect_feed(
        &self,
        broker: impl Into<String>,
        topic: impl Into<String>,
    ) -> Result<(), NetworkError> {
        self.send_request(ContentEvent::FeedConnected {
            broker: broker.into(),
            topic: topic.into(),
        })
    }

    /// Delivers one feed message payload.
    pub fn publish(&self, payload: impl Into<String>) -> Result<(), NetworkError> {
        self.feed
            .send(ContentEvent::FeedText(payload.into()))
            .map_err(|_| NetworkError::Closed)
    }

    fn send_request(&self, event: ContentEvent) -> Result<(), NetworkError> {
        self.requests.send(event).map_err(|_| NetworkError::Closed)
    }
}

/// Engine side: drains the queues and the optional line stream.
#[derive(Debug)]
pub struct HostContent {
    requests: Receiver<ContentEvent>,
    feed: Receiver<ContentEvent>,
    stream: Option<LineStreamListener>,
}

impl HostContent {
    pub fn channel() -> (Self, ContentHandle) {
        let (request_tx, request_rx) = mpsc::channel();
        let (feed_tx, feed_rx) = mpsc::channel();

        (
            Self {
                requests: request_rx,
                feed: feed_rx,
                stream: None,
            },
            ContentHandle {
                requests: request_tx,
                feed: feed_tx,
            },
        )
    }

    pub fn with_stream(mut self, listener: LineStreamListener) -> Self {
        self.stream = Some(listener);
        self
    }

    pub fn stream(&self) -> Option<&LineStreamListener> {
        self.stream.as_ref()
    }
}

fn drain(queue: &Receiver<ContentEvent>) -> Option<ContentEvent> {
    match queue.try_recv() {
        Ok(event) => Some(event),
        Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
    }
}

impl ContentSource for HostContent {
    type Error = NetworkError;

    fn poll_request(&mut self) -> Result<Option<ContentEvent>, Self::Error> {
        Ok(drain(&self.requests))
    }

    fn poll_stream(&mut self) -> Result<Option<ContentEvent>, Self::Error> {
        match self.stream.as_mut() {
            Some(listener) => Ok(listener.poll()?),
            None => Ok(None),
        }
    }

    fn poll_feed(&mut self) -> Result<Option<ContentEvent>, Self::Error> {
        Ok(drain(&self.feed))
    }
}

/// Address shown in the header and the welcome hints.
pub fn display_address(ip: IpAddr) -> heapless::String<ADDRESS_BYTES> {
    let mut out = heapless::String::new();
    if write!(out, "{ip}").is_err() {
        out.clear();
    }
    out
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    fn drain_requests(content: &mut HostContent) -> Vec<ContentEvent> {
        let mut events = Vec::new();
        while let Some(event) = content.poll_request().expect("poll") {
            events.push(event);
        }
        events
    }

    #[test]
    fn text_post_reaches_request_queue() {
        let (mut content, handle) = HostContent::channel();
        handle
            .post_text("Hello", Some(FontScale::new(3)))
            .expect("send");

        assert_eq!(
            drain_requests(&mut content),
            vec![ContentEvent::TextSet {
                text: "Hello".into(),
                font_scale: Some(FontScale::new(3)),
            }]
        );
        assert_eq!(content.poll_feed().expect("poll"), None);
    }

    #[test]
    fn upload_is_chunked_between_start_and_end() {
        let (mut content, handle) = HostContent::channel();
        let bytes = vec![7u8; UPLOAD_CHUNK_BYTES * 2 + 10];
        handle.upload_image(&bytes, ImageTag::Map).expect("send");

        let events = drain_requests(&mut content);
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], ContentEvent::ImageStart { tag: ImageTag::Map });
        assert_eq!(events[3], ContentEvent::ImageChunk(vec![7u8; 10]));
        assert_eq!(events[4], ContentEvent::ImageEnd);
    }

    #[test]
    fn feed_messages_use_their_own_queue() {
        let (mut content, handle) = HostContent::channel();
        handle.connect_feed("broker.local", "sensors/#").expect("send");
        handle.publish("21.5").expect("send");

        assert_eq!(
            content.poll_feed().expect("poll"),
            Some(ContentEvent::FeedText("21.5".into()))
        );
        assert!(matches!(
            content.poll_request().expect("poll"),
            Some(ContentEvent::FeedConnected { .. })
        ));
    }

    #[test]
    fn closed_engine_side_is_reported() {
        let (content, handle) = HostContent::channel();
        drop(content);
        assert!(matches!(
            handle.post_text("lost", None),
            Err(NetworkError::Closed)
        ));
    }

    #[test]
    fn socket_failures_keep_their_source() {
        let err = NetworkError::from(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert!(matches!(&err, NetworkError::Io(inner) if inner.kind() == io::ErrorKind::ConnectionReset));
        assert_eq!(err.to_string(), "socket error: reset");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn dropped_handle_reads_as_empty() {
        let (mut content, handle) = HostContent::channel();
        drop(handle);
        assert_eq!(content.poll_request().expect("poll"), None);
        assert_eq!(content.poll_stream().expect("poll"), None);
    }

    #[test]
    fn address_formats_ip() {
        assert_eq!(
            display_address(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42))).as_str(),
            "192.168.1.42"
        );
    }
}

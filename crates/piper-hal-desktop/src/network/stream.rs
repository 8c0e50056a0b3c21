//! Single-client TCP line stream.

use std::{
    io::{self, Read},
    net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
};

use log::{debug, info};
use piper_core::content::ContentEvent;

/// Bytes read from the client per poll.
pub const STREAM_READ_BYTES: usize = 1024;

/// Non-blocking listener serving one client at a time. Further clients wait in
/// the backlog until the current one disconnects.
#[derive(Debug)]
pub struct LineStreamListener {
    listener: TcpListener,
    client: Option<TcpStream>,
    scratch: [u8; STREAM_READ_BYTES],
}

impl LineStreamListener {
    pub fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        info!("stream: listening addr={}", listener.local_addr()?);

        Ok(Self {
            listener,
            client: None,
            scratch: [0; STREAM_READ_BYTES],
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Accepts a waiting client or reads from the current one.
    pub fn poll(&mut self) -> io::Result<Option<ContentEvent>> {
        let Some(client) = self.client.as_mut() else {
            return self.accept();
        };

        match client.read(&mut self.scratch) {
            Ok(0) => {
                info!("stream: client closed");
                self.client = None;
                Ok(None)
            }
            Ok(read) => Ok(Some(ContentEvent::StreamBytes(self.scratch[..read].to_vec()))),
            Err(err) if is_transient(&err) => Ok(None),
            Err(err) => {
                debug!("stream: dropping client err={}", err);
                self.client = None;
                Err(err)
            }
        }
    }

    fn accept(&mut self) -> io::Result<Option<ContentEvent>> {
        match self.listener.accept() {
            Ok((stream, peer)) => {
                stream.set_nonblocking(true)?;
                info!("stream: client connected peer={}", peer);
                self.client = Some(stream);
                Ok(Some(ContentEvent::StreamConnected))
            }
            Err(err) if is_transient(&err) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

//! Host-side collaborators for the paper display engine.
//!
//! The canvas stands in for the panel, TCP sockets and in-process queues stand
//! in for the board's network services.

pub mod network;
pub mod platform;
pub mod render;

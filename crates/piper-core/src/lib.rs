#![cfg_attr(not(test), no_std)]

//! Presentation and interaction engine for a battery-powered e-ink remote display.
//!
//! The engine is tick driven: the board calls [`app::PaperApp::tick`] with a
//! monotonic timestamp and the app polls its collaborators, updates state and
//! draws through the [`render::Surface`] it owns.

extern crate alloc;

pub mod app;
pub mod config;
pub mod content;
pub mod input;
pub mod layout;
pub mod mode;
pub mod pagination;
pub mod power;
pub mod render;

#[cfg(test)]
mod testing;

use std::{
    fs, io,
    net::{IpAddr, Ipv4Addr, UdpSocket},
};

use clap::Parser;
use embassy_time::{Duration, Instant, block_for};
use log::{debug, info, warn};
use piper_core::{
    app::{PaperApp, TickResult},
    config::PiperConfig,
    content::ImageTag,
    input::mock::{FixedTilt, NoTouch},
    render::{FontScale, Rotation},
};
use piper_hal_desktop::{
    network::{ContentHandle, HostContent, NetworkError, display_address, stream::LineStreamListener},
    platform::{display::PanelSurface, power::HostPower},
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use cli::Args;

#[path = "main/cli.rs"]
mod cli;
#[path = "main/export.rs"]
mod export;
#[path = "main/feed.rs"]
mod feed;

const TICK_MS: u64 = 10;
const STATUS_LOG_MS: u64 = 5_000;

#[derive(Debug, Error)]
enum BoardError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
    #[error("network: {0}")]
    Network(#[from] NetworkError),
    /// The canvas could not be exported.
    #[error("retained frame unavailable")]
    Frame,
}

fn main() -> Result<(), BoardError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let listener = LineStreamListener::bind((Ipv4Addr::UNSPECIFIED, args.stream_port))?;
    let (content, handle) = HostContent::channel();
    let content = content.with_stream(listener);

    let power = match &args.battery {
        Some(path) => HostPower::with_gauge(path),
        None => HostPower::mains(),
    };
    let config = PiperConfig {
        idle_timeout_ms: args.idle_secs.saturating_mul(1_000),
        initial_rotation: Rotation::from_index(args.rotation),
        ..PiperConfig::default()
    };

    let loop_start = Instant::now();
    let mut app = PaperApp::new(
        PanelSurface::new(),
        content,
        NoTouch::new(),
        FixedTilt::none(),
        power,
        config,
        0,
    );
    let address = display_address(local_ip());
    app.set_address(&address);
    info!(
        "board: up address={} stream_port={} idle_secs={}",
        address, args.stream_port, args.idle_secs
    );

    queue_startup_content(&args, &handle)?;
    if let Some((broker, topic)) = args.feed_subscription() {
        handle.connect_feed(broker, topic)?;
        feed::spawn_stdin_feed(handle.clone())?;
    }

    let mut next_status_ms = 0;
    let mut sleep_logged = false;
    loop {
        let now_ms = loop_start.elapsed().as_millis();
        match app.tick(now_ms) {
            TickResult::PoweredOff => break,
            TickResult::Sleeping if !sleep_logged => {
                info!("board: sleep screen shown");
                sleep_logged = true;
            }
            _ => {}
        }

        if now_ms >= next_status_ms {
            let status = app.status(now_ms);
            debug!(
                "status: mode={} screen={}x{} rotation={} page={}/{} scale={} stream_lines={} image_bytes={} idle_ms={}",
                status.mode.as_str(),
                status.screen_w,
                status.screen_h,
                status.rotation.index(),
                status.page_index.saturating_add(1),
                status.page_count,
                status.font_scale.get(),
                status.stream_lines,
                status.image_bytes,
                status.idle_ms
            );
            next_status_ms = now_ms + STATUS_LOG_MS;
        }

        block_for(Duration::from_millis(TICK_MS));
    }

    export::save_retained(app.surface(), &args.out)?;
    info!("board: retained frame written path={}", args.out.display());
    Ok(())
}

fn queue_startup_content(args: &Args, handle: &ContentHandle) -> Result<(), BoardError> {
    if let Some(path) = &args.text {
        let text = fs::read_to_string(path)?;
        handle.post_text(text, args.font_scale.map(FontScale::new))?;
    }

    if let Some(path) = &args.image {
        let bytes = fs::read(path)?;
        let tag = if args.map { ImageTag::Map } else { ImageTag::Photo };
        handle.upload_image(&bytes, tag)?;
    }

    Ok(())
}

/// Address of the interface that routes outward. No packet is sent.
fn local_ip() -> IpAddr {
    let routed = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .and_then(|socket| socket.connect((Ipv4Addr::new(192, 0, 2, 1), 9)).map(|()| socket))
        .and_then(|socket| socket.local_addr());

    match routed {
        Ok(addr) => addr.ip(),
        Err(err) => {
            warn!("board: no routable address err={}", err);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

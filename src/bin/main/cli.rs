use std::path::PathBuf;

use clap::Parser;
use piper_core::config::DEFAULT_STREAM_PORT;

/// Host build of the paper display: the panel is an in-memory frame that is
/// written out as a PNG when the device powers off.
#[derive(Debug, Parser)]
#[command(name = "paper-piper", version)]
pub(super) struct Args {
    /// Text file posted at startup.
    #[arg(long, value_name = "FILE", conflicts_with = "image")]
    pub text: Option<PathBuf>,

    /// Font scale for the posted text (1-6).
    #[arg(long, requires = "text", value_parser = clap::value_parser!(u8).range(1..=6))]
    pub font_scale: Option<u8>,

    /// JPEG or PNG uploaded at startup.
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Tag the uploaded image as a map.
    #[arg(long, requires = "image")]
    pub map: bool,

    /// Subscribe to a message feed; payloads are read line by line from stdin.
    #[arg(long, num_args = 2, value_names = ["BROKER", "TOPIC"])]
    pub feed: Option<Vec<String>>,

    /// TCP port of the line stream.
    #[arg(long, default_value_t = DEFAULT_STREAM_PORT)]
    pub stream_port: u16,

    /// Seconds without activity before the sleep screen.
    #[arg(long, default_value_t = 180)]
    pub idle_secs: u64,

    /// Initial rotation, 0-3.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub rotation: u8,

    /// sysfs capacity file used as the battery gauge.
    #[arg(long, value_name = "FILE")]
    pub battery: Option<PathBuf>,

    /// Where the retained frame is written at power-off.
    #[arg(long, default_value = "retained.png")]
    pub out: PathBuf,
}

impl Args {
    pub fn feed_subscription(&self) -> Option<(&str, &str)> {
        match self.feed.as_deref() {
            Some([broker, topic]) => Some((broker.as_str(), topic.as_str())),
            _ => None,
        }
    }
}

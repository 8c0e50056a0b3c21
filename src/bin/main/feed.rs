use std::{
    io::{self, BufRead},
    thread,
};

use log::{info, warn};
use piper_hal_desktop::network::ContentHandle;

/// Forwards stdin lines as feed payloads until stdin closes or the engine
/// side goes away.
pub(super) fn spawn_stdin_feed(handle: ContentHandle) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-feed".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("feed: stdin read failed err={}", err);
                        break;
                    }
                };
                if handle.publish(line).is_err() {
                    break;
                }
            }
            info!("feed: stdin closed");
        })
}

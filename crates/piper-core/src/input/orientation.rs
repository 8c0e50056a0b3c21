//! Debounced auto-rotation from accelerometer samples.

use log::debug;

use super::AccelSample;
use crate::render::Rotation;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pending {
    candidate: Rotation,
    confirm_at_ms: u64,
}

/// Two-sample confirmation filter over tilt readings.
///
/// A candidate that differs from the committed rotation is only committed if
/// a sample taken at least `settle_ms` later still points along the same axis
/// with the same sign. Each commit starts a cooldown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationFilter {
    threshold_g: f32,
    settle_ms: u64,
    cooldown_ms: u64,
    committed: Rotation,
    pending: Option<Pending>,
    cooldown_until_ms: u64,
}

impl OrientationFilter {
    pub const fn new(initial: Rotation, threshold_g: f32, settle_ms: u64, cooldown_ms: u64) -> Self {
        Self {
            threshold_g,
            settle_ms,
            cooldown_ms,
            committed: initial,
            pending: None,
            cooldown_until_ms: 0,
        }
    }

    pub fn committed(&self) -> Rotation {
        self.committed
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Rotation suggested by a single sample, Y axis first.
    pub fn candidate(&self, sample: &AccelSample) -> Option<Rotation> {
        let t = self.threshold_g;
        if sample.y > t {
            Some(Rotation::Deg90)
        } else if sample.y < -t {
            Some(Rotation::Deg270)
        } else if sample.x > t {
            Some(Rotation::Deg0)
        } else if sample.x < -t {
            Some(Rotation::Deg180)
        } else {
            None
        }
    }

    fn agrees(&self, candidate: Rotation, sample: &AccelSample) -> bool {
        let t = self.threshold_g;
        match candidate {
            Rotation::Deg90 => sample.y > t,
            Rotation::Deg270 => sample.y < -t,
            Rotation::Deg0 => sample.x > t,
            Rotation::Deg180 => sample.x < -t,
        }
    }

    /// Feeds one sample. Returns the new rotation when a candidate is confirmed.
    pub fn update(&mut self, sample: &AccelSample, now_ms: u64) -> Option<Rotation> {
        if now_ms < self.cooldown_until_ms {
            return None;
        }

        if let Some(pending) = self.pending {
            if now_ms < pending.confirm_at_ms {
                return None;
            }
            self.pending = None;

            if !self.agrees(pending.candidate, sample) {
                debug!(
                    "orientation: candidate={} discarded x={} y={}",
                    pending.candidate.index(),
                    sample.x,
                    sample.y
                );
                return None;
            }

            self.committed = pending.candidate;
            self.cooldown_until_ms = now_ms.saturating_add(self.cooldown_ms);
            debug!("orientation: committed rotation={}", self.committed.index());
            return Some(self.committed);
        }

        if let Some(candidate) = self.candidate(sample)
            && candidate != self.committed
        {
            self.pending = Some(Pending {
                candidate,
                confirm_at_ms: now_ms.saturating_add(self.settle_ms),
            });
        }
        None
    }
}

//! Host clock — a monotonic millisecond counter anchored at a wall-clock epoch.
//!
//! The event loop is the only writer. Generators and the camera read
//! wall-clock time through `wall_clock()`, so a fixed epoch makes an
//! entire session reproducible.

use crate::types::Millis;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostClock {
    pub epoch: DateTime<Utc>,
    now_ms:    Millis,
}

impl HostClock {
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self { epoch, now_ms: 0 }
    }

    /// Anchor at the current system time. Only the runner uses this.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    pub fn now_ms(&self) -> Millis {
        self.now_ms
    }

    /// Move time forward. Monotonic: an earlier target is ignored.
    pub fn advance_to(&mut self, target: Millis) -> Millis {
        if target > self.now_ms {
            self.now_ms = target;
        }
        self.now_ms
    }

    pub fn wall_clock(&self) -> DateTime<Utc> {
        self.epoch + Duration::milliseconds(self.now_ms as i64)
    }

    /// Wall-clock milliseconds since the Unix epoch, as the camera orbit wants it.
    pub fn wall_clock_ms(&self) -> f64 {
        self.wall_clock().timestamp_millis() as f64
    }
}

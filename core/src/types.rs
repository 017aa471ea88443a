//! Shared primitive types used across the dashboard core.

/// Monotonic host time in milliseconds since the event loop started.
pub type Millis = u64;

/// One execution of the update scheduler's periodic callback.
pub type Tick = u64;

/// Handle for an armed interval timer or frame callback.
pub type TimerId = u64;

/// Packed 0xRRGGBB colour, the form every scene material and palette uses.
pub type Rgb = u32;

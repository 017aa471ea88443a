//! Deterministic random number generation.
//!
//! RULE: Nothing in the dashboard core may call any platform RNG.
//! All randomness flows through FeedRng streams derived from the
//! single master seed held by the dashboard config.
//!
//! Each stream is seeded from (master_seed XOR slot_index * golden ratio).
//! This means:
//!   - Adding a new stream never changes existing streams.
//!   - Each generator's output is reproducible in isolation.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single telemetry or layout stream.
pub struct FeedRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl FeedRng {
    /// Create a stream from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll an integer in [lo, hi). Mirrors `floor(random * span) + lo`.
    pub fn int_in(&mut self, lo: u32, hi: u32) -> u32 {
        assert!(hi > lo, "empty range {lo}..{hi}");
        lo + self.next_u64_below(u64::from(hi - lo)) as u32
    }

    /// Pick one element uniformly. Panics on an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}

/// Hands out every stream for a single dashboard session.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, slot: StreamSlot) -> FeedRng {
        FeedRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Ships = 0,
    Kpi = 1,
    Throughput = 2,
    Carbon = 3,
    Alerts = 4,
    Scene = 5,
    History = 6,
    // Add new streams here — append only.
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ships => "ships",
            Self::Kpi => "kpi",
            Self::Throughput => "throughput",
            Self::Carbon => "carbon",
            Self::Alerts => "alerts",
            Self::Scene => "scene",
            Self::History => "history",
        }
    }
}

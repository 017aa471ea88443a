//! Telemetry feed trait and the synthetic implementation.
//!
//! RULE: The scheduler only ever talks to a `TelemetryFeed`. A real sensor
//! feed can replace `SyntheticFeed` without touching the scheduler or any
//! view adapter.

use crate::{
    history::TrendSeries,
    rng::{FeedRng, RngBank, StreamSlot},
    snapshot::{AlertRecord, CarbonSnapshot, KpiSnapshot, ShipRecord},
    telemetry,
};
use chrono::{DateTime, Utc};

/// The contract every telemetry source must fulfill.
/// Each call returns a fresh snapshot; nothing is cached between calls.
pub trait TelemetryFeed {
    /// Stable name used in log lines.
    fn name(&self) -> &'static str;

    fn kpis(&mut self, now: DateTime<Utc>) -> KpiSnapshot;
    fn ships(&mut self, now: DateTime<Utc>) -> Vec<ShipRecord>;
    fn throughput_sample(&mut self, now: DateTime<Utc>) -> f64;
    fn carbon(&mut self, now: DateTime<Utc>) -> CarbonSnapshot;
    fn alerts(&mut self, now: DateTime<Utc>) -> Vec<AlertRecord>;

    /// Past-year emissions for the carbon trend, requested once at init.
    fn carbon_history(&mut self, now: DateTime<Utc>) -> TrendSeries;
}

/// Locally generated telemetry, one RNG stream per generator.
pub struct SyntheticFeed {
    carbon_target: f64,
    ships:         FeedRng,
    kpi:           FeedRng,
    throughput:    FeedRng,
    carbon:        FeedRng,
    alerts:        FeedRng,
    history:       FeedRng,
}

impl SyntheticFeed {
    pub fn new(bank: &RngBank, carbon_target: f64) -> Self {
        Self {
            carbon_target,
            ships:      bank.for_stream(StreamSlot::Ships),
            kpi:        bank.for_stream(StreamSlot::Kpi),
            throughput: bank.for_stream(StreamSlot::Throughput),
            carbon:     bank.for_stream(StreamSlot::Carbon),
            alerts:     bank.for_stream(StreamSlot::Alerts),
            history:    bank.for_stream(StreamSlot::History),
        }
    }
}

impl TelemetryFeed for SyntheticFeed {
    fn name(&self) -> &'static str { "synthetic" }

    fn kpis(&mut self, _now: DateTime<Utc>) -> KpiSnapshot {
        telemetry::generate_kpis(&mut self.kpi)
    }

    fn ships(&mut self, now: DateTime<Utc>) -> Vec<ShipRecord> {
        telemetry::generate_ships(now, &mut self.ships)
    }

    fn throughput_sample(&mut self, _now: DateTime<Utc>) -> f64 {
        telemetry::generate_throughput_sample(&mut self.throughput)
    }

    fn carbon(&mut self, _now: DateTime<Utc>) -> CarbonSnapshot {
        telemetry::generate_carbon(self.carbon_target, &mut self.carbon)
    }

    fn alerts(&mut self, _now: DateTime<Utc>) -> Vec<AlertRecord> {
        telemetry::generate_alerts(&mut self.alerts)
    }

    fn carbon_history(&mut self, now: DateTime<Utc>) -> TrendSeries {
        telemetry::generate_carbon_history(now, &mut self.history)
    }
}

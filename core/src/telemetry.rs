//! Telemetry generators.
//!
//! RULE: Every generator is a pure function of (wall-clock time, its own
//! FeedRng). No generator reads or writes anything else, so a seeded
//! stream reproduces the same snapshots.
//!
//! Bounds (integers, half-open unless noted):
//!   ships per tick        6..=8
//!   arrival offset        0..48 hours in the past
//!   departure offset      2..26 hours ahead
//!   active ships (KPI)    6..=8
//!   throughput TEU        18000..20000
//!   equipment online %    93..98
//!   efficiency %          28..38
//!   trend sample TEU      700..1200
//!   emissions total       7500..8000
//!   reduction             1200..1300
//!   neutralized           42..47
//!   alerts                prefix of length 2..=3

use crate::{
    catalog::ALERT_CATALOG,
    history::TrendSeries,
    rng::FeedRng,
    snapshot::{
        AlertRecord, CarbonSnapshot, KpiSnapshot, ShipRecord, ShipStatus, ShipType, BERTHS,
    },
};
use chrono::{DateTime, Duration, Months, Utc};

pub const CARBON_HISTORY_MONTHS: u32 = 12;

pub fn generate_ships(now: DateTime<Utc>, rng: &mut FeedRng) -> Vec<ShipRecord> {
    let count = rng.int_in(6, 9) as usize;

    (0..count)
        .map(|i| {
            let arrival_hours = rng.int_in(0, 48);
            let departure_hours = rng.int_in(2, 26);
            ShipRecord {
                name:      format!("Vessel {}", (b'A' + i as u8) as char),
                ship_type: *rng.pick(&ShipType::ALL),
                berth:     BERTHS[i % BERTHS.len()].to_string(),
                status:    *rng.pick(&ShipStatus::ALL),
                arrival:   now - Duration::hours(i64::from(arrival_hours)),
                departure: now + Duration::hours(i64::from(departure_hours)),
            }
        })
        .collect()
}

pub fn generate_kpis(rng: &mut FeedRng) -> KpiSnapshot {
    KpiSnapshot {
        active_ship_count:    rng.int_in(6, 9),
        throughput_teu:       rng.int_in(18_000, 20_000),
        equipment_online_pct: rng.int_in(93, 98),
        efficiency_pct:       rng.int_in(28, 38),
    }
}

/// One hourly TEU reading for the throughput trend.
pub fn generate_throughput_sample(rng: &mut FeedRng) -> f64 {
    f64::from(rng.int_in(700, 1_200))
}

/// Only `total`, `reduction` and `neutralized` are drawn; the rest is derived.
pub fn generate_carbon(target: f64, rng: &mut FeedRng) -> CarbonSnapshot {
    let total = f64::from(rng.int_in(7_500, 8_000));
    let reduction = f64::from(rng.int_in(1_200, 1_300));
    let neutralized = f64::from(rng.int_in(42, 47));
    CarbonSnapshot::derive(total, target, reduction, neutralized)
}

pub fn generate_alerts(rng: &mut FeedRng) -> Vec<AlertRecord> {
    let count = rng.int_in(2, ALERT_CATALOG.len() as u32 + 1) as usize;
    ALERT_CATALOG[..count]
        .iter()
        .map(|t| AlertRecord {
            severity:           t.severity,
            icon:               t.icon.into(),
            title:              t.title.into(),
            description:        t.description.into(),
            relative_timestamp: t.age.into(),
        })
        .collect()
}

/// Monthly emissions for the past year, oldest first, labelled "MM-DD".
pub fn generate_carbon_history(now: DateTime<Utc>, rng: &mut FeedRng) -> TrendSeries {
    let mut series = TrendSeries::default();
    for back in (0..CARBON_HISTORY_MONTHS).rev() {
        let month = now.checked_sub_months(Months::new(back)).unwrap_or(now);
        series.labels.push(month.format("%m-%d").to_string());
        series.values.push(f64::from(rng.int_in(7_000, 8_000)));
    }
    series
}

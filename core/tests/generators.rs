//! Telemetry generator tests — bounds over many seeded trials.

mod common;

use chrono::Duration;
use portwatch_core::{
    rng::{RngBank, StreamSlot},
    snapshot::BERTHS,
    telemetry::{
        generate_alerts, generate_carbon, generate_kpis, generate_ships,
        generate_throughput_sample,
    },
};

const TRIALS: u64 = 10_000;

/// Every KPI field stays inside its documented range on every draw.
#[test]
fn kpis_within_bounds() {
    let mut rng = RngBank::new(0xA11CE).for_stream(StreamSlot::Kpi);
    for _ in 0..TRIALS {
        let k = generate_kpis(&mut rng);
        assert!((6..=8).contains(&k.active_ship_count), "ships {}", k.active_ship_count);
        assert!((18_000..20_000).contains(&k.throughput_teu), "teu {}", k.throughput_teu);
        assert!((93..98).contains(&k.equipment_online_pct), "online {}", k.equipment_online_pct);
        assert!((28..38).contains(&k.efficiency_pct), "eff {}", k.efficiency_pct);
    }
}

/// Ship count, berth set and arrival/departure windows.
#[test]
fn ships_within_bounds() {
    let now = common::epoch();
    let mut rng = RngBank::new(0xB0A7).for_stream(StreamSlot::Ships);
    for _ in 0..TRIALS {
        let ships = generate_ships(now, &mut rng);
        assert!((6..=8).contains(&ships.len()), "ship count {}", ships.len());
        for ship in &ships {
            assert!(BERTHS.contains(&ship.berth.as_str()), "unknown berth {}", ship.berth);

            let ago = now - ship.arrival;
            assert!(ago >= Duration::zero() && ago < Duration::hours(48), "arrival {ago}");

            let ahead = ship.departure - now;
            assert!(ahead >= Duration::hours(2) && ahead < Duration::hours(26), "departure {ahead}");
        }
    }
}

/// remaining and progress are derived exactly from total and the 8500 target.
#[test]
fn carbon_within_bounds_and_consistent() {
    const TARGET: f64 = 8_500.0;
    let mut rng = RngBank::new(0xC0_2).for_stream(StreamSlot::Carbon);
    for _ in 0..TRIALS {
        let c = generate_carbon(TARGET, &mut rng);
        assert!((7_500.0..8_000.0).contains(&c.total_emissions), "total {}", c.total_emissions);
        assert!((1_200.0..1_300.0).contains(&c.cumulative_reduction));
        assert!((42.0..47.0).contains(&c.neutralized_units));

        assert_eq!(c.remaining_budget, (TARGET - c.total_emissions).max(0.0));
        assert_eq!(c.progress_pct, (c.total_emissions / TARGET * 100.0).min(100.0));
        assert!(c.remaining_budget >= 0.0);
        assert!(c.progress_pct <= 100.0);
    }
}

/// A target below every possible total still yields a floored budget.
#[test]
fn carbon_clamps_when_target_is_exceeded() {
    let mut rng = RngBank::new(5).for_stream(StreamSlot::Carbon);
    for _ in 0..1_000 {
        let c = generate_carbon(5_000.0, &mut rng);
        assert_eq!(c.remaining_budget, 0.0);
        assert_eq!(c.progress_pct, 100.0);
    }
}

/// Alerts are always a 2- or 3-long prefix of the catalog.
#[test]
fn alerts_are_catalog_prefixes() {
    let mut rng = RngBank::new(0xA1E7).for_stream(StreamSlot::Alerts);
    let full = {
        let mut r = RngBank::new(0xA1E7).for_stream(StreamSlot::Alerts);
        loop {
            let a = generate_alerts(&mut r);
            if a.len() == 3 {
                break a;
            }
        }
    };

    let mut seen = [false; 2];
    for _ in 0..TRIALS {
        let alerts = generate_alerts(&mut rng);
        assert!((2..=3).contains(&alerts.len()), "alert count {}", alerts.len());
        assert_eq!(alerts[..], full[..alerts.len()]);
        seen[alerts.len() - 2] = true;
    }
    assert_eq!(seen, [true, true], "both prefix lengths should occur");
}

#[test]
fn throughput_samples_within_bounds() {
    let mut rng = RngBank::new(0x7E0).for_stream(StreamSlot::Throughput);
    for _ in 0..TRIALS {
        let s = generate_throughput_sample(&mut rng);
        assert!((700.0..1_200.0).contains(&s), "sample {s}");
        assert_eq!(s.fract(), 0.0);
    }
}

/// Same seed, same stream: identical snapshots.
#[test]
fn generators_are_reproducible() {
    let now = common::epoch();
    let bank = RngBank::new(99);
    let mut a = bank.for_stream(StreamSlot::Ships);
    let mut b = bank.for_stream(StreamSlot::Ships);
    for _ in 0..100 {
        assert_eq!(generate_ships(now, &mut a), generate_ships(now, &mut b));
    }
}

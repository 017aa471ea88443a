//! Snapshot types — one tick's worth of each dashboard domain.
//!
//! Snapshots are created fresh every tick and handed to view adapters
//! by shared reference. Nothing retains them past the render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ShipType {
    Container,
    Bulk,
    Tanker,
    GeneralCargo,
}

impl ShipType {
    pub const ALL: [ShipType; 4] = [Self::Container, Self::Bulk, Self::Tanker, Self::GeneralCargo];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Container    => "Container",
            Self::Bulk         => "Bulk Carrier",
            Self::Tanker       => "Tanker",
            Self::GeneralCargo => "General Cargo",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShipStatus {
    Loading,
    Unloading,
    Waiting,
}

impl ShipStatus {
    pub const ALL: [ShipStatus; 3] = [Self::Loading, Self::Unloading, Self::Waiting];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading   => "Loading",
            Self::Unloading => "Unloading",
            Self::Waiting   => "Awaiting berth",
        }
    }

    /// Badge class the ship table applies to the status cell.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Loading   => "loading",
            Self::Unloading => "unloading",
            Self::Waiting   => "waiting",
        }
    }
}

/// The fixed berth set, in assignment order.
pub const BERTHS: [&str; 8] = ["A1", "A2", "B1", "B2", "C1", "C2", "D1", "D2"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShipRecord {
    pub name:      String,
    pub ship_type: ShipType,
    pub berth:     String,
    pub status:    ShipStatus,
    pub arrival:   DateTime<Utc>,
    pub departure: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct KpiSnapshot {
    pub active_ship_count:    u32,
    pub throughput_teu:       u32,
    pub equipment_online_pct: u32,
    pub efficiency_pct:       u32,
}

/// Carbon budget state. `remaining_budget` and `progress_pct` are derived
/// from `total_emissions` and `target`; use `CarbonSnapshot::derive`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CarbonSnapshot {
    pub total_emissions:      f64,
    pub target:               f64,
    pub remaining_budget:     f64,
    pub progress_pct:         f64,
    pub cumulative_reduction: f64,
    pub neutralized_units:    f64,
}

impl CarbonSnapshot {
    pub fn derive(total_emissions: f64, target: f64, reduction: f64, neutralized: f64) -> Self {
        Self {
            total_emissions,
            target,
            remaining_budget: (target - total_emissions).max(0.0),
            progress_pct: (total_emissions / target * 100.0).clamp(0.0, 100.0),
            cumulative_reduction: reduction,
            neutralized_units: neutralized,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertRecord {
    pub severity:    Severity,
    pub icon:        String,
    pub title:       String,
    pub description: String,
    /// Human-readable age, e.g. "5 min ago". Canned, not computed.
    pub relative_timestamp: String,
}

//! Canned reference data: the alert catalog and the static panels
//! that are rendered once at init and never refreshed by a tick.

use crate::snapshot::Severity;
use serde::{Deserialize, Serialize};

/// One canned alert. Materialised into an `AlertRecord` each tick.
pub struct AlertTemplate {
    pub severity:    Severity,
    pub icon:        &'static str,
    pub title:       &'static str,
    pub description: &'static str,
    pub age:         &'static str,
}

pub const ALERT_CATALOG: [AlertTemplate; 3] = [
    AlertTemplate {
        severity:    Severity::Low,
        icon:        "ℹ️",
        title:       "Maintenance reminder",
        description: "Crane 3 in zone A is due for scheduled inspection",
        age:         "5 min ago",
    },
    AlertTemplate {
        severity:    Severity::Medium,
        icon:        "⚠️",
        title:       "Weather warning",
        description: "Strong winds possible within 6 hours, secure loose gear",
        age:         "15 min ago",
    },
    AlertTemplate {
        severity:    Severity::Low,
        icon:        "ℹ️",
        title:       "Crew dispatch",
        description: "Zone B stevedore team requests reinforcement",
        age:         "32 min ago",
    },
];

/// Running / idle / under-maintenance counts for one equipment class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentClassStatus {
    pub class:       String,
    pub running:     u32,
    pub idle:        u32,
    pub maintenance: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentUnit {
    pub name:   String,
    pub online: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmissionShare {
    pub source: String,
    pub pct:    f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadinessAxis {
    pub capability: String,
    pub current:    f64,
    pub target:     f64,
}

pub fn equipment_classes() -> Vec<EquipmentClassStatus> {
    const ROWS: [(&str, u32, u32, u32); 6] = [
        ("Mobile cranes",  18, 4, 2),
        ("Tractors",       25, 8, 2),
        ("Stackers",       12, 3, 1),
        ("Gantry cranes",   8, 2, 0),
        ("Quay cranes",     6, 2, 0),
        ("Yard cranes",    10, 4, 1),
    ];
    ROWS.iter()
        .map(|&(class, running, idle, maintenance)| EquipmentClassStatus {
            class: class.into(),
            running,
            idle,
            maintenance,
        })
        .collect()
}

pub fn equipment_units() -> Vec<EquipmentUnit> {
    const UNITS: [(&str, bool); 8] = [
        ("Gantry crane 1", true),
        ("Gantry crane 2", true),
        ("Gantry crane 3", true),
        ("Quay crane 1",   true),
        ("Quay crane 2",   true),
        ("Quay crane 3",   false),
        ("Yard crane 1",   true),
        ("Yard crane 2",   true),
    ];
    UNITS.iter()
        .map(|&(name, online)| EquipmentUnit { name: name.into(), online })
        .collect()
}

pub fn emission_sources() -> Vec<EmissionShare> {
    const SHARES: [(&str, f64); 5] = [
        ("Handling equipment", 35.0),
        ("Haulage vehicles",   28.0),
        ("Lighting",           18.0),
        ("Office facilities",  12.0),
        ("Other",               7.0),
    ];
    SHARES.iter()
        .map(|&(source, pct)| EmissionShare { source: source.into(), pct })
        .collect()
}

pub fn readiness_profile() -> Vec<ReadinessAxis> {
    const AXES: [(&str, f64, f64); 6] = [
        ("Personnel response",  92.0, 95.0),
        ("Equipment readiness", 88.0, 95.0),
        ("Material reserves",   85.0, 90.0),
        ("Communications",      95.0, 98.0),
        ("Coordination",        90.0, 95.0),
        ("Recovery",            87.0, 90.0),
    ];
    AXES.iter()
        .map(|&(capability, current, target)| ReadinessAxis {
            capability: capability.into(),
            current,
            target,
        })
        .collect()
}

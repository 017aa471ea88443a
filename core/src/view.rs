//! View adapter registry.
//!
//! RULE: Adapters are the only code that touches a presentation surface.
//! They receive borrowed, immutable snapshots through `PanelUpdate` and
//! must not hold on to them.
//!
//! FAULT ISOLATION: `ViewRegistry::push` never returns an error. A panel
//! with no adapter, or whose adapter reports `MissingTarget`, is a silent
//! no-op; any other adapter error is logged and counted, and the caller
//! carries on with its next step.

use crate::{
    catalog::{EmissionShare, EquipmentClassStatus, EquipmentUnit, ReadinessAxis},
    error::{ViewError, ViewResult},
    history::{TimeSeriesBuffer, TrendSeries},
    snapshot::{AlertRecord, CarbonSnapshot, KpiSnapshot, ShipRecord},
    types::Millis,
};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    // ── Refreshed every tick ───────────────────────
    Kpis,
    Ships,
    ThroughputTrend,
    Carbon,
    Alerts,

    // ── Rendered once at init ──────────────────────
    EquipmentStatus,
    EquipmentList,
    EmissionSources,
    CarbonTrend,
    Readiness,
}

impl Panel {
    pub const ALL: [Panel; 10] = [
        Self::Kpis,
        Self::Ships,
        Self::ThroughputTrend,
        Self::Carbon,
        Self::Alerts,
        Self::EquipmentStatus,
        Self::EquipmentList,
        Self::EmissionSources,
        Self::CarbonTrend,
        Self::Readiness,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Kpis            => "kpis",
            Self::Ships           => "ships",
            Self::ThroughputTrend => "throughput_trend",
            Self::Carbon          => "carbon",
            Self::Alerts          => "alerts",
            Self::EquipmentStatus => "equipment_status",
            Self::EquipmentList   => "equipment_list",
            Self::EmissionSources => "emission_sources",
            Self::CarbonTrend     => "carbon_trend",
            Self::Readiness       => "readiness",
        }
    }
}

/// One push to one panel.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "panel", content = "data", rename_all = "snake_case")]
pub enum PanelUpdate<'a> {
    Kpis(&'a KpiSnapshot),
    Ships(&'a [ShipRecord]),
    ThroughputTrend(&'a TimeSeriesBuffer),
    Carbon(&'a CarbonSnapshot),
    Alerts(&'a [AlertRecord]),
    EquipmentStatus(&'a [EquipmentClassStatus]),
    EquipmentList(&'a [EquipmentUnit]),
    EmissionSources(&'a [EmissionShare]),
    CarbonTrend(&'a TrendSeries),
    Readiness(&'a [ReadinessAxis]),
}

impl PanelUpdate<'_> {
    pub fn panel(&self) -> Panel {
        match self {
            Self::Kpis(_)            => Panel::Kpis,
            Self::Ships(_)           => Panel::Ships,
            Self::ThroughputTrend(_) => Panel::ThroughputTrend,
            Self::Carbon(_)          => Panel::Carbon,
            Self::Alerts(_)          => Panel::Alerts,
            Self::EquipmentStatus(_) => Panel::EquipmentStatus,
            Self::EquipmentList(_)   => Panel::EquipmentList,
            Self::EmissionSources(_) => Panel::EmissionSources,
            Self::CarbonTrend(_)     => Panel::CarbonTrend,
            Self::Readiness(_)       => Panel::Readiness,
        }
    }
}

/// The capability every panel adapter provides.
pub trait PanelAdapter {
    /// Translate one update into a surface mutation.
    /// Return `ViewError::MissingTarget` when the surface is not mounted.
    fn render(&mut self, update: &PanelUpdate<'_>) -> ViewResult<()>;

    /// Called once per display frame for adapters that animate between
    /// values. `now` is host time in ms.
    fn on_frame(&mut self, _now: Millis) -> ViewResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Rendered,
    /// No adapter mounted, or its target surface is absent.
    Skipped,
    Failed,
}

#[derive(Default)]
pub struct ViewRegistry {
    adapters: HashMap<Panel, Box<dyn PanelAdapter>>,
    failures: u64,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount an adapter, replacing any previous one for the panel.
    pub fn mount(&mut self, panel: Panel, adapter: Box<dyn PanelAdapter>) {
        self.adapters.insert(panel, adapter);
    }

    pub fn with(mut self, panel: Panel, adapter: Box<dyn PanelAdapter>) -> Self {
        self.mount(panel, adapter);
        self
    }

    pub fn unmount(&mut self, panel: Panel) -> Option<Box<dyn PanelAdapter>> {
        self.adapters.remove(&panel)
    }

    pub fn is_mounted(&self, panel: Panel) -> bool {
        self.adapters.contains_key(&panel)
    }

    /// Total adapter failures since construction.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn push(&mut self, update: PanelUpdate<'_>) -> Delivery {
        let panel = update.panel();
        let Some(adapter) = self.adapters.get_mut(&panel) else {
            log::trace!("panel {} not mounted, skipping", panel.name());
            return Delivery::Skipped;
        };

        match adapter.render(&update) {
            Ok(()) => Delivery::Rendered,
            Err(ViewError::MissingTarget { target }) => {
                log::trace!("panel {}: target '{target}' absent, skipping", panel.name());
                Delivery::Skipped
            }
            Err(e) => {
                self.failures += 1;
                log::warn!("panel {}: adapter failed: {e}", panel.name());
                Delivery::Failed
            }
        }
    }

    /// Drive per-frame animation on every mounted adapter.
    pub fn frame(&mut self, now: Millis) {
        for (panel, adapter) in &mut self.adapters {
            match adapter.on_frame(now) {
                Ok(()) | Err(ViewError::MissingTarget { .. }) => {}
                Err(e) => {
                    self.failures += 1;
                    log::warn!("panel {}: frame failed: {e}", panel.name());
                }
            }
        }
    }
}

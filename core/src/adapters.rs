//! Stock panel adapters over three abstract surfaces.
//!
//! The host supplies a `TextSurface`, `TableSurface` or `ChartSurface`
//! (or nothing, when the panel is not mounted). Each adapter maps
//! `PanelUpdate`s onto its surface; none of them touch a chart library
//! or a DOM directly.

use crate::{
    error::{ViewError, ViewResult},
    history::TrendSeries,
    snapshot::{AlertRecord, CarbonSnapshot, KpiSnapshot, Severity, ShipRecord},
    types::Millis,
    view::{PanelAdapter, PanelUpdate},
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

pub const TWEEN_DURATION_MS: Millis = 500;
pub const TWEEN_STEP_MS: Millis = 16;

// ── Surfaces ─────────────────────────────────────────

/// Named text slots, e.g. KPI cards and the carbon progress bar.
pub trait TextSurface {
    fn set_text(&mut self, slot: &str, text: &str) -> ViewResult<()>;
    fn set_progress(&mut self, slot: &str, pct: f64) -> ViewResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// Styling class for the row's badge, e.g. "loading" or "medium".
    pub class: Option<String>,
}

pub trait TableSurface {
    /// Replace every row. Lists have no identity across ticks.
    fn replace_rows(&mut self, rows: Vec<TableRow>) -> ViewResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label:  String,
    pub values: Vec<f64>,
}

pub trait ChartSurface {
    /// Swap labels and data in place; the chart keeps its configuration.
    fn replace_data(&mut self, labels: &[String], datasets: &[Dataset]) -> ViewResult<()>;
}

fn unsupported(adapter: &str, update: &PanelUpdate<'_>) -> ViewError {
    ViewError::Surface(format!("{adapter} cannot render panel {}", update.panel().name()))
}

// ── Formatting ───────────────────────────────────────

/// 18500 -> "18,500".
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Table timestamp, "MM-DD HH:MM".
pub fn format_stamp(at: DateTime<Utc>) -> String {
    at.format("%m-%d %H:%M").to_string()
}

// ── Counter tween ────────────────────────────────────

/// Steps a displayed integer from `from` to `to` in 16 ms increments.
/// The clock starts on the first `value_at` call.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterTween {
    from:       i64,
    to:         i64,
    duration:   Millis,
    started_at: Option<Millis>,
}

impl CounterTween {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to, duration: TWEEN_DURATION_MS, started_at: None }
    }

    pub fn value_at(&mut self, now: Millis) -> i64 {
        let start = *self.started_at.get_or_insert(now);
        let total_steps = (self.duration / TWEEN_STEP_MS).max(1);
        let steps = now.saturating_sub(start) / TWEEN_STEP_MS;
        if steps >= total_steps {
            return self.to;
        }
        let range = (self.to - self.from) as f64;
        (self.from as f64 + range * steps as f64 / total_steps as f64).floor() as i64
    }

    pub fn is_done(&self, now: Millis) -> bool {
        match self.started_at {
            Some(start) => now.saturating_sub(start) >= self.duration,
            None => false,
        }
    }
}

// ── Cards ────────────────────────────────────────────

/// KPI and carbon cards. Values animate via `on_frame` and display with
/// thousands separators; the carbon progress bar jumps straight to its
/// new width.
pub struct CardPanel<S: TextSurface> {
    surface: Option<S>,
    shown:   HashMap<&'static str, i64>,
    tweens:  Vec<(&'static str, CounterTween)>,
}

impl<S: TextSurface> CardPanel<S> {
    pub fn new(surface: Option<S>) -> Self {
        Self { surface, shown: HashMap::new(), tweens: Vec::new() }
    }

    pub fn surface(&self) -> Option<&S> { self.surface.as_ref() }

    /// Value currently on screen for a slot.
    pub fn shown(&self, slot: &str) -> Option<i64> {
        self.shown.get(slot).copied()
    }

    fn retarget(&mut self, slot: &'static str, to: i64) {
        let from = self.shown.get(slot).copied().unwrap_or(0);
        self.tweens.retain(|(s, _)| *s != slot);
        self.tweens.push((slot, CounterTween::new(from, to)));
    }

    fn kpis(&mut self, k: &KpiSnapshot) {
        self.retarget("ships-count", i64::from(k.active_ship_count));
        self.retarget("throughput-value", i64::from(k.throughput_teu));
        self.retarget("equipment-online", i64::from(k.equipment_online_pct));
        self.retarget("efficiency-value", i64::from(k.efficiency_pct));
    }

    fn carbon(&mut self, c: &CarbonSnapshot) -> ViewResult<()> {
        self.retarget("total-carbon", c.total_emissions as i64);
        self.retarget("carbon-remaining", c.remaining_budget as i64);
        self.retarget("carbon-reduction", c.cumulative_reduction as i64);
        self.retarget("carbon-neutral", c.neutralized_units as i64);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_progress("carbon-progress", c.progress_pct)?;
        }
        Ok(())
    }
}

impl<S: TextSurface> PanelAdapter for CardPanel<S> {
    fn render(&mut self, update: &PanelUpdate<'_>) -> ViewResult<()> {
        if self.surface.is_none() {
            return Err(ViewError::MissingTarget { target: "cards" });
        }
        match update {
            PanelUpdate::Kpis(k) => {
                self.kpis(k);
                Ok(())
            }
            PanelUpdate::Carbon(c) => self.carbon(c),
            other => Err(unsupported("card panel", other)),
        }
    }

    fn on_frame(&mut self, now: Millis) -> ViewResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Err(ViewError::MissingTarget { target: "cards" });
        };
        for (slot, tween) in &mut self.tweens {
            let value = tween.value_at(now);
            surface.set_text(*slot, &format_thousands(value))?;
            self.shown.insert(*slot, value);
        }
        self.tweens.retain(|(_, t)| !t.is_done(now));
        Ok(())
    }
}

// ── Tables ───────────────────────────────────────────

/// Ship table, alert list and equipment list.
pub struct ListPanel<S: TableSurface> {
    surface: Option<S>,
}

impl<S: TableSurface> ListPanel<S> {
    pub fn new(surface: Option<S>) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> Option<&S> { self.surface.as_ref() }
}

fn ship_row(ship: &ShipRecord) -> TableRow {
    TableRow {
        cells: vec![
            ship.name.clone(),
            ship.ship_type.label().to_string(),
            ship.berth.clone(),
            ship.status.label().to_string(),
            format_stamp(ship.arrival),
            format_stamp(ship.departure),
        ],
        class: Some(ship.status.badge_class().to_string()),
    }
}

fn alert_row(alert: &AlertRecord) -> TableRow {
    let class = match alert.severity {
        Severity::Low    => "low",
        Severity::Medium => "medium",
        Severity::High   => "high",
    };
    TableRow {
        cells: vec![
            alert.icon.clone(),
            alert.title.clone(),
            alert.description.clone(),
            alert.relative_timestamp.clone(),
        ],
        class: Some(class.to_string()),
    }
}

impl<S: TableSurface> PanelAdapter for ListPanel<S> {
    fn render(&mut self, update: &PanelUpdate<'_>) -> ViewResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Err(ViewError::MissingTarget { target: "table" });
        };
        let rows: Vec<TableRow> = match update {
            PanelUpdate::Ships(ships) => ships.iter().map(ship_row).collect(),
            PanelUpdate::Alerts(alerts) => alerts.iter().map(alert_row).collect(),
            PanelUpdate::EquipmentList(units) => units
                .iter()
                .map(|u| TableRow {
                    cells: vec![u.name.clone()],
                    class: Some(if u.online { "online" } else { "offline" }.to_string()),
                })
                .collect(),
            other => return Err(unsupported("list panel", other)),
        };
        surface.replace_rows(rows)
    }
}

// ── Charts ───────────────────────────────────────────

/// Every chart-shaped panel: trends, equipment bars, emission doughnut,
/// readiness radar.
pub struct ChartPanel<S: ChartSurface> {
    surface: Option<S>,
}

impl<S: ChartSurface> ChartPanel<S> {
    pub fn new(surface: Option<S>) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> Option<&S> { self.surface.as_ref() }
}

fn dataset(label: &str, values: Vec<f64>) -> Dataset {
    Dataset { label: label.to_string(), values }
}

fn single(series: TrendSeries, label: &str) -> (Vec<String>, Vec<Dataset>) {
    (series.labels, vec![dataset(label, series.values)])
}

impl<S: ChartSurface> PanelAdapter for ChartPanel<S> {
    fn render(&mut self, update: &PanelUpdate<'_>) -> ViewResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Err(ViewError::MissingTarget { target: "chart" });
        };
        let (labels, datasets) = match update {
            PanelUpdate::ThroughputTrend(buffer) => {
                single(buffer.hourly_trend(), "Throughput (TEU)")
            }
            PanelUpdate::CarbonTrend(series) => {
                single((*series).clone(), "Emissions (t CO2)")
            }
            PanelUpdate::EquipmentStatus(classes) => (
                classes.iter().map(|c| c.class.clone()).collect(),
                vec![
                    dataset("Running", classes.iter().map(|c| f64::from(c.running)).collect()),
                    dataset("Idle", classes.iter().map(|c| f64::from(c.idle)).collect()),
                    dataset("Maintenance", classes.iter().map(|c| f64::from(c.maintenance)).collect()),
                ],
            ),
            PanelUpdate::EmissionSources(shares) => (
                shares.iter().map(|s| s.source.clone()).collect(),
                vec![dataset("Share (%)", shares.iter().map(|s| s.pct).collect())],
            ),
            PanelUpdate::Readiness(axes) => (
                axes.iter().map(|a| a.capability.clone()).collect(),
                vec![
                    dataset("Current", axes.iter().map(|a| a.current).collect()),
                    dataset("Target", axes.iter().map(|a| a.target).collect()),
                ],
            ),
            other => return Err(unsupported("chart panel", other)),
        };
        surface.replace_data(&labels, &datasets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Cards {
        text:     HashMap<String, String>,
        progress: f64,
    }

    impl TextSurface for Cards {
        fn set_text(&mut self, slot: &str, text: &str) -> ViewResult<()> {
            self.text.insert(slot.to_string(), text.to_string());
            Ok(())
        }

        fn set_progress(&mut self, _slot: &str, pct: f64) -> ViewResult<()> {
            self.progress = pct;
            Ok(())
        }
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(18_500), "18,500");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-4_200), "-4,200");
    }

    #[test]
    fn tween_lands_exactly_on_target() {
        let mut tween = CounterTween::new(0, 19_999);
        assert_eq!(tween.value_at(1_000), 0);
        let mid = tween.value_at(1_000 + 256);
        assert!(mid > 0 && mid < 19_999, "mid-flight value {mid}");
        assert!(!tween.is_done(1_000 + 256));
        assert_eq!(tween.value_at(1_000 + TWEEN_DURATION_MS), 19_999);
        assert!(tween.is_done(1_000 + TWEEN_DURATION_MS));
    }

    #[test]
    fn tween_counts_down() {
        let mut tween = CounterTween::new(8_000, 7_500);
        assert_eq!(tween.value_at(0), 8_000);
        let mut last = 8_000;
        for now in (TWEEN_STEP_MS..TWEEN_DURATION_MS).step_by(TWEEN_STEP_MS as usize) {
            let v = tween.value_at(now);
            assert!(v <= last && v >= 7_500, "{v} at {now}ms");
            last = v;
        }
        let mid = tween.value_at(256);
        assert!(mid > 7_500 && mid < 8_000, "mid-flight value {mid}");
        assert_eq!(tween.value_at(TWEEN_DURATION_MS), 7_500);
        assert!(tween.is_done(TWEEN_DURATION_MS));
    }

    #[test]
    fn cards_animate_to_new_kpis() {
        let mut cards = CardPanel::new(Some(Cards::default()));
        let k = KpiSnapshot {
            active_ship_count:    7,
            throughput_teu:       18_500,
            equipment_online_pct: 95,
            efficiency_pct:       31,
        };
        cards.render(&PanelUpdate::Kpis(&k)).unwrap();
        cards.on_frame(0).unwrap();
        cards.on_frame(TWEEN_DURATION_MS).unwrap();

        let surface = cards.surface().unwrap();
        assert_eq!(surface.text["throughput-value"], "18,500");
        assert_eq!(cards.shown("ships-count"), Some(7));
    }

    #[test]
    fn carbon_progress_set_immediately() {
        let mut cards = CardPanel::new(Some(Cards::default()));
        let c = CarbonSnapshot::derive(7_650.0, 8_500.0, 1_250.0, 44.0);
        cards.render(&PanelUpdate::Carbon(&c)).unwrap();
        assert_eq!(cards.surface().unwrap().progress, 90.0);
    }

    #[test]
    fn unmounted_surface_reports_missing_target() {
        let mut cards: CardPanel<Cards> = CardPanel::new(None);
        let c = CarbonSnapshot::derive(7_650.0, 8_500.0, 1_250.0, 44.0);
        assert!(matches!(
            cards.render(&PanelUpdate::Carbon(&c)),
            Err(ViewError::MissingTarget { .. })
        ));
    }
}

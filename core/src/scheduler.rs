//! The update scheduler — the periodic driver behind every live panel.
//!
//! STEP ORDER (fixed, documented, never reordered):
//!   1. KPIs            -> Panel::Kpis
//!   2. Ship table      -> Panel::Ships            (wholesale replace)
//!   3. Throughput      -> append + evict, then Panel::ThroughputTrend
//!   4. Carbon          -> Panel::Carbon
//!   5. Alerts          -> Panel::Alerts           (wholesale replace)
//!
//! RULES:
//!   - Steps run sequentially and synchronously inside one tick.
//!   - A failing or unmounted adapter never stops later steps.
//!   - `start()` cancels any armed timer before arming a new one, so
//!     at most one ticker ever exists.
//!   - Only the scheduler mutates the throughput history.

use crate::{
    error::{DashError, DashResult},
    feed::TelemetryFeed,
    history::TimeSeriesBuffer,
    host::EventLoop,
    types::{Millis, Tick, TimerId},
    view::{Delivery, PanelUpdate, ViewRegistry},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running { timer: TimerId },
}

/// Independent per-step counters. A step counts as executed even when
/// its adapter skipped or failed; failures are tallied separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchedulerStats {
    pub ticks:              Tick,
    pub kpi_pushes:         u64,
    pub ship_replacements:  u64,
    pub samples_appended:   u64,
    pub samples_evicted:    u64,
    pub carbon_pushes:      u64,
    pub alert_replacements: u64,
    pub skipped_pushes:     u64,
    pub failed_pushes:      u64,
}

impl SchedulerStats {
    fn record(&mut self, delivery: Delivery) {
        match delivery {
            Delivery::Rendered => {}
            Delivery::Skipped  => self.skipped_pushes += 1,
            Delivery::Failed   => self.failed_pushes += 1,
        }
    }
}

pub struct UpdateScheduler<F: TelemetryFeed> {
    interval_ms: Millis,
    state:       SchedulerState,
    feed:        F,
    history:     TimeSeriesBuffer,
    stats:       SchedulerStats,
}

impl<F: TelemetryFeed> UpdateScheduler<F> {
    pub fn new(feed: F, interval_ms: Millis, history_capacity: usize) -> Self {
        Self {
            interval_ms,
            state: SchedulerState::Idle,
            feed,
            history: TimeSeriesBuffer::new(history_capacity),
            stats: SchedulerStats::default(),
        }
    }

    pub fn state(&self) -> SchedulerState { self.state }
    pub fn is_running(&self) -> bool { matches!(self.state, SchedulerState::Running { .. }) }
    pub fn interval_ms(&self) -> Millis { self.interval_ms }
    pub fn history(&self) -> &TimeSeriesBuffer { &self.history }
    pub fn stats(&self) -> &SchedulerStats { &self.stats }
    pub fn feed_mut(&mut self) -> &mut F { &mut self.feed }

    pub fn timer(&self) -> Option<TimerId> {
        match self.state {
            SchedulerState::Running { timer } => Some(timer),
            SchedulerState::Idle => None,
        }
    }

    /// Idle -> Running. Restarting cancels the previous timer first.
    pub fn start(&mut self, host: &mut EventLoop) -> DashResult<TimerId> {
        if let SchedulerState::Running { timer } = self.state {
            self.state = SchedulerState::Idle;
            disarm(host, timer)?;
            log::debug!("scheduler: restart, cancelled timer {timer}");
        }
        let timer = host.set_interval(self.interval_ms);
        self.state = SchedulerState::Running { timer };
        log::info!(
            "scheduler: running every {}ms on feed '{}' (timer {timer})",
            self.interval_ms,
            self.feed.name()
        );
        Ok(timer)
    }

    /// Running -> Idle. A no-op when already idle.
    pub fn stop(&mut self, host: &mut EventLoop) -> DashResult<()> {
        if let SchedulerState::Running { timer } = self.state {
            self.state = SchedulerState::Idle;
            disarm(host, timer)?;
            log::info!("scheduler: stopped after {} ticks", self.stats.ticks);
        }
        Ok(())
    }

    /// Fill the history to capacity so the trend chart starts full.
    pub fn prefill_history(&mut self, now: DateTime<Utc>) {
        while !self.history.is_full() {
            let sample = self.feed.throughput_sample(now);
            self.history.push(sample);
        }
    }

    /// Push the current state of every live panel without touching the
    /// history or the stats. Used for the first render at init.
    pub fn render_initial(&mut self, now: DateTime<Utc>, views: &mut ViewRegistry) {
        let kpis = self.feed.kpis(now);
        views.push(PanelUpdate::Kpis(&kpis));
        let ships = self.feed.ships(now);
        views.push(PanelUpdate::Ships(&ships));
        views.push(PanelUpdate::ThroughputTrend(&self.history));
        let carbon = self.feed.carbon(now);
        views.push(PanelUpdate::Carbon(&carbon));
        let alerts = self.feed.alerts(now);
        views.push(PanelUpdate::Alerts(&alerts));
    }

    /// One tick. Never fails: adapter faults are logged and counted.
    pub fn tick(&mut self, now: DateTime<Utc>, views: &mut ViewRegistry) -> Tick {
        self.stats.ticks += 1;
        let tick = self.stats.ticks;

        // 1. KPIs
        let kpis = self.feed.kpis(now);
        let delivery = views.push(PanelUpdate::Kpis(&kpis));
        self.stats.kpi_pushes += 1;
        self.stats.record(delivery);

        // 2. Ship table
        let ships = self.feed.ships(now);
        let delivery = views.push(PanelUpdate::Ships(&ships));
        self.stats.ship_replacements += 1;
        self.stats.record(delivery);

        // 3. Throughput history
        let sample = self.feed.throughput_sample(now);
        if self.history.push(sample).is_some() {
            self.stats.samples_evicted += 1;
        }
        self.stats.samples_appended += 1;
        let delivery = views.push(PanelUpdate::ThroughputTrend(&self.history));
        self.stats.record(delivery);

        // 4. Carbon
        let carbon = self.feed.carbon(now);
        let delivery = views.push(PanelUpdate::Carbon(&carbon));
        self.stats.carbon_pushes += 1;
        self.stats.record(delivery);

        // 5. Alerts
        let alerts = self.feed.alerts(now);
        let delivery = views.push(PanelUpdate::Alerts(&alerts));
        self.stats.alert_replacements += 1;
        self.stats.record(delivery);

        log::debug!(
            "tick={tick} ships={} teu={} sample={sample} carbon={:.0} alerts={}",
            ships.len(),
            kpis.throughput_teu,
            carbon.total_emissions,
            alerts.len()
        );
        tick
    }
}

/// Cancel `timer`. One the host already dropped counts as cancelled.
fn disarm(host: &mut EventLoop, timer: TimerId) -> DashResult<()> {
    match host.cancel(timer) {
        Err(DashError::TimerNotFound { id }) => {
            log::warn!("scheduler: timer {id} was no longer armed");
            Ok(())
        }
        other => other,
    }
}

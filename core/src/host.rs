//! Cooperative single-threaded timer host.
//!
//! Stands in for the UI runtime's "every N ms" and "every display refresh"
//! primitives. Nothing runs in parallel: the caller advances time, gets
//! back the timers that came due, and runs each callback to completion
//! before looking at the next.
//!
//! MISSED TICKS: if time jumps past several periods (a suspended host),
//! a timer fires once and re-aligns to its next future slot. Backlog is
//! never queued.

use crate::{
    clock::HostClock,
    error::{DashError, DashResult},
    types::{Millis, TimerId},
};
use chrono::{DateTime, Utc};

/// 60 Hz display refresh, rounded down.
pub const DEFAULT_FRAME_PERIOD_MS: Millis = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Interval,
    AnimationFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id:   TimerId,
    pub kind: TimerKind,
    pub at:   Millis,
}

#[derive(Debug, Clone)]
struct Timer {
    id:       TimerId,
    kind:     TimerKind,
    period:   Millis,
    next_due: Millis,
}

pub struct EventLoop {
    clock:        HostClock,
    frame_period: Millis,
    timers:       Vec<Timer>,
    next_id:      TimerId,
}

impl EventLoop {
    pub fn new(clock: HostClock) -> Self {
        Self::with_frame_period(clock, DEFAULT_FRAME_PERIOD_MS)
    }

    pub fn with_frame_period(clock: HostClock, frame_period: Millis) -> Self {
        assert!(frame_period > 0, "frame period must be > 0");
        Self {
            clock,
            frame_period,
            timers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn now_ms(&self) -> Millis { self.clock.now_ms() }
    pub fn wall_clock(&self) -> DateTime<Utc> { self.clock.wall_clock() }
    pub fn clock(&self) -> &HostClock { &self.clock }

    /// Call back every `period` ms, first at now + period.
    pub fn set_interval(&mut self, period: Millis) -> TimerId {
        assert!(period > 0, "interval period must be > 0");
        self.arm(TimerKind::Interval, period)
    }

    /// Call back once per display refresh until cancelled.
    pub fn request_frames(&mut self) -> TimerId {
        self.arm(TimerKind::AnimationFrame, self.frame_period)
    }

    pub fn cancel(&mut self, id: TimerId) -> DashResult<()> {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        if self.timers.len() == before {
            return Err(DashError::TimerNotFound { id });
        }
        log::trace!("timer {id} cancelled");
        Ok(())
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn active_of_kind(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|t| t.kind == kind).count()
    }

    /// Earliest due time among armed timers.
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.iter().map(|t| t.next_due).min()
    }

    /// Jump to `target` and return every timer that came due, each at most
    /// once, ordered by due time then arming order.
    pub fn advance_to(&mut self, target: Millis) -> Vec<Fired> {
        let now = self.clock.advance_to(target);
        let mut fired = Vec::new();

        for timer in &mut self.timers {
            if timer.next_due > now {
                continue;
            }
            fired.push(Fired { id: timer.id, kind: timer.kind, at: timer.next_due });
            let missed = (now - timer.next_due) / timer.period;
            if missed > 0 {
                log::debug!("timer {} skipped {missed} missed period(s)", timer.id);
            }
            timer.next_due += timer.period * (missed + 1);
        }

        fired.sort_by_key(|f| (f.at, f.id));
        fired
    }

    fn arm(&mut self, kind: TimerKind, period: Millis) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            kind,
            period,
            next_due: self.clock.now_ms() + period,
        });
        log::trace!("timer {id} armed: {kind:?} every {period}ms");
        id
    }
}

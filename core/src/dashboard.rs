//! The dashboard context — owns every piece of session state.
//!
//! LIFECYCLE:
//!   init      build scene, render static panels, first render of live
//!             panels, arm the scheduler, attach the frame callback
//!   pump      advance host time and dispatch whatever came due
//!   teardown  stop the scheduler and dispose of the frame callback
//!
//! The scheduler and the camera driver never see each other. Both are
//! driven from `dispatch`, one callback at a time.

use crate::{
    camera::{CameraDriver, RenderSurface, Viewport},
    catalog,
    clock::HostClock,
    config::DashboardConfig,
    error::{DashError, DashResult},
    feed::{SyntheticFeed, TelemetryFeed},
    host::{EventLoop, Fired, TimerKind},
    rng::RngBank,
    scene::{build_scene, SceneModel},
    scheduler::UpdateScheduler,
    types::Millis,
    view::{PanelUpdate, ViewRegistry},
};

pub struct Dashboard<F: TelemetryFeed = SyntheticFeed> {
    config:    DashboardConfig,
    host:      EventLoop,
    scheduler: UpdateScheduler<F>,
    camera:    CameraDriver,
    scene:     SceneModel,
    views:     ViewRegistry,
    surface:   Option<Box<dyn RenderSurface>>,
    torn_down: bool,
}

impl Dashboard<SyntheticFeed> {
    /// Build a fully wired dashboard on the synthetic feed.
    pub fn init(
        config: DashboardConfig,
        clock: HostClock,
        views: ViewRegistry,
        surface: Option<Box<dyn RenderSurface>>,
        viewport: Viewport,
    ) -> DashResult<Self> {
        let feed = SyntheticFeed::new(&RngBank::new(config.seed), config.carbon_target);
        Self::with_feed(config, clock, feed, views, surface, viewport)
    }
}

impl<F: TelemetryFeed> Dashboard<F> {
    pub fn with_feed(
        config: DashboardConfig,
        clock: HostClock,
        feed: F,
        views: ViewRegistry,
        surface: Option<Box<dyn RenderSurface>>,
        viewport: Viewport,
    ) -> DashResult<Self> {
        config.validate()?;

        let host = EventLoop::new(clock);
        let scheduler =
            UpdateScheduler::new(feed, config.update_interval_ms, config.history_capacity);
        let camera = CameraDriver::new(&config.camera, viewport);
        let scene = build_scene(&config.scene, config.seed);

        let mut dashboard = Self {
            config,
            host,
            scheduler,
            camera,
            scene,
            views,
            surface,
            torn_down: false,
        };
        dashboard.render_static_panels();

        let now = dashboard.host.wall_clock();
        if dashboard.config.prefill_history {
            dashboard.scheduler.prefill_history(now);
        }
        dashboard.scheduler.render_initial(now, &mut dashboard.views);

        dashboard.scheduler.start(&mut dashboard.host)?;
        dashboard.camera.attach(&mut dashboard.host)?;
        log::info!(
            "dashboard initialised: seed={} scene_nodes={} render_surface={}",
            dashboard.config.seed,
            dashboard.scene.len(),
            dashboard.surface.is_some()
        );
        Ok(dashboard)
    }

    pub fn config(&self) -> &DashboardConfig { &self.config }
    pub fn host(&self) -> &EventLoop { &self.host }
    pub fn scheduler(&self) -> &UpdateScheduler<F> { &self.scheduler }
    pub fn camera(&self) -> &CameraDriver { &self.camera }
    pub fn scene(&self) -> &SceneModel { &self.scene }
    pub fn views(&self) -> &ViewRegistry { &self.views }
    pub fn views_mut(&mut self) -> &mut ViewRegistry { &mut self.views }
    pub fn is_torn_down(&self) -> bool { self.torn_down }

    pub fn start_updates(&mut self) -> DashResult<()> {
        self.ensure_live()?;
        self.scheduler.start(&mut self.host).map(|_| ())
    }

    pub fn stop_updates(&mut self) -> DashResult<()> {
        self.ensure_live()?;
        self.scheduler.stop(&mut self.host)
    }

    pub fn reset_camera(&mut self) -> DashResult<()> {
        self.ensure_live()?;
        self.camera.reset();
        Ok(())
    }

    pub fn toggle_animation(&mut self) -> DashResult<bool> {
        self.ensure_live()?;
        Ok(self.camera.toggle_animation())
    }

    /// Returns whether the resize was applied.
    pub fn resize(&mut self, viewport: Viewport) -> DashResult<bool> {
        self.ensure_live()?;
        let Some(surface) = self.surface.as_deref_mut() else {
            return Ok(false);
        };
        match self.camera.resize(viewport, surface) {
            Ok(applied) => Ok(applied),
            Err(e) => {
                log::warn!("resize to {viewport:?} failed: {e}");
                Ok(false)
            }
        }
    }

    /// Jump host time to `target` and run every callback that came due.
    /// A jump spanning several periods fires each timer once.
    pub fn pump(&mut self, target: Millis) -> DashResult<usize> {
        self.ensure_live()?;
        let fired = self.host.advance_to(target);
        let count = fired.len();
        for f in fired {
            self.dispatch(f);
        }
        Ok(count)
    }

    /// Advance to `target` without skipping: stop at every due time on the
    /// way, as a host that is never suspended would.
    pub fn run_until(&mut self, target: Millis) -> DashResult<()> {
        self.ensure_live()?;
        while let Some(due) = self.host.next_due() {
            if due > target {
                break;
            }
            self.pump(due)?;
        }
        self.host.advance_to(target);
        Ok(())
    }

    /// Stop the scheduler and dispose of the frame callback. Idempotent.
    pub fn teardown(&mut self) -> DashResult<()> {
        if self.torn_down {
            return Ok(());
        }
        self.scheduler.stop(&mut self.host)?;
        self.camera.detach(&mut self.host)?;
        self.torn_down = true;
        log::info!(
            "dashboard torn down after {} ticks, {} frames",
            self.scheduler.stats().ticks,
            self.camera.frames()
        );
        Ok(())
    }

    fn ensure_live(&self) -> DashResult<()> {
        if self.torn_down {
            return Err(DashError::TornDown);
        }
        Ok(())
    }

    fn dispatch(&mut self, fired: Fired) {
        // An earlier callback in this batch may have cancelled this one.
        if !self.host.is_armed(fired.id) {
            return;
        }
        match fired.kind {
            TimerKind::Interval if self.scheduler.timer() == Some(fired.id) => {
                let now = self.host.wall_clock();
                self.scheduler.tick(now, &mut self.views);
            }
            TimerKind::AnimationFrame if self.camera.frame_timer() == Some(fired.id) => {
                self.render_frame();
            }
            kind => log::warn!("timer {} ({kind:?}) has no owner", fired.id),
        }
    }

    fn render_frame(&mut self) {
        let wall_ms = self.host.clock().wall_clock_ms();
        if let Some(surface) = self.surface.as_deref_mut() {
            if let Err(e) = self.camera.on_frame(wall_ms, &self.scene, surface) {
                log::warn!("frame render failed: {e}");
            }
        } else {
            // Twin viewport not mounted; keep the camera moving regardless.
            self.camera.advance(wall_ms);
        }
        self.views.frame(self.host.now_ms());
    }

    fn render_static_panels(&mut self) {
        let now = self.host.wall_clock();
        let classes = catalog::equipment_classes();
        self.views.push(PanelUpdate::EquipmentStatus(&classes));
        let units = catalog::equipment_units();
        self.views.push(PanelUpdate::EquipmentList(&units));
        let sources = catalog::emission_sources();
        self.views.push(PanelUpdate::EmissionSources(&sources));
        let history = self.scheduler.feed_mut().carbon_history(now);
        self.views.push(PanelUpdate::CarbonTrend(&history));
        let readiness = catalog::readiness_profile();
        self.views.push(PanelUpdate::Readiness(&readiness));
    }
}

impl<F: TelemetryFeed> Drop for Dashboard<F> {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            log::warn!("teardown on drop failed: {e}");
        }
    }
}

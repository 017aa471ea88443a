//! Shared fixtures: a recording panel adapter and a counting render surface.
//! Both hand out clones that share state, so a test can keep one handle
//! after boxing the other into the registry.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use portwatch_core::{
    camera::{Camera, RenderSurface, Viewport},
    clock::HostClock,
    error::{ViewError, ViewResult},
    scene::SceneModel,
    view::{Panel, PanelAdapter, PanelUpdate, ViewRegistry},
};
use std::{cell::RefCell, rc::Rc};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap()
}

pub fn clock() -> HostClock {
    HostClock::new(epoch())
}

#[derive(Clone, Default)]
pub struct Recorder {
    log: Rc<RefCell<Vec<(Panel, serde_json::Value)>>>,
}

impl Recorder {
    pub fn count(&self, panel: Panel) -> usize {
        self.log.borrow().iter().filter(|(p, _)| *p == panel).count()
    }

    pub fn last(&self, panel: Panel) -> Option<serde_json::Value> {
        self.log
            .borrow()
            .iter()
            .rev()
            .find(|(p, _)| *p == panel)
            .map(|(_, v)| v.clone())
    }

    /// Every push, serialized, in delivery order.
    pub fn payloads(&self) -> Vec<String> {
        self.log.borrow().iter().map(|(_, v)| v.to_string()).collect()
    }
}

impl PanelAdapter for Recorder {
    fn render(&mut self, update: &PanelUpdate<'_>) -> ViewResult<()> {
        let value = serde_json::to_value(update)?;
        self.log.borrow_mut().push((update.panel(), value));
        Ok(())
    }
}

/// Always fails, as a chart whose canvas has been lost would.
pub struct Broken;

impl PanelAdapter for Broken {
    fn render(&mut self, _update: &PanelUpdate<'_>) -> ViewResult<()> {
        Err(ViewError::Surface("canvas context lost".into()))
    }
}

pub fn recording_views(recorder: &Recorder) -> ViewRegistry {
    let mut views = ViewRegistry::new();
    for panel in Panel::ALL {
        views.mount(panel, Box::new(recorder.clone()));
    }
    views
}

#[derive(Clone, Default)]
pub struct CountingSurface {
    pub renders: Rc<RefCell<Vec<Camera>>>,
    pub sizes:   Rc<RefCell<Vec<Viewport>>>,
}

impl RenderSurface for CountingSurface {
    fn render(&mut self, _scene: &SceneModel, camera: &Camera) -> ViewResult<()> {
        self.renders.borrow_mut().push(*camera);
        Ok(())
    }

    fn set_size(&mut self, viewport: Viewport) -> ViewResult<()> {
        self.sizes.borrow_mut().push(viewport);
        Ok(())
    }
}

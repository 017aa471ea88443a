//! Camera and animation driver for the digital twin viewport.
//!
//! Runs once per display frame, independent of the update scheduler.
//! The driver exclusively owns the camera; the render surface only
//! reads it for the duration of one `render` call.

use crate::{
    config::CameraConfig,
    error::{DashResult, ViewResult},
    host::EventLoop,
    scene::{SceneModel, Vec3},
    types::TimerId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Viewport {
    pub width:  u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero width or height: no aspect ratio can be computed.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub fov_deg: f64,
    pub aspect:  f64,
    pub near:    f64,
    pub far:     f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Camera {
    pub position:   Vec3,
    pub target:     Vec3,
    pub projection: Projection,
}

impl Camera {
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}

/// A 3D surface that draws a scene from a camera pose.
pub trait RenderSurface {
    fn render(&mut self, scene: &SceneModel, camera: &Camera) -> ViewResult<()>;
    fn set_size(&mut self, viewport: Viewport) -> ViewResult<()>;
}

pub struct CameraDriver {
    camera:            Camera,
    default_position:  Vec3,
    orbit_radius:      f64,
    orbit_rate:        f64,
    animation_enabled: bool,
    frames:            u64,
    frame_timer:       Option<TimerId>,
}

impl CameraDriver {
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        let default_position = Vec3::from(config.default_position);
        let aspect = if viewport.is_degenerate() {
            1.0
        } else {
            f64::from(viewport.width) / f64::from(viewport.height)
        };
        Self {
            camera: Camera {
                position:   default_position,
                target:     Vec3::ORIGIN,
                projection: Projection {
                    fov_deg: config.fov_deg,
                    aspect,
                    near: config.near,
                    far: config.far,
                },
            },
            default_position,
            orbit_radius: config.orbit_radius,
            orbit_rate: config.orbit_rate,
            animation_enabled: true,
            frames: 0,
            frame_timer: None,
        }
    }

    pub fn camera(&self) -> &Camera { &self.camera }
    pub fn animation_enabled(&self) -> bool { self.animation_enabled }
    pub fn frames(&self) -> u64 { self.frames }
    pub fn frame_timer(&self) -> Option<TimerId> { self.frame_timer }

    /// Register the per-frame callback, replacing any earlier one.
    pub fn attach(&mut self, host: &mut EventLoop) -> DashResult<TimerId> {
        self.detach(host)?;
        let id = host.request_frames();
        self.frame_timer = Some(id);
        Ok(id)
    }

    /// Dispose of the per-frame callback.
    pub fn detach(&mut self, host: &mut EventLoop) -> DashResult<()> {
        if let Some(id) = self.frame_timer.take() {
            host.cancel(id)?;
            log::debug!("camera: frame callback {id} disposed");
        }
        Ok(())
    }

    /// Move the camera to its orbit slot for `wall_ms`, if animating.
    pub fn advance(&mut self, wall_ms: f64) {
        if !self.animation_enabled {
            return;
        }
        let angle = wall_ms * self.orbit_rate;
        self.camera.position.x = angle.cos() * self.orbit_radius;
        self.camera.position.z = angle.sin() * self.orbit_radius;
        self.camera.look_at(Vec3::ORIGIN);
    }

    /// One frame: orbit (when enabled), then render.
    pub fn on_frame(
        &mut self,
        wall_ms: f64,
        scene: &SceneModel,
        surface: &mut dyn RenderSurface,
    ) -> ViewResult<()> {
        self.advance(wall_ms);
        self.frames += 1;
        surface.render(scene, &self.camera)
    }

    /// Back to the default pose. Animation state is left as is.
    pub fn reset(&mut self) {
        self.camera.position = self.default_position;
        self.camera.look_at(Vec3::ORIGIN);
        log::debug!("camera: reset to default pose");
    }

    pub fn toggle_animation(&mut self) -> bool {
        self.animation_enabled = !self.animation_enabled;
        log::debug!("camera: animation {}", if self.animation_enabled { "on" } else { "off" });
        self.animation_enabled
    }

    /// Recompute aspect and surface size. Returns false, touching nothing,
    /// for a zero-extent viewport.
    pub fn resize(&mut self, viewport: Viewport, surface: &mut dyn RenderSurface) -> ViewResult<bool> {
        if viewport.is_degenerate() {
            log::trace!("camera: ignoring degenerate viewport {viewport:?}");
            return Ok(false);
        }
        self.camera.projection.aspect = f64::from(viewport.width) / f64::from(viewport.height);
        surface.set_size(viewport)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_default_pose_facing_origin() {
        let driver = CameraDriver::new(&CameraConfig::default(), Viewport::new(1600, 900));
        assert_eq!(driver.camera().position, Vec3::new(30.0, 25.0, 30.0));
        assert_eq!(driver.camera().target, Vec3::ORIGIN);
        assert!((driver.camera().projection.aspect - 16.0 / 9.0).abs() < 1e-12);
        assert!(driver.animation_enabled());
    }

    #[test]
    fn zero_viewport_falls_back_to_square_aspect() {
        let driver = CameraDriver::new(&CameraConfig::default(), Viewport::new(0, 0));
        assert_eq!(driver.camera().projection.aspect, 1.0);
    }
}

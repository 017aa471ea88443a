//! Scene model for the yard's digital twin.
//!
//! The model is a flat, immutable list of `SceneNode`s built once at init.
//! Renderers receive `&SceneModel` and may only read it; per-frame state
//! lives in the camera driver.
//!
//! BUILD ORDER (fixed):
//!   1. ground plane
//!   2. dock slab
//!   3. cranes, one per configured offset: base, pole, beam
//!   4. container stacks, lattice column-major (x outer, z inner), bottom up

use crate::{
    config::{SceneLayout, MAX_LATTICE_CELLS, MAX_STACK_HEIGHT},
    rng::{RngBank, StreamSlot},
    types::Rgb,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from the vertical axis through the origin.
    pub fn horizontal_radius(&self) -> f64 {
        self.x.hypot(self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Ground,
    Dock,
    CraneBase,
    CranePole,
    CraneBeam,
    Container,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub color:     Rgb,
    pub roughness: f64,
    pub metalness: f64,
}

impl Material {
    /// Standard-material defaults: fully rough, non-metallic.
    pub const fn matte(color: Rgb) -> Self {
        Self { color, roughness: 1.0, metalness: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SceneNode {
    pub kind:            NodeKind,
    /// Centre of the node's bounding box.
    pub position:        Vec3,
    /// Full extents along each axis. The ground plane has zero height.
    pub size:            Vec3,
    pub material:        Material,
    pub casts_shadow:    bool,
    pub receives_shadow: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Light {
    pub color:     Rgb,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DirectionalLight {
    pub light:         Light,
    pub position:      Vec3,
    pub casts_shadow:  bool,
    /// Half-width of the square orthographic shadow frustum.
    pub shadow_extent: f64,
}

/// Everything a renderer needs besides the nodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SceneEnvironment {
    pub background:     Rgb,
    pub fog_color:      Rgb,
    pub fog_near:       f64,
    pub fog_far:        f64,
    pub ambient:        Light,
    pub sun:            DirectionalLight,
    pub grid_size:      f64,
    pub grid_divisions: u32,
    pub grid_colors:    (Rgb, Rgb),
}

impl Default for SceneEnvironment {
    fn default() -> Self {
        Self {
            background:     0x0a0e27,
            fog_color:      0x0a0e27,
            fog_near:       50.0,
            fog_far:        200.0,
            ambient:        Light { color: 0xffffff, intensity: 1.2 },
            sun: DirectionalLight {
                light:         Light { color: 0xffffff, intensity: 1.5 },
                position:      Vec3::new(20.0, 30.0, 10.0),
                casts_shadow:  true,
                shadow_extent: 50.0,
            },
            grid_size:      100.0,
            grid_divisions: 50,
            grid_colors:    (0x667eea, 0x252b48),
        }
    }
}

const GROUND_SIZE: f64 = 100.0;
const DOCK_SIZE: Vec3 = Vec3::new(60.0, 1.0, 20.0);
const CRANE_BASE_SIZE: Vec3 = Vec3::new(3.0, 1.0, 3.0);
const CRANE_POLE_SIZE: Vec3 = Vec3::new(0.8, 15.0, 0.8);
const CRANE_BEAM_SIZE: Vec3 = Vec3::new(12.0, 0.6, 0.6);
const CONTAINER_SIZE: Vec3 = Vec3::new(6.0, 2.5, 2.5);

pub const CRANE_PARTS: usize = 3;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SceneModel {
    seed:        u64,
    nodes:       Vec<SceneNode>,
    environment: SceneEnvironment,
}

impl SceneModel {
    pub fn nodes(&self) -> &[SceneNode] { &self.nodes }
    pub fn environment(&self) -> &SceneEnvironment { &self.environment }
    pub fn seed(&self) -> u64 { self.seed }
    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }
}

/// Build the yard. Deterministic for a given layout and seed; the seed only
/// affects container stack heights and colours. `max_stack_height` is
/// clamped to 1..=MAX_STACK_HEIGHT.
pub fn build_scene(layout: &SceneLayout, seed: u64) -> SceneModel {
    let mut rng = RngBank::new(seed).for_stream(StreamSlot::Scene);
    let lattice = &layout.lattice;
    let dock_z = layout.dock_line_z;

    // Stack heights are drawn from 1..=max, whatever the layout asks for.
    let max_height = layout.max_stack_height.clamp(1, MAX_STACK_HEIGHT);
    let capacity = layout
        .crane_offsets
        .len()
        .saturating_mul(CRANE_PARTS)
        .saturating_add(lattice.cells().min(MAX_LATTICE_CELLS).saturating_mul(max_height as usize))
        .saturating_add(2);

    let mut nodes = Vec::with_capacity(capacity);

    nodes.push(SceneNode {
        kind:            NodeKind::Ground,
        position:        Vec3::ORIGIN,
        size:            Vec3::new(GROUND_SIZE, 0.0, GROUND_SIZE),
        material:        Material { color: 0x1a1f3a, roughness: 0.8, metalness: 0.0 },
        casts_shadow:    false,
        receives_shadow: true,
    });

    nodes.push(SceneNode {
        kind:            NodeKind::Dock,
        position:        Vec3::new(0.0, DOCK_SIZE.y / 2.0, dock_z),
        size:            DOCK_SIZE,
        material:        Material { color: 0x252b48, roughness: 0.7, metalness: 0.0 },
        casts_shadow:    true,
        receives_shadow: true,
    });

    for &x in &layout.crane_offsets {
        let parts = [
            (NodeKind::CraneBase, CRANE_BASE_SIZE, 0.5, 0x667eea),
            (NodeKind::CranePole, CRANE_POLE_SIZE, 8.0, 0x764ba2),
            (NodeKind::CraneBeam, CRANE_BEAM_SIZE, 15.0, 0xf093fb),
        ];
        for (kind, size, y, color) in parts {
            nodes.push(SceneNode {
                kind,
                position:        Vec3::new(x, y, dock_z),
                size,
                material:        Material::matte(color),
                casts_shadow:    true,
                receives_shadow: false,
            });
        }
    }

    for col in 0..lattice.columns {
        let x = lattice.origin_x + f64::from(col) * lattice.stride;
        for row in 0..lattice.rows {
            let z = lattice.origin_z + f64::from(row) * lattice.stride;
            let height = rng.int_in(1, max_height + 1);
            for level in 0..height {
                let color = *rng.pick(&layout.palette);
                nodes.push(SceneNode {
                    kind:            NodeKind::Container,
                    position:        Vec3::new(
                        x,
                        CONTAINER_SIZE.y / 2.0 + f64::from(level) * CONTAINER_SIZE.y,
                        z,
                    ),
                    size:            CONTAINER_SIZE,
                    material:        Material { color, roughness: 0.6, metalness: 0.3 },
                    casts_shadow:    true,
                    receives_shadow: true,
                });
            }
        }
    }

    log::info!(
        "scene built: seed={seed} nodes={} containers={}",
        nodes.len(),
        nodes.iter().filter(|n| n.kind == NodeKind::Container).count()
    );

    SceneModel {
        seed,
        nodes,
        environment: SceneEnvironment::default(),
    }
}

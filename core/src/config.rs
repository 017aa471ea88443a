use crate::{
    error::{DashError, DashResult},
    types::{Millis, Rgb},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_UPDATE_INTERVAL_MS: Millis = 3_000;
pub const DEFAULT_CARBON_TARGET: f64 = 8_500.0;
pub const DEFAULT_HISTORY_CAPACITY: usize = 24;
pub const DEFAULT_CRANE_OFFSETS: [f64; 5] = [-20.0, -10.0, 0.0, 10.0, 20.0];
pub const DEFAULT_PALETTE: [Rgb; 5] = [0x43e97b, 0xf5576c, 0x4facfe, 0xfeca57, 0x667eea];
pub const DEFAULT_ORBIT_RADIUS: f64 = 40.0;
/// Radians per wall-clock millisecond.
pub const DEFAULT_ORBIT_RATE: f64 = 0.0001;
/// Tallest container stack the yard model supports.
pub const MAX_STACK_HEIGHT: u32 = 3;
/// Upper bound on lattice columns * rows.
pub const MAX_LATTICE_CELLS: usize = 10_000;

/// Every recognised dashboard option. Missing JSON fields fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub seed:               u64,
    pub update_interval_ms: Millis,
    pub carbon_target:      f64,
    pub history_capacity:   usize,
    /// Fill the throughput history to capacity at init, as the trend chart expects.
    pub prefill_history:    bool,
    pub scene:              SceneLayout,
    pub camera:             CameraConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed:               42,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            carbon_target:      DEFAULT_CARBON_TARGET,
            history_capacity:   DEFAULT_HISTORY_CAPACITY,
            prefill_history:    true,
            scene:              SceneLayout::default(),
            camera:             CameraConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneLayout {
    pub crane_offsets:    Vec<f64>,
    /// z coordinate shared by the dock slab and every crane.
    pub dock_line_z:      f64,
    pub palette:          Vec<Rgb>,
    pub lattice:          LatticeConfig,
    pub max_stack_height: u32,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            crane_offsets:    DEFAULT_CRANE_OFFSETS.to_vec(),
            dock_line_z:      -15.0,
            palette:          DEFAULT_PALETTE.to_vec(),
            lattice:          LatticeConfig::default(),
            max_stack_height: 3,
        }
    }
}

/// Regular (x, z) grid of container stacks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LatticeConfig {
    pub origin_x: f64,
    pub origin_z: f64,
    pub stride:   f64,
    pub columns:  u32,
    pub rows:     u32,
}

impl LatticeConfig {
    pub fn cells(&self) -> usize {
        (self.columns as usize).saturating_mul(self.rows as usize)
    }
}

impl Default for LatticeConfig {
    fn default() -> Self {
        // x in -25..=25 and z in 5..=15, stepping by 8.
        Self {
            origin_x: -25.0,
            origin_z: 5.0,
            stride:   8.0,
            columns:  7,
            rows:     2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub orbit_radius:     f64,
    pub orbit_rate:       f64,
    pub default_position: [f64; 3],
    pub fov_deg:          f64,
    pub near:             f64,
    pub far:              f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_radius:     DEFAULT_ORBIT_RADIUS,
            orbit_rate:       DEFAULT_ORBIT_RATE,
            default_position: [30.0, 25.0, 30.0],
            fov_deg:          60.0,
            near:             0.1,
            far:              1000.0,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file. Absent fields take their defaults.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(path: &str) -> DashResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DashError::ConfigIo {
            path: path.to_string(),
            source,
        })?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!(
            "config loaded from {path}: interval={}ms capacity={} cranes={}",
            config.update_interval_ms,
            config.history_capacity,
            config.scene.crane_offsets.len()
        );
        Ok(config)
    }

    /// Defaults with a short interval and a fixed seed for unit tests.
    pub fn default_test() -> Self {
        Self {
            seed: 0x5EED_0F_B0A7,
            update_interval_ms: 100,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> DashResult<()> {
        fn invalid(field: &'static str, reason: &str) -> DashError {
            DashError::InvalidConfig { field, reason: reason.to_string() }
        }

        if self.update_interval_ms == 0 {
            return Err(invalid("update_interval_ms", "must be > 0"));
        }
        if self.history_capacity == 0 {
            return Err(invalid("history_capacity", "must be > 0"));
        }
        if !(self.carbon_target > 0.0) {
            return Err(invalid("carbon_target", "must be positive"));
        }
        if self.scene.palette.is_empty() {
            return Err(invalid("scene.palette", "must not be empty"));
        }
        if !(self.scene.lattice.stride > 0.0) {
            return Err(invalid("scene.lattice.stride", "must be positive"));
        }
        if !(1..=MAX_STACK_HEIGHT).contains(&self.scene.max_stack_height) {
            return Err(invalid("scene.max_stack_height", "must be in 1..=3"));
        }
        if self.scene.lattice.cells() > MAX_LATTICE_CELLS {
            return Err(invalid("scene.lattice", "columns * rows exceeds 10000"));
        }
        if !(self.camera.orbit_radius > 0.0) {
            return Err(invalid("camera.orbit_radius", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_recognised_options() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.update_interval_ms, 3_000);
        assert_eq!(cfg.carbon_target, 8_500.0);
        assert_eq!(cfg.history_capacity, 24);
        assert_eq!(cfg.scene.crane_offsets, vec![-20.0, -10.0, 0.0, 10.0, 20.0]);
        assert_eq!(cfg.scene.palette.len(), 5);
        assert_eq!(cfg.camera.orbit_radius, 40.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: DashboardConfig =
            serde_json::from_str(r#"{ "update_interval_ms": 500, "scene": { "max_stack_height": 2 } }"#)
                .unwrap();
        assert_eq!(cfg.update_interval_ms, 500);
        assert_eq!(cfg.scene.max_stack_height, 2);
        assert_eq!(cfg.scene.lattice, LatticeConfig::default());
        assert_eq!(cfg.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let mut cfg = DashboardConfig::default_test();
        cfg.update_interval_ms = 0;
        assert!(matches!(
            cfg.validate(),
            Err(DashError::InvalidConfig { field: "update_interval_ms", .. })
        ));

        let mut cfg = DashboardConfig::default_test();
        cfg.scene.palette.clear();
        assert!(matches!(
            cfg.validate(),
            Err(DashError::InvalidConfig { field: "scene.palette", .. })
        ));

        let mut cfg = DashboardConfig::default_test();
        cfg.scene.max_stack_height = u32::MAX;
        assert!(matches!(
            cfg.validate(),
            Err(DashError::InvalidConfig { field: "scene.max_stack_height", .. })
        ));
        cfg.scene.max_stack_height = MAX_STACK_HEIGHT;
        assert!(cfg.validate().is_ok());

        let mut cfg = DashboardConfig::default_test();
        cfg.scene.lattice.columns = u32::MAX;
        cfg.scene.lattice.rows = u32::MAX;
        assert!(matches!(
            cfg.validate(),
            Err(DashError::InvalidConfig { field: "scene.lattice", .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = DashboardConfig::load("/nonexistent/portwatch.json").unwrap_err();
        assert!(matches!(err, DashError::ConfigIo { .. }));
    }
}

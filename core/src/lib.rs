//! portwatch-core: simulated telemetry, update scheduling and the yard
//! scene model behind the port operations dashboard.

pub mod adapters;
pub mod camera;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod history;
pub mod host;
pub mod rng;
pub mod scene;
pub mod scheduler;
pub mod snapshot;
pub mod telemetry;
pub mod types;
pub mod view;

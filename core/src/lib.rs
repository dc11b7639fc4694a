//! Synthetic sales portfolio dashboard: seeded data synthesis, an OLS
//! trend line, a six-panel SVG report and a short textual summary.

pub mod config;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod rng;
pub mod summary;
pub mod trend;
pub mod types;

pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use pipeline::{DashboardPipeline, DashboardRun};

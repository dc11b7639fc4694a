//! The dashboard pipeline.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Data synthesizer   (seeded DatasetRng -> Dataset)
//!   2. Trend estimator    (OLS over the monthly sales index)
//!   3. Panel layout       (Dataset + TrendLine -> six panels)
//!   4. Summary reporter   (Dataset -> five metrics)
//!
//! RULES:
//!   - Data flows strictly downstream; no stage reads a later one.
//!   - All randomness flows through the single DatasetRng built from the seed.
//!   - Rendering is a separate step on the finished run, so a run can be
//!     inspected or tested without touching the filesystem.

use crate::{
    config::{DashboardConfig, RenderConfig},
    dataset::{synthesize, Dataset},
    error::DashboardResult,
    layout::{dashboard_panels, Panel},
    render,
    rng::DatasetRng,
    summary::{Metric, SummaryReport},
    trend::TrendLine,
    types::Seed,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub struct DashboardPipeline {
    config: DashboardConfig,
}

impl DashboardPipeline {
    /// Validates the config up front; a pipeline never starts with bad parameters.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Execute every stage once and return the finished run.
    pub fn run(&self) -> DashboardResult<DashboardRun> {
        let seed = self.config.seed;
        log::info!("pipeline: starting run with seed {seed}");

        let mut rng = DatasetRng::new(seed).with_name("dataset");
        let dataset = synthesize(&self.config.synthesis, &mut rng)?;
        log::info!("pipeline: synthesized dataset");

        let sales: Vec<f64> = dataset.monthly.sales().collect();
        let trend = TrendLine::over_index(&sales)?;
        log::debug!(
            "pipeline: trend slope={:.4} intercept={:.4} r2={:.4}",
            trend.fit.slope,
            trend.fit.intercept,
            trend.r_squared
        );

        let panels = dashboard_panels(&dataset, &trend);
        log::info!("pipeline: laid out {} panels", panels.len());

        let summary = SummaryReport::from_dataset(&dataset);
        log::info!(
            "pipeline: summary ready (top product {}, top region {})",
            summary.most_profitable_product,
            summary.region_with_most_customers
        );

        Ok(DashboardRun {
            seed,
            dataset,
            trend,
            panels,
            summary,
        })
    }
}

/// Everything one pipeline run produced.
pub struct DashboardRun {
    pub seed: Seed,
    pub dataset: Dataset,
    pub trend: TrendLine,
    pub panels: Vec<Panel>,
    pub summary: SummaryReport,
}

impl DashboardRun {
    pub fn render_svg(&self, config: &RenderConfig) -> DashboardResult<String> {
        render::render_svg(&self.panels, config)
    }

    pub fn write_chart(&self, config: &RenderConfig) -> DashboardResult<PathBuf> {
        let path = render::write_svg(&self.panels, config)?;
        log::info!("pipeline: chart written to {}", path.display());
        Ok(path)
    }

    /// Machine-readable view of the run.
    pub fn report(&self, generated_at: DateTime<Utc>) -> RunReport<'_> {
        RunReport {
            seed: self.seed,
            generated_at,
            metrics: self.summary.metrics(),
            trend: &self.trend,
            dataset: &self.dataset,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub seed: Seed,
    pub generated_at: DateTime<Utc>,
    pub metrics: [Metric; 5],
    pub trend: &'a TrendLine,
    pub dataset: &'a Dataset,
}

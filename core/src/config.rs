use crate::{
    error::{DashboardError, DashboardResult},
    types::Seed,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SEED: Seed = 42;

/// Parameters of a normal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

/// Half-open real range [low, high).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub low: f64,
    pub high: f64,
}

/// Half-open integer range [low, high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub low: u32,
    pub high: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub monthly_sales: NormalParams,
    /// Constant monthly sales target.
    pub monthly_target: f64,
    pub product_sales: NormalParams,
    /// Cost as a fraction of product sales.
    pub cost_factor: UniformRange,
    pub customers: IntRange,
    pub satisfaction: UniformRange,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            monthly_sales: NormalParams { mean: 10_000.0, std_dev: 2_000.0 },
            monthly_target: 10_000.0,
            product_sales: NormalParams { mean: 5_000.0, std_dev: 1_000.0 },
            cost_factor: UniformRange { low: 0.4, high: 0.6 },
            customers: IntRange { low: 1_000, high: 3_000 },
            satisfaction: UniformRange { low: 7.0, high: 9.5 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Where the runner writes the SVG document.
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1200,
            title: "Portfólio de Análise de Dados com IA".into(),
            output: PathBuf::from("out/dashboard.svg"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub seed: Seed,
    pub synthesis: SynthesisConfig,
    pub render: RenderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            synthesis: SynthesisConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load a JSON config file. Missing fields fall back to defaults.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, with the chart written under target/ so test runs
    /// never touch the working tree.
    pub fn default_test() -> Self {
        Self {
            render: RenderConfig {
                output: PathBuf::from("target/test_out/dashboard.svg"),
                ..RenderConfig::default()
            },
            ..Self::default()
        }
    }

    /// Reject parameters the synthesizer or renderer cannot honor.
    pub fn validate(&self) -> DashboardResult<()> {
        self.synthesis.validate()?;

        let r = &self.render;
        if r.width == 0 || r.height == 0 {
            return Err(invalid(
                "render",
                format!("canvas must be non-empty, got {}x{}", r.width, r.height),
            ));
        }
        Ok(())
    }
}

impl SynthesisConfig {
    /// Reject distributions and ranges the synthesizer cannot draw from.
    pub fn validate(&self) -> DashboardResult<()> {
        check_normal("synthesis.monthly_sales", self.monthly_sales)?;
        check_normal("synthesis.product_sales", self.product_sales)?;
        check_finite("synthesis.monthly_target", self.monthly_target)?;
        check_range("synthesis.cost_factor", self.cost_factor)?;
        if self.cost_factor.low <= 0.0 || self.cost_factor.high > 1.0 {
            return Err(invalid(
                "synthesis.cost_factor",
                format!(
                    "must lie within (0, 1], got [{}, {})",
                    self.cost_factor.low, self.cost_factor.high
                ),
            ));
        }
        if self.customers.low >= self.customers.high {
            return Err(invalid(
                "synthesis.customers",
                format!("empty range [{}, {})", self.customers.low, self.customers.high),
            ));
        }
        check_range("synthesis.satisfaction", self.satisfaction)
    }
}

fn invalid(field: &'static str, reason: String) -> DashboardError {
    DashboardError::InvalidConfig { field, reason }
}

fn check_finite(field: &'static str, v: f64) -> DashboardResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {v}")))
    }
}

fn check_normal(field: &'static str, p: NormalParams) -> DashboardResult<()> {
    check_finite(field, p.mean)?;
    if !(p.std_dev.is_finite() && p.std_dev > 0.0) {
        return Err(invalid(field, format!("std_dev must be > 0, got {}", p.std_dev)));
    }
    Ok(())
}

fn check_range(field: &'static str, r: UniformRange) -> DashboardResult<()> {
    check_finite(field, r.low)?;
    check_finite(field, r.high)?;
    if r.low >= r.high {
        return Err(invalid(field, format!("empty range [{}, {})", r.low, r.high)));
    }
    Ok(())
}

//! Data synthesizer: the three in-memory tables behind the dashboard.
//!
//! Tables are built once per run and never mutated afterwards.
//! Row counts are fixed by the array types: 12 months, 5 products,
//! 5 regions. Derived columns (product margin) are computed when the
//! row is constructed and cannot drift from their inputs.
//!
//! Draw order (fixed, part of the determinism contract):
//!   1. monthly sales       (12 normal draws)
//!   2. product sales       (5 normal draws)
//!   3. cost factors        (5 uniform draws)
//!   4. customer counts     (5 integer draws)
//!   5. satisfaction scores (5 uniform draws)

use crate::{
    config::SynthesisConfig,
    error::DashboardResult,
    rng::DatasetRng,
    types::{MONTHS, MONTH_COUNT, PRODUCTS, PRODUCT_COUNT, REGIONS, REGION_COUNT},
};
use serde::Serialize;
use std::array;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthRow {
    pub month: &'static str,
    pub sales: f64,
    pub target: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductRow {
    product: &'static str,
    sales: f64,
    cost: f64,
    margin: f64,
}

impl ProductRow {
    pub fn new(product: &'static str, sales: f64, cost: f64) -> Self {
        Self {
            product,
            sales,
            cost,
            margin: compute_margin(sales, cost),
        }
    }

    pub fn product(&self) -> &'static str {
        self.product
    }

    pub fn sales(&self) -> f64 {
        self.sales
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }
}

/// Profit margin of a product: sales minus cost.
pub fn compute_margin(sales: f64, cost: f64) -> f64 {
    sales - cost
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionRow {
    pub region: &'static str,
    pub customers: u32,
    pub satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlySales {
    rows: [MonthRow; MONTH_COUNT],
}

impl MonthlySales {
    pub fn new(rows: [MonthRow; MONTH_COUNT]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MonthRow] {
        &self.rows
    }

    pub fn months(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rows.iter().map(|r| r.month)
    }

    pub fn sales(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.sales)
    }

    pub fn targets(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProductFinancials {
    rows: [ProductRow; PRODUCT_COUNT],
}

impl ProductFinancials {
    pub fn new(rows: [ProductRow; PRODUCT_COUNT]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ProductRow] {
        &self.rows
    }

    pub fn products(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rows.iter().map(|r| r.product)
    }

    pub fn sales(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.sales)
    }

    pub fn margins(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.margin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RegionStats {
    rows: [RegionRow; REGION_COUNT],
}

impl RegionStats {
    pub fn new(rows: [RegionRow; REGION_COUNT]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[RegionRow] {
        &self.rows
    }

    pub fn regions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rows.iter().map(|r| r.region)
    }

    pub fn customers(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().map(|r| r.customers)
    }

    pub fn satisfaction(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.satisfaction)
    }
}

/// The three independent tables of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub monthly: MonthlySales,
    pub products: ProductFinancials,
    pub regions: RegionStats,
}

/// Build all three tables from `rng`, consuming draws in the documented order.
/// The config is validated first; an invalid one consumes no draws.
pub fn synthesize(config: &SynthesisConfig, rng: &mut DatasetRng) -> DashboardResult<Dataset> {
    config.validate()?;

    let monthly = synthesize_monthly(config, rng);
    let products = synthesize_products(config, rng);
    let regions = synthesize_regions(config, rng);

    log::debug!(
        "rng={} synthesized {} months, {} products, {} regions",
        rng.name,
        monthly.rows().len(),
        products.rows().len(),
        regions.rows().len()
    );

    Ok(Dataset { monthly, products, regions })
}

fn synthesize_monthly(config: &SynthesisConfig, rng: &mut DatasetRng) -> MonthlySales {
    let p = config.monthly_sales;
    // array::from_fn fills indices in ascending order, so draws follow calendar order.
    MonthlySales::new(array::from_fn(|i| MonthRow {
        month: MONTHS[i],
        sales: rng.normal(p.mean, p.std_dev),
        target: config.monthly_target,
    }))
}

fn synthesize_products(config: &SynthesisConfig, rng: &mut DatasetRng) -> ProductFinancials {
    let p = config.product_sales;
    let range = config.cost_factor;

    // All sales first, then all cost factors.
    let sales: [f64; PRODUCT_COUNT] = array::from_fn(|_| rng.normal(p.mean, p.std_dev));
    let factors: [f64; PRODUCT_COUNT] = array::from_fn(|_| rng.uniform(range.low, range.high));

    ProductFinancials::new(array::from_fn(|i| {
        ProductRow::new(PRODUCTS[i], sales[i], sales[i] * factors[i])
    }))
}

fn synthesize_regions(config: &SynthesisConfig, rng: &mut DatasetRng) -> RegionStats {
    let customers: [u32; REGION_COUNT] =
        array::from_fn(|_| rng.uniform_int(config.customers.low, config.customers.high));
    let satisfaction: [f64; REGION_COUNT] = array::from_fn(|_| {
        rng.uniform(config.satisfaction.low, config.satisfaction.high)
    });

    RegionStats::new(array::from_fn(|i| RegionRow {
        region: REGIONS[i],
        customers: customers[i],
        satisfaction: satisfaction[i],
    }))
}

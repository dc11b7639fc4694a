//! Shared primitive types and the fixed label sets of the dashboard.

/// Master seed for a single pipeline run.
pub type Seed = u64;

/// Rows in the monthly sales table, one per calendar month.
pub const MONTH_COUNT: usize = 12;

/// Rows in the product table.
pub const PRODUCT_COUNT: usize = 5;

/// Rows in the region table.
pub const REGION_COUNT: usize = 5;

/// Calendar month labels, in calendar order.
pub const MONTHS: [&str; MONTH_COUNT] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

pub const PRODUCTS: [&str; PRODUCT_COUNT] = [
    "Produto A", "Produto B", "Produto C", "Produto D", "Produto E",
];

pub const REGIONS: [&str; REGION_COUNT] = ["Norte", "Sul", "Leste", "Oeste", "Centro"];

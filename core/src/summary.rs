//! Summary reporter: five headline metrics derived from the dataset.

use crate::dataset::Dataset;
use serde::Serialize;
use std::fmt;

pub const LABEL_TOTAL_SALES: &str = "Vendas Totais";
pub const LABEL_AVERAGE_SALES: &str = "Média de Vendas";
pub const LABEL_TOP_PRODUCT: &str = "Produto Mais Rentável";
pub const LABEL_TOP_REGION: &str = "Região com Mais Clientes";
pub const LABEL_AVERAGE_SATISFACTION: &str = "Satisfação Média";

const REPORT_HEADER: &str = "Análises Principais:";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_sales: f64,
    pub average_sales: f64,
    pub most_profitable_product: &'static str,
    pub region_with_most_customers: &'static str,
    pub average_satisfaction: f64,
}

/// One rendered label/value line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

impl SummaryReport {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let sales: Vec<f64> = dataset.monthly.sales().collect();
        let total_sales: f64 = sales.iter().sum();

        let products = dataset.products.rows();
        let top_product = argmax_first(dataset.products.margins())
            .map(|i| products[i].product())
            .unwrap_or_default();

        let regions = dataset.regions.rows();
        let top_region = argmax_first(dataset.regions.customers())
            .map(|i| regions[i].region)
            .unwrap_or_default();

        let satisfaction: Vec<f64> = dataset.regions.satisfaction().collect();

        Self {
            total_sales,
            average_sales: total_sales / sales.len() as f64,
            most_profitable_product: top_product,
            region_with_most_customers: top_region,
            average_satisfaction: satisfaction.iter().sum::<f64>() / satisfaction.len() as f64,
        }
    }

    /// Metrics in report order.
    pub fn metrics(&self) -> [Metric; 5] {
        [
            Metric {
                label: LABEL_TOTAL_SALES,
                value: format_currency(self.total_sales),
            },
            Metric {
                label: LABEL_AVERAGE_SALES,
                value: format_currency(self.average_sales),
            },
            Metric {
                label: LABEL_TOP_PRODUCT,
                value: self.most_profitable_product.to_string(),
            },
            Metric {
                label: LABEL_TOP_REGION,
                value: self.region_with_most_customers.to_string(),
            },
            Metric {
                label: LABEL_AVERAGE_SATISFACTION,
                value: format!("{:.1}/10", self.average_satisfaction),
            },
        ]
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{REPORT_HEADER}")?;
        for m in self.metrics() {
            writeln!(f, "{}: {}", m.label, m.value)?;
        }
        Ok(())
    }
}

/// Index of the largest value; ties go to the first occurrence.
/// NaN never wins a comparison.
pub fn argmax_first<T: PartialOrd>(values: impl IntoIterator<Item = T>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, v) in values.into_iter().enumerate() {
        let wins = match &best {
            None => v.partial_cmp(&v).is_some(),
            Some((_, b)) => v > *b,
        };
        if wins {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// `R$ 12,345.67`: two decimals, comma thousands separators.
pub fn format_currency(amount: f64) -> String {
    format!("R$ {}", format_grouped(amount, 2))
}

/// Fixed-point rendering with comma thousands separators.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, frac) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Negative values keep their sign even when they round to zero ("-0.00").
    let sign = if value.is_sign_negative() && !value.is_nan() { "-" } else { "" };
    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

//! Dashboard layout: a backend-independent description of the six panels.
//!
//! Grid positions are 1-based (row, col) in a 3x2 grid:
//!
//!   (1,1) monthly sales vs target   (1,2) product sales
//!   (2,1) customers per region      (2,2) satisfaction per region
//!   (3,1) margin per product        (3,2) sales with trend line

use crate::{dataset::Dataset, trend::TrendLine};
use std::f64::consts::{FRAC_PI_2, TAU};

pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 2;

pub const LABEL_CURRENCY: &str = "Valor (R$)";
pub const LABEL_MARGIN: &str = "Margem (R$)";
pub const LABEL_SATISFACTION: &str = "Nível de Satisfação";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Line,
    Bar,
    Pie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dashed,
}

/// Named trace colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceColor {
    Blue,
    Gray,
    Purple,
    Orange,
}

/// Categorical palettes; the renderer owns the actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Set2,
    Pastel,
    Bold,
    Dark,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    pub name: &'static str,
    pub values: Vec<f64>,
    pub stroke: Stroke,
    pub color: TraceColor,
    pub markers: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody {
    Line {
        categories: Vec<&'static str>,
        traces: Vec<LineTrace>,
    },
    Bar {
        name: &'static str,
        categories: Vec<&'static str>,
        values: Vec<f64>,
        palette: Palette,
    },
    Pie {
        name: &'static str,
        categories: Vec<&'static str>,
        values: Vec<f64>,
        palette: Palette,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub row: usize,
    pub col: usize,
    pub title: &'static str,
    pub y_label: Option<&'static str>,
    pub body: PanelBody,
}

impl Panel {
    pub fn kind(&self) -> PanelKind {
        match self.body {
            PanelBody::Line { .. } => PanelKind::Line,
            PanelBody::Bar { .. } => PanelKind::Bar,
            PanelBody::Pie { .. } => PanelKind::Pie,
        }
    }

    /// Row-major index into the grid, or None for positions outside it.
    pub fn cell_index(&self) -> Option<usize> {
        if (1..=GRID_ROWS).contains(&self.row) && (1..=GRID_COLS).contains(&self.col) {
            Some((self.row - 1) * GRID_COLS + (self.col - 1))
        } else {
            None
        }
    }
}

/// The six dashboard panels in row-major order.
pub fn dashboard_panels(dataset: &Dataset, trend: &TrendLine) -> Vec<Panel> {
    let months: Vec<&'static str> = dataset.monthly.months().collect();
    let sales: Vec<f64> = dataset.monthly.sales().collect();
    let products: Vec<&'static str> = dataset.products.products().collect();
    let regions: Vec<&'static str> = dataset.regions.regions().collect();

    vec![
        Panel {
            row: 1,
            col: 1,
            title: "Vendas Mensais vs Meta",
            y_label: Some(LABEL_CURRENCY),
            body: PanelBody::Line {
                categories: months.clone(),
                traces: vec![
                    LineTrace {
                        name: "Vendas",
                        values: sales.clone(),
                        stroke: Stroke::Solid,
                        color: TraceColor::Blue,
                        markers: true,
                    },
                    LineTrace {
                        name: "Meta",
                        values: dataset.monthly.targets().collect(),
                        stroke: Stroke::Dashed,
                        color: TraceColor::Gray,
                        markers: false,
                    },
                ],
            },
        },
        Panel {
            row: 1,
            col: 2,
            title: "Análise de Produtos",
            y_label: Some(LABEL_CURRENCY),
            body: PanelBody::Bar {
                name: "Vendas Produtos",
                categories: products.clone(),
                values: dataset.products.sales().collect(),
                palette: Palette::Set2,
            },
        },
        Panel {
            row: 2,
            col: 1,
            title: "Distribuição de Clientes por Região",
            y_label: None,
            body: PanelBody::Pie {
                name: "Clientes por Região",
                categories: regions.clone(),
                values: dataset.regions.customers().map(f64::from).collect(),
                palette: Palette::Pastel,
            },
        },
        Panel {
            row: 2,
            col: 2,
            title: "Satisfação por Região",
            y_label: Some(LABEL_SATISFACTION),
            body: PanelBody::Bar {
                name: "Satisfação",
                categories: regions,
                values: dataset.regions.satisfaction().collect(),
                palette: Palette::Bold,
            },
        },
        Panel {
            row: 3,
            col: 1,
            title: "Margem de Lucro por Produto",
            y_label: Some(LABEL_MARGIN),
            body: PanelBody::Bar {
                name: "Margem de Lucro",
                categories: products,
                values: dataset.products.margins().collect(),
                palette: Palette::Dark,
            },
        },
        Panel {
            row: 3,
            col: 2,
            title: "Tendência de Vendas",
            y_label: Some(LABEL_CURRENCY),
            body: PanelBody::Line {
                categories: months,
                traces: vec![
                    LineTrace {
                        name: "Vendas Mensais",
                        values: sales,
                        stroke: Stroke::Solid,
                        color: TraceColor::Purple,
                        markers: true,
                    },
                    LineTrace {
                        name: "Tendência (IA)",
                        values: trend.predicted.clone(),
                        stroke: Stroke::Dashed,
                        color: TraceColor::Orange,
                        markers: false,
                    },
                ],
            },
        },
    ]
}

/// Split a polyline into dash segments: each step between consecutive
/// points is cut into `2 * dashes_per_step` equal pieces and every other
/// piece is kept, starting with the first.
pub fn dash_segments(points: &[(f64, f64)], dashes_per_step: usize) -> Vec<[(f64, f64); 2]> {
    let pieces = 2 * dashes_per_step.max(1);
    let mut out = Vec::with_capacity(points.len().saturating_sub(1) * pieces / 2);
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let at = |k: usize| {
            let t = k as f64 / pieces as f64;
            (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t)
        };
        for k in (0..pieces).step_by(2) {
            out.push([at(k), at(k + 1)]);
        }
    }
    out
}

/// Angular extent of one pie slice, in radians.
/// Angles start at 12 o'clock and grow clockwise in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub start: f64,
    pub end: f64,
    pub share: f64,
}

impl PieSlice {
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Slices proportional to `values`. Non-positive totals yield no slices.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Vec::new();
    }
    let mut start = -FRAC_PI_2;
    values
        .iter()
        .map(|&v| {
            let share = v / total;
            let end = start + share * TAU;
            let slice = PieSlice { start, end, share };
            start = end;
            slice
        })
        .collect()
}

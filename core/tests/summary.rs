//! Summary reporter tests: metric values, order, labels and tie-breaks.

use dashboard_core::{
    config::SynthesisConfig,
    dataset::{
        synthesize, Dataset, MonthRow, MonthlySales, ProductFinancials, ProductRow, RegionRow,
        RegionStats,
    },
    rng::DatasetRng,
    summary::{format_currency, SummaryReport},
    types::{MONTHS, PRODUCTS, REGIONS},
};

fn fixture(margins: [f64; 5], customers: [u32; 5]) -> Dataset {
    let monthly = MonthlySales::new(std::array::from_fn(|i| MonthRow {
        month: MONTHS[i],
        sales: 1_000.0 * (i as f64 + 1.0),
        target: 10_000.0,
    }));
    // cost = 100, so sales = margin + 100 reproduces the margin exactly.
    let products = ProductFinancials::new(std::array::from_fn(|i| {
        ProductRow::new(PRODUCTS[i], margins[i] + 100.0, 100.0)
    }));
    let regions = RegionStats::new(std::array::from_fn(|i| RegionRow {
        region: REGIONS[i],
        customers: customers[i],
        satisfaction: 7.0 + i as f64 * 0.5,
    }));
    Dataset { monthly, products, regions }
}

#[test]
fn most_profitable_product_prefers_first_of_tied_maxima() {
    let data = fixture([10.0, 50.0, 5.0, 50.0, 1.0], [1000, 1000, 1000, 1000, 1000]);
    let report = SummaryReport::from_dataset(&data);

    assert_eq!(report.most_profitable_product, "Produto B");
}

#[test]
fn region_with_most_customers_prefers_first_of_tied_maxima() {
    let data = fixture([1.0; 5], [1500, 2900, 2000, 2900, 1001]);
    let report = SummaryReport::from_dataset(&data);

    assert_eq!(report.region_with_most_customers, "Sul");
}

#[test]
fn totals_and_averages_from_fixture() {
    let data = fixture([1.0; 5], [1000; 5]);
    let report = SummaryReport::from_dataset(&data);

    // 1000 * (1 + 2 + ... + 12)
    assert_eq!(report.total_sales, 78_000.0);
    assert_eq!(report.average_sales, 6_500.0);
    // 7.0, 7.5, 8.0, 8.5, 9.0
    assert_eq!(report.average_satisfaction, 8.0);

    let metrics = report.metrics();
    assert_eq!(metrics[0].value, "R$ 78,000.00");
    assert_eq!(metrics[1].value, "R$ 6,500.00");
    assert_eq!(metrics[4].value, "8.0/10");
}

#[test]
fn metrics_use_fixed_labels_in_fixed_order() {
    let data = fixture([1.0; 5], [1000; 5]);
    let labels: Vec<&str> = SummaryReport::from_dataset(&data)
        .metrics()
        .iter()
        .map(|m| m.label)
        .collect();

    assert_eq!(
        labels,
        [
            "Vendas Totais",
            "Média de Vendas",
            "Produto Mais Rentável",
            "Região com Mais Clientes",
            "Satisfação Média",
        ]
    );
}

#[test]
fn display_lists_header_then_one_line_per_metric() {
    let data = fixture([3.0, 1.0, 2.0, 0.0, 0.5], [1000, 1000, 2500, 1000, 1000]);
    let text = SummaryReport::from_dataset(&data).to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "Análises Principais:");
    assert_eq!(lines[2], "Vendas Totais: R$ 78,000.00");
    assert_eq!(lines[3], "Média de Vendas: R$ 6,500.00");
    assert_eq!(lines[4], "Produto Mais Rentável: Produto A");
    assert_eq!(lines[5], "Região com Mais Clientes: Leste");
    assert_eq!(lines[6], "Satisfação Média: 8.0/10");
    assert_eq!(lines.len(), 7);
}

#[test]
fn total_sales_matches_formatted_sum_of_generated_values() {
    let mut rng = DatasetRng::new(42);
    let data = synthesize(&SynthesisConfig::default(), &mut rng).expect("valid config");
    let sum: f64 = data.monthly.sales().sum();

    let report = SummaryReport::from_dataset(&data);
    let total = &report.metrics()[0].value;

    assert_eq!(total, &format_currency(sum));
    assert!(total.starts_with("R$ "));
    let (whole, cents) = total["R$ ".len()..].split_once('.').expect("decimal point");
    assert_eq!(cents.len(), 2);
    assert!(whole.contains(','), "expected thousands separator in {total}");
}

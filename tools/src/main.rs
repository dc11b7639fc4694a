//! dashboard-runner: headless runner for the sales portfolio dashboard.
//!
//! Usage:
//!   dashboard-runner
//!   dashboard-runner --seed 7 --out reports/dashboard.svg
//!   dashboard-runner --config dashboard.json --json

use anyhow::{Context, Result};
use dashboard_core::{DashboardConfig, DashboardPipeline};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config = match flag_value(&args, "--config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(seed) = parse_arg::<u64>(&args, "--seed")? {
        config.seed = seed;
    }
    if let Some(out) = flag_value(&args, "--out") {
        config.render.output = PathBuf::from(out);
    }
    let emit_json = args.iter().any(|a| a == "--json");

    let pipeline = DashboardPipeline::new(config).context("invalid dashboard config")?;
    log::info!(
        "dashboard-runner: seed {} -> {}",
        pipeline.config().seed,
        pipeline.config().render.output.display()
    );
    let run = pipeline.run().context("dashboard pipeline failed")?;

    let render = &pipeline.config().render;
    run.write_chart(render)
        .with_context(|| format!("failed to write chart to {}", render.output.display()))?;

    print!("{}", run.summary);

    if emit_json {
        let report = run.report(chrono::Utc::now());
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    flag_value(args, flag)
        .map(|raw| {
            raw.parse::<T>()
                .with_context(|| format!("invalid value for {flag}: {raw}"))
        })
        .transpose()
}

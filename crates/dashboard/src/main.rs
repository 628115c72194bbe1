use anyhow::Context;

use atelier_dashboard::{Dashboard, DashboardConfig, SeedData};

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env().context("invalid configuration")?;
    atelier_observability::init_with(config.log_format);

    let seed = match &config.seed_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading seed file");
            SeedData::from_file(path)?
        }
        None => SeedData::builtin(),
    };
    let dashboard = Dashboard::from_seed(seed).context("failed to load seed data")?;

    let report = dashboard.report(&config.search);
    tracing::info!(
        matches = report.products.len(),
        low_stock = report.summary.low_stock,
        monthly_costs = %report.costs.monthly_total,
        "report built"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

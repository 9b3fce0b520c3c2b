use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use retc_model::{FilterCriteria, Selection, YearRange};
use retc_store::{BoundaryRepository, DbConfig, EmissionsRepository};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retc")]
#[command(about = "Emission indicators for Chilean regions (2005-2023)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the four dashboard view payloads for the given filters
    Report(ReportArgs),
    /// Emit the distinct filter values present in the data
    Options,
}

#[derive(Args)]
struct ReportArgs {
    /// Path to the regional boundary GeoJSON file
    #[arg(long, default_value = "Regional.geojson")]
    geojson: PathBuf,

    /// Restrict to one rubro (industrial category)
    #[arg(long)]
    rubro: Option<String>,

    /// Restrict to one pollutant
    #[arg(long)]
    contaminante: Option<String>,

    /// Restrict to one canonical region name
    #[arg(long)]
    region: Option<String>,

    /// First year of the reporting window (only applied together with --anio-max)
    #[arg(long)]
    anio_min: Option<i32>,

    /// Last year of the reporting window (only applied together with --anio-min)
    #[arg(long)]
    anio_max: Option<i32>,
}

/// Everything the four renderers need, in one document.
#[derive(Serialize)]
struct ReportPayload {
    by_region: retc_query::BarsView,
    by_category: retc_query::BarsView,
    heatmap: retc_query::HeatmapView,
    choropleth: retc_query::ChoroplethView,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = DbConfig::from_env().context("Database configuration incomplete")?;
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&config.url())
        .await
        .context("Cannot connect to the emissions database")?;
    let emissions = EmissionsRepository::new(pool);

    match cli.command {
        Commands::Report(args) => report(&emissions, &args).await,
        Commands::Options => options(&emissions).await,
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

async fn report(emissions: &EmissionsRepository, args: &ReportArgs) -> Result<()> {
    let records = emissions.load().await?;
    let boundaries = BoundaryRepository::new(&args.geojson)
        .load()
        .await
        .with_context(|| format!("Cannot load boundaries from {}", args.geojson.display()))?;

    let criteria = FilterCriteria {
        category: selection(args.rubro.clone()),
        pollutant: selection(args.contaminante.clone()),
        region: selection(args.region.clone()),
        years: YearRange::from_bounds(args.anio_min, args.anio_max),
    };
    let filtered = retc_query::filter_records(&records, &criteria);
    if filtered.is_empty() {
        log::warn!("No records match the selected filters");
    }

    let payload = ReportPayload {
        by_region: retc_query::bars_by_region(&filtered),
        by_category: retc_query::bars_by_category(&filtered),
        heatmap: retc_query::heatmap(&filtered),
        choropleth: retc_query::choropleth(&filtered, &boundaries),
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

async fn options(emissions: &EmissionsRepository) -> Result<()> {
    let records = emissions.load().await?;
    let payload = retc_query::filter_options(&records);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Widget layers send "Todos" for an unrestricted dropdown; map it (and
/// absence) onto the typed no-op before the core ever sees a sentinel.
fn selection(value: Option<String>) -> Selection {
    match value {
        Some(v) if v != "Todos" => Selection::One(v),
        _ => Selection::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_sentinel_flags_mean_all() {
        assert_eq!(selection(None), Selection::All);
        assert_eq!(selection(Some("Todos".to_string())), Selection::All);
        assert_eq!(
            selection(Some("Minería".to_string())),
            Selection::One("Minería".to_string())
        );
    }
}

//! Headless portfolio report: load, filter, print metrics and breakdowns, optionally export.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use emcali_portfolio::config::DashboardConfig;
use emcali_portfolio::dashboard::DashboardView;
use emcali_portfolio::export::{write_exports, ExportFormat};
use emcali_portfolio::ingestion::{CsvFileSource, LogObserver, TableSource};
use emcali_portfolio::processing::{distinct_values, FilterSelection, ValueCount};
use emcali_portfolio::types::Column;

#[derive(Debug, Parser)]
#[command(name = "portfolio_report", about = "Reporte del portafolio de proyectos EMCALI")]
struct Args {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV URL to fetch instead of the configured worksheet.
    #[arg(long, conflicts_with = "csv")]
    url: Option<String>,

    /// Read a local CSV file instead of fetching.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Keep only these management units (repeatable; default: all).
    #[arg(long = "gerencia")]
    gerencias: Vec<String>,

    /// Keep only these services (repeatable; default: all).
    #[arg(long = "servicio")]
    servicios: Vec<String>,

    /// Keep only these statuses (repeatable; default: all).
    #[arg(long = "estado")]
    estados: Vec<String>,

    /// Print the view as JSON.
    #[arg(long)]
    json: bool,

    /// Write proyectos_emcali.xlsx and proyectos_emcali.csv into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(url) = &args.url {
        config.url = Some(url.clone());
    }

    let source: Box<dyn TableSource> = match &args.csv {
        Some(path) => Box::new(CsvFileSource::new(path)),
        None => Box::new(config.http_source()),
    };
    let options = config.load_options(Some(Arc::new(LogObserver)));
    let cache = config.snapshot_cache();
    let snapshot = cache.get_or_load(source.as_ref(), &options);

    if let Some(warning) = snapshot.warning() {
        eprintln!("⚠ {warning}");
    }

    let table = snapshot.table();
    let mut selection = FilterSelection::all(table);
    for (column, wanted) in [
        (Column::Gerencias, &args.gerencias),
        (Column::Servicios, &args.servicios),
        (Column::Estado, &args.estados),
    ] {
        if !wanted.is_empty() {
            selection = selection.with_values(column, wanted.iter().cloned());
        }
    }

    let view = DashboardView::build(table, &selection);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_report(&view, table);
    }

    if let Some(dir) = &args.out_dir {
        let written = write_exports(&view.filtered, dir)
            .with_context(|| format!("writing exports to {}", dir.display()))?;
        for (path, format) in written.iter().zip(ExportFormat::ALL) {
            println!("exportado: {} ({})", path.display(), format.mime_type());
        }
    }

    Ok(())
}

fn print_report(view: &DashboardView, table: &emcali_portfolio::types::ProjectTable) {
    println!("Dashboard Portafolio de Proyectos EMCALI");
    println!();
    println!("Total Proyectos   {}", view.metrics.total);
    println!("En Ejecución      {}", view.metrics.en_ejecucion);
    println!("Proyectos CAPEX   {}", view.metrics.capex);
    println!("Proyectos OPEX    {}", view.metrics.opex);

    print_counts("Distribución de Proyectos por Estado", &view.by_estado);
    print_counts("Distribución de Proyectos por Servicio", &view.by_servicio);
    print_counts("Distribución de Proyectos por Gerencia", &view.by_gerencia);

    println!();
    println!(
        "Gerencias disponibles: {}",
        distinct_values(table, Column::Gerencias).join(", ")
    );
}

fn print_counts(title: &str, counts: &[ValueCount]) {
    println!();
    println!("{title}");
    let width = counts.iter().map(|c| c.value.chars().count()).max().unwrap_or(0);
    for c in counts {
        let label = if c.value.is_empty() { "(vacío)" } else { c.value.as_str() };
        println!("  {label:<width$}  {}", c.count);
    }
}

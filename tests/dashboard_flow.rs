use std::time::Duration;

use emcali_portfolio::dashboard::DashboardView;
use emcali_portfolio::error::DataUnavailable;
use emcali_portfolio::export::{to_csv_bytes, ExportFormat};
use emcali_portfolio::ingestion::{load_or_empty, load_table, CsvFileSource, HttpSheetSource, LoadOptions};
use emcali_portfolio::processing::{filter, summarize, value_counts, CountOrder, FilterSelection, SummaryMetrics, ValueCount};
use emcali_portfolio::snapshot::SnapshotCache;
use emcali_portfolio::types::{Column, ProjectRecord, ProjectTable, Schema};

fn two_row_table() -> ProjectTable {
    ProjectTable::new(
        Schema::required(),
        vec![
            ProjectRecord::new("A", "X", "EN EJECUCIÓN", "CAPEX"),
            ProjectRecord::new("B", "Y", "CERRADO", "OPEX"),
        ],
    )
}

fn unreachable_options() -> LoadOptions {
    LoadOptions {
        timeout: Duration::from_secs(2),
        ..Default::default()
    }
}

#[test]
fn selecting_one_gerencia_filters_and_summarizes() {
    let table = two_row_table();
    let sel = FilterSelection::all(&table).with_values(Column::Gerencias, ["A"]);

    let filtered = filter(&table, &sel);
    assert_eq!(filtered.row_count(), 1);
    assert_eq!(
        summarize(&filtered),
        SummaryMetrics {
            total: 1,
            en_ejecucion: 1,
            capex: 1,
            opex: 0,
        }
    );
}

#[test]
fn servicios_value_counts_on_two_rows() {
    let counts = value_counts(&two_row_table(), Column::Servicios, CountOrder::FirstSeen);
    assert_eq!(counts, vec![ValueCount::new("X", 1), ValueCount::new("Y", 1)]);
}

#[test]
fn fixture_dashboard_with_default_selection() {
    let outcome = load_or_empty(&CsvFileSource::new("tests/fixtures/proyectos.csv"), &LoadOptions::default());
    assert!(!outcome.is_degraded());

    let table = outcome.table;
    let view = DashboardView::build(&table, &FilterSelection::all(&table));

    assert_eq!(view.filtered, table);
    assert_eq!(
        view.metrics,
        SummaryMetrics {
            total: 6,
            en_ejecucion: 3,
            capex: 3,
            opex: 3,
        }
    );
    assert_eq!(view.by_estado[0], ValueCount::new("EN EJECUCIÓN", 3));
    assert_eq!(view.by_gerencia[0], ValueCount::new("Gerencia de Energía", 3));
    assert_eq!(view.by_servicio[0], ValueCount::new("Energía", 2));
}

#[test]
fn fixture_dashboard_with_narrowed_selection() {
    let table = emcali_portfolio::ingestion::csv::load_csv_from_path("tests/fixtures/proyectos.csv").unwrap();
    let sel = FilterSelection::all(&table)
        .with_values(Column::Gerencias, ["Gerencia de Energía", "Gerencia de Acueducto"])
        .with_values(Column::Estado, ["EN EJECUCIÓN"]);
    let view = DashboardView::build(&table, &sel);

    assert_eq!(view.metrics.total, 3);
    assert_eq!(view.metrics.en_ejecucion, 3);
    assert_eq!((view.metrics.capex, view.metrics.opex), (2, 1));

    let csv = String::from_utf8(to_csv_bytes(&view.filtered).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("ID,GERENCIAS,SERVICIOS,NOMBRE DEL PROYECTO,ESTADO,CAPEX / OPEX,VALOR\n"));
}

#[test]
fn unreachable_url_degrades_without_crashing() {
    let source = HttpSheetSource::from_url("http://127.0.0.1:1/proyectos.csv");

    let err = load_table(&source, &unreachable_options()).unwrap_err();
    assert!(matches!(err, DataUnavailable::Http(_) | DataUnavailable::Status { .. }));

    let outcome = load_or_empty(&source, &unreachable_options());
    assert!(outcome.is_degraded());

    let view = DashboardView::build(&outcome.table, &FilterSelection::all(&outcome.table));
    assert_eq!(view.metrics.total, 0);

    let csv = ExportFormat::Csv.to_bytes(&view.filtered).unwrap();
    assert_eq!(csv, b"GERENCIAS,SERVICIOS,ESTADO,CAPEX / OPEX\n".to_vec());
    assert!(!ExportFormat::Xlsx.to_bytes(&view.filtered).unwrap().is_empty());
}

#[test]
fn snapshot_cache_serves_fixture_until_invalidated() {
    let cache = SnapshotCache::new(Duration::from_secs(3600));
    let source = CsvFileSource::new("tests/fixtures/proyectos.csv");
    let opts = LoadOptions::default();

    let snap = cache.get_or_load(&source, &opts);
    assert_eq!(snap.table().row_count(), 6);
    assert!(snap.warning().is_none());
    assert!(std::sync::Arc::ptr_eq(&snap, &cache.get_or_load(&source, &opts)));

    cache.invalidate();
    let reloaded = cache.get_or_load(&source, &opts);
    assert!(!std::sync::Arc::ptr_eq(&snap, &reloaded));
    assert_eq!(reloaded.table(), snap.table());
}

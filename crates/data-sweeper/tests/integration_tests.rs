//! Integration tests for the file cleaning pipeline.
//!
//! These tests verify end-to-end behavior on in-memory uploads: load,
//! statistics, imputation, export, and per-file failure isolation.

use data_sweeper::{
    ExportFormat, FileUpload, StatisticalImputer, SweepConfig, Sweeper, TableExporter, TableLoader,
    TableProfiler, ReportDocument, ReportService, Table,
};
use polars::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// Helper Functions
// ============================================================================

const MIXED_CSV: &str = "age,city\n25,NY\n,LA\n30,\n";

fn csv_upload(name: &str, content: &str) -> FileUpload {
    FileUpload::new(name, content.as_bytes().to_vec())
}

fn build_sweeper(clean: bool, format: ExportFormat) -> Sweeper {
    Sweeper::builder()
        .config(
            SweepConfig::builder()
                .impute_missing(clean)
                .export_format(format)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn f64_at(df: &DataFrame, col: &str, idx: usize) -> f64 {
    df.column(col)
        .unwrap()
        .get(idx)
        .unwrap()
        .try_extract::<f64>()
        .unwrap()
}

fn str_at(df: &DataFrame, col: &str, idx: usize) -> Option<String> {
    df.column(col)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .get(idx)
        .map(|s| s.to_string())
}

// ============================================================================
// Statistics Properties
// ============================================================================

#[test]
fn test_statistics_match_table_shape() {
    let table = TableLoader::default()
        .load(MIXED_CSV.as_bytes(), "data.csv")
        .unwrap();
    let summary = TableProfiler::summarize(&table);

    assert_eq!(summary.row_count, table.height());
    assert_eq!(summary.column_count, table.width());
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.column_count, 2);
}

#[test]
fn test_statistics_only_report_columns_with_missing_cells() {
    let table = TableLoader::default()
        .load(b"a,b,c\n1,x,\n2,y,\n", "data.csv")
        .unwrap();
    let summary = TableProfiler::summarize(&table);

    // a and b are complete, only c shows up
    assert_eq!(summary.missing.len(), 1);
    assert_eq!(summary.missing[0].column, "c");
    assert_eq!(summary.missing[0].count, 2);
}

#[test]
fn test_outcome_carries_column_profiles() {
    let sweeper = build_sweeper(false, ExportFormat::Csv);
    let outcome = sweeper
        .process_file(&csv_upload("data.csv", MIXED_CSV))
        .unwrap();

    assert_eq!(outcome.column_profiles.len(), 2);
    let age = &outcome.column_profiles[0];
    assert_eq!(age.name, "age");
    assert_eq!(age.null_count, 1);
    assert!((age.null_percentage - 33.333).abs() < 0.01);
}

// ============================================================================
// Imputation Properties
// ============================================================================

#[test]
fn test_impute_is_identity_on_complete_table() {
    let table = TableLoader::default()
        .load(b"age,city\n25,NY\n30,LA\n", "data.csv")
        .unwrap();

    let outcome = StatisticalImputer::impute(&table).unwrap();
    assert!(outcome.table.dataframe().equals_missing(table.dataframe()));
    assert!(outcome.actions.is_empty());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_impute_mean_and_mode_scenario() {
    // age: mean of [25, 30] = 27.5; city: "NY" and "LA" tie, first wins
    let sweeper = build_sweeper(true, ExportFormat::Csv);
    let outcome = sweeper
        .process_file(&csv_upload("data.csv", MIXED_CSV))
        .unwrap();

    let artifact = outcome.artifact.unwrap();
    let cleaned = TableLoader::default()
        .load(&artifact.bytes, &artifact.file_name)
        .unwrap();
    let df = cleaned.dataframe();

    assert_eq!(f64_at(df, "age", 0), 25.0);
    assert_eq!(f64_at(df, "age", 1), 27.5);
    assert_eq!(f64_at(df, "age", 2), 30.0);

    assert_eq!(str_at(df, "city", 0).as_deref(), Some("NY"));
    assert_eq!(str_at(df, "city", 1).as_deref(), Some("LA"));
    assert_eq!(str_at(df, "city", 2).as_deref(), Some("NY"));

    assert_eq!(outcome.imputation_actions.len(), 2);
}

#[test]
fn test_impute_skips_entirely_missing_column() {
    let sweeper = build_sweeper(true, ExportFormat::Csv);
    let outcome = sweeper
        .process_file(&csv_upload("data.csv", "a,b\n1,\n2,\n"))
        .unwrap();

    assert_eq!(outcome.skipped_columns, vec!["b"]);

    // The skipped column is still empty in the export
    let artifact = outcome.artifact.unwrap();
    let reloaded = TableLoader::default()
        .load(&artifact.bytes, &artifact.file_name)
        .unwrap();
    assert_eq!(reloaded.dataframe().column("b").unwrap().null_count(), 2);
}

#[test]
fn test_impute_entirely_missing_numeric_column_left_unchanged() {
    let df = df![
        "empty" => [Option::<f64>::None, None, None],
    ]
    .unwrap();
    let table = Table::from_dataframe(df).unwrap();

    let outcome = StatisticalImputer::impute(&table).unwrap();
    assert_eq!(outcome.skipped, vec!["empty"]);
    assert_eq!(
        outcome.table.dataframe().column("empty").unwrap().null_count(),
        3
    );
}

// ============================================================================
// Export & Round-Trip
// ============================================================================

#[test]
fn test_csv_round_trip_preserves_table() {
    let table = TableLoader::default()
        .load(MIXED_CSV.as_bytes(), "data.csv")
        .unwrap();

    let artifact = TableExporter::export(&table, ExportFormat::Csv, "data.csv").unwrap();
    let reloaded = TableLoader::default()
        .load(&artifact.bytes, &artifact.file_name)
        .unwrap();

    assert_eq!(reloaded.column_names(), table.column_names());
    assert_eq!(reloaded.height(), table.height());

    let df = reloaded.dataframe();
    assert_eq!(f64_at(df, "age", 0), 25.0);
    assert_eq!(df.column("age").unwrap().null_count(), 1);
    assert_eq!(str_at(df, "city", 1).as_deref(), Some("LA"));
    assert_eq!(df.column("city").unwrap().null_count(), 1);
}

#[test]
fn test_xlsx_round_trip_preserves_table() {
    let table = TableLoader::default()
        .load(MIXED_CSV.as_bytes(), "data.csv")
        .unwrap();

    let artifact = TableExporter::export(&table, ExportFormat::Excel, "data.csv").unwrap();
    assert_eq!(artifact.file_name, "data.xlsx");

    let reloaded = TableLoader::default()
        .load(&artifact.bytes, &artifact.file_name)
        .unwrap();

    assert_eq!(reloaded.column_names(), table.column_names());
    assert_eq!(reloaded.height(), 3);

    let df = reloaded.dataframe();
    assert_eq!(f64_at(df, "age", 0), 25.0);
    assert_eq!(f64_at(df, "age", 2), 30.0);
    assert_eq!(df.column("age").unwrap().null_count(), 1);
    assert_eq!(str_at(df, "city", 0).as_deref(), Some("NY"));
    assert_eq!(str_at(df, "city", 2), None);
}

#[test]
fn test_excel_artifact_name_and_mime_regardless_of_input_extension() {
    let sweeper = build_sweeper(false, ExportFormat::Excel);
    let outcome = sweeper
        .process_file(&csv_upload("upload.csv", MIXED_CSV))
        .unwrap();

    let artifact = outcome.artifact.unwrap();
    assert!(artifact.file_name.ends_with(".xlsx"));
    assert_eq!(artifact.file_name, "upload.xlsx");
    assert_eq!(
        artifact.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[test]
fn test_csv_artifact_name_and_mime() {
    let sweeper = build_sweeper(false, ExportFormat::Csv);
    let outcome = sweeper
        .process_file(&csv_upload("upload.csv", MIXED_CSV))
        .unwrap();

    let artifact = outcome.artifact.unwrap();
    assert_eq!(artifact.file_name, "upload.csv");
    assert_eq!(artifact.mime_type, "text/csv");
}

// ============================================================================
// Per-File Failure Isolation
// ============================================================================

#[test]
fn test_unsupported_extension_yields_no_table() {
    let sweeper = build_sweeper(false, ExportFormat::Csv);
    let err = sweeper
        .process_file(&csv_upload("data.txt", "age,city\n25,NY\n"))
        .unwrap_err();

    assert!(err.is_unsupported_format());
}

#[test]
fn test_batch_continues_after_unsupported_file() {
    let sweeper = build_sweeper(false, ExportFormat::Csv);
    let uploads = vec![
        csv_upload("data.txt", "not,tabular\n"),
        csv_upload("good.csv", MIXED_CSV),
    ];

    let outcomes = sweeper.process_files(&uploads);
    assert_eq!(outcomes.len(), 2);

    assert!(!outcomes[0].is_success());
    assert_eq!(outcomes[0].error_code, Some("UNSUPPORTED_FORMAT"));
    assert!(outcomes[0].artifact.is_none());

    assert!(outcomes[1].is_success());
    assert!(outcomes[1].artifact.is_some());
    assert_eq!(outcomes[1].summary.as_ref().unwrap().row_count, 3);
}

#[test]
fn test_batch_continues_after_parse_failure() {
    let sweeper = build_sweeper(false, ExportFormat::Csv);
    let uploads = vec![
        csv_upload("broken.csv", "a,b\n1,2,3,4\n"),
        csv_upload("good.csv", MIXED_CSV),
    ];

    let outcomes = sweeper.process_files(&uploads);
    assert_eq!(outcomes[0].error_code, Some("PARSE_ERROR"));
    assert!(outcomes[1].is_success());
}

// ============================================================================
// Report Service Boundary
// ============================================================================

struct CountingReportService {
    calls: AtomicUsize,
}

impl ReportService for CountingReportService {
    fn generate(&self, table: &Table) -> data_sweeper::Result<ReportDocument> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ReportDocument::new(serde_json::json!({
            "rows": table.height(),
        })))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn test_report_service_is_invoked_per_file() {
    let service = Arc::new(CountingReportService {
        calls: AtomicUsize::new(0),
    });

    let sweeper = Sweeper::builder()
        .config(SweepConfig::builder().build().unwrap())
        .report_service(service.clone())
        .build()
        .unwrap();

    let outcome = sweeper
        .process_file(&csv_upload("data.csv", MIXED_CSV))
        .unwrap();

    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    let report = outcome.report.unwrap();
    assert_eq!(report.into_inner()["rows"], 3);
}

struct FailingReportService;

impl ReportService for FailingReportService {
    fn generate(&self, _table: &Table) -> data_sweeper::Result<ReportDocument> {
        Err(data_sweeper::SweeperError::ColumnNotFound(
            "whatever".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[test]
fn test_failing_report_service_does_not_block_file() {
    let sweeper = Sweeper::builder()
        .report_service(Arc::new(FailingReportService))
        .build()
        .unwrap();

    let outcome = sweeper
        .process_file(&csv_upload("data.csv", MIXED_CSV))
        .unwrap();

    assert!(outcome.report.is_none());
    assert!(outcome.artifact.is_some());
}

// ============================================================================
// XLSX Ingestion
// ============================================================================

#[test]
fn test_xlsx_upload_through_full_pipeline() {
    // Build a workbook with the exporter, then run it through the sweeper
    // as an uploaded .xlsx file.
    let table = TableLoader::default()
        .load(MIXED_CSV.as_bytes(), "data.csv")
        .unwrap();
    let workbook = TableExporter::export(&table, ExportFormat::Excel, "data.csv").unwrap();

    let sweeper = build_sweeper(true, ExportFormat::Csv);
    let outcome = sweeper
        .process_file(&FileUpload::new("data.xlsx", workbook.bytes))
        .unwrap();

    let summary = outcome.summary.unwrap();
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.column_count, 2);
    assert_eq!(summary.missing.len(), 2);

    // Cleaned and re-exported as CSV
    let artifact = outcome.artifact.unwrap();
    assert_eq!(artifact.file_name, "data.csv");
    let cleaned = TableLoader::default()
        .load(&artifact.bytes, &artifact.file_name)
        .unwrap();
    assert_eq!(f64_at(cleaned.dataframe(), "age", 1), 27.5);
    assert_eq!(str_at(cleaned.dataframe(), "city", 2).as_deref(), Some("NY"));
}

#[test]
fn test_uppercase_extensions_accepted() {
    let sweeper = build_sweeper(false, ExportFormat::Csv);
    let outcome = sweeper
        .process_file(&csv_upload("DATA.CSV", MIXED_CSV))
        .unwrap();
    assert!(outcome.is_success());
}

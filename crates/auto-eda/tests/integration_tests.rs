//! Integration tests for the EDA engine.
//!
//! These tests drive the public API end to end, from CSV bytes to the
//! render plan.

use auto_eda::render::titles;
use auto_eda::{
    ChartOutcome, CleaningOp, ColumnKind, ColumnPartition, DataCleaner, DataProfiler, EdaConfig,
    EdaError, MissingEntry, MissingReport, Picker, RenderPlan, SectionBody, SelectionState,
    Session, Table, ToggleState, read_csv, read_csv_file, render,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(filename: &str) -> Table {
    read_csv_file(fixtures_path().join(filename), &EdaConfig::default())
        .expect("Failed to read fixture")
}

fn load_inline(csv: &str) -> Table {
    read_csv(csv.as_bytes(), "inline.csv", &EdaConfig::default()).expect("Failed to parse CSV")
}

fn numeric_column(table: &Table, name: &str) -> Vec<Option<f64>> {
    auto_eda::utils::f64_values(
        table
            .df()
            .column(name)
            .expect("column exists")
            .as_materialized_series(),
    )
    .expect("numeric column")
}

fn render_default(table: &Table, toggles: &ToggleState) -> RenderPlan {
    render(
        table,
        toggles,
        &SelectionState::new(),
        &EdaConfig::default(),
    )
    .expect("render succeeds")
}

fn body<'a>(plan: &'a RenderPlan, title: &str) -> &'a SectionBody {
    &plan
        .section(title)
        .unwrap_or_else(|| panic!("section '{}' missing", title))
        .body
}

fn large_numeric_csv(rows: usize) -> String {
    let mut csv = String::from("a,b,c\n");
    for i in 0..rows {
        csv.push_str(&format!("{},{},{}\n", i, i * 3 % 17, (i as f64) * 0.5));
    }
    csv
}

// ============================================================================
// Profiling
// ============================================================================

#[test]
fn test_profile_people_fixture() {
    let table = load_fixture("people.csv");

    assert_eq!(DataProfiler::shape(&table), (6, 5));

    let kinds: Vec<(String, ColumnKind)> = DataProfiler::dtypes(&table)
        .into_iter()
        .map(|c| (c.name, c.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("name".to_string(), ColumnKind::Categorical),
            ("age".to_string(), ColumnKind::Numeric),
            ("city".to_string(), ColumnKind::Categorical),
            ("income".to_string(), ColumnKind::Numeric),
            ("member".to_string(), ColumnKind::Categorical),
        ]
    );
}

#[test]
fn test_missing_report_counts_and_order() {
    let table = load_fixture("people.csv");

    assert_eq!(
        DataProfiler::missing_report(&table),
        MissingReport::Columns(vec![
            MissingEntry { column: "age".to_string(), count: 2 },
            MissingEntry { column: "city".to_string(), count: 1 },
            MissingEntry { column: "income".to_string(), count: 1 },
        ])
    );
}

#[test]
fn test_describe_numeric_and_categorical() {
    let table = load_fixture("people.csv");
    let rows = DataProfiler::describe(&table).unwrap();

    let age = rows.iter().find(|r| r.column == "age").unwrap();
    assert_eq!(age.count, 4);
    assert_eq!(age.mean, Some(35.5));
    assert_eq!(age.min, Some(29.0));
    assert_eq!(age.median, Some(36.0));
    assert_eq!(age.max, Some(41.0));
    assert!((age.std.unwrap() - 27.0f64.sqrt()).abs() < 1e-9);
    assert_eq!(age.top, None);

    let city = rows.iter().find(|r| r.column == "city").unwrap();
    assert_eq!(city.count, 5);
    assert_eq!(city.unique, Some(3));
    assert_eq!(city.top.as_deref(), Some("Paris"));
    assert_eq!(city.freq, Some(3));
    assert_eq!(city.mean, None);
}

// ============================================================================
// Cleaning
// ============================================================================

#[test]
fn test_drop_missing_is_idempotent() {
    let table = load_fixture("people.csv");
    let once = DataCleaner::drop_missing(&table).unwrap();
    let twice = DataCleaner::drop_missing(&once).unwrap();

    assert_eq!(once.height(), 2);
    assert!(once.df().equals_missing(twice.df()));
    assert_eq!(DataProfiler::missing_report(&once), MissingReport::Empty);
}

#[test]
fn test_impute_mean_sequence() {
    let table = load_fixture("impute_sequence.csv");
    let imputed = DataCleaner::impute_mean(&table).unwrap();

    assert_eq!(
        numeric_column(&imputed, "v"),
        vec![Some(1.0), Some(3.0), Some(3.0), Some(3.0), Some(5.0)]
    );
}

#[test]
fn test_impute_mean_keeps_categorical_gaps() {
    let table = load_fixture("people.csv");
    let imputed = DataCleaner::impute_mean(&table).unwrap();

    assert_eq!(
        DataProfiler::missing_report(&imputed),
        MissingReport::Columns(vec![MissingEntry { column: "city".to_string(), count: 1 }])
    );
    assert_eq!(numeric_column(&imputed, "age")[1], Some(35.5));
}

#[test]
fn test_cleaning_order_changes_result() {
    let table = load_inline("v,w\n1,a\n,b\n3,\n,d\n");

    let drop_first = DataCleaner::apply(
        &table,
        &ToggleState::from_order([CleaningOp::DropMissing, CleaningOp::ImputeMean]),
    )
    .unwrap();
    let impute_first = DataCleaner::apply(
        &table,
        &ToggleState::from_order([CleaningOp::ImputeMean, CleaningOp::DropMissing]),
    )
    .unwrap();

    assert_eq!(numeric_column(&drop_first.table, "v"), vec![Some(1.0)]);
    assert_eq!(
        numeric_column(&impute_first.table, "v"),
        vec![Some(1.0), Some(2.0), Some(2.0)]
    );
}

// ============================================================================
// Charts
// ============================================================================

#[test]
fn test_single_numeric_column_dashboard() {
    let table = load_fixture("single_numeric.csv");
    let plan = render_default(&table, &ToggleState::new());

    let SectionBody::Heatmap(heatmap) = body(&plan, titles::HEATMAP) else {
        panic!("wrong heatmap body");
    };
    assert_eq!(
        heatmap.message(),
        Some("Not enough numerical columns for correlation heatmap.")
    );

    let SectionBody::CategoryCounts(counts) = body(&plan, titles::CATEGORICAL) else {
        panic!("wrong categorical body");
    };
    assert_eq!(
        counts.message(),
        Some("No categorical columns available for analysis.")
    );

    let SectionBody::Pairwise(pairwise) = body(&plan, titles::PAIRWISE) else {
        panic!("wrong pairwise body");
    };
    assert!(!pairwise.is_ready());

    let SectionBody::Distribution(distribution) = body(&plan, titles::DISTRIBUTION) else {
        panic!("wrong distribution body");
    };
    assert_eq!(distribution.chart().unwrap().column, "value");

    let SectionBody::Outliers(outliers) = body(&plan, titles::OUTLIERS) else {
        panic!("wrong outlier body");
    };
    assert_eq!(outliers.chart().unwrap().values, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_categorical_only_dashboard() {
    let table = load_fixture("categorical_only.csv");
    let plan = render_default(&table, &ToggleState::new());

    let SectionBody::Distribution(distribution) = body(&plan, titles::DISTRIBUTION) else {
        panic!("wrong distribution body");
    };
    assert_eq!(
        distribution.message(),
        Some("No numerical columns available for distribution analysis.")
    );

    let SectionBody::Outliers(outliers) = body(&plan, titles::OUTLIERS) else {
        panic!("wrong outlier body");
    };
    assert_eq!(
        outliers.message(),
        Some("No numerical columns available for outlier analysis.")
    );

    let SectionBody::CategoryCounts(ChartOutcome::Ready(chart)) = body(&plan, titles::CATEGORICAL)
    else {
        panic!("category chart should be ready");
    };
    assert_eq!(chart.column, "label");
    assert_eq!(chart.title, "Count Plot of label");
    assert_eq!(chart.bars[0].value, "x");
    assert_eq!(chart.bars[0].count, 2);
}

#[test]
fn test_pairwise_sample_is_deterministic() {
    let table = load_inline(&large_numeric_csv(500));
    let first = render_default(&table, &ToggleState::new());
    let second = render_default(&table, &ToggleState::new());

    let (SectionBody::Pairwise(a), SectionBody::Pairwise(b)) =
        (body(&first, titles::PAIRWISE), body(&second, titles::PAIRWISE))
    else {
        panic!("wrong pairwise body");
    };

    let a = a.chart().expect("pairwise ready");
    assert_eq!(a.row_indices.len(), 200);
    assert!(a.sampled);
    assert_eq!(Some(a), b.chart());
}

#[test]
fn test_pairwise_uses_whole_small_table() {
    let table = load_inline(&large_numeric_csv(150));
    let plan = render_default(&table, &ToggleState::new());

    let SectionBody::Pairwise(ChartOutcome::Ready(plot)) = body(&plan, titles::PAIRWISE) else {
        panic!("pairwise should be ready");
    };
    assert!(!plot.sampled);
    assert_eq!(plot.row_indices.len(), 150);
}

#[test]
fn test_partition_recomputed_after_cleaning() {
    let table = load_fixture("people.csv");
    let cleaned = DataCleaner::impute_mean(&table).unwrap();

    let partition = ColumnPartition::from_table(&cleaned);
    assert_eq!(partition.numeric, vec!["age", "income"]);
    assert_eq!(partition.categorical, vec!["name", "city", "member"]);
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_end_to_end() {
    let bytes = std::fs::read(fixtures_path().join("people.csv")).unwrap();
    let mut session = Session::new(EdaConfig::default()).unwrap();

    let plan = session.upload(&bytes, "people.csv").unwrap();
    assert_eq!(plan.table_version, Some(0));

    session.set_toggle(CleaningOp::DropMissing, true);
    session.select(Picker::Category, Some("city".to_string()));
    session.select(Picker::Outlier, Some("not_a_column".to_string()));
    let plan = session.render().unwrap();

    // profile sections still describe the upload
    let SectionBody::Information { rows, .. } = body(&plan, titles::INFORMATION) else {
        panic!("wrong information body");
    };
    assert_eq!(*rows, 6);

    let SectionBody::CategoryCounts(ChartOutcome::Ready(chart)) = body(&plan, titles::CATEGORICAL)
    else {
        panic!("category chart should be ready");
    };
    assert_eq!(chart.column, "city");
    assert_eq!(chart.bars.iter().map(|b| b.count).sum::<usize>(), 2);

    // unknown selection falls back to the first numeric column
    let SectionBody::Outliers(ChartOutcome::Ready(outliers)) = body(&plan, titles::OUTLIERS)
    else {
        panic!("outlier chart should be ready");
    };
    assert_eq!(outliers.column, "age");
    assert_eq!(outliers.values, vec![34.0, 38.0]);
    assert_eq!(plan.table_version, Some(1));
}

#[test]
fn test_session_rejects_bad_upload() {
    let mut session = Session::default();
    let plan = session.upload(&[0xff, 0xfe, 0x00], "broken.csv").unwrap();

    assert!(!plan.has_table());
    assert!(session.table().is_none());
    assert!(matches!(
        &plan.sections[0].body,
        SectionBody::Message { text, .. } if text.starts_with("Could not parse uploaded file")
    ));
    assert!(matches!(session.require_table(), Err(EdaError::NoDataLoaded)));
}

#[test]
fn test_render_plan_json_shape() {
    let table = load_fixture("people.csv");
    let plan = render_default(&table, &ToggleState::from_order([CleaningOp::ImputeMean]));
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["sections"][0]["body"]["data"]["text"], "File uploaded successfully!");
    assert_eq!(json["sections"][3]["body"]["kind"], "missing");
    assert_eq!(json["sections"][5]["body"]["data"][0]["op"], "impute_mean");
    assert_eq!(
        json["sections"][11]["body"]["data"]["text"],
        "EDA completed. You can extend this app with ML models, feature engineering, etc."
    );
}

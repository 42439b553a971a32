//! CLI entry point for the automated EDA engine.

use anyhow::{Result, anyhow};
use auto_eda::{
    ChartOutcome, CleaningOp, EdaConfig, MessageLevel, Picker, RenderPlan, SectionBody, Session,
};
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::path::Path;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Automated Exploratory Data Analysis",
    long_about = "Profiles a CSV table and describes the EDA dashboard for it.\n\n\
                  Cleaning operations are applied in the order they appear on the\n\
                  command line.\n\n\
                  EXAMPLES:\n  \
                  # Summary of a dataset\n  \
                  auto-eda -i data.csv\n\n  \
                  # Fill missing values first, then drop what is left\n  \
                  auto-eda -i data.csv --impute-mean --drop-missing\n\n  \
                  # Full render plan as JSON\n  \
                  auto-eda -i data.csv --json | jq '.sections[].title'"
)]
struct Args {
    /// Path to the CSV file to analyse
    #[arg(short, long)]
    input: String,

    /// Drop rows with missing values
    #[arg(long)]
    drop_missing: bool,

    /// Fill missing numeric values with the column mean
    #[arg(long)]
    impute_mean: bool,

    /// Column shown in the distribution chart
    #[arg(long)]
    distribution_column: Option<String>,

    /// Column shown in the category count chart
    #[arg(long)]
    category_column: Option<String>,

    /// Column shown in the outlier box plot
    #[arg(long)]
    outlier_column: Option<String>,

    /// Maximum number of rows in the pairwise plot
    #[arg(long, default_value_t = auto_eda::config::DEFAULT_PAIRPLOT_SAMPLE_CAP)]
    sample_cap: usize,

    /// Seed for the pairwise plot sample
    #[arg(long, default_value_t = auto_eda::config::DEFAULT_SAMPLE_SEED)]
    seed: u64,

    /// Number of rows in the dataset preview
    #[arg(long, default_value_t = auto_eda::config::DEFAULT_PREVIEW_ROWS)]
    preview_rows: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the render plan as JSON instead of a human-readable summary
    ///
    /// Disables all logs so stdout only carries the JSON document.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(&args.log_level, args.quiet, args.json);

    let path = Path::new(&args.input);
    if !path.exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = EdaConfig::builder()
        .preview_rows(args.preview_rows)
        .pairplot_sample_cap(args.sample_cap)
        .sample_seed(args.seed)
        .build()?;

    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(args.input.as_str())
        .to_string();
    if !auto_eda::ingest::is_csv_name(&name) {
        return Err(auto_eda::EdaError::UnsupportedFile(name).into());
    }

    let mut session = Session::new(config)?;
    info!("Loading dataset from: {}", args.input);
    let bytes = std::fs::read(path)?;
    let plan = session.upload(&bytes, &name)?;

    let plan = if plan.has_table() {
        for op in toggle_order(&matches) {
            debug!("Enabling {:?}", op);
            session.set_toggle(op, true);
        }
        session.select(Picker::Distribution, args.distribution_column.clone());
        session.select(Picker::Category, args.category_column.clone());
        session.select(Picker::Outlier, args.outlier_column.clone());
        session.render()?
    } else {
        plan
    };

    if args.json {
        println!("{}", plan.to_json()?);
    } else {
        print_human_readable_summary(&plan);
    }

    if !plan.has_table() {
        return Err(anyhow!("Could not load {}", args.input));
    }
    Ok(())
}

/// Cleaning operations in the order their flags appear on the command line.
fn toggle_order(matches: &ArgMatches) -> Vec<CleaningOp> {
    let mut ops: Vec<(usize, CleaningOp)> = [
        ("drop_missing", CleaningOp::DropMissing),
        ("impute_mean", CleaningOp::ImputeMean),
    ]
    .into_iter()
    .filter(|(id, _)| matches.value_source(id) == Some(ValueSource::CommandLine))
    .map(|(id, op)| (matches.index_of(id).unwrap_or(usize::MAX), op))
    .collect();

    ops.sort_by_key(|(index, _)| *index);
    ops.into_iter().map(|(_, op)| op).collect()
}

fn print_human_readable_summary(plan: &RenderPlan) {
    println!();
    println!("{}", "=".repeat(80));
    println!("AUTOMATED EDA DASHBOARD");
    println!("{}", "=".repeat(80));

    for section in &plan.sections {
        if let Some(title) = &section.title {
            println!();
            println!("{}", title.to_uppercase());
            println!("{}", "-".repeat(40));
        }
        print_body(&section.body);
    }
    println!();
}

fn print_body(body: &SectionBody) {
    match body {
        SectionBody::Message { level, text } => {
            let tag = match level {
                MessageLevel::Info => "INFO",
                MessageLevel::Success => "OK",
                MessageLevel::Warning => "WARN",
                MessageLevel::Error => "ERROR",
            };
            println!("[{}] {}", tag, text);
        }
        SectionBody::Preview { columns, rows } => {
            let header: Vec<String> = columns.iter().map(|c| truncate_str(c, 14)).collect();
            println!("  {}", header.iter().map(|c| format!("{:<15}", c)).collect::<String>());
            for row in rows {
                let cells: String = row
                    .iter()
                    .map(|cell| format!("{:<15}", truncate_str(cell.as_deref().unwrap_or("NaN"), 14)))
                    .collect();
                println!("  {}", cells);
            }
        }
        SectionBody::Information {
            dtypes, shape_text, ..
        } => {
            for column in dtypes {
                println!("  {:<20} {}", truncate_str(&column.name, 19), column.dtype);
            }
            println!("  {}", shape_text);
        }
        SectionBody::Missing(report) => {
            for entry in report.entries() {
                println!("  {:<20} {}", truncate_str(&entry.column, 19), entry.count);
            }
        }
        SectionBody::Describe(rows) => {
            println!(
                "  {:<20} {:>6} {:>12} {:>12} {:>12} {:>12}",
                "Column", "Count", "Mean", "Std", "Min", "Max"
            );
            for row in rows {
                println!(
                    "  {:<20} {:>6} {:>12} {:>12} {:>12} {:>12}",
                    truncate_str(&row.column, 19),
                    row.count,
                    fmt_stat(row.mean),
                    fmt_stat(row.std),
                    fmt_stat(row.min),
                    fmt_stat(row.max)
                );
            }
        }
        SectionBody::Cleaning(applied) => {
            if applied.is_empty() {
                println!("  No cleaning operations enabled");
            }
            for cleaning in applied {
                println!("[OK] {}", cleaning.message);
                for step in &cleaning.steps {
                    println!("  - {}", step);
                }
            }
        }
        SectionBody::Heatmap(outcome) => print_outcome(outcome, |chart| {
            format!("{} x {} correlation matrix", chart.columns.len(), chart.columns.len())
        }),
        SectionBody::Distribution(outcome) => print_outcome(outcome, |chart| {
            format!("{} ({} values, {} bins)", chart.title, chart.values.len(), chart.bins)
        }),
        SectionBody::CategoryCounts(outcome) => print_outcome(outcome, |chart| {
            let top: Vec<String> = chart
                .bars
                .iter()
                .take(5)
                .map(|bar| format!("{}={}", bar.value, bar.count))
                .collect();
            format!("{} [{}]", chart.title, top.join(", "))
        }),
        SectionBody::Outliers(outcome) => print_outcome(outcome, |chart| {
            format!("{} ({} points)", chart.title, chart.values.len())
        }),
        SectionBody::Pairwise(outcome) => print_outcome(outcome, |chart| {
            format!(
                "{} columns over {} rows{}",
                chart.columns.len(),
                chart.row_indices.len(),
                if chart.sampled { " (sampled)" } else { "" }
            )
        }),
    }
}

fn print_outcome<T>(outcome: &ChartOutcome<T>, describe: impl Fn(&T) -> String) {
    match outcome {
        ChartOutcome::Ready(chart) => println!("  {}", describe(chart)),
        ChartOutcome::Empty { message } => println!("[INFO] {}", message),
    }
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{:.4}", v))
}

/// Truncate a string to a maximum length, adding "..." if truncated.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

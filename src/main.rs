//! CLI entry point for the tabular analysis engine.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::Path;
use tracing::info;

use tabular_insights::{
    AnalysisConfig, AnalysisEngine, AnalysisReport, CorrelationValue, ReportGenerator,
    StatsOutcome,
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Tabular dataset analysis and chart recommendation",
    long_about = "Analyzes a CSV dataset and produces descriptive statistics, a\n\
                  correlation matrix, IQR outlier reports, a 0-100 quality score,\n\
                  and ranked chart recommendations.\n\n\
                  EXAMPLES:\n  \
                  # Analyze a file and print a summary\n  \
                  tabular-insights -i data.csv\n\n  \
                  # Machine-readable output for piping\n  \
                  tabular-insights -i data.csv --json | jq .quality.score\n\n  \
                  # Wider outlier fences, five primary chart picks\n  \
                  tabular-insights -i data.csv --multiplier 3.0 --top 5"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Restrict analysis to these columns (comma-separated)
    ///
    /// If not specified, all columns are analyzed
    #[arg(short, long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// IQR fence multiplier for outlier detection
    #[arg(short, long, default_value = "1.5")]
    multiplier: f64,

    /// Number of primary chart recommendations
    #[arg(short, long, default_value = "3")]
    top: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all logs; only the final JSON report reaches stdout.
    #[arg(long)]
    json: bool,

    /// Write the JSON report next to the input as <input_name>_analysis.json
    #[arg(short = 'r', long)]
    emit_report: bool,
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
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let mut dataset = tabular_insights::read_csv_path(&args.input)?;
    info!(
        "Dataset loaded: {} rows x {} columns",
        dataset.row_count(),
        dataset.column_count()
    );

    if let Some(ref selected) = args.columns {
        for name in selected {
            if !dataset.has_column(name) {
                return Err(anyhow!("Column '{}' not found in {}", name, args.input));
            }
        }
        dataset.retain_columns(selected);
        info!("Restricted analysis to {} columns", dataset.column_count());
    }

    let config = AnalysisConfig::builder()
        .outlier_multiplier(args.multiplier)
        .top_recommendations(args.top)
        .build()?;
    let engine = AnalysisEngine::with_config(config);

    let report = ReportGenerator::build_report(&engine, &dataset)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let path = ReportGenerator::write_report_to_file(&report, Path::new(&args.input))?;
        info!("Report written to: {}", path.display());
    }

    print_human_readable_summary(&report, &args);

    Ok(())
}

/// Print a human-readable summary of the analysis results.
///
/// This is the default output when `--json` is not specified, printed with
/// `println!` so it stays visible regardless of log level.
fn print_human_readable_summary(report: &AnalysisReport, args: &Args) {
    println!();
    println!("{}", "=".repeat(80));
    println!("ANALYSIS COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input: {} ({} rows x {} columns)",
        args.input, report.row_count, report.column_count
    );
    println!();

    println!("COLUMNS");
    println!("{}", "-".repeat(40));
    println!("{:<24} {:<12}", "Column", "Kind");
    println!("{}", "-".repeat(40));
    for column in &report.columns {
        println!(
            "{:<24} {:<12}",
            truncate_str(&column.name, 23),
            format!("{:?}", column.kind)
        );
    }
    println!();

    if !report.statistics.is_empty() {
        println!("DESCRIPTIVE STATISTICS");
        println!("{}", "-".repeat(80));
        println!(
            "{:<20} {:>10} {:>10} {:>10} {:>10} {:>10} {:>6}",
            "Column", "Mean", "Median", "StdDev", "Min", "Max", "N"
        );
        println!("{}", "-".repeat(80));
        for (name, outcome) in &report.statistics {
            match outcome {
                StatsOutcome::Stats(s) => println!(
                    "{:<20} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>6}",
                    truncate_str(name, 19),
                    s.mean,
                    s.median,
                    s.std_dev,
                    s.min,
                    s.max,
                    s.count
                ),
                StatsOutcome::InsufficientData => println!(
                    "{:<20} {:>10}",
                    truncate_str(name, 19),
                    "(insufficient data)"
                ),
            }
        }
        println!();
    }

    if report.correlations.columns.len() >= 2 {
        println!("STRONGEST CORRELATIONS");
        println!("{}", "-".repeat(40));
        let mut pairs: Vec<(f64, &str, &str)> = Vec::new();
        let columns = &report.correlations.columns;
        for (i, left) in columns.iter().enumerate() {
            for right in columns.iter().skip(i + 1) {
                if let Some(CorrelationValue::Coefficient(r)) =
                    report.correlations.get(left, right)
                {
                    pairs.push((r, left, right));
                }
            }
        }
        pairs.sort_by(|a, b| b.0.abs().total_cmp(&a.0.abs()));
        for (r, left, right) in pairs.iter().take(5) {
            println!("  {} <-> {}: {:+.3}", left, right, r);
        }
        println!();
    }

    println!("DATA QUALITY");
    println!("{}", "-".repeat(40));
    println!("  Score: {:.1} / 100", report.quality.score);
    if report.quality.duplicate_row_count > 0 {
        println!("  Duplicate rows: {}", report.quality.duplicate_row_count);
    }
    for (column, count) in &report.quality.missing_by_column {
        println!("  Missing in {}: {}", column, count);
    }
    for (column, count) in &report.quality.outlier_by_column {
        println!("  Outliers in {}: {}", column, count);
    }
    for recommendation in &report.quality.recommendations {
        println!("  ! {}", recommendation);
    }
    println!();

    if !report.visualizations.is_empty() {
        println!("RECOMMENDED CHARTS");
        println!("{}", "-".repeat(40));
        for rec in &report.visualizations.top {
            println!(
                "  [{}] {} ({}): {}",
                rec.priority,
                rec.title,
                rec.chart_type.display_name(),
                rec.columns.join(", ")
            );
        }
        if !report.visualizations.rest.is_empty() {
            println!("  ... and {} more options", report.visualizations.rest.len());
        }
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save the JSON report");
    println!("{}", "=".repeat(80));
}

/// Truncate a string to max length (in characters) with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

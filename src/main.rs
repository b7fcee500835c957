use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use foot_stats::analysis::{AnalysisOptions, run_analysis};
use foot_stats::chart_view::show_charts;
use foot_stats::charts::PlotType;
use foot_stats::logging::init_logging;

/// Perform data analysis on football match data.
#[derive(Debug, Parser)]
#[command(name = "foot_stats", version)]
struct Cli {
    /// Path to input CSV file
    #[arg(short = 'i', long = "input_file", default_value = "input_matches_file.csv")]
    input_file: PathBuf,

    /// Path to output CSV file
    #[arg(short = 'o', long = "output_file", default_value = "output_matches_file.csv")]
    output_file: PathBuf,

    /// Type of plot to display
    #[arg(short = 'p', long = "plot_type", value_enum, default_value_t = PlotType::All)]
    plot_type: PlotType,

    /// Show the charts in the terminal once the table is written
    #[arg(short = 's', long = "show_plot")]
    show_plot: bool,

    /// Also write the table and charts to an .xlsx workbook
    #[arg(long = "chart_file")]
    chart_file: Option<PathBuf>,

    /// Also write every match with split scores and its winner
    #[arg(long = "matches_file")]
    matches_file: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let report = run_analysis(&AnalysisOptions {
        input_file: cli.input_file,
        output_file: cli.output_file.clone(),
        plot_type: cli.plot_type,
        chart_file: cli.chart_file,
        matches_file: cli.matches_file.clone(),
    })?;

    println!(
        "Teams: {} | Matches: {} ({} scored) | Output: {}",
        report.stats.len(),
        report.matches,
        report.scored_matches,
        cli.output_file.display()
    );
    if !report.issues.is_empty() {
        println!("Rows left out: {}", report.issues.len());
        for issue in report.issues.iter().take(8) {
            println!(" - {issue}");
        }
    }
    if let Some(path) = &cli.matches_file {
        println!("Match export: {}", path.display());
    }
    if let Some(export) = &report.export {
        println!("Workbook: {} sheet(s), {} chart(s)", export.sheets, export.charts);
    }

    if cli.show_plot {
        show_charts(&report.charts).context("render charts")?;
    }
    Ok(())
}

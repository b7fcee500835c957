use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::chart_export::{ExportReport, export_charts};
use crate::charts::{ChartSet, PlotType};
use crate::dataset::{load_matches, write_matches, write_team_stats};
use crate::error::RowIssue;
use crate::team_stats::{TeamStats, compute_team_stats};

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub plot_type: PlotType,
    pub chart_file: Option<PathBuf>,
    /// Per-match export with split scores and the `winner` column.
    pub matches_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub matches: usize,
    pub scored_matches: usize,
    pub issues: Vec<RowIssue>,
    pub stats: Vec<TeamStats>,
    pub charts: ChartSet,
    pub export: Option<ExportReport>,
}

/// Load, aggregate and write the team table, then build the requested
/// charts. Bad rows are reported and left out; they never abort the run.
pub fn run_analysis(opts: &AnalysisOptions) -> Result<AnalysisReport> {
    let batch = load_matches(&opts.input_file)
        .with_context(|| format!("load matches from {}", opts.input_file.display()))?;
    let scored_matches = batch.scored_len();
    info!(
        rows = batch.matches.len(),
        scored = scored_matches,
        issues = batch.issues.len(),
        "matches loaded"
    );

    let stats = compute_team_stats(&batch.matches);
    write_team_stats(&opts.output_file, &stats)
        .with_context(|| format!("write team stats to {}", opts.output_file.display()))?;
    info!(teams = stats.len(), path = %opts.output_file.display(), "team stats written");

    if let Some(path) = opts.matches_file.as_deref() {
        write_matches(path, &batch.matches)
            .with_context(|| format!("write match export to {}", path.display()))?;
        info!(rows = batch.matches.len(), path = %path.display(), "match export written");
    }

    let charts = ChartSet::build(&stats, opts.plot_type);

    let export = match opts.chart_file.as_deref() {
        Some(path) => {
            let report = export_charts(path, &stats, &charts)?;
            info!(path = %path.display(), charts = report.charts, "chart workbook written");
            Some(report)
        }
        None => None,
    };

    if stats.is_empty() {
        warn!("no scored matches; team table is empty");
    }

    Ok(AnalysisReport {
        matches: batch.matches.len(),
        scored_matches,
        issues: batch.issues,
        stats,
        charts,
        export,
    })
}

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Chart, ChartType, Workbook, Worksheet};

use crate::charts::{ChartSet, OutcomeShare, ScoringProfile};
use crate::dataset::STATS_HEADER;
use crate::team_stats::TeamStats;

const STATS_SHEET: &str = "TeamStats";
const SHARES_SHEET: &str = "Outcomes";
const SCORING_SHEET: &str = "Goals";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub teams: usize,
    pub sheets: usize,
    pub charts: usize,
}

/// Write the team table plus one data sheet and native chart(s) per chart in
/// `charts`.
pub fn export_charts(path: &Path, stats: &[TeamStats], charts: &ChartSet) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let mut sheets = 0usize;
    let mut chart_count = 0usize;

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(STATS_SHEET)?;
        write_header(sheet, &STATS_HEADER)?;
        for (idx, row) in stats.iter().enumerate() {
            let r = idx as u32 + 1;
            sheet.write_string(r, 0, &row.team)?;
            sheet.write_number(r, 1, row.matches_played)?;
            sheet.write_number(r, 2, row.goals_scored)?;
            sheet.write_number(r, 3, row.wins)?;
            sheet.write_number(r, 4, row.draws)?;
            sheet.write_number(r, 5, row.losses)?;
        }
        sheets += 1;
    }

    if let Some(shares) = charts.shares.as_deref() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHARES_SHEET)?;
        chart_count += write_shares(sheet, shares)?;
        sheets += 1;
    }

    if let Some(scoring) = charts.scoring.as_deref() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SCORING_SHEET)?;
        chart_count += write_scoring(sheet, scoring)?;
        sheets += 1;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        teams: stats.len(),
        sheets,
        charts: chart_count,
    })
}

fn write_shares(sheet: &mut Worksheet, shares: &[OutcomeShare]) -> Result<usize> {
    write_header(sheet, &["team", "played", "wins_pct", "draws_pct", "losses_pct"])?;
    for (idx, row) in shares.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, &row.team)?;
        sheet.write_number(r, 1, row.played)?;
        sheet.write_number(r, 2, row.win_pct)?;
        sheet.write_number(r, 3, row.draw_pct)?;
        sheet.write_number(r, 4, row.loss_pct)?;
    }
    if shares.is_empty() {
        return Ok(0);
    }

    let last = shares.len() as u32;
    let mut chart = Chart::new(ChartType::ColumnStacked);
    for (col, name) in [(2u16, "Wins"), (3, "Draws"), (4, "Losses")] {
        chart
            .add_series()
            .set_categories((SHARES_SHEET, 1, 0, last, 0))
            .set_values((SHARES_SHEET, 1, col, last, col))
            .set_name(name);
    }
    chart
        .title()
        .set_name("Percentage of Wins, Draws, and Losses per Team");
    chart.y_axis().set_name("Percentage");
    sheet
        .insert_chart(1, 6, &chart)
        .context("insert outcome chart")?;
    Ok(1)
}

fn write_scoring(sheet: &mut Worksheet, scoring: &[ScoringProfile]) -> Result<usize> {
    write_header(sheet, &["team", "total_goals", "avg_goals"])?;
    for (idx, row) in scoring.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, &row.team)?;
        sheet.write_number(r, 1, row.total_goals)?;
        sheet.write_number(r, 2, row.avg_goals)?;
    }
    if scoring.is_empty() {
        return Ok(0);
    }

    let last = scoring.len() as u32;
    let mut totals = Chart::new(ChartType::Column);
    totals
        .add_series()
        .set_categories((SCORING_SHEET, 1, 0, last, 0))
        .set_values((SCORING_SHEET, 1, 1, last, 1))
        .set_name("Total Goals");
    totals.title().set_name("Total Goals per Team");
    totals.y_axis().set_name("Total Goals");
    sheet
        .insert_chart(1, 4, &totals)
        .context("insert total goals chart")?;

    let mut averages = Chart::new(ChartType::Line);
    averages
        .add_series()
        .set_categories((SCORING_SHEET, 1, 0, last, 0))
        .set_values((SCORING_SHEET, 1, 2, last, 2))
        .set_name("Average Score");
    averages.title().set_name("Average Goals per Match");
    averages.y_axis().set_name("Average Score");
    sheet
        .insert_chart(17, 4, &averages)
        .context("insert average score chart")?;
    Ok(2)
}

fn write_header(sheet: &mut Worksheet, header: &[&str]) -> Result<()> {
    for (col, name) in header.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *name)
            .with_context(|| format!("write header cell {col}"))?;
    }
    Ok(())
}

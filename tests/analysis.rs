use std::fs;

use foot_stats::analysis::{AnalysisOptions, run_analysis};
use foot_stats::charts::PlotType;

const INPUT: &str = "date,home_team,score,away_team\n\
12/08/2023,Arsenal,2 - 1,Nott'm Forest\n\
12/08/2023,Bournemouth,1 - 1,West Ham\n\
21/08/2023,Crystal Palace,? - 1,Arsenal\n\
26/08/2023,West Ham,abc - 1,Brighton\n";

#[test]
fn writes_table_and_workbook() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("input.csv");
    let output = dir.path().join("output.csv");
    let workbook = dir.path().join("charts.xlsx");
    let per_match = dir.path().join("matches_out.csv");
    fs::write(&input, INPUT).expect("write input");

    let report = run_analysis(&AnalysisOptions {
        input_file: input,
        output_file: output.clone(),
        plot_type: PlotType::All,
        chart_file: Some(workbook.clone()),
        matches_file: Some(per_match.clone()),
    })
    .expect("analysis");

    assert_eq!(report.matches, 4);
    assert_eq!(report.scored_matches, 3);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.stats.len(), 5);
    assert!(report.charts.shares.is_some());
    assert!(report.charts.scoring.is_some());

    let export = report.export.expect("export report");
    assert_eq!(export.sheets, 3);
    assert_eq!(export.charts, 3);
    assert!(workbook.exists());

    let table = fs::read_to_string(&output).expect("read output");
    let lines = table.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "home_team,matches_played,goals_scored,wins,draws,losses");
    assert_eq!(lines[1], "Arsenal,2,3,2,0,0");
    assert_eq!(lines.len(), 6);

    let export = fs::read_to_string(&per_match).expect("read match export");
    let rows = export.lines().collect::<Vec<_>>();
    assert_eq!(rows[0], "date,home_team,away_team,home_score,away_score,winner");
    assert_eq!(rows[1], "12/08/2023,Arsenal,Nott'm Forest,2,1,Arsenal");
    assert_eq!(rows[2], "12/08/2023,Bournemouth,West Ham,1,1,draw");
    assert_eq!(rows[3], "21/08/2023,Crystal Palace,Arsenal,0,1,Arsenal");
    assert_eq!(rows[4], "26/08/2023,West Ham,Brighton,,,");
}

#[test]
fn percentage_only_skips_goal_charts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("input.csv");
    fs::write(&input, INPUT).expect("write input");

    let report = run_analysis(&AnalysisOptions {
        input_file: input,
        output_file: dir.path().join("output.csv"),
        plot_type: PlotType::Percentage,
        chart_file: None,
        matches_file: None,
    })
    .expect("analysis");

    assert!(report.charts.shares.is_some());
    assert!(report.charts.scoring.is_none());
    assert!(report.export.is_none());
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = run_analysis(&AnalysisOptions {
        input_file: dir.path().join("nope.csv"),
        output_file: dir.path().join("output.csv"),
        plot_type: PlotType::All,
        chart_file: None,
        matches_file: None,
    });
    assert!(result.is_err());
}

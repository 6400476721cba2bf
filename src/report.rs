//! Report Runner
//! Load, clean, print KPIs, then render the four charts.

use crate::charts::StaticChartRenderer;
use crate::config::ReportConfig;
use crate::data::{DataLoader, DataProcessor, SalesRecord};
use crate::stats::{Kpis, MonthlySales, ProfitGrid, SegmentShare, StateSales, StatsCalculator};
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Everything computed from the clean dataset.
#[derive(Debug, Clone)]
pub struct SalesReport {
    pub record_count: usize,
    pub kpis: Kpis,
    pub monthly: Vec<MonthlySales>,
    pub top_states: Vec<StateSales>,
    pub profit_grid: ProfitGrid,
    pub segments: Vec<SegmentShare>,
}

impl SalesReport {
    pub fn build(records: &[SalesRecord]) -> Self {
        Self {
            record_count: records.len(),
            kpis: StatsCalculator::compute_kpis(records),
            monthly: StatsCalculator::monthly_sales(records),
            top_states: StatsCalculator::top_states(records),
            profit_grid: StatsCalculator::profit_by_category_region(records),
            segments: StatsCalculator::segment_shares(records),
        }
    }
}

/// Load the CSV at `path` and return the records that survive cleaning.
pub fn load_clean_records(path: &Path) -> Result<Vec<SalesRecord>> {
    let mut loader = DataLoader::new();
    loader
        .load_csv(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    debug!("columns: {:?}", loader.get_columns());

    let raw = loader.raw_records()?;
    let (records, summary) = DataProcessor::clean(raw);
    info!(
        "{}: {} rows, {} clean",
        path.display(),
        loader.get_row_count(),
        summary.rows_kept
    );

    Ok(records)
}

/// Run the whole report, writing the KPI and confirmation lines to `out`.
///
/// The figures directory is only created once the data has loaded.
pub fn run(config: &ReportConfig, out: &mut impl Write) -> Result<SalesReport> {
    let records = load_clean_records(&config.data_path)?;
    let report = SalesReport::build(&records);

    for line in report.kpis.summary_lines() {
        writeln!(out, "{}", line)?;
    }

    fs::create_dir_all(&config.figures_dir)
        .with_context(|| format!("failed to create {}", config.figures_dir.display()))?;

    StaticChartRenderer::render_all(
        &config.figures_dir,
        &report.monthly,
        &report.top_states,
        &report.profit_grid,
        &report.segments,
    )
    .context("failed to render charts")?;

    writeln!(out, "Figures saved to {}", config.figures_dir.display())?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DATA_FILE_NAME;
    use tempfile::TempDir;

    const HEADER: &str =
        "Order Date,Ship Date,Sales,Profit,Discount,State,Category,Region,Segment";

    fn fixture(rows: &[&str]) -> (TempDir, ReportConfig) {
        let dir = tempfile::tempdir().unwrap();
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body.push('\n');
        fs::write(dir.path().join(DATA_FILE_NAME), body).unwrap();
        let config = ReportConfig::from_base_dir(dir.path());
        (dir, config)
    }

    fn four_row_fixture() -> (TempDir, ReportConfig) {
        fixture(&[
            "2017-01-05,2017-01-08,100,10,0.1,Texas,Furniture,Central,Consumer",
            "2017-01-20,2017-01-22,200,20,0.2,Ohio,Technology,East,Corporate",
            "2017-02-03,2017-02-06,50,-5,0,Texas,Furniture,East,Consumer",
            "2017-03-01,2017-03-04,400,,0.5,Utah,Technology,West,Home Office",
        ])
    }

    #[test]
    fn four_row_scenario() {
        let (_dir, config) = four_row_fixture();
        let records = load_clean_records(&config.data_path).unwrap();
        assert_eq!(records.len(), 3);

        let report = SalesReport::build(&records);
        assert_eq!(report.record_count, 3);
        assert!((report.kpis.total_sales - 350.0).abs() < 1e-9);
        assert!((report.kpis.total_profit - 25.0).abs() < 1e-9);

        let monthly: Vec<(String, f64)> = report
            .monthly
            .iter()
            .map(|m| (m.label(), m.sales))
            .collect();
        assert_eq!(
            monthly,
            vec![("2017-01".to_string(), 300.0), ("2017-02".to_string(), 50.0)]
        );

        // Utah only appears on the dropped row
        assert!(report.top_states.iter().all(|s| s.state != "Utah"));
        assert!(!report.profit_grid.regions.contains(&"West".to_string()));
    }

    #[test]
    fn unparsable_order_date_is_excluded_everywhere() {
        let (_dir, config) = fixture(&[
            "2017-01-05,2017-01-08,100,10,0.1,Texas,Furniture,Central,Consumer",
            "not-a-date,2017-01-08,999,99,0.9,Nevada,Office Supplies,West,Home Office",
        ]);

        let records = load_clean_records(&config.data_path).unwrap();
        assert_eq!(records.len(), 1);

        let report = SalesReport::build(&records);
        assert!((report.kpis.total_sales - 100.0).abs() < 1e-9);
        assert!((report.kpis.average_discount - 0.1).abs() < 1e-9);
        assert_eq!(report.monthly.len(), 1);
        assert!(report.top_states.iter().all(|s| s.state != "Nevada"));
        assert_eq!(report.profit_grid.categories, vec!["Furniture".to_string()]);
        assert_eq!(report.profit_grid.regions, vec!["Central".to_string()]);
        assert_eq!(report.segments.len(), 1);
        assert!((report.segments[0].percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn aggregates_agree_with_totals() {
        let (_dir, config) = fixture(&[
            "2016-11-08,2016-11-11,261.96,41.91,0,Kentucky,Furniture,South,Consumer",
            "11/8/2016,11/11/2016,731.94,219.58,0,Kentucky,Furniture,South,Consumer",
            "2016-06-12,2016-06-16,14.62,6.87,0,California,Office Supplies,West,Corporate",
            "2015-10-11,2015-10-18,957.5775,-383.031,0.45,Florida,Furniture,South,Consumer",
            "2015-10-11,2015-10-18,22.368,2.5164,0.2,Florida,Office Supplies,South,Consumer",
        ]);

        let records = load_clean_records(&config.data_path).unwrap();
        let report = SalesReport::build(&records);
        let total = report.kpis.total_sales;

        let monthly_sum: f64 = report.monthly.iter().map(|m| m.sales).sum();
        let segment_sum: f64 = report.segments.iter().map(|s| s.sales).sum();
        assert!((monthly_sum - total).abs() <= 1e-6 * total);
        assert!((segment_sum - total).abs() <= 1e-6 * total);

        let labels: Vec<String> = report.monthly.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["2015-10", "2016-06", "2016-11"]);

        assert_eq!(report.top_states[0].state, "Kentucky");
        assert_eq!(
            report.profit_grid.get("Office Supplies", "West"),
            Some(6.87)
        );
        assert_eq!(report.profit_grid.get("Furniture", "West"), Some(0.0));
    }

    #[test]
    fn kpi_lines_are_stable_across_runs() {
        let (_dir, config) = four_row_fixture();
        let first = SalesReport::build(&load_clean_records(&config.data_path).unwrap());
        let second = SalesReport::build(&load_clean_records(&config.data_path).unwrap());

        assert_eq!(first.kpis.summary_lines(), second.kpis.summary_lines());
        assert_eq!(
            first.kpis.summary_lines(),
            [
                "Total Sales: $350.00".to_string(),
                "Total Profit: $25.00".to_string(),
                "Average Discount: 10.0%".to_string(),
            ]
        );
    }

    fn figure_names(config: &ReportConfig) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&config.figures_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn run_prints_kpis_and_writes_four_figures() {
        let (_dir, config) = four_row_fixture();

        let mut out = Vec::new();
        let report = run(&config, &mut out).unwrap();
        assert_eq!(report.record_count, 3);

        let stdout = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Total Sales: $350.00".to_string(),
                "Total Profit: $25.00".to_string(),
                "Average Discount: 10.0%".to_string(),
                format!("Figures saved to {}", config.figures_dir.display()),
            ]
        );

        assert_eq!(
            figure_names(&config),
            vec![
                "monthly_sales_trend.png",
                "profit_category_region_heatmap.png",
                "segment_sales_pie.png",
                "top_states_sales.png",
            ]
        );
    }

    #[test]
    fn second_run_overwrites_the_same_figures() {
        let (_dir, config) = four_row_fixture();

        let mut first = Vec::new();
        run(&config, &mut first).unwrap();
        let first_names = figure_names(&config);

        let mut second = Vec::new();
        run(&config, &mut second).unwrap();

        assert_eq!(first, second);
        assert_eq!(figure_names(&config), first_names);
        assert_eq!(first_names.len(), 4);
    }

    #[test]
    fn missing_data_file_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::from_base_dir(dir.path());

        let mut out = Vec::new();
        assert!(run(&config, &mut out).is_err());
        assert!(out.is_empty());
        assert!(!config.figures_dir.exists());
    }

    #[test]
    fn missing_columns_fail_without_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DATA_FILE_NAME),
            "Order Date,Sales\n2017-01-05,100\n",
        )
        .unwrap();
        let config = ReportConfig::from_base_dir(dir.path());

        let mut out = Vec::new();
        let err = run(&config, &mut out).unwrap_err();
        assert!(format!("{:#}", err).contains("Missing required columns"));
        assert!(out.is_empty());
        assert!(!config.figures_dir.exists());
    }
}

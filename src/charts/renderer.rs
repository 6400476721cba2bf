//! Static Chart Renderer
//! Renders the four report charts to PNG with plotters' bitmap backend.
//!
//! Every render call owns its drawing area: it is created, drawn, presented
//! and dropped inside the call, so no backend outlives the image it wrote.

use super::style::{
    category_label, category_ticks, heat_color, polar_point, wedge_angles, BAR_COLOR, LINE_COLOR,
    PALETTE,
};
use crate::stats::{MonthlySales, ProfitGrid, SegmentShare, StateSales};
use log::info;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

pub const MONTHLY_TREND_FILE: &str = "monthly_sales_trend.png";
pub const TOP_STATES_FILE: &str = "top_states_sales.png";
pub const PROFIT_HEATMAP_FILE: &str = "profit_category_region_heatmap.png";
pub const SEGMENT_PIE_FILE: &str = "segment_sales_pie.png";

const FONT: &str = "sans-serif";

// Image sizes in pixels
const MONTHLY_SIZE: (u32, u32) = (1000, 500);
const TOP_STATES_SIZE: (u32, u32) = (1000, 500);
const HEATMAP_SIZE: (u32, u32) = (800, 500);
const PIE_SIZE: (u32, u32) = (600, 600);

/// Width reserved for the heatmap's color scale.
const COLOR_SCALE_WIDTH: u32 = 160;
const COLOR_SCALE_STEPS: usize = 100;

/// Pixels between the x axis and the top of a category label.
const X_LABEL_GAP: i32 = 8;

/// First wedge starts at 12 o'clock.
const PIE_START_ANGLE: f64 = 90.0;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(err.to_string())
    }
}

/// Rotated a quarter turn so a category name hangs below its anchor and reads downwards.
///
/// Mesh tick labels are always centered on the axis line, which puts rotated
/// text half inside the plot, so category names are drawn as separate text.
fn hanging_label_style() -> TextStyle<'static> {
    TextStyle::from((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .pos(Pos::new(HPos::Left, VPos::Center))
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub fn render_monthly_trend(path: &Path, monthly: &[MonthlySales]) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, MONTHLY_SIZE).into_drawing_area();
        Self::draw_monthly_trend(&root, monthly)?;
        root.present()?;
        Ok(())
    }

    pub fn render_top_states(path: &Path, states: &[StateSales]) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, TOP_STATES_SIZE).into_drawing_area();
        Self::draw_top_states(&root, states)?;
        root.present()?;
        Ok(())
    }

    pub fn render_profit_heatmap(path: &Path, grid: &ProfitGrid) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, HEATMAP_SIZE).into_drawing_area();
        Self::draw_profit_heatmap(&root, grid)?;
        root.present()?;
        Ok(())
    }

    pub fn render_segment_pie(path: &Path, shares: &[SegmentShare]) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, PIE_SIZE).into_drawing_area();
        Self::draw_segment_pie(&root, shares)?;
        root.present()?;
        Ok(())
    }

    /// Line chart with markers, one point per month.
    fn draw_monthly_trend<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        monthly: &[MonthlySales],
    ) -> Result<(), ChartError> {
        root.fill(&WHITE)?;

        let labels: Vec<String> = monthly.iter().map(MonthlySales::label).collect();
        let (y_min, y_max) = Self::value_axis(monthly.iter().map(|m| m.sales));

        let mut chart = ChartBuilder::on(root)
            .caption("Monthly Sales Trend", (FONT, 22))
            .margin(15)
            .x_label_area_size(90)
            .y_label_area_size(80)
            .build_cartesian_2d(0f64..labels.len().max(1) as f64, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(category_ticks(labels.len()))
            .x_label_formatter(&|_: &f64| String::new())
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style((FONT, 12))
            .axis_desc_style((FONT, 14))
            .x_desc("Month")
            .y_desc("Sales")
            .draw()?;

        let points: Vec<(f64, f64)> = monthly
            .iter()
            .enumerate()
            .map(|(i, m)| (i as f64 + 0.5, m.sales))
            .collect();
        chart.draw_series(LineSeries::new(points.iter().copied(), &LINE_COLOR))?;
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, 4, LINE_COLOR.filled())),
        )?;

        for (i, label) in labels.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(i as f64 + 0.5, y_min));
            root.draw(&Text::new(
                label.as_str(),
                (x, y + X_LABEL_GAP),
                hanging_label_style(),
            ))?;
        }

        Ok(())
    }

    /// Vertical bars, highest state first.
    fn draw_top_states<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        states: &[StateSales],
    ) -> Result<(), ChartError> {
        root.fill(&WHITE)?;

        let (y_min, y_max) = Self::value_axis(states.iter().map(|s| s.sales));

        let mut chart = ChartBuilder::on(root)
            .caption("Top 10 States by Sales", (FONT, 22))
            .margin(15)
            .x_label_area_size(150)
            .y_label_area_size(80)
            .build_cartesian_2d(0f64..states.len().max(1) as f64, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(category_ticks(states.len()))
            .x_label_formatter(&|_: &f64| String::new())
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style((FONT, 12))
            .axis_desc_style((FONT, 14))
            .x_desc("State")
            .y_desc("Sales")
            .draw()?;

        chart.draw_series(states.iter().enumerate().map(|(i, s)| {
            let x = i as f64;
            Rectangle::new([(x + 0.15, 0.0), (x + 0.85, s.sales)], BAR_COLOR.filled())
        }))?;

        for (i, s) in states.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(i as f64 + 0.5, y_min));
            root.draw(&Text::new(
                s.state.as_str(),
                (x, y + X_LABEL_GAP),
                hanging_label_style(),
            ))?;
        }

        Ok(())
    }

    /// Color-mapped category × region grid with a color scale on the right.
    fn draw_profit_heatmap<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        grid: &ProfitGrid,
    ) -> Result<(), ChartError> {
        root.fill(&WHITE)?;
        let root = root.titled("Profit by Category & Region", (FONT, 22))?;

        let (width, _) = root.dim_in_pixel();
        let (grid_area, scale_area) = root.split_horizontally(width - COLOR_SCALE_WIDTH);

        let (lo, hi) = match grid.value_range() {
            Some((lo, hi)) if hi > lo => (lo, hi),
            Some((v, _)) => (v - 1.0, v + 1.0),
            None => (0.0, 1.0),
        };
        let cols = grid.regions.len();
        let rows = grid.categories.len();

        let mut chart = ChartBuilder::on(&grid_area)
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(130)
            .build_cartesian_2d(0f64..cols.max(1) as f64, 0f64..rows.max(1) as f64)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(category_ticks(cols))
            .y_labels(category_ticks(rows))
            .x_label_formatter(&|v| category_label(&grid.regions, *v))
            .y_label_formatter(&|v| category_label(&grid.categories, *v))
            .label_style((FONT, 12))
            .axis_desc_style((FONT, 14))
            .x_desc("Region")
            .y_desc("Category")
            .draw()?;

        chart.draw_series(grid.values.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(col, &value)| {
                let (x, y) = (col as f64, row as f64);
                Rectangle::new([(x, y), (x + 1.0, y + 1.0)], heat_color(value, lo, hi).filled())
            })
        }))?;

        let mut scale = ChartBuilder::on(&scale_area)
            .margin(10)
            .x_label_area_size(50)
            .set_label_area_size(LabelAreaPosition::Right, 90)
            .build_cartesian_2d(0f64..1f64, lo..hi)?;

        scale
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style((FONT, 12))
            .axis_desc_style((FONT, 14))
            .y_desc("Profit")
            .draw()?;

        scale.draw_series((0..COLOR_SCALE_STEPS).map(|i| {
            let step = (hi - lo) / COLOR_SCALE_STEPS as f64;
            let y0 = lo + step * i as f64;
            let y1 = y0 + step;
            Rectangle::new(
                [(0.0, y0), (1.0, y1)],
                heat_color((y0 + y1) / 2.0, lo, hi).filled(),
            )
        }))?;

        Ok(())
    }

    /// Pie with one-decimal percentages inside the wedges and segment names outside.
    fn draw_segment_pie<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        shares: &[SegmentShare],
    ) -> Result<(), ChartError> {
        root.fill(&WHITE)?;
        let root = root.titled("Segment-wise Sales Distribution", (FONT, 22))?;

        let (w, h) = root.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.35;
        let label_style =
            TextStyle::from((FONT, 16).into_font()).pos(Pos::new(HPos::Center, VPos::Center));

        let values: Vec<f64> = shares.iter().map(|s| s.sales).collect();
        let wedges = wedge_angles(&values, PIE_START_ANGLE);

        for (i, (share, (start, end))) in shares.iter().zip(wedges).enumerate() {
            // One arc vertex per degree
            let steps = ((end - start).abs().ceil() as usize).max(1);
            let mut outline = vec![center];
            outline.extend((0..=steps).map(|k| {
                polar_point(center, radius, start + (end - start) * k as f64 / steps as f64)
            }));
            root.draw(&Polygon::new(
                outline,
                PALETTE[i % PALETTE.len()].filled(),
            ))?;

            let mid = (start + end) / 2.0;
            root.draw(&Text::new(
                format!("{:.1}%", share.percent),
                polar_point(center, radius * 0.6, mid),
                label_style.clone(),
            ))?;
            root.draw(&Text::new(
                share.segment.clone(),
                polar_point(center, radius * 1.18, mid),
                label_style.clone(),
            ))?;
        }

        Ok(())
    }

    /// Render all four charts into `dir`, one after another.
    pub fn render_all(
        dir: &Path,
        monthly: &[MonthlySales],
        states: &[StateSales],
        grid: &ProfitGrid,
        shares: &[SegmentShare],
    ) -> Result<(), ChartError> {
        Self::render_monthly_trend(&dir.join(MONTHLY_TREND_FILE), monthly)?;
        info!("wrote {}", MONTHLY_TREND_FILE);

        Self::render_top_states(&dir.join(TOP_STATES_FILE), states)?;
        info!("wrote {}", TOP_STATES_FILE);

        Self::render_profit_heatmap(&dir.join(PROFIT_HEATMAP_FILE), grid)?;
        info!("wrote {}", PROFIT_HEATMAP_FILE);

        Self::render_segment_pie(&dir.join(SEGMENT_PIE_FILE), shares)?;
        info!("wrote {}", SEGMENT_PIE_FILE);

        Ok(())
    }

    /// Value axis from zero (or the lowest negative value) to the max, padded.
    fn value_axis(values: impl Iterator<Item = f64>) -> (f64, f64) {
        let (lo, hi) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let span = hi - lo;
        let pad = if span > 0.0 { span * 0.08 } else { 1.0 };
        let lo = if lo < 0.0 { lo - pad } else { 0.0 };
        (lo, hi + pad)
    }
}

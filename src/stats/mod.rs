//! Stats module - KPIs and chart aggregations

mod calculator;
mod format;

pub use calculator::{Kpis, MonthlySales, ProfitGrid, SegmentShare, StateSales, StatsCalculator};

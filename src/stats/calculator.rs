//! Statistics Calculator Module
//! KPI reductions and the group-by aggregations behind each chart.
//!
//! Group-bys skip records whose key is missing; those records still count
//! towards the KPIs and towards every aggregate keyed on another column.

use crate::data::SalesRecord;
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, BTreeSet};

/// Number of states kept for the top-states chart.
pub const TOP_STATES_LIMIT: usize = 10;

/// Headline metrics over the clean dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Mean of present discounts; NaN when no record carries one.
    pub average_discount: f64,
}

/// Sales summed over one calendar month of order dates.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySales {
    pub year: i32,
    pub month: u32,
    pub sales: f64,
}

impl MonthlySales {
    /// Axis label in `YYYY-MM` form.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateSales {
    pub state: String,
    pub sales: f64,
}

/// Profit summed per (category, region); absent pairs hold 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitGrid {
    pub categories: Vec<String>,
    pub regions: Vec<String>,
    /// `values[row][col]` for `categories[row]` and `regions[col]`.
    pub values: Vec<Vec<f64>>,
}

impl ProfitGrid {
    /// Smallest and largest cell, or `None` for an empty grid.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut cells = self.values.iter().flatten().copied();
        let first = cells.next()?;
        Some(cells.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentShare {
    pub segment: String,
    pub sales: f64,
    /// Share of summed segment sales, 0..=100.
    pub percent: f64,
}

/// Handles the KPI and aggregation calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    pub fn compute_kpis(records: &[SalesRecord]) -> Kpis {
        let total_sales = records.iter().map(|r| r.sales).sum();
        let total_profit = records.iter().map(|r| r.profit).sum();
        let average_discount = records
            .iter()
            .filter_map(|r| r.discount)
            .collect::<Vec<f64>>()
            .mean();

        Kpis {
            total_sales,
            total_profit,
            average_discount,
        }
    }

    /// Sales per (year, month), chronological.
    pub fn monthly_sales(records: &[SalesRecord]) -> Vec<MonthlySales> {
        use chrono::Datelike;

        let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for r in records {
            let key = (r.order_date.year(), r.order_date.month());
            *by_month.entry(key).or_default() += r.sales;
        }

        by_month
            .into_iter()
            .map(|((year, month), sales)| MonthlySales { year, month, sales })
            .collect()
    }

    /// The `TOP_STATES_LIMIT` states with the highest summed sales, descending.
    /// Equal sums keep alphabetical order.
    pub fn top_states(records: &[SalesRecord]) -> Vec<StateSales> {
        let mut states: Vec<StateSales> = Self::sum_by_key(records, |r| r.state.as_deref(), |r| r.sales)
            .into_iter()
            .map(|(state, sales)| StateSales { state, sales })
            .collect();

        // sort_by is stable
        states.sort_by(|a, b| b.sales.total_cmp(&a.sales));
        states.truncate(TOP_STATES_LIMIT);
        states
    }

    /// Pivot profit into a category × region grid.
    pub fn profit_by_category_region(records: &[SalesRecord]) -> ProfitGrid {
        let mut sums: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        let mut categories: BTreeSet<&str> = BTreeSet::new();
        let mut regions: BTreeSet<&str> = BTreeSet::new();

        for r in records {
            let (Some(category), Some(region)) = (r.category.as_deref(), r.region.as_deref()) else {
                continue;
            };
            categories.insert(category);
            regions.insert(region);
            *sums.entry((category, region)).or_default() += r.profit;
        }

        let values: Vec<Vec<f64>> = categories
            .iter()
            .map(|c| {
                regions
                    .iter()
                    .map(|reg| sums.get(&(*c, *reg)).copied().unwrap_or(0.0))
                    .collect::<Vec<f64>>()
            })
            .collect();

        ProfitGrid {
            categories: categories.into_iter().map(String::from).collect(),
            regions: regions.into_iter().map(String::from).collect(),
            values,
        }
    }

    /// Sales per segment with each segment's percentage of the whole.
    pub fn segment_shares(records: &[SalesRecord]) -> Vec<SegmentShare> {
        let sums = Self::sum_by_key(records, |r| r.segment.as_deref(), |r| r.sales);
        let total: f64 = sums.values().sum();

        sums.into_iter()
            .map(|(segment, sales)| SegmentShare {
                segment,
                sales,
                percent: if total != 0.0 { sales / total * 100.0 } else { 0.0 },
            })
            .collect()
    }

    /// Sum `value` per present key, keys in sorted order.
    fn sum_by_key<'a>(
        records: &'a [SalesRecord],
        key: impl Fn(&'a SalesRecord) -> Option<&'a str>,
        value: impl Fn(&SalesRecord) -> f64,
    ) -> BTreeMap<String, f64> {
        let mut sums: BTreeMap<String, f64> = BTreeMap::new();
        for r in records {
            if let Some(k) = key(r) {
                *sums.entry(k.to_string()).or_default() += value(r);
            }
        }
        sums
    }
}

#[cfg(test)]
impl ProfitGrid {
    pub fn get(&self, category: &str, region: &str) -> Option<f64> {
        let row = self.categories.iter().position(|c| c == category)?;
        let col = self.regions.iter().position(|r| r == region)?;
        Some(self.values[row][col])
    }
}

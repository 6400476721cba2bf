//! Data Processor Module
//! Handles data cleaning: permissive date parsing and required-field filtering.

use super::record::{RawSalesRecord, SalesRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;

/// Date-only layouts tried in order.
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%Y%m%d",
    "%d-%b-%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Date-time layouts; the time part is discarded.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Counts from a cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleaningSummary {
    pub rows_in: usize,
    pub rows_kept: usize,
}

impl CleaningSummary {
    pub fn rows_dropped(&self) -> usize {
        self.rows_in - self.rows_kept
    }
}

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Parse a calendar date permissively. Unparsable input is `None`, never an error.
    pub fn parse_date(text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                    .map(|dt| dt.date())
            })
            .or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    /// Turn one raw row into a clean record, or `None` if a required field is missing.
    pub fn clean_record(raw: RawSalesRecord) -> Option<SalesRecord> {
        let order_date = raw.order_date.as_deref().and_then(Self::parse_date);
        let ship_date = raw.ship_date.as_deref().and_then(Self::parse_date);

        Some(SalesRecord {
            order_date: order_date?,
            ship_date: ship_date?,
            sales: raw.sales?,
            profit: raw.profit?,
            discount: raw.discount,
            state: raw.state,
            category: raw.category,
            region: raw.region,
            segment: raw.segment,
        })
    }

    /// Drop every row missing an order date, ship date, sales or profit. Order is preserved.
    pub fn clean(raw: Vec<RawSalesRecord>) -> (Vec<SalesRecord>, CleaningSummary) {
        let rows_in = raw.len();
        let records: Vec<SalesRecord> = raw.into_iter().filter_map(Self::clean_record).collect();

        let summary = CleaningSummary {
            rows_in,
            rows_kept: records.len(),
        };
        debug!(
            "cleaning kept {} of {} rows ({} dropped)",
            summary.rows_kept,
            summary.rows_in,
            summary.rows_dropped()
        );

        (records, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw(order: &str, ship: &str, sales: Option<f64>, profit: Option<f64>) -> RawSalesRecord {
        RawSalesRecord {
            order_date: Some(order.to_string()),
            ship_date: Some(ship.to_string()),
            sales,
            profit,
            discount: Some(0.1),
            state: Some("Texas".to_string()),
            category: Some("Furniture".to_string()),
            region: Some("Central".to_string()),
            segment: Some("Consumer".to_string()),
        }
    }

    #[test]
    fn parse_date_accepts_common_layouts() {
        let expected = date(2016, 11, 8);
        for text in [
            "2016-11-08",
            "11/8/2016",
            "11/08/2016",
            "2016/11/08",
            "20161108",
            "08-Nov-2016",
            "8 November 2016",
            "November 8, 2016",
            "Nov 8, 2016",
            "2016-11-08 00:00:00",
            "2016-11-08T13:45:00",
            "11/8/2016 10:30",
            "2016-11-08T13:45:00+02:00",
            "  2016-11-08  ",
        ] {
            assert_eq!(DataProcessor::parse_date(text), Some(expected), "{text}");
        }
    }

    #[test]
    fn parse_date_rejects_garbage() {
        for text in ["not-a-date", "", "   ", "2017-02-30", "13/45/2016", "yesterday"] {
            assert_eq!(DataProcessor::parse_date(text), None, "{text}");
        }
    }

    #[test]
    fn clean_keeps_only_complete_rows() {
        let rows = vec![
            raw("2017-01-05", "2017-01-08", Some(100.0), Some(10.0)),
            raw("not-a-date", "2017-01-08", Some(100.0), Some(10.0)),
            raw("2017-01-05", "never", Some(100.0), Some(10.0)),
            raw("2017-01-05", "2017-01-08", None, Some(10.0)),
            raw("2017-01-05", "2017-01-08", Some(100.0), None),
            RawSalesRecord {
                order_date: None,
                ..raw("2017-01-05", "2017-01-08", Some(1.0), Some(1.0))
            },
            raw("2017-02-01", "2017-02-03", Some(50.0), Some(-5.0)),
        ];

        let (clean, summary) = DataProcessor::clean(rows);
        assert_eq!(summary.rows_in, 7);
        assert_eq!(summary.rows_kept, 2);
        assert_eq!(summary.rows_dropped(), 5);
        assert_eq!(clean[0].order_date, date(2017, 1, 5));
        assert_eq!(clean[0].sales, 100.0);
        assert_eq!(clean[1].order_date, date(2017, 2, 1));
        assert_eq!(clean[1].profit, -5.0);
    }

    #[test]
    fn optional_fields_flow_through_unvalidated() {
        let mut row = raw("2017-01-05", "2017-01-08", Some(100.0), Some(10.0));
        row.discount = None;
        row.state = None;

        let record = DataProcessor::clean_record(row).unwrap();
        assert_eq!(record.discount, None);
        assert_eq!(record.state, None);
        assert_eq!(record.segment.as_deref(), Some("Consumer"));
    }
}

//! Sales Record Types
//! Raw rows as loaded from the CSV and the typed rows that survive cleaning.

use chrono::NaiveDate;

pub const ORDER_DATE: &str = "Order Date";
pub const SHIP_DATE: &str = "Ship Date";
pub const SALES: &str = "Sales";
pub const PROFIT: &str = "Profit";
pub const DISCOUNT: &str = "Discount";
pub const STATE: &str = "State";
pub const CATEGORY: &str = "Category";
pub const REGION: &str = "Region";
pub const SEGMENT: &str = "Segment";

/// Columns that must be present in the header.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    ORDER_DATE, SHIP_DATE, SALES, PROFIT, DISCOUNT, STATE, CATEGORY, REGION, SEGMENT,
];

/// A row exactly as loaded: dates still unparsed, any cell may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSalesRecord {
    pub order_date: Option<String>,
    pub ship_date: Option<String>,
    pub sales: Option<f64>,
    pub profit: Option<f64>,
    pub discount: Option<f64>,
    pub state: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub segment: Option<String>,
}

/// A clean record: both dates parsed, sales and profit present.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub order_date: NaiveDate,
    pub ship_date: NaiveDate,
    pub sales: f64,
    pub profit: f64,
    pub discount: Option<f64>,
    pub state: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub segment: Option<String>,
}

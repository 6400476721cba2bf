//! CSV Data Loader Module
//! Handles CSV file loading and raw record extraction using Polars.

use super::record::*;
use log::debug;
use polars::io::csv::read::NullValues;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Cell texts read as missing, matching pandas' `read_csv` defaults.
const NULL_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file and check that every required column is present.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        let null_values = NULL_TOKENS.iter().map(|t| PlSmallStr::from(*t)).collect();

        // Malformed cells become nulls instead of failing the whole load
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .with_null_values(Some(NullValues::AllColumns(null_values)))
            .finish()?
            .collect()?;

        let present = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !present.iter().any(|p| p == *name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns(missing));
        }

        debug!(
            "loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Extract the loaded table as raw records, in file order.
    pub fn raw_records(&self) -> Result<Vec<RawSalesRecord>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;

        let mut order_dates = string_values(df, ORDER_DATE)?.into_iter();
        let mut ship_dates = string_values(df, SHIP_DATE)?.into_iter();
        let mut sales = float_values(df, SALES)?.into_iter();
        let mut profits = float_values(df, PROFIT)?.into_iter();
        let mut discounts = float_values(df, DISCOUNT)?.into_iter();
        let mut states = string_values(df, STATE)?.into_iter();
        let mut categories = string_values(df, CATEGORY)?.into_iter();
        let mut regions = string_values(df, REGION)?.into_iter();
        let mut segments = string_values(df, SEGMENT)?.into_iter();

        let records = (0..df.height())
            .map(|_| RawSalesRecord {
                order_date: order_dates.next().flatten(),
                ship_date: ship_dates.next().flatten(),
                sales: sales.next().flatten(),
                profit: profits.next().flatten(),
                discount: discounts.next().flatten(),
                state: states.next().flatten(),
                category: categories.next().flatten(),
                region: regions.next().flatten(),
                segment: segments.next().flatten(),
            })
            .collect();

        Ok(records)
    }
}

/// Column values as text; nulls stay `None`.
fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect();
    Ok(values)
}

/// Column values as f64; unparsable cells and NaN count as missing.
fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

//! Data module - CSV loading and cleaning

mod loader;
mod processor;
mod record;

pub use loader::DataLoader;
pub use processor::DataProcessor;
pub use record::SalesRecord;

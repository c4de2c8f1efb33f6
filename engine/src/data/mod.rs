pub mod csv_parser;
pub mod market_data;

pub use csv_parser::CsvPriceSource;
pub use market_data::PriceTable;

use crate::error::Result;
use shared::models::PriceRecord;

/// Provider of raw price rows. A render fetches everything once; failures propagate unchanged.
pub trait PriceSource {
    fn fetch_all(&self) -> Result<Vec<PriceRecord>>;
}

impl PriceSource for Vec<PriceRecord> {
    fn fetch_all(&self) -> Result<Vec<PriceRecord>> {
        Ok(self.clone())
    }
}

use csv::ReaderBuilder;
use serde::Deserialize;
use shared::models::PriceRecord;
use shared::utils::parse_date;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::PriceSource;
use crate::error::{EngineError, Result};

// Header: stock_symbol,date,open_price,high_price,low_price,close_price,volume
// Example Row: AAPL,2024-01-02,187.15,188.44,183.89,185.64,82488700
// The short names symbol/open/high/low/close are accepted too.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "stock_symbol")]
    symbol: String,
    date: String,
    #[serde(alias = "open_price")]
    open: f64,
    #[serde(alias = "high_price")]
    high: f64,
    #[serde(alias = "low_price")]
    low: f64,
    #[serde(alias = "close_price")]
    close: f64,
    volume: u64,
}

/// Reads every price row from a delimited text file.
pub struct CsvPriceSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvPriceSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn load_records(&self) -> Result<Vec<PriceRecord>> {
        let file = File::open(&self.path)?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for (idx, result) in rdr.deserialize::<CsvRow>().enumerate() {
            let line = idx + 2; // header is line 1
            let row = result.map_err(|e| match e.kind() {
                csv::ErrorKind::Deserialize { .. } => EngineError::CsvDataFormatError(format!(
                    "Error reading record at line {}: {}",
                    line, e
                )),
                _ => EngineError::from(e),
            })?;

            let date = parse_date(&row.date).ok_or_else(|| {
                EngineError::CsvDataFormatError(format!(
                    "Error parsing 'date' at line {}: '{}' is not YYYY-MM-DD",
                    line, row.date
                ))
            })?;

            for (field, value) in [
                ("open", row.open),
                ("high", row.high),
                ("low", row.low),
                ("close", row.close),
            ] {
                if !value.is_finite() {
                    return Err(EngineError::CsvDataFormatError(format!(
                        "Error parsing '{}' at line {}: {} is not a finite price",
                        field, line, value
                    )));
                }
            }

            records.push(PriceRecord {
                symbol: row.symbol,
                date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        tracing::debug!(path = %self.path.display(), rows = records.len(), "Parsed price CSV");
        Ok(records)
    }
}

impl PriceSource for CsvPriceSource {
    fn fetch_all(&self) -> Result<Vec<PriceRecord>> {
        self.load_records()
    }
}

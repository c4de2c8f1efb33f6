// In-memory price table built once per render from the fetched rows
use shared::models::{DateRange, PriceRecord, PriceSeries};
use std::collections::BTreeMap;

pub struct PriceTable {
    // Rows per symbol, ascending by date, at most one row per date
    data: BTreeMap<String, Vec<PriceRecord>>,
}

impl PriceTable {
    pub fn new() -> Self {
        PriceTable {
            data: BTreeMap::new(),
        }
    }

    pub fn from_records(records: Vec<PriceRecord>) -> Self {
        let mut table = Self::new();
        table.add_records(records);
        table
    }

    pub fn add_records(&mut self, new_records: Vec<PriceRecord>) {
        let mut by_symbol: BTreeMap<String, Vec<PriceRecord>> = BTreeMap::new();
        for record in new_records {
            by_symbol.entry(record.symbol.clone()).or_default().push(record);
        }

        for (symbol, records) in by_symbol {
            let rows = self.data.entry(symbol.clone()).or_default();
            rows.extend(records);
            // Stable sort keeps the earliest-seen row first among equal dates
            rows.sort_by_key(|r| r.date);
            let before = rows.len();
            rows.dedup_by_key(|r| r.date);
            let dropped = before - rows.len();
            if dropped > 0 {
                tracing::warn!(%symbol, dropped, "Dropped duplicate (symbol, date) rows");
            }
        }
    }

    /// Distinct symbols, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    /// Total number of rows across all symbols.
    pub fn len(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First and last date held for `symbol`.
    pub fn date_bounds(&self, symbol: &str) -> Option<DateRange> {
        let rows = self.data.get(symbol)?;
        let first = rows.first()?.date;
        let last = rows.last()?.date;
        DateRange::new(first, last).ok()
    }

    /// Rows of `symbol` inside `range`, ordered by date. `None` if the symbol is unknown;
    /// an empty series if it has no rows in the range.
    pub fn series(&self, symbol: &str, range: &DateRange) -> Option<PriceSeries> {
        self.data.get(symbol).map(|rows| {
            let records = rows
                .iter()
                .filter(|r| range.contains(r.date))
                .cloned()
                .collect();
            PriceSeries::new(symbol, records)
        })
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn record(symbol: &str, day: u32, close: f64) -> PriceRecord {
        PriceRecord {
            symbol: symbol.to_string(),
            date: date(day),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10,
        }
    }

    #[test]
    fn test_rows_sorted_per_symbol() {
        let table = PriceTable::from_records(vec![
            record("BBB", 3, 3.0),
            record("AAA", 2, 2.0),
            record("BBB", 1, 1.0),
            record("AAA", 1, 1.0),
        ]);
        assert_eq!(table.symbols(), vec!["AAA", "BBB"]);
        assert_eq!(table.len(), 4);

        let range = DateRange::new(date(1), date(31)).unwrap();
        let series = table.series("BBB", &range).unwrap();
        assert_eq!(series.dates(), vec![date(1), date(3)]);
    }

    #[test]
    fn test_duplicate_dates_keep_first() {
        let table =
            PriceTable::from_records(vec![record("AAA", 1, 1.0), record("AAA", 1, 99.0)]);
        assert_eq!(table.len(), 1);
        let range = table.date_bounds("AAA").unwrap();
        assert_eq!(table.series("AAA", &range).unwrap().closes(), vec![1.0]);
    }

    #[test]
    fn test_date_bounds() {
        let table = PriceTable::from_records(vec![
            record("AAA", 15, 1.0),
            record("AAA", 2, 1.0),
            record("AAA", 9, 1.0),
        ]);
        let bounds = table.date_bounds("AAA").unwrap();
        assert_eq!(bounds.start(), date(2));
        assert_eq!(bounds.end(), date(15));
        assert!(table.date_bounds("ZZZ").is_none());
    }

    #[test]
    fn test_series_filters_inclusive_range() {
        let table = PriceTable::from_records((1..=10).map(|d| record("AAA", d, d as f64)).collect());
        let range = DateRange::new(date(3), date(5)).unwrap();
        let series = table.series("AAA", &range).unwrap();
        assert_eq!(series.symbol, "AAA");
        assert_eq!(series.closes(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_series_empty_range_and_unknown_symbol() {
        let table = PriceTable::from_records(vec![record("AAA", 1, 1.0)]);
        let range = DateRange::new(date(20), date(25)).unwrap();
        assert!(table.series("AAA", &range).unwrap().is_empty());
        assert!(table.series("ZZZ", &range).is_none());
    }

    #[test]
    fn test_add_records_merges() {
        let mut table = PriceTable::new();
        assert!(table.is_empty());
        table.add_records(vec![record("AAA", 2, 2.0)]);
        table.add_records(vec![record("AAA", 1, 1.0), record("AAA", 2, 5.0)]);
        let range = table.date_bounds("AAA").unwrap();
        assert_eq!(table.series("AAA", &range).unwrap().closes(), vec![1.0, 2.0]);
    }
}

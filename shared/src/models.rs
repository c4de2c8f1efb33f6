use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::{format_date, normalize_selector, parse_date};

/// One daily OHLCV row for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceRecord {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Records of a single symbol, ordered by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub records: Vec<PriceRecord>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, records: Vec<PriceRecord>) -> Self {
        Self {
            symbol: symbol.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.close).collect()
    }
}

/// A derived series aligned position by position with the price series it came from.
/// `None` marks positions without enough lookback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorLine {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

impl IndicatorLine {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Output of one indicator calculation: one or more lines plus the parameters used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub parameters: serde_json::Value,
    pub lines: Vec<IndicatorLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Unknown chart type: '{0}'")]
    UnknownChartType(String),

    #[error("Unknown indicator: '{0}'")]
    UnknownIndicator(String),

    #[error("Window must be a positive integer, got {0}")]
    InvalidWindow(i64),

    #[error("Window is not an integer: '{0}'")]
    MalformedWindow(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date range start {start} is after end {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Unknown symbol: '{0}'")]
    UnknownSymbol(String),
}

/// Visual style of the base price trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    Bar,
    Candlestick,
    Line,
    Area,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Bar,
        ChartType::Candlestick,
        ChartType::Line,
        ChartType::Area,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar Chart",
            ChartType::Candlestick => "Candlestick Chart",
            ChartType::Line => "Line Chart",
            ChartType::Area => "Area Chart",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartType {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_selector(s).as_str() {
            "bar chart" | "bar" => Ok(ChartType::Bar),
            "candlestick chart" | "candlestick" | "candle" => Ok(ChartType::Candlestick),
            "line chart" | "line" => Ok(ChartType::Line),
            "area chart" | "area" => Ok(ChartType::Area),
            _ => Err(SelectionError::UnknownChartType(s.to_string())),
        }
    }
}

/// Overlay indicators offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    Sma,
    Ema,
    BollingerBands,
    KeltnerChannels,
    Envelopes,
    AverageTrueRange,
    PriceChannels,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 7] = [
        IndicatorKind::Sma,
        IndicatorKind::Ema,
        IndicatorKind::BollingerBands,
        IndicatorKind::KeltnerChannels,
        IndicatorKind::Envelopes,
        IndicatorKind::AverageTrueRange,
        IndicatorKind::PriceChannels,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IndicatorKind::Sma => "SMA",
            IndicatorKind::Ema => "EMA",
            IndicatorKind::BollingerBands => "Bollinger Bands",
            IndicatorKind::KeltnerChannels => "Keltner Channels",
            IndicatorKind::Envelopes => "Envelopes",
            IndicatorKind::AverageTrueRange => "Average True Range (ATR)",
            IndicatorKind::PriceChannels => "Price Channels",
        }
    }

    /// Parses a selector where "none" or an empty string means no overlay.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, SelectionError> {
        match normalize_selector(s).as_str() {
            "" | "none" => Ok(None),
            _ => s.parse().map(Some),
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IndicatorKind {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_selector(s).as_str() {
            "sma" | "simple moving average" => Ok(IndicatorKind::Sma),
            "ema" | "exponential moving average" => Ok(IndicatorKind::Ema),
            "bollinger bands" | "bollinger" => Ok(IndicatorKind::BollingerBands),
            "keltner channels" | "keltner channel" | "keltner" => Ok(IndicatorKind::KeltnerChannels),
            "envelopes" | "envelope" => Ok(IndicatorKind::Envelopes),
            "average true range (atr)" | "average true range" | "atr" => {
                Ok(IndicatorKind::AverageTrueRange)
            }
            "price channels" | "price channel" | "donchian" => Ok(IndicatorKind::PriceChannels),
            _ => Err(SelectionError::UnknownIndicator(s.to_string())),
        }
    }
}

/// Lookback length of an indicator. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "usize")]
pub struct Window(NonZeroUsize);

impl Window {
    pub const DEFAULT: usize = 20;

    pub fn new(value: i64) -> Result<Self, SelectionError> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Window)
            .ok_or(SelectionError::InvalidWindow(value))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for Window {
    fn default() -> Self {
        Window(NonZeroUsize::new(Self::DEFAULT).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<i64> for Window {
    type Error = SelectionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Window::new(value)
    }
}

impl From<Window> for usize {
    fn from(window: Window) -> Self {
        window.get()
    }
}

impl FromStr for Window {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| SelectionError::MalformedWindow(s.to_string()))?;
        Window::new(value)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Inclusive date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SelectionError> {
        if start > end {
            return Err(SelectionError::InvertedDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, SelectionError> {
        let start_date =
            parse_date(start).ok_or_else(|| SelectionError::InvalidDate(start.to_string()))?;
        let end_date = parse_date(end).ok_or_else(|| SelectionError::InvalidDate(end.to_string()))?;
        Self::new(start_date, end_date)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", format_date(self.start), format_date(self.end))
    }
}

/// Everything a user picks before a chart is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSelection {
    pub symbol: String,
    pub range: DateRange,
    pub chart_type: ChartType,
    pub indicator: Option<IndicatorKind>,
    pub window: Window,
}

impl ChartSelection {
    /// Validates raw selector strings. Unknown chart types or indicators, non-positive windows
    /// and inverted date ranges are rejected here, before any computation.
    pub fn parse(
        symbol: &str,
        start: &str,
        end: &str,
        chart_type: &str,
        indicator: &str,
        window: &str,
    ) -> Result<Self, SelectionError> {
        Ok(Self {
            symbol: symbol.trim().to_string(),
            range: DateRange::parse(start, end)?,
            chart_type: chart_type.parse()?,
            indicator: IndicatorKind::parse_optional(indicator)?,
            window: window.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_chart_type_accepts_dashboard_labels() {
        for chart_type in ChartType::ALL {
            assert_eq!(chart_type.label().parse::<ChartType>().unwrap(), chart_type);
        }
        assert_eq!("line".parse::<ChartType>().unwrap(), ChartType::Line);
        assert_eq!("CANDLESTICK".parse::<ChartType>().unwrap(), ChartType::Candlestick);
    }

    #[test]
    fn test_chart_type_unknown() {
        let err = "Pie Chart".parse::<ChartType>().unwrap_err();
        assert_eq!(err, SelectionError::UnknownChartType("Pie Chart".to_string()));
    }

    #[test]
    fn test_indicator_accepts_dashboard_labels() {
        for kind in IndicatorKind::ALL {
            assert_eq!(kind.label().parse::<IndicatorKind>().unwrap(), kind);
        }
        assert_eq!("atr".parse::<IndicatorKind>().unwrap(), IndicatorKind::AverageTrueRange);
    }

    #[test]
    fn test_indicator_optional() {
        assert_eq!(IndicatorKind::parse_optional("None").unwrap(), None);
        assert_eq!(IndicatorKind::parse_optional("").unwrap(), None);
        assert_eq!(
            IndicatorKind::parse_optional("Envelopes").unwrap(),
            Some(IndicatorKind::Envelopes)
        );
        assert!(matches!(
            IndicatorKind::parse_optional("MACD"),
            Err(SelectionError::UnknownIndicator(_))
        ));
    }

    #[test]
    fn test_window_rejects_non_positive() {
        assert_eq!(Window::new(0), Err(SelectionError::InvalidWindow(0)));
        assert_eq!(Window::new(-5), Err(SelectionError::InvalidWindow(-5)));
        assert_eq!(Window::new(5).unwrap().get(), 5);
        assert_eq!(Window::default().get(), 20);
    }

    #[test]
    fn test_window_from_str() {
        assert_eq!("14".parse::<Window>().unwrap().get(), 14);
        assert!(matches!("abc".parse::<Window>(), Err(SelectionError::MalformedWindow(_))));
        assert!(matches!("0".parse::<Window>(), Err(SelectionError::InvalidWindow(0))));
    }

    #[test]
    fn test_window_serde() {
        let window: Window = serde_json::from_str("10").unwrap();
        assert_eq!(window.get(), 10);
        assert!(serde_json::from_str::<Window>("0").is_err());
        assert_eq!(serde_json::to_string(&window).unwrap(), "10");
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));

        let single_day = DateRange::new(date(2024, 1, 5), date(2024, 1, 5)).unwrap();
        assert!(single_day.contains(date(2024, 1, 5)));
    }

    #[test]
    fn test_date_range_inverted() {
        let err = DateRange::parse("2024-02-01", "2024-01-01").unwrap_err();
        assert!(matches!(err, SelectionError::InvertedDateRange { .. }));
    }

    #[test]
    fn test_date_range_bad_date() {
        let err = DateRange::parse("yesterday", "2024-01-01").unwrap_err();
        assert_eq!(err, SelectionError::InvalidDate("yesterday".to_string()));
    }

    #[test]
    fn test_chart_selection_parse() {
        let selection =
            ChartSelection::parse("AAA", "2024-01-01", "2024-03-01", "Line Chart", "SMA", "5")
                .unwrap();
        assert_eq!(selection.symbol, "AAA");
        assert_eq!(selection.chart_type, ChartType::Line);
        assert_eq!(selection.indicator, Some(IndicatorKind::Sma));
        assert_eq!(selection.window.get(), 5);
    }

    #[test]
    fn test_chart_selection_rejects_unknown_indicator() {
        let result =
            ChartSelection::parse("AAA", "2024-01-01", "2024-03-01", "Line Chart", "RSI", "5");
        assert_eq!(result, Err(SelectionError::UnknownIndicator("RSI".to_string())));
    }

    #[test]
    fn test_typical_price() {
        let record = PriceRecord {
            symbol: "AAA".to_string(),
            date: date(2024, 1, 2),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
            volume: 100,
        };
        assert!((record.typical_price() - 32.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_indicator_line_defined_count() {
        let line = IndicatorLine::new("SMA (3)", vec![None, None, Some(2.0), Some(3.0)]);
        assert_eq!(line.defined_count(), 2);
    }
}

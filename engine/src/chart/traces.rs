// Plotly trace descriptions for the base price trace and indicator overlays
use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{ChartType, IndicatorLine, PriceSeries};

const LINE_MODE: &str = "lines";
const FILL_TO_ZERO: &str = "tozeroy";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Candlestick {
        name: String,
        x: Vec<NaiveDate>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    },
    Scatter {
        name: String,
        x: Vec<NaiveDate>,
        y: Vec<Option<f64>>, // null renders as a gap
        mode: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
    },
    Bar {
        name: String,
        x: Vec<NaiveDate>,
        y: Vec<f64>,
    },
}

impl Trace {
    /// Base trace for the selected chart style. Bar charts plot the close.
    pub fn base(series: &PriceSeries, chart_type: ChartType) -> Self {
        let name = series.symbol.clone();
        let x = series.dates();
        match chart_type {
            ChartType::Candlestick => Trace::Candlestick {
                name,
                x,
                open: series.records.iter().map(|r| r.open).collect(),
                high: series.records.iter().map(|r| r.high).collect(),
                low: series.records.iter().map(|r| r.low).collect(),
                close: series.closes(),
            },
            ChartType::Line => Trace::Scatter {
                name,
                x,
                y: series.closes().into_iter().map(Some).collect(),
                mode: LINE_MODE.to_string(),
                fill: None,
            },
            ChartType::Bar => Trace::Bar {
                name,
                x,
                y: series.closes(),
            },
            ChartType::Area => Trace::Scatter {
                name,
                x,
                y: series.closes().into_iter().map(Some).collect(),
                mode: LINE_MODE.to_string(),
                fill: Some(FILL_TO_ZERO.to_string()),
            },
        }
    }

    /// Line overlay for one indicator output, sharing the base trace's x values.
    pub fn overlay(dates: &[NaiveDate], line: &IndicatorLine) -> Self {
        Trace::Scatter {
            name: line.label.clone(),
            x: dates.to_vec(),
            y: line.values.clone(),
            mode: LINE_MODE.to_string(),
            fill: None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Trace::Candlestick { name, .. } | Trace::Scatter { name, .. } | Trace::Bar { name, .. } => {
                name
            }
        }
    }

    /// Number of x positions.
    pub fn len(&self) -> usize {
        match self {
            Trace::Candlestick { x, .. } | Trace::Scatter { x, .. } | Trace::Bar { x, .. } => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positions with a value to draw.
    pub fn defined_points(&self) -> usize {
        match self {
            Trace::Scatter { y, .. } => y.iter().filter(|v| v.is_some()).count(),
            _ => self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PriceRecord;

    fn series() -> PriceSeries {
        let records = (1..=3)
            .map(|d| PriceRecord {
                symbol: "AAA".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 2, d).unwrap(),
                open: d as f64,
                high: d as f64 + 1.0,
                low: d as f64 - 1.0,
                close: d as f64 + 0.5,
                volume: 100,
            })
            .collect();
        PriceSeries::new("AAA", records)
    }

    #[test]
    fn test_candlestick_quartet() {
        let trace = Trace::base(&series(), ChartType::Candlestick);
        match &trace {
            Trace::Candlestick { open, high, low, close, .. } => {
                assert_eq!(open, &vec![1.0, 2.0, 3.0]);
                assert_eq!(high, &vec![2.0, 3.0, 4.0]);
                assert_eq!(low, &vec![0.0, 1.0, 2.0]);
                assert_eq!(close, &vec![1.5, 2.5, 3.5]);
            }
            other => panic!("expected candlestick, got {:?}", other),
        }
        assert_eq!(trace.len(), 3);
    }

    #[test]
    fn test_bar_plots_close() {
        match Trace::base(&series(), ChartType::Bar) {
            Trace::Bar { y, .. } => assert_eq!(y, vec![1.5, 2.5, 3.5]),
            other => panic!("expected bar, got {:?}", other),
        }
    }

    #[test]
    fn test_area_fills_to_zero() {
        let value = serde_json::to_value(Trace::base(&series(), ChartType::Area)).unwrap();
        assert_eq!(value["type"], "scatter");
        assert_eq!(value["fill"], "tozeroy");
        assert_eq!(value["x"][0], "2024-02-01");
    }

    #[test]
    fn test_line_has_no_fill() {
        let value = serde_json::to_value(Trace::base(&series(), ChartType::Line)).unwrap();
        assert_eq!(value["mode"], "lines");
        assert!(value.get("fill").is_none());
        assert_eq!(value["name"], "AAA");
    }

    #[test]
    fn test_overlay_gaps_serialize_as_null() {
        let dates = series().dates();
        let line = IndicatorLine::new("SMA (2)", vec![None, Some(2.0), Some(3.0)]);
        let trace = Trace::overlay(&dates, &line);
        assert_eq!(trace.name(), "SMA (2)");
        assert_eq!(trace.defined_points(), 2);
        let value = serde_json::to_value(&trace).unwrap();
        assert!(value["y"][0].is_null());
        assert_eq!(value["y"][1], 2.0);
    }
}

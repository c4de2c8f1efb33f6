// Average True Range (ATR) indicator implementation
use super::sma::sma;
use super::{line_label, IndicatorCalculator};
use serde_json::Value;
use shared::models::{IndicatorLine, PriceRecord, Window};

/// max(high - low, |high - prev close|, |low - prev close|); the first row has no previous
/// close and falls back to high - low.
pub fn true_range(data: &[PriceRecord]) -> Vec<f64> {
    data.iter()
        .enumerate()
        .map(|(i, record)| {
            let range = record.high - record.low;
            match i.checked_sub(1).map(|prev| data[prev].close) {
                None => range,
                Some(prev_close) => range
                    .max((record.high - prev_close).abs())
                    .max((record.low - prev_close).abs()),
            }
        })
        .collect()
}

/// Simple rolling mean of true range over `window`.
pub fn average_true_range(data: &[PriceRecord], window: usize) -> Vec<Option<f64>> {
    sma(&true_range(data), window)
}

pub struct AverageTrueRange {
    name: String,
    window: Window,
}

impl AverageTrueRange {
    pub fn new(window: Window) -> Self {
        Self {
            name: line_label("ATR", window.get()),
            window,
        }
    }
}

impl IndicatorCalculator for AverageTrueRange {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window.get() })
    }

    fn calculate(&self, data: &[PriceRecord]) -> Vec<IndicatorLine> {
        vec![IndicatorLine::new(
            self.name.clone(),
            average_true_range(data, self.window.get()),
        )]
    }
}

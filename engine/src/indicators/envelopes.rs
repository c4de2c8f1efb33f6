// Moving average envelopes: SMA·(1 ± p)
use super::sma::sma;
use super::{closes, line_label, IndicatorCalculator};
use serde_json::Value;
use shared::models::{IndicatorLine, PriceRecord, Window};

/// Returns (upper, lower).
pub fn envelopes(
    values: &[f64],
    window: usize,
    percent: f64,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let average = sma(values, window);
    let upper = average.iter().map(|v| v.map(|m| m * (1.0 + percent))).collect();
    let lower = average.iter().map(|v| v.map(|m| m * (1.0 - percent))).collect();
    (upper, lower)
}

pub struct Envelopes {
    name: String,
    window: Window,
    percent: f64,
}

impl Envelopes {
    pub fn new(window: Window, percent: f64) -> Self {
        Self {
            name: line_label("Envelopes", window.get()),
            window,
            percent,
        }
    }
}

impl IndicatorCalculator for Envelopes {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window.get(), "percent": self.percent })
    }

    fn calculate(&self, data: &[PriceRecord]) -> Vec<IndicatorLine> {
        let w = self.window.get();
        let (upper, lower) = envelopes(&closes(data), w, self.percent);
        vec![
            IndicatorLine::new(line_label("Upper Envelope", w), upper),
            IndicatorLine::new(line_label("Lower Envelope", w), lower),
        ]
    }
}

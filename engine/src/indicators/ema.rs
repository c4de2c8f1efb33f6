// Exponential Moving Average (EMA) indicator implementation
use super::{closes, line_label, IndicatorCalculator};
use serde_json::Value;
use shared::models::{IndicatorLine, PriceRecord, Window};

/// Recursive average with α = 2 / (window + 1), seeded from the first value.
///
/// Because the seed is the first raw value and not an SMA of the first window, a finite input
/// gives an output with no gaps, even when `window` exceeds the series length.
/// A NaN or infinite value is a gap and leaves the running average untouched.
pub fn ema(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let multiplier = 2.0 / (window as f64 + 1.0);
    let mut previous: Option<f64> = None;
    values
        .iter()
        .map(|&value| {
            if !value.is_finite() {
                return None;
            }
            let next = match previous {
                None => value,
                Some(prev) => (value - prev) * multiplier + prev,
            };
            previous = Some(next);
            Some(next)
        })
        .collect()
}

pub struct Ema {
    name: String,
    window: Window,
}

impl Ema {
    pub fn new(window: Window) -> Self {
        Self {
            name: line_label("EMA", window.get()),
            window,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window.get(), "seed": "first_close" })
    }

    fn calculate(&self, data: &[PriceRecord]) -> Vec<IndicatorLine> {
        vec![IndicatorLine::new(
            self.name.clone(),
            ema(&closes(data), self.window.get()),
        )]
    }
}

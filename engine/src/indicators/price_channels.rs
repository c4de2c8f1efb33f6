// Price Channels (Donchian): rolling highest high and lowest low
use super::{line_label, IndicatorCalculator};
use serde_json::Value;
use shared::models::{IndicatorLine, PriceRecord, Window};

fn rolling_extreme(values: &[f64], window: usize, pick: fn(f64, f64) -> f64) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if window == 0 || i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            if slice.iter().any(|v| !v.is_finite()) {
                return None;
            }
            slice.iter().copied().reduce(pick)
        })
        .collect()
}

/// Returns (high channel, low channel), computed on the high and low fields.
pub fn price_channels(data: &[PriceRecord], window: usize) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let highs: Vec<f64> = data.iter().map(|r| r.high).collect();
    let lows: Vec<f64> = data.iter().map(|r| r.low).collect();
    (
        rolling_extreme(&highs, window, f64::max),
        rolling_extreme(&lows, window, f64::min),
    )
}

pub struct PriceChannels {
    name: String,
    window: Window,
}

impl PriceChannels {
    pub fn new(window: Window) -> Self {
        Self {
            name: line_label("Price Channels", window.get()),
            window,
        }
    }
}

impl IndicatorCalculator for PriceChannels {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window.get() })
    }

    fn calculate(&self, data: &[PriceRecord]) -> Vec<IndicatorLine> {
        let w = self.window.get();
        let (high, low) = price_channels(data, w);
        vec![
            IndicatorLine::new(line_label("High Channel", w), high),
            IndicatorLine::new(line_label("Low Channel", w), low),
        ]
    }
}

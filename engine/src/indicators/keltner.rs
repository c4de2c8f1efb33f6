// Keltner Channels: EMA of typical price ± m·ATR
use super::atr::average_true_range;
use super::ema::ema;
use super::{line_label, zip_defined, IndicatorCalculator};
use serde_json::Value;
use shared::models::{IndicatorLine, PriceRecord, Window};

/// Returns (middle, upper, lower). The middle line is defined wherever the typical price is
/// finite; the channel edges are gaps wherever either line is.
pub fn keltner_channels(
    data: &[PriceRecord],
    window: usize,
    multiplier: f64,
) -> (Vec<Option<f64>>, Vec<Option<f64>>, Vec<Option<f64>>) {
    let typical: Vec<f64> = data.iter().map(PriceRecord::typical_price).collect();
    let middle = ema(&typical, window);
    let atr = average_true_range(data, window);

    let upper = zip_defined(&middle, &atr, |m, a| m + multiplier * a);
    let lower = zip_defined(&middle, &atr, |m, a| m - multiplier * a);
    (middle, upper, lower)
}

pub struct KeltnerChannels {
    name: String,
    window: Window,
    multiplier: f64,
}

impl KeltnerChannels {
    pub fn new(window: Window, multiplier: f64) -> Self {
        Self {
            name: line_label("Keltner Channels", window.get()),
            window,
            multiplier,
        }
    }
}

impl IndicatorCalculator for KeltnerChannels {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window.get(), "multiplier": self.multiplier })
    }

    fn calculate(&self, data: &[PriceRecord]) -> Vec<IndicatorLine> {
        let w = self.window.get();
        let (middle, upper, lower) = keltner_channels(data, w, self.multiplier);
        vec![
            IndicatorLine::new(line_label("Keltner EMA", w), middle),
            IndicatorLine::new(line_label("Upper Keltner Channel", w), upper),
            IndicatorLine::new(line_label("Lower Keltner Channel", w), lower),
        ]
    }
}

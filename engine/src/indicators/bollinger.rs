// Bollinger Bands: SMA ± k standard deviations of close
use super::sma::sma;
use super::{closes, line_label, IndicatorCalculator};
use serde_json::Value;
use shared::models::{IndicatorLine, PriceRecord, Window};

/// Returns (middle, upper, lower).
///
/// σ is the sample standard deviation (n - 1 denominator) of the trailing window, taken as 0
/// when `window == 1`.
pub fn bollinger_bands(
    values: &[f64],
    window: usize,
    std_dev_mult: f64,
) -> (Vec<Option<f64>>, Vec<Option<f64>>, Vec<Option<f64>>) {
    let middle = sma(values, window);
    let mut upper = vec![None; values.len()];
    let mut lower = vec![None; values.len()];

    for (i, mean) in middle.iter().enumerate() {
        let Some(mean) = *mean else { continue };
        let std_dev = rolling_std_dev(&values[i + 1 - window..=i], mean);
        upper[i] = Some(mean + std_dev_mult * std_dev);
        lower[i] = Some(mean - std_dev_mult * std_dev);
    }

    (middle, upper, lower)
}

fn rolling_std_dev(slice: &[f64], mean: f64) -> f64 {
    if slice.len() < 2 {
        return 0.0;
    }
    let variance =
        slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (slice.len() - 1) as f64;
    variance.sqrt()
}

pub struct BollingerBands {
    name: String,
    window: Window,
    std_dev_mult: f64,
}

impl BollingerBands {
    pub fn new(window: Window, std_dev_mult: f64) -> Self {
        Self {
            name: line_label("Bollinger Bands", window.get()),
            window,
            std_dev_mult,
        }
    }
}

impl IndicatorCalculator for BollingerBands {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window.get(), "std_dev": self.std_dev_mult })
    }

    fn calculate(&self, data: &[PriceRecord]) -> Vec<IndicatorLine> {
        let w = self.window.get();
        let (middle, upper, lower) = bollinger_bands(&closes(data), w, self.std_dev_mult);
        vec![
            IndicatorLine::new(line_label("Middle Band", w), middle),
            IndicatorLine::new(line_label("Upper Band", w), upper),
            IndicatorLine::new(line_label("Lower Band", w), lower),
        ]
    }
}

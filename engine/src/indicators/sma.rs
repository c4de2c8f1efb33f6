// Simple Moving Average (SMA) indicator implementation
use super::{closes, line_label, IndicatorCalculator};
use serde_json::Value;
use shared::models::{IndicatorLine, PriceRecord, Window};

/// Trailing mean over `window` values. The first `window - 1` positions are gaps, and so is
/// every window holding a NaN or infinite value.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut results = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return results;
    }

    // Only finite values enter the running sum
    let mut sum = 0.0;
    let mut non_finite = 0usize;
    for i in 0..values.len() {
        if values[i].is_finite() {
            sum += values[i];
        } else {
            non_finite += 1;
        }
        if i >= window {
            let leaving = values[i - window];
            if leaving.is_finite() {
                sum -= leaving;
            } else {
                non_finite -= 1;
            }
        }
        if i + 1 >= window && non_finite == 0 {
            results[i] = Some(sum / window as f64);
        }
    }
    results
}

pub struct Sma {
    name: String,
    window: Window,
}

impl Sma {
    pub fn new(window: Window) -> Self {
        Self {
            name: line_label("SMA", window.get()),
            window,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window.get() })
    }

    fn calculate(&self, data: &[PriceRecord]) -> Vec<IndicatorLine> {
        vec![IndicatorLine::new(
            self.name.clone(),
            sma(&closes(data), self.window.get()),
        )]
    }
}

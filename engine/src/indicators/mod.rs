// Technical indicators module
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod envelopes;
pub mod keltner;
pub mod price_channels;
pub mod sma;

pub use atr::AverageTrueRange;
pub use bollinger::BollingerBands;
pub use ema::Ema;
pub use envelopes::Envelopes;
pub use keltner::KeltnerChannels;
pub use price_channels::PriceChannels;
pub use sma::Sma;

use crate::config::IndicatorSettings;
use serde_json::Value;
use shared::models::{Indicator, IndicatorKind, IndicatorLine, PriceRecord, Window};

// Common trait for all indicators.
// Every returned line has exactly `data.len()` values; `None` where lookback is insufficient.
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[PriceRecord]) -> Vec<IndicatorLine>;

    fn evaluate(&self, data: &[PriceRecord]) -> Indicator {
        Indicator {
            name: self.name().to_string(),
            parameters: self.parameters(),
            lines: self.calculate(data),
        }
    }
}

/// Maps a selected indicator to its calculator, with multipliers taken from settings.
pub fn build_calculator(
    kind: IndicatorKind,
    window: Window,
    settings: &IndicatorSettings,
) -> Box<dyn IndicatorCalculator> {
    match kind {
        IndicatorKind::Sma => Box::new(Sma::new(window)),
        IndicatorKind::Ema => Box::new(Ema::new(window)),
        IndicatorKind::BollingerBands => {
            Box::new(BollingerBands::new(window, settings.bollinger_std_dev))
        }
        IndicatorKind::KeltnerChannels => {
            Box::new(KeltnerChannels::new(window, settings.keltner_multiplier))
        }
        IndicatorKind::Envelopes => Box::new(Envelopes::new(window, settings.envelope_percent)),
        IndicatorKind::AverageTrueRange => Box::new(AverageTrueRange::new(window)),
        IndicatorKind::PriceChannels => Box::new(PriceChannels::new(window)),
    }
}

/// "Upper Band (20)"
pub(crate) fn line_label(prefix: &str, window: usize) -> String {
    format!("{} ({})", prefix, window)
}

pub(crate) fn closes(data: &[PriceRecord]) -> Vec<f64> {
    data.iter().map(|r| r.close).collect()
}

/// Applies `f` where both inputs are defined.
pub(crate) fn zip_defined(
    a: &[Option<f64>],
    b: &[Option<f64>],
    f: impl Fn(f64, f64) -> f64,
) -> Vec<Option<f64>> {
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            _ => None,
        })
        .collect()
}

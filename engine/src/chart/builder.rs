use shared::models::{ChartType, IndicatorKind, PriceSeries, Window};

use super::{ChartSpec, Layout, Trace};
use crate::config::{ChartSettings, IndicatorSettings};
use crate::indicators::build_calculator;

/// Builds a chart from an already filtered series. Stateless apart from its settings;
/// inputs are never mutated.
pub struct ChartBuilder<'a> {
    chart: &'a ChartSettings,
    indicators: &'a IndicatorSettings,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(chart: &'a ChartSettings, indicators: &'a IndicatorSettings) -> Self {
        Self { chart, indicators }
    }

    pub fn build(
        &self,
        series: &PriceSeries,
        symbol: &str,
        chart_type: ChartType,
        indicator: Option<IndicatorKind>,
        window: Window,
    ) -> ChartSpec {
        let base = Trace::base(series, chart_type);

        let overlays = match indicator {
            Some(kind) if !series.is_empty() => {
                let calculator = build_calculator(kind, window, self.indicators);
                let dates = series.dates();
                let result = calculator.evaluate(&series.records);
                tracing::debug!(
                    indicator = %result.name,
                    parameters = %result.parameters,
                    lines = result.lines.len(),
                    "Computed indicator overlay"
                );
                result
                    .lines
                    .iter()
                    .map(|line| Trace::overlay(&dates, line))
                    .collect()
            }
            Some(kind) => {
                tracing::debug!(indicator = %kind, "Empty series, skipping indicator overlay");
                Vec::new()
            }
            None => Vec::new(),
        };

        ChartSpec::new(base, overlays, Layout::new(symbol, self.chart))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::PriceRecord;

    fn linear_series(symbol: &str, n: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = (0..n)
            .map(|i| {
                let close = (i + 1) as f64;
                PriceRecord {
                    symbol: symbol.to_string(),
                    date: start + chrono::Days::new(i as u64),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1_000 + i as u64,
                }
            })
            .collect();
        PriceSeries::new(symbol, records)
    }

    fn build(
        series: &PriceSeries,
        chart_type: ChartType,
        indicator: Option<IndicatorKind>,
        window: i64,
    ) -> ChartSpec {
        let chart = ChartSettings::default();
        let indicators = IndicatorSettings::default();
        ChartBuilder::new(&chart, &indicators).build(
            series,
            &series.symbol,
            chart_type,
            indicator,
            Window::new(window).unwrap(),
        )
    }

    #[test]
    fn test_line_chart_with_sma() {
        let series = linear_series("AAA", 25);
        let spec = build(&series, ChartType::Line, Some(IndicatorKind::Sma), 5);

        assert_eq!(spec.base().len(), 25);
        assert_eq!(spec.overlays().len(), 1);
        let overlay = &spec.overlays()[0];
        assert_eq!(overlay.name(), "SMA (5)");
        assert_eq!(overlay.defined_points(), 21);
        match overlay {
            Trace::Scatter { y, .. } => {
                assert!((y[4].unwrap() - 3.0).abs() < 1e-9);
                assert!((y[24].unwrap() - 23.0).abs() < 1e-9);
            }
            other => panic!("overlay should be a line, got {:?}", other),
        }
    }

    #[test]
    fn test_overlay_count_per_indicator() {
        let series = linear_series("AAA", 30);
        let expected = [
            (IndicatorKind::Sma, 1),
            (IndicatorKind::Ema, 1),
            (IndicatorKind::BollingerBands, 3),
            (IndicatorKind::KeltnerChannels, 3),
            (IndicatorKind::Envelopes, 2),
            (IndicatorKind::AverageTrueRange, 1),
            (IndicatorKind::PriceChannels, 2),
        ];
        for (kind, count) in expected {
            let spec = build(&series, ChartType::Candlestick, Some(kind), 20);
            assert_eq!(spec.overlays().len(), count, "{}", kind);
            assert!(spec.overlays().iter().all(|t| t.len() == 30));
            assert!(spec.overlays().iter().all(|t| t.name().ends_with("(20)")));
        }
    }

    #[test]
    fn test_no_indicator_means_no_overlay() {
        let spec = build(&linear_series("AAA", 10), ChartType::Bar, None, 20);
        assert!(spec.overlays().is_empty());
        assert!(matches!(spec.base(), Trace::Bar { .. }));
    }

    #[test]
    fn test_empty_series_gives_empty_chart() {
        let series = PriceSeries::new("AAA", Vec::new());
        for chart_type in ChartType::ALL {
            let spec = build(&series, chart_type, Some(IndicatorKind::BollingerBands), 20);
            assert!(spec.base().is_empty());
            assert!(spec.overlays().is_empty());
            let value = serde_json::to_value(&spec).unwrap();
            assert_eq!(value["data"].as_array().unwrap().len(), 1);
            assert_eq!(value["layout"]["title"]["text"], "<b>AAA</b>");
        }
    }

    #[test]
    fn test_title_uses_explicit_symbol() {
        let chart = ChartSettings::default();
        let indicators = IndicatorSettings::default();
        let series = linear_series("AAA", 3);
        let spec = ChartBuilder::new(&chart, &indicators).build(
            &series,
            "Acme Corp",
            ChartType::Area,
            None,
            Window::default(),
        );
        assert_eq!(spec.layout().title.text, "<b>Acme Corp</b>");
    }

    #[test]
    fn test_figure_json_orders_base_first() {
        let series = linear_series("AAA", 25);
        let spec = build(&series, ChartType::Candlestick, Some(IndicatorKind::PriceChannels), 5);
        let value: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["type"], "candlestick");
        assert_eq!(data[1]["name"], "High Channel (5)");
        assert_eq!(data[2]["name"], "Low Channel (5)");
        assert!(data[1]["y"][3].is_null());
        assert_eq!(value["layout"]["xaxis"]["rangeslider"]["visible"], true);
    }

    #[test]
    fn test_builder_does_not_mutate_series() {
        let series = linear_series("AAA", 12);
        let before = series.clone();
        let _ = build(&series, ChartType::Line, Some(IndicatorKind::KeltnerChannels), 4);
        assert_eq!(series, before);
    }
}

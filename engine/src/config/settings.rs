// Dashboard settings, embedded as default.json and optionally replaced by a user file
use serde::Deserialize;
use shared::models::Window;
use std::path::Path;

use crate::error::{EngineError, Result};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DashboardSettings {
    pub version: String,
    pub chart: ChartSettings,
    pub indicators: IndicatorSettings,
    pub page: PageStyle,
    pub data: DataSettings,
}

/// Layout shared by every chart, whatever the base trace or overlay.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartSettings {
    pub height: u32,
    pub width: u32,
    pub grid_color: String,
    pub grid_width: u32,
    pub x_tick_format: String,
    pub y_tick_format: String,
    pub title_font_size: u32,
    pub range_selector: RangeSelectorStyle,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RangeSelectorStyle {
    pub background: String,
    pub active_color: String,
    pub y_anchor: String,
    pub y: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct IndicatorSettings {
    pub default_window: Window,
    /// k in SMA ± k·σ
    pub bollinger_std_dev: f64,
    /// m in EMA ± m·ATR
    pub keltner_multiplier: f64,
    /// p in SMA·(1 ± p)
    pub envelope_percent: f64,
}

/// Page-wide look of the rendering surface. Handed to the page renderer explicitly.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PageStyle {
    pub title: String,
    pub icon: String,
    pub wide_layout: bool,
    pub custom_css: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DataSettings {
    pub csv_delimiter: String, // JSON has no char type
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            height: 600,
            width: 1000,
            grid_color: "rgb(200, 200, 200)".to_string(),
            grid_width: 1,
            x_tick_format: "%Y-%m-%d".to_string(),
            y_tick_format: ".2f".to_string(),
            title_font_size: 30,
            range_selector: RangeSelectorStyle {
                background: "lightblue".to_string(),
                active_color: "darkblue".to_string(),
                y_anchor: "top".to_string(),
                y: -0.4,
            },
        }
    }
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            default_window: Window::default(),
            bollinger_std_dev: 2.0,
            keltner_multiplier: 2.0,
            envelope_percent: 0.025,
        }
    }
}

impl DataSettings {
    pub fn delimiter(&self) -> Result<u8> {
        match self.csv_delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(EngineError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }
}

impl DashboardSettings {
    pub fn load_default() -> Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "Loading dashboard settings from file");
        Self::from_json(&config_str)
    }

    pub fn from_json(config_str: &str) -> Result<Self> {
        let settings: DashboardSettings = serde_json::from_str(config_str)
            .map_err(|e| EngineError::ConfigError(format!("Malformed settings: {}", e)))?;
        settings.validate()?;
        tracing::debug!(version = %settings.version, "Dashboard settings validated");
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.chart.height == 0 || self.chart.width == 0 {
            return Err(EngineError::ConfigError(
                "Chart height and width must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.indicators.envelope_percent) {
            return Err(EngineError::ConfigError(format!(
                "envelope_percent must be in [0, 1), got {}",
                self.indicators.envelope_percent
            )));
        }
        for (name, value) in [
            ("bollinger_std_dev", self.indicators.bollinger_std_dev),
            ("keltner_multiplier", self.indicators.keltner_multiplier),
        ] {
            // NaN fails this check too
            if !(value > 0.0 && value.is_finite()) {
                return Err(EngineError::ConfigError(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        self.data.delimiter()?;
        Ok(())
    }
}

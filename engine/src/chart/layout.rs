// Shared layout: title, range selector presets, grid and tick formatting, fixed canvas size
use serde::Serialize;

use crate::config::ChartSettings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
    pub height: u32,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    pub rangeslider: RangeSlider,
    pub rangeselector: RangeSelector,
    pub showgrid: bool,
    pub gridcolor: String,
    pub gridwidth: u32,
    pub tickformat: String,
    pub autorange: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub gridcolor: String,
    pub gridwidth: u32,
    pub tickformat: String,
    pub showgrid: bool,
    pub autorange: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSelector {
    pub buttons: Vec<RangeButton>,
    pub bgcolor: String,
    pub activecolor: String,
    pub yanchor: String,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeStep {
    Day,
    Month,
    Year,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    Backward,
    ToDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub step: RangeStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stepmode: Option<StepMode>,
}

impl RangeButton {
    fn backward(count: u32, label: &str, step: RangeStep) -> Self {
        RangeButton {
            count: Some(count),
            label: Some(label.to_string()),
            step,
            stepmode: Some(StepMode::Backward),
        }
    }
}

/// 5D, 1M, 3M, YTD, 1Y, 3Y, 5Y, all
pub fn range_buttons() -> Vec<RangeButton> {
    vec![
        RangeButton::backward(5, "5D", RangeStep::Day),
        RangeButton::backward(1, "1M", RangeStep::Month),
        RangeButton::backward(3, "3M", RangeStep::Month),
        RangeButton {
            count: None,
            label: Some("YTD".to_string()),
            step: RangeStep::Year,
            stepmode: Some(StepMode::ToDate),
        },
        RangeButton::backward(1, "1Y", RangeStep::Year),
        RangeButton::backward(3, "3Y", RangeStep::Year),
        RangeButton::backward(5, "5Y", RangeStep::Year),
        RangeButton {
            count: None,
            label: None,
            step: RangeStep::All,
            stepmode: None,
        },
    ]
}

impl Layout {
    pub fn new(symbol: &str, settings: &ChartSettings) -> Self {
        let selector = &settings.range_selector;
        Layout {
            title: Title {
                text: format!("<b>{}</b>", symbol),
                x: 0.5,
                font: Font {
                    size: settings.title_font_size,
                },
            },
            xaxis: XAxis {
                rangeslider: RangeSlider { visible: true },
                rangeselector: RangeSelector {
                    buttons: range_buttons(),
                    bgcolor: selector.background.clone(),
                    activecolor: selector.active_color.clone(),
                    yanchor: selector.y_anchor.clone(),
                    y: selector.y,
                },
                showgrid: true,
                gridcolor: settings.grid_color.clone(),
                gridwidth: settings.grid_width,
                tickformat: settings.x_tick_format.clone(),
                autorange: true,
            },
            yaxis: YAxis {
                gridcolor: settings.grid_color.clone(),
                gridwidth: settings.grid_width,
                tickformat: settings.y_tick_format.clone(),
                showgrid: true,
                autorange: true,
            },
            height: settings.height,
            width: settings.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_json_shape() {
        let layout = Layout::new("AAPL", &ChartSettings::default());
        let value = serde_json::to_value(&layout).unwrap();

        assert_eq!(value["title"]["text"], "<b>AAPL</b>");
        assert_eq!(value["title"]["x"], 0.5);
        assert_eq!(value["title"]["font"]["size"], 30);
        assert_eq!(value["height"], 600);
        assert_eq!(value["width"], 1000);

        let xaxis = &value["xaxis"];
        assert_eq!(xaxis["rangeslider"]["visible"], true);
        assert_eq!(xaxis["gridcolor"], "rgb(200, 200, 200)");
        assert_eq!(xaxis["gridwidth"], 1);
        assert_eq!(xaxis["tickformat"], "%Y-%m-%d");
        assert_eq!(xaxis["rangeselector"]["bgcolor"], "lightblue");
        assert_eq!(xaxis["rangeselector"]["activecolor"], "darkblue");
        assert_eq!(xaxis["rangeselector"]["y"], -0.4);
        assert_eq!(value["yaxis"]["tickformat"], ".2f");
    }

    #[test]
    fn test_range_buttons() {
        let buttons = serde_json::to_value(range_buttons()).unwrap();
        let labels: Vec<&str> = buttons
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|b| b["label"].as_str())
            .collect();
        assert_eq!(labels, ["5D", "1M", "3M", "YTD", "1Y", "3Y", "5Y"]);

        assert_eq!(buttons[0]["count"], 5);
        assert_eq!(buttons[0]["step"], "day");
        assert_eq!(buttons[0]["stepmode"], "backward");
        assert_eq!(buttons[3]["stepmode"], "todate");
        assert!(buttons[3].get("count").is_none());
        assert_eq!(buttons[7], serde_json::json!({ "step": "all" }));
    }
}

pub mod settings;

pub use settings::{
    ChartSettings, DashboardSettings, DataSettings, IndicatorSettings, PageStyle,
    RangeSelectorStyle,
};

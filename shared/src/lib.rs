pub mod models;
pub mod utils;

// Models shared between the engine library, its binary and any rendering front-end.
pub use models::{
    ChartSelection, ChartType, DateRange, Indicator, IndicatorKind, IndicatorLine, PriceRecord,
    PriceSeries, SelectionError, Window,
};

// One render cycle: rows -> price table -> selection filter -> chart spec
use shared::models::{ChartSelection, DateRange, SelectionError};

use crate::chart::{ChartBuilder, ChartSpec};
use crate::config::DashboardSettings;
use crate::data::{PriceSource, PriceTable};
use crate::error::Result;

pub struct DashboardService {
    table: PriceTable,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(table: PriceTable, settings: DashboardSettings) -> Self {
        DashboardService { table, settings }
    }

    /// Fetches every row once from `source`. Fetch failures are returned as-is.
    pub fn load<S: PriceSource + ?Sized>(source: &S, settings: DashboardSettings) -> Result<Self> {
        let records = source.fetch_all()?;
        let table = PriceTable::from_records(records);
        tracing::info!(
            rows = table.len(),
            symbols = table.symbols().len(),
            "Loaded price table"
        );
        Ok(Self::new(table, settings))
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.table.symbols()
    }

    /// Full date span held for `symbol`, the range offered before the user narrows it.
    pub fn default_date_range(&self, symbol: &str) -> Result<DateRange> {
        self.table
            .date_bounds(symbol)
            .ok_or_else(|| SelectionError::UnknownSymbol(symbol.to_string()).into())
    }

    pub fn render(&self, selection: &ChartSelection) -> Result<ChartSpec> {
        let series = self
            .table
            .series(&selection.symbol, &selection.range)
            .ok_or_else(|| SelectionError::UnknownSymbol(selection.symbol.clone()))?;

        if series.is_empty() {
            tracing::warn!(
                symbol = %selection.symbol,
                range = %selection.range,
                "No rows in the selected date range"
            );
        }

        let builder = ChartBuilder::new(&self.settings.chart, &self.settings.indicators);
        let spec = builder.build(
            &series,
            &selection.symbol,
            selection.chart_type,
            selection.indicator,
            selection.window,
        );

        tracing::info!(
            symbol = %selection.symbol,
            range = %selection.range,
            chart_type = %selection.chart_type,
            indicator = ?selection.indicator.map(|k| k.label()),
            window = selection.window.get(),
            points = spec.base().len(),
            overlays = spec.overlays().len(),
            "Rendered chart"
        );
        Ok(spec)
    }
}

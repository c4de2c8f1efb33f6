// Dashboard entry point: one selection in, one chart (JSON or HTML page) out
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use engine::config::DashboardSettings;
use engine::data::CsvPriceSource;
use engine::error::EngineError;
use engine::render::render_page;
use engine::services::DashboardService;
use shared::models::ChartSelection;
use shared::utils::format_date;
use tracing::{error, info};

const DEFAULT_CHART: &str = "Line Chart";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    csv_path: PathBuf,
    symbol: Option<String>,
    from: Option<String>,
    to: Option<String>,
    chart: Option<String>,
    indicator: Option<String>,
    window: Option<String>,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    list_symbols: bool,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self, EngineError> {
        let mut parsed = CliArgs::default();
        let mut csv_path = None;

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            if flag == "--list-symbols" {
                parsed.list_symbols = true;
                i += 1;
                continue;
            }
            if !flag.starts_with("--") {
                if csv_path.replace(PathBuf::from(flag)).is_some() {
                    return Err(usage_error(&format!("unexpected argument '{}'", flag)));
                }
                i += 1;
                continue;
            }

            let value = args
                .get(i + 1)
                .cloned()
                .ok_or_else(|| usage_error(&format!("missing value for {}", flag)))?;
            match flag {
                "--symbol" => parsed.symbol = Some(value),
                "--from" => parsed.from = Some(value),
                "--to" => parsed.to = Some(value),
                "--chart" => parsed.chart = Some(value),
                "--indicator" => parsed.indicator = Some(value),
                "--window" => parsed.window = Some(value),
                "--config" => parsed.config = Some(PathBuf::from(value)),
                "--out" => parsed.out = Some(PathBuf::from(value)),
                _ => return Err(usage_error(&format!("unknown option '{}'", flag))),
            }
            i += 2;
        }

        parsed.csv_path = csv_path.ok_or_else(|| usage_error("missing <csv_path>"))?;
        Ok(parsed)
    }
}

fn usage_error(reason: &str) -> EngineError {
    EngineError::ConfigError(format!(
        "{}\nUsage: dashboard <csv_path> [--symbol S] [--from YYYY-MM-DD] [--to YYYY-MM-DD] \
         [--chart TYPE] [--indicator NAME] [--window N] [--config PATH] [--out PATH] [--list-symbols]",
        reason
    ))
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let settings = match &args.config {
        Some(path) => DashboardSettings::load_from_path(path)?,
        None => DashboardSettings::load_default()?,
    };

    let source = CsvPriceSource::new(&args.csv_path).with_delimiter(settings.data.delimiter()?);
    let service = DashboardService::load(&source, settings)?;

    if args.list_symbols {
        for symbol in service.symbols() {
            println!("{}", symbol);
        }
        return Ok(());
    }

    let symbol = match args.symbol {
        Some(symbol) => symbol,
        None => service
            .symbols()
            .first()
            .map(|s| s.to_string())
            .ok_or_else(|| EngineError::MarketDataError("No rows loaded".to_string()))?,
    };
    let bounds = service.default_date_range(symbol.trim())?;
    let from = args.from.unwrap_or_else(|| format_date(bounds.start()));
    let to = args.to.unwrap_or_else(|| format_date(bounds.end()));
    let chart = args.chart.unwrap_or_else(|| DEFAULT_CHART.to_string());
    let indicator = args.indicator.unwrap_or_default();
    let window = args
        .window
        .unwrap_or_else(|| service.settings().indicators.default_window.to_string());

    let selection = ChartSelection::parse(&symbol, &from, &to, &chart, &indicator, &window)
        .map_err(EngineError::from)?;
    let spec = service.render(&selection)?;

    match args.out {
        Some(path) if is_html(&path) => {
            let page = render_page(&spec, &service.settings().page)?;
            fs::write(&path, page).map_err(EngineError::from)?;
            info!(path = %path.display(), "Wrote dashboard page");
        }
        Some(path) => {
            fs::write(&path, spec.to_json_pretty()?).map_err(EngineError::from)?;
            info!(path = %path.display(), "Wrote chart JSON");
        }
        None => println!("{}", spec.to_json()?),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = CliArgs::parse(&args)
        .map_err(anyhow::Error::from)
        .and_then(run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let configuration = err
                .downcast_ref::<EngineError>()
                .map(EngineError::is_configuration_error)
                .unwrap_or(false);
            error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            if configuration {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

mod arbitrage;
mod config;
mod domain;
mod exchanges;
mod report;
mod scanner;

use std::env;
use std::process::ExitCode;

use config::{Config, ConfigError};
use report::Format;
use rust_decimal::Decimal;
use scanner::{CycleReport, Scanner};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// Command line options. Every value flag overrides the `scan` config section.
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config_path: Option<String>,
    pair: Option<String>,
    exchanges: Option<Vec<String>>,
    investment: Option<Decimal>,
    min_profit_pct: Option<Decimal>,
    watch: bool,
    json: bool,
}

impl CliOptions {
    fn parse<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut opts = CliOptions::default();

        for arg in args {
            if let Some(path) = arg.strip_prefix("--config=") {
                opts.config_path = Some(path.to_string());
            } else if let Some(pair) = arg.strip_prefix("--pair=") {
                opts.pair = Some(pair.to_string());
            } else if let Some(list) = arg.strip_prefix("--exchanges=") {
                opts.exchanges = Some(
                    list.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            } else if let Some(value) = arg.strip_prefix("--investment=") {
                opts.investment = Some(parse_decimal("--investment", value)?);
            } else if let Some(value) = arg.strip_prefix("--min-profit=") {
                opts.min_profit_pct = Some(parse_decimal("--min-profit", value)?);
            } else if arg == "--watch" {
                opts.watch = true;
            } else if arg == "--json" {
                opts.json = true;
            } else {
                return Err(ConfigError::Override {
                    flag: arg,
                    reason: "unknown flag".to_string(),
                });
            }
        }

        Ok(opts)
    }

    fn config_path(&self) -> &str {
        self.config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }

    fn format(&self) -> Format {
        if self.json { Format::Json } else { Format::Text }
    }

    /// Writes the overrides into `config` and re-validates it.
    fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(ref pair) = self.pair {
            config.scan.pair = pair.clone();
        }
        if let Some(ref exchanges) = self.exchanges {
            config.scan.exchanges = Some(exchanges.clone());
        }
        if let Some(investment) = self.investment {
            config.scan.investment = investment;
        }
        if let Some(min_profit_pct) = self.min_profit_pct {
            config.scan.min_profit_pct = min_profit_pct;
        }

        config.validate()
    }
}

fn parse_decimal(flag: &str, value: &str) -> Result<Decimal, ConfigError> {
    value.parse::<Decimal>().map_err(|e| ConfigError::Override {
        flag: flag.to_string(),
        reason: e.to_string(),
    })
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn print_report(report: &CycleReport, format: Format) {
    match report::render(report, format) {
        Ok(text) => println!("{}", text),
        Err(e) => error!(error = %e, "Failed to render report"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let opts = match CliOptions::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut config = match Config::load(opts.config_path()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}: {}", opts.config_path(), e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.app.log_level.as_deref());

    if let Err(e) = opts.apply(&mut config) {
        error!(error = %e, "Invalid command line override");
        return ExitCode::FAILURE;
    }

    let request = match config.arbitrage_request() {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Invalid scan request");
            return ExitCode::FAILURE;
        }
    };

    let scanner = match Scanner::from_config(&config) {
        Ok(scanner) => scanner,
        Err(e) => {
            error!(error = %e, "Failed to create scanner");
            return ExitCode::FAILURE;
        }
    };

    info!(
        app = %config.app.name,
        env = %config.app.env,
        config = %opts.config_path(),
        pair = %request.pair,
        exchanges = ?request.exchanges,
        investment = %request.investment,
        min_profit_pct = %request.min_profit_pct,
        "Scanner ready"
    );

    let format = opts.format();
    if opts.watch {
        scanner.watch(&request, |report| print_report(report, format)).await;
    } else if let Some(report) = scanner.scan(&request).await {
        print_report(&report, format);
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let opts = CliOptions::parse(Vec::new()).unwrap();
        assert_eq!(opts, CliOptions::default());
        assert_eq!(opts.config_path(), DEFAULT_CONFIG_PATH);
        assert_eq!(opts.format(), Format::Text);
    }

    #[test]
    fn test_parse_all_flags() {
        let opts = CliOptions::parse(args(&[
            "--config=/tmp/x.yaml",
            "--pair=ETH/USDT",
            "--exchanges=binance, kraken,,okx",
            "--investment=2500.50",
            "--min-profit=0.5",
            "--watch",
            "--json",
        ]))
        .unwrap();

        assert_eq!(opts.config_path(), "/tmp/x.yaml");
        assert_eq!(opts.pair.as_deref(), Some("ETH/USDT"));
        assert_eq!(
            opts.exchanges,
            Some(vec!["binance".to_string(), "kraken".to_string(), "okx".to_string()])
        );
        assert_eq!(opts.investment, Some(Decimal::new(250050, 2)));
        assert_eq!(opts.min_profit_pct, Some(Decimal::new(5, 1)));
        assert!(opts.watch);
        assert_eq!(opts.format(), Format::Json);
    }

    #[test]
    fn test_parse_invalid_decimal() {
        let result = CliOptions::parse(args(&["--investment=lots"]));
        assert!(matches!(result, Err(ConfigError::Override { ref flag, .. }) if flag == "--investment"));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert!(CliOptions::parse(args(&["--dry-run"])).is_err());
    }
}

//! Tests for config module.

use super::*;
use crate::arbitrage::SameExchangePolicy;
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;
use tempfile::NamedTempFile;

// ==================== Duration parsing tests ====================

#[test]
fn test_parse_duration_seconds() {
    let d = duration::parse_duration("30s").unwrap();
    assert_eq!(d, Duration::from_secs(30));
}

#[test]
fn test_parse_duration_minutes() {
    let d = duration::parse_duration("5m").unwrap();
    assert_eq!(d, Duration::from_secs(300));
}

#[test]
fn test_parse_duration_milliseconds() {
    let d = duration::parse_duration("250ms").unwrap();
    assert_eq!(d, Duration::from_millis(250));
}

#[test]
fn test_parse_duration_bare_number_is_seconds() {
    let d = duration::parse_duration("15").unwrap();
    assert_eq!(d, Duration::from_secs(15));
}

#[test]
fn test_parse_duration_fractional() {
    let d = duration::parse_duration("1.5s").unwrap();
    assert_eq!(d, Duration::from_millis(1500));
}

#[test]
fn test_parse_duration_empty() {
    let d = duration::parse_duration("").unwrap();
    assert_eq!(d, Duration::ZERO);
}

#[test]
fn test_parse_duration_invalid_unit() {
    let result = duration::parse_duration("10x");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("unknown duration unit"));
}

// ==================== YAML field loading tests ====================

/// Parse config from YAML string (for testing).
fn from_yaml(yaml: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn minimal_valid_yaml() -> String {
    r#"
app:
  name: scanner

exchanges:
  binance:
    enabled: true
  kraken:
    enabled: true
    fee_taker: "0.0026"

scan:
  pair: BTC/USDT
  investment: "1000"
  min_profit_pct: "1.0"

pairs:
  - BTC/USDT
  - ETH/USDT
"#
    .to_string()
}

#[test]
fn test_minimal_config_is_valid() {
    let config = from_yaml(&minimal_valid_yaml()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.app.env, "development");
    assert!(config.app.log_level.is_none());
}

#[test]
fn test_optional_sections_default() {
    let config = from_yaml(&minimal_valid_yaml()).unwrap();

    assert_eq!(config.currency.target, "AUD");
    assert_eq!(config.currency.rate_for("USDT"), Some(dec("1.52")));
    assert_eq!(config.http.timeout(), Duration::from_secs(5));
    assert!(config.http.retry.is_none());
    assert_eq!(config.scan.refresh_interval(), Duration::from_secs(10));
    assert_eq!(config.scan.cycle_timeout(), Duration::from_secs(15));
    assert_eq!(config.scan.same_exchange, SameExchangePolicy::Allow);
    assert!(config.scan.exchanges.is_none());
}

#[test]
fn test_load_exchange_fields() {
    let yaml = r#"
app:
  name: scanner
exchanges:
  coinspot:
    enabled: true
    fee_taker: "0.01"
    market_currency: AUD
    base_url: http://localhost:8080
    pairs:
      - BTC/USDT
  okx:
    enabled: false
scan:
  pair: BTC/USDT
  investment: 500
pairs:
  - BTC/USDT
"#;
    let config = from_yaml(yaml).unwrap();

    let coinspot = &config.exchanges["coinspot"];
    assert!(coinspot.enabled);
    assert_eq!(coinspot.fee_taker, Some(dec("0.01")));
    assert_eq!(coinspot.market_currency.as_deref(), Some("AUD"));
    assert_eq!(coinspot.base_url.as_deref(), Some("http://localhost:8080"));
    assert_eq!(coinspot.pairs.as_ref().unwrap().len(), 1);

    assert!(!config.exchanges["okx"].enabled);
    assert_eq!(config.scan.investment, dec("500"));
}

#[test]
fn test_load_currency_and_http_fields() {
    let yaml = r#"
app:
  name: scanner
  log_level: debug
currency:
  target: usd
  rates:
    AUD: "0.66"
http:
  timeout: 2s
  retry:
    max_attempts: 3
    initial_delay: 100ms
    max_delay: 1s
    multiplier: 1.5
exchanges:
  binance:
    enabled: true
scan:
  pair: BTC/USDT
  investment: "1000"
  refresh_interval: 30s
  cycle_timeout: 8
  same_exchange: reject
pairs:
  - BTC/USDT
"#;
    let config = from_yaml(yaml).unwrap();

    assert_eq!(config.app.log_level.as_deref(), Some("debug"));
    assert_eq!(config.currency.rate_for("USD"), Some(Decimal::ONE));
    assert_eq!(config.currency.rate_for("aud"), Some(dec("0.66")));
    assert_eq!(config.currency.rate_for("USDT"), None);
    assert_eq!(config.http.timeout(), Duration::from_secs(2));

    let retry = config.http.retry.as_ref().unwrap();
    assert_eq!(retry.max_attempts, Some(3));
    assert_eq!(retry.initial_delay, Duration::from_millis(100));
    assert_eq!(retry.max_delay, Duration::from_secs(1));
    assert_eq!(retry.multiplier, Some(1.5));

    assert_eq!(config.scan.refresh_interval(), Duration::from_secs(30));
    assert_eq!(config.scan.cycle_timeout(), Duration::from_secs(8));
    assert_eq!(config.scan.same_exchange, SameExchangePolicy::Reject);
}

#[test]
fn test_huge_bare_duration_fails_to_parse() {
    let yaml = minimal_valid_yaml().replace(
        "  min_profit_pct: \"1.0\"\n",
        "  min_profit_pct: \"1.0\"\n  refresh_interval: 1.0e20\n",
    );
    let result = from_yaml(&yaml);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_negative_bare_duration_fails_to_parse() {
    let yaml = minimal_valid_yaml().replace(
        "  min_profit_pct: \"1.0\"\n",
        "  min_profit_pct: \"1.0\"\n  cycle_timeout: -3\n",
    );
    assert!(matches!(from_yaml(&yaml), Err(ConfigError::Parse(_))));
}

#[test]
fn test_missing_scan_section_fails_to_parse() {
    let yaml = r#"
app:
  name: scanner
exchanges: {}
pairs: []
"#;
    assert!(matches!(from_yaml(yaml), Err(ConfigError::Parse(_))));
}

// ==================== Validation tests ====================

#[test]
fn test_validate_empty_app_name() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.app.name = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_empty_pairs() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.pairs.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_malformed_pair() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.pairs.push("BTCUSDT".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_scan_pair_not_listed() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.scan.pair = "SOL/USDT".to_string();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("not listed"));
}

#[test]
fn test_validate_non_positive_investment() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.scan.investment = Decimal::ZERO;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_fee_out_of_range() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.exchanges.get_mut("kraken").unwrap().fee_taker = Some(Decimal::ONE);
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_disabled_exchange_is_not_checked() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    let kraken = config.exchanges.get_mut("kraken").unwrap();
    kraken.enabled = false;
    kraken.fee_taker = Some(dec("5"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_non_positive_rate() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.currency.rates.insert("EUR".to_string(), Decimal::ZERO);
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_no_enabled_exchange() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    for exchange in config.exchanges.values_mut() {
        exchange.enabled = false;
    }

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("at least one exchange"));
}

#[test]
fn test_validate_zero_retry_attempts() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.http.retry = Some(RetryConfig {
        max_attempts: Some(0),
        initial_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
        multiplier: None,
    });
    assert!(config.validate().is_err());
}

// ==================== Request building tests ====================

#[test]
fn test_enabled_exchanges_sorted() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.exchanges.insert(
        "Bybit".to_string(),
        ExchangeConfig {
            enabled: true,
            ..Default::default()
        },
    );
    assert_eq!(config.enabled_exchanges(), vec!["binance", "bybit", "kraken"]);
}

#[test]
fn test_arbitrage_request_defaults_to_enabled_exchanges() {
    let config = from_yaml(&minimal_valid_yaml()).unwrap();
    let request = config.arbitrage_request().unwrap();

    assert_eq!(request.pair.to_string(), "BTC/USDT");
    assert_eq!(request.exchanges.len(), 2);
    assert!(request.exchanges.contains("kraken"));
    assert_eq!(request.investment, dec("1000"));
    assert_eq!(request.min_profit_pct, dec("1.0"));
}

#[test]
fn test_arbitrage_request_uses_scan_exchanges() {
    let mut config = from_yaml(&minimal_valid_yaml()).unwrap();
    config.scan.exchanges = Some(vec!["OKX".to_string()]);

    let request = config.arbitrage_request().unwrap();
    assert_eq!(request.exchanges.iter().collect::<Vec<_>>(), vec!["okx"]);
}

// ==================== File loading tests ====================

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(minimal_valid_yaml().as_bytes()).unwrap();

    let config = Config::load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.app.name, "scanner");
}

#[test]
fn test_load_missing_file() {
    let result = Config::load("/nonexistent/config.yaml");
    assert!(matches!(result, Err(ConfigError::ReadFile(_))));
}

#[test]
fn test_load_invalid_file_fails_validation() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(minimal_valid_yaml().replace("\"1000\"", "\"-1\"").as_bytes())
        .unwrap();

    let result = Config::load(file.path().to_str().unwrap());
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

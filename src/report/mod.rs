//! Rendering of scan cycle reports for the terminal.
//!
//! Text output rounds currency amounts and percentages to 2 decimals.
//! JSON output keeps full precision.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::arbitrage::ScanOutcome;
use crate::domain::{ArbitrageResult, ExchangeQuoteSet};
use crate::exchanges::Unavailable;
use crate::scanner::CycleReport;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Renders one report in the requested format.
pub fn render(report: &CycleReport, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Text => Ok(format_report(report)),
        Format::Json => serde_json::to_string_pretty(report),
    }
}

/// Formats the full text report: outcome, quotes, unavailable exchanges.
pub fn format_report(report: &CycleReport) -> String {
    let mut out = format_outcome(report);

    if !report.quotes.is_empty() {
        out.push_str("\n\n");
        out.push_str(&format_quotes(&report.quotes, &report.target_currency));
    }

    if !report.unavailable.is_empty() {
        out.push_str("\n\n");
        out.push_str(&format_unavailable(&report.unavailable));
    }

    out
}

/// Formats the headline state of a cycle.
pub fn format_outcome(report: &CycleReport) -> String {
    let timestamp = report.captured_at.format("%H:%M:%S UTC");
    let currency = &report.target_currency;

    match &report.outcome {
        ScanOutcome::Opportunity(result) => format!(
            "[OPPORTUNITY] {} opportunity found! {} (cycle {})\n{}",
            report.pair,
            timestamp,
            report.cycle,
            format_result(result, currency)
        ),
        ScanOutcome::BelowThreshold(result) => format!(
            "[WARNING] No {} opportunity above {}% right now. {} (cycle {})\n{}",
            report.pair,
            format_pct(report.min_profit_pct),
            timestamp,
            report.cycle,
            format_result(result, currency)
        ),
        ScanOutcome::NoOpportunity => format!(
            "[WARNING] No admissible buy/sell pair for {}. {} (cycle {})",
            report.pair, timestamp, report.cycle
        ),
        ScanOutcome::EmptyQuoteSet => format!(
            "[ERROR] No data available from selected exchanges for {}. {} (cycle {})",
            report.pair, timestamp, report.cycle
        ),
    }
}

/// Formats the numeric fields of an evaluation.
pub fn format_result(result: &ArbitrageResult, currency: &str) -> String {
    let mut out = format!(
        "  Buy from:   {} at {}\n\
         \x20 Sell on:    {} at {}\n\
         \x20 Spread:     {} ({}%)\n\
         \x20 Fees:       buy {}, sell {} ({}% combined rate)\n\
         \x20 Net profit: {}% | {} on {}",
        result.buy_exchange,
        format_money(result.buy_price, currency),
        result.sell_exchange,
        format_money(result.sell_price, currency),
        format_money(result.gross_spread, currency),
        format_pct(result.gross_profit_pct()),
        format_money(result.buy_fee_amount, currency),
        format_money(result.sell_fee_amount, currency),
        format_pct(result.total_fee_pct()),
        format_pct(result.net_profit_pct),
        format_money(result.net_profit_amount, currency),
        format_money(result.investment, currency),
    );

    if result.same_exchange {
        out.push_str("\n  Note:       best ask and best bid are on the same exchange");
    }

    out
}

/// Formats every collected quote, one line per exchange in id order.
pub fn format_quotes(quotes: &ExchangeQuoteSet, currency: &str) -> String {
    let width = quotes.keys().map(String::len).max().unwrap_or(0);

    let lines: Vec<String> = quotes
        .iter()
        .map(|(id, quote)| {
            format!(
                "  {:<width$}  buy {}  sell {}  fee {}%",
                id,
                format_money(quote.buy_price(), currency),
                format_money(quote.sell_price(), currency),
                format_pct(quote.fee_rate() * Decimal::ONE_HUNDRED),
                width = width
            )
        })
        .collect();

    format!("Quotes ({}):\n{}", quotes.len(), lines.join("\n"))
}

/// Formats the exchanges that produced no quote.
pub fn format_unavailable(unavailable: &[Unavailable]) -> String {
    let lines: Vec<String> = unavailable
        .iter()
        .map(|u| format!("  {} ({}): {}", u.exchange, u.kind, u.reason))
        .collect();

    format!("Unavailable ({}):\n{}", unavailable.len(), lines.join("\n"))
}

// === Helpers ===

/// Rounds half away from zero to 2 decimals.
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a percentage value, e.g. 4.6912 -> "4.69".
fn format_pct(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

/// Formats a currency amount, e.g. 98040.5 -> "AUD 98,040.50".
fn format_money(value: Decimal, currency: &str) -> String {
    format!("{} {}", currency, format_amount(value))
}

/// Formats an amount with 2 decimals and thousand separators.
fn format_amount(value: Decimal) -> String {
    let rounded = format!("{:.2}", round2(value).abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((&rounded, "00"));

    let sign = if value.is_sign_negative() && !round2(value).is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{}.{}", sign, add_thousand_separators(int_part), frac_part)
}

/// Inserts a comma every three digits of an unsigned integer string.
fn add_thousand_separators(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

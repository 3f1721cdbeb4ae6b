//! Output formatting utilities

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use chrono::DateTime;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use serde::Serialize;
use swipes_core::OperationResult;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Run `fut` behind a spinner on stderr (hidden when stderr is not a terminal)
pub async fn with_spinner<T>(msg: &str, fut: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}

/// Print a core result as an `OperationResult` JSON document
///
/// Failures are still returned so the process exits non-zero.
pub fn emit_json<T: Serialize>(result: swipes_core::domain::result::Result<T>) -> Result<()> {
    let failure = result.as_ref().err().cloned();
    println!("{}", serde_json::to_string_pretty(&OperationResult::from(result))?);
    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Format a monetary amount with two decimals
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// Render a backend timestamp as `YYYY-MM-DD HH:MM`, or as-is if unparseable
pub fn format_backend_date(raw: &str) -> String {
    ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%:z"]
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_backend_date() {
        assert_eq!(format_backend_date("2024-03-01T12:34:56.000+0000"), "2024-03-01 12:34");
        assert_eq!(format_backend_date("2024-03-01T12:34:56.000Z"), "2024-03-01 12:34");
        assert_eq!(format_backend_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_emit_json_returns_the_core_error() {
        assert!(emit_json(Ok(vec![1, 2])).is_ok());

        let err = emit_json::<i32>(Err(swipes_core::Error::backend("INVALID_SESSION"))).unwrap_err();
        assert_eq!(err.to_string(), "Backend exception: INVALID_SESSION");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(1525, 1)), "152.50");
        assert_eq!(format_amount(Decimal::new(-75, 1)), "-7.50");
    }
}

//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use woodie_commerce::catalog::StockStatus;
use woodie_commerce::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Pad to a display width. Styled text is measured without its escapes.
fn pad(text: &str, width: usize) -> String {
    let visible = console::measure_text_width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(visible)))
}

/// Price with the struck-through old price when it is higher.
pub fn price_tag(price: Money, old_price: Money) -> String {
    if old_price > price {
        format!(
            "{} {}",
            style(price.display()).bold(),
            style(old_price.display()).dim().strikethrough()
        )
    } else {
        style(price.display()).bold().to_string()
    }
}

/// Colored stock label.
pub fn stock_badge(stock: StockStatus) -> String {
    match stock {
        StockStatus::InStock => style(stock.label()).green().to_string(),
        StockStatus::OutOfStock => style(stock.label()).red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_ignores_escapes() {
        let styled = style("abc").bold().force_styling(true).to_string();
        let padded = pad(&styled, 6);
        assert_eq!(console::measure_text_width(&padded), 6);
        assert_eq!(pad("toolong", 3), "toolong");
    }

    #[test]
    fn test_price_tag_hides_equal_old_price() {
        let tag = console::strip_ansi_codes(&price_tag(Money::from_taka(650), Money::from_taka(650)))
            .to_string();
        assert_eq!(tag, "৳650");

        let tag = console::strip_ansi_codes(&price_tag(Money::from_taka(650), Money::from_taka(800)))
            .to_string();
        assert_eq!(tag, "৳650 ৳800");
    }
}

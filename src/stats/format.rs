//! KPI formatting for terminal output.

use super::Kpis;

/// `$1,234.50`, `$-1,234.50` for negatives.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }

    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("${}{}.{}", sign, group_thousands(int_part), frac_part)
}

/// Fraction as a percentage with one decimal, `n/a` when undefined.
pub fn format_percent(fraction: f64) -> String {
    if fraction.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.1}%", fraction * 100.0)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Kpis {
    /// The three printed KPI lines, in order.
    pub fn summary_lines(&self) -> [String; 3] {
        [
            format!("Total Sales: {}", format_currency(self.total_sales)),
            format!("Total Profit: {}", format_currency(self.total_profit)),
            format!("Average Discount: {}", format_percent(self.average_discount)),
        ]
    }
}

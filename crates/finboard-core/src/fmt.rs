//! Display formatting for amounts and percentages

/// Format an amount as US dollars with thousands separators, e.g. "-$1,234.50"
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 && round_cents(amount) != 0 {
        format!("-{}", dollars(amount.abs()))
    } else {
        dollars(amount.abs())
    }
}

/// Format an amount with an explicit sign, e.g. "+$3,000.00"
pub fn format_signed(amount: f64) -> String {
    if amount >= 0.0 || round_cents(amount) == 0 {
        format!("+{}", dollars(amount.abs()))
    } else {
        format!("-{}", dollars(amount.abs()))
    }
}

/// Format a deviation from the average, e.g. "↑ 50.0%"
pub fn format_percentage_diff(diff: f64) -> String {
    let arrow = if diff > 0.0 {
        "↑"
    } else if diff < 0.0 {
        "↓"
    } else {
        "→"
    };
    format!("{} {:.1}%", arrow, diff.abs())
}

/// Compact axis-style amount, e.g. "$12k"
pub fn format_thousands(amount: f64) -> String {
    format!("${:.0}k", amount / 1000.0)
}

fn round_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn dollars(amount: f64) -> String {
    let cents = round_cents(amount);
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("${}.{:02}", grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.5), "$5.50");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(-1234567.0), "-$1,234,567.00");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(3000.0), "+$3,000.00");
        assert_eq!(format_signed(-42.1), "-$42.10");
        assert_eq!(format_signed(0.0), "+$0.00");
    }

    #[test]
    fn test_format_percentage_diff() {
        assert_eq!(format_percentage_diff(50.0), "↑ 50.0%");
        assert_eq!(format_percentage_diff(-12.345), "↓ 12.3%");
        assert_eq!(format_percentage_diff(0.0), "→ 0.0%");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(12_400.0), "$12k");
        assert_eq!(format_thousands(800.0), "$1k");
    }
}

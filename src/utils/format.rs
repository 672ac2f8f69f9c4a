//! Display helpers for dollar amounts and large counts.

const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;
const THOUSAND: f64 = 1e3;

/// Compact USD label: `$1.23B`, `$4.50M`, `$7.5K`, or a grouped amount below a thousand.
pub fn format_currency(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return "$--".to_string();
    }
    if value >= BILLION {
        return format!("${:.2}B", value / BILLION);
    }
    if value >= MILLION {
        return format!("${:.2}M", value / MILLION);
    }
    if value >= THOUSAND {
        return format!("${:.1}K", value / THOUSAND);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let body = group_decimal(&trimmed_fixed(value.abs(), max_fraction_digits));
    if body == "0" {
        return "$0".to_string();
    }
    format!("{}${}", sign, body)
}

pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "--".to_string();
    }
    if value >= BILLION {
        return format!("{:.2}B", value / BILLION);
    }
    if value >= MILLION {
        return format!("{:.2}M", value / MILLION);
    }
    if value >= THOUSAND {
        return format!("{:.1}K", value / THOUSAND);
    }
    value.to_string()
}

/// Full-precision count with thousands separators, up to three decimals.
pub fn format_large_number(value: f64) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let body = group_decimal(&trimmed_fixed(value.abs(), 3));
    if body == "0" {
        return body;
    }
    format!("{}{}", sign, body)
}

/// User share as a percentage with six decimals.
pub fn format_share(user_share: f64) -> String {
    if !user_share.is_finite() {
        return "N/A".to_string();
    }
    format!("{:.6}%", user_share * 100.0)
}

fn trimmed_fixed(value: f64, digits: usize) -> String {
    let fixed = format!("{:.*}", digits, value);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

fn group_decimal(number: &str) -> String {
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (number, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, c) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_suffixes() {
        assert_eq!(format_currency(6_432_614_493.0, 0), "$6.43B");
        assert_eq!(format_currency(375_000_000.0, 0), "$375.00M");
        assert_eq!(format_currency(12_345.0, 0), "$12.3K");
        assert_eq!(format_currency(999.0, 0), "$999");
        assert_eq!(format_currency(0.375, 0), "$0");
        assert_eq!(format_currency(0.375, 2), "$0.38");
        assert_eq!(format_currency(0.5, 4), "$0.5");
        assert_eq!(format_currency(f64::NAN, 0), "$--");
    }

    #[test]
    fn test_format_currency_negative_grouping() {
        assert_eq!(format_currency(-1_234_567.0, 0), "-$1,234,567");
        assert_eq!(format_currency(-12.5, 1), "-$12.5");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1_500_000.0), "1.50M");
        assert_eq!(format_number(2_500.0), "2.5K");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(f64::NAN), "--");
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(1_500_000.0), "1,500,000");
        assert_eq!(format_large_number(1234.56789), "1,234.568");
        assert_eq!(format_large_number(0.0), "0");
        assert_eq!(format_large_number(f64::INFINITY), "--");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(1e-9), "0.000000%");
        assert_eq!(format_share(0.0625), "6.250000%");
    }
}

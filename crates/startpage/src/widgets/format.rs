//! Number and time formatting shared by the widgets.

use chrono::{DateTime, Utc};

/// Relative age: `Xm ago` under an hour, `Xh ago` under a day, else `Xd ago`.
pub fn time_ago(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 3_600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3_600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Like [`time_ago`], but anything a week or older shows its date (`Oct 3`).
pub fn published_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - published).num_seconds();
    if secs < 604_800 {
        time_ago(secs)
    } else {
        published.format("%b %-d").to_string()
    }
}

/// Inserts thousands separators into an integer.
pub fn with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Crypto price: whole dollars from $1,000, up to two decimals from $1,
/// four decimals below that.
pub fn crypto_price(price: f64) -> String {
    if !price.is_finite() {
        return "$-.--".to_string();
    }
    if price >= 1_000.0 {
        format!("${}", with_commas(price.round() as u64))
    } else if price >= 1.0 {
        let cents = (price * 100.0).round() as u64;
        let (whole, frac) = (cents / 100, cents % 100);
        match frac {
            0 => format!("${}", with_commas(whole)),
            f if f % 10 == 0 => format!("${}.{}", with_commas(whole), f / 10),
            f => format!("${}.{f:02}", with_commas(whole)),
        }
    } else {
        format!("${price:.4}")
    }
}

/// Stock price with two decimals.
pub fn stock_price(price: f64) -> String {
    if price.is_finite() {
        format!("${price:.2}")
    } else {
        "$-.--".to_string()
    }
}

/// Percent change with an explicit `+` for non-negative values.
pub fn signed_percent(change: f64) -> String {
    if change >= 0.0 {
        format!("+{change:.2}%")
    } else {
        format!("{change:.2}%")
    }
}

/// Compact count: `999`, `1.2k`, `45.0k`.
pub fn compact_count(value: u64) -> String {
    if value >= 1_000 {
        format!("{:.1}k", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Cuts `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_ago_boundaries() {
        assert_eq!(time_ago(0), "0m ago");
        assert_eq!(time_ago(59), "0m ago");
        assert_eq!(time_ago(3_599), "59m ago");
        assert_eq!(time_ago(3_600), "1h ago");
        assert_eq!(time_ago(86_399), "23h ago");
        assert_eq!(time_ago(86_400), "1d ago");
        assert_eq!(time_ago(-5), "0m ago");
    }

    #[test]
    fn test_published_ago_switches_to_date_after_a_week() {
        let now = Utc.with_ymd_and_hms(2024, 10, 17, 12, 0, 0).unwrap();
        let six_days = Utc.with_ymd_and_hms(2024, 10, 11, 12, 0, 0).unwrap();
        let old = Utc.with_ymd_and_hms(2024, 10, 3, 9, 0, 0).unwrap();
        assert_eq!(published_ago(six_days, now), "6d ago");
        assert_eq!(published_ago(old, now), "Oct 3");
    }

    #[test]
    fn test_with_commas() {
        assert_eq!(with_commas(0), "0");
        assert_eq!(with_commas(999), "999");
        assert_eq!(with_commas(1_000), "1,000");
        assert_eq!(with_commas(1_234_567), "1,234,567");
    }

    #[test]
    fn test_crypto_price_tiers() {
        assert_eq!(crypto_price(67_123.89), "$67,124");
        assert_eq!(crypto_price(3_456.2), "$3,456");
        assert_eq!(crypto_price(145.678), "$145.68");
        assert_eq!(crypto_price(1.5), "$1.5");
        assert_eq!(crypto_price(2.0), "$2");
        assert_eq!(crypto_price(0.45678), "$0.4568");
        assert_eq!(crypto_price(f64::NAN), "$-.--");
    }

    #[test]
    fn test_stock_price_and_percent() {
        assert_eq!(stock_price(189.1), "$189.10");
        assert_eq!(signed_percent(1.234), "+1.23%");
        assert_eq!(signed_percent(0.0), "+0.00%");
        assert_eq!(signed_percent(-2.5), "-2.50%");
    }

    #[test]
    fn test_compact_count() {
        assert_eq!(compact_count(999), "999");
        assert_eq!(compact_count(1_000), "1.0k");
        assert_eq!(compact_count(1_240), "1.2k");
        assert_eq!(compact_count(45_000), "45.0k");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly", 7), "exactly");
        assert_eq!(truncate("truncated text", 6), "trunc…");
        assert_eq!(truncate("x", 0), "");
    }
}

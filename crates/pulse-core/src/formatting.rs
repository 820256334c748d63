/// Round `value` to `decimals` places and group the integer digits with
/// commas.
///
/// # Examples
///
/// ```
/// use pulse_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let scale = 10_f64.powi(decimals as i32);
    let magnitude = value.abs();
    // Relative nudge so binary midpoints such as 1.005 round away from zero.
    let rounded = (magnitude * scale + f64::EPSILON * magnitude * scale).round() / scale;

    let fixed = format!("{:.*}", decimals as usize, rounded);
    let (digits, fraction) = match fixed.split_once('.') {
        Some((digits, fraction)) => (digits, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(digits));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Format a monetary amount with two decimals and thousands separators.
///
/// # Examples
///
/// ```
/// use pulse_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56),  "$1,234.56");
/// assert_eq!(format_currency(0.0),      "$0.00");
/// assert_eq!(format_currency(-9.99),    "-$9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${}", format_number(amount.abs(), 2))
    } else {
        format!("${}", format_number(amount, 2))
    }
}

/// Abbreviate large monetary amounts for headline cards.
///
/// * `≥ 1e9` → `"$1.2B"`
/// * `≥ 1e6` → `"$12.5M"`
/// * `≥ 1e3` → `"$4.2K"`
/// * otherwise the full [`format_currency`] output.
///
/// ```
/// use pulse_core::formatting::format_compact_currency;
///
/// assert_eq!(format_compact_currency(12_500_000.0), "$12.5M");
/// assert_eq!(format_compact_currency(950.0), "$950.00");
/// ```
pub fn format_compact_currency(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    let (scaled, suffix) = if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else if abs >= 1e3 {
        (abs / 1e3, "K")
    } else {
        return format_currency(amount);
    };
    format!("{sign}${}{suffix}", format_number(scaled, 1))
}

/// Format a percentage with one decimal, e.g. `"83.3%"`.
pub fn format_percent(pct: f64) -> String {
    format!("{}%", format_number(pct, 1))
}

/// Unrounded `part * 100 / whole`; `0.0` when `whole` is zero.
///
/// Multiplies before dividing so that shares such as 80/100 come out as
/// exactly `80.0`.
pub fn percentage_raw(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    part * 100.0 / whole
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// `"1234567"` → `"1,234,567"`.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ── Tests ──────────────────────────────────────────────────────────────────────

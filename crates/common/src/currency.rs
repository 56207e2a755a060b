//! Display formatting for amounts held in minor currency units.
//!
//! Output follows the `en-US` / `USD` convention: `$` prefix, comma thousands
//! separators and exactly two fraction digits.

/// Format cents as a dollar string, e.g. `123456` -> `"$1,234.56"`.
pub fn format_currency(minor_units: i64) -> String {
    let negative = minor_units < 0;
    let abs = minor_units.unsigned_abs();
    let whole = abs / 100;
    let cents = abs % 100;
    let sign = if negative { "-" } else { "" };
    format!("{sign}${}.{cents:02}", group_thousands(whole))
}

fn group_thousands(value: u64) -> String {
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

//! Prices
//!
//! Amounts are whole rupiah stored as unsigned integers; the rupiah has no
//! fractional subunit in this domain.

/// Formats an amount as rupiah with `id-ID` digit grouping, e.g. `Rp 1.234.567`.
#[must_use]
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    let offset = digits.len() % 3;

    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }

        grouped.push(c);
    }

    format!("Rp {grouped}")
}

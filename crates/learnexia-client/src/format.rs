//! Display helpers for values shown on the profile page

/// Formats a wallet balance with a rupee sign and Indian digit grouping
/// (`₹12,34,567.5`)
///
/// Rounds to paise and drops trailing zeros from the fraction. Non finite
/// values are shown as zero.
pub fn format_inr(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = paise / 100;
    let fraction = paise % 100;
    let sign = if amount < 0.0 && paise > 0 { "-" } else { "" };
    let mut result = format!("₹{sign}{}", group_indian(rupees));
    if fraction > 0 {
        let fraction = format!("{fraction:02}");
        result.push('.');
        result.push_str(fraction.trim_end_matches('0'));
    }
    result
}

/// Last three digits form a group, every two digits before that form a group
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (mut rest, last_three) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while rest.len() > 2 {
        let (head, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{last_three}", groups.join(","))
}

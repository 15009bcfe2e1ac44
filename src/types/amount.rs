/// Converts a provider decimal quantity (`"1.5"`) into a raw integer amount
/// scaled by the token's `decimals` (`"1500000"` for 6 decimals).
///
/// Without `decimals` the quantity is taken to be raw already. Digits beyond the
/// token's precision are truncated. Negative, empty or non-decimal input yields `None`.
pub fn to_raw_amount(quantity: &str, decimals: Option<u8>) -> Option<String> {
    let quantity = quantity.trim();
    let quantity = quantity.strip_prefix('+').unwrap_or(quantity);

    let (integer, fraction) = quantity.split_once('.').unwrap_or((quantity, ""));

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    if !integer.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let decimals = usize::from(decimals.unwrap_or(0));
    let kept = &fraction[..fraction.len().min(decimals)];

    let mut digits = String::with_capacity(integer.len() + decimals);
    digits.push_str(integer);
    digits.push_str(kept);
    digits.extend(std::iter::repeat_n('0', decimals - kept.len()));

    let digits = digits.trim_start_matches('0');

    if digits.is_empty() {
        Some("0".to_string())
    } else {
        Some(digits.to_string())
    }
}

use super::digit_values;

const CARD_DIGITS: std::ops::RangeInclusive<usize> = 13..=19;

/// Mod-10 checksum over the digits of `number`. Separators are ignored;
/// anything outside the card length range fails.
#[must_use]
pub fn is_valid(number: &str) -> bool {
    let digits = digit_values(number);
    if !CARD_DIGITS.contains(&digits.len()) {
        return false;
    }

    let weighted = digits.iter().rev().zip([1, 2].into_iter().cycle());
    let sum: u32 = weighted
        .map(|(&digit, weight)| {
            let product = digit * weight;
            product / 10 + product % 10
        })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luhn_valid() {
        assert!(is_valid("4111111111111111"));
        assert!(is_valid("4111 1111 1111 1111"));
        assert!(is_valid("378282246310005"));
    }

    #[test]
    fn test_luhn_invalid() {
        assert!(!is_valid("4111111111111112"));
        assert!(!is_valid("5200000000000000"));
    }

    #[test]
    fn test_luhn_too_short() {
        assert!(!is_valid("411111111111"));
    }

    #[test]
    fn test_luhn_nineteen_digits() {
        assert!(is_valid("6011000000000000001"));
        assert!(!is_valid("60110000000000000010"));
    }
}

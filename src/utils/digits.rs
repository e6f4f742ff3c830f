/// Keep only ASCII digits.
#[must_use]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

#[must_use]
pub fn digit_values(input: &str) -> Vec<u32> {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .filter_map(|c| c.to_digit(10))
        .collect()
}

/// First `max` characters of an ASCII digit string.
#[must_use]
pub fn truncate_digits(digits: &str, max: usize) -> &str {
    &digits[..digits.len().min(max)]
}

#[must_use]
pub fn all_identical(digits: &[u32]) -> bool {
    digits.iter().all(|&d| d == digits[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only_strips_separators() {
        assert_eq!(digits_only("(11) 98765-4321"), "11987654321");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn test_digits_only_ignores_non_ascii_digits() {
        assert_eq!(digits_only("١٢3"), "3");
    }

    #[test]
    fn test_truncate_digits() {
        assert_eq!(truncate_digits("123456", 4), "1234");
        assert_eq!(truncate_digits("12", 4), "12");
    }

    #[test]
    fn test_all_identical() {
        assert!(all_identical(&[1, 1, 1]));
        assert!(!all_identical(&[1, 2, 1]));
    }
}

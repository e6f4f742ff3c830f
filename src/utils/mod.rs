mod digits;
mod luhn;

pub use digits::{all_identical, digit_values, digits_only, truncate_digits};
pub use luhn::is_valid as luhn_is_valid;

use crate::config::CurrencyConfig;
use crate::domain::{MaskKind, DIGIT_PLACEHOLDER};
use crate::engine::context::FieldContext;
use crate::utils::{digits_only, truncate_digits};

const NATIONAL_ID_SHORT: &str = "•••.•••.•••-••";
const NATIONAL_ID_LONG: &str = "••.•••.•••/••••-••";
const LANDLINE: &str = "(••) ••••-••••";
const MOBILE: &str = "(••) •••••-••••";
const POSTAL_CODE: &str = "•••••-•••";
const DATE: &str = "••/••/••••";
const TIME: &str = "••:••";
const PAYMENT_CARD: &str = "•••• •••• •••• ••••";

const LOCAL_PHONE_DIGITS: usize = 11;
const STREET_NUMBER_DIGITS: usize = 6;
const CURRENCY_DIGITS: usize = 15;
const PERCENT_DECIMALS: usize = 2;

/// Format `raw_edit` (the field text after a keystroke) for `kind`.
///
/// `previous` is the formatted value before the keystroke. It is only used
/// to detect a backspace over a separator: when the edit removed exactly one
/// character and no digit went with it, the last digit is removed too so the
/// separator does not reappear immediately.
///
/// Never fails: malformed input degrades to the best partial formatting.
#[must_use]
pub fn apply_mask(
    previous: &str,
    raw_edit: &str,
    kind: MaskKind,
    ctx: &FieldContext<'_>,
) -> String {
    match kind {
        MaskKind::Password | MaskKind::None => raw_edit.to_string(),
        MaskKind::Currency => format_currency(&edited_digits(previous, raw_edit), ctx.currency),
        MaskKind::Percentage => {
            format_percentage(previous, raw_edit, ctx.currency.decimal_separator)
        }
        MaskKind::StreetNumber => {
            if ctx.unnumbered {
                ctx.unnumbered_token.to_string()
            } else {
                let digits = edited_digits(previous, raw_edit);
                truncate_digits(&digits, STREET_NUMBER_DIGITS).to_string()
            }
        }
        MaskKind::LocalPhone => {
            let digits = edited_digits(previous, raw_edit);
            let digits = truncate_digits(&digits, LOCAL_PHONE_DIGITS);
            let template = if digits.len() <= 10 { LANDLINE } else { MOBILE };
            fill_template(digits, template)
        }
        MaskKind::InternationalPhone => {
            let digits = edited_digits(previous, raw_edit);
            let digits = truncate_digits(&digits, ctx.country.capacity());
            fill_template(digits, ctx.country.template_for(digits.len()))
        }
        MaskKind::NationalIdShort
        | MaskKind::NationalIdLong
        | MaskKind::PostalCode
        | MaskKind::Date
        | MaskKind::Time
        | MaskKind::PaymentCard => {
            fill_template(&edited_digits(previous, raw_edit), fixed_template(kind))
        }
    }
}

fn fixed_template(kind: MaskKind) -> &'static str {
    match kind {
        MaskKind::NationalIdShort => NATIONAL_ID_SHORT,
        MaskKind::NationalIdLong => NATIONAL_ID_LONG,
        MaskKind::PostalCode => POSTAL_CODE,
        MaskKind::Date => DATE,
        MaskKind::Time => TIME,
        _ => PAYMENT_CARD,
    }
}

/// Strip the mask back to the value the field stores.
#[must_use]
pub fn unmask(formatted: &str, kind: MaskKind) -> String {
    match kind {
        MaskKind::Password | MaskKind::None => formatted.to_string(),
        MaskKind::Percentage => formatted.trim_end_matches('%').to_string(),
        _ => digits_only(formatted),
    }
}

/// Walk the template, consuming one digit per placeholder and copying
/// literals. Stops as soon as either side runs out, so a partial value
/// never ends with a dangling literal.
#[must_use]
pub fn fill_template(digits: &str, template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut remaining = digits.chars().peekable();

    for slot in template.chars() {
        if remaining.peek().is_none() {
            break;
        }
        if slot == DIGIT_PLACEHOLDER {
            if let Some(digit) = remaining.next() {
                out.push(digit);
            }
        } else {
            out.push(slot);
        }
    }
    out
}

fn edited_digits(previous: &str, raw_edit: &str) -> String {
    let mut digits = digits_only(raw_edit);
    if deleted_literal(previous, raw_edit, &digits, &digits_only(previous)) {
        digits.pop();
    }
    digits
}

fn deleted_literal(previous: &str, raw_edit: &str, kept_now: &str, kept_before: &str) -> bool {
    !kept_now.is_empty() && kept_now == kept_before && removed_one_char(previous, raw_edit)
}

/// True when `raw_edit` is `previous` with exactly one character taken out.
fn removed_one_char(previous: &str, raw_edit: &str) -> bool {
    let before: Vec<char> = previous.chars().collect();
    let after: Vec<char> = raw_edit.chars().collect();
    if before.len() != after.len() + 1 {
        return false;
    }
    let split = before
        .iter()
        .zip(&after)
        .position(|(b, a)| b != a)
        .unwrap_or(after.len());
    before[split + 1..] == after[split..]
}

fn format_currency(digits: &str, style: &CurrencyConfig) -> String {
    let significant = truncate_digits(digits.trim_start_matches('0'), CURRENCY_DIGITS);
    let cents: u64 = significant.parse().unwrap_or(0);

    let amount = format!(
        "{}{}{:02}",
        group_thousands(cents / 100, style.thousands_separator),
        style.decimal_separator,
        cents % 100
    );

    if style.symbol.is_empty() {
        amount
    } else {
        format!("{} {amount}", style.symbol)
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let plain = value.to_string();
    let len = plain.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in plain.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

fn format_percentage(previous: &str, raw_edit: &str, decimal: char) -> String {
    let mut kept = percentage_chars(raw_edit);
    if deleted_literal(previous, raw_edit, &kept, &percentage_chars(previous)) {
        kept.pop();
    }
    if kept.is_empty() {
        return String::new();
    }

    let (int_part, fraction) = match kept.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (kept.as_str(), None),
    };

    let int_part = int_part.trim_start_matches('0');
    let int_value: u32 = if int_part.len() > 3 {
        u32::MAX
    } else {
        int_part.parse().unwrap_or(0)
    };
    let fraction_nonzero = fraction.is_some_and(|f| f.chars().any(|c| c != '0'));
    if int_value > 100 || (int_value == 100 && fraction_nonzero) {
        return "100%".to_string();
    }

    let int_text = if int_part.is_empty() { "0" } else { int_part };
    match fraction {
        Some(fraction) => format!("{int_text}{decimal}{fraction}%"),
        None => format!("{int_text}%"),
    }
}

/// Digits plus the first decimal separator (normalized to '.'), with at
/// most two decimals.
fn percentage_chars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut seen_separator = false;
    let mut decimals = 0;

    for c in input.chars() {
        if c.is_ascii_digit() {
            if seen_separator {
                if decimals == PERCENT_DECIMALS {
                    continue;
                }
                decimals += 1;
            }
            out.push(c);
        } else if (c == '.' || c == ',') && !seen_separator {
            seen_separator = true;
            out.push('.');
        }
    }
    out
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{
    CardMetadata, FieldMetadata, InvalidReason, PhoneMetadata, Validation, ValidationKind,
};
use crate::engine::brands::detect_brand;
use crate::engine::checksum::{check_cnpj, check_cpf};
use crate::engine::context::FieldContext;
use crate::engine::countries::is_valid_area_code;
use crate::utils::{digits_only, luhn_is_valid};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email regex")
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(?::\d{1,5})?(?:[/?#]\S*)?$")
        .expect("url regex")
});

static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z]{0,3}\$\s*)?[-+]?\d[\d.,]*\s*%?$").expect("numeric regex")
});

const CARD_LENGTHS: std::ops::RangeInclusive<usize> = 13..=19;
const FOREIGN_PHONE_LENGTHS: std::ops::RangeInclusive<usize> = 7..=15;

/// Validate `value` for `kind`. Empty values are valid; whether a field is
/// required is the caller's concern. Card and phone metadata are filled in
/// even when the value is empty or invalid.
#[must_use]
pub fn validate(value: &str, kind: ValidationKind, ctx: &FieldContext<'_>) -> Validation {
    let metadata = metadata_for(value, kind, ctx);
    let value = value.trim();
    if value.is_empty() {
        return Validation::valid(metadata);
    }

    let reason = match kind {
        ValidationKind::NationalIdShort => check_cpf(value),
        ValidationKind::NationalIdLong => check_cnpj(value),
        ValidationKind::PaymentCard => check_card(value),
        ValidationKind::Phone => check_phone(value, ctx),
        ValidationKind::Email => shape(&EMAIL_RE, value),
        ValidationKind::Url => shape(&URL_RE, value),
        ValidationKind::Numeric => shape(&NUMERIC_RE, value),
        ValidationKind::None => None,
    };

    Validation::from_reason(reason, metadata)
}

fn metadata_for(value: &str, kind: ValidationKind, ctx: &FieldContext<'_>) -> FieldMetadata {
    match kind {
        ValidationKind::PaymentCard => FieldMetadata {
            card: Some(card_metadata(value, ctx)),
            phone: None,
        },
        ValidationKind::Phone => FieldMetadata {
            card: None,
            phone: Some(phone_metadata(value, ctx)),
        },
        _ => FieldMetadata::default(),
    }
}

#[must_use]
pub fn card_metadata(value: &str, ctx: &FieldContext<'_>) -> CardMetadata {
    let digits = digits_only(value);
    CardMetadata {
        brand: ctx.brand.or_else(|| detect_brand(&digits)),
        digits: digits.len(),
        luhn: luhn_is_valid(&digits),
    }
}

#[must_use]
pub fn phone_metadata(value: &str, ctx: &FieldContext<'_>) -> PhoneMetadata {
    PhoneMetadata {
        country: ctx.country.iso_code,
        dial_code: ctx.country.dial_code,
        full_number: format!("{}{}", ctx.country.dial_code, digits_only(value)),
    }
}

fn check_card(value: &str) -> Option<InvalidReason> {
    let digits = digits_only(value);
    if CARD_LENGTHS.contains(&digits.len()) {
        None
    } else {
        Some(InvalidReason::Length)
    }
}

/// Home-country numbers need a known area code and, with 11 digits, the
/// mobile `9` prefix. Other countries only get a length check.
fn check_phone(value: &str, ctx: &FieldContext<'_>) -> Option<InvalidReason> {
    let digits = digits_only(value);

    if !ctx.is_home_country() {
        return if FOREIGN_PHONE_LENGTHS.contains(&digits.len()) {
            None
        } else {
            Some(InvalidReason::Length)
        };
    }

    if digits.len() != 10 && digits.len() != 11 {
        return Some(InvalidReason::Length);
    }

    let area_code: u32 = digits[..2].parse().unwrap_or(0);
    if !is_valid_area_code(area_code) {
        return Some(InvalidReason::AreaCode);
    }

    if digits.len() == 11 && digits.as_bytes()[2] != b'9' {
        return Some(InvalidReason::MobilePrefix);
    }
    None
}

fn shape(pattern: &Regex, value: &str) -> Option<InvalidReason> {
    if pattern.is_match(value) {
        None
    } else {
        Some(InvalidReason::Shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CardBrand;
    use crate::engine::countries::find_country;

    fn check(value: &str, kind: ValidationKind) -> Validation {
        validate(value, kind, &FieldContext::default())
    }

    #[test]
    fn test_empty_is_always_valid() {
        for kind in ValidationKind::ALL {
            assert!(check("", kind).valid, "{kind}");
            assert!(check("   ", kind).valid, "{kind}");
        }
    }

    #[test]
    fn test_national_id_short() {
        assert!(check("529.982.247-25", ValidationKind::NationalIdShort).valid);
        let result = check("529.982.247-26", ValidationKind::NationalIdShort);
        assert!(!result.valid);
        assert_eq!(result.reason, Some(InvalidReason::Checksum));
    }

    #[test]
    fn test_national_id_long() {
        assert!(check("11.222.333/0001-81", ValidationKind::NationalIdLong).valid);
        assert!(!check("11.222.333/0001-80", ValidationKind::NationalIdLong).valid);
    }

    #[test]
    fn test_card_length_bounds() {
        assert!(!check("411111111111", ValidationKind::PaymentCard).valid);
        assert!(check("4111111111111", ValidationKind::PaymentCard).valid);
        assert!(check("4111 1111 1111 1111", ValidationKind::PaymentCard).valid);
        assert!(check("4111111111111111111", ValidationKind::PaymentCard).valid);
        let result = check("41111111111111111111", ValidationKind::PaymentCard);
        assert_eq!(result.reason, Some(InvalidReason::Length));
    }

    #[test]
    fn test_card_metadata_present_when_invalid() {
        let result = check("4111 11", ValidationKind::PaymentCard);
        assert!(!result.valid);
        let card = result.metadata.card.unwrap();
        assert_eq!(card.brand, Some(CardBrand::Visa));
        assert_eq!(card.digits, 6);
        assert!(!card.luhn);
    }

    #[test]
    fn test_card_uses_brand_from_context() {
        let ctx = FieldContext::default().with_brand(Some(CardBrand::Elo));
        let result = validate("4111111111111111", ValidationKind::PaymentCard, &ctx);
        assert_eq!(result.metadata.card.unwrap().brand, Some(CardBrand::Elo));
    }

    #[test]
    fn test_home_phone_mobile_prefix() {
        let result = check("(11) 88765-4321", ValidationKind::Phone);
        assert!(!result.valid);
        assert_eq!(result.reason, Some(InvalidReason::MobilePrefix));
        assert!(check("(11) 98765-4321", ValidationKind::Phone).valid);
    }

    #[test]
    fn test_home_phone_landline() {
        assert!(check("(21) 3333-4444", ValidationKind::Phone).valid);
    }

    #[test]
    fn test_home_phone_area_code_allow_list() {
        let result = check("(20) 98765-4321", ValidationKind::Phone);
        assert_eq!(result.reason, Some(InvalidReason::AreaCode));
        let result = check("(01) 3333-4444", ValidationKind::Phone);
        assert_eq!(result.reason, Some(InvalidReason::AreaCode));
    }

    #[test]
    fn test_home_phone_length() {
        let result = check("(11) 9876-543", ValidationKind::Phone);
        assert_eq!(result.reason, Some(InvalidReason::Length));
    }

    #[test]
    fn test_foreign_phone_is_coarse() {
        let pt = find_country("PT").unwrap();
        let ctx = FieldContext::default().with_country(pt);
        assert!(validate("912 345 678", ValidationKind::Phone, &ctx).valid);
        assert!(!validate("912 345", ValidationKind::Phone, &ctx).valid);
        assert!(!validate("1234567890123456", ValidationKind::Phone, &ctx).valid);
    }

    #[test]
    fn test_phone_metadata() {
        let result = check("(11) 88765-4321", ValidationKind::Phone);
        let phone = result.metadata.phone.unwrap();
        assert_eq!(phone.country, "BR");
        assert_eq!(phone.dial_code, "+55");
        assert_eq!(phone.full_number, "+5511887654321");
    }

    #[test]
    fn test_email() {
        assert!(check("ana.souza@clinica.com.br", ValidationKind::Email).valid);
        assert!(check("a+tag@x.io", ValidationKind::Email).valid);
        assert!(!check("ana@clinica", ValidationKind::Email).valid);
        assert!(!check("@clinica.com", ValidationKind::Email).valid);
        assert!(!check("ana souza@clinica.com", ValidationKind::Email).valid);
    }

    #[test]
    fn test_url() {
        assert!(check("https://clinica.com.br/agenda", ValidationKind::Url).valid);
        assert!(check("clinica.com.br", ValidationKind::Url).valid);
        assert!(check("http://localhost.dev:8080", ValidationKind::Url).valid);
        assert!(!check("not a url", ValidationKind::Url).valid);
    }

    #[test]
    fn test_numeric_accepts_masked_currency() {
        assert!(check("R$ 1.234,56", ValidationKind::Numeric).valid);
        assert!(check("12,5%", ValidationKind::Numeric).valid);
        assert!(check("-42", ValidationKind::Numeric).valid);
        assert!(!check("abc", ValidationKind::Numeric).valid);
    }

    #[test]
    fn test_none_accepts_anything() {
        assert!(check("anything at all", ValidationKind::None).valid);
    }
}

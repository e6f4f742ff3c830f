use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{CardBrand, CardBrandRule};
use crate::utils::digits_only;

macro_rules! define_regex {
    ($re:literal) => {{
        static PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new($re).expect("Invalid brand pattern"));
        &PATTERN
    }};
}

/// Brand signatures, tried top to bottom. Elo and Hipercard ranges overlap
/// Visa, Discover and Aura prefixes, so they must stay ahead of them.
/// Reordering changes which brand a number resolves to.
pub static BRAND_RULES: &[CardBrandRule] = &[
    CardBrandRule {
        brand: CardBrand::Elo,
        display_name: "Elo",
        pattern: define_regex!(
            r"^(?:4011(?:78|79)|43(?:1274|8935)|45(?:1416|7393|763[12])|50(?:4175|6699|67[0-7]\d|9\d{3})|627780|63(?:6297|6368)|650(?:0(?:3[1-35-9]|4\d|5[01])|4(?:0[5-9]|[3-9]\d)|5(?:[0-2]\d|3[0-8])|9(?:[2-6]\d|7[0-8])|541|700|720|901)|651652|655000|655021)"
        ),
    },
    CardBrandRule {
        brand: CardBrand::Hipercard,
        display_name: "Hipercard",
        pattern: define_regex!(r"^(?:606282|3841(?:[046]0)?)"),
    },
    CardBrandRule {
        brand: CardBrand::Amex,
        display_name: "American Express",
        pattern: define_regex!(r"^3[47]"),
    },
    CardBrandRule {
        brand: CardBrand::Diners,
        display_name: "Diners Club",
        pattern: define_regex!(r"^3(?:0[0-5]|[68])"),
    },
    CardBrandRule {
        brand: CardBrand::Discover,
        display_name: "Discover",
        pattern: define_regex!(r"^6(?:011|5|4[4-9])"),
    },
    CardBrandRule {
        brand: CardBrand::Jcb,
        display_name: "JCB",
        pattern: define_regex!(r"^35(?:2[89]|[3-8])"),
    },
    CardBrandRule {
        brand: CardBrand::Aura,
        display_name: "Aura",
        pattern: define_regex!(r"^50"),
    },
    CardBrandRule {
        brand: CardBrand::Mastercard,
        display_name: "Mastercard",
        pattern: define_regex!(r"^(?:5[1-5]|2(?:2(?:2[1-9]|[3-9]\d)|[3-6]\d{2}|7(?:[01]\d|20)))"),
    },
    CardBrandRule {
        brand: CardBrand::Visa,
        display_name: "Visa",
        pattern: define_regex!(r"^4"),
    },
];

/// First rule whose prefix matches the card digits. Separators are ignored.
#[must_use]
pub fn detect_brand(number: &str) -> Option<CardBrand> {
    find_rule(number).map(|rule| rule.brand)
}

#[must_use]
pub fn find_rule(number: &str) -> Option<&'static CardBrandRule> {
    let digits = digits_only(number);
    if digits.is_empty() {
        return None;
    }
    BRAND_RULES.iter().find(|rule| rule.pattern.is_match(&digits))
}

#[must_use]
pub fn display_name(brand: CardBrand) -> &'static str {
    BRAND_RULES
        .iter()
        .find(|rule| rule.brand == brand)
        .map_or_else(|| brand.id(), |rule| rule.display_name)
}

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::CardBrand;

/// Placeholder marking a digit position in a phone template.
pub const DIGIT_PLACEHOLDER: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryPhoneProfile {
    pub iso_code: &'static str,
    pub display_name: &'static str,
    pub flag: &'static str,
    pub dial_code: &'static str,
    pub template: &'static str,
    /// Layout for numbers short enough to be landlines, when it differs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_template: Option<&'static str>,
}

impl CountryPhoneProfile {
    /// Number of digits the template can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        placeholders(self.template)
    }

    /// Template that fits `digit_count` digits best.
    #[must_use]
    pub fn template_for(&self, digit_count: usize) -> &'static str {
        match self.short_template {
            Some(short) if digit_count <= placeholders(short) => short,
            _ => self.template,
        }
    }
}

fn placeholders(template: &str) -> usize {
    template.chars().filter(|&c| c == DIGIT_PLACEHOLDER).count()
}

pub struct CardBrandRule {
    pub brand: CardBrand,
    pub display_name: &'static str,
    pub pattern: &'static Lazy<Regex>,
}

impl std::fmt::Debug for CardBrandRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardBrandRule")
            .field("brand", &self.brand)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

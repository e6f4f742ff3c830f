use once_cell::sync::Lazy;

use crate::config::CurrencyConfig;
use crate::domain::{CardBrand, CountryPhoneProfile};
use crate::engine::countries::home_country;

pub const DEFAULT_UNNUMBERED_TOKEN: &str = "S/N";

static DEFAULT_CURRENCY: Lazy<CurrencyConfig> = Lazy::new(CurrencyConfig::default);

/// Contextual data shared by the mask and validation engines for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// Country selected on the field.
    pub country: &'static CountryPhoneProfile,
    /// Country whose fine-grained phone rules apply.
    pub home_country: &'static CountryPhoneProfile,
    pub unnumbered: bool,
    pub unnumbered_token: &'a str,
    pub currency: &'a CurrencyConfig,
    /// Brand already detected by the caller, if any.
    pub brand: Option<CardBrand>,
}

impl<'a> FieldContext<'a> {
    #[must_use]
    pub fn new(currency: &'a CurrencyConfig) -> Self {
        Self {
            country: home_country(),
            home_country: home_country(),
            unnumbered: false,
            unnumbered_token: DEFAULT_UNNUMBERED_TOKEN,
            currency,
            brand: None,
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: &'static CountryPhoneProfile) -> Self {
        self.country = country;
        self
    }

    #[must_use]
    pub fn with_home_country(mut self, country: &'static CountryPhoneProfile) -> Self {
        self.home_country = country;
        self
    }

    #[must_use]
    pub fn with_unnumbered(mut self, unnumbered: bool, token: &'a str) -> Self {
        self.unnumbered = unnumbered;
        self.unnumbered_token = token;
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand: Option<CardBrand>) -> Self {
        self.brand = brand;
        self
    }

    #[must_use]
    pub fn is_home_country(&self) -> bool {
        self.country.iso_code == self.home_country.iso_code
    }
}

impl Default for FieldContext<'static> {
    fn default() -> Self {
        Self::new(&DEFAULT_CURRENCY)
    }
}

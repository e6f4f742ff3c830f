use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::CountryPhoneProfile;
use crate::engine::context::DEFAULT_UNNUMBERED_TOKEN;
use crate::engine::countries::find_country;
use crate::error::{MascaraError, Result};

/// Upper bound for the cooldown and expiry timers.
const MAX_TIMER_SECS: u64 = 86_400;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MascaraConfig {
    #[serde(default)]
    pub field: FieldDefaults,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
    #[serde(default)]
    pub profiles: HashMap<String, ProfileOverrides>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefaults {
    /// Country whose area-code and mobile rules are enforced.
    #[serde(default = "default_home_country")]
    pub home_country: String,
    #[serde(default = "default_unnumbered_token")]
    pub unnumbered_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VerificationConfig {
    /// Minimum seconds between two sends for the same session.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Lifetime of an issued code in seconds.
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Submit automatically once every digit has been entered.
    #[serde(default)]
    pub auto_submit: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProfileOverrides {
    #[serde(default)]
    pub field: Option<PartialFieldDefaults>,
    #[serde(default)]
    pub currency: Option<PartialCurrencyConfig>,
    #[serde(default)]
    pub verification: Option<PartialVerificationConfig>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PartialFieldDefaults {
    pub home_country: Option<String>,
    pub unnumbered_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PartialCurrencyConfig {
    pub symbol: Option<String>,
    pub thousands_separator: Option<char>,
    pub decimal_separator: Option<char>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PartialVerificationConfig {
    pub cooldown_secs: Option<u64>,
    pub expiry_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub auto_submit: Option<bool>,
}

fn default_home_country() -> String {
    "BR".to_string()
}

fn default_unnumbered_token() -> String {
    DEFAULT_UNNUMBERED_TOKEN.to_string()
}

fn default_symbol() -> String {
    "R$".to_string()
}

fn default_thousands_separator() -> char {
    '.'
}

fn default_decimal_separator() -> char {
    ','
}

fn default_cooldown_secs() -> u64 {
    60
}

fn default_expiry_secs() -> u64 {
    600
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            home_country: default_home_country(),
            unnumbered_token: default_unnumbered_token(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: default_cooldown_secs(),
            expiry_secs: default_expiry_secs(),
            max_attempts: default_max_attempts(),
            auto_submit: false,
        }
    }
}

impl MascaraConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::path::Path::new("mascara.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(config_path)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)?;
        let config: MascaraConfig =
            toml::from_str(&content).map_err(|e| MascaraError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_profile(mut self, profile_name: &str) -> Self {
        if let Some(overrides) = self.profiles.get(profile_name).cloned() {
            if let Some(field) = overrides.field {
                if let Some(v) = field.home_country {
                    self.field.home_country = v;
                }
                if let Some(v) = field.unnumbered_token {
                    self.field.unnumbered_token = v;
                }
            }
            if let Some(currency) = overrides.currency {
                if let Some(v) = currency.symbol {
                    self.currency.symbol = v;
                }
                if let Some(v) = currency.thousands_separator {
                    self.currency.thousands_separator = v;
                }
                if let Some(v) = currency.decimal_separator {
                    self.currency.decimal_separator = v;
                }
            }
            if let Some(verification) = overrides.verification {
                if let Some(v) = verification.cooldown_secs {
                    self.verification.cooldown_secs = v;
                }
                if let Some(v) = verification.expiry_secs {
                    self.verification.expiry_secs = v;
                }
                if let Some(v) = verification.max_attempts {
                    self.verification.max_attempts = v;
                }
                if let Some(v) = verification.auto_submit {
                    self.verification.auto_submit = v;
                }
            }
        }
        self
    }

    /// Reject settings that would break masking or the code workflow.
    pub fn validate(&self) -> Result<()> {
        self.home_country()?;

        let currency = &self.currency;
        if currency.symbol.chars().any(|c| c.is_ascii_digit()) {
            return Err(MascaraError::Config(format!(
                "currency symbol '{}' must not contain digits",
                currency.symbol
            )));
        }
        if !matches!(currency.decimal_separator, '.' | ',') {
            return Err(MascaraError::Config(format!(
                "decimal separator must be '.' or ',', got '{}'",
                currency.decimal_separator
            )));
        }
        if currency.thousands_separator.is_ascii_digit()
            || currency.thousands_separator == currency.decimal_separator
        {
            return Err(MascaraError::Config(format!(
                "invalid thousands separator '{}'",
                currency.thousands_separator
            )));
        }

        let verification = &self.verification;
        if verification.max_attempts == 0 {
            return Err(MascaraError::Config(
                "verification.max_attempts must be at least 1".to_string(),
            ));
        }
        if verification.cooldown_secs == 0 || verification.expiry_secs == 0 {
            return Err(MascaraError::Config(
                "verification timers must be longer than zero seconds".to_string(),
            ));
        }
        if verification.cooldown_secs > MAX_TIMER_SECS
            || verification.expiry_secs > MAX_TIMER_SECS
        {
            return Err(MascaraError::Config(format!(
                "verification timers must not exceed {MAX_TIMER_SECS} seconds"
            )));
        }
        Ok(())
    }

    pub fn home_country(&self) -> Result<&'static CountryPhoneProfile> {
        find_country(&self.field.home_country)
            .ok_or_else(|| MascaraError::UnknownCountry(self.field.home_country.clone()))
    }
}

use tracing::debug;

use crate::config::{CurrencyConfig, MascaraConfig};
use crate::domain::{
    CountryPhoneProfile, FieldConfig, FieldEvent, FieldMetadata, FieldPhase, FieldState,
    FieldUpdate, MaskKind, ValidationKind,
};
use crate::engine::brands::detect_brand;
use crate::engine::context::FieldContext;
use crate::engine::countries::find_country;
use crate::engine::mask::{apply_mask, unmask};
use crate::engine::validate::{card_metadata, validate};
use crate::error::{MascaraError, Result};

/// Drives one editable field: every event runs mask → brand → validate and
/// publishes the result. Owns its `FieldState` exclusively.
#[derive(Debug, Clone)]
pub struct FieldController {
    config: FieldConfig,
    state: FieldState,
    home_country: &'static CountryPhoneProfile,
    currency: CurrencyConfig,
    default_token: String,
}

impl FieldController {
    pub fn new(config: FieldConfig, settings: &MascaraConfig) -> Result<Self> {
        let home_country = settings.home_country()?;
        let country = resolve_country(&config, home_country)?;
        Ok(Self {
            config,
            state: FieldState::clean(Some(country)),
            home_country,
            currency: settings.currency.clone(),
            default_token: settings.field.unnumbered_token.clone(),
        })
    }

    pub fn with_defaults(config: FieldConfig) -> Result<Self> {
        Self::new(config, &MascaraConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Apply `event` and publish the resulting update.
    pub fn handle(&mut self, event: FieldEvent) -> Result<FieldUpdate> {
        let (config, state) = self.reduce(&event)?;
        self.config = config;
        self.state = state;
        Ok(FieldUpdate::from(&self.state))
    }

    /// Pure transition: computes the next config and state without
    /// touching the controller.
    pub fn reduce(&self, event: &FieldEvent) -> Result<(FieldConfig, FieldState)> {
        let current = &self.state;
        let country = current.selected_country.unwrap_or(self.home_country);

        match event {
            FieldEvent::Input(raw) => {
                if current.is_unnumbered {
                    return Ok((self.config.clone(), current.clone()));
                }
                let state = self.run(
                    &self.config,
                    &current.formatted_value,
                    raw,
                    country,
                    false,
                );
                Ok((self.config.clone(), state))
            }
            FieldEvent::SelectCountry(iso_code) => {
                let selected = find_country(iso_code)
                    .ok_or_else(|| MascaraError::UnknownCountry(iso_code.clone()))?;
                let raw = if self.config.mask == MaskKind::InternationalPhone {
                    ""
                } else {
                    current.raw_value.as_str()
                };
                let state = self.run(&self.config, "", raw, selected, current.is_unnumbered);
                Ok((self.config.clone(), state))
            }
            FieldEvent::SetUnnumbered(unnumbered) => {
                if !self.config.allow_unnumbered {
                    return Err(MascaraError::UnnumberedNotAllowed);
                }
                let state = self.run(&self.config, "", &current.raw_value, country, *unnumbered);
                Ok((self.config.clone(), state))
            }
            FieldEvent::Reset(value) => {
                let unnumbered = self.config.allow_unnumbered && value == self.token(&self.config);
                let raw = if unnumbered {
                    current.raw_value.as_str()
                } else {
                    value.as_str()
                };
                let state = self.run(&self.config, "", raw, country, unnumbered);
                Ok((self.config.clone(), state))
            }
            FieldEvent::Reconfigure(config) => {
                let country_changed = config.default_country != self.config.default_country;
                let selected = if country_changed {
                    resolve_country(config, self.home_country)?
                } else {
                    country
                };
                let raw = if country_changed && config.mask == MaskKind::InternationalPhone {
                    ""
                } else {
                    current.raw_value.as_str()
                };
                let unnumbered = current.is_unnumbered
                    && config.allow_unnumbered
                    && config.mask == MaskKind::StreetNumber;
                let state = self.run(config, "", raw, selected, unnumbered);
                Ok((config.clone(), state))
            }
        }
    }

    fn token<'a>(&'a self, config: &'a FieldConfig) -> &'a str {
        config
            .unnumbered_token
            .as_deref()
            .unwrap_or(&self.default_token)
    }

    fn run(
        &self,
        config: &FieldConfig,
        previous: &str,
        raw_edit: &str,
        country: &'static CountryPhoneProfile,
        unnumbered: bool,
    ) -> FieldState {
        let unnumbered = unnumbered && config.mask == MaskKind::StreetNumber;
        let ctx = FieldContext::new(&self.currency)
            .with_country(country)
            .with_home_country(self.home_country)
            .with_unnumbered(unnumbered, self.token(config));

        let formatted_value = apply_mask(previous, raw_edit, config.mask, &ctx);

        let detected_brand = if config.mask == MaskKind::PaymentCard {
            detect_brand(&formatted_value)
        } else {
            None
        };
        let ctx = ctx.with_brand(detected_brand);

        // the sentinel token is not a value to validate
        let validation = if unnumbered {
            validate("", ValidationKind::None, &ctx)
        } else {
            validate(&formatted_value, config.effective_validation(), &ctx)
        };

        let mut metadata = validation.metadata;
        if config.mask == MaskKind::PaymentCard && metadata.card.is_none() {
            metadata = FieldMetadata {
                card: Some(card_metadata(&formatted_value, &ctx)),
                ..metadata
            };
        }

        let raw_value = if unnumbered {
            self.state.raw_value.clone()
        } else {
            unmask(&formatted_value, config.mask)
        };

        let phase = if formatted_value.is_empty() {
            FieldPhase::Editing
        } else if validation.valid {
            FieldPhase::Valid
        } else {
            FieldPhase::Invalid
        };

        debug!(
            mask = %config.mask,
            validation = %config.effective_validation(),
            country = country.iso_code,
            valid = validation.valid,
            "field pipeline"
        );

        FieldState {
            raw_value,
            formatted_value,
            is_valid: validation.valid,
            reason: validation.reason,
            selected_country: Some(country),
            detected_brand,
            is_unnumbered: unnumbered,
            phase,
            metadata,
        }
    }
}

fn resolve_country(
    config: &FieldConfig,
    home_country: &'static CountryPhoneProfile,
) -> Result<&'static CountryPhoneProfile> {
    match &config.default_country {
        Some(iso_code) => {
            find_country(iso_code).ok_or_else(|| MascaraError::UnknownCountry(iso_code.clone()))
        }
        None => Ok(home_country),
    }
}

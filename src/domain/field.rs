use serde::{Deserialize, Serialize};

use super::{
    CardBrand, CountryPhoneProfile, FieldMetadata, InvalidReason, MaskKind, ValidationKind,
};

/// Caller-supplied description of one editable field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldConfig {
    pub mask: MaskKind,
    #[serde(default = "default_validation")]
    pub validation: ValidationKind,
    #[serde(default)]
    pub default_country: Option<String>,
    #[serde(default)]
    pub allow_unnumbered: bool,
    #[serde(default)]
    pub unnumbered_token: Option<String>,
}

fn default_validation() -> ValidationKind {
    ValidationKind::None
}

impl FieldConfig {
    #[must_use]
    pub fn new(mask: MaskKind, validation: ValidationKind) -> Self {
        Self {
            mask,
            validation,
            default_country: None,
            allow_unnumbered: false,
            unnumbered_token: None,
        }
    }

    #[must_use]
    pub fn with_country(mut self, iso_code: &str) -> Self {
        self.default_country = Some(iso_code.to_string());
        self
    }

    #[must_use]
    pub fn with_unnumbered(mut self, token: Option<&str>) -> Self {
        self.allow_unnumbered = true;
        self.unnumbered_token = token.map(str::to_string);
        self
    }

    /// Validation actually run by the controller. International phone
    /// fields are phone-validated even when configured without a kind.
    #[must_use]
    pub fn effective_validation(&self) -> ValidationKind {
        match (self.mask, self.validation) {
            (MaskKind::InternationalPhone, ValidationKind::None) => ValidationKind::Phone,
            (_, kind) => kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPhase {
    /// Never edited.
    Clean,
    /// Edited, currently empty.
    Editing,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub raw_value: String,
    pub formatted_value: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<InvalidReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_country: Option<&'static CountryPhoneProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_brand: Option<CardBrand>,
    pub is_unnumbered: bool,
    pub phase: FieldPhase,
    pub metadata: FieldMetadata,
}

impl FieldState {
    #[must_use]
    pub fn clean(selected_country: Option<&'static CountryPhoneProfile>) -> Self {
        Self {
            raw_value: String::new(),
            formatted_value: String::new(),
            is_valid: true,
            reason: None,
            selected_country,
            detected_brand: None,
            is_unnumbered: false,
            phase: FieldPhase::Clean,
            metadata: FieldMetadata::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The full text of the input after a keystroke or paste.
    Input(String),
    SelectCountry(String),
    SetUnnumbered(bool),
    /// Programmatic value change from outside the keystroke path.
    Reset(String),
    Reconfigure(FieldConfig),
}

/// What the controller publishes to the UI after each event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldUpdate {
    pub formatted_value: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<InvalidReason>,
    pub phase: FieldPhase,
    pub is_unnumbered: bool,
    pub metadata: FieldMetadata,
}

impl From<&FieldState> for FieldUpdate {
    fn from(state: &FieldState) -> Self {
        Self {
            formatted_value: state.formatted_value.clone(),
            is_valid: state.is_valid,
            reason: state.reason,
            phase: state.phase,
            is_unnumbered: state.is_unnumbered,
            metadata: state.metadata.clone(),
        }
    }
}

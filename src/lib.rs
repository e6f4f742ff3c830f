pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod utils;

pub use config::{CurrencyConfig, MascaraConfig, VerificationConfig};
pub use domain::{
    CardBrand, FieldConfig, FieldEvent, FieldPhase, FieldState, FieldUpdate, MaskKind, Validation,
    ValidationKind, VerificationInput, VerificationStatus, VerificationView,
};
pub use engine::{
    CodeDelivery, Clock, FieldContext, FieldController, ManualClock, SystemClock,
    VerificationFlow, VerificationSession,
};
pub use error::{DeliveryError, MascaraError, Result as MascaraResult};
pub use output::{OutputFormat, RedactionConfig};

/// Format a value as if it had been typed into an empty field.
///
/// # Example
/// ```
/// use mascara::{format_value, MaskKind};
/// assert_eq!(format_value("52998224725", MaskKind::NationalIdShort), "529.982.247-25");
/// ```
#[must_use]
pub fn format_value(raw: &str, kind: MaskKind) -> String {
    engine::apply_mask("", raw, kind, &FieldContext::default())
}

/// Validate a value with the home-country defaults.
///
/// # Example
/// ```
/// use mascara::{validate_value, ValidationKind};
/// assert!(validate_value("529.982.247-25", ValidationKind::NationalIdShort).valid);
/// ```
#[must_use]
pub fn validate_value(value: &str, kind: ValidationKind) -> Validation {
    engine::validate(value, kind, &FieldContext::default())
}

/// Format and validate with the given settings, the way a field
/// controller does for a single paste into an empty field.
pub fn check_value(
    raw: &str,
    field: FieldConfig,
    settings: &MascaraConfig,
) -> MascaraResult<FieldUpdate> {
    let mut controller = FieldController::new(field, settings)?;
    controller.handle(FieldEvent::Input(raw.to_string()))
}

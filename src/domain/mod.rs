mod field;
mod kinds;
mod rules;
mod validation;
mod verification;

pub use field::{FieldConfig, FieldEvent, FieldPhase, FieldState, FieldUpdate};
pub use kinds::{CardBrand, MaskKind, ValidationKind};
pub use rules::{CardBrandRule, CountryPhoneProfile, DIGIT_PLACEHOLDER};
pub use validation::{CardMetadata, FieldMetadata, InvalidReason, PhoneMetadata, Validation};
pub use verification::{
    Effect, TimerKind, VerificationError, VerificationInput, VerificationStatus,
    VerificationView, CODE_LENGTH,
};

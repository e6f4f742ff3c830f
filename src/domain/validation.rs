use serde::Serialize;

use super::CardBrand;

/// Why a non-empty value failed its validation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    Length,
    RepeatedDigits,
    Checksum,
    AreaCode,
    MobilePrefix,
    Shape,
}

impl InvalidReason {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Length => "wrong number of digits",
            Self::RepeatedDigits => "all digits are identical",
            Self::Checksum => "check digits do not match",
            Self::AreaCode => "unknown area code",
            Self::MobilePrefix => "mobile numbers must start with 9",
            Self::Shape => "unexpected format",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<CardBrand>,
    pub digits: usize,
    pub luhn: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneMetadata {
    pub country: &'static str,
    pub dial_code: &'static str,
    pub full_number: String,
}

/// Side-channel data produced alongside every validation, valid or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<InvalidReason>,
    #[serde(skip_serializing_if = "is_empty_metadata")]
    pub metadata: FieldMetadata,
}

fn is_empty_metadata(metadata: &FieldMetadata) -> bool {
    metadata.card.is_none() && metadata.phone.is_none()
}

impl Validation {
    #[must_use]
    pub fn valid(metadata: FieldMetadata) -> Self {
        Self {
            valid: true,
            reason: None,
            metadata,
        }
    }

    #[must_use]
    pub fn invalid(reason: InvalidReason, metadata: FieldMetadata) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
            metadata,
        }
    }

    #[must_use]
    pub fn from_reason(reason: Option<InvalidReason>, metadata: FieldMetadata) -> Self {
        match reason {
            Some(reason) => Self::invalid(reason, metadata),
            None => Self::valid(metadata),
        }
    }
}

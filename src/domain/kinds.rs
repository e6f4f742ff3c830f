use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MascaraError;

/// Formatting behavior applied to a field on every keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskKind {
    NationalIdShort,
    NationalIdLong,
    LocalPhone,
    InternationalPhone,
    PostalCode,
    Date,
    Time,
    Currency,
    Percentage,
    PaymentCard,
    Password,
    StreetNumber,
    None,
}

impl MaskKind {
    pub const ALL: [MaskKind; 13] = [
        Self::NationalIdShort,
        Self::NationalIdLong,
        Self::LocalPhone,
        Self::InternationalPhone,
        Self::PostalCode,
        Self::Date,
        Self::Time,
        Self::Currency,
        Self::Percentage,
        Self::PaymentCard,
        Self::Password,
        Self::StreetNumber,
        Self::None,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NationalIdShort => "national-id-short",
            Self::NationalIdLong => "national-id-long",
            Self::LocalPhone => "local-phone",
            Self::InternationalPhone => "international-phone",
            Self::PostalCode => "postal-code",
            Self::Date => "date",
            Self::Time => "time",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::PaymentCard => "payment-card",
            Self::Password => "password",
            Self::StreetNumber => "street-number",
            Self::None => "none",
        }
    }
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaskKind {
    type Err = MascaraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| MascaraError::UnknownKind {
                kind: "mask kind",
                value: s.to_string(),
            })
    }
}

/// Semantic check applied to a field, independent from its mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationKind {
    Email,
    Url,
    Numeric,
    NationalIdShort,
    NationalIdLong,
    Phone,
    PaymentCard,
    None,
}

impl ValidationKind {
    pub const ALL: [ValidationKind; 8] = [
        Self::Email,
        Self::Url,
        Self::Numeric,
        Self::NationalIdShort,
        Self::NationalIdLong,
        Self::Phone,
        Self::PaymentCard,
        Self::None,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::Numeric => "numeric",
            Self::NationalIdShort => "national-id-short",
            Self::NationalIdLong => "national-id-long",
            Self::Phone => "phone",
            Self::PaymentCard => "payment-card",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationKind {
    type Err = MascaraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| MascaraError::UnknownKind {
                kind: "validation kind",
                value: s.to_string(),
            })
    }
}

/// Payment-card network identified from the leading digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Elo,
    Hipercard,
    Amex,
    Diners,
    Discover,
    Jcb,
    Aura,
    Mastercard,
    Visa,
}

impl CardBrand {
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Elo => "elo",
            Self::Hipercard => "hipercard",
            Self::Amex => "amex",
            Self::Diners => "diners",
            Self::Discover => "discover",
            Self::Jcb => "jcb",
            Self::Aura => "aura",
            Self::Mastercard => "mastercard",
            Self::Visa => "visa",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

mod formatter;
mod redact;

pub use formatter::{
    format_brand, format_countries, format_field, format_replay, format_verification,
    redact_report, BrandReport, FieldReport, OutputFormat,
};
pub use redact::{redact_address, redact_digits, RedactionConfig};

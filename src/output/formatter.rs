use std::fmt::Write;

use colored::Colorize;
use serde::Serialize;

use crate::domain::{
    CardBrand, CountryPhoneProfile, FieldPhase, FieldUpdate, MaskKind, ValidationKind,
    VerificationStatus, VerificationView,
};
use crate::engine::brands::display_name;
use crate::output::redact::{redact_digits, RedactionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" | "term" | "tty" => Ok(Self::Terminal),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Valid options: terminal, json")),
        }
    }
}

/// One value run through a field: what went in and what the field published.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub input: String,
    pub mask: MaskKind,
    pub validation: ValidationKind,
    pub country: &'static str,
    #[serde(flatten)]
    pub update: FieldUpdate,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandReport {
    pub number: String,
    pub brand: Option<CardBrand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<&'static str>,
}

#[derive(Serialize)]
struct ReplayOutput<'a> {
    steps: &'a [FieldReport],
    #[serde(skip_serializing_if = "Option::is_none")]
    last: Option<&'a FieldReport>,
}

/// Hide what the mask says is sensitive before it reaches a terminal or a
/// log file.
#[must_use]
pub fn redact_report(report: &FieldReport, redaction: &RedactionConfig) -> FieldReport {
    if !redaction.enabled {
        return report.clone();
    }
    let hide = |value: &str| match report.mask {
        MaskKind::PaymentCard => redact_digits(value, redaction),
        MaskKind::Password => "*".repeat(value.chars().count()),
        _ => value.to_string(),
    };
    let mut redacted = report.clone();
    redacted.input = hide(&report.input);
    redacted.update.formatted_value = hide(&report.update.formatted_value);
    redacted
}

#[must_use]
pub fn format_field(report: &FieldReport, format: OutputFormat, redaction: &RedactionConfig) -> String {
    let report = redact_report(report, redaction);
    match format {
        OutputFormat::Terminal => {
            let mut output = String::new();
            write_field_terminal(&mut output, &report);
            output
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

fn write_field_terminal(output: &mut String, report: &FieldReport) {
    let update = &report.update;
    let verdict = match update.phase {
        FieldPhase::Valid => "VALID".green().bold(),
        FieldPhase::Invalid => "INVALID".red().bold(),
        FieldPhase::Clean | FieldPhase::Editing => "EMPTY".yellow().bold(),
    };

    let _ = writeln!(
        output,
        "{} {} {}",
        verdict,
        update.formatted_value.bright_white().bold(),
        format!("[{} / {}]", report.mask, report.validation).dimmed()
    );

    if let Some(reason) = update.reason {
        let _ = writeln!(output, "  {} {}", "reason:".bright_black(), reason.describe());
    }
    if update.is_unnumbered {
        let _ = writeln!(output, "  {} unnumbered", "address:".bright_black());
    }
    if let Some(card) = &update.metadata.card {
        let brand = card.brand.map_or("unknown", display_name);
        let _ = writeln!(
            output,
            "  {} {} ({} digits, luhn {})",
            "card:".bright_black(),
            brand.bright_cyan(),
            card.digits,
            if card.luhn { "ok".green() } else { "failed".yellow() }
        );
    }
    if let Some(phone) = &update.metadata.phone {
        let _ = writeln!(
            output,
            "  {} {} {}",
            "phone:".bright_black(),
            phone.country.bright_cyan(),
            phone.full_number
        );
    }
}

/// Each keystroke of a replay on its own line, then the final verdict.
#[must_use]
pub fn format_replay(
    steps: &[FieldReport],
    format: OutputFormat,
    redaction: &RedactionConfig,
) -> String {
    let steps: Vec<FieldReport> = steps.iter().map(|s| redact_report(s, redaction)).collect();
    match format {
        OutputFormat::Terminal => {
            let mut output = String::new();
            for (i, step) in steps.iter().enumerate() {
                let _ = writeln!(
                    output,
                    "{} {:<24} → {}",
                    format!("{:>3}", i + 1).dimmed(),
                    step.input,
                    step.update.formatted_value.bright_white()
                );
            }
            if let Some(last) = steps.last() {
                output.push('\n');
                write_field_terminal(&mut output, last);
            }
            output
        }
        OutputFormat::Json => {
            let out = ReplayOutput {
                steps: &steps,
                last: steps.last(),
            };
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

#[must_use]
pub fn format_brand(report: &BrandReport, format: OutputFormat, redaction: &RedactionConfig) -> String {
    let report = BrandReport {
        number: redact_digits(&report.number, redaction),
        ..report.clone()
    };
    match format {
        OutputFormat::Terminal => match report.display_name {
            Some(name) => format!("{} {}\n", report.number, name.bright_cyan().bold()),
            None => format!("{} {}\n", report.number, "unknown brand".yellow()),
        },
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

#[must_use]
pub fn format_countries(countries: &[CountryPhoneProfile], format: OutputFormat) -> String {
    match format {
        OutputFormat::Terminal => {
            let mut output = String::new();
            for country in countries {
                let _ = writeln!(
                    output,
                    "{} {} {:<16} {:<6} {}",
                    country.flag,
                    country.iso_code.bright_white().bold(),
                    country.display_name,
                    country.dial_code.bright_cyan(),
                    country.template.dimmed()
                );
            }
            output
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(countries).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

/// Single status line for an interactive verification session.
#[must_use]
pub fn format_verification(view: &VerificationView, format: OutputFormat) -> String {
    match format {
        OutputFormat::Terminal => {
            let status = match view.status {
                VerificationStatus::Verified => "verified".green().bold(),
                VerificationStatus::Exhausted => "exhausted".red().bold(),
                VerificationStatus::AwaitingCode => "awaiting code".bright_cyan(),
                VerificationStatus::Idle => "idle".yellow(),
                VerificationStatus::Sending => "sending".normal(),
                VerificationStatus::Verifying => "verifying".normal(),
            };
            match &view.error {
                Some(error) => format!("{status}: {}\n", error.to_string().red()),
                None => format!("{status}\n"),
            }
        }
        OutputFormat::Json => {
            let line = serde_json::to_string(view).unwrap_or_else(|_| "{}".to_string());
            format!("{line}\n")
        }
    }
}

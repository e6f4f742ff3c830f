use std::io::Read;

use anyhow::{Context, Result};

use mascara::domain::{FieldConfig, FieldEvent, MaskKind, ValidationKind};
use mascara::engine::{brands, countries::COUNTRIES, FieldController};
use mascara::output::{
    format_brand, format_countries, format_field, format_replay, BrandReport, FieldReport,
    OutputFormat, RedactionConfig,
};
use mascara::MascaraConfig;

/// How a single field is set up from the command line.
pub struct FieldArgs<'a> {
    pub mask: MaskKind,
    pub validation: ValidationKind,
    pub country: Option<&'a str>,
    pub unnumbered: bool,
}

impl FieldArgs<'_> {
    fn controller(&self, settings: &MascaraConfig) -> Result<FieldController> {
        let mut config = FieldConfig::new(self.mask, self.validation);
        if let Some(country) = self.country {
            config = config.with_country(country);
        }
        if self.unnumbered {
            config = config.with_unnumbered(None);
        }
        let mut controller = FieldController::new(config, settings)?;
        if self.unnumbered {
            controller.handle(FieldEvent::SetUnnumbered(true))?;
        }
        Ok(controller)
    }
}

fn read_value(value: Option<&str>) -> Result<String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Read stdin")?;
    Ok(content.trim_end_matches(['\n', '\r']).to_string())
}

fn report(
    controller: &mut FieldController,
    field: &FieldArgs<'_>,
    input: &str,
) -> Result<FieldReport> {
    let update = controller.handle(FieldEvent::Input(input.to_string()))?;
    Ok(FieldReport {
        input: input.to_string(),
        mask: field.mask,
        validation: controller.config().effective_validation(),
        country: controller
            .state()
            .selected_country
            .map_or("", |c| c.iso_code),
        update,
    })
}

fn redaction(no_redact: bool) -> RedactionConfig {
    RedactionConfig {
        enabled: !no_redact,
        ..RedactionConfig::default()
    }
}

/// Print only the formatted value in terminal mode, so the command can be
/// used in pipelines.
pub fn run_format(
    value: Option<&str>,
    field: &FieldArgs<'_>,
    format: OutputFormat,
    settings: &MascaraConfig,
) -> Result<()> {
    let input = read_value(value)?;
    let mut controller = field.controller(settings)?;
    let report = report(&mut controller, field, &input)?;

    match format {
        OutputFormat::Terminal => println!("{}", report.update.formatted_value),
        OutputFormat::Json => {
            // the format command always prints the value in full
            let unredacted = RedactionConfig {
                enabled: false,
                ..RedactionConfig::default()
            };
            print!("{}", format_field(&report, format, &unredacted));
        }
    }
    Ok(())
}

pub fn run_validate(
    value: Option<&str>,
    field: &FieldArgs<'_>,
    format: OutputFormat,
    no_redact: bool,
    settings: &MascaraConfig,
) -> Result<()> {
    let input = read_value(value)?;
    let mut controller = field.controller(settings)?;
    let report = report(&mut controller, field, &input)?;
    let is_valid = report.update.is_valid;

    let output = format_field(&report, format, &redaction(no_redact));
    print!("{output}");
    if format == OutputFormat::Json {
        println!();
    }

    if !is_valid {
        std::process::exit(1);
    }
    Ok(())
}

pub fn run_brand(number: &str, format: OutputFormat, no_redact: bool) -> Result<()> {
    let rule = brands::find_rule(number);
    let report = BrandReport {
        number: number.to_string(),
        brand: rule.map(|r| r.brand),
        display_name: rule.map(|r| r.display_name),
    };
    print!("{}", format_brand(&report, format, &redaction(no_redact)));
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

pub fn run_countries(format: OutputFormat) -> Result<()> {
    print!("{}", format_countries(COUNTRIES, format));
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// Feed each argument to the same field in turn, as successive keystrokes.
pub fn run_replay(
    keystrokes: &[String],
    field: &FieldArgs<'_>,
    format: OutputFormat,
    no_redact: bool,
    settings: &MascaraConfig,
) -> Result<()> {
    if keystrokes.is_empty() {
        anyhow::bail!("Nothing to replay: pass one argument per keystroke");
    }
    let mut controller = field.controller(settings)?;
    let steps = keystrokes
        .iter()
        .map(|input| report(&mut controller, field, input))
        .collect::<Result<Vec<_>>>()?;

    print!("{}", format_replay(&steps, format, &redaction(no_redact)));
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

mod cli;
mod presets;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use mascara::domain::{MaskKind, ValidationKind};
use mascara::output::OutputFormat;

use cli::fields::FieldArgs;

#[derive(Parser)]
#[command(
    name = "mascara",
    about = "Format-as-you-type masks, field validation and one-time code checks",
    version
)]
enum Cli {
    /// Print a value the way a masked field would show it
    Format(FormatArgs),
    /// Mask and validate a value; exits 1 when it is invalid
    Validate(ValidateArgs),
    /// Detect the payment-card brand of a number
    Brand(BrandArgs),
    /// List the phone countries a field can select
    Countries(CountriesArgs),
    /// Replay successive keystrokes through one field
    Replay(ReplayArgs),
    /// Run a one-time code session; the code is printed to stderr
    Verify(VerifyArgs),
    /// Write a mascara.toml preset
    Init(InitArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Args)]
struct SettingsArgs {
    #[arg(long, help = "Configuration file (default: ./mascara.toml)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Configuration profile to use")]
    profile: Option<String>,
}

#[derive(Args)]
struct FieldOptions {
    #[arg(long, short, default_value = "none", help = "Mask kind, e.g. national-id-short")]
    mask: MaskKind,

    #[arg(long, help = "Phone country (ISO code) for international-phone fields")]
    country: Option<String>,

    #[arg(long, help = "Mark a street-number field as having no number")]
    unnumbered: bool,
}

#[derive(Parser)]
struct FormatArgs {
    #[arg(help = "Value to format (reads stdin if omitted)")]
    value: Option<String>,

    #[command(flatten)]
    field: FieldOptions,

    #[arg(long, short, default_value = "terminal", help = "Output format: terminal, json")]
    format: OutputFormat,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(Parser)]
struct ValidateArgs {
    #[arg(help = "Value to validate (reads stdin if omitted)")]
    value: Option<String>,

    #[arg(long, short, help = "Validation kind, e.g. email")]
    kind: ValidationKind,

    #[command(flatten)]
    field: FieldOptions,

    #[arg(long, short, default_value = "terminal", help = "Output format: terminal, json")]
    format: OutputFormat,

    #[arg(long, help = "Show card numbers and passwords in full")]
    no_redact: bool,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(Parser)]
struct BrandArgs {
    #[arg(help = "Card number, separators allowed")]
    number: String,

    #[arg(long, short, default_value = "terminal", help = "Output format: terminal, json")]
    format: OutputFormat,

    #[arg(long, help = "Show the card number in full")]
    no_redact: bool,
}

#[derive(Parser)]
struct CountriesArgs {
    #[arg(long, short, default_value = "terminal", help = "Output format: terminal, json")]
    format: OutputFormat,
}

#[derive(Parser)]
struct ReplayArgs {
    #[arg(help = "Field text after each keystroke, in order")]
    keystrokes: Vec<String>,

    #[arg(long, short, default_value = "none", help = "Validation kind")]
    kind: ValidationKind,

    #[command(flatten)]
    field: FieldOptions,

    #[arg(long, short, default_value = "terminal", help = "Output format: terminal, json")]
    format: OutputFormat,

    #[arg(long, help = "Show card numbers and passwords in full")]
    no_redact: bool,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(Parser)]
struct VerifyArgs {
    #[arg(help = "Email address or phone number to verify")]
    address: String,

    #[arg(long, short, default_value = "terminal", help = "Output format: terminal, json")]
    format: OutputFormat,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(Parser)]
struct InitArgs {
    #[arg(
        long,
        default_value = "default",
        value_parser = ["default", "strict", "development"],
        help = "Configuration preset: default, strict, development"
    )]
    preset: String,

    #[arg(long, help = "Overwrite existing mascara.toml if it already exists")]
    force: bool,
}

#[derive(Parser)]
struct CompletionsArgs {
    #[arg(help = "Target shell: bash, zsh, fish, elvish, powershell")]
    shell: Shell,
}

impl FieldOptions {
    fn args(&self, validation: ValidationKind) -> FieldArgs<'_> {
        FieldArgs {
            mask: self.mask,
            validation,
            country: self.country.as_deref(),
            unnumbered: self.unnumbered,
        }
    }
}

impl SettingsArgs {
    fn load(&self) -> Result<mascara::MascaraConfig> {
        cli::load_settings(self.config.as_deref(), self.profile.as_deref())
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MASCARA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    match Cli::parse() {
        Cli::Format(args) => cli::fields::run_format(
            args.value.as_deref(),
            &args.field.args(ValidationKind::None),
            args.format,
            &args.settings.load()?,
        ),
        Cli::Validate(args) => cli::fields::run_validate(
            args.value.as_deref(),
            &args.field.args(args.kind),
            args.format,
            args.no_redact,
            &args.settings.load()?,
        ),
        Cli::Brand(args) => cli::fields::run_brand(&args.number, args.format, args.no_redact),
        Cli::Countries(args) => cli::fields::run_countries(args.format),
        Cli::Replay(args) => cli::fields::run_replay(
            &args.keystrokes,
            &args.field.args(args.kind),
            args.format,
            args.no_redact,
            &args.settings.load()?,
        ),
        Cli::Verify(args) => {
            cli::verify::run_verify(&args.address, args.format, &args.settings.load()?)
        }
        Cli::Init(args) => cli::init::run_init(&args.preset, args.force),
        Cli::Completions(args) => {
            generate(
                args.shell,
                &mut Cli::command(),
                "mascara",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

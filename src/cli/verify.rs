use std::io::BufRead;

use anyhow::{Context, Result};
use colored::Colorize;

use mascara::domain::VerificationStatus;
use mascara::engine::{SystemClock, VerificationFlow};
use mascara::output::{format_verification, OutputFormat};
use mascara::{DeliveryError, MascaraConfig};

/// Development delivery: the code is written to stderr instead of being
/// mailed.
fn console_delivery(target: &str, code: &str) -> Result<(), DeliveryError> {
    eprintln!("{} code for {target}: {}", "✉".bright_black(), code.bold());
    Ok(())
}

/// Interactive session on stdin. Each line is a code attempt; `resend`
/// asks for a new code. Exits non-zero unless the address gets verified.
pub fn run_verify(address: &str, format: OutputFormat, settings: &MascaraConfig) -> Result<()> {
    let mut flow = VerificationFlow::new(
        address,
        settings.verification,
        console_delivery,
        SystemClock,
    );

    let view = flow.send();
    print!("{}", format_verification(&view, format));
    if view.status != VerificationStatus::AwaitingCode {
        std::process::exit(1);
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Read stdin")?;
        let line = line.trim();

        flow.tick();
        let view = if line.eq_ignore_ascii_case("resend") {
            flow.resend()
        } else if settings.verification.auto_submit {
            flow.input(line)
        } else {
            flow.input(line);
            flow.submit()
        };
        print!("{}", format_verification(&view, format));

        match view.status {
            VerificationStatus::Verified => return Ok(()),
            VerificationStatus::Exhausted => std::process::exit(1),
            _ => {}
        }
    }

    std::process::exit(1);
}

use crate::domain::InvalidReason;
use crate::utils::{all_identical, digit_values};

// --- CPF (11-digit national ID) ---

/// Check a CPF with the two-pass Módulo 11 algorithm.
/// Returns the first failed rule, or `None` when the number is valid.
#[must_use]
pub fn check_cpf(cpf: &str) -> Option<InvalidReason> {
    let digits = digit_values(cpf);

    if digits.len() != 11 {
        return Some(InvalidReason::Length);
    }

    // Reject all-same digits (e.g. 111.111.111-11)
    if all_identical(&digits) {
        return Some(InvalidReason::RepeatedDigits);
    }

    if cpf_check_digit(&digits[..9], 10) != digits[9] {
        return Some(InvalidReason::Checksum);
    }
    if cpf_check_digit(&digits[..10], 11) != digits[10] {
        return Some(InvalidReason::Checksum);
    }
    None
}

#[must_use]
pub fn validate_cpf(cpf: &str) -> bool {
    check_cpf(cpf).is_none()
}

/// Weights descend from `first_weight` over the preceding digits.
fn cpf_check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=first_weight).rev())
        .map(|(&d, w)| d * w)
        .sum();
    let check = 11 - (sum % 11);
    if check >= 10 {
        0
    } else {
        check
    }
}

// --- CNPJ (14-digit company ID) ---

/// Check a CNPJ using Módulo 11 with the fixed CNPJ weight tables.
#[must_use]
pub fn check_cnpj(cnpj: &str) -> Option<InvalidReason> {
    let digits = digit_values(cnpj);

    if digits.len() != 14 {
        return Some(InvalidReason::Length);
    }

    if all_identical(&digits) {
        return Some(InvalidReason::RepeatedDigits);
    }

    let weights1: &[u32] = &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    if cnpj_check_digit(&digits[..12], weights1) != digits[12] {
        return Some(InvalidReason::Checksum);
    }

    let weights2: &[u32] = &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    if cnpj_check_digit(&digits[..13], weights2) != digits[13] {
        return Some(InvalidReason::Checksum);
    }
    None
}

#[must_use]
pub fn validate_cnpj(cnpj: &str) -> bool {
    check_cnpj(cnpj).is_none()
}

fn cnpj_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights.iter()).map(|(&d, &w)| d * w).sum();
    let rem = sum % 11;
    if rem < 2 {
        0
    } else {
        11 - rem
    }
}

//! CPF (Brazilian national ID number) checksum validation.
//!
//! A CPF has nine base digits followed by two check digits. Each check digit
//! is the weighted sum of the preceding digits modulo 11, mapped to `0` when
//! the remainder is below 2 and to `11 - remainder` otherwise. Numbers made of
//! a single repeated digit satisfy the arithmetic but are not issued, so they
//! are rejected.

use crate::config::CPF_LENGTH;

/// Check that `cpf` is exactly 11 ASCII digits with valid check digits.
pub fn is_valid_cpf(cpf: &str) -> bool {
    if cpf.len() != CPF_LENGTH || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u32> = cpf.bytes().map(|b| u32::from(b - b'0')).collect();

    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Check digit for `base`, weighting digits from `base.len() + 1` down to 2.
fn check_digit(base: &[u32]) -> u32 {
    let first_weight = base.len() as u32 + 1;
    let sum: u32 = base
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();

    match sum % 11 {
        rest if rest < 2 => 0,
        rest => 11 - rest,
    }
}

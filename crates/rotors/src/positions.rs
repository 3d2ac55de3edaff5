//! Position entry for the three banks.
//!
//! The cage accepts anything and sanitizes it; the strict parsers are for
//! front ends that would rather refuse a malformed setting.

use shared::domain::{BankKind, ROTORS_PER_BANK};
use shared::error::SetupError;

use crate::wiring::ORIGIN;

pub type BankPosition = [usize; ROTORS_PER_BANK];

/// Pads with `O`, truncates, uppercases and maps anything outside `A..Z`
/// to `O`.
pub fn sanitize_letters(raw: &str) -> BankPosition {
    let mut chars = raw.chars();
    std::array::from_fn(|_| match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some(c @ 'A'..='Z') => letter_value(c),
        _ => ORIGIN,
    })
}

/// Pads with `0`, truncates and maps anything outside `0..9` to `0`.
pub fn sanitize_digits(raw: &str) -> BankPosition {
    let mut chars = raw.chars();
    std::array::from_fn(|_| {
        chars
            .next()
            .and_then(|c| c.to_digit(10))
            .map_or(0, |d| d as usize)
    })
}

pub fn parse_letters_strict(raw: &str, bank: BankKind) -> Result<BankPosition, SetupError> {
    let chars = exact_len(raw, bank)?;
    let mut out = [0; ROTORS_PER_BANK];
    for (slot, (value, c)) in out.iter_mut().zip(chars).enumerate() {
        if !c.is_ascii_uppercase() {
            return Err(SetupError::PositionOutOfRange {
                bank,
                slot,
                found: c,
            });
        }
        *value = letter_value(c);
    }
    Ok(out)
}

pub fn parse_digits_strict(raw: &str) -> Result<BankPosition, SetupError> {
    let bank = BankKind::Index;
    let chars = exact_len(raw, bank)?;
    let mut out = [0; ROTORS_PER_BANK];
    for (slot, (value, c)) in out.iter_mut().zip(chars).enumerate() {
        *value = c
            .to_digit(10)
            .map(|d| d as usize)
            .ok_or(SetupError::PositionOutOfRange {
                bank,
                slot,
                found: c,
            })?;
    }
    Ok(out)
}

fn exact_len(raw: &str, bank: BankKind) -> Result<Vec<char>, SetupError> {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() != ROTORS_PER_BANK {
        return Err(SetupError::PositionLength {
            bank,
            actual: chars.len(),
        });
    }
    Ok(chars)
}

pub fn letters(positions: impl IntoIterator<Item = usize>) -> String {
    positions.into_iter().map(letter_for).collect()
}

pub fn digits(positions: impl IntoIterator<Item = usize>) -> String {
    positions
        .into_iter()
        .map(|p| char::from(b'0' + (p % 10) as u8))
        .collect()
}

fn letter_value(c: char) -> usize {
    (c as u8 - b'A') as usize
}

fn letter_for(p: usize) -> char {
    char::from(b'A' + (p % 26) as u8)
}

//! Rotor order strings: five `<id><R|N>` pairs per bank.

use std::fmt;

use shared::domain::{BankKind, Orientation, ROTORS_PER_BANK};
use shared::error::SetupError;

use crate::wiring::{BIG_ROTOR_WIRINGS, INDEX_ROTOR_WIRINGS};

pub const ORDER_LEN: usize = ROTORS_PER_BANK * 2;

pub const DEFAULT_CIPHER_ORDER: &str = "0N1N2N3N4N";
pub const DEFAULT_CONTROL_ORDER: &str = "5N6N7N8N9N";
pub const DEFAULT_INDEX_ORDER: &str = "0N1N2N3N4N";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotSpec {
    pub id: u8,
    pub orientation: Orientation,
}

/// Which rotor sits in each slot of one bank, and which way round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankOrder {
    bank: BankKind,
    slots: [SlotSpec; ROTORS_PER_BANK],
}

/// Number of physical rotors that fit a bank.
pub fn rotor_limit(bank: BankKind) -> usize {
    match bank {
        BankKind::Cipher | BankKind::Control => BIG_ROTOR_WIRINGS.len(),
        BankKind::Index => INDEX_ROTOR_WIRINGS.len(),
    }
}

pub fn default_order(bank: BankKind) -> &'static str {
    match bank {
        BankKind::Cipher => DEFAULT_CIPHER_ORDER,
        BankKind::Control => DEFAULT_CONTROL_ORDER,
        BankKind::Index => DEFAULT_INDEX_ORDER,
    }
}

impl BankOrder {
    pub fn default_for(bank: BankKind) -> Self {
        Self::parse_lenient(default_order(bank), bank)
    }

    /// Reads an order without rejecting anything. Ids that are missing or
    /// past the bank's table become 0; any flag other than `R` is normal.
    pub fn parse_lenient(raw: &str, bank: BankKind) -> Self {
        let limit = rotor_limit(bank);
        let chars: Vec<char> = raw.chars().collect();
        let mut slots = [SlotSpec::default(); ROTORS_PER_BANK];
        for (slot, spec) in slots.iter_mut().enumerate() {
            let id = chars
                .get(slot * 2)
                .and_then(|c| c.to_digit(10))
                .map(|d| d as usize)
                .filter(|d| *d < limit)
                .unwrap_or(0);
            spec.id = id as u8;
            spec.orientation = chars
                .get(slot * 2 + 1)
                .map_or(Orientation::Normal, |c| Orientation::from_flag(*c));
        }
        Self { bank, slots }
    }

    /// Configuration entry point: absent or wrong-length orders fall back to
    /// the bank default.
    pub fn from_config(raw: Option<&str>, bank: BankKind) -> Self {
        match raw {
            Some(raw) if raw.chars().count() == ORDER_LEN => Self::parse_lenient(raw, bank),
            _ => Self::default_for(bank),
        }
    }

    pub fn parse_strict(raw: &str, bank: BankKind) -> Result<Self, SetupError> {
        let chars: Vec<char> = raw.chars().collect();
        if chars.len() != ORDER_LEN {
            return Err(SetupError::OrderLength {
                bank,
                actual: chars.len(),
            });
        }
        let limit = rotor_limit(bank);
        let mut slots = [SlotSpec::default(); ROTORS_PER_BANK];
        for (slot, (spec, pair)) in slots.iter_mut().zip(chars.chunks(2)).enumerate() {
            let (digit, flag) = (pair[0], pair[1]);
            let id = digit
                .to_digit(10)
                .map(|d| d as usize)
                .filter(|d| *d < limit)
                .ok_or(SetupError::RotorOutOfRange {
                    bank,
                    slot,
                    limit,
                    found: digit,
                })?;
            let orientation = match flag {
                'N' => Orientation::Normal,
                'R' => Orientation::Reversed,
                found => return Err(SetupError::Orientation { bank, slot, found }),
            };
            *spec = SlotSpec {
                id: id as u8,
                orientation,
            };
        }
        Ok(Self { bank, slots })
    }

    pub fn bank(&self) -> BankKind {
        self.bank
    }

    pub fn slots(&self) -> &[SlotSpec; ROTORS_PER_BANK] {
        &self.slots
    }

    pub fn ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots.iter().map(|spec| spec.id)
    }
}

impl fmt::Display for BankOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spec in &self.slots {
            write!(f, "{}{}", spec.id, spec.orientation.flag())?;
        }
        Ok(())
    }
}

/// A physical rotor can only sit in one slot. The ten large rotors are shared
/// between the cipher and control banks; the index rotors form their own set.
pub fn check_distinct(
    cipher: &BankOrder,
    control: &BankOrder,
    index: &BankOrder,
) -> Result<(), SetupError> {
    let mut seen = [false; BIG_ROTOR_WIRINGS.len()];
    for id in cipher.ids().chain(control.ids()) {
        let used = &mut seen[usize::from(id)];
        if *used {
            return Err(SetupError::DuplicateBigRotor { id });
        }
        *used = true;
    }

    let mut seen = [false; INDEX_ROTOR_WIRINGS.len()];
    for id in index.ids() {
        let used = &mut seen[usize::from(id)];
        if *used {
            return Err(SetupError::DuplicateIndexRotor { id });
        }
        *used = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_display() {
        assert_eq!(BankOrder::default_for(BankKind::Cipher).to_string(), "0N1N2N3N4N");
        assert_eq!(BankOrder::default_for(BankKind::Control).to_string(), "5N6N7N8N9N");
        assert_eq!(BankOrder::default_for(BankKind::Index).to_string(), "0N1N2N3N4N");
    }

    #[test]
    fn lenient_parse_substitutes_zero_and_normal() {
        let order = BankOrder::parse_lenient("7R9x3", BankKind::Index);
        assert_eq!(order.to_string(), "0R0N3N0N0N");
    }

    #[test]
    fn config_falls_back_on_length() {
        let order = BankOrder::from_config(Some("1R2R"), BankKind::Control);
        assert_eq!(order, BankOrder::default_for(BankKind::Control));
        let order = BankOrder::from_config(None, BankKind::Cipher);
        assert_eq!(order, BankOrder::default_for(BankKind::Cipher));
        let order = BankOrder::from_config(Some("9R8N7R6N5R"), BankKind::Cipher);
        assert_eq!(order.to_string(), "9R8N7R6N5R");
    }

    #[test]
    fn strict_parse_reports_the_offending_slot() {
        assert_eq!(
            BankOrder::parse_strict("0N1N2N3N5N", BankKind::Index),
            Err(SetupError::RotorOutOfRange {
                bank: BankKind::Index,
                slot: 4,
                limit: 5,
                found: '5',
            })
        );
        assert_eq!(
            BankOrder::parse_strict("0N1X2N3N4N", BankKind::Cipher),
            Err(SetupError::Orientation {
                bank: BankKind::Cipher,
                slot: 1,
                found: 'X',
            })
        );
        assert_eq!(
            BankOrder::parse_strict("0N1N", BankKind::Control),
            Err(SetupError::OrderLength {
                bank: BankKind::Control,
                actual: 4,
            })
        );
    }

    #[test]
    fn big_rotors_are_shared_between_banks() {
        let cipher = BankOrder::parse_strict("0N1N2N3N4N", BankKind::Cipher).expect("cipher");
        let control = BankOrder::parse_strict("5N6N7N8N4R", BankKind::Control).expect("control");
        let index = BankOrder::default_for(BankKind::Index);
        assert_eq!(
            check_distinct(&cipher, &control, &index),
            Err(SetupError::DuplicateBigRotor { id: 4 })
        );
    }

    #[test]
    fn index_rotors_must_differ() {
        let cipher = BankOrder::default_for(BankKind::Cipher);
        let control = BankOrder::default_for(BankKind::Control);
        let index = BankOrder::parse_strict("0N1N2N2R4N", BankKind::Index).expect("index");
        assert_eq!(
            check_distinct(&cipher, &control, &index),
            Err(SetupError::DuplicateIndexRotor { id: 2 })
        );
        let index = BankOrder::default_for(BankKind::Index);
        assert_eq!(check_distinct(&cipher, &control, &index), Ok(()));
    }
}

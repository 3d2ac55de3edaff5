use std::fmt;

use shared::domain::{BankKind, BigRotorId, Direction, IndexRotorId, Variant, ROTORS_PER_BANK};
use shared::protocol::BankPositions;
use tracing::{debug, info, trace};

use crate::order::BankOrder;
use crate::positions::{self, BankPosition};
use crate::rotor::{CipherRotor, ControlRotor, IndexRotor, Mounted};
use crate::wiring::{
    CONTROL_TO_INDEX_2900, CONTROL_TO_INDEX_889, DISCONNECTED_2900, INDEX_TO_MAGNET, ORIGIN,
};

/// Cycles without cipher slot 0 or 4 moving before the machine refuses to
/// operate. A machine that sits here has its index rotors installed wrong.
pub const LOCKOUT_THRESHOLD: u32 = 21;

/// Slots whose stepping clears the lockout counter.
const END_SLOTS: [usize; 2] = [0, ROTORS_PER_BANK - 1];

pub type Magnets = [bool; ROTORS_PER_BANK];

/// The three rotor banks and the stepping logic between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorCage {
    cipher: [CipherRotor; ROTORS_PER_BANK],
    control: [ControlRotor; ROTORS_PER_BANK],
    index: [IndexRotor; ROTORS_PER_BANK],
    cipher_count: u32,
}

impl RotorCage {
    /// Builds a cage from three order strings. Orders of the wrong length
    /// fall back to the bank default.
    pub fn new(cipher_order: &str, control_order: &str, index_order: &str) -> Self {
        Self::from_orders(
            &BankOrder::from_config(Some(cipher_order), BankKind::Cipher),
            &BankOrder::from_config(Some(control_order), BankKind::Control),
            &BankOrder::from_config(Some(index_order), BankKind::Index),
        )
    }

    pub fn from_orders(cipher: &BankOrder, control: &BankOrder, index: &BankOrder) -> Self {
        let cage = Self {
            cipher: std::array::from_fn(|slot| {
                let spec = cipher.slots()[slot];
                CipherRotor::new(BigRotorId(spec.id), spec.orientation)
            }),
            control: std::array::from_fn(|slot| {
                let spec = control.slots()[slot];
                ControlRotor::new(BigRotorId(spec.id), spec.orientation)
            }),
            index: std::array::from_fn(|slot| {
                let spec = index.slots()[slot];
                IndexRotor::new(IndexRotorId(spec.id), spec.orientation)
            }),
            cipher_count: 0,
        };
        info!(
            cipher = %cipher,
            control = %control,
            index = %index,
            "rotor cage assembled"
        );
        cage
    }

    /// Cipher and control rotors to `O`; index rotors are left alone.
    pub fn zeroize(&mut self) {
        self.apply_cipher_positions([ORIGIN; ROTORS_PER_BANK]);
        for rotor in &mut self.control {
            rotor.rotor_mut().set_position(ORIGIN);
        }
    }

    pub fn set_cipher_bank_pos(&mut self, raw: &str) {
        self.apply_cipher_positions(positions::sanitize_letters(raw));
    }

    pub fn set_control_bank_pos(&mut self, raw: &str) {
        let values = positions::sanitize_letters(raw);
        for (rotor, value) in self.control.iter_mut().zip(values) {
            rotor.rotor_mut().set_position(value);
        }
    }

    pub fn set_index_bank_pos(&mut self, raw: &str) {
        let values = positions::sanitize_digits(raw);
        for (rotor, value) in self.index.iter_mut().zip(values) {
            rotor.rotor_mut().set_position(value);
        }
    }

    fn apply_cipher_positions(&mut self, values: BankPosition) {
        for (slot, (rotor, value)) in self.cipher.iter_mut().zip(values).enumerate() {
            if END_SLOTS.contains(&slot) && rotor.rotor().position() != value {
                self.cipher_count = 0;
            }
            rotor.rotor_mut().set_position(value);
        }
    }

    /// Carries a character contact through the cipher bank: slots 0 to 4
    /// when enciphering, 4 to 0 when deciphering.
    pub fn cipher_bank_path(&self, direction: Direction, contact: usize) -> usize {
        match direction {
            Direction::Encrypt => self
                .cipher
                .iter()
                .fold(contact, |c, rotor| rotor.encrypt_path(c)),
            Direction::Decrypt => self
                .cipher
                .iter()
                .rev()
                .fold(contact, |c, rotor| rotor.decrypt_path(c)),
        }
    }

    pub fn control_bank_path(&self, contact: usize) -> usize {
        self.control
            .iter()
            .rev()
            .fold(contact, |c, rotor| rotor.control_path(c))
    }

    pub fn index_bank_path(&self, contact: usize) -> usize {
        self.index
            .iter()
            .fold(contact, |c, rotor| rotor.index_path(c))
    }

    /// Water-meter stepping. Slot 2 moves every cycle; slot 3 moves when
    /// slot 2 leaves `O`; slot 1 moves when both leave `O` together.
    pub fn control_bank_update(&mut self) {
        if self.control[2].rotor().position() == ORIGIN {
            if self.control[3].rotor().position() == ORIGIN {
                self.control[1].rotor_mut().rotate_clockwise();
            }
            self.control[3].rotor_mut().rotate_clockwise();
        }
        self.control[2].rotor_mut().rotate_clockwise();
    }

    /// Which cipher stepping magnets the current control and index positions
    /// energize. Two paths landing on the same magnet count once.
    pub fn energized_magnets(&self, variant: Variant) -> Magnets {
        let (live, table) = match variant {
            Variant::Csp889 => (5..=8, &CONTROL_TO_INDEX_889),
            Variant::Csp2900 => (3..=8, &CONTROL_TO_INDEX_2900),
        };
        let mut magnets = [false; ROTORS_PER_BANK];
        for contact in live {
            let out = self.control_bank_path(contact);
            if variant == Variant::Csp2900 && DISCONNECTED_2900.contains(&out) {
                continue;
            }
            let magnet = INDEX_TO_MAGNET[self.index_bank_path(table[out])];
            magnets[magnet - 1] = true;
        }
        magnets
    }

    /// Steps between one and four cipher rotors.
    pub fn cipher_bank_update(&mut self, variant: Variant) {
        let magnets = self.energized_magnets(variant);
        trace!(?magnets, %variant, "cipher magnets energized");
        for (slot, _) in magnets.iter().enumerate().filter(|(_, on)| **on) {
            self.turn_cipher(slot, variant);
        }
        if END_SLOTS.iter().any(|slot| magnets[*slot]) {
            self.cipher_count = 0;
        }
    }

    fn turn_cipher(&mut self, slot: usize, variant: Variant) {
        let rotor = self.cipher[slot].rotor_mut();
        match variant {
            Variant::Csp2900 if slot % 2 == 1 => rotor.rotate_counter_clockwise(),
            _ => rotor.rotate_clockwise(),
        }
    }

    /// Advances one cipher rotor the way its magnet would. Slots past the
    /// bank are ignored.
    pub fn step_cipher_rotor(&mut self, slot: usize, variant: Variant) {
        if slot >= ROTORS_PER_BANK {
            return;
        }
        self.turn_cipher(slot, variant);
        if END_SLOTS.contains(&slot) {
            self.cipher_count = 0;
        }
    }

    pub fn step_control_rotor(&mut self, slot: usize) {
        if let Some(rotor) = self.control.get_mut(slot) {
            rotor.rotor_mut().rotate_clockwise();
        }
    }

    /// Navy keying: zeroize, then bring each control rotor in turn to its
    /// key letter one step at a time, stepping the cipher bank before each
    /// control step.
    pub fn navy_init(&mut self, control_key: &str, variant: Variant) {
        let targets = positions::sanitize_letters(control_key);
        self.zeroize();
        let mut steps = 0usize;
        for (slot, target) in targets.into_iter().enumerate() {
            while self.control[slot].rotor().position() != target {
                self.cipher_bank_update(variant);
                self.control[slot].rotor_mut().rotate_clockwise();
                steps += 1;
            }
        }
        info!(
            steps,
            cipher = %self.cipher_bank_pos(),
            control = %self.control_bank_pos(),
            "navy initialization complete"
        );
    }

    pub fn cipher_count(&self) -> u32 {
        self.cipher_count
    }

    pub fn increment_cipher_count(&mut self) {
        self.cipher_count = self.cipher_count.saturating_add(1);
        if self.cipher_count == LOCKOUT_THRESHOLD {
            debug!(count = self.cipher_count, "cipher end rotors stalled");
        }
    }

    pub fn reset_cipher_count(&mut self) {
        self.cipher_count = 0;
    }

    pub fn is_locked_out(&self) -> bool {
        self.cipher_count >= LOCKOUT_THRESHOLD
    }

    pub fn cipher_positions(&self) -> BankPosition {
        std::array::from_fn(|slot| self.cipher[slot].rotor().position())
    }

    pub fn control_positions(&self) -> BankPosition {
        std::array::from_fn(|slot| self.control[slot].rotor().position())
    }

    pub fn index_positions(&self) -> BankPosition {
        std::array::from_fn(|slot| self.index[slot].rotor().position())
    }

    pub fn cipher_bank_pos(&self) -> String {
        positions::letters(self.cipher_positions())
    }

    pub fn control_bank_pos(&self) -> String {
        positions::letters(self.control_positions())
    }

    pub fn index_bank_pos(&self) -> String {
        positions::digits(self.index_positions())
    }

    pub fn positions(&self) -> BankPositions {
        BankPositions {
            cipher: self.cipher_bank_pos(),
            control: self.control_bank_pos(),
            index: self.index_bank_pos(),
        }
    }

    pub fn cipher_order(&self) -> String {
        self.cipher.iter().map(ToString::to_string).collect()
    }

    pub fn control_order(&self) -> String {
        self.control.iter().map(ToString::to_string).collect()
    }

    pub fn index_order(&self) -> String {
        self.index.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for RotorCage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cipher  {}  {}", self.cipher_order(), self.cipher_bank_pos())?;
        writeln!(f, "control {}  {}", self.control_order(), self.control_bank_pos())?;
        write!(f, "index   {}  {}", self.index_order(), self.index_bank_pos())
    }
}

#[cfg(test)]
#[path = "tests/cage_tests.rs"]
mod tests;

//! Strict checking of a machine setup before anything is enciphered.

use machine_core::Machine;
use rotors::order::check_distinct;
use rotors::positions::{parse_digits_strict, parse_letters_strict};
use rotors::{BankOrder, RotorCage};
use shared::domain::{BankKind, Variant};
use shared::error::SetupError;
use tracing::info;

use crate::config::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineSetup {
    pub cipher: BankOrder,
    pub control: BankOrder,
    pub index: BankOrder,
    pub variant: Variant,
    pub cipher_pos: String,
    pub control_pos: String,
    pub index_pos: String,
    pub navy_init: bool,
}

impl MachineSetup {
    /// Rejects malformed orders, reused rotors, unknown machines and
    /// malformed positions. With navy keying the cipher positions are not
    /// used and so are not checked.
    pub fn from_settings(settings: &Settings) -> Result<Self, SetupError> {
        let cipher = BankOrder::parse_strict(&settings.cipher_order, BankKind::Cipher)?;
        let control = BankOrder::parse_strict(&settings.control_order, BankKind::Control)?;
        let index = BankOrder::parse_strict(&settings.index_order, BankKind::Index)?;
        check_distinct(&cipher, &control, &index)?;

        let variant = settings.machine.parse::<Variant>()?;

        if !settings.navy_init {
            parse_letters_strict(&settings.cipher_pos, BankKind::Cipher)?;
        }
        parse_letters_strict(&settings.control_pos, BankKind::Control)?;
        parse_digits_strict(&settings.index_pos)?;

        Ok(Self {
            cipher,
            control,
            index,
            variant,
            cipher_pos: settings.cipher_pos.clone(),
            control_pos: settings.control_pos.clone(),
            index_pos: settings.index_pos.clone(),
            navy_init: settings.navy_init,
        })
    }

    pub fn build(&self) -> Machine {
        let mut cage = RotorCage::from_orders(&self.cipher, &self.control, &self.index);
        cage.set_index_bank_pos(&self.index_pos);
        let mut machine = Machine::new(cage, self.variant);
        if self.navy_init {
            machine.navy_init(&self.control_pos);
        } else {
            let cage = machine.cage_mut();
            cage.set_cipher_bank_pos(&self.cipher_pos);
            cage.set_control_bank_pos(&self.control_pos);
        }
        info!(machine = %self.variant, positions = ?machine.positions(), "machine ready");
        machine
    }
}

#[cfg(test)]
#[path = "tests/setup_tests.rs"]
mod tests;

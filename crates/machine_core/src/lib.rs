use rotors::RotorCage;
use shared::domain::{Direction, Variant};
use shared::protocol::{BankPositions, CycleOutput};
use tracing::debug;

pub mod operator;
pub mod text;

pub use operator::Operator;

/// Keyboard contact of an uppercase letter.
pub fn contact_for(letter: char) -> Option<usize> {
    letter
        .is_ascii_uppercase()
        .then(|| usize::from(letter as u8 - b'A'))
}

pub fn letter_for(contact: usize) -> char {
    char::from(b'A' + (contact % 26) as u8)
}

/// One machine cycle: carry the letter through the cipher bank on the
/// current positions, then step the cipher bank and the control bank.
///
/// Returns `None` without touching the cage if `letter` is not `A..Z`.
pub fn cycle(
    cage: &mut RotorCage,
    letter: char,
    direction: Direction,
    variant: Variant,
) -> Option<CycleOutput> {
    let contact = contact_for(letter)?;
    let character = letter_for(cage.cipher_bank_path(direction, contact));
    cage.cipher_bank_update(variant);
    cage.control_bank_update();
    let positions = cage.positions();
    debug!(
        input = %letter,
        output = %character,
        cipher = %positions.cipher,
        control = %positions.control,
        "cycle"
    );
    Some(CycleOutput {
        character,
        positions,
    })
}

/// A cage bound to one machine variant, for batch work.
///
/// The lockout counter is kept up to date but not enforced here; that gate
/// belongs to [`Operator`].
#[derive(Debug, Clone)]
pub struct Machine {
    cage: RotorCage,
    variant: Variant,
}

impl Machine {
    pub fn new(cage: RotorCage, variant: Variant) -> Self {
        Self { cage, variant }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn cage(&self) -> &RotorCage {
        &self.cage
    }

    pub fn cage_mut(&mut self) -> &mut RotorCage {
        &mut self.cage
    }

    pub fn positions(&self) -> BankPositions {
        self.cage.positions()
    }

    pub fn cycle(&mut self, letter: char, direction: Direction) -> Option<CycleOutput> {
        let output = cycle(&mut self.cage, letter, direction, self.variant)?;
        self.cage.increment_cipher_count();
        Some(output)
    }

    /// Filters `raw` the way the keyboard would, runs every remaining letter
    /// and maps the result back for the printer.
    pub fn process_text(&mut self, raw: &str, direction: Direction) -> String {
        let input = text::filter_in(direction, raw);
        let output: String = input
            .chars()
            .filter_map(|letter| self.cycle(letter, direction))
            .map(|out| out.character)
            .collect();
        text::filter_out(direction, &output)
    }

    pub fn navy_init(&mut self, control_key: &str) {
        self.cage.navy_init(control_key, self.variant);
    }
}

#[cfg(test)]
#[path = "tests/machine_tests.rs"]
mod tests;

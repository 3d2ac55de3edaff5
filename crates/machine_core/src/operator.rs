//! Headless model of the machine's front panel: master, zeroize and machine
//! switches, the keyboard, the key counter and the paper tape.

use rotors::wiring::ORIGIN;
use rotors::{RotorCage, LOCKOUT_THRESHOLD};
use shared::domain::{
    Direction, MachineSwitch, MasterSwitch, Variant, ZeroizeSwitch, ROTORS_PER_BANK,
};
use shared::protocol::{ConsoleSnapshot, IgnoreReason, Key, KeyOutcome};
use tracing::{debug, info};

use crate::cycle;

const GROUP: u32 = 5;

#[derive(Debug, Clone)]
pub struct Operator {
    cage: RotorCage,
    master: MasterSwitch,
    previous_master: MasterSwitch,
    zeroize: ZeroizeSwitch,
    machine: MachineSwitch,
    counter: u32,
    tape: String,
    /// Characters printed since the group cam was last reset.
    printed: u32,
}

impl Operator {
    pub fn new(cage: RotorCage) -> Self {
        Self {
            cage,
            master: MasterSwitch::default(),
            previous_master: MasterSwitch::Off,
            zeroize: ZeroizeSwitch::default(),
            machine: MachineSwitch::default(),
            counter: 0,
            tape: String::new(),
            printed: 0,
        }
    }

    /// A machine as it comes out of the box: rotors zeroized, index bank at
    /// `00000`, switched off.
    pub fn with_orders(cipher: &str, control: &str, index: &str) -> Self {
        let mut cage = RotorCage::new(cipher, control, index);
        cage.zeroize();
        cage.set_index_bank_pos("00000");
        Self::new(cage)
    }

    pub fn cage(&self) -> &RotorCage {
        &self.cage
    }

    pub fn tape(&self) -> &str {
        &self.tape
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn master(&self) -> MasterSwitch {
        self.master
    }

    pub fn set_master(&mut self, position: MasterSwitch) {
        self.master = position;
        if matches!(
            position,
            MasterSwitch::Off | MasterSwitch::Plaintext | MasterSwitch::Reset
        ) {
            if self.cage.is_locked_out() {
                info!(?position, "lockout released");
            }
            self.cage.reset_cipher_count();
        }

        match position {
            MasterSwitch::Off => {
                self.printed = 0;
                self.previous_master = MasterSwitch::Off;
            }
            MasterSwitch::Reset
                if matches!(
                    self.previous_master,
                    MasterSwitch::Plaintext | MasterSwitch::Encipher
                ) =>
            {
                // Resetting the group cam feeds the tape to the next group.
                let partial = self.counter % GROUP;
                if partial != 0 {
                    for _ in partial..GROUP {
                        self.tape.push(' ');
                    }
                }
                self.printed = 0;
                self.previous_master = position;
            }
            _ => self.previous_master = position,
        }
    }

    pub fn set_zeroize(&mut self, position: ZeroizeSwitch) {
        self.zeroize = position;
    }

    pub fn set_machine(&mut self, position: MachineSwitch) {
        self.machine = position;
    }

    /// Mechanical; works with the power off.
    pub fn clear_counter(&mut self) {
        self.counter = 0;
    }

    /// Removes and returns everything printed so far.
    pub fn tear_tape(&mut self) -> String {
        std::mem::take(&mut self.tape)
    }

    pub fn set_cipher_positions(&mut self, raw: &str) {
        self.cage.set_cipher_bank_pos(raw);
    }

    pub fn set_control_positions(&mut self, raw: &str) {
        self.cage.set_control_bank_pos(raw);
    }

    pub fn set_index_positions(&mut self, raw: &str) {
        self.cage.set_index_bank_pos(raw);
    }

    pub fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            master: self.master,
            variant: self.machine.variant(),
            positions: self.cage.positions(),
            counter: self.counter,
            cipher_count: self.cage.cipher_count(),
            tape: self.tape.clone(),
        }
    }

    /// Presses the key with the given cap label. Unknown labels, including
    /// the unlabeled key, do nothing.
    pub fn press_label(&mut self, label: &str) -> KeyOutcome {
        match Key::from_label(label) {
            Some(key) => self.press(key),
            None => KeyOutcome::Ignored(IgnoreReason::NotApplicable),
        }
    }

    pub fn press(&mut self, key: Key) -> KeyOutcome {
        if self.master == MasterSwitch::Off {
            return KeyOutcome::Ignored(IgnoreReason::PoweredOff);
        }
        let Some(variant) = self.machine.variant() else {
            return KeyOutcome::Ignored(IgnoreReason::SwitchInMiddle);
        };
        if self.zeroize == ZeroizeSwitch::Middle {
            return KeyOutcome::Ignored(IgnoreReason::SwitchInMiddle);
        }
        if self.cage.is_locked_out() {
            return KeyOutcome::Ignored(IgnoreReason::LockedOut);
        }
        if key == Key::Repeat {
            return KeyOutcome::Ignored(IgnoreReason::RepeatUnsupported);
        }

        if self.zeroize == ZeroizeSwitch::Zeroize {
            return self.press_zeroizing(key, variant);
        }

        match self.master {
            MasterSwitch::Reset => self.press_reset(key, variant),
            MasterSwitch::Plaintext => {
                let text = match key {
                    Key::Letter(c) => c.to_string(),
                    Key::Number(d) => d.to_string(),
                    Key::Dash => "-".to_string(),
                    _ => " ".to_string(),
                };
                self.count_and_print(&text)
            }
            MasterSwitch::Encipher | MasterSwitch::Decipher => self.press_cipher(key, variant),
            MasterSwitch::Off => KeyOutcome::Ignored(IgnoreReason::PoweredOff),
        }
    }

    fn press_zeroizing(&mut self, key: Key, variant: Variant) -> KeyOutcome {
        if key != Key::Blank {
            return KeyOutcome::Ignored(IgnoreReason::NotApplicable);
        }
        match self.master {
            MasterSwitch::Reset => {
                self.sweep_toward_origin(variant);
                self.counter += 1;
                KeyOutcome::Stepped
            }
            MasterSwitch::Encipher | MasterSwitch::Decipher => {
                self.sweep_toward_origin(variant);
                self.count_and_print(" ")
            }
            MasterSwitch::Plaintext => self.count_and_print(" "),
            MasterSwitch::Off => KeyOutcome::Ignored(IgnoreReason::PoweredOff),
        }
    }

    /// Every cipher and control rotor not yet on `O` moves one step.
    fn sweep_toward_origin(&mut self, variant: Variant) {
        let cipher = self.cage.cipher_positions();
        let control = self.cage.control_positions();
        for slot in 0..ROTORS_PER_BANK {
            if cipher[slot] != ORIGIN {
                self.cage.step_cipher_rotor(slot, variant);
            }
            if control[slot] != ORIGIN {
                self.cage.step_control_rotor(slot);
            }
        }
        debug!(positions = ?self.cage.positions(), "zeroize sweep");
    }

    fn press_reset(&mut self, key: Key, variant: Variant) -> KeyOutcome {
        match key {
            Key::Number(digit @ 1..=5) => {
                self.cage.cipher_bank_update(variant);
                self.cage.step_control_rotor(usize::from(digit - 1));
                self.counter += 1;
                KeyOutcome::Stepped
            }
            Key::Blank => {
                self.cage.cipher_bank_update(variant);
                self.counter += 1;
                KeyOutcome::Stepped
            }
            _ => KeyOutcome::Ignored(IgnoreReason::NotApplicable),
        }
    }

    fn press_cipher(&mut self, key: Key, variant: Variant) -> KeyOutcome {
        let encipher = self.master == MasterSwitch::Encipher;
        let letter = match key {
            Key::Number(_) | Key::Dash | Key::Repeat => {
                return KeyOutcome::Ignored(IgnoreReason::NotApplicable)
            }
            Key::Blank => {
                // Both banks advance but nothing is enciphered.
                self.cage.cipher_bank_update(variant);
                self.cage.control_bank_update();
                self.printed += 1;
                return self.count_and_print(" ");
            }
            Key::SpaceBar if encipher => 'Z',
            Key::SpaceBar => return KeyOutcome::Ignored(IgnoreReason::NotApplicable),
            Key::Letter('Z') if encipher => 'X',
            Key::Letter(c) => c,
        };

        let direction = if encipher {
            Direction::Encrypt
        } else {
            Direction::Decrypt
        };
        let Some(out) = cycle(&mut self.cage, letter, direction, variant) else {
            return KeyOutcome::Ignored(IgnoreReason::NotApplicable);
        };
        let output = out.character;
        self.counter += 1;

        let printed = if encipher {
            let text = if self.printed != 0 && self.printed % GROUP == 0 {
                format!(" {output}")
            } else {
                output.to_string()
            };
            self.printed += 1;
            text
        } else if output == 'Z' {
            " ".to_string()
        } else {
            output.to_string()
        };
        self.tape.push_str(&printed);

        self.cage.increment_cipher_count();
        if self.cage.cipher_count() == LOCKOUT_THRESHOLD {
            info!(
                cipher = %self.cage.cipher_bank_pos(),
                control = %self.cage.control_bank_pos(),
                index = %self.cage.index_bank_pos(),
                "cipher rotors stalled, machine locked out"
            );
        }

        KeyOutcome::Cycled {
            direction,
            input: letter,
            output,
            printed,
        }
    }

    fn count_and_print(&mut self, text: &str) -> KeyOutcome {
        self.counter += 1;
        self.tape.push_str(text);
        KeyOutcome::Printed(text.to_string())
    }
}

#[cfg(test)]
#[path = "tests/operator_tests.rs"]
mod tests;

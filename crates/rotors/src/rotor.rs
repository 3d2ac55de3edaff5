use std::fmt;

use shared::domain::{BigRotorId, IndexRotorId, Orientation};

use crate::wiring::{Wiring, ALPHABET, DIGITS};

/// Position, orientation and wiring shared by every rotor kind.
///
/// Position is the clockwise displacement from contact 0 on top for cipher
/// and control rotors, counter-clockwise for index rotors. A reversed rotor
/// is mounted upside down and backwards, so both its stepping sign and its
/// table lookups flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor<const N: usize> {
    position: usize,
    reversed: bool,
    wiring: Wiring<N>,
}

impl<const N: usize> Rotor<N> {
    pub fn new(wiring: Wiring<N>, orientation: Orientation) -> Self {
        Self {
            position: 0,
            reversed: orientation.is_reversed(),
            wiring,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position % N;
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn orientation(&self) -> Orientation {
        if self.reversed {
            Orientation::Reversed
        } else {
            Orientation::Normal
        }
    }

    pub fn wiring(&self) -> &Wiring<N> {
        &self.wiring
    }

    pub fn rotate_clockwise(&mut self) {
        if self.reversed {
            self.position = (self.position + 1) % N;
        } else {
            self.position = (self.position + N - 1) % N;
        }
    }

    pub fn rotate_counter_clockwise(&mut self) {
        if self.reversed {
            self.position = (self.position + N - 1) % N;
        } else {
            self.position = (self.position + 1) % N;
        }
    }

    /// Left-to-right through a normal rotor.
    fn forward_path(&self, contact: usize) -> usize {
        self.traverse(contact, self.wiring.forward(), self.wiring.inverse())
    }

    /// Right-to-left through a normal rotor.
    fn inverse_path(&self, contact: usize) -> usize {
        self.traverse(contact, self.wiring.inverse(), self.wiring.forward())
    }

    fn traverse(&self, contact: usize, normal: &[usize; N], reversed: &[usize; N]) -> usize {
        let contact = contact % N;
        let pos = self.position;
        if self.reversed {
            (pos + N - reversed[(pos + N - contact) % N]) % N
        } else {
            (normal[(contact + pos) % N] + N - pos) % N
        }
    }
}

/// Access to the shared rotor record of a bank slot.
pub trait Mounted<const N: usize> {
    fn rotor(&self) -> &Rotor<N>;
    fn rotor_mut(&mut self) -> &mut Rotor<N>;
}

/// Large rotor in the cipher bank. Read left to right when enciphering and
/// right to left when deciphering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherRotor {
    id: BigRotorId,
    rotor: Rotor<ALPHABET>,
}

impl CipherRotor {
    pub fn new(id: BigRotorId, orientation: Orientation) -> Self {
        Self {
            id,
            rotor: Rotor::new(Wiring::big(id), orientation),
        }
    }

    pub fn id(&self) -> BigRotorId {
        self.id
    }

    pub fn encrypt_path(&self, contact: usize) -> usize {
        self.rotor.forward_path(contact)
    }

    pub fn decrypt_path(&self, contact: usize) -> usize {
        self.rotor.inverse_path(contact)
    }
}

/// Large rotor in the control bank, always read right to left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRotor {
    id: BigRotorId,
    rotor: Rotor<ALPHABET>,
}

impl ControlRotor {
    pub fn new(id: BigRotorId, orientation: Orientation) -> Self {
        Self {
            id,
            rotor: Rotor::new(Wiring::big(id), orientation),
        }
    }

    pub fn id(&self) -> BigRotorId {
        self.id
    }

    pub fn control_path(&self, contact: usize) -> usize {
        self.rotor.inverse_path(contact)
    }
}

/// Ten-contact index rotor, always read left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRotor {
    id: IndexRotorId,
    rotor: Rotor<DIGITS>,
}

impl IndexRotor {
    pub fn new(id: IndexRotorId, orientation: Orientation) -> Self {
        Self {
            id,
            rotor: Rotor::new(Wiring::index(id), orientation),
        }
    }

    pub fn id(&self) -> IndexRotorId {
        self.id
    }

    pub fn index_path(&self, contact: usize) -> usize {
        self.rotor.forward_path(contact)
    }
}

macro_rules! mounted {
    ($kind:ty, $n:expr) => {
        impl Mounted<$n> for $kind {
            fn rotor(&self) -> &Rotor<$n> {
                &self.rotor
            }

            fn rotor_mut(&mut self) -> &mut Rotor<$n> {
                &mut self.rotor
            }
        }

        impl fmt::Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", self.id, self.rotor.orientation().flag())
            }
        }
    };
}

mounted!(CipherRotor, ALPHABET);
mounted!(ControlRotor, ALPHABET);
mounted!(IndexRotor, DIGITS);

#[cfg(test)]
#[path = "tests/rotor_tests.rs"]
mod tests;

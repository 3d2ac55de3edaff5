pub mod cage;
pub mod interval;
pub mod order;
pub mod positions;
pub mod rotor;
pub mod wiring;

pub use cage::{Magnets, RotorCage, LOCKOUT_THRESHOLD};
pub use order::{BankOrder, SlotSpec};
pub use rotor::{CipherRotor, ControlRotor, IndexRotor, Mounted, Rotor};

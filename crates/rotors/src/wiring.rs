//! Hard-wired permutation tables of the machine.
//!
//! The large-rotor rows are simulated wirings (no authentic ones survive);
//! the index rows are the five index rotors found in the surviving machine.
//! Both are reference data and are used exactly as listed.

use shared::domain::{BigRotorId, IndexRotorId};

/// Right side = row[left side], as letters.
pub const BIG_ROTOR_WIRINGS: [&str; 10] = [
    "YCHLQSUGBDIXNZKERPVJTAWFOM",
    "INPXBWETGUYSAOCHVLDMQKZJFR",
    "WNDRIOZPTAXHFJYQBMSVEKUCGL",
    "TZGHOBKRVUXLQDMPNFWCJYEIAS",
    "YWTAHRQJVLCEXUNGBIPZMSDFOK",
    "QSLRBTEKOGAICFWYVMHJNXZUDP",
    "CHJDQIGNBSAKVTUOXFWLEPRMZY",
    "CDFAJXTIMNBEQHSUGRYLWZKVPO",
    "XHFESZDNRBCGKQIJLTVMUOYAPW",
    "EZJQXMOGYTCSFRIUPVNADLHWBK",
];

/// Index rotors 10, 20, 30, 40 and 50.
pub const INDEX_ROTOR_WIRINGS: [&str; 5] = [
    "7591482630",
    "3810592764",
    "4086153297",
    "3980526174",
    "6497135280",
];

/// Left side of the control bank to the left side of the index bank, CSP 889.
//                                       a b c d e f g h i j k l m n o p q r s t u v w x y z
pub const CONTROL_TO_INDEX_889: [usize; 26] = [
    9, 1, 2, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 7, 7, 8, 8, 8, 8, 8, 8,
];

/// CSP 2900 wiring. P, Q and R are not connected; their entries are never read.
pub const CONTROL_TO_INDEX_2900: [usize; 26] = [
    9, 1, 2, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6, 6, 9, 9, 9, 7, 7, 0, 0, 8, 8, 8, 8,
];

/// Control contacts P, Q and R, left open on the CSP 2900.
pub const DISCONNECTED_2900: [usize; 3] = [15, 16, 17];

/// Right side of the index bank to the cipher rotor stepping magnets (1..5).
pub const INDEX_TO_MAGNET: [usize; 10] = [1, 5, 5, 4, 4, 3, 3, 2, 2, 1];

pub const ALPHABET: usize = 26;
pub const DIGITS: usize = 10;

/// Reference origin: letter `O` on top.
pub const ORIGIN: usize = 14;

/// A rotor wiring and its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wiring<const N: usize> {
    forward: [usize; N],
    inverse: [usize; N],
}

impl<const N: usize> Wiring<N> {
    fn from_forward(forward: [usize; N]) -> Self {
        let mut inverse = [0; N];
        for (left, &right) in forward.iter().enumerate() {
            inverse[right % N] = left;
        }
        Self { forward, inverse }
    }

    pub fn forward(&self) -> &[usize; N] {
        &self.forward
    }

    pub fn inverse(&self) -> &[usize; N] {
        &self.inverse
    }
}

impl Wiring<ALPHABET> {
    /// Wiring of a large rotor; ids past the table fall back to row 0.
    pub fn big(id: BigRotorId) -> Self {
        let row = BIG_ROTOR_WIRINGS
            .get(usize::from(id.0))
            .unwrap_or(&BIG_ROTOR_WIRINGS[0]);
        let mut forward = [0; ALPHABET];
        for (slot, byte) in forward.iter_mut().zip(row.bytes()) {
            *slot = usize::from(byte - b'A');
        }
        Self::from_forward(forward)
    }
}

impl Wiring<DIGITS> {
    /// Wiring of an index rotor; ids past the table fall back to row 0.
    pub fn index(id: IndexRotorId) -> Self {
        let row = INDEX_ROTOR_WIRINGS
            .get(usize::from(id.0))
            .unwrap_or(&INDEX_ROTOR_WIRINGS[0]);
        let mut forward = [0; DIGITS];
        for (slot, byte) in forward.iter_mut().zip(row.bytes()) {
            *slot = usize::from(byte - b'0');
        }
        Self::from_forward(forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijection<const N: usize>(wiring: &Wiring<N>) {
        for x in 0..N {
            assert_eq!(wiring.forward()[wiring.inverse()[x]], x);
            assert_eq!(wiring.inverse()[wiring.forward()[x]], x);
        }
    }

    #[test]
    fn every_big_rotor_is_a_bijection() {
        for id in 0..BIG_ROTOR_WIRINGS.len() {
            assert_bijection(&Wiring::big(BigRotorId(id as u8)));
        }
    }

    #[test]
    fn every_index_rotor_is_a_bijection() {
        for id in 0..INDEX_ROTOR_WIRINGS.len() {
            assert_bijection(&Wiring::index(IndexRotorId(id as u8)));
        }
    }

    #[test]
    fn rows_decode_from_letters() {
        let wiring = Wiring::big(BigRotorId(0));
        // "YCH..." -> 24, 2, 7
        assert_eq!(&wiring.forward()[..3], &[24, 2, 7]);
        assert_eq!(wiring.inverse()[24], 0);

        let index = Wiring::index(IndexRotorId(4));
        assert_eq!(&index.forward()[..4], &[6, 4, 9, 7]);
    }

    #[test]
    fn out_of_range_ids_use_first_row() {
        assert_eq!(Wiring::big(BigRotorId(42)), Wiring::big(BigRotorId(0)));
        assert_eq!(Wiring::index(IndexRotorId(7)), Wiring::index(IndexRotorId(0)));
    }

    #[test]
    fn magnets_cover_every_cipher_slot() {
        for magnet in 1..=5 {
            assert_eq!(INDEX_TO_MAGNET.iter().filter(|&&m| m == magnet).count(), 2);
        }
    }
}

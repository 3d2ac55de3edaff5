use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u8);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// Large 26-contact rotors are interchangeable between the cipher and control banks.
id_newtype!(BigRotorId);
id_newtype!(IndexRotorId);

pub const ROTORS_PER_BANK: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Machine variant selected by the CSP 889 / CSP 2900 switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Csp889,
    Csp2900,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Csp889 => "CSP889",
            Variant::Csp2900 => "CSP2900",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "CSP889" | "889" => Ok(Variant::Csp889),
            "CSP2900" | "2900" => Ok(Variant::Csp2900),
            _ => Err(SetupError::UnknownMachine(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Normal,
    Reversed,
}

impl Orientation {
    /// Only `R` marks a reversed rotor; every other flag reads as normal.
    pub fn from_flag(flag: char) -> Self {
        if flag == 'R' {
            Orientation::Reversed
        } else {
            Orientation::Normal
        }
    }

    pub fn flag(self) -> char {
        match self {
            Orientation::Normal => 'N',
            Orientation::Reversed => 'R',
        }
    }

    pub fn is_reversed(self) -> bool {
        matches!(self, Orientation::Reversed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankKind {
    Cipher,
    Control,
    Index,
}

impl fmt::Display for BankKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BankKind::Cipher => "cipher",
            BankKind::Control => "control",
            BankKind::Index => "index",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterSwitch {
    #[default]
    Off,
    Plaintext,
    Reset,
    Encipher,
    Decipher,
}

impl MasterSwitch {
    pub fn direction(self) -> Option<Direction> {
        match self {
            MasterSwitch::Encipher => Some(Direction::Encrypt),
            MasterSwitch::Decipher => Some(Direction::Decrypt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroizeSwitch {
    #[default]
    Zeroize,
    Middle,
    Operate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineSwitch {
    #[default]
    Csp889,
    Middle,
    Csp2900,
}

impl MachineSwitch {
    pub fn variant(self) -> Option<Variant> {
        match self {
            MachineSwitch::Csp889 => Some(Variant::Csp889),
            MachineSwitch::Middle => None,
            MachineSwitch::Csp2900 => Some(Variant::Csp2900),
        }
    }
}

impl From<Variant> for MachineSwitch {
    fn from(value: Variant) -> Self {
        match value {
            Variant::Csp889 => MachineSwitch::Csp889,
            Variant::Csp2900 => MachineSwitch::Csp2900,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_machine_names_loosely() {
        assert_eq!("CSP889".parse::<Variant>().expect("889"), Variant::Csp889);
        assert_eq!("csp-2900".parse::<Variant>().expect("2900"), Variant::Csp2900);
        assert_eq!("CSP 2900".parse::<Variant>().expect("2900"), Variant::Csp2900);
        assert!(matches!(
            "CSPNONE".parse::<Variant>(),
            Err(SetupError::UnknownMachine(name)) if name == "CSPNONE"
        ));
    }

    #[test]
    fn only_capital_r_reverses() {
        assert_eq!(Orientation::from_flag('R'), Orientation::Reversed);
        assert_eq!(Orientation::from_flag('N'), Orientation::Normal);
        assert_eq!(Orientation::from_flag('r'), Orientation::Normal);
        assert_eq!(Orientation::Reversed.flag(), 'R');
    }

    #[test]
    fn middle_machine_switch_has_no_variant() {
        assert_eq!(MachineSwitch::Middle.variant(), None);
        assert_eq!(
            MachineSwitch::from(Variant::Csp2900).variant(),
            Some(Variant::Csp2900)
        );
    }

    #[test]
    fn variants_serialize_in_snake_case() {
        let json = serde_json::to_string(&Variant::Csp2900).expect("serialize");
        assert_eq!(json, "\"csp2900\"");
    }
}

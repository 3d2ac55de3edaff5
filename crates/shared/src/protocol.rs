use serde::{Deserialize, Serialize};

use crate::domain::{Direction, MasterSwitch, Variant};

/// Display strings for the three banks: letters for cipher and control,
/// digits for index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BankPositions {
    pub cipher: String,
    pub control: String,
    pub index: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleOutput {
    pub character: char,
    pub positions: BankPositions,
}

/// A key on the machine keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Key {
    Letter(char),
    Number(u8),
    Dash,
    Blank,
    SpaceBar,
    Repeat,
}

impl Key {
    /// Parses a key cap label such as `"Q"`, `"7"`, `"-"`, `"Blank"`,
    /// `"Space Bar"` or `"RPT"`. The unlabeled key has no cap and no effect.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Blank" => return Some(Key::Blank),
            "Space Bar" => return Some(Key::SpaceBar),
            "RPT" => return Some(Key::Repeat),
            "-" => return Some(Key::Dash),
            _ => {}
        }
        let mut chars = label.chars();
        let first = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if first.is_ascii_alphabetic() {
            Some(Key::Letter(first.to_ascii_uppercase()))
        } else {
            first
                .to_digit(10)
                .and_then(|digit| u8::try_from(digit).ok())
                .map(Key::Number)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    PoweredOff,
    SwitchInMiddle,
    LockedOut,
    RepeatUnsupported,
    NotApplicable,
}

/// What a single key press did to the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum KeyOutcome {
    Ignored(IgnoreReason),
    /// Rotors moved but nothing was printed.
    Stepped,
    /// Text was appended to the tape without enciphering.
    Printed(String),
    Cycled {
        direction: Direction,
        input: char,
        output: char,
        printed: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleSnapshot {
    pub master: MasterSwitch,
    pub variant: Option<Variant>,
    pub positions: BankPositions,
    pub counter: u32,
    pub cipher_count: u32,
    pub tape: String,
}

/// Summary of one batch run, printed by the command-line front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub machine: Variant,
    pub direction: Direction,
    pub cipher_order: String,
    pub control_order: String,
    pub index_order: String,
    pub start: BankPositions,
    pub end: BankPositions,
    pub input: String,
    pub output: String,
}

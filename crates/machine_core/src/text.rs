//! Keyboard-side text handling: what reaches the rotors and how the printer
//! lays it out.

use shared::domain::Direction;

/// Reduces free text to the keyboard alphabet.
///
/// Enciphering: letters are uppercased, `Z` is typed as `X` and a space is
/// typed as `Z`. Deciphering: spaces are dropped. Everything else is
/// discarded in both directions.
pub fn filter_in(direction: Direction, raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter_map(|c| match (direction, c) {
            (Direction::Encrypt, 'Z') => Some('X'),
            (Direction::Encrypt, ' ') => Some('Z'),
            (_, 'A'..='Z') => Some(c),
            _ => None,
        })
        .collect()
}

/// Deciphered `Z` prints as a space.
pub fn filter_out(direction: Direction, processed: &str) -> String {
    match direction {
        Direction::Encrypt => processed.to_string(),
        Direction::Decrypt => processed
            .chars()
            .map(|c| if c == 'Z' { ' ' } else { c })
            .collect(),
    }
}

/// Splits ciphertext into groups of `size` letters separated by spaces.
pub fn group(text: &str, size: usize) -> String {
    let size = size.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lays grouped ciphertext out in lines no wider than `width`, never
/// splitting a group.
pub fn group_lines(text: &str, size: usize, width: usize) -> Vec<String> {
    let size = size.max(1);
    let per_line = (width / (size + 1)).max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size * per_line)
        .map(|line| group(&line.iter().collect::<String>(), size))
        .collect()
}

/// Breaks plaintext into lines at spaces. A word longer than `width` gets a
/// line of its own.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_inclusive(' ') {
        if !line.is_empty() && line.chars().count() + word.trim_end().chars().count() > width {
            lines.push(line.trim_end().to_string());
            line.clear();
        }
        line.push_str(word);
    }
    let last = line.trim_end();
    if !last.is_empty() {
        lines.push(last.to_string());
    }
    lines
}

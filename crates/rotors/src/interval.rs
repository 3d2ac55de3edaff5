//! Interval-method analysis of rotor wirings.
//!
//! A wiring follows the interval method when every displacement
//! `(perm[i] - i) mod n` occurs once. That is only possible for odd `n`; for
//! even `n` the best achievable is one displacement unused and one used twice.

use std::fmt;

use rand::Rng;
use thiserror::Error;

/// Upper bound on backtracking iterations before `generate` gives up.
pub const MAX_STEPS: usize = 5_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("a wiring needs at least one contact")]
    Empty,
    #[error("contact {index} maps to {value}, outside 0..{size}")]
    OutOfRange {
        index: usize,
        value: usize,
        size: usize,
    },
    #[error("character '{found}' at {index} is not in the wiring alphabet")]
    BadSymbol { index: usize, found: char },
    #[error("no interval-method wiring found for size {size} within {steps} steps")]
    Exhausted { size: usize, steps: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalReport {
    size: usize,
    permutation: bool,
    /// `difference_counts[d]` is how many contacts are displaced by `d`.
    difference_counts: Vec<usize>,
    discrepancy: usize,
}

impl IntervalReport {
    pub fn analyze(perm: &[usize]) -> Result<Self, IntervalError> {
        let size = perm.len();
        if size == 0 {
            return Err(IntervalError::Empty);
        }

        let mut used = vec![false; size];
        let mut permutation = true;
        let mut difference_counts = vec![0usize; size];
        for (index, &value) in perm.iter().enumerate() {
            if value >= size {
                return Err(IntervalError::OutOfRange { index, value, size });
            }
            if std::mem::replace(&mut used[value], true) {
                permutation = false;
            }
            difference_counts[(value + size - index) % size] += 1;
        }

        // histogram[k]: how many displacements occur exactly k times
        let mut histogram = vec![0usize; size + 1];
        for &count in &difference_counts {
            histogram[count] += 1;
        }
        let mut ideal = vec![0usize; size + 1];
        if size % 2 == 0 {
            ideal[0] = 1;
            ideal[1] = size - 2;
            ideal[2] = 1;
        } else {
            ideal[1] = size;
        }
        let discrepancy = histogram
            .iter()
            .zip(&ideal)
            .map(|(have, want)| have.abs_diff(*want))
            .sum();

        Ok(Self {
            size,
            permutation,
            difference_counts,
            discrepancy,
        })
    }

    /// Analyzes a wiring written as symbols counted from `base`, such as
    /// `"YCHL..."` with base `'A'`.
    pub fn analyze_symbols(row: &str, base: char) -> Result<Self, IntervalError> {
        let perm = row
            .chars()
            .enumerate()
            .map(|(index, found)| {
                (found as u32)
                    .checked_sub(base as u32)
                    .map(|v| v as usize)
                    .ok_or(IntervalError::BadSymbol { index, found })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::analyze(&perm)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_permutation(&self) -> bool {
        self.permutation
    }

    pub fn difference_counts(&self) -> &[usize] {
        &self.difference_counts
    }

    /// Zero for an ideal interval-method wiring.
    pub fn discrepancy(&self) -> usize {
        self.discrepancy
    }

    /// Displacements that do not occur exactly once.
    pub fn irregular(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.difference_counts
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, count)| *count != 1)
    }
}

impl fmt::Display for IntervalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (difference, count) in self.irregular() {
            writeln!(f, "  difference {difference} used {count} times")?;
        }
        write!(
            f,
            "  permutation {}, discrepancy {}",
            if self.permutation { "ok" } else { "bad" },
            self.discrepancy
        )
    }
}

/// A generated wiring and the displacement of each contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalWiring {
    pub permutation: Vec<usize>,
    pub differences: Vec<usize>,
    pub steps: usize,
}

impl IntervalWiring {
    /// Renders the wiring with symbols counted from `base`.
    pub fn symbols(&self, base: char) -> String {
        self.permutation
            .iter()
            .filter_map(|&p| char::from_u32(base as u32 + p as u32))
            .collect()
    }
}

/// Builds a random interval-method wiring of `size` contacts by
/// backtracking over displacements, choosing randomly at each depth.
pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<IntervalWiring, IntervalError> {
    if size == 0 {
        return Err(IntervalError::Empty);
    }
    let even = size % 2 == 0;
    let mut chosen = vec![0usize; size];
    let mut available: Vec<Vec<usize>> = vec![Vec::new(); size];
    available[0] = (0..size).collect();
    let mut depth = 0usize;
    let mut steps = 0usize;

    loop {
        steps += 1;
        if steps > MAX_STEPS {
            return Err(IntervalError::Exhausted { size, steps: MAX_STEPS });
        }
        if available[depth].is_empty() {
            if depth == 0 {
                return Err(IntervalError::Exhausted { size, steps });
            }
            depth -= 1;
            continue;
        }
        let pick = rng.gen_range(0..available[depth].len());
        chosen[depth] = available[depth].swap_remove(pick);
        if depth == size - 1 {
            break;
        }

        let next = depth + 1;
        // For even sizes the last displacement must repeat an earlier one.
        let may_repeat = even && next == size - 1;
        let taken = &chosen[..=depth];
        let candidates: Vec<usize> = (0..size)
            .filter(|d| may_repeat || !taken.contains(d))
            .filter(|d| {
                let target = (d + next) % size;
                taken
                    .iter()
                    .enumerate()
                    .all(|(slot, c)| (c + slot) % size != target)
            })
            .collect();
        if !candidates.is_empty() {
            available[next] = candidates;
            depth = next;
        }
    }

    let differences = if even {
        // Rotating the displacements keeps the result a permutation and
        // moves the repeated one to a random contact.
        let shift = rng.gen_range(0..size);
        (0..size).map(|i| chosen[(shift + i) % size]).collect()
    } else {
        chosen
    };
    let permutation = differences
        .iter()
        .enumerate()
        .map(|(i, d)| (d + i) % size)
        .collect();
    Ok(IntervalWiring {
        permutation,
        differences,
        steps,
    })
}

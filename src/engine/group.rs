use crate::formula::Formula;

/// An ordered collection of formulas not yet combined with each other: one
/// way of partitioning the remaining digits into independent
/// sub-expressions. The multiset union of digits across the formulas of any
/// reachable group equals the full input digit multiset.
#[derive(Debug, Clone)]
pub struct Group {
    pub formulas: Vec<Formula>,
}

impl Group {
    /// The initial group: one bare formula per input digit.
    pub fn of_digits(digits: &[u8]) -> Self {
        Self {
            formulas: digits.iter().copied().map(Formula::from_digit).collect(),
        }
    }

    /// Canonical identity for deduplication, built from the formula texts.
    /// Texts are sorted unless positional order is significant, so groups
    /// differing only in formula order collapse to one identity.
    pub fn id(&self, preserve_order: bool) -> String {
        let mut texts: Vec<&str> = self.formulas.iter().map(|f| f.text.as_str()).collect();
        if !preserve_order {
            texts.sort_unstable();
        }
        texts.join(",")
    }
}

/// Whether the given digits fit within the available multiset.
pub(crate) fn digits_fit(digits: impl IntoIterator<Item = u8>, available: &[usize; 10]) -> bool {
    let mut counts = [0usize; 10];
    for digit in digits {
        let slot = usize::from(digit);
        counts[slot] += 1;
        if counts[slot] > available[slot] {
            return false;
        }
    }
    true
}

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;

use crate::engine::settings::Settings;
use crate::engine::snapshot::FormulaTextMap;
use crate::formula::Formula;

/// Best-known formula per non-negative integer value. Entries are only
/// ever replaced by a strictly simpler qualifying formula; they are never
/// removed during a run.
#[derive(Debug, Default)]
pub struct SolutionPool {
    entries: HashMap<i64, Formula>,
}

impl SolutionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a formula to the pool. It is inserted iff it qualifies
    /// (non-negative whole value within the limit, no leading zero, and
    /// parentheses only when allowed) and is simpler than any existing
    /// entry: fewer digits first, then shorter text. Among equally simple
    /// formulas the first encountered is kept.
    pub fn offer(&mut self, formula: &Formula, settings: &Settings) {
        if !qualifies(formula, settings) {
            return;
        }
        let value = formula.value.round() as i64;
        match self.entries.get(&value) {
            Some(existing) if !simpler(formula, existing) => {}
            _ => {
                debug!("{} = {}", value, formula.text);
                self.entries.insert(value, formula.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, value: i64) -> Option<&Formula> {
        self.entries.get(&value)
    }

    /// The set of values solved so far.
    pub fn solutions(&self) -> BTreeSet<i64> {
        self.entries.keys().copied().collect()
    }

    /// Rendered texts of all solutions, ordered by value.
    pub fn formula_map(&self) -> FormulaTextMap {
        self.entries
            .iter()
            .map(|(value, formula)| (*value, formula.text.clone()))
            .collect::<BTreeMap<_, _>>()
    }
}

fn qualifies(formula: &Formula, settings: &Settings) -> bool {
    formula.value >= 0.0
        && formula.value == formula.value.round()
        && formula.value.abs() <= settings.value_limit
        && (settings.allow_parens || !formula.text.contains('('))
        && !has_leading_zero(&formula.text)
}

// text length in characters, so multi-byte symbols like × count as one
fn simpler(candidate: &Formula, existing: &Formula) -> bool {
    candidate.digit_count() < existing.digit_count()
        || (candidate.digit_count() == existing.digit_count()
            && candidate.text.chars().count() < existing.text.chars().count())
}

// True if any numeral token in the text starts with a redundant zero,
// e.g. "02" or "1+07"; a lone "0" is fine.
fn has_leading_zero(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.windows(2).enumerate().any(|(i, pair)| {
        pair[0] == b'0'
            && pair[1].is_ascii_digit()
            && (i == 0 || !bytes[i - 1].is_ascii_digit())
    })
}

#[cfg(test)]
mod leading_zero_tests {
    use super::has_leading_zero;

    #[test]
    fn detects_leading_zeroes() {
        assert!(has_leading_zero("02"));
        assert!(has_leading_zero("1+02"));
        assert!(has_leading_zero("00"));
    }

    #[test]
    fn accepts_embedded_and_lone_zeroes() {
        assert!(!has_leading_zero("0"));
        assert!(!has_leading_zero("10"));
        assert!(!has_leading_zero("102"));
        assert!(!has_leading_zero("1+0"));
    }
}

use std::fmt;

use crate::operators::Operator;

/// An expression with a computed value, rendered text, the operator that
/// built it, and the multiset of source digits it consumed.
///
/// Immutable once constructed. `operator` is `None` for a bare digit; the
/// renderer uses it to decide bracketing, and some operators inspect it to
/// refuse pointless combinations (double negation, concatenating onto a
/// composite expression).
#[derive(Debug, Clone)]
pub struct Formula {
    pub value: f64,
    pub text: String,
    pub operator: Option<&'static Operator>,
    pub digits: Vec<u8>,
}

impl Formula {
    /// Build the leaf formula for a single input digit.
    pub fn from_digit(digit: u8) -> Self {
        Self {
            value: f64::from(digit),
            text: digit.to_string(),
            operator: None,
            digits: vec![digit],
        }
    }

    /// Number of original input digits consumed by this formula.
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

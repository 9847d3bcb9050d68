use crate::formula::Formula;

type UnaryValueFn = fn(&Formula) -> Option<f64>;
type UnaryRenderFn = fn(&Operator, &Formula) -> String;
type BinaryValueFn = fn(&Formula, &Formula) -> Option<f64>;
type BinaryRenderFn = fn(&Operator, &Formula, &Formula) -> String;

/// Closed set of operator arities and result multiplicities.
///
/// A value function returns `None` when the operator is undefined for its
/// operands (divide by zero, negative square root, out-of-table factorial).
/// That is not an error: the candidate simply produces no result.
#[derive(Debug)]
pub enum OpKind {
    /// One operand, zero or one result.
    Unary {
        apply: UnaryValueFn,
        render: UnaryRenderFn,
    },
    /// Ordered pair, at most one result; operand order never matters.
    Commutative {
        apply: BinaryValueFn,
        render: BinaryRenderFn,
    },
    /// Ordered pair; both orders are tried unless order must be preserved.
    Noncommutative {
        apply: BinaryValueFn,
        render: BinaryRenderFn,
    },
}

/// One entry of the operator catalog. `precedence` is used only for
/// bracket insertion when rendering text.
#[derive(Debug)]
pub struct Operator {
    pub symbol: &'static str,
    pub description: &'static str,
    pub precedence: u8,
    pub kind: OpKind,
}

impl Operator {
    pub fn is_unary(&self) -> bool {
        matches!(self.kind, OpKind::Unary { .. })
    }

    pub fn is_binary(&self) -> bool {
        !self.is_unary()
    }

    /// Apply a unary operator to a formula. Returns `None` when the value
    /// rule fails or when `self` is not unary.
    pub fn apply_unary(&'static self, formula: &Formula) -> Option<Formula> {
        let OpKind::Unary { apply, render } = &self.kind else {
            return None;
        };
        let value = apply(formula)?;
        Some(Formula {
            value,
            text: render(self, formula),
            operator: Some(self),
            digits: formula.digits.clone(),
        })
    }

    /// Apply a binary operator to an ordered pair, honoring commutativity:
    /// a commutative operator yields at most one result; a noncommutative
    /// one also tries the reversed pair unless order must be preserved.
    pub fn apply_binary_all(
        &'static self,
        formula_a: &Formula,
        formula_b: &Formula,
        preserve_order: bool,
    ) -> Vec<Formula> {
        match self.kind {
            OpKind::Unary { .. } => Vec::new(),
            OpKind::Commutative { .. } => {
                self.apply_pair(formula_a, formula_b).into_iter().collect()
            }
            OpKind::Noncommutative { .. } => {
                let mut results = Vec::with_capacity(2);
                if let Some(formula) = self.apply_pair(formula_a, formula_b) {
                    results.push(formula);
                }
                if !preserve_order
                    && let Some(formula) = self.apply_pair(formula_b, formula_a)
                {
                    results.push(formula);
                }
                results
            }
        }
    }

    fn apply_pair(&'static self, formula_a: &Formula, formula_b: &Formula) -> Option<Formula> {
        let (OpKind::Commutative { apply, render } | OpKind::Noncommutative { apply, render }) =
            &self.kind
        else {
            return None;
        };
        let value = apply(formula_a, formula_b)?;
        let mut digits = Vec::with_capacity(formula_a.digits.len() + formula_b.digits.len());
        digits.extend_from_slice(&formula_a.digits);
        digits.extend_from_slice(&formula_b.digits);
        Some(Formula {
            value,
            text: render(self, formula_a, formula_b),
            operator: Some(self),
            digits,
        })
    }
}

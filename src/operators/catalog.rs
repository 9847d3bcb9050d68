use crate::formula::Formula;
use crate::operators::types::{OpKind, Operator};

/// Tolerance used to absorb binary floating-point error when a result is
/// meant to be an integer.
pub(crate) const EPSILON: f64 = 1e-9;

/// Pseudo-symbol that toggles acceptance of parenthesised solutions; it
/// names no operator in the catalog.
pub const GROUPING_SYMBOL: &str = "( )";

// Compare two operators' precedence; an absent operator (bare number)
// binds tighter than anything.
fn op_cmp(operator: Option<&Operator>, other: &Operator) -> i32 {
    let precedence = operator.map_or(99, |op| i32::from(op.precedence));
    precedence - i32::from(other.precedence)
}

// Render a formula as an operand that may bind loosely with the given
// operator: brackets only if its own operator binds strictly more loosely.
fn bind_loose(operator: &Operator, formula: &Formula) -> String {
    if op_cmp(formula.operator, operator) < 0 {
        format!("({})", formula.text)
    } else {
        formula.text.clone()
    }
}

// Render a formula as an operand that must bind tightly with the given
// operator: brackets if its own operator binds loosely or equally.
fn bind_tight(operator: &Operator, formula: &Formula) -> String {
    if op_cmp(formula.operator, operator) <= 0 {
        format!("({})", formula.text)
    } else {
        formula.text.clone()
    }
}

/// Round to the nearest integer if within [`EPSILON`] of it.
fn quantise(value: f64) -> f64 {
    let integer = value.round();
    if (value - integer).abs() < EPSILON {
        integer
    } else {
        value
    }
}

// Decimal text of a value, integers without a trailing ".0".
fn value_text(value: f64) -> String {
    if value == value.round() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn concat_values_apply(a: &Formula, b: &Formula) -> Option<f64> {
    // any two values can be slapped together as long as they don't both
    // carry a decimal point
    if b.value >= 0.0 && !(a.text.contains('.') && b.text.contains('.')) {
        format!("{}{}", value_text(a.value), value_text(b.value))
            .parse()
            .ok()
    } else {
        None
    }
}

fn concat_values_render(op: &Operator, a: &Formula, b: &Formula) -> String {
    format!("{}|{}", bind_loose(op, a), bind_tight(op, b))
}

fn add_apply(a: &Formula, b: &Formula) -> Option<f64> {
    Some(a.value + b.value)
}

fn add_render(op: &Operator, a: &Formula, b: &Formula) -> String {
    format!("{}+{}", bind_loose(op, a), bind_loose(op, b))
}

fn subtract_apply(a: &Formula, b: &Formula) -> Option<f64> {
    Some(a.value - b.value)
}

fn subtract_render(op: &Operator, a: &Formula, b: &Formula) -> String {
    format!("{}-{}", bind_loose(op, a), bind_tight(op, b))
}

fn multiply_apply(a: &Formula, b: &Formula) -> Option<f64> {
    Some(a.value * b.value)
}

fn multiply_render(op: &Operator, a: &Formula, b: &Formula) -> String {
    format!("{}×{}", bind_loose(op, a), bind_loose(op, b))
}

fn divide_apply(a: &Formula, b: &Formula) -> Option<f64> {
    if b.value == 0.0 {
        None
    } else {
        Some(quantise(a.value / b.value))
    }
}

fn divide_render(op: &Operator, a: &Formula, b: &Formula) -> String {
    format!("{}÷{}", bind_loose(op, a), bind_tight(op, b))
}

fn power_apply(a: &Formula, b: &Formula) -> Option<f64> {
    // 0^0 is undefined
    if a.value == 0.0 && b.value == 0.0 {
        None
    } else {
        Some(quantise(a.value.powf(b.value)))
    }
}

fn power_render(op: &Operator, a: &Formula, b: &Formula) -> String {
    format!("{}^{}", bind_tight(op, a), bind_loose(op, b))
}

fn square_root_apply(a: &Formula) -> Option<f64> {
    if a.value >= 0.0 {
        Some(quantise(a.value.sqrt()))
    } else {
        None
    }
}

fn square_root_render(op: &Operator, a: &Formula) -> String {
    format!("√{}", bind_loose(op, a))
}

fn factorial_apply(a: &Formula) -> Option<f64> {
    // factorial is deliberately restricted to single-digit-range inputs;
    // 1 and 2 are omitted because 1! and 2! add nothing new
    if a.value != a.value.round() {
        return None;
    }
    let result = match a.value as i64 {
        0 => 1.0,
        3 => 6.0,
        4 => 24.0,
        5 => 120.0,
        6 => 720.0,
        7 => 5040.0,
        8 => 40320.0,
        9 => 362880.0,
        _ => return None,
    };
    Some(result)
}

fn factorial_render(op: &Operator, a: &Formula) -> String {
    format!("{}!", bind_loose(op, a))
}

fn negate_apply(a: &Formula) -> Option<f64> {
    // negating a value whose top-level operator is already a minus sign
    // is pointless
    if a.operator.map(|op| op.symbol) == Some("-") {
        None
    } else {
        Some(-a.value)
    }
}

fn negate_render(op: &Operator, a: &Formula) -> String {
    format!("-{}", bind_loose(op, a))
}

fn concat_digits_apply(a: &Formula, b: &Formula) -> Option<f64> {
    // a digit may be prepended to a digit, a digit chain or a point chain;
    // the rules for & and . are structured so arbitrary fractions can be
    // built up, which is why numbers like 04 and 00 are representable here
    let b_chainable = match b.operator {
        None => true,
        Some(op) => op.symbol == "&" || op.symbol == ".",
    };
    if a.value >= 0.0 && b.value >= 0.0 && a.operator.is_none() && b_chainable {
        format!("{}{}", a.text, b.text).parse().ok()
    } else {
        None
    }
}

fn concat_digits_render(_op: &Operator, a: &Formula, b: &Formula) -> String {
    format!("{}{}", a.text, b.text)
}

fn point_apply(a: &Formula) -> Option<f64> {
    // a point may prefix a digit or digit chain that has no point yet
    let chainable = match a.operator {
        None => true,
        Some(op) => op.symbol == "&",
    };
    if chainable && !a.text.contains('.') {
        format!(".{}", a.text).parse().ok()
    } else {
        None
    }
}

fn point_render(_op: &Operator, a: &Formula) -> String {
    format!(".{}", a.text)
}

pub static ADD: Operator = Operator {
    symbol: "+",
    description: "Add two expressions, e.g. 23+(4×3) = 35",
    precedence: 1,
    kind: OpKind::Commutative {
        apply: add_apply,
        render: add_render,
    },
};

pub static SUBTRACT: Operator = Operator {
    symbol: "-",
    description: "Subtract an expression from another, e.g. 23-(4×3) = 11",
    precedence: 1,
    kind: OpKind::Noncommutative {
        apply: subtract_apply,
        render: subtract_render,
    },
};

pub static MULTIPLY: Operator = Operator {
    symbol: "×",
    description: "Multiply two expressions, e.g. 3×(4+3) = 21",
    precedence: 2,
    kind: OpKind::Commutative {
        apply: multiply_apply,
        render: multiply_render,
    },
};

pub static DIVIDE: Operator = Operator {
    symbol: "÷",
    description: "Divide an expression by another, e.g. 21÷(4+3) = 3",
    precedence: 2,
    kind: OpKind::Noncommutative {
        apply: divide_apply,
        render: divide_render,
    },
};

pub static POWER: Operator = Operator {
    symbol: "^",
    description: "Raise an expression to the power of another, e.g. (1+2)^(2+2) = 81",
    precedence: 3,
    kind: OpKind::Noncommutative {
        apply: power_apply,
        render: power_render,
    },
};

pub static SQUARE_ROOT: Operator = Operator {
    symbol: "√",
    description: "Take the square root of an expression, e.g. √(21+4) = 5",
    precedence: 4,
    kind: OpKind::Unary {
        apply: square_root_apply,
        render: square_root_render,
    },
};

pub static FACTORIAL: Operator = Operator {
    symbol: "!",
    description: "Take the factorial of an expression, e.g. (2+3)! = 120",
    precedence: 5,
    kind: OpKind::Unary {
        apply: factorial_apply,
        render: factorial_render,
    },
};

pub static NEGATE: Operator = Operator {
    symbol: "-",
    description: "Negate an expression, e.g. -(2+3) = -5",
    precedence: 6,
    kind: OpKind::Unary {
        apply: negate_apply,
        render: negate_render,
    },
};

pub static CONCATENATE_DIGITS: Operator = Operator {
    symbol: "&",
    description: "Concatenate two numbers, e.g. 1 & 23 = 123",
    precedence: 7,
    kind: OpKind::Noncommutative {
        apply: concat_digits_apply,
        render: concat_digits_render,
    },
};

pub static CONCATENATE_VALUES: Operator = Operator {
    symbol: "|",
    description: "Concatenate two expressions, e.g. (2+3) | 0 = 50",
    precedence: 0,
    kind: OpKind::Noncommutative {
        apply: concat_values_apply,
        render: concat_values_render,
    },
};

pub static POINT: Operator = Operator {
    symbol: ".",
    description: "Allow decimal points, e.g. 2.3, or .45 = 0.45",
    precedence: 7,
    kind: OpKind::Unary {
        apply: point_apply,
        render: point_render,
    },
};

/// The full catalog. Note that subtraction and negation share a symbol;
/// selecting `-` activates both.
pub static ALL_OPERATORS: &[&Operator] = &[
    &ADD,
    &SUBTRACT,
    &MULTIPLY,
    &DIVIDE,
    &CONCATENATE_DIGITS,
    &CONCATENATE_VALUES,
    &POINT,
    &FACTORIAL,
    &NEGATE,
    &POWER,
    &SQUARE_ROOT,
];

/// All catalog operators carrying the given symbol.
pub fn operators_for_symbol(symbol: &str) -> Vec<&'static Operator> {
    ALL_OPERATORS
        .iter()
        .copied()
        .filter(|op| op.symbol == symbol)
        .collect()
}

/// Whether a configuration symbol is meaningful: either a catalog operator
/// or the grouping toggle.
pub fn symbol_is_known(symbol: &str) -> bool {
    symbol == GROUPING_SYMBOL || ALL_OPERATORS.iter().any(|op| op.symbol == symbol)
}

use crate::engine::group::{Group, digits_fit};
use crate::engine::settings::Settings;
use crate::formula::Formula;

/// Produce every group reachable from `group` by one operator application:
/// each unary operator applied to each formula in place, and each binary
/// operator applied to each eligible pair, the pair replaced by the single
/// combined formula. Digit safety is structural: a group is always
/// partitioned, never copied into overlapping formulas.
pub fn evolve_group(group: &Group, settings: &Settings) -> Vec<Group> {
    let mut children = Vec::new();

    for (i, formula) in group.formulas.iter().enumerate() {
        for result in apply_unary_operators(formula, settings) {
            let mut formulas = group.formulas.clone();
            formulas[i] = result;
            children.push(Group { formulas });
        }
    }

    if group.formulas.len() >= 2 {
        for i in 0..group.formulas.len() - 1 {
            // when order must be preserved, only adjacent formulas combine
            let pair_end = if settings.preserve_order {
                i + 2
            } else {
                group.formulas.len()
            };
            for j in i + 1..pair_end {
                for result in
                    apply_binary_operators(&group.formulas[i], &group.formulas[j], settings)
                {
                    let mut formulas = Vec::with_capacity(group.formulas.len() - 1);
                    for (k, formula) in group.formulas.iter().enumerate() {
                        if k == i {
                            formulas.push(result.clone());
                        } else if k != j {
                            formulas.push(formula.clone());
                        }
                    }
                    children.push(Group { formulas });
                }
            }
        }
    }

    children
}

fn apply_unary_operators(formula: &Formula, settings: &Settings) -> Vec<Formula> {
    settings
        .unary_operators
        .iter()
        .filter_map(|op| op.apply_unary(formula))
        .filter(|f| f.value.abs() <= settings.value_limit)
        .collect()
}

fn apply_binary_operators(
    formula_a: &Formula,
    formula_b: &Formula,
    settings: &Settings,
) -> Vec<Formula> {
    // guard against combining formulas that would overdraw the digit
    // multiset; a no-op for groups evolved from the initial state
    let combined = formula_a
        .digits
        .iter()
        .chain(formula_b.digits.iter())
        .copied();
    if !digits_fit(combined, &settings.digit_counts) {
        return Vec::new();
    }
    settings
        .binary_operators
        .iter()
        .flat_map(|op| op.apply_binary_all(formula_a, formula_b, settings.preserve_order))
        .filter(|f| f.value.abs() <= settings.value_limit)
        .collect()
}

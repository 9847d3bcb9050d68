use crate::engine::controller::{RunController, StepOutcome};
use crate::engine::errors::SettingsError;
use crate::engine::expand::evolve_group;
use crate::engine::frontier::Frontier;
use crate::engine::group::Group;
use crate::engine::pool::SolutionPool;
use crate::engine::settings::{Options, SearchOrder, Settings, build_settings};
use crate::engine::snapshot::FormulaTextMap;
use crate::formula::Formula;

fn options(digits: &str, symbols: &[&str]) -> Options {
    Options {
        digit_string: digits.to_string(),
        symbols: symbols.iter().map(|s| (*s).to_string()).collect(),
        ..Options::default()
    }
}

fn settings(digits: &str, symbols: &[&str]) -> Settings {
    build_settings(&options(digits, symbols)).expect("valid settings")
}

fn run_to_completion(mut controller: RunController) -> FormulaTextMap {
    loop {
        match controller.step_batch() {
            StepOutcome::Continue | StepOutcome::Yielded => {}
            StepOutcome::Paused | StepOutcome::Done => break,
        }
    }
    controller.pool().formula_map()
}

#[test]
fn empty_digit_string_is_rejected() {
    let result = build_settings(&options("", &["+"]));
    assert_eq!(result.unwrap_err(), SettingsError::EmptyDigitString);
}

#[test]
fn non_digit_characters_are_rejected() {
    let result = build_settings(&options("12a3", &["+"]));
    assert!(matches!(
        result.unwrap_err(),
        SettingsError::InvalidDigitString(_)
    ));
}

#[test]
fn unknown_symbols_are_rejected() {
    let result = build_settings(&options("123", &["+", "%"]));
    assert_eq!(
        result.unwrap_err(),
        SettingsError::UnknownSymbol("%".to_string())
    );
}

#[test]
fn sub_millisecond_timing_windows_are_rejected() {
    // windows truncate to whole milliseconds; anything below 1ms would
    // leave a zero divisor in the heartbeat scheduling
    let mut opts = options("12345678", &["+"]);
    opts.heartbeat_seconds = 0.0005;
    assert_eq!(
        build_settings(&opts).unwrap_err(),
        SettingsError::InvalidTiming
    );

    let mut opts = options("12", &["+"]);
    opts.yield_seconds = 0.0;
    assert_eq!(
        build_settings(&opts).unwrap_err(),
        SettingsError::InvalidTiming
    );
}

#[test]
fn minus_symbol_activates_subtraction_and_negation() {
    let settings = settings("12", &["-"]);
    assert_eq!(settings.unary_operators.len(), 1);
    assert_eq!(settings.binary_operators.len(), 1);
}

#[test]
fn grouping_symbol_toggles_parens_without_naming_an_operator() {
    let with = settings("12", &["( )", "+"]);
    assert!(with.allow_parens);
    assert_eq!(with.binary_operators.len(), 1);
    let without = settings("12", &["+"]);
    assert!(!without.allow_parens);
}

#[test]
fn preserve_order_requires_use_all_digits() {
    let mut opts = options("123", &["+"]);
    opts.preserve_order = true;
    opts.use_all_digits = false;
    assert!(!build_settings(&opts).expect("valid").preserve_order);

    opts.use_all_digits = true;
    assert!(build_settings(&opts).expect("valid").preserve_order);
}

#[test]
fn evolution_conserves_the_digit_multiset() {
    let settings = settings("1223", &["+", "-", "×", "÷", "&", "!", "^", "√"]);
    let initial = Group::of_digits(&settings.digits);
    let mut expected: Vec<u8> = settings.digits.clone();
    expected.sort_unstable();

    let mut pending = vec![initial];
    for _ in 0..3 {
        let mut next = Vec::new();
        for group in &pending {
            for child in evolve_group(group, &settings) {
                let mut digits: Vec<u8> = child
                    .formulas
                    .iter()
                    .flat_map(|f| f.digits.iter().copied())
                    .collect();
                digits.sort_unstable();
                assert_eq!(digits, expected, "digits lost or duplicated in {:?}", child);
                next.push(child);
            }
        }
        pending = next.into_iter().take(20).collect();
    }
}

#[test]
fn preserve_order_only_combines_adjacent_formulas() {
    let mut opts = options("123", &["+"]);
    opts.preserve_order = true;
    let settings = build_settings(&opts).expect("valid");
    let group = Group::of_digits(&settings.digits);

    let children = evolve_group(&group, &settings);
    let texts: Vec<String> = children.iter().map(|c| c.id(true)).collect();
    // 1+2 and 2+3 are reachable; combining 1 and 3 across 2 is not
    assert!(texts.contains(&"1+2,3".to_string()));
    assert!(texts.contains(&"1,2+3".to_string()));
    assert!(!texts.iter().any(|t| t.contains("1+3")));
}

#[test]
fn frontier_deduplicates_identical_groups() {
    let settings = settings("22", &["+"]);
    let mut frontier = Frontier::new(&settings);
    let group = Group::of_digits(&settings.digits);

    assert!(frontier.offer(group.clone()));
    assert!(!frontier.offer(group));
    assert_eq!(frontier.queue_size(), 1);
    assert_eq!(frontier.cache_hit_total(), 1);
    assert_eq!(frontier.queued_total(), 1);
}

#[test]
fn expanding_the_same_group_twice_hits_the_cache() {
    let settings = settings("23", &["+", "×"]);
    let mut frontier = Frontier::new(&settings);
    let group = Group::of_digits(&settings.digits);

    let first = evolve_group(&group, &settings);
    let second = evolve_group(&group, &settings);
    let mut enqueued = 0;
    for child in first.into_iter().chain(second) {
        if frontier.offer(child) {
            enqueued += 1;
        }
    }
    // 2+3 and 2×3, each offered twice
    assert_eq!(enqueued, 2);
    assert_eq!(frontier.cache_hit_total(), 2);
}

#[test]
fn unordered_groups_share_an_identity() {
    let group_a = Group {
        formulas: vec![Formula::from_digit(1), Formula::from_digit(2)],
    };
    let group_b = Group {
        formulas: vec![Formula::from_digit(2), Formula::from_digit(1)],
    };
    assert_eq!(group_a.id(false), group_b.id(false));
    assert_ne!(group_a.id(true), group_b.id(true));
}

#[test]
fn seen_set_resets_when_the_limit_is_reached() {
    let mut opts = options("123456", &["+"]);
    opts.seen_limit = 2;
    let settings = build_settings(&opts).expect("valid");
    let mut frontier = Frontier::new(&settings);

    for digit in 1..=3u8 {
        let group = Group {
            formulas: vec![Formula::from_digit(digit)],
        };
        assert!(frontier.offer(group));
    }
    assert_eq!(frontier.seen_resets(), 1);
    assert!(frontier.cache_size() <= 2);
}

#[test]
fn pool_prefers_fewer_digits_then_shorter_text() {
    let settings = settings("1223", &["+", "×"]);
    let mut pool = SolutionPool::new();

    let three_digits = Formula {
        value: 6.0,
        text: "1+2+3".to_string(),
        operator: None,
        digits: vec![1, 2, 3],
    };
    let two_digits = Formula {
        value: 6.0,
        text: "2×3".to_string(),
        operator: None,
        digits: vec![2, 3],
    };
    pool.offer(&three_digits, &settings);
    pool.offer(&two_digits, &settings);
    assert_eq!(pool.get(6).map(|f| f.text.as_str()), Some("2×3"));

    // arrival order must not matter
    let mut pool = SolutionPool::new();
    pool.offer(&two_digits, &settings);
    pool.offer(&three_digits, &settings);
    assert_eq!(pool.get(6).map(|f| f.text.as_str()), Some("2×3"));

    // equal digit count: shorter text wins
    let longer_text = Formula {
        value: 6.0,
        text: "12÷2".to_string(),
        operator: None,
        digits: vec![2, 3],
    };
    pool.offer(&longer_text, &settings);
    assert_eq!(pool.get(6).map(|f| f.text.as_str()), Some("2×3"));
}

#[test]
fn pool_rejects_non_integers_negatives_and_overflows() {
    let settings = settings("123", &["+"]);
    let mut pool = SolutionPool::new();
    let candidate = |value: f64| Formula {
        value,
        text: "1+2".to_string(),
        operator: None,
        digits: vec![1, 2],
    };
    pool.offer(&candidate(2.5), &settings);
    pool.offer(&candidate(-3.0), &settings);
    pool.offer(&candidate(20_000.0), &settings);
    assert!(pool.is_empty());
    pool.offer(&candidate(3.0), &settings);
    assert_eq!(pool.len(), 1);
}

#[test]
fn pool_rejects_leading_zero_numerals() {
    let settings = settings("02", &["&", "+"]);
    let mut pool = SolutionPool::new();
    let concatenated = Formula {
        value: 2.0,
        text: "02".to_string(),
        operator: None,
        digits: vec![0, 2],
    };
    pool.offer(&concatenated, &settings);
    assert!(pool.is_empty());

    // a lone zero is not a leading-zero case
    pool.offer(&Formula::from_digit(0), &settings);
    assert_eq!(pool.get(0).map(|f| f.text.as_str()), Some("0"));
}

#[test]
fn pool_honors_the_parenthesis_toggle() {
    let bracketed = Formula {
        value: 9.0,
        text: "(1+2)×3".to_string(),
        operator: None,
        digits: vec![1, 2, 3],
    };
    let without = settings("123", &["+", "×"]);
    let mut pool = SolutionPool::new();
    pool.offer(&bracketed, &without);
    assert!(pool.is_empty());

    let with = settings("123", &["( )", "+", "×"]);
    pool.offer(&bracketed, &with);
    assert_eq!(pool.len(), 1);
}

#[test]
fn end_to_end_search_of_123_with_basic_operators() {
    let controller = RunController::new(settings("123", &["+", "-", "×", "÷"]));
    let map = run_to_completion(controller);

    // full enumeration must reach these with all three digits
    assert!(map.contains_key(&6), "expected 6 in {:?}", map);
    assert!(map.contains_key(&0), "expected 0 in {:?}", map);
    assert!(map.contains_key(&7), "expected 7 = 1+2×3 in {:?}", map);
    // without parentheses in the pool, 6 comes from a flat product or sum
    let six = map.get(&6).expect("checked above");
    assert_eq!(six.chars().count(), 5, "unexpected formula for 6: {}", six);
    // no parenthesised or partial-digit formula may slip through
    for text in map.values() {
        assert!(!text.contains('('));
        let digit_chars = text.chars().filter(char::is_ascii_digit).count();
        assert_eq!(digit_chars, 3, "formula does not use all digits: {}", text);
    }
}

#[test]
fn breadth_first_and_depth_first_find_the_same_solutions() {
    let mut opts = options("123", &["+", "-", "×", "÷"]);
    opts.search_order = SearchOrder::BreadthFirst;
    let bfs = run_to_completion(RunController::new(
        build_settings(&opts).expect("valid"),
    ));
    opts.search_order = SearchOrder::DepthFirst;
    let dfs = run_to_completion(RunController::new(
        build_settings(&opts).expect("valid"),
    ));
    assert_eq!(
        bfs.keys().collect::<Vec<_>>(),
        dfs.keys().collect::<Vec<_>>()
    );
}

#[test]
fn pause_and_resume_do_not_change_the_outcome() {
    let straight = run_to_completion(RunController::new(settings("123", &["+", "-", "×", "÷"])));

    let mut interrupted = RunController::new(settings("123", &["+", "-", "×", "÷"]));
    let mut batches = 0u32;
    let interrupted_map = loop {
        match interrupted.step_batch() {
            StepOutcome::Continue | StepOutcome::Yielded => {
                batches += 1;
                // interrupt between every other scheduling batch
                if batches % 2 == 0 {
                    interrupted.pause();
                    interrupted.resume();
                }
            }
            StepOutcome::Paused => interrupted.resume(),
            StepOutcome::Done => break interrupted.pool().formula_map(),
        }
    };
    assert_eq!(straight, interrupted_map);
}

#[test]
fn pausing_discards_a_pending_heartbeat_snapshot() {
    let mut opts = options("123456789", &["+", "-", "×", "÷"]);
    opts.heartbeat_seconds = 0.001;
    opts.yield_seconds = 0.002;
    opts.max_duration_seconds = 0.001;
    let mut controller = RunController::new(build_settings(&opts).expect("valid settings"));
    loop {
        match controller.step_batch() {
            StepOutcome::Paused => {
                // the heartbeat that triggered the budget pause must not
                // surface as a stale snapshot after resuming
                assert!(!controller.take_snapshot_due());
                break;
            }
            // nine digits cannot be exhausted inside a 1ms budget, but a
            // finished run trivially has no pending snapshot either
            StepOutcome::Done => break,
            StepOutcome::Continue | StepOutcome::Yielded => {}
        }
    }
}

#[test]
fn partial_digit_solutions_when_not_all_digits_required() {
    let mut opts = options("123", &["+", "×"]);
    opts.use_all_digits = false;
    let map = run_to_completion(RunController::new(build_settings(&opts).expect("valid")));

    // single digits qualify on their own
    assert_eq!(map.get(&1).map(String::as_str), Some("1"));
    assert_eq!(map.get(&2).map(String::as_str), Some("2"));
    // 5 needs only two of the three digits
    assert_eq!(map.get(&5).map(String::as_str), Some("2+3"));
}

#[test]
fn snapshot_counters_are_consistent() {
    let mut controller = RunController::new(settings("12", &["+", "×"]));
    loop {
        match controller.step_batch() {
            StepOutcome::Continue | StepOutcome::Yielded => {}
            StepOutcome::Paused | StepOutcome::Done => break,
        }
    }
    let snapshot = controller.snapshot(true);
    assert_eq!(snapshot.queue_size, 0);
    assert!(snapshot.processed_total >= 3); // initial group, 1+2, 1×2
    assert_eq!(snapshot.solution_count, snapshot.solutions.len());
    let formula_map = snapshot.formula_map.expect("final snapshot carries formulas");
    assert_eq!(formula_map.len(), snapshot.solution_count);
    assert!(formula_map.contains_key(&3));
    assert!(formula_map.contains_key(&2));

    let brief = controller.snapshot(false);
    assert!(brief.formula_map.is_none());
}

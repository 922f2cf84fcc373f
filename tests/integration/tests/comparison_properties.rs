//! End-to-end properties of the lock-step comparison engine.
//!
//! Each test parses two programs, runs a full synchronization with a
//! scripted (or capturing) decision source, and checks the terminal
//! report.

use std::cell::RefCell;

use lockstep_core::{
    Classification, CompareConfig, CompareInput, Decision, Outcome, ScriptedDecisions, Side,
    SyncError, SyncReport, Synchronizer,
};
use lockstep_parser::parse_str;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn input(name: &str, text: &str) -> CompareInput {
    let parsed = parse_str(name, text).unwrap();
    CompareInput::new(parsed.tree, parsed.source)
}

fn run_scripted(
    left: &str,
    right: &str,
    config: CompareConfig,
    decisions: ScriptedDecisions,
) -> Result<SyncReport, SyncError> {
    Synchronizer::new(input("left.js", left), input("right.js", right), config, decisions).run()
}

/// Runs with a source that records every halt and answers `AdvanceBoth`.
fn run_capturing(left: &str, right: &str) -> (Result<SyncReport, SyncError>, Vec<Classification>) {
    let halts = RefCell::new(Vec::new());
    let result = Synchronizer::new(
        input("left.js", left),
        input("right.js", right),
        CompareConfig::default(),
        |ctx: &lockstep_core::ArbitrationContext<'_>| -> Result<Decision, SyncError> {
            halts.borrow_mut().push(ctx.classification().clone());
            Ok(Decision::AdvanceBoth)
        },
    )
    .run();
    (result, halts.into_inner())
}

#[test]
fn identity_comparison_never_halts() {
    let program = r#"
var total = 0, limit = 10;
function step(n) {
    if (n % 2 === 0) { total += n; }
    return n - 1;
}
while (limit > 0) {
    limit = step(limit);
}
var shape = { width: 3, height: 4.5, get area() { return 1; } };
var pattern = /ab+c/;
log("done", shape.width, [1, 2, 3]);
"#;

    let report = run_scripted(
        program,
        program,
        CompareConfig::default(),
        ScriptedDecisions::default(),
    )
    .unwrap();

    assert_eq!(report.outcome, Outcome::Finished);
    assert_eq!(report.arbitrations, 0);
    assert_eq!(report.emitted_left, report.emitted_right);
    assert_eq!(report.rounds, report.emitted_left);
}

#[test]
fn extra_empty_statement_is_auto_skipped() {
    let report = run_scripted(
        "f(); { a; ; b; } g();",
        "f(); { a; b; } g();",
        CompareConfig::default(),
        ScriptedDecisions::default(),
    )
    .unwrap();

    assert_eq!(report.outcome, Outcome::Finished);
    assert_eq!(report.arbitrations, 0);
    assert_eq!(report.emitted_left, report.emitted_right + 1);
}

#[test]
fn identifier_mismatch_reports_both_names() {
    let (result, halts) = run_capturing("var x = 1;", "var y = 1;");

    assert_eq!(result.unwrap().outcome, Outcome::Finished);
    assert_eq!(
        halts,
        vec![Classification::ValueMismatch {
            field: "name",
            left: "x".into(),
            right: "y".into(),
        }]
    );
}

#[rstest]
#[case("x = 1.0;", "x = 1;", true)]
#[case("x = 100;", "x = 1e2;", true)]
#[case("x = 1;", "x = 2;", false)]
fn numeric_literals_compare_by_normalized_value(
    #[case] left: &str,
    #[case] right: &str,
    #[case] same: bool,
) {
    let (result, halts) = run_capturing(left, right);
    assert!(result.is_ok());
    assert_eq!(halts.is_empty(), same);
}

#[test]
fn numeric_mismatch_reports_raw_literals() {
    let (_, halts) = run_capturing("x = 1;", "x = 2;");

    assert_eq!(
        halts,
        vec![Classification::ValueMismatch {
            field: "literal",
            left: "1".into(),
            right: "2".into(),
        }]
    );
}

#[test]
fn top_level_count_mismatch_halts_before_any_child_comparison() {
    let (_, halts) = run_capturing("a; b; c;", "a; b;");

    // The root statement counts diverge, so the very first halt is the
    // count mismatch; the identical children never get a say first.
    assert_eq!(
        halts.first(),
        Some(&Classification::ValueMismatch {
            field: "statement count",
            left: "3".into(),
            right: "2".into(),
        })
    );
}

#[test]
fn unequal_exhaustion_terminates_instead_of_hanging() {
    let script = ScriptedDecisions::new([Decision::AdvanceBoth]);
    let report = run_scripted("a;", "a; b;", CompareConfig::default(), script).unwrap();

    assert_eq!(
        report.outcome,
        Outcome::DivergentTermination {
            pending: Side::Right
        }
    );
}

#[test]
fn trailing_empty_statements_drain_before_termination() {
    let report = run_scripted(
        "{ a; ; ; }",
        "{ a; }",
        CompareConfig::default(),
        ScriptedDecisions::default(),
    )
    .unwrap();

    assert_eq!(report.outcome, Outcome::Finished);
    assert_eq!(report.arbitrations, 0);
}

#[test]
fn block_auto_skip_can_be_disabled() {
    let left = "{ a; } b;";
    let right = "a; b;";

    let auto = run_scripted(
        left,
        right,
        CompareConfig::default(),
        ScriptedDecisions::default(),
    )
    .unwrap();
    assert_eq!(auto.arbitrations, 0);

    let manual = run_scripted(
        left,
        right,
        CompareConfig::new().skip_blocks(false),
        ScriptedDecisions::new([Decision::AdvanceLeft]),
    )
    .unwrap();
    assert_eq!(manual.arbitrations, 1);
    assert_eq!(manual.outcome, Outcome::Finished);
}

#[test]
fn object_literal_key_order_is_significant() {
    let (_, halts) = run_capturing("var o = { a: 1, b: 1 };", "var o = { b: 1, a: 1 };");

    assert_eq!(
        halts.first(),
        Some(&Classification::ValueMismatch {
            field: "key",
            left: "a".into(),
            right: "b".into(),
        })
    );
}

#[test]
fn regex_literals_compare_by_raw_text() {
    let (_, halts) = run_capturing("x = /a+/;", "x = /a*/;");

    assert_eq!(
        halts,
        vec![Classification::ValueMismatch {
            field: "literal",
            left: "/a+/".into(),
            right: "/a*/".into(),
        }]
    );
}

#[test]
fn operator_mismatch_halts_with_both_operators() {
    let (_, halts) = run_capturing("a += 1;", "a -= 1;");

    assert_eq!(
        halts,
        vec![Classification::ValueMismatch {
            field: "operator",
            left: "+=".into(),
            right: "-=".into(),
        }]
    );
}

#[test]
fn call_and_member_expressions_compare_shallowly() {
    // The call and member nodes themselves carry no payload; only their
    // identifier children can diverge.
    let (_, halts) = run_capturing("a.b(c);", "a.d(c);");

    assert_eq!(
        halts,
        vec![Classification::ValueMismatch {
            field: "name",
            left: "b".into(),
            right: "d".into(),
        }]
    );
}

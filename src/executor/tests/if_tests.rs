//! Tests for if statements

use super::helpers::run_ok;

#[test]
fn test_if_true_branch() {
    let outcome = run_ok("ji1ieti1ithsokslzxl", &[]);
    assert_eq!(outcome.output, "ok\n");
}

#[test]
fn test_if_else_branch() {
    let outcome = run_ok("ji1ieti2ithsokslzethsnoslzxl", &[]);
    assert_eq!(outcome.output, "no\n");
}

#[test]
fn test_if_false_without_else() {
    let outcome = run_ok("ji1igti2ithi1ilzhi2ilxl", &[]);
    assert_eq!(outcome.output, "2\n");
}

#[test]
fn test_if_condition_evaluated_once() {
    let outcome = run_ok("jueti1ithsoneslzethsotherslzxl", &["1"]);
    assert_eq!(outcome.output, "one\n");
    assert_eq!(outcome.input_requests, 1);
}

#[test]
fn test_nested_if() {
    let outcome = run_ok("ji1ilti2itji2ilti3ithsdeepslzzxl", &[]);
    assert_eq!(outcome.output, "deep\n");
}

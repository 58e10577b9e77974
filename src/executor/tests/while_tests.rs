//! Tests for while loops

use super::helpers::run_ok;
use maplit::hashmap;

#[test]
fn test_while_prints_one_two_three() {
    let outcome = run_ok("vIei1ilrIleti3ithIlIpplzxl", &[]);
    assert_eq!(outcome.output, "1\n2\n3\n");
    assert_eq!(
        outcome.variables,
        hashmap! { "i".to_string() => "4".to_string() }
    );
}

#[test]
fn test_while_zero_iterations() {
    let outcome = run_ok("rbfalsebetbtruebthi1ilzhsdoneslxl", &[]);
    assert_eq!(outcome.output, "done\n");
}

#[test]
fn test_while_body_variable_is_fresh_each_iteration() {
    let outcome = run_ok("vIei0ilrIlti2itvJeIlJpplhJlIpplzxl", &[]);
    assert_eq!(outcome.output, "1\n2\n");
    assert_eq!(
        outcome.variables,
        hashmap! { "i".to_string() => "2".to_string() }
    );
}

#[test]
fn test_while_condition_reevaluated_each_iteration() {
    // Loops until the input stops being 1
    let outcome = run_ok("rueti1ithsloopslzxl", &["1", "1", "0"]);
    assert_eq!(outcome.output, "loop\nloop\n");
    assert_eq!(outcome.input_requests, 3);
}

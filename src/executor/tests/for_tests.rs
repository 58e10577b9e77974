//! Tests for for loops

use std::collections::HashMap;

use super::super::*;
use super::helpers::{run_ok, run_program};
use maplit::hashmap;

#[test]
fn test_for_counts() {
    let outcome = run_ok("fvIei0ilkIlti3ikIpplthIlzxl", &[]);
    assert_eq!(outcome.output, "0\n1\n2\n");
}

#[test]
fn test_for_head_variable_removed_after_loop() {
    let outcome = run_ok("fvIei0ilkIlti3ikIpplthIlzxl", &[]);
    let expected: HashMap<String, String> = hashmap! {};
    assert_eq!(outcome.variables, expected);
}

#[test]
fn test_for_body_variable_is_fresh_each_iteration() {
    let outcome = run_ok("fvIei0ilkIlti2ikIppltvJeIpi10ilhJlzxl", &[]);
    assert_eq!(outcome.output, "10\n11\n");
}

#[test]
fn test_for_init_can_modify_outer_variable() {
    let outcome = run_ok("vIei5ilfIei0ilkIlti2ikIppltzhIlxl", &[]);
    assert_eq!(outcome.output, "2\n");
    assert_eq!(
        outcome.variables,
        hashmap! { "i".to_string() => "2".to_string() }
    );
}

#[test]
fn test_for_with_empty_head() {
    let outcome = run_ok("vIei0ilfkIlti2ikthIlIpplzxl", &[]);
    assert_eq!(outcome.output, "0\n1\n");
}

#[test]
fn test_exit_in_for_body_skips_update() {
    let outcome = run_program("fvIei0ilkIlti3ikIppltxlzxl", &[]);
    assert_eq!(outcome.result.unwrap(), Control::Exit);
    assert!(outcome.output.is_empty());
    assert!(outcome.variables.is_empty());
}

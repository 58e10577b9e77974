//! Tests for scoping of bodies

use super::super::RuntimeError;
use super::helpers::{run_err, run_ok};
use maplit::hashmap;

#[test]
fn test_top_level_variables_survive() {
    let outcome = run_ok("vAei1ilvBesbslxl", &[]);
    assert_eq!(
        outcome.variables,
        hashmap! {
            "a".to_string() => "1".to_string(),
            "b".to_string() => "b".to_string(),
        }
    );
}

#[test]
fn test_redeclared_variable_is_overwritten_in_body() {
    let outcome = run_ok("vXei1iljbtruebetbtruebtvXei2ilhXlzxl", &[]);
    assert_eq!(outcome.output, "2\n");
    // Leaving the body deletes X instead of restoring the outer value
    assert!(outcome.variables.is_empty());
}

#[test]
fn test_redeclared_variable_is_gone_after_body() {
    let err = run_err("vXei1iljbtruebetbtruebtvXei2ilzhXlxl", &[]);
    assert!(matches!(err, RuntimeError::UnknownVariable { ref name } if name == "x"));
}

#[test]
fn test_loop_body_variables_reset_each_iteration() {
    let outcome = run_ok("vIei0ilrIlti2itvJeIlIpplzxl", &[]);
    assert_eq!(
        outcome.variables,
        hashmap! { "i".to_string() => "2".to_string() }
    );
}

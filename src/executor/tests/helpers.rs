//! Test helpers for executor tests
//!
//! Common utilities for parsing programs and running them on a VM with
//! scripted input and captured output.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use crate::executor::input::{InputProvider, ScriptedInput};
use crate::executor::types::{Control, Program};
use crate::executor::{RuntimeError, VM};
use crate::parser::{self, semantic_validator};

/// Scripted input that can still be inspected after the VM owns it
#[derive(Clone, Default)]
pub struct SharedInput(Rc<RefCell<ScriptedInput>>);

impl SharedInput {
    pub fn new(answers: &[&str]) -> Self {
        Self(Rc::new(RefCell::new(ScriptedInput::new(
            answers.iter().copied(),
        ))))
    }

    pub fn requests(&self) -> usize {
        self.0.borrow().requests()
    }
}

impl InputProvider for SharedInput {
    fn request_input(&mut self) -> io::Result<String> {
        self.0.borrow_mut().request_input()
    }
}

/// Parse program source, validate, and serialize/deserialize it
///
/// Panics if the program has validation errors. Warnings are allowed.
pub fn parse_and_validate(source: &str) -> Program {
    let program = parser::parse_program(source).expect("Parse program failed");
    let findings = semantic_validator::validate_program(&program);
    assert!(
        !semantic_validator::has_errors(&findings),
        "Program validation failed: {:?}",
        findings
    );
    let json = serde_json::to_string(&program).expect("Program serialization failed");
    serde_json::from_str(&json).expect("Program deserialization failed")
}

/// Everything observable after a run
pub struct Outcome {
    pub result: Result<Control, RuntimeError>,
    pub output: String,
    /// Variables still live when execution stopped
    pub variables: HashMap<String, String>,
    pub input_requests: usize,
}

/// Run a program with the given input answers
pub fn run_program(source: &str, answers: &[&str]) -> Outcome {
    let program = parse_and_validate(source);
    let input = SharedInput::new(answers);

    let mut vm = VM::new(Vec::new(), Box::new(input.clone()));
    let result = vm.run(&program);
    let variables = vm.store.snapshot();
    let output = String::from_utf8(vm.into_output()).expect("Output is not UTF-8");

    Outcome {
        result,
        output,
        variables,
        input_requests: input.requests(),
    }
}

/// Run a program that must finish through an exit instruction
pub fn run_ok(source: &str, answers: &[&str]) -> Outcome {
    let outcome = run_program(source, answers);
    match &outcome.result {
        Ok(Control::Exit) => {}
        other => panic!("Expected the program to exit, got {:?}", other),
    }
    outcome
}

/// Run a program that must fail at runtime
pub fn run_err(source: &str, answers: &[&str]) -> RuntimeError {
    match run_program(source, answers).result {
        Err(err) => err,
        Ok(control) => panic!("Expected a runtime error, got {:?}", control),
    }
}

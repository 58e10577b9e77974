//! Variable store and scope frames
//!
//! Variables live in one flat table. Each scope frame records the names
//! declared while it was on top of the stack; popping the frame deletes those
//! names from the table. There is no shadowing: re-declaring a name overwrites
//! the existing entry, and popping the inner frame removes the variable
//! outright instead of restoring an outer value.

use std::collections::HashMap;

use tracing::trace;

use super::types::Value;

/// A named variable and its (always evaluated) value
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: Value,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    variables: Vec<Variable>,
    frames: Vec<Vec<String>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable in the top frame, opening an implicit frame if the
    /// stack is empty. An existing variable with the same name is replaced.
    pub fn declare(&mut self, variable: Variable) {
        if self.frames.is_empty() {
            self.frames.push(Vec::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            if !frame.contains(&variable.name) {
                frame.push(variable.name.clone());
            }
        }

        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(existing) => existing.value = variable.value,
            None => self.variables.push(variable),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().rev().find(|v| v.name == name)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().rev().find(|v| v.name == name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn push_scope(&mut self) {
        self.frames.push(Vec::new());
        trace!(depth = self.frames.len(), "push scope");
    }

    /// Pop the top frame and delete every variable it declared.
    ///
    /// Returns the removed names; popping with no open frame removes nothing.
    pub fn pop_scope(&mut self) -> Vec<String> {
        let Some(frame) = self.frames.pop() else {
            return Vec::new();
        };
        self.variables.retain(|v| !frame.contains(&v.name));
        trace!(depth = self.frames.len(), removed = ?frame, "pop scope");
        frame
    }

    /// Number of open frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of live variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Live variables rendered as text, keyed by name
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.variables
            .iter()
            .map(|v| {
                let text = v
                    .value
                    .scalar()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                (v.name.clone(), text)
            })
            .collect()
    }
}

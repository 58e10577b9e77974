//! Control flow state

use serde::{Deserialize, Serialize};

/// Outcome of executing an instruction or a block
///
/// `Exit` unwinds every enclosing block and loop up to the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Control {
    None,
    Exit,
}

impl Control {
    pub fn is_exit(self) -> bool {
        matches!(self, Control::Exit)
    }
}

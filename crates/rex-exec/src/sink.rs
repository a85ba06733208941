// SPDX-License-Identifier: MIT OR Apache-2.0
//! Action result sink: the narrow reporting interface toward the host.

/// Receives the results of one script action.
///
/// The calling framework supplies its own implementation; [`ActionRecord`]
/// is an in-memory one for tests and the CLI.
pub trait ActionSink {
    /// Report one discovered output value.
    fn add_output(&mut self, name: &str, value: &str);
    /// Report an error message. Errors do not abort the action.
    fn add_error(&mut self, message: &str);
    /// Attach free-form execution info.
    fn add_ex_info(&mut self, message: &str);
}

/// In-memory [`ActionSink`] that collects everything it receives.
#[derive(Debug, Default)]
pub struct ActionRecord {
    /// Discovered (name, value) output pairs, in report order.
    pub outputs: Vec<(String, String)>,
    /// Error messages, in report order.
    pub errors: Vec<String>,
    /// Execution info messages.
    pub ex_info: Vec<String>,
}

impl ActionRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no errors were reported.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ActionSink for ActionRecord {
    fn add_output(&mut self, name: &str, value: &str) {
        self.outputs.push((name.to_string(), value.to_string()));
    }

    fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn add_ex_info(&mut self, message: &str) {
        self.ex_info.push(message.to_string());
    }
}

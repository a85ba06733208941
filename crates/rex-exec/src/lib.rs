// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! rex-exec
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod execution;
pub mod output;
pub mod script;
pub mod service;
pub mod sink;

pub use error::ExecError;
pub use execution::{DEFAULT_DELIMITER, DEFAULT_INTERPRETER, RubyExecution, ScriptParam};
pub use output::parse_output;
pub use script::ScriptSource;
pub use service::ScriptExecuterService;
pub use sink::{ActionRecord, ActionSink};

// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! rex-process
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod result;
pub mod runner;
pub mod spec;

pub use error::ProcessError;
pub use result::RunResult;
pub use runner::run;
pub use spec::ProcessSpec;

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! External command execution for pre-commit steps.

mod result;
mod runner;

pub use result::CheckResult;
pub use runner::{ProcessRunner, ShellRunner};

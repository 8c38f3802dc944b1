/*!
 * Simulator Operations
 * Control-layer commands and their (success, message) outcomes
 */

use super::super::types::{MemoryResult, Strategy};
use super::AddressSpace;
use crate::core::types::{Pid, Size};
use crate::monitoring::OperationSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A mutation requested by the control layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    AllocateSegment { pid: Pid, size: Size },
    AllocatePages { pid: Pid, size: Size },
    Deallocate { pid: Pid },
    Reset,
    SetStrategy { strategy: Strategy },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AllocateSegment { .. } => "allocate_segment",
            Operation::AllocatePages { .. } => "allocate_pages",
            Operation::Deallocate { .. } => "deallocate",
            Operation::Reset => "reset",
            Operation::SetStrategy { .. } => "set_strategy",
        }
    }
}

/// Result of an operation as presented to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Convert a result, describing the success value with `describe`
    pub fn from_result<T>(result: MemoryResult<T>, describe: impl FnOnce(T) -> String) -> Self {
        match result {
            Ok(value) => Self::success(describe(value)),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "ok" } else { "failed" };
        write!(f, "[{}] {}", status, self.message)
    }
}

impl AddressSpace {
    /// Execute one control-layer operation
    pub fn apply(&mut self, operation: Operation) -> Outcome {
        let span = OperationSpan::new(operation.name());
        let _entered = span.enter();

        let outcome = match operation {
            Operation::AllocateSegment { pid, size } => {
                Outcome::from_result(self.allocate_segment(pid, size), |a| a.to_string())
            }
            Operation::AllocatePages { pid, size } => {
                Outcome::from_result(self.allocate_pages(pid, size), |a| a.to_string())
            }
            Operation::Deallocate { pid } => {
                Outcome::from_result(self.deallocate(pid), |_| format!("Deallocated {}", pid))
            }
            Operation::Reset => {
                self.reset();
                Outcome::success("System reset")
            }
            Operation::SetStrategy { strategy } => {
                self.set_strategy(strategy);
                Outcome::success(format!("Strategy set to {}", strategy))
            }
        };

        span.record_result(outcome.success);
        outcome
    }
}

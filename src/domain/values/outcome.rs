use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionOutcome {
    Success,
    Failed,
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionOutcome::Success => write!(f, "SUCCESS"),
            ExecutionOutcome::Failed => write!(f, "FAILED"),
        }
    }
}

impl FromStr for ExecutionOutcome {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SUCCESS" => Ok(ExecutionOutcome::Success),
            "FAILED" => Ok(ExecutionOutcome::Failed),
            _ => Err(format!("Unknown execution outcome: {s}")),
        }
    }
}

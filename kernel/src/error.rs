use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// A uniqueness constraint rejected the write.
    Conflict,
    /// The database refused a value (too long, out of range).
    Invalid,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Conflict => write!(f, "Conflicts with an existing record"),
            KernelError::Invalid => write!(f, "Value rejected by the database"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

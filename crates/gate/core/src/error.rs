use legend_gate_store::StorageError;
use thiserror::Error;

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;

/// Errors from the Session Gate.
///
/// None of these are shown to the visitor. Invalid input is not an error at
/// all; see [`Submission`](crate::Submission).
#[derive(Error, Debug)]
pub enum GateError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("cannot {action} while the gate is {from}")]
    InvalidTransition { from: String, action: String },
}

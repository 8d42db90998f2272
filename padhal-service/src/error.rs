//! Service error types

use padhal_wire::{result, ResultCode};
use thiserror::Error;

/// Errors from the device activation path
///
/// Each variant maps to an in-band result code; none of them stop the
/// service from handling further requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivationError {
    /// Handle fields are outside the configured range
    #[error("device handle is outside the configured range")]
    InvalidHandle,

    /// Registry is at capacity and the handle is genuinely new
    #[error("active device list is full")]
    CapacityExceeded,

    /// The resource manager rejected the physical activation
    #[error("delegate rejected activation: {0}")]
    Delegate(ResultCode),
}

impl ActivationError {
    /// The result code relayed to the client
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::InvalidHandle => result::INVALID_DEVICE_HANDLE,
            Self::CapacityExceeded => result::ACTIVE_DEVICE_LIST_FULL,
            Self::Delegate(code) => *code,
        }
    }
}

//! Wire codec and protocol types for the padhal controller service
//!
//! This crate defines the binary contract between clients and the
//! hardware-abstraction service: operation codes, request/response
//! messages, result codes, and the typed parameter blocks each
//! operation carries. Decoding is explicit and per-field: a block's
//! declared byte length is part of the contract and any mismatch is a
//! protocol violation, not a recoverable business error.

pub mod codec;
pub mod error;
pub mod handle;
pub mod message;
pub mod opcode;
pub mod params;
pub mod result;
pub mod types;

pub use codec::{read_elements, write_elements, ParamBlock, ParamReader, ParamWriter};
pub use error::WireError;
pub use handle::{DeviceHandle, DeviceKind, PadId};
pub use message::{Request, Response, ResourceHandle};
pub use result::ResultCode;
pub use types::{
    FusionParameters, GyroscopeZeroDriftMode, SessionId, StyleSet, VibrationDeviceInfo,
    VibrationDevicePosition, VibrationDeviceType, VibrationValue,
};

//! Request dispatch and device activation for the padhal controller service
//!
//! This crate is the stateful half of the hardware-abstraction service:
//! an immutable opcode dispatch table, the handle validator, the bounded
//! idempotent activation registry, and the per-session service objects
//! that tie them to the external resource manager.
//!
//! One [`PadService`] exists per client session. The service is fully
//! synchronous: each request is handled on the thread that delivers it,
//! and the only blocking point is the activation registry's short
//! critical section.

pub mod device_list;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod resources;
pub mod server;
pub mod table;
pub mod validator;

pub use device_list::ActiveDeviceList;
pub use dispatch::dispatch;
pub use error::ActivationError;
pub use registry::{ActivationRegistry, DEFAULT_CAPACITY};
pub use resources::{
    DelegateResult, DeviceClass, FirmwarePolicy, PadRevision, ResourceManager,
    StaticFirmwarePolicy,
};
pub use server::PadService;
pub use table::{CommandTable, DispatchEntry, Handler, StubReply};
pub use validator::HandleValidator;

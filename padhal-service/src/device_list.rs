//! Per-session active vibration device list object
//!
//! A small second dispatchable object: one opcode that feeds the
//! session's activation registry. Created through
//! `PadService::create_active_device_list`.

use std::sync::Arc;

use tracing::debug;

use padhal_wire::codec::ParamBlock;
use padhal_wire::{opcode, DeviceHandle, Request, Response, WireError};

use crate::dispatch::dispatch;
use crate::registry::ActivationRegistry;
use crate::resources::ResourceManager;
use crate::table::CommandTable;

/// Dispatchable view over the session's activation registry
pub struct ActiveDeviceList {
    resource: Arc<dyn ResourceManager>,
    registry: Arc<ActivationRegistry>,
    table: CommandTable<Self>,
}

impl ActiveDeviceList {
    pub fn new(resource: Arc<dyn ResourceManager>, registry: Arc<ActivationRegistry>) -> Self {
        Self {
            resource,
            registry,
            table: CommandTable::new("ActiveDeviceList", opcode::device_list::name).implemented(
                opcode::device_list::ACTIVATE_VIBRATION_DEVICE,
                DeviceHandle::SIZE,
                Self::op_activate_vibration_device,
            ),
        }
    }

    /// Route one request through this object's table
    pub fn handle_request(&self, request: &Request) -> Result<Response, WireError> {
        dispatch(self, &self.table, request)
    }

    /// Number of endpoints recorded as active
    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    fn op_activate_vibration_device(&self, request: &Request) -> Result<Response, WireError> {
        let handle = DeviceHandle::decode(&request.params)?;
        debug!(?handle, "activate vibration device");
        Ok(match self.registry.activate(handle, self.resource.as_ref()) {
            Ok(()) => Response::success(),
            Err(err) => Response::with_result(err.result_code()),
        })
    }
}

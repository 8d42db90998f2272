//! Main per-session service object
//!
//! One [`PadService`] exists per client session. It owns the session's
//! dispatch table, handle validator, activation registry, and references
//! to the external resource manager and firmware policy.
//!
//! Handlers follow two conventions throughout:
//! - delegate failures are relayed in-band; operations with a fixed
//!   output block keep that block's shape on error and fill it with the
//!   type's default value;
//! - the only `Err` a handler returns is a [`WireError`] from decoding.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use padhal_wire::codec::{read_elements, ParamBlock, ParamWriter};
use padhal_wire::params::{
    Bool32Param, DriftModeParams, FlagHandleSession, HandleWithSession, IdWithSession, PadIdParam,
    SendVibrationParams, SessionOnly, SetFusionParams, StyleSetWithSession,
};
use padhal_wire::{
    opcode, result, write_elements, DeviceHandle, FusionParameters, GyroscopeZeroDriftMode, PadId,
    Request, ResourceHandle, Response, ResultCode, SessionId, VibrationValue, WireError,
};

use crate::device_list::ActiveDeviceList;
use crate::dispatch::dispatch;
use crate::registry::{ActivationRegistry, DEFAULT_CAPACITY};
use crate::resources::{DelegateResult, DeviceClass, FirmwarePolicy, PadRevision, ResourceManager};
use crate::table::{CommandTable, StubReply};
use crate::validator::HandleValidator;

/// The controller service entry object for one session
pub struct PadService {
    table: CommandTable<Self>,
    validator: HandleValidator,
    registry: Arc<ActivationRegistry>,
    resource: Arc<dyn ResourceManager>,
    firmware: Arc<dyn FirmwarePolicy>,
    next_object: AtomicU32,
    device_lists: Mutex<HashMap<u32, Arc<ActiveDeviceList>>>,
}

impl PadService {
    pub fn new(resource: Arc<dyn ResourceManager>, firmware: Arc<dyn FirmwarePolicy>) -> Self {
        Self::with_validator(resource, firmware, HandleValidator::with_defaults())
    }

    pub fn with_validator(
        resource: Arc<dyn ResourceManager>,
        firmware: Arc<dyn FirmwarePolicy>,
        validator: HandleValidator,
    ) -> Self {
        Self::with_capacity(resource, firmware, validator, DEFAULT_CAPACITY)
    }

    /// Fully parameterized construction: validator and registry capacity
    pub fn with_capacity(
        resource: Arc<dyn ResourceManager>,
        firmware: Arc<dyn FirmwarePolicy>,
        validator: HandleValidator,
        capacity: usize,
    ) -> Self {
        Self {
            table: Self::build_table(),
            validator: validator.clone(),
            registry: Arc::new(ActivationRegistry::with_capacity(validator, capacity)),
            resource,
            firmware,
            next_object: AtomicU32::new(1),
            device_lists: Mutex::new(HashMap::new()),
        }
    }

    /// Route one request through this object's table
    pub fn handle_request(&self, request: &Request) -> Result<Response, WireError> {
        dispatch(self, &self.table, request)
    }

    pub fn table(&self) -> &CommandTable<Self> {
        &self.table
    }

    /// Spawn and register the per-session active vibration device list
    /// object; the returned handle resolves through [`Self::device_list`]
    ///
    /// The list shares this session's registry, so activations are
    /// deduplicated across every list object the session creates.
    pub fn create_active_device_list(&self) -> (ResourceHandle, Arc<ActiveDeviceList>) {
        let list = Arc::new(ActiveDeviceList::new(
            Arc::clone(&self.resource),
            Arc::clone(&self.registry),
        ));
        let object = self.next_object.fetch_add(1, Ordering::Relaxed);
        self.device_lists.lock().insert(object, Arc::clone(&list));
        (ResourceHandle(object), list)
    }

    /// Resolve a handle returned by `CreateActiveVibrationDeviceList`
    pub fn device_list(&self, handle: ResourceHandle) -> Option<Arc<ActiveDeviceList>> {
        self.device_lists.lock().get(&handle.0).cloned()
    }

    pub fn registry(&self) -> &ActivationRegistry {
        &self.registry
    }

    fn build_table() -> CommandTable<Self> {
        CommandTable::new("PadService", opcode::name)
            .implemented(
                opcode::CREATE_SESSION_RESOURCE,
                SessionOnly::SIZE,
                Self::op_create_session_resource,
            )
            .implemented(
                opcode::ACTIVATE_DEBUG_PAD,
                SessionOnly::SIZE,
                Self::op_activate_debug_pad,
            )
            .implemented(
                opcode::ACTIVATE_TOUCH_SCREEN,
                SessionOnly::SIZE,
                Self::op_activate_touch_screen,
            )
            .implemented(
                opcode::ACTIVATE_MOUSE,
                SessionOnly::SIZE,
                Self::op_activate_mouse,
            )
            .unimplemented(opcode::ACTIVATE_DEBUG_MOUSE)
            .implemented(
                opcode::ACTIVATE_KEYBOARD,
                SessionOnly::SIZE,
                Self::op_activate_keyboard,
            )
            .stubbed(opcode::SEND_KEYBOARD_LOCK_KEY_EVENT, StubReply::success(4))
            .stubbed(
                opcode::ACQUIRE_PAD_GROUP_ID_EVENT,
                StubReply::success(8).with_null_handle(),
            )
            .stubbed(opcode::RELEASE_PAD_GROUP_ID_EVENT, StubReply::success(8))
            .stubbed(opcode::ACTIVATE_BASIC_PAD, StubReply::success(16))
            .stubbed(
                opcode::GET_BASIC_PAD_IDS,
                StubReply::success(0)
                    .with_output(4i64.to_le_bytes().to_vec())
                    .with_buffer(write_elements(&[PadId(0), PadId(1), PadId(2), PadId(3)])),
            )
            .stubbed(opcode::ACTIVATE_JOINED_PAD, StubReply::success(4))
            .stubbed(
                opcode::GET_JOINED_PAD_IDS,
                StubReply::success(0).with_output(0i64.to_le_bytes().to_vec()),
            )
            .stubbed(opcode::ACTIVATE_MOTION_SENSOR_LEGACY, StubReply::success(4))
            .stubbed(
                opcode::DEACTIVATE_MOTION_SENSOR_LEGACY,
                StubReply::success(4),
            )
            .implemented(
                opcode::START_MOTION_SENSOR,
                HandleWithSession::SIZE,
                Self::op_start_motion_sensor,
            )
            .implemented(
                opcode::STOP_MOTION_SENSOR,
                HandleWithSession::SIZE,
                Self::op_stop_motion_sensor,
            )
            .implemented(
                opcode::IS_MOTION_FUSION_ENABLED,
                HandleWithSession::SIZE,
                Self::op_is_motion_fusion_enabled,
            )
            .implemented(
                opcode::ENABLE_MOTION_FUSION,
                FlagHandleSession::SIZE,
                Self::op_enable_motion_fusion,
            )
            .implemented(
                opcode::SET_MOTION_FUSION_PARAMETERS,
                SetFusionParams::SIZE,
                Self::op_set_motion_fusion_parameters,
            )
            .implemented(
                opcode::GET_MOTION_FUSION_PARAMETERS,
                HandleWithSession::SIZE,
                Self::op_get_motion_fusion_parameters,
            )
            .implemented(
                opcode::RESET_MOTION_FUSION_PARAMETERS,
                HandleWithSession::SIZE,
                Self::op_reset_motion_fusion_parameters,
            )
            .unimplemented(opcode::SET_ACCELEROMETER_PARAMETERS)
            .unimplemented(opcode::GET_ACCELEROMETER_PARAMETERS)
            .unimplemented(opcode::RESET_ACCELEROMETER_PARAMETERS)
            .unimplemented(opcode::SET_ACCELEROMETER_PLAY_MODE)
            .unimplemented(opcode::GET_ACCELEROMETER_PLAY_MODE)
            .unimplemented(opcode::RESET_ACCELEROMETER_PLAY_MODE)
            .implemented(
                opcode::SET_GYROSCOPE_ZERO_DRIFT_MODE,
                DriftModeParams::SIZE,
                Self::op_set_gyroscope_zero_drift_mode,
            )
            .implemented(
                opcode::GET_GYROSCOPE_ZERO_DRIFT_MODE,
                HandleWithSession::SIZE,
                Self::op_get_gyroscope_zero_drift_mode,
            )
            .implemented(
                opcode::RESET_GYROSCOPE_ZERO_DRIFT_MODE,
                HandleWithSession::SIZE,
                Self::op_reset_gyroscope_zero_drift_mode,
            )
            .implemented(
                opcode::IS_MOTION_SENSOR_AT_REST,
                HandleWithSession::SIZE,
                Self::op_is_motion_sensor_at_rest,
            )
            .implemented(
                opcode::ACTIVATE_GESTURE,
                IdWithSession::SIZE,
                Self::op_activate_gesture,
            )
            .implemented(
                opcode::SET_SUPPORTED_STYLE_SET,
                StyleSetWithSession::SIZE,
                Self::op_set_supported_style_set,
            )
            .implemented(
                opcode::GET_SUPPORTED_STYLE_SET,
                SessionOnly::SIZE,
                Self::op_get_supported_style_set,
            )
            .implemented(
                opcode::SET_SUPPORTED_PAD_IDS,
                SessionOnly::SIZE,
                Self::op_set_supported_pad_ids,
            )
            .implemented(
                opcode::ACTIVATE_PAD,
                SessionOnly::SIZE,
                Self::op_activate_pad,
            )
            .stubbed(opcode::DEACTIVATE_PAD, StubReply::success(8))
            .implemented(
                opcode::ACQUIRE_STYLE_SET_UPDATE_EVENT,
                IdWithSession::SIZE,
                Self::op_acquire_style_set_update_event,
            )
            .implemented(
                opcode::GET_PLAYER_LED_PATTERN,
                PadIdParam::SIZE,
                Self::op_get_player_led_pattern,
            )
            .implemented(
                opcode::ACTIVATE_PAD_WITH_REVISION,
                IdWithSession::SIZE,
                Self::op_activate_pad_with_revision,
            )
            .implemented(
                opcode::GET_VIBRATION_DEVICE_INFO,
                DeviceHandle::SIZE,
                Self::op_get_vibration_device_info,
            )
            .implemented(
                opcode::SEND_VIBRATION_VALUE,
                SendVibrationParams::SIZE,
                Self::op_send_vibration_value,
            )
            .implemented(
                opcode::CREATE_ACTIVE_VIBRATION_DEVICE_LIST,
                0,
                Self::op_create_active_vibration_device_list,
            )
            .implemented(
                opcode::PERMIT_VIBRATION,
                Bool32Param::SIZE,
                Self::op_permit_vibration,
            )
            .implemented(
                opcode::IS_VIBRATION_PERMITTED,
                0,
                Self::op_is_vibration_permitted,
            )
            .implemented(
                opcode::SEND_VIBRATION_VALUES,
                SessionOnly::SIZE,
                Self::op_send_vibration_values,
            )
            .unimplemented(opcode::ACTIVATE_DIGITIZER)
    }

    /// Activate a device class: globally first on unmanaged firmware,
    /// then for the requesting session
    fn managed_activate(&self, class: DeviceClass, session: SessionId) -> ResultCode {
        if !self.firmware.is_device_managed() {
            if let Err(code) = self.resource.activate(class) {
                return code;
            }
        }
        ack(self.resource.activate_for_session(class, session))
    }

    fn activate_class(&self, request: &Request, class: DeviceClass) -> Result<Response, WireError> {
        let p = SessionOnly::decode(&request.params)?;
        debug!(?class, session = %p.session, "activate device class");
        Ok(Response::with_result(self.managed_activate(class, p.session)))
    }

    fn op_create_session_resource(&self, request: &Request) -> Result<Response, WireError> {
        let p = SessionOnly::decode(&request.params)?;
        debug!(session = %p.session, "create session resource");
        Ok(match self.resource.create_session_resource(p.session) {
            Ok(handle) => Response::success().handle(handle),
            Err(code) => Response::with_result(code).handle(ResourceHandle::NULL),
        })
    }

    fn op_activate_debug_pad(&self, request: &Request) -> Result<Response, WireError> {
        self.activate_class(request, DeviceClass::DebugPad)
    }

    fn op_activate_touch_screen(&self, request: &Request) -> Result<Response, WireError> {
        self.activate_class(request, DeviceClass::TouchScreen)
    }

    fn op_activate_mouse(&self, request: &Request) -> Result<Response, WireError> {
        self.activate_class(request, DeviceClass::Mouse)
    }

    fn op_activate_keyboard(&self, request: &Request) -> Result<Response, WireError> {
        self.activate_class(request, DeviceClass::Keyboard)
    }

    fn op_activate_gesture(&self, request: &Request) -> Result<Response, WireError> {
        // the basic gesture id is accepted but not consumed yet
        let p = IdWithSession::decode(&request.params)?;
        debug!(gesture_id = p.id, session = %p.session, "activate gesture");
        Ok(Response::with_result(
            self.managed_activate(DeviceClass::Gesture, p.session),
        ))
    }

    fn op_start_motion_sensor(&self, request: &Request) -> Result<Response, WireError> {
        let p = HandleWithSession::decode(&request.params)?;
        debug!(handle = ?p.handle, session = %p.session, "start motion sensor");
        Ok(Response::with_result(ack(
            self.resource.set_motion_enabled(p.handle, true),
        )))
    }

    fn op_stop_motion_sensor(&self, request: &Request) -> Result<Response, WireError> {
        let p = HandleWithSession::decode(&request.params)?;
        debug!(handle = ?p.handle, session = %p.session, "stop motion sensor");
        Ok(Response::with_result(ack(
            self.resource.set_motion_enabled(p.handle, false),
        )))
    }

    fn op_is_motion_fusion_enabled(&self, request: &Request) -> Result<Response, WireError> {
        let p = HandleWithSession::decode(&request.params)?;
        let (result, enabled) = split(self.resource.is_motion_fusion_enabled(p.handle));
        let mut w = ParamWriter::with_capacity(4);
        w.write_bool32(enabled.unwrap_or(false));
        Ok(Response::with_result(result).params(w.into_bytes()))
    }

    fn op_enable_motion_fusion(&self, request: &Request) -> Result<Response, WireError> {
        let p = FlagHandleSession::decode(&request.params)?;
        debug!(handle = ?p.handle, enable = p.flag, "enable motion fusion");
        Ok(Response::with_result(ack(
            self.resource.set_motion_fusion_enabled(p.handle, p.flag),
        )))
    }

    fn op_set_motion_fusion_parameters(&self, request: &Request) -> Result<Response, WireError> {
        let p = SetFusionParams::decode(&request.params)?;
        Ok(Response::with_result(ack(
            self.resource.set_fusion_parameters(p.handle, p.fusion),
        )))
    }

    fn op_get_motion_fusion_parameters(&self, request: &Request) -> Result<Response, WireError> {
        let p = HandleWithSession::decode(&request.params)?;
        let (result, fusion) = split(self.resource.fusion_parameters(p.handle));
        Ok(Response::with_result(result).params(fusion.unwrap_or_default().encode()))
    }

    fn op_reset_motion_fusion_parameters(&self, request: &Request) -> Result<Response, WireError> {
        let p = HandleWithSession::decode(&request.params)?;
        debug!(handle = ?p.handle, "reset motion fusion parameters");
        // restore the named defaults, then re-enable fusion; first
        // failure wins
        let result = self
            .resource
            .set_fusion_parameters(p.handle, FusionParameters::RESET)
            .and_then(|()| self.resource.set_motion_fusion_enabled(p.handle, true));
        Ok(Response::with_result(ack(result)))
    }

    fn op_set_gyroscope_zero_drift_mode(&self, request: &Request) -> Result<Response, WireError> {
        let p = DriftModeParams::decode(&request.params)?;
        let mode = GyroscopeZeroDriftMode::from_wire(p.mode);
        debug!(handle = ?p.handle, ?mode, "set gyroscope zero drift mode");
        Ok(Response::with_result(ack(
            self.resource.set_gyroscope_zero_drift_mode(p.handle, mode),
        )))
    }

    fn op_get_gyroscope_zero_drift_mode(&self, request: &Request) -> Result<Response, WireError> {
        let p = HandleWithSession::decode(&request.params)?;
        let (result, mode) = split(self.resource.gyroscope_zero_drift_mode(p.handle));
        let mut w = ParamWriter::with_capacity(4);
        w.write_u32(mode.unwrap_or_default().wire());
        Ok(Response::with_result(result).params(w.into_bytes()))
    }

    fn op_reset_gyroscope_zero_drift_mode(&self, request: &Request) -> Result<Response, WireError> {
        let p = HandleWithSession::decode(&request.params)?;
        Ok(Response::with_result(ack(
            self.resource
                .set_gyroscope_zero_drift_mode(p.handle, GyroscopeZeroDriftMode::Standard),
        )))
    }

    fn op_is_motion_sensor_at_rest(&self, request: &Request) -> Result<Response, WireError> {
        let p = HandleWithSession::decode(&request.params)?;
        let mut w = ParamWriter::with_capacity(4);
        w.write_bool32(self.resource.is_motion_at_rest(p.handle));
        Ok(Response::success().params(w.into_bytes()))
    }

    fn op_set_supported_style_set(&self, request: &Request) -> Result<Response, WireError> {
        let p = StyleSetWithSession::decode(&request.params)?;
        debug!(styles = format_args!("{:#x}", p.style_set.0), session = %p.session, "set supported style set");
        Ok(Response::with_result(ack(
            self.resource.set_supported_style_set(p.session, p.style_set),
        )))
    }

    fn op_get_supported_style_set(&self, request: &Request) -> Result<Response, WireError> {
        let p = SessionOnly::decode(&request.params)?;
        let (result, styles) = split(self.resource.supported_style_set(p.session));
        let mut w = ParamWriter::with_capacity(4);
        w.write_u32(styles.unwrap_or_default().0);
        Ok(Response::with_result(result).params(w.into_bytes()))
    }

    fn op_set_supported_pad_ids(&self, request: &Request) -> Result<Response, WireError> {
        let p = SessionOnly::decode(&request.params)?;
        let ids: Vec<PadId> = read_elements(request.buffer(0))?;
        debug!(count = ids.len(), session = %p.session, "set supported pad ids");
        Ok(Response::with_result(ack(
            self.resource.set_supported_pad_ids(p.session, &ids),
        )))
    }

    fn op_activate_pad(&self, request: &Request) -> Result<Response, WireError> {
        let p = SessionOnly::decode(&request.params)?;
        debug!(session = %p.session, "activate pads");
        Ok(Response::with_result(ack(
            self.resource.activate_pads(p.session, PadRevision::Revision0),
        )))
    }

    fn op_activate_pad_with_revision(&self, request: &Request) -> Result<Response, WireError> {
        let p = IdWithSession::decode(&request.params)?;
        let revision = PadRevision::from_wire(p.id);
        debug!(?revision, session = %p.session, "activate pads with revision");
        Ok(Response::with_result(ack(
            self.resource.activate_pads(p.session, revision),
        )))
    }

    fn op_acquire_style_set_update_event(&self, request: &Request) -> Result<Response, WireError> {
        let p = IdWithSession::decode(&request.params)?;
        let pad_id = PadId(p.id);
        debug!(pad_id = p.id, session = %p.session, "acquire style set update event");
        Ok(
            match self.resource.style_set_update_event(pad_id, p.session) {
                Ok(handle) => Response::success().handle(handle),
                Err(code) => Response::with_result(code).handle(ResourceHandle::NULL),
            },
        )
    }

    fn op_get_player_led_pattern(&self, request: &Request) -> Result<Response, WireError> {
        let p = PadIdParam::decode(&request.params)?;
        let pad_id = PadId(p.pad_id);
        let (result, pattern) = if pad_id.is_valid() {
            split(self.resource.player_led_pattern(pad_id))
        } else {
            (result::INVALID_PAD_ID, None)
        };
        let mut w = ParamWriter::with_capacity(8);
        w.write_u64(pattern.unwrap_or(0));
        Ok(Response::with_result(result).params(w.into_bytes()))
    }

    fn op_get_vibration_device_info(&self, request: &Request) -> Result<Response, WireError> {
        let handle = DeviceHandle::decode(&request.params)?;
        let (result, info) = if self.validator.is_valid(handle) {
            split(self.resource.vibration_device_info(handle))
        } else {
            (result::INVALID_DEVICE_HANDLE, None)
        };
        Ok(Response::with_result(result).params(info.unwrap_or_default().encode()))
    }

    fn op_send_vibration_value(&self, request: &Request) -> Result<Response, WireError> {
        let p = SendVibrationParams::decode(&request.params)?;
        // fire and forget: a dropped sample is not an error the client
        // can act on
        if let Err(code) = self
            .resource
            .send_vibration_value(p.session, p.handle, p.value)
        {
            debug!(handle = ?p.handle, %code, "vibration sample dropped");
        }
        Ok(Response::success())
    }

    fn op_create_active_vibration_device_list(
        &self,
        _request: &Request,
    ) -> Result<Response, WireError> {
        let (handle, _) = self.create_active_device_list();
        debug!(object = handle.0, "create active vibration device list");
        Ok(Response::success().handle(handle))
    }

    fn op_permit_vibration(&self, request: &Request) -> Result<Response, WireError> {
        let p = Bool32Param::decode(&request.params)?;
        let volume = if p.value { 1.0 } else { 0.0 };
        debug!(permitted = p.value, "permit vibration");
        Ok(Response::with_result(ack(
            self.resource.set_vibration_master_volume(volume),
        )))
    }

    fn op_is_vibration_permitted(&self, _request: &Request) -> Result<Response, WireError> {
        let (result, volume) = split(self.resource.vibration_master_volume());
        let mut w = ParamWriter::with_capacity(4);
        w.write_bool32(volume.unwrap_or(0.0) > 0.0);
        Ok(Response::with_result(result).params(w.into_bytes()))
    }

    fn op_send_vibration_values(&self, request: &Request) -> Result<Response, WireError> {
        let p = SessionOnly::decode(&request.params)?;
        let handles: Vec<DeviceHandle> = read_elements(request.buffer(0))?;
        let values: Vec<VibrationValue> = read_elements(request.buffer(1))?;
        if handles.len() != values.len() {
            debug!(
                handles = handles.len(),
                values = values.len(),
                "vibration buffer count mismatch"
            );
            return Ok(Response::with_result(result::BUFFER_COUNT_MISMATCH));
        }
        for (handle, value) in handles.iter().zip(&values) {
            if let Err(code) = self.resource.send_vibration_value(p.session, *handle, *value) {
                return Ok(Response::with_result(code));
            }
        }
        Ok(Response::success())
    }
}

/// In-band acknowledgement of a unit delegate result
fn ack(result: DelegateResult) -> ResultCode {
    match result {
        Ok(()) => ResultCode::SUCCESS,
        Err(code) => code,
    }
}

/// Split a valued delegate result into its code and optional payload
fn split<T>(result: DelegateResult<T>) -> (ResultCode, Option<T>) {
    match result {
        Ok(value) => (ResultCode::SUCCESS, Some(value)),
        Err(code) => (code, None),
    }
}

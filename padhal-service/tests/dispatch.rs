//! End-to-end dispatcher tests against a recording resource manager

use std::sync::Arc;

use parking_lot::Mutex;

use padhal_service::{
    dispatch, CommandTable, DispatchEntry, FirmwarePolicy, PadService, ResourceManager,
    StaticFirmwarePolicy,
};
use padhal_wire::codec::ParamBlock;
use padhal_wire::params::{
    Bool32Param, HandleWithSession, PadIdParam, SendVibrationParams, SessionOnly,
};
use padhal_wire::{
    opcode, result, write_elements, DeviceHandle, DeviceKind, FusionParameters, PadId, Request,
    ResultCode, SessionId, StyleSet, VibrationValue,
};

/// Records every delegate call; individual methods can be set to fail
#[derive(Default)]
struct SpyResources {
    calls: Mutex<Vec<String>>,
    volume: Mutex<f32>,
    fail_activate: Mutex<Option<ResultCode>>,
    fail_send: Mutex<Option<ResultCode>>,
    fail_set_fusion: Mutex<Option<ResultCode>>,
}

impl SpyResources {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl ResourceManager for SpyResources {
    fn activate(&self, class: padhal_service::DeviceClass) -> Result<(), ResultCode> {
        self.record(format!("activate:{class:?}"));
        match *self.fail_activate.lock() {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }

    fn activate_for_session(
        &self,
        class: padhal_service::DeviceClass,
        session: SessionId,
    ) -> Result<(), ResultCode> {
        self.record(format!("activate_for_session:{class:?}:{session}"));
        Ok(())
    }

    fn activate_pads(
        &self,
        session: SessionId,
        revision: padhal_service::PadRevision,
    ) -> Result<(), ResultCode> {
        self.record(format!("activate_pads:{session}:{revision:?}"));
        Ok(())
    }

    fn supported_style_set(&self, _session: SessionId) -> Result<StyleSet, ResultCode> {
        self.record("supported_style_set");
        Ok(StyleSet(0x2F))
    }

    fn set_supported_pad_ids(
        &self,
        _session: SessionId,
        ids: &[PadId],
    ) -> Result<(), ResultCode> {
        self.record(format!("set_supported_pad_ids:{}", ids.len()));
        Ok(())
    }

    fn player_led_pattern(&self, pad_id: PadId) -> Result<u64, ResultCode> {
        self.record(format!("player_led_pattern:{}", pad_id.0));
        Ok(u64::from(pad_id.0) + 1)
    }

    fn set_fusion_parameters(
        &self,
        _handle: DeviceHandle,
        params: FusionParameters,
    ) -> Result<(), ResultCode> {
        self.record(format!(
            "set_fusion_parameters:{}:{}",
            params.parameter1, params.parameter2
        ));
        match *self.fail_set_fusion.lock() {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }

    fn set_motion_fusion_enabled(
        &self,
        _handle: DeviceHandle,
        enabled: bool,
    ) -> Result<(), ResultCode> {
        self.record(format!("set_motion_fusion_enabled:{enabled}"));
        Ok(())
    }

    fn send_vibration_value(
        &self,
        _session: SessionId,
        handle: DeviceHandle,
        _value: VibrationValue,
    ) -> Result<(), ResultCode> {
        self.record(format!("send_vibration_value:{}", handle.logical_id));
        match *self.fail_send.lock() {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }

    fn activate_vibration_device(&self, handle: DeviceHandle) -> Result<(), ResultCode> {
        self.record(format!(
            "activate_vibration_device:{}:{}",
            handle.logical_id, handle.sub_index
        ));
        Ok(())
    }

    fn set_vibration_master_volume(&self, volume: f32) -> Result<(), ResultCode> {
        self.record(format!("set_vibration_master_volume:{volume}"));
        *self.volume.lock() = volume;
        Ok(())
    }

    fn vibration_master_volume(&self) -> Result<f32, ResultCode> {
        self.record("vibration_master_volume");
        Ok(*self.volume.lock())
    }
}

fn service_with(managed: bool) -> (PadService, Arc<SpyResources>) {
    let spy = Arc::new(SpyResources::default());
    let resource: Arc<dyn ResourceManager> = spy.clone();
    let firmware: Arc<dyn FirmwarePolicy> = Arc::new(StaticFirmwarePolicy::managed(managed));
    (PadService::new(resource, firmware), spy)
}

fn session_params() -> Vec<u8> {
    SessionOnly {
        session: SessionId(42),
    }
    .encode()
}

fn joy_handle(logical_id: u8, sub_index: u8) -> DeviceHandle {
    DeviceHandle::new(DeviceKind::JoyDual, logical_id, sub_index)
}

#[test]
fn every_registered_opcode_answers_without_panicking() {
    let (svc, spy) = service_with(true);
    let opcodes: Vec<u32> = svc.table().opcodes().collect();
    assert!(!opcodes.is_empty());

    for op in opcodes {
        let params = svc
            .table()
            .declared_params(op)
            .map(|len| vec![0u8; len])
            .unwrap_or_default();
        let before = spy.call_count();
        let resp = svc.handle_request(&Request::new(op, params)).unwrap();

        match svc.table().lookup(op) {
            Some(DispatchEntry::Stubbed(_)) => {
                assert!(resp.result.is_success(), "stub {op} must succeed");
                assert_eq!(spy.call_count(), before, "stub {op} touched a delegate");
            }
            Some(DispatchEntry::Unimplemented) => {
                assert_eq!(resp.result, result::NOT_IMPLEMENTED);
                assert_eq!(spy.call_count(), before, "unbound {op} touched a delegate");
            }
            _ => {}
        }
    }
}

#[test]
fn unknown_opcode_answers_in_band_and_service_keeps_serving() {
    let (svc, _) = service_with(true);
    let resp = svc.handle_request(&Request::new(777, Vec::new())).unwrap();
    assert_eq!(resp.result, result::NOT_IMPLEMENTED);

    let resp = svc
        .handle_request(&Request::new(opcode::ACTIVATE_PAD, session_params()))
        .unwrap();
    assert!(resp.result.is_success());
}

#[test]
fn basic_pad_ids_stub_is_fixed_on_repeated_calls() {
    let (svc, spy) = service_with(true);
    let req = Request::new(opcode::GET_BASIC_PAD_IDS, Vec::new());

    for _ in 0..2 {
        let resp = svc.handle_request(&req).unwrap();
        assert!(resp.result.is_success());
        assert_eq!(resp.params, 4i64.to_le_bytes().to_vec());
        assert_eq!(
            resp.buffers,
            vec![write_elements(&[PadId(0), PadId(1), PadId(2), PadId(3)])]
        );
    }
    assert_eq!(spy.call_count(), 0);
}

#[test]
fn unmanaged_firmware_activates_globally_then_per_session() {
    let (svc, spy) = service_with(false);
    let resp = svc
        .handle_request(&Request::new(opcode::ACTIVATE_KEYBOARD, session_params()))
        .unwrap();
    assert!(resp.result.is_success());
    assert_eq!(
        spy.calls(),
        vec![
            "activate:Keyboard".to_string(),
            "activate_for_session:Keyboard:42".to_string(),
        ]
    );
}

#[test]
fn managed_firmware_skips_the_global_activation() {
    let (svc, spy) = service_with(true);
    svc.handle_request(&Request::new(opcode::ACTIVATE_TOUCH_SCREEN, session_params()))
        .unwrap();
    assert_eq!(
        spy.calls(),
        vec!["activate_for_session:TouchScreen:42".to_string()]
    );
}

#[test]
fn failed_global_activation_short_circuits() {
    let (svc, spy) = service_with(false);
    *spy.fail_activate.lock() = Some(result::NOT_IMPLEMENTED);

    let resp = svc
        .handle_request(&Request::new(opcode::ACTIVATE_MOUSE, session_params()))
        .unwrap();
    assert_eq!(resp.result, result::NOT_IMPLEMENTED);
    assert_eq!(spy.calls(), vec!["activate:Mouse".to_string()]);
}

#[test]
fn pad_activation_passes_the_revision_through() {
    let (svc, spy) = service_with(true);
    svc.handle_request(&Request::new(opcode::ACTIVATE_PAD, session_params()))
        .unwrap();

    let mut params = 2u32.to_le_bytes().to_vec();
    params.extend_from_slice(&[0; 4]);
    params.extend_from_slice(&42u64.to_le_bytes());
    svc.handle_request(&Request::new(opcode::ACTIVATE_PAD_WITH_REVISION, params))
        .unwrap();

    assert_eq!(
        spy.calls(),
        vec![
            "activate_pads:42:Revision0".to_string(),
            "activate_pads:42:Revision2".to_string(),
        ]
    );
}

#[test]
fn supported_pad_ids_come_from_the_buffer() {
    let (svc, spy) = service_with(true);
    let req = Request::new(opcode::SET_SUPPORTED_PAD_IDS, session_params())
        .with_buffer(write_elements(&[PadId(0), PadId(1), PadId::HANDHELD]));
    let resp = svc.handle_request(&req).unwrap();
    assert!(resp.result.is_success());
    assert_eq!(spy.calls(), vec!["set_supported_pad_ids:3".to_string()]);
}

#[test]
fn ragged_pad_id_buffer_is_a_protocol_violation() {
    let (svc, _) = service_with(true);
    let req =
        Request::new(opcode::SET_SUPPORTED_PAD_IDS, session_params()).with_buffer(vec![0u8; 6]);
    assert!(svc.handle_request(&req).is_err());
}

#[test]
fn led_pattern_validates_the_pad_id_first() {
    let (svc, spy) = service_with(true);

    let resp = svc
        .handle_request(&Request::new(
            opcode::GET_PLAYER_LED_PATTERN,
            PadIdParam { pad_id: 3 }.encode(),
        ))
        .unwrap();
    assert!(resp.result.is_success());
    assert_eq!(resp.params, 4u64.to_le_bytes().to_vec());

    let resp = svc
        .handle_request(&Request::new(
            opcode::GET_PLAYER_LED_PATTERN,
            PadIdParam { pad_id: 9 }.encode(),
        ))
        .unwrap();
    assert_eq!(resp.result, result::INVALID_PAD_ID);
    // the delegate never saw the invalid id
    assert_eq!(spy.calls(), vec!["player_led_pattern:3".to_string()]);
}

#[test]
fn vibration_device_info_rejects_invalid_handles_in_band() {
    let (svc, _) = service_with(true);
    let bad = DeviceHandle {
        kind: 0xFF,
        logical_id: 0,
        sub_index: 0,
    };
    let resp = svc
        .handle_request(&Request::new(opcode::GET_VIBRATION_DEVICE_INFO, bad.encode()))
        .unwrap();
    assert_eq!(resp.result, result::INVALID_DEVICE_HANDLE);
    assert_eq!(resp.params.len(), 8);
}

#[test]
fn single_vibration_sample_is_fire_and_forget() {
    let (svc, spy) = service_with(true);
    *spy.fail_send.lock() = Some(result::NOT_IMPLEMENTED);

    let params = SendVibrationParams {
        handle: joy_handle(1, 0),
        value: VibrationValue::STOPPED,
        session: SessionId(42),
    }
    .encode();
    let resp = svc
        .handle_request(&Request::new(opcode::SEND_VIBRATION_VALUE, params))
        .unwrap();
    // delegate failure is absorbed
    assert!(resp.result.is_success());
    assert_eq!(spy.call_count(), 1);
}

#[test]
fn batched_vibration_requires_matching_counts() {
    let (svc, spy) = service_with(true);
    let handles = write_elements(&[joy_handle(1, 0), joy_handle(1, 1)]);
    let values = write_elements(&[VibrationValue::STOPPED]);

    let req = Request::new(opcode::SEND_VIBRATION_VALUES, session_params())
        .with_buffer(handles)
        .with_buffer(values);
    let resp = svc.handle_request(&req).unwrap();
    assert_eq!(resp.result, result::BUFFER_COUNT_MISMATCH);
    assert_eq!(spy.call_count(), 0);
}

#[test]
fn batched_vibration_stops_at_the_first_delegate_error() {
    let (svc, spy) = service_with(true);
    let handles = write_elements(&[joy_handle(1, 0), joy_handle(2, 0), joy_handle(3, 0)]);
    let values = write_elements(&[VibrationValue::STOPPED; 3]);

    *spy.fail_send.lock() = Some(result::NOT_IMPLEMENTED);
    let req = Request::new(opcode::SEND_VIBRATION_VALUES, session_params())
        .with_buffer(handles.clone())
        .with_buffer(values.clone());
    let resp = svc.handle_request(&req).unwrap();
    assert_eq!(resp.result, result::NOT_IMPLEMENTED);
    assert_eq!(spy.calls(), vec!["send_vibration_value:1".to_string()]);

    *spy.fail_send.lock() = None;
    let req = Request::new(opcode::SEND_VIBRATION_VALUES, session_params())
        .with_buffer(handles)
        .with_buffer(values);
    assert!(svc.handle_request(&req).unwrap().result.is_success());
    assert_eq!(spy.call_count(), 4);
}

#[test]
fn fusion_reset_restores_defaults_then_reenables() {
    let (svc, spy) = service_with(true);
    let params = HandleWithSession {
        handle: joy_handle(1, 0),
        session: SessionId(42),
    }
    .encode();
    let resp = svc
        .handle_request(&Request::new(opcode::RESET_MOTION_FUSION_PARAMETERS, params))
        .unwrap();
    assert!(resp.result.is_success());
    assert_eq!(
        spy.calls(),
        vec![
            "set_fusion_parameters:0.03:0.4".to_string(),
            "set_motion_fusion_enabled:true".to_string(),
        ]
    );
}

#[test]
fn fusion_reset_stops_after_a_failed_parameter_write() {
    let (svc, spy) = service_with(true);
    *spy.fail_set_fusion.lock() = Some(result::NOT_IMPLEMENTED);

    let params = HandleWithSession {
        handle: joy_handle(1, 0),
        session: SessionId(42),
    }
    .encode();
    let resp = svc
        .handle_request(&Request::new(opcode::RESET_MOTION_FUSION_PARAMETERS, params))
        .unwrap();
    assert_eq!(resp.result, result::NOT_IMPLEMENTED);
    assert_eq!(spy.call_count(), 1);
}

#[test]
fn vibration_permission_round_trips_through_master_volume() {
    let (svc, _) = service_with(true);

    let permit = |value: bool| {
        svc.handle_request(&Request::new(
            opcode::PERMIT_VIBRATION,
            Bool32Param { value }.encode(),
        ))
        .unwrap()
    };
    let is_permitted = || {
        let resp = svc
            .handle_request(&Request::new(opcode::IS_VIBRATION_PERMITTED, Vec::new()))
            .unwrap();
        resp.params == vec![1, 0, 0, 0]
    };

    assert!(permit(true).result.is_success());
    assert!(is_permitted());
    assert!(permit(false).result.is_success());
    assert!(!is_permitted());
}

#[test]
fn device_lists_of_one_session_share_the_registry() {
    let (svc, spy) = service_with(true);
    let (_, list_a) = svc.create_active_device_list();
    let (_, list_b) = svc.create_active_device_list();

    let req = Request::new(
        opcode::device_list::ACTIVATE_VIBRATION_DEVICE,
        joy_handle(1, 0).encode(),
    );
    assert!(list_a.handle_request(&req).unwrap().result.is_success());
    assert!(list_b.handle_request(&req).unwrap().result.is_success());

    assert_eq!(spy.calls(), vec!["activate_vibration_device:1:0".to_string()]);
    assert_eq!(svc.registry().len(), 1);
    assert_eq!(list_b.active_count(), 1);
}

#[test]
fn created_list_handle_is_backed_by_a_dispatchable_object() {
    let (svc, spy) = service_with(true);
    let resp = svc
        .handle_request(&Request::new(
            opcode::CREATE_ACTIVE_VIBRATION_DEVICE_LIST,
            Vec::new(),
        ))
        .unwrap();
    assert!(resp.result.is_success());

    let list = svc.device_list(resp.handles[0]).unwrap();
    let req = Request::new(
        opcode::device_list::ACTIVATE_VIBRATION_DEVICE,
        joy_handle(2, 1).encode(),
    );
    assert!(list.handle_request(&req).unwrap().result.is_success());
    assert_eq!(spy.calls(), vec!["activate_vibration_device:2:1".to_string()]);
    assert_eq!(svc.registry().len(), 1);
}

#[test]
fn registry_capacity_is_a_construction_parameter() {
    let spy = Arc::new(SpyResources::default());
    let resource: Arc<dyn ResourceManager> = spy.clone();
    let svc = PadService::with_capacity(
        resource,
        Arc::new(StaticFirmwarePolicy::managed(true)),
        padhal_service::HandleValidator::with_defaults(),
        1,
    );

    let (_, list) = svc.create_active_device_list();
    let activate = |handle: DeviceHandle| {
        list.handle_request(&Request::new(
            opcode::device_list::ACTIVATE_VIBRATION_DEVICE,
            handle.encode(),
        ))
        .unwrap()
        .result
    };

    assert!(activate(joy_handle(1, 0)).is_success());
    assert_eq!(activate(joy_handle(2, 0)), result::ACTIVE_DEVICE_LIST_FULL);
    // repeats still succeed at capacity
    assert!(activate(joy_handle(1, 0)).is_success());
    assert_eq!(spy.call_count(), 1);
}

#[test]
fn dispatch_is_reusable_across_service_object_types() {
    // the same dispatcher drives any table-bearing object
    struct Probe;
    fn probe(_: &Probe, _: &Request) -> Result<padhal_wire::Response, padhal_wire::WireError> {
        Ok(padhal_wire::Response::success())
    }
    fn names(_: u32) -> &'static str {
        "Probe"
    }

    let table = CommandTable::new("Probe", names).implemented(0, 0, probe);
    let resp = dispatch(&Probe, &table, &Request::new(0, Vec::new())).unwrap();
    assert!(resp.result.is_success());
}

//! External collaborator interfaces
//!
//! The service never owns device state machines; it reaches them through
//! [`ResourceManager`], and consults [`FirmwarePolicy`] before issuing
//! low-level activations. Delegate errors are opaque result codes and are
//! relayed to clients unmodified.

use padhal_wire::{
    result, DeviceHandle, FusionParameters, GyroscopeZeroDriftMode, PadId, ResourceHandle,
    ResultCode, SessionId, StyleSet, VibrationDeviceInfo, VibrationValue,
};

/// Result of a delegate call: unit or a value, or an opaque result code
pub type DelegateResult<T = ()> = Result<T, ResultCode>;

/// Device classes activated as a whole rather than per endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    DebugPad,
    TouchScreen,
    Mouse,
    Keyboard,
    Gesture,
}

/// Protocol revision a client activates controllers against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum PadRevision {
    #[default]
    Revision0 = 0,
    Revision1 = 1,
    Revision2 = 2,
    Revision3 = 3,
}

impl PadRevision {
    /// Convert from the wire word; unknown revisions fall back to 0
    pub fn from_wire(v: u32) -> Self {
        match v {
            1 => Self::Revision1,
            2 => Self::Revision2,
            3 => Self::Revision3,
            _ => Self::Revision0,
        }
    }
}

/// Firmware/managed-mode policy
///
/// When devices are centrally managed the global activation step is
/// already done elsewhere and must not be repeated here.
pub trait FirmwarePolicy: Send + Sync {
    fn is_device_managed(&self) -> bool;
}

/// Fixed policy answer, for construction-time configuration and tests
#[derive(Debug, Clone, Copy)]
pub struct StaticFirmwarePolicy {
    managed: bool,
}

impl StaticFirmwarePolicy {
    pub fn managed(managed: bool) -> Self {
        Self { managed }
    }
}

impl FirmwarePolicy for StaticFirmwarePolicy {
    fn is_device_managed(&self) -> bool {
        self.managed
    }
}

/// Owner of the per-device state machines and physical activation logic
///
/// Every method has a "not supported" default so implementations (and
/// test doubles) only provide what they actually back. The service
/// relays any error code verbatim.
#[allow(unused_variables)]
pub trait ResourceManager: Send + Sync {
    /// Create the per-session shared resource, returning its object handle
    fn create_session_resource(&self, session: SessionId) -> DelegateResult<ResourceHandle> {
        Err(result::NOT_IMPLEMENTED)
    }

    /// Activate a device class globally (unmanaged firmware path)
    fn activate(&self, class: DeviceClass) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    /// Activate a device class for one session
    fn activate_for_session(&self, class: DeviceClass, session: SessionId) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    /// Activate the controller subsystem for one session at a revision
    fn activate_pads(&self, session: SessionId, revision: PadRevision) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    fn set_supported_style_set(&self, session: SessionId, styles: StyleSet) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    fn supported_style_set(&self, session: SessionId) -> DelegateResult<StyleSet> {
        Err(result::NOT_IMPLEMENTED)
    }

    fn set_supported_pad_ids(&self, session: SessionId, ids: &[PadId]) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    /// Event handle signalled when a pad's style set changes
    fn style_set_update_event(
        &self,
        pad_id: PadId,
        session: SessionId,
    ) -> DelegateResult<ResourceHandle> {
        Err(result::NOT_IMPLEMENTED)
    }

    /// Player LED bit pattern for a logical pad
    fn player_led_pattern(&self, pad_id: PadId) -> DelegateResult<u64> {
        Err(result::NOT_IMPLEMENTED)
    }

    fn set_motion_enabled(&self, handle: DeviceHandle, enabled: bool) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    fn is_motion_fusion_enabled(&self, handle: DeviceHandle) -> DelegateResult<bool> {
        Err(result::NOT_IMPLEMENTED)
    }

    fn set_motion_fusion_enabled(&self, handle: DeviceHandle, enabled: bool) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    fn set_fusion_parameters(
        &self,
        handle: DeviceHandle,
        params: FusionParameters,
    ) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    fn fusion_parameters(&self, handle: DeviceHandle) -> DelegateResult<FusionParameters> {
        Err(result::NOT_IMPLEMENTED)
    }

    fn set_gyroscope_zero_drift_mode(
        &self,
        handle: DeviceHandle,
        mode: GyroscopeZeroDriftMode,
    ) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    fn gyroscope_zero_drift_mode(
        &self,
        handle: DeviceHandle,
    ) -> DelegateResult<GyroscopeZeroDriftMode> {
        Err(result::NOT_IMPLEMENTED)
    }

    /// Whether the motion sensor currently reads as stationary
    fn is_motion_at_rest(&self, handle: DeviceHandle) -> bool {
        false
    }

    fn vibration_device_info(&self, handle: DeviceHandle) -> DelegateResult<VibrationDeviceInfo> {
        Err(result::NOT_IMPLEMENTED)
    }

    fn send_vibration_value(
        &self,
        session: SessionId,
        handle: DeviceHandle,
        value: VibrationValue,
    ) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    /// Physically activate one vibration endpoint
    fn activate_vibration_device(&self, handle: DeviceHandle) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    fn set_vibration_master_volume(&self, volume: f32) -> DelegateResult {
        Err(result::NOT_IMPLEMENTED)
    }

    fn vibration_master_volume(&self) -> DelegateResult<f32> {
        Err(result::NOT_IMPLEMENTED)
    }
}

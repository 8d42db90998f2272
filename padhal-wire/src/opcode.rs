//! Operation codes
//!
//! Opcodes are stable across protocol revisions and never reused for a
//! different meaning; gaps in the numbering are operations this service
//! does not carry. Constants cover every opcode registered in the main
//! dispatch table, including retired and unbound ones.

/// Returns a per-session resource object handle
pub const CREATE_SESSION_RESOURCE: u32 = 0;
pub const ACTIVATE_DEBUG_PAD: u32 = 1;
pub const ACTIVATE_TOUCH_SCREEN: u32 = 11;
pub const ACTIVATE_MOUSE: u32 = 21;
/// Never bound in any known revision
pub const ACTIVATE_DEBUG_MOUSE: u32 = 26;
pub const ACTIVATE_KEYBOARD: u32 = 31;
/// Retired; still acknowledged for old clients
pub const SEND_KEYBOARD_LOCK_KEY_EVENT: u32 = 32;
pub const ACQUIRE_PAD_GROUP_ID_EVENT: u32 = 40;
pub const RELEASE_PAD_GROUP_ID_EVENT: u32 = 41;
pub const ACTIVATE_BASIC_PAD: u32 = 51;
/// Hardcoded id list since protocol revision 10
pub const GET_BASIC_PAD_IDS: u32 = 55;
pub const ACTIVATE_JOINED_PAD: u32 = 56;
pub const GET_JOINED_PAD_IDS: u32 = 59;
pub const ACTIVATE_MOTION_SENSOR_LEGACY: u32 = 60;
pub const DEACTIVATE_MOTION_SENSOR_LEGACY: u32 = 61;
pub const START_MOTION_SENSOR: u32 = 66;
pub const STOP_MOTION_SENSOR: u32 = 67;
pub const IS_MOTION_FUSION_ENABLED: u32 = 68;
pub const ENABLE_MOTION_FUSION: u32 = 69;
pub const SET_MOTION_FUSION_PARAMETERS: u32 = 70;
pub const GET_MOTION_FUSION_PARAMETERS: u32 = 71;
pub const RESET_MOTION_FUSION_PARAMETERS: u32 = 72;
pub const SET_ACCELEROMETER_PARAMETERS: u32 = 73;
pub const GET_ACCELEROMETER_PARAMETERS: u32 = 74;
pub const RESET_ACCELEROMETER_PARAMETERS: u32 = 75;
pub const SET_ACCELEROMETER_PLAY_MODE: u32 = 76;
pub const GET_ACCELEROMETER_PLAY_MODE: u32 = 77;
pub const RESET_ACCELEROMETER_PLAY_MODE: u32 = 78;
pub const SET_GYROSCOPE_ZERO_DRIFT_MODE: u32 = 79;
pub const GET_GYROSCOPE_ZERO_DRIFT_MODE: u32 = 80;
pub const RESET_GYROSCOPE_ZERO_DRIFT_MODE: u32 = 81;
pub const IS_MOTION_SENSOR_AT_REST: u32 = 82;
pub const ACTIVATE_GESTURE: u32 = 91;
pub const SET_SUPPORTED_STYLE_SET: u32 = 100;
pub const GET_SUPPORTED_STYLE_SET: u32 = 101;
pub const SET_SUPPORTED_PAD_IDS: u32 = 102;
pub const ACTIVATE_PAD: u32 = 103;
/// No-op since protocol revision 10
pub const DEACTIVATE_PAD: u32 = 104;
pub const ACQUIRE_STYLE_SET_UPDATE_EVENT: u32 = 106;
pub const GET_PLAYER_LED_PATTERN: u32 = 108;
pub const ACTIVATE_PAD_WITH_REVISION: u32 = 109;
pub const GET_VIBRATION_DEVICE_INFO: u32 = 200;
pub const SEND_VIBRATION_VALUE: u32 = 201;
pub const CREATE_ACTIVE_VIBRATION_DEVICE_LIST: u32 = 203;
pub const PERMIT_VIBRATION: u32 = 204;
pub const IS_VIBRATION_PERMITTED: u32 = 205;
pub const SEND_VIBRATION_VALUES: u32 = 206;
/// Never bound in any known revision
pub const ACTIVATE_DIGITIZER: u32 = 2000;

/// Opcodes of the per-session active vibration device list object
pub mod device_list {
    pub const ACTIVATE_VIBRATION_DEVICE: u32 = 0;

    pub fn name(opcode: u32) -> &'static str {
        match opcode {
            ACTIVATE_VIBRATION_DEVICE => "ActivateVibrationDevice",
            _ => "Unknown",
        }
    }
}

/// Human-readable name for a main-table opcode
pub fn name(opcode: u32) -> &'static str {
    match opcode {
        CREATE_SESSION_RESOURCE => "CreateSessionResource",
        ACTIVATE_DEBUG_PAD => "ActivateDebugPad",
        ACTIVATE_TOUCH_SCREEN => "ActivateTouchScreen",
        ACTIVATE_MOUSE => "ActivateMouse",
        ACTIVATE_DEBUG_MOUSE => "ActivateDebugMouse",
        ACTIVATE_KEYBOARD => "ActivateKeyboard",
        SEND_KEYBOARD_LOCK_KEY_EVENT => "SendKeyboardLockKeyEvent",
        ACQUIRE_PAD_GROUP_ID_EVENT => "AcquirePadGroupIdEvent",
        RELEASE_PAD_GROUP_ID_EVENT => "ReleasePadGroupIdEvent",
        ACTIVATE_BASIC_PAD => "ActivateBasicPad",
        GET_BASIC_PAD_IDS => "GetBasicPadIds",
        ACTIVATE_JOINED_PAD => "ActivateJoinedPad",
        GET_JOINED_PAD_IDS => "GetJoinedPadIds",
        ACTIVATE_MOTION_SENSOR_LEGACY => "ActivateMotionSensorLegacy",
        DEACTIVATE_MOTION_SENSOR_LEGACY => "DeactivateMotionSensorLegacy",
        START_MOTION_SENSOR => "StartMotionSensor",
        STOP_MOTION_SENSOR => "StopMotionSensor",
        IS_MOTION_FUSION_ENABLED => "IsMotionFusionEnabled",
        ENABLE_MOTION_FUSION => "EnableMotionFusion",
        SET_MOTION_FUSION_PARAMETERS => "SetMotionFusionParameters",
        GET_MOTION_FUSION_PARAMETERS => "GetMotionFusionParameters",
        RESET_MOTION_FUSION_PARAMETERS => "ResetMotionFusionParameters",
        SET_ACCELEROMETER_PARAMETERS => "SetAccelerometerParameters",
        GET_ACCELEROMETER_PARAMETERS => "GetAccelerometerParameters",
        RESET_ACCELEROMETER_PARAMETERS => "ResetAccelerometerParameters",
        SET_ACCELEROMETER_PLAY_MODE => "SetAccelerometerPlayMode",
        GET_ACCELEROMETER_PLAY_MODE => "GetAccelerometerPlayMode",
        RESET_ACCELEROMETER_PLAY_MODE => "ResetAccelerometerPlayMode",
        SET_GYROSCOPE_ZERO_DRIFT_MODE => "SetGyroscopeZeroDriftMode",
        GET_GYROSCOPE_ZERO_DRIFT_MODE => "GetGyroscopeZeroDriftMode",
        RESET_GYROSCOPE_ZERO_DRIFT_MODE => "ResetGyroscopeZeroDriftMode",
        IS_MOTION_SENSOR_AT_REST => "IsMotionSensorAtRest",
        ACTIVATE_GESTURE => "ActivateGesture",
        SET_SUPPORTED_STYLE_SET => "SetSupportedStyleSet",
        GET_SUPPORTED_STYLE_SET => "GetSupportedStyleSet",
        SET_SUPPORTED_PAD_IDS => "SetSupportedPadIds",
        ACTIVATE_PAD => "ActivatePad",
        DEACTIVATE_PAD => "DeactivatePad",
        ACQUIRE_STYLE_SET_UPDATE_EVENT => "AcquireStyleSetUpdateEvent",
        GET_PLAYER_LED_PATTERN => "GetPlayerLedPattern",
        ACTIVATE_PAD_WITH_REVISION => "ActivatePadWithRevision",
        GET_VIBRATION_DEVICE_INFO => "GetVibrationDeviceInfo",
        SEND_VIBRATION_VALUE => "SendVibrationValue",
        CREATE_ACTIVE_VIBRATION_DEVICE_LIST => "CreateActiveVibrationDeviceList",
        PERMIT_VIBRATION => "PermitVibration",
        IS_VIBRATION_PERMITTED => "IsVibrationPermitted",
        SEND_VIBRATION_VALUES => "SendVibrationValues",
        ACTIVATE_DIGITIZER => "ActivateDigitizer",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cover_known_opcodes() {
        assert_eq!(name(GET_BASIC_PAD_IDS), "GetBasicPadIds");
        assert_eq!(name(CREATE_ACTIVE_VIBRATION_DEVICE_LIST), "CreateActiveVibrationDeviceList");
        assert_eq!(name(9999), "Unknown");
    }
}

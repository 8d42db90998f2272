//! Domain values carried on the wire

use std::fmt;

use crate::codec::{ParamBlock, ParamReader, ParamWriter};
use crate::error::WireError;

/// Opaque per-client session token
///
/// Scopes state per caller; the service never interprets its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bitset of controller styles a client supports, passed through opaquely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleSet(pub u32);

/// One vibration sample: low and high actuator amplitude/frequency pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibrationValue {
    pub amp_low: f32,
    pub freq_low: f32,
    pub amp_high: f32,
    pub freq_high: f32,
}

impl VibrationValue {
    /// Stopped value: zero amplitude at the actuators' resonant frequencies
    pub const STOPPED: VibrationValue = VibrationValue {
        amp_low: 0.0,
        freq_low: 160.0,
        amp_high: 0.0,
        freq_high: 320.0,
    };
}

impl Default for VibrationValue {
    fn default() -> Self {
        Self::STOPPED
    }
}

impl ParamBlock for VibrationValue {
    const SIZE: usize = 16;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        Ok(Self {
            amp_low: r.read_f32()?,
            freq_low: r.read_f32()?,
            amp_high: r.read_f32()?,
            freq_high: r.read_f32()?,
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_f32(self.amp_low);
        w.write_f32(self.freq_low);
        w.write_f32(self.amp_high);
        w.write_f32(self.freq_high);
    }
}

/// Actuator technology reported for a vibration endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum VibrationDeviceType {
    #[default]
    Unknown = 0,
    LinearResonantActuator = 1,
    GcErm = 2,
}

impl VibrationDeviceType {
    pub fn from_wire(v: u32) -> Self {
        match v {
            1 => Self::LinearResonantActuator,
            2 => Self::GcErm,
            _ => Self::Unknown,
        }
    }
}

/// Physical placement of a vibration endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum VibrationDevicePosition {
    #[default]
    None = 0,
    Left = 1,
    Right = 2,
}

impl VibrationDevicePosition {
    pub fn from_wire(v: u32) -> Self {
        match v {
            1 => Self::Left,
            2 => Self::Right,
            _ => Self::None,
        }
    }
}

/// Static description of one vibration endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VibrationDeviceInfo {
    pub device_type: VibrationDeviceType,
    pub position: VibrationDevicePosition,
}

impl ParamBlock for VibrationDeviceInfo {
    const SIZE: usize = 8;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        Ok(Self {
            device_type: VibrationDeviceType::from_wire(r.read_u32()?),
            position: VibrationDevicePosition::from_wire(r.read_u32()?),
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_u32(self.device_type as u32);
        w.write_u32(self.position as u32);
    }
}

/// Reset default for the first motion fusion coefficient
///
/// Matches what the hardware reports after a reset; the physical meaning
/// of the two coefficients is not documented by the vendor.
pub const DEFAULT_FUSION_PARAMETER1: f32 = 0.03;

/// Reset default for the second motion fusion coefficient
pub const DEFAULT_FUSION_PARAMETER2: f32 = 0.4;

/// Motion sensor fusion coefficients
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FusionParameters {
    pub parameter1: f32,
    pub parameter2: f32,
}

impl FusionParameters {
    /// Values installed by a fusion-parameter reset
    pub const RESET: FusionParameters = FusionParameters {
        parameter1: DEFAULT_FUSION_PARAMETER1,
        parameter2: DEFAULT_FUSION_PARAMETER2,
    };
}

impl ParamBlock for FusionParameters {
    const SIZE: usize = 8;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        Ok(Self {
            parameter1: r.read_f32()?,
            parameter2: r.read_f32()?,
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_f32(self.parameter1);
        w.write_f32(self.parameter2);
    }
}

/// Gyroscope zero drift compensation strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum GyroscopeZeroDriftMode {
    Loose = 0,
    #[default]
    Standard = 1,
    Tight = 2,
}

impl GyroscopeZeroDriftMode {
    /// Convert from the wire word; unknown values fall back to `Standard`
    pub fn from_wire(v: u32) -> Self {
        match v {
            0 => Self::Loose,
            2 => Self::Tight,
            _ => Self::Standard,
        }
    }

    pub fn wire(self) -> u32 {
        self as u32
    }
}

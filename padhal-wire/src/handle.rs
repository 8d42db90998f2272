//! Device handles and logical pad identifiers
//!
//! A [`DeviceHandle`] names one controllable endpoint (for example one
//! vibration motor on one logical controller). The three fields together
//! are the handle's whole identity: two handles are the same endpoint iff
//! kind, logical id, and sub-index all match.

use crate::codec::{ParamBlock, ParamReader, ParamWriter};
use crate::error::WireError;

/// Controller style a handle belongs to
///
/// Wire values follow the original protocol's style index. Kinds with a
/// left and a right endpoint accept sub-index 0 and 1; single-endpoint
/// kinds accept only 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeviceKind {
    FullKey = 3,
    Handheld = 4,
    JoyDual = 5,
    JoyLeft = 6,
    JoyRight = 7,
    GameCube = 8,
    Palma = 9,
    Lark = 10,
    SystemExt = 32,
    System = 33,
}

impl DeviceKind {
    pub fn from_wire(v: u8) -> Option<Self> {
        match v {
            3 => Some(Self::FullKey),
            4 => Some(Self::Handheld),
            5 => Some(Self::JoyDual),
            6 => Some(Self::JoyLeft),
            7 => Some(Self::JoyRight),
            8 => Some(Self::GameCube),
            9 => Some(Self::Palma),
            10 => Some(Self::Lark),
            32 => Some(Self::SystemExt),
            33 => Some(Self::System),
            _ => None,
        }
    }

    pub fn wire(self) -> u8 {
        self as u8
    }

    /// Highest valid sub-index for this kind
    pub fn max_sub_index(self) -> u8 {
        match self {
            // Left + right endpoint pairs
            Self::FullKey | Self::Handheld | Self::JoyDual => 1,
            // Single endpoint
            Self::JoyLeft
            | Self::JoyRight
            | Self::GameCube
            | Self::Palma
            | Self::Lark
            | Self::SystemExt
            | Self::System => 0,
        }
    }
}

/// Logical controller identifier
///
/// Valid ids are players 1-8 plus the two reserved slots below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PadId(pub u32);

impl PadId {
    pub const PLAYER_1: PadId = PadId(0);
    pub const PLAYER_8: PadId = PadId(7);
    /// Pooled/other controller slot
    pub const OTHER: PadId = PadId(0x10);
    /// Built-in handheld controls
    pub const HANDHELD: PadId = PadId(0x20);

    pub fn is_valid(self) -> bool {
        self.0 <= Self::PLAYER_8.0 || self == Self::OTHER || self == Self::HANDHELD
    }
}

impl ParamBlock for PadId {
    const SIZE: usize = 4;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        Ok(PadId(r.read_u32()?))
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_u32(self.0);
    }
}

/// Composite key naming one controllable endpoint
///
/// Equality over all three fields is the sole identity criterion; there
/// is no separate object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle {
    /// Controller style (raw wire byte, see [`DeviceKind`])
    pub kind: u8,
    /// Logical controller id (low byte of a [`PadId`])
    pub logical_id: u8,
    /// Endpoint index within the device (e.g. left/right motor)
    pub sub_index: u8,
}

impl DeviceHandle {
    pub fn new(kind: DeviceKind, logical_id: u8, sub_index: u8) -> Self {
        Self {
            kind: kind.wire(),
            logical_id,
            sub_index,
        }
    }

    /// Typed view of the kind byte, if it names a known style
    pub fn device_kind(&self) -> Option<DeviceKind> {
        DeviceKind::from_wire(self.kind)
    }

    /// Logical id widened to a pad identifier
    pub fn pad_id(&self) -> PadId {
        PadId(u32::from(self.logical_id))
    }
}

impl ParamBlock for DeviceHandle {
    // kind, logical id, sub-index, one padding byte
    const SIZE: usize = 4;

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = ParamReader::new(bytes, Self::SIZE)?;
        let kind = r.read_u8()?;
        let logical_id = r.read_u8()?;
        let sub_index = r.read_u8()?;
        r.skip(1)?;
        Ok(Self {
            kind,
            logical_id,
            sub_index,
        })
    }

    fn encode_into(&self, w: &mut ParamWriter) {
        w.write_u8(self.kind);
        w.write_u8(self.logical_id);
        w.write_u8(self.sub_index);
        w.pad(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_field_wise() {
        let a = DeviceHandle::new(DeviceKind::JoyDual, 2, 1);
        let b = DeviceHandle {
            kind: 5,
            logical_id: 2,
            sub_index: 1,
        };
        assert_eq!(a, b);

        let c = DeviceHandle::new(DeviceKind::JoyDual, 2, 0);
        assert_ne!(a, c);
    }

    #[test]
    fn round_trip() {
        let handle = DeviceHandle::new(DeviceKind::FullKey, 3, 1);
        let bytes = handle.encode();
        assert_eq!(bytes.len(), DeviceHandle::SIZE);
        assert_eq!(DeviceHandle::decode(&bytes).unwrap(), handle);
    }

    #[test]
    fn decode_rejects_short_block() {
        assert!(matches!(
            DeviceHandle::decode(&[3, 0, 0]),
            Err(WireError::BlockSizeMismatch { .. })
        ));
    }

    #[test]
    fn sub_index_ranges_follow_kind() {
        assert_eq!(DeviceKind::JoyDual.max_sub_index(), 1);
        assert_eq!(DeviceKind::JoyLeft.max_sub_index(), 0);
        assert_eq!(DeviceKind::GameCube.max_sub_index(), 0);
    }

    #[test]
    fn pad_id_validity() {
        assert!(PadId(0).is_valid());
        assert!(PadId(7).is_valid());
        assert!(PadId::OTHER.is_valid());
        assert!(PadId::HANDHELD.is_valid());
        assert!(!PadId(8).is_valid());
        assert!(!PadId(0x21).is_valid());
    }
}

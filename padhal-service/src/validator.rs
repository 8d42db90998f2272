//! Device handle validation
//!
//! Validation is pure and stateless: a handle is judged only against the
//! configured ranges, never against what is currently connected or
//! activated.

use padhal_wire::{DeviceHandle, PadId};

/// Configured ranges a device handle must fall inside
///
/// All three fields must pass: a known device kind, an accepted logical
/// pad id, and a sub-index within the kind's endpoint count.
#[derive(Debug, Clone)]
pub struct HandleValidator {
    accepted: Vec<PadId>,
}

impl HandleValidator {
    /// Validator accepting the standard id set: players 1-8, the pooled
    /// slot, and the handheld slot
    pub fn with_defaults() -> Self {
        let mut accepted: Vec<PadId> = (PadId::PLAYER_1.0..=PadId::PLAYER_8.0).map(PadId).collect();
        accepted.push(PadId::OTHER);
        accepted.push(PadId::HANDHELD);
        Self { accepted }
    }

    /// Validator accepting only the given pad ids
    pub fn with_accepted_ids(accepted: Vec<PadId>) -> Self {
        Self { accepted }
    }

    pub fn is_valid(&self, handle: DeviceHandle) -> bool {
        let Some(kind) = handle.device_kind() else {
            return false;
        };
        if !self.accepted.contains(&handle.pad_id()) {
            return false;
        }
        handle.sub_index <= kind.max_sub_index()
    }
}

impl Default for HandleValidator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padhal_wire::DeviceKind;

    #[test]
    fn accepts_in_range_handles() {
        let v = HandleValidator::with_defaults();
        assert!(v.is_valid(DeviceHandle::new(DeviceKind::JoyDual, 0, 0)));
        assert!(v.is_valid(DeviceHandle::new(DeviceKind::JoyDual, 7, 1)));
        assert!(v.is_valid(DeviceHandle::new(DeviceKind::Handheld, 0x20, 1)));
        assert!(v.is_valid(DeviceHandle::new(DeviceKind::JoyLeft, 0x10, 0)));
    }

    #[test]
    fn rejects_unknown_kind() {
        let v = HandleValidator::with_defaults();
        let handle = DeviceHandle {
            kind: 0xFF,
            logical_id: 0,
            sub_index: 0,
        };
        assert!(!v.is_valid(handle));
    }

    #[test]
    fn rejects_out_of_range_logical_id() {
        let v = HandleValidator::with_defaults();
        // 8 is past player 8 and not a reserved slot
        assert!(!v.is_valid(DeviceHandle::new(DeviceKind::JoyDual, 8, 0)));
        assert!(!v.is_valid(DeviceHandle::new(DeviceKind::JoyDual, 0x21, 0)));
    }

    #[test]
    fn sub_index_bound_depends_on_kind() {
        let v = HandleValidator::with_defaults();
        assert!(v.is_valid(DeviceHandle::new(DeviceKind::FullKey, 1, 1)));
        assert!(!v.is_valid(DeviceHandle::new(DeviceKind::FullKey, 1, 2)));
        assert!(!v.is_valid(DeviceHandle::new(DeviceKind::JoyRight, 1, 1)));
    }

    #[test]
    fn custom_id_set_narrows_acceptance() {
        let v = HandleValidator::with_accepted_ids(vec![PadId::PLAYER_1]);
        assert!(v.is_valid(DeviceHandle::new(DeviceKind::JoyDual, 0, 0)));
        assert!(!v.is_valid(DeviceHandle::new(DeviceKind::JoyDual, 1, 0)));
    }
}

//! In-band result codes
//!
//! Every operation answers with a 32-bit result code: 0 is success,
//! anything else is a domain error. Codes pack a module number in the low
//! 9 bits and a description above it, matching the console convention the
//! service speaks.

use std::fmt;

/// 32-bit operation result carried in every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultCode(u32);

/// Module number for this service's own error codes
const MODULE_HID: u32 = 202;

impl ResultCode {
    pub const SUCCESS: ResultCode = ResultCode(0);

    /// Build a code from module and description fields
    pub const fn new(module: u32, description: u32) -> Self {
        ResultCode((description << 9) | module)
    }

    pub const fn from_raw(raw: u32) -> Self {
        ResultCode(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    pub const fn is_error(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

const fn hid_result(description: u32) -> ResultCode {
    ResultCode::new(MODULE_HID, description)
}

/// Opcode has no bound handler
pub const NOT_IMPLEMENTED: ResultCode = hid_result(1);

/// Device handle fields are outside the configured range
pub const INVALID_DEVICE_HANDLE: ResultCode = hid_result(601);

/// Activation registry is full for a genuinely new handle
pub const ACTIVE_DEVICE_LIST_FULL: ResultCode = hid_result(602);

/// Paired input buffers carry different element counts
pub const BUFFER_COUNT_MISMATCH: ResultCode = hid_result(603);

/// Logical pad identifier is not one of the supported ids
pub const INVALID_PAD_ID: ResultCode = hid_result(709);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_zero() {
        assert_eq!(ResultCode::SUCCESS.raw(), 0);
        assert!(ResultCode::SUCCESS.is_success());
        assert!(!ResultCode::SUCCESS.is_error());
    }

    #[test]
    fn codes_carry_module_and_description() {
        assert_eq!(NOT_IMPLEMENTED.raw() & 0x1FF, 202);
        assert_eq!(NOT_IMPLEMENTED.raw() >> 9, 1);
        assert_eq!(INVALID_PAD_ID.raw() >> 9, 709);
        assert!(INVALID_DEVICE_HANDLE.is_error());
    }
}

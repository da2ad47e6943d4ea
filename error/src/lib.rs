/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Error codes reported by the MCU ROM.

--*/

#![cfg_attr(not(test), no_std)]

use core::fmt;
use core::num::NonZeroU32;

/// ROM error code.
///
/// Codes are never zero so that a cleared register can never be mistaken
/// for a reported error.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct McuError(pub NonZeroU32);

pub type McuResult<T> = Result<T, McuError>;

impl McuError {
    /// Builds an error code in a const context.
    ///
    /// Panics at compile time if `val` is zero.
    pub const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("McuError cannot be 0"),
        }
    }

    pub const fn code(&self) -> u32 {
        self.0.get()
    }

    // OTP
    pub const ROM_OTP_READ_ERROR: McuError = McuError::new_const(0x0001_0001);

    // Fuse layouts
    pub const ROM_FUSE_LAYOUT_TOO_LARGE: McuError = McuError::new_const(0x0002_0001);
    pub const ROM_UNSUPPORTED_FUSE_LAYOUT: McuError = McuError::new_const(0x0002_0002);
    pub const ROM_FUSE_LAYOUT_LENGTH_MISMATCH: McuError = McuError::new_const(0x0002_0003);

    // SPHINCS+ signature verification
    pub const ROM_SIGVERIFY_SPX_BAD_SIGNATURE: McuError = McuError::new_const(0x0003_0001);
    pub const ROM_SIGVERIFY_SPX_UNEXPECTED_OUTCOME: McuError = McuError::new_const(0x0003_0002);
    pub const ROM_SIGVERIFY_SPX_INVALID_KEY: McuError = McuError::new_const(0x0003_0003);
    pub const ROM_SIGVERIFY_SPX_INVALID_SIGNATURE: McuError = McuError::new_const(0x0003_0004);
}

impl From<McuError> for NonZeroU32 {
    fn from(val: McuError) -> Self {
        val.0
    }
}

impl From<McuError> for u32 {
    fn from(val: McuError) -> Self {
        val.0.get()
    }
}

impl fmt::Debug for McuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "McuError(0x{:08x})", self.0.get())
    }
}

impl fmt::Display for McuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0.get())
    }
}

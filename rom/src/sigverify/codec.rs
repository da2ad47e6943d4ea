// Licensed under the Apache-2.0 license

use super::{launder32, SpxPolicy, SPX_DISABLED_OTP, SPX_FAILURE, SPX_SUCCESS};
use crate::fmt::HexWord;
use mcu_error::{McuError, McuResult};

/// Converts a verification outcome word into a canonical status.
///
/// Only exact sentinel matches are accepted: `SPX_SUCCESS`, or
/// `SPX_DISABLED_OTP` while `policy` is the disabled policy. Every other
/// word, including `0`, all ones and the generic ok code, is an error.
pub fn spx_success_to_ok(raw: u32, policy: SpxPolicy) -> McuResult<()> {
    let raw = launder32(raw);
    match raw {
        SPX_SUCCESS => Ok(()),
        SPX_DISABLED_OTP if launder32(policy.word()) == SPX_DISABLED_OTP => Ok(()),
        SPX_FAILURE => Err(McuError::ROM_SIGVERIFY_SPX_BAD_SIGNATURE),
        _ => {
            log::error!(
                "[mcu-rom-spx] Unexpected verification outcome {} (policy {})",
                HexWord(raw),
                HexWord(policy.word())
            );
            Err(McuError::ROM_SIGVERIFY_SPX_UNEXPECTED_OUTCOME)
        }
    }
}

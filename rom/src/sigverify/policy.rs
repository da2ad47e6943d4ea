// Licensed under the Apache-2.0 license

use super::{launder32, SPX_DISABLED_OTP, SPX_SUCCESS};
use crate::config::SpxConfig;
use crate::fmt::HexWord;
use crate::lifecycle::LifecycleState;
use crate::otp::{read_entry, OtpRead};
use core::fmt;
use mcu_error::McuResult;

/// Whether SPHINCS+ verification is enforced during this boot stage.
///
/// Holds one of exactly two words: `SPX_SUCCESS` (enforced) or
/// `SPX_DISABLED_OTP` (disabled). The value is created once per boot stage
/// and passed into every verification.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct SpxPolicy(u32);

impl SpxPolicy {
    pub const fn enabled() -> Self {
        SpxPolicy(SPX_SUCCESS)
    }

    pub const fn disabled() -> Self {
        SpxPolicy(SPX_DISABLED_OTP)
    }

    /// Only the exact disabled word turns verification off; a blank or
    /// corrupted field keeps it on.
    pub fn from_otp_word(word: u32) -> Self {
        if launder32(word) == SPX_DISABLED_OTP {
            Self::disabled()
        } else {
            Self::enabled()
        }
    }

    /// Reads the SPHINCS+ enable field from OTP.
    pub fn from_otp(otp: &dyn OtpRead, config: &SpxConfig) -> McuResult<Self> {
        let word = read_entry(otp, config.spx_en_word_addr, config.spx_en_layout)?;
        Ok(Self::from_otp_word(word))
    }

    pub fn enable(&mut self) {
        self.0 = SPX_SUCCESS;
    }

    pub fn disable(&mut self) {
        self.0 = SPX_DISABLED_OTP;
    }

    /// Raw policy word.
    pub fn word(&self) -> u32 {
        self.0
    }

    pub fn is_disabled(&self) -> bool {
        launder32(self.0) == SPX_DISABLED_OTP
    }

    /// Returns the policy word in effect and logs whether checking is on.
    ///
    /// `lc_state` is only reported; it does not change the policy.
    pub fn query(&self, lc_state: LifecycleState) -> u32 {
        if self.is_disabled() {
            log::info!("[mcu-rom-spx] spx_verify is disabled (lifecycle {:?})", lc_state);
            if lc_state.is_production() {
                log::warn!("[mcu-rom-spx] spx_verify disabled in a production lifecycle state");
            }
        } else {
            log::info!("[mcu-rom-spx] spx_verify is enabled (lifecycle {:?})", lc_state);
        }
        log::debug!("[mcu-rom-spx] policy word {}", HexWord(self.0));
        self.0
    }
}

impl fmt::Debug for SpxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SpxPolicy").field(&HexWord(self.0)).finish()
    }
}

impl Default for SpxPolicy {
    fn default() -> Self {
        Self::enabled()
    }
}

// Licensed under the Apache-2.0 license

use crate::fuse_layout::{Duplication, FuseLayout};

/// Word address of the SPHINCS+ enable field in the creator SW config partition.
pub const SPX_EN_OTP_WORD_ADDR: usize = 0x1a4;

/// Where the ROM finds its signature-verification settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpxConfig {
    /// OTP word address of the SPHINCS+ enable field.
    pub spx_en_word_addr: usize,
    /// How the enable field is laid out in OTP.
    pub spx_en_layout: FuseLayout,
}

impl SpxConfig {
    pub const fn new(spx_en_word_addr: usize, spx_en_layout: FuseLayout) -> Self {
        SpxConfig {
            spx_en_word_addr,
            spx_en_layout,
        }
    }
}

impl Default for SpxConfig {
    fn default() -> Self {
        SpxConfig::new(
            SPX_EN_OTP_WORD_ADDR,
            FuseLayout::WordMajorityVote(Duplication::new(3)),
        )
    }
}

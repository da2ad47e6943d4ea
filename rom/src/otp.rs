// Licensed under the Apache-2.0 license

use crate::fmt::HexWord;
use crate::fuse_layout::{extract_word, FuseLayout};
use mcu_error::{McuError, McuResult};

/// Largest number of copies a single OTP field may be stored with.
const MAX_FIELD_WORDS: usize = 7;

/// Word-granular read access to OTP.
///
/// Implemented by the platform's OTP controller driver.
pub trait OtpRead {
    /// Reads a word from OTP.
    /// word_addr is in words
    fn read_word(&self, word_addr: usize) -> McuResult<u32>;
}

/// OTP contents held in memory, e.g. a shadow copy taken at reset.
pub struct OtpImage<'a> {
    words: &'a [u32],
}

impl<'a> OtpImage<'a> {
    pub const fn new(words: &'a [u32]) -> Self {
        OtpImage { words }
    }
}

impl OtpRead for OtpImage<'_> {
    fn read_word(&self, word_addr: usize) -> McuResult<u32> {
        match self.words.get(word_addr) {
            Some(word) => Ok(*word),
            None => {
                log::error!(
                    "[mcu-rom-otp] Read past end of OTP image: {}",
                    HexWord(word_addr as u32)
                );
                Err(McuError::ROM_OTP_READ_ERROR)
            }
        }
    }
}

/// Reads a field starting at `word_addr` and collapses its copies according
/// to `layout`.
pub fn read_entry(otp: &dyn OtpRead, word_addr: usize, layout: FuseLayout) -> McuResult<u32> {
    let len = layout.raw_words();
    if len > MAX_FIELD_WORDS {
        return Err(McuError::ROM_FUSE_LAYOUT_TOO_LARGE);
    }
    let mut raw = [0u32; MAX_FIELD_WORDS];
    for (i, word) in raw[..len].iter_mut().enumerate() {
        *word = otp.read_word(word_addr + i)?;
    }
    extract_word(layout, &raw[..len])
}

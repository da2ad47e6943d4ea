// Licensed under the Apache-2.0 license

use core::num::NonZero;
use mcu_error::{McuError, McuResult};

/// Number of copies of a word stored in OTP.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Duplication(pub NonZero<usize>);

impl Duplication {
    pub const fn new(count: usize) -> Self {
        match NonZero::new(count) {
            Some(count) => Duplication(count),
            None => panic!("Duplication cannot be 0"),
        }
    }
}

/// Layout of a 32-bit configuration word in OTP.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FuseLayout {
    /// Value is stored literally
    Single,
    /// The word is stored several times and each bit of the result is the
    /// majority vote of that bit across the copies,
    /// e.g., [0b100, 0b110, 0b111] -> 0b110
    WordMajorityVote(Duplication),
}

impl FuseLayout {
    /// Number of raw OTP words the field occupies.
    pub const fn raw_words(&self) -> usize {
        match self {
            FuseLayout::Single => 1,
            FuseLayout::WordMajorityVote(Duplication(dupe)) => dupe.get(),
        }
    }
}

/// Collapses a slice of words into a single word via majority vote.
fn extract_majority_vote_words(words: &[u32]) -> u32 {
    if words.is_empty() {
        return 0;
    }
    let half = words.len().div_ceil(2) as u32;
    let mut counts = [0u32; 32];
    for &word in words {
        for (i, count) in counts.iter_mut().enumerate() {
            *count += (word >> i) & 1;
        }
    }
    let mut result = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count >= half {
            result |= 1 << i;
        }
    }
    result
}

/// Collapses the raw OTP words of a field into its logical value.
///
/// `raw` must hold exactly `layout.raw_words()` words. Majority votes need an
/// odd number of copies; an even count could tie.
pub fn extract_word(layout: FuseLayout, raw: &[u32]) -> McuResult<u32> {
    if raw.len() != layout.raw_words() {
        return Err(McuError::ROM_FUSE_LAYOUT_LENGTH_MISMATCH);
    }
    match layout {
        FuseLayout::Single => Ok(raw[0]),
        FuseLayout::WordMajorityVote(Duplication(dupe)) if dupe.get() % 2 == 1 => {
            Ok(extract_majority_vote_words(raw))
        }
        FuseLayout::WordMajorityVote(_) => Err(McuError::ROM_UNSUPPORTED_FUSE_LAYOUT),
    }
}

// Licensed under the Apache-2.0 license

use super::{launder32, SpxRoot};

/// Compares two roots word by word.
///
/// Every word is folded into the difference before the single final check,
/// so the running time does not depend on where the roots differ.
pub fn roots_match(expected: &SpxRoot, actual: &SpxRoot) -> bool {
    let mut diff = 0u32;
    for (e, a) in expected.0.iter().zip(actual.0.iter()) {
        diff = launder32(diff | (e ^ a));
    }
    launder32(diff) == 0
}

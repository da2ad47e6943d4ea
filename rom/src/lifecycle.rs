// Licensed under the Apache-2.0 license

use num_enum::TryFromPrimitive;

/// Device life-cycle state as reported by the life-cycle controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive)]
#[repr(u32)]
pub enum LifecycleState {
    Raw = 0,
    TestUnlocked = 1,
    TestLocked = 2,
    Dev = 3,
    Prod = 4,
    ProdEnd = 5,
    Rma = 6,
    Scrap = 7,
}

impl LifecycleState {
    /// Decodes a raw state value. Unknown encodings yield `None`.
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Whether the device is in a mission-mode state.
    pub fn is_production(&self) -> bool {
        matches!(self, LifecycleState::Prod | LifecycleState::ProdEnd)
    }
}

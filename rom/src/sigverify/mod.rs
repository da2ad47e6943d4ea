/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    Hardened SPHINCS+ signature verification for the next boot stage.

    The gate reports two independent signals: a canonical status and a
    flash execution word. The boot stage must check the flash execution
    word before handing control to the verified image.

--*/

mod codec;
mod policy;
mod root;
mod verify;

pub use codec::spx_success_to_ok;
pub use policy::SpxPolicy;
pub use root::roots_match;
pub use verify::{sigverify_spx_verify, SpxVerifier};

use mcu_error::{McuError, McuResult};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Outcome word of a successful verification. Also the enabled policy word
/// and the flash execution word that authorizes the next stage.
pub const SPX_SUCCESS: u32 = 0x8d6c_8c17;

/// OTP value that turns SPHINCS+ verification off.
pub const SPX_DISABLED_OTP: u32 = 0x0c5c_7fd0;

/// Outcome word of a failed verification.
pub const SPX_FAILURE: u32 = !SPX_SUCCESS;

/// Flash execution word written when the next stage must not run.
pub const FLASH_EXEC_POISON: u32 = u32::MAX;

/// Generic "ok" status of the error catalog, reported by the primitive.
pub const ERROR_OK_WORD: u32 = 0x0000_0739;

pub const SPX_ROOT_NUM_WORDS: usize = 8;
pub const SPX_PUBLIC_KEY_NUM_WORDS: usize = 8;
pub const SPX_SIGNATURE_NUM_WORDS: usize = 1964;

/// Keeps the compiler from folding or reordering comparisons on `val`.
#[inline(always)]
pub(crate) fn launder32(val: u32) -> u32 {
    core::hint::black_box(val)
}

/// Root of the SPHINCS+ hypertree.
///
/// Deliberately not `PartialEq`: compare with [`roots_match`].
#[derive(Clone, Copy, Debug, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct SpxRoot(pub [u32; SPX_ROOT_NUM_WORDS]);

/// SPHINCS+ public key.
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct SpxPublicKey(pub [u32; SPX_PUBLIC_KEY_NUM_WORDS]);

impl SpxPublicKey {
    /// Copies a key out of its byte encoding.
    pub fn from_bytes(bytes: &[u8]) -> McuResult<Self> {
        Self::read_from_bytes(bytes).map_err(|_| McuError::ROM_SIGVERIFY_SPX_INVALID_KEY)
    }
}

/// SPHINCS+ signature.
#[derive(Clone, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct SpxSignature(pub [u32; SPX_SIGNATURE_NUM_WORDS]);

impl SpxSignature {
    /// Borrows a signature in place. `bytes` must be word aligned and exactly
    /// signature sized.
    pub fn from_bytes(bytes: &[u8]) -> McuResult<&Self> {
        Self::ref_from_bytes(bytes).map_err(|_| McuError::ROM_SIGVERIFY_SPX_INVALID_SIGNATURE)
    }
}

/// What the SPHINCS+ primitive reports for one verification.
#[derive(Clone, Copy, Debug)]
pub struct SpxPrimitiveOutput {
    /// Root recomputed from the signature.
    pub root: SpxRoot,
    /// The primitive's own status word; `ERROR_OK_WORD` on success.
    pub status: u32,
}

/// SPHINCS+ verification primitive.
///
/// Both operations must be deterministic.
pub trait SpxPrimitive {
    /// Root committed to by `key`.
    fn public_key_root(&self, key: &SpxPublicKey) -> SpxRoot;

    /// Recomputes the hypertree root from `signature` over `context` and `message`.
    fn verify(
        &self,
        signature: &SpxSignature,
        context: &[u8],
        message: &[u8],
        key: &SpxPublicKey,
    ) -> SpxPrimitiveOutput;
}

impl<P: SpxPrimitive + ?Sized> SpxPrimitive for &P {
    fn public_key_root(&self, key: &SpxPublicKey) -> SpxRoot {
        (**self).public_key_root(key)
    }

    fn verify(
        &self,
        signature: &SpxSignature,
        context: &[u8],
        message: &[u8],
        key: &SpxPublicKey,
    ) -> SpxPrimitiveOutput {
        (**self).verify(signature, context, message, key)
    }
}

/// Word the boot stage checks before executing from flash.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FlashExec(pub u32);

impl FlashExec {
    pub const AUTHORIZED: FlashExec = FlashExec(SPX_SUCCESS);
    pub const POISON: FlashExec = FlashExec(FLASH_EXEC_POISON);

    pub fn word(&self) -> u32 {
        self.0
    }

    /// Exact comparison against `SPX_SUCCESS`.
    pub fn is_authorized(&self) -> bool {
        launder32(self.0) == SPX_SUCCESS
    }
}

/// Result of [`sigverify_spx_verify`].
///
/// `status` and `flash_exec` are independent signals; a caller must check
/// `flash_exec` before executing the verified image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpxVerifyOutcome {
    pub status: McuResult<()>,
    pub flash_exec: FlashExec,
}

// Licensed under the Apache-2.0 license

use super::{
    launder32, roots_match, spx_success_to_ok, FlashExec, SpxPolicy, SpxPrimitive,
    SpxPrimitiveOutput, SpxPublicKey, SpxSignature, SpxVerifyOutcome, ERROR_OK_WORD,
    SPX_DISABLED_OTP, SPX_FAILURE, SPX_SUCCESS,
};
use crate::config::SpxConfig;
use crate::fmt::{HexWord, HexWords};
use crate::lifecycle::LifecycleState;
use crate::otp::OtpRead;
use mcu_error::{McuError, McuResult};
use zerocopy::{ConvertError, FromBytes};

/// Verifies a SPHINCS+ signature over `context` and `message`.
///
/// The primitive always runs, whatever the policy. The roots must match and
/// the primitive must report `ERROR_OK_WORD` for the outcome to be
/// `SPX_SUCCESS`. When `policy` is disabled the flash execution word is
/// `SPX_SUCCESS` regardless of the outcome; otherwise it is `SPX_SUCCESS`
/// only on success and `FLASH_EXEC_POISON` on every other path.
pub fn sigverify_spx_verify<P: SpxPrimitive + ?Sized>(
    primitive: &P,
    policy: SpxPolicy,
    signature: &SpxSignature,
    key: &SpxPublicKey,
    lc_state: LifecycleState,
    context: &[u8],
    message: &[u8],
) -> SpxVerifyOutcome {
    let spx_en = launder32(policy.query(lc_state));

    let expected_root = primitive.public_key_root(key);
    let SpxPrimitiveOutput {
        root: actual_root,
        status,
    } = primitive.verify(signature, context, message, key);

    let roots_equal = roots_match(&expected_root, &actual_root);
    let mut outcome = if launder32(status) == ERROR_OK_WORD && roots_equal {
        SPX_SUCCESS
    } else {
        log::debug!(
            "[mcu-rom-spx] status {} expected root {} actual root {}",
            HexWord(status),
            HexWords(&expected_root.0),
            HexWords(&actual_root.0)
        );
        SPX_FAILURE
    };

    if launder32(spx_en) == SPX_DISABLED_OTP {
        if launder32(outcome) != SPX_SUCCESS {
            log::warn!("[mcu-rom-spx] Signature check failed, ignored by disabled policy");
        }
        outcome = spx_en;
    }

    let status = spx_success_to_ok(outcome, policy);

    let flash_exec = if launder32(spx_en) == SPX_DISABLED_OTP {
        FlashExec::AUTHORIZED
    } else if status.is_ok() && launder32(outcome) == SPX_SUCCESS {
        FlashExec(outcome)
    } else {
        FlashExec::POISON
    };

    SpxVerifyOutcome { status, flash_exec }
}

/// SPHINCS+ gate bound to a primitive and the policy of the current boot stage.
pub struct SpxVerifier<P: SpxPrimitive> {
    primitive: P,
    policy: SpxPolicy,
}

impl<P: SpxPrimitive> SpxVerifier<P> {
    pub fn new(primitive: P, policy: SpxPolicy) -> Self {
        Self { primitive, policy }
    }

    /// Builds a verifier whose policy comes from OTP.
    pub fn from_otp(primitive: P, otp: &dyn OtpRead, config: &SpxConfig) -> McuResult<Self> {
        let policy = SpxPolicy::from_otp(otp, config)?;
        Ok(Self::new(primitive, policy))
    }

    pub fn policy(&self) -> SpxPolicy {
        self.policy
    }

    pub fn verify(
        &self,
        signature: &SpxSignature,
        key: &SpxPublicKey,
        lc_state: LifecycleState,
        context: &[u8],
        message: &[u8],
    ) -> SpxVerifyOutcome {
        sigverify_spx_verify(
            &self.primitive,
            self.policy,
            signature,
            key,
            lc_state,
            context,
            message,
        )
    }

    /// Like [`Self::verify`], for a key and signature still in their byte
    /// encoding. A word-aligned signature is borrowed in place; an unaligned
    /// one is copied first. Encodings of the wrong size poison the flash
    /// execution word under either policy.
    pub fn verify_bytes(
        &self,
        signature: &[u8],
        key: &[u8],
        lc_state: LifecycleState,
        context: &[u8],
        message: &[u8],
    ) -> SpxVerifyOutcome {
        let unaligned: SpxSignature;
        let signature = match SpxSignature::ref_from_bytes(signature) {
            Ok(signature) => signature,
            Err(ConvertError::Alignment(_)) => match SpxSignature::read_from_bytes(signature) {
                Ok(copy) => {
                    unaligned = copy;
                    &unaligned
                }
                Err(_) => return malformed(McuError::ROM_SIGVERIFY_SPX_INVALID_SIGNATURE),
            },
            Err(_) => return malformed(McuError::ROM_SIGVERIFY_SPX_INVALID_SIGNATURE),
        };
        match SpxPublicKey::from_bytes(key) {
            Ok(key) => self.verify(signature, &key, lc_state, context, message),
            Err(err) => malformed(err),
        }
    }
}

fn malformed(err: McuError) -> SpxVerifyOutcome {
    log::error!("[mcu-rom-spx] Malformed key or signature: {}", err);
    SpxVerifyOutcome {
        status: Err(err),
        flash_exec: FlashExec::POISON,
    }
}

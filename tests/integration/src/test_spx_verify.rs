// Licensed under the Apache-2.0 license

//! End-to-end tests for the SPHINCS+ verification gate.
//!
//! These follow the boot-stage view: a policy is derived once, a signed
//! message is checked, and the flash execution word decides whether the next
//! stage may run.

#[cfg(test)]
pub mod test {
    use crate::fake_spx::Sha256Spx;
    use log::{info, LevelFilter};
    use mcu_error::McuError;
    use mcu_rom_sigverify::fmt::HexWords;
    use mcu_rom_sigverify::{
        roots_match, sigverify_spx_verify, spx_success_to_ok, Duplication, FlashExec,
        FuseLayout, LifecycleState, OtpImage, SpxConfig, SpxPolicy, SpxPrimitive,
        SpxPublicKey, SpxSignature, SpxVerifier, ERROR_OK_WORD, FLASH_EXEC_POISON,
        SPX_DISABLED_OTP, SPX_EN_OTP_WORD_ADDR, SPX_SUCCESS,
    };
    use simple_logger::SimpleLogger;
    use zerocopy::IntoBytes;

    const MESSAGE: &[u8] = b"test message";

    const PUB_KEY: SpxPublicKey = SpxPublicKey([
        0x406e_9f01,
        0x776a_a175,
        0x13e1_20d3,
        0xa595_78b3,
        0xac8e_4258,
        0x26e2_f1a5,
        0x9ec7_a442,
        0xcd9a_4c0a,
    ]);

    fn init_logger() {
        let _ = SimpleLogger::new().with_level(LevelFilter::Debug).init();
    }

    fn good_signature() -> SpxSignature {
        Sha256Spx.sign(&PUB_KEY, &[], MESSAGE, 0x646b_0224)
    }

    fn bad_signature() -> SpxSignature {
        let mut signature = good_signature();
        assert_ne!(signature.0[0], 0);
        signature.0[0] = 0;
        signature
    }

    fn verify(policy: SpxPolicy, signature: &SpxSignature) -> (Result<(), McuError>, FlashExec) {
        let outcome = sigverify_spx_verify(
            &Sha256Spx,
            policy,
            signature,
            &PUB_KEY,
            LifecycleState::Prod,
            &[],
            MESSAGE,
        );
        (outcome.status, outcome.flash_exec)
    }

    #[test]
    fn test_spx_success_to_ok() {
        init_logger();
        let cases = [
            (SPX_DISABLED_OTP, SpxPolicy::disabled(), true),
            (SPX_SUCCESS, SpxPolicy::enabled(), true),
            (u32::MAX, SpxPolicy::enabled(), false),
            (0, SpxPolicy::enabled(), false),
            (ERROR_OK_WORD, SpxPolicy::enabled(), false),
            (SPX_DISABLED_OTP, SpxPolicy::enabled(), false),
        ];
        for (raw, policy, ok) in cases {
            let res = spx_success_to_ok(raw, policy);
            info!("0x{:08x} -> {:?}", raw, res);
            assert_eq!(res.is_ok(), ok, "wrong result {:?} for 0x{:08x}", res, raw);
        }
    }

    #[test]
    fn test_spx_verify_impl() {
        init_logger();
        let expected_root = Sha256Spx.public_key_root(&PUB_KEY);
        let output = Sha256Spx.verify(&good_signature(), &[], MESSAGE, &PUB_KEY);
        info!("expected root {}", HexWords(&expected_root.0));
        info!("actual root   {}", HexWords(&output.root.0));
        assert!(roots_match(&expected_root, &output.root));
        assert_eq!(expected_root.0, output.root.0);
        assert_eq!(output.status, ERROR_OK_WORD);
    }

    #[test]
    fn test_spx_verify_disabled_bad_signature() {
        init_logger();
        let (status, flash_exec) = verify(SpxPolicy::disabled(), &bad_signature());
        assert_eq!(status, Ok(()));
        assert_eq!(flash_exec.word(), SPX_SUCCESS);
    }

    #[test]
    fn test_spx_verify_disabled_good_signature() {
        init_logger();
        let (status, flash_exec) = verify(SpxPolicy::disabled(), &good_signature());
        assert_eq!(status, Ok(()));
        assert_eq!(flash_exec.word(), SPX_SUCCESS);
    }

    #[test]
    fn test_spx_verify_enabled_bad_signature() {
        init_logger();
        let (status, flash_exec) = verify(SpxPolicy::enabled(), &bad_signature());
        assert_eq!(status, Err(McuError::ROM_SIGVERIFY_SPX_BAD_SIGNATURE));
        assert_eq!(flash_exec.word(), FLASH_EXEC_POISON);
        assert!(!flash_exec.is_authorized());
    }

    #[test]
    fn test_spx_verify_enabled_good_signature() {
        init_logger();
        let (status, flash_exec) = verify(SpxPolicy::enabled(), &good_signature());
        assert_eq!(status, Ok(()));
        assert_eq!(flash_exec, FlashExec::AUTHORIZED);
    }

    #[test]
    fn test_spx_verify_is_idempotent() {
        init_logger();
        for policy in [SpxPolicy::enabled(), SpxPolicy::disabled()] {
            for signature in [good_signature(), bad_signature()] {
                assert_eq!(verify(policy, &signature), verify(policy, &signature));
            }
        }
    }

    #[test]
    fn test_spx_verify_context_is_bound() {
        init_logger();
        let context = b"mcu-rom-ext";
        let signature = Sha256Spx.sign(&PUB_KEY, context, MESSAGE, 7);
        let verifier = SpxVerifier::new(Sha256Spx, SpxPolicy::enabled());

        let outcome = verifier.verify(&signature, &PUB_KEY, LifecycleState::Prod, context, MESSAGE);
        assert_eq!(outcome.status, Ok(()));
        assert!(outcome.flash_exec.is_authorized());

        let outcome = verifier.verify(&signature, &PUB_KEY, LifecycleState::Prod, &[], MESSAGE);
        assert_eq!(outcome.status, Err(McuError::ROM_SIGVERIFY_SPX_BAD_SIGNATURE));
        assert_eq!(outcome.flash_exec, FlashExec::POISON);
    }

    #[test]
    fn test_spx_verify_wrong_key() {
        init_logger();
        let mut other_key = PUB_KEY;
        other_key.0[7] ^= 1;
        let verifier = SpxVerifier::new(Sha256Spx, SpxPolicy::enabled());
        let outcome = verifier.verify(
            &good_signature(),
            &other_key,
            LifecycleState::Prod,
            &[],
            MESSAGE,
        );
        assert!(outcome.status.is_err());
        assert_eq!(outcome.flash_exec, FlashExec::POISON);
    }

    #[test]
    fn test_spx_verify_policy_from_otp() {
        init_logger();
        let config = SpxConfig::default();
        assert_eq!(
            config.spx_en_layout,
            FuseLayout::WordMajorityVote(Duplication::new(3))
        );

        // Disabled field with one glitched copy.
        let mut words = vec![0u32; SPX_EN_OTP_WORD_ADDR + 3];
        words[SPX_EN_OTP_WORD_ADDR] = SPX_DISABLED_OTP;
        words[SPX_EN_OTP_WORD_ADDR + 1] = SPX_DISABLED_OTP ^ 0x0100_0000;
        words[SPX_EN_OTP_WORD_ADDR + 2] = SPX_DISABLED_OTP;
        let otp = OtpImage::new(&words);
        let verifier = SpxVerifier::from_otp(Sha256Spx, &otp, &config).unwrap();
        assert_eq!(verifier.policy(), SpxPolicy::disabled());
        let outcome = verifier.verify(
            &bad_signature(),
            &PUB_KEY,
            LifecycleState::Dev,
            &[],
            MESSAGE,
        );
        assert!(outcome.flash_exec.is_authorized());

        // Blank field keeps verification on.
        let words = vec![0u32; SPX_EN_OTP_WORD_ADDR + 3];
        let otp = OtpImage::new(&words);
        let verifier = SpxVerifier::from_otp(Sha256Spx, &otp, &config).unwrap();
        assert_eq!(verifier.policy(), SpxPolicy::enabled());
        let outcome = verifier.verify(
            &bad_signature(),
            &PUB_KEY,
            LifecycleState::Dev,
            &[],
            MESSAGE,
        );
        assert_eq!(outcome.flash_exec, FlashExec::POISON);
    }

    #[test]
    fn test_spx_verify_bytes() {
        init_logger();
        let signature = good_signature();
        let verifier = SpxVerifier::new(&Sha256Spx, SpxPolicy::enabled());
        let outcome = verifier.verify_bytes(
            signature.as_bytes(),
            PUB_KEY.as_bytes(),
            LifecycleState::Prod,
            &[],
            MESSAGE,
        );
        assert_eq!(outcome.status, Ok(()));
        assert_eq!(outcome.flash_exec, FlashExec::AUTHORIZED);

        let outcome = verifier.verify_bytes(
            &signature.as_bytes()[4..],
            PUB_KEY.as_bytes(),
            LifecycleState::Prod,
            &[],
            MESSAGE,
        );
        assert_eq!(
            outcome.status,
            Err(McuError::ROM_SIGVERIFY_SPX_INVALID_SIGNATURE)
        );
        assert_eq!(outcome.flash_exec, FlashExec::POISON);
    }

    #[test]
    fn test_spx_verify_bytes_unaligned() {
        init_logger();
        let signature = good_signature();
        let len = signature.as_bytes().len();
        let mut buf = vec![0u8; len + 1];
        let start = if buf.as_ptr() as usize % 4 == 0 { 1 } else { 0 };
        buf[start..start + len].copy_from_slice(signature.as_bytes());
        let sig_bytes = &buf[start..start + len];
        assert_ne!(sig_bytes.as_ptr() as usize % 4, 0);
        for policy in [SpxPolicy::enabled(), SpxPolicy::disabled()] {
            let verifier = SpxVerifier::new(Sha256Spx, policy);
            let outcome = verifier.verify_bytes(
                sig_bytes,
                PUB_KEY.as_bytes(),
                LifecycleState::Prod,
                &[],
                MESSAGE,
            );
            info!("{:?} unaligned -> {:?}", policy, outcome);
            assert_eq!(outcome.status, Ok(()));
            assert_eq!(outcome.flash_exec, FlashExec::AUTHORIZED);
        }
    }
}

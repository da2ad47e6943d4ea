/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    SPHINCS+ signature verification gate for the MCU ROM.

--*/

#![cfg_attr(not(test), no_std)]

mod config;
pub use config::*;
pub mod fmt;
pub mod fuse_layout;
pub use fuse_layout::{Duplication, FuseLayout};
mod lifecycle;
pub use lifecycle::*;
mod otp;
pub use otp::*;
pub mod sigverify;
pub use sigverify::*;

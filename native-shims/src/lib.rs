//! Native big-number and elliptic-curve point handles behind a C ABI.
//!
//! This crate lets a managed runtime call into native cryptographic
//! primitives through plain function calls and opaque handles. The
//! arithmetic lives in the RustCrypto curve crates ([`p256`], [`p384`],
//! [`k256`]) and in `num-bigint-dig`; this crate only owns the lifetime of
//! the values and their byte encodings.
//!
//! ## Safe API
//!
//! Four owned, move-only handle types:
//!
//! - [`Bignum`]: sign-aware arbitrary-precision integer, zeroized on drop
//! - [`BnContext`]: scratch workspace reused across curve operations
//! - [`EcGroup`]: a named curve, looked up by OpenSSL NID
//! - [`EcPoint`]: a point on one of the named curves
//!
//! Releasing a handle is dropping it, so double release and use after
//! release do not compile.
//!
//! ```
//! # fn main() -> native_shims::Result<()> {
//! # #[cfg(feature = "p256")]
//! # {
//! use native_shims::{Bignum, BnContext, CurveId, EcGroup, EcPoint};
//!
//! let group = EcGroup::from_nid(CurveId::NID_P256)?;
//! let mut ctx = BnContext::new();
//! let mut point = EcPoint::new(&group);
//!
//! point.mul(&group, Some(&Bignum::from(1u64)), None, &mut ctx)?;
//! assert_eq!(point, group.generator());
//!
//! let (x, _y) = point.affine_coordinates(&group)?;
//! let mut x_bytes = [0u8; 32];
//! x.write_be_bytes_padded(&mut x_bytes)?;
//! # }
//! # Ok(())
//! # }
//! ```
//!
//! ## C ABI
//!
//! The [`ffi`] module exports `Native_BN_*`, `Native_BN_CTX_*`,
//! `Native_EC_GROUP_*` and `Native_EC_POINT_*` functions over the same
//! types. Failure is signalled by a null handle, a negative count or a zero
//! status.
//!
//! ## Cargo features
//!
//! Each curve is behind a feature of the same name as its crate: `p256`,
//! `p384` and `k256`, all enabled by default. At least one must be enabled.
//!
//! [`p256`]: https://docs.rs/p256
//! [`p384`]: https://docs.rs/p384
//! [`k256`]: https://docs.rs/k256

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

#[cfg(not(any(feature = "p256", feature = "p384", feature = "k256")))]
compile_error!("enable at least one curve feature: `p256`, `p384` or `k256`");

mod bn;
pub mod ec;
mod error;
pub mod ffi;

pub use crate::{
    bn::{Bignum, BnContext},
    ec::{CurveId, EcGroup, EcPoint},
    error::{Error, Result},
};

//! Named curve groups and points on them.
//!
//! Arithmetic is delegated to the RustCrypto curve crates enabled through
//! cargo features:
//!
//! | NID | Name | Feature |
//! |-----|------|---------|
//! | 415 | `prime256v1` (NIST P-256) | `p256` |
//! | 714 | `secp256k1` | `k256` |
//! | 715 | `secp384r1` (NIST P-384) | `p384` |

/// Run `$body` with `$c` bound to the curve type for `$curve`.
macro_rules! with_curve {
    ($curve:expr, $c:ident => $body:expr) => {
        match $curve {
            #[cfg(feature = "p256")]
            $crate::ec::CurveId::NistP256 => {
                type $c = p256::NistP256;
                $body
            }
            #[cfg(feature = "p384")]
            $crate::ec::CurveId::NistP384 => {
                type $c = p384::NistP384;
                $body
            }
            #[cfg(feature = "k256")]
            $crate::ec::CurveId::Secp256k1 => {
                type $c = k256::Secp256k1;
                $body
            }
        }
    };
}

mod affine;
mod point;

pub use point::EcPoint;

use crate::{Bignum, Error, Result};
use core::fmt;
use num_bigint_dig::BigUint;

/// Named curves, numbered the way OpenSSL numbers them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum CurveId {
    /// NIST P-256, also known as `prime256v1` and `secp256r1`.
    #[cfg(feature = "p256")]
    NistP256,

    /// NIST P-384, also known as `secp384r1`.
    #[cfg(feature = "p384")]
    NistP384,

    /// SECG `secp256k1`.
    #[cfg(feature = "k256")]
    Secp256k1,
}

impl CurveId {
    /// NID of `prime256v1`.
    pub const NID_P256: i32 = 415;
    /// NID of `secp256k1`.
    pub const NID_SECP256K1: i32 = 714;
    /// NID of `secp384r1`.
    pub const NID_P384: i32 = 715;

    /// Look up a curve by NID.
    pub fn from_nid(nid: i32) -> Result<Self> {
        match nid {
            #[cfg(feature = "p256")]
            Self::NID_P256 => Ok(Self::NistP256),
            #[cfg(feature = "p384")]
            Self::NID_P384 => Ok(Self::NistP384),
            #[cfg(feature = "k256")]
            Self::NID_SECP256K1 => Ok(Self::Secp256k1),
            _ => Err(Error::UnsupportedCurve(nid)),
        }
    }

    /// OpenSSL NID for this curve.
    pub fn nid(self) -> i32 {
        match self {
            #[cfg(feature = "p256")]
            Self::NistP256 => Self::NID_P256,
            #[cfg(feature = "p384")]
            Self::NistP384 => Self::NID_P384,
            #[cfg(feature = "k256")]
            Self::Secp256k1 => Self::NID_SECP256K1,
        }
    }

    /// Size in bytes of a base field element (and of a scalar).
    pub fn field_bytes(self) -> usize {
        with_curve!(self, C => affine::field_bytes::<C>())
    }

    fn order(self) -> BigUint {
        with_curve!(self, C => affine::order::<C>())
    }
}

impl TryFrom<i32> for CurveId {
    type Error = Error;

    fn try_from(nid: i32) -> Result<Self> {
        Self::from_nid(nid)
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            #[cfg(feature = "p256")]
            Self::NistP256 => "prime256v1",
            #[cfg(feature = "p384")]
            Self::NistP384 => "secp384r1",
            #[cfg(feature = "k256")]
            Self::Secp256k1 => "secp256k1",
        };
        f.write_str(name)
    }
}

/// A named curve group: the context every point operation runs in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EcGroup {
    curve: CurveId,
    order: BigUint,
}

impl EcGroup {
    /// Create the group for a named curve.
    pub fn new(curve: CurveId) -> Self {
        Self {
            curve,
            order: curve.order(),
        }
    }

    /// Create the group for the curve with the given OpenSSL NID.
    pub fn from_nid(nid: i32) -> Result<Self> {
        CurveId::from_nid(nid).map(Self::new)
    }

    /// Curve this group is defined over.
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// OpenSSL NID of the curve.
    pub fn nid(&self) -> i32 {
        self.curve.nid()
    }

    /// Size in bytes of a coordinate.
    pub fn field_bytes(&self) -> usize {
        self.curve.field_bytes()
    }

    /// Order of the generator.
    pub fn order(&self) -> Bignum {
        Bignum::from(self.order.clone())
    }

    /// A new point holding the generator.
    pub fn generator(&self) -> EcPoint {
        EcPoint::generator(self)
    }

    pub(crate) fn order_ref(&self) -> &BigUint {
        &self.order
    }
}


#[cfg(all(test, feature = "p256", feature = "p384", feature = "k256"))]
mod all_curves {
    use super::{CurveId, EcGroup};
    use crate::Error;
    use hex_literal::hex;

    #[test]
    fn nid_lookup() {
        for nid in [CurveId::NID_P256, CurveId::NID_P384, CurveId::NID_SECP256K1] {
            let group = EcGroup::from_nid(nid).unwrap();
            assert_eq!(group.nid(), nid);
        }

        assert_eq!(
            EcGroup::from_nid(716).unwrap_err(),
            Error::UnsupportedCurve(716)
        );
        assert!(CurveId::try_from(-1).is_err());
    }

    #[test]
    fn curve_names() {
        assert_eq!(CurveId::NistP256.to_string(), "prime256v1");
        assert_eq!(CurveId::NistP384.to_string(), "secp384r1");
        assert_eq!(CurveId::Secp256k1.to_string(), "secp256k1");
    }

    #[test]
    fn field_sizes() {
        assert_eq!(CurveId::NistP256.field_bytes(), 32);
        assert_eq!(CurveId::NistP384.field_bytes(), 48);
        assert_eq!(CurveId::Secp256k1.field_bytes(), 32);
    }

    #[test]
    fn orders() {
        let p256 = EcGroup::new(CurveId::NistP256);
        assert_eq!(
            p256.order().to_be_bytes(),
            hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")
        );

        let k256 = EcGroup::new(CurveId::Secp256k1);
        assert_eq!(
            k256.order().to_be_bytes(),
            hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
        );

        let p384 = EcGroup::new(CurveId::NistP384);
        assert_eq!(
            p384.order().to_be_bytes(),
            hex!(
                "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf"
                "581a0db248b0a77aecec196accc52973"
            )
        );
    }
}

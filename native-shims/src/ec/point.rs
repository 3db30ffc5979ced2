//! Curve points

use super::{affine, CurveId, EcGroup};
use crate::{Bignum, BnContext, Error, Result};
use elliptic_curve::{group::Group, CurveArithmetic, ProjectivePoint};

/// A point on one of the supported curves.
///
/// The point remembers which curve it lives on; using it with the group of
/// another curve fails with [`Error::GroupMismatch`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EcPoint {
    inner: PointRepr,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PointRepr {
    #[cfg(feature = "p256")]
    NistP256(p256::ProjectivePoint),
    #[cfg(feature = "p384")]
    NistP384(p384::ProjectivePoint),
    #[cfg(feature = "k256")]
    Secp256k1(k256::ProjectivePoint),
}

/// Conversion between a curve crate's projective point and [`PointRepr`].
trait Projective: CurveArithmetic {
    fn wrap(point: ProjectivePoint<Self>) -> PointRepr;
    fn extract(repr: &PointRepr) -> Result<ProjectivePoint<Self>>;
}

macro_rules! impl_projective {
    ($curve:ty, $variant:ident) => {
        impl Projective for $curve {
            fn wrap(point: ProjectivePoint<Self>) -> PointRepr {
                PointRepr::$variant(point)
            }

            #[allow(unreachable_patterns)]
            fn extract(repr: &PointRepr) -> Result<ProjectivePoint<Self>> {
                match repr {
                    PointRepr::$variant(point) => Ok(*point),
                    _ => Err(Error::GroupMismatch),
                }
            }
        }
    };
}

#[cfg(feature = "p256")]
impl_projective!(p256::NistP256, NistP256);
#[cfg(feature = "p384")]
impl_projective!(p384::NistP384, NistP384);
#[cfg(feature = "k256")]
impl_projective!(k256::Secp256k1, Secp256k1);

impl PointRepr {
    fn curve(&self) -> CurveId {
        match self {
            #[cfg(feature = "p256")]
            Self::NistP256(_) => CurveId::NistP256,
            #[cfg(feature = "p384")]
            Self::NistP384(_) => CurveId::NistP384,
            #[cfg(feature = "k256")]
            Self::Secp256k1(_) => CurveId::Secp256k1,
        }
    }

    fn is_identity(&self) -> bool {
        match self {
            #[cfg(feature = "p256")]
            Self::NistP256(point) => point.is_identity().into(),
            #[cfg(feature = "p384")]
            Self::NistP384(point) => point.is_identity().into(),
            #[cfg(feature = "k256")]
            Self::Secp256k1(point) => point.is_identity().into(),
        }
    }
}

impl EcPoint {
    /// Create the point at infinity on `group`.
    pub fn new(group: &EcGroup) -> Self {
        let inner = with_curve!(group.curve(), C => {
            C::wrap(<ProjectivePoint<C> as Group>::identity())
        });
        Self { inner }
    }

    /// Create a point holding the generator of `group`.
    pub fn generator(group: &EcGroup) -> Self {
        let inner = with_curve!(group.curve(), C => {
            C::wrap(<ProjectivePoint<C> as Group>::generator())
        });
        Self { inner }
    }

    /// Curve this point lives on.
    pub fn curve(&self) -> CurveId {
        self.inner.curve()
    }

    /// Is this the point at infinity?
    pub fn is_at_infinity(&self) -> bool {
        self.inner.is_identity()
    }

    /// Set this point to the affine coordinates `(x, y)`.
    ///
    /// Both coordinates must be non-negative, fit in the field width and
    /// satisfy the curve equation. The point is left unchanged on error.
    pub fn set_affine_coordinates(
        &mut self,
        group: &EcGroup,
        x: &Bignum,
        y: &Bignum,
        ctx: &mut BnContext,
    ) -> Result<()> {
        self.check_group(group)?;
        self.inner = with_curve!(group.curve(), C => {
            C::wrap(affine::from_affine_coordinates::<C>(x, y, ctx)?)
        });
        Ok(())
    }

    /// Affine coordinates `(x, y)` of this point.
    pub fn affine_coordinates(&self, group: &EcGroup) -> Result<(Bignum, Bignum)> {
        self.check_group(group)?;
        let (x, y) = with_curve!(group.curve(), C => {
            affine::affine_coordinates::<C>(&C::extract(&self.inner)?)?
        });
        Ok((Bignum::from(x), Bignum::from(y)))
    }

    /// Set this point to `n*G + m*q`, where `G` is the generator of `group`.
    ///
    /// `n` or the `(q, m)` term may be omitted. Scalars are reduced modulo
    /// the group order.
    pub fn mul(
        &mut self,
        group: &EcGroup,
        n: Option<&Bignum>,
        term: Option<(&EcPoint, &Bignum)>,
        ctx: &mut BnContext,
    ) -> Result<()> {
        self.check_group(group)?;
        self.inner = with_curve!(group.curve(), C => {
            let term = match term {
                Some((q, m)) => Some((C::extract(&q.inner)?, m)),
                None => None,
            };
            C::wrap(affine::mul::<C>(n, term, group.order_ref(), ctx)?)
        });
        Ok(())
    }

    fn check_group(&self, group: &EcGroup) -> Result<()> {
        if self.curve() == group.curve() {
            Ok(())
        } else {
            Err(Error::GroupMismatch)
        }
    }
}

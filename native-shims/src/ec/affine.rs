//! Affine coordinates and scalar multiplication, generic over the curve crates.

use crate::{Bignum, BnContext, Error, Result};
use elliptic_curve::{
    bigint::ArrayEncoding,
    ff::PrimeField,
    generic_array::typenum::Unsigned,
    group::{Curve as _, Group},
    sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, Curve, CurveArithmetic, FieldBytes, FieldBytesSize, ProjectivePoint, Scalar,
};
use num_bigint_dig::BigUint;
use zeroize::Zeroizing;

pub(super) fn field_bytes<C: Curve>() -> usize {
    FieldBytesSize::<C>::USIZE
}

pub(super) fn order<C: Curve>() -> BigUint {
    BigUint::from_bytes_be(&C::ORDER.to_be_byte_array())
}

/// Validate `(x, y)` against the curve equation and lift it to a point.
pub(super) fn from_affine_coordinates<C>(
    x: &Bignum,
    y: &Bignum,
    ctx: &mut BnContext,
) -> Result<ProjectivePoint<C>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let x = coordinate::<C>(x, ctx)?;
    let y = coordinate::<C>(y, ctx)?;
    let encoded = EncodedPoint::<C>::from_affine_coordinates(&x, &y, false);

    Option::<AffinePoint<C>>::from(AffinePoint::<C>::from_encoded_point(&encoded))
        .map(ProjectivePoint::<C>::from)
        .ok_or(Error::PointNotOnCurve)
}

/// Affine `(x, y)` of `point`, or an error for the identity.
pub(super) fn affine_coordinates<C>(point: &ProjectivePoint<C>) -> Result<(BigUint, BigUint)>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let encoded = point.to_affine().to_encoded_point(false);

    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => Ok((BigUint::from_bytes_be(x), BigUint::from_bytes_be(y))),
        _ => Err(Error::PointAtInfinity),
    }
}

/// `n*G + m*q`, with either term omitted when absent.
pub(super) fn mul<C>(
    n: Option<&Bignum>,
    term: Option<(ProjectivePoint<C>, &Bignum)>,
    order: &BigUint,
    ctx: &mut BnContext,
) -> Result<ProjectivePoint<C>>
where
    C: CurveArithmetic,
{
    let mut acc = <ProjectivePoint<C> as Group>::identity();

    if let Some(n) = n {
        acc += <ProjectivePoint<C> as Group>::generator() * scalar::<C>(n, order, ctx)?;
    }

    if let Some((q, m)) = term {
        acc += q * scalar::<C>(m, order, ctx)?;
    }

    Ok(acc)
}

fn coordinate<C: Curve>(bn: &Bignum, ctx: &mut BnContext) -> Result<Zeroizing<FieldBytes<C>>> {
    if bn.is_negative() {
        return Err(Error::CoordinateOutOfRange);
    }

    padded::<C>(bn, ctx).map_err(|_| Error::CoordinateOutOfRange)
}

fn scalar<C: CurveArithmetic>(
    bn: &Bignum,
    order: &BigUint,
    ctx: &mut BnContext,
) -> Result<Scalar<C>> {
    let reduced = bn.reduce(order);
    let repr = padded::<C>(&reduced, ctx)?;

    // reduced below the order, so the representation is canonical
    Option::from(Scalar::<C>::from_repr((*repr).clone())).ok_or(Error::MalformedInput)
}

/// Fixed-width encoding of `bn`, wiped when dropped.
fn padded<C: Curve>(bn: &Bignum, ctx: &mut BnContext) -> Result<Zeroizing<FieldBytes<C>>> {
    let mut bytes = Zeroizing::new(FieldBytes::<C>::default());
    ctx.with_padded(bn, field_bytes::<C>(), |encoded| bytes.copy_from_slice(encoded))?;
    Ok(bytes)
}

#[cfg(all(test, feature = "p256"))]
mod tests {
    use super::{affine_coordinates, from_affine_coordinates, mul, order, padded};
    use crate::{Bignum, BnContext, Error};
    use elliptic_curve::group::Group;
    use hex_literal::hex;
    use p256::{NistP256, ProjectivePoint};

    const GX: [u8; 32] = hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");
    const GY: [u8; 32] = hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5");

    #[test]
    fn generator_coordinates() {
        let (x, y) = affine_coordinates::<NistP256>(&ProjectivePoint::generator()).unwrap();
        assert_eq!(Bignum::from(x).to_be_bytes(), GX);
        assert_eq!(Bignum::from(y).to_be_bytes(), GY);
    }

    #[test]
    fn identity_has_no_coordinates() {
        assert_eq!(
            affine_coordinates::<NistP256>(&ProjectivePoint::identity()),
            Err(Error::PointAtInfinity)
        );
    }

    #[test]
    fn lift_generator() {
        let mut ctx = BnContext::new();
        let point = from_affine_coordinates::<NistP256>(
            &Bignum::from_be_bytes(&GX),
            &Bignum::from_be_bytes(&GY),
            &mut ctx,
        )
        .unwrap();
        assert_eq!(point, ProjectivePoint::generator());
    }

    #[test]
    fn reject_wide_coordinate() {
        let mut ctx = BnContext::new();
        let mut wide = [0u8; 33];
        wide[0] = 1;
        assert_eq!(
            from_affine_coordinates::<NistP256>(
                &Bignum::from_be_bytes(&wide),
                &Bignum::from_be_bytes(&GY),
                &mut ctx
            ),
            Err(Error::CoordinateOutOfRange)
        );
    }

    #[test]
    fn scalar_is_reduced() {
        let mut ctx = BnContext::new();
        let n = order::<NistP256>();
        let order_plus_two = Bignum::from(n.clone() + 2u32);
        let two = Bignum::from(2u64);

        let a = mul::<NistP256>(Some(&order_plus_two), None, &n, &mut ctx).unwrap();
        let b = mul::<NistP256>(Some(&two), None, &n, &mut ctx).unwrap();
        assert_eq!(a, b);

        let mut minus_one = Bignum::from(1u64);
        minus_one.set_negative(true);
        let c = mul::<NistP256>(Some(&minus_one), None, &n, &mut ctx).unwrap();
        assert_eq!(c, -ProjectivePoint::generator());
    }

    #[test]
    fn both_terms() {
        let mut ctx = BnContext::new();
        let n = order::<NistP256>();
        let g = ProjectivePoint::generator();

        // 2*G + 3*G
        let sum = mul::<NistP256>(
            Some(&Bignum::from(2u64)),
            Some((g, &Bignum::from(3u64))),
            &n,
            &mut ctx,
        )
        .unwrap();
        let five = mul::<NistP256>(Some(&Bignum::from(5u64)), None, &n, &mut ctx).unwrap();
        assert_eq!(sum, five);

        let nothing = mul::<NistP256>(None, None, &n, &mut ctx).unwrap();
        assert_eq!(nothing, ProjectivePoint::identity());
    }

    #[test]
    fn padded_to_field_width() {
        let mut ctx = BnContext::new();
        let bytes = padded::<NistP256>(&Bignum::from(0x0102u64), &mut ctx).unwrap();
        assert_eq!(bytes.len(), 32);
        assert!(bytes[..30].iter().all(|&b| b == 0));
        assert_eq!(bytes[30..], [0x01, 0x02]);

        let mut wide = [0u8; 33];
        wide[0] = 1;
        assert!(padded::<NistP256>(&Bignum::from_be_bytes(&wide), &mut ctx).is_err());
    }
}

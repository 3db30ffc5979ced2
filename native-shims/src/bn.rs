//! Arbitrary-precision integers and the scratch context used by curve operations.

use crate::{Error, Result};
use core::fmt;
use num_bigint_dig::BigUint;
use num_traits::Zero;
use zeroize::{Zeroize, Zeroizing};

/// Sign-aware arbitrary-precision integer.
///
/// Byte encodings are big-endian and carry the magnitude only, so `-256` and
/// `256` both serialize to `[0x01, 0x00]`. The limbs are zeroized on drop.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Bignum {
    magnitude: BigUint,
    negative: bool,
}

impl Bignum {
    /// Create a new bignum with the value zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a big-endian unsigned byte string. The empty string is zero.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut bn = Self::new();
        bn.set_from_be_bytes(bytes);
        bn
    }

    /// Overwrite this bignum in place with a big-endian unsigned byte string.
    pub fn set_from_be_bytes(&mut self, bytes: &[u8]) {
        self.magnitude.zeroize();
        self.magnitude = BigUint::from_bytes_be(bytes);
        self.negative = false;
    }

    /// Minimal number of bytes needed to encode the magnitude. Zero for zero.
    pub fn num_bytes(&self) -> usize {
        (self.magnitude.bits() + 7) / 8
    }

    /// Is this bignum zero?
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Is this bignum strictly negative?
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Set the sign. Zero stays non-negative.
    pub fn set_negative(&mut self, negative: bool) {
        self.negative = negative && !self.is_zero();
    }

    /// Minimal big-endian encoding of the magnitude.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        if self.is_zero() {
            return Vec::new();
        }

        self.magnitude.to_bytes_be()
    }

    /// Write the minimal big-endian encoding to the front of `out`.
    ///
    /// Returns the number of bytes written.
    pub fn write_be_bytes(&self, out: &mut [u8]) -> Result<usize> {
        let needed = self.num_bytes();

        if out.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                available: out.len(),
            });
        }

        if needed > 0 {
            let bytes = Zeroizing::new(self.magnitude.to_bytes_be());
            out[..needed].copy_from_slice(&bytes);
        }

        Ok(needed)
    }

    /// Fill all of `out` with the big-endian encoding, left-padded with zeros.
    ///
    /// Nothing is written when the encoding does not fit.
    pub fn write_be_bytes_padded(&self, out: &mut [u8]) -> Result<usize> {
        let needed = self.num_bytes();

        if out.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                available: out.len(),
            });
        }

        let (padding, value) = out.split_at_mut(out.len() - needed);
        padding.fill(0);
        self.write_be_bytes(value)?;
        Ok(out.len())
    }

    /// Least non-negative residue modulo `modulus`.
    pub(crate) fn reduce(&self, modulus: &BigUint) -> Bignum {
        let residue = Bignum::from(&self.magnitude % modulus);

        if self.negative && !residue.is_zero() {
            Bignum::from(modulus - &residue.magnitude)
        } else {
            residue
        }
    }
}

impl From<u64> for Bignum {
    fn from(n: u64) -> Self {
        Self::from(BigUint::from(n))
    }
}

impl From<BigUint> for Bignum {
    fn from(magnitude: BigUint) -> Self {
        Self {
            magnitude,
            negative: false,
        }
    }
}

impl fmt::Debug for Bignum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bignum")
            .field("bits", &self.magnitude.bits())
            .field("negative", &self.negative)
            .finish_non_exhaustive()
    }
}

impl Zeroize for Bignum {
    fn zeroize(&mut self) {
        self.magnitude.zeroize();
        self.magnitude = BigUint::default();
        self.negative = false;
    }
}

impl Drop for Bignum {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Scratch workspace reused across curve operations.
///
/// Holds the fixed-width encodings of coordinates and scalars while they are
/// handed to the curve arithmetic. Cleared after every use; callers that
/// keep the encoding hold it in a [`Zeroizing`] buffer.
#[derive(Default)]
pub struct BnContext {
    scratch: Vec<u8>,
}

impl BnContext {
    /// Create an empty scratch context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `bn` left-padded to `len` bytes and pass the encoding to `f`.
    pub(crate) fn with_padded<R>(
        &mut self,
        bn: &Bignum,
        len: usize,
        f: impl FnOnce(&[u8]) -> R,
    ) -> Result<R> {
        self.scratch.resize(len, 0);
        let result = bn.write_be_bytes_padded(&mut self.scratch).map(|_| f(&self.scratch));
        self.scratch.zeroize();
        result
    }
}

impl fmt::Debug for BnContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BnContext").finish_non_exhaustive()
    }
}

impl Drop for BnContext {
    fn drop(&mut self) {
        self.scratch.zeroize();
    }
}

//! Error types.

/// Result type with the `native-shims` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Failures reported by the bignum and curve-point boundaries.
///
/// Allocation failure is not represented: the global allocator aborts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Byte input with a negative length, or a null buffer with a nonzero length.
    #[error("malformed input")]
    MalformedInput,

    /// Destination buffer cannot hold the encoding.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Minimal length of the encoding.
        needed: usize,
        /// Length the caller supplied.
        available: usize,
    },

    /// Coordinate is negative or wider than a field element.
    #[error("coordinate out of range for the field")]
    CoordinateOutOfRange,

    /// Affine coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    PointNotOnCurve,

    /// The identity has no affine representation.
    #[error("point at infinity")]
    PointAtInfinity,

    /// Point belongs to a different curve than the group it was used with.
    #[error("point does not belong to the group")]
    GroupMismatch,

    /// NID is not one of the named curves compiled into this build.
    #[error("unsupported curve NID {0}")]
    UnsupportedCurve(i32),
}

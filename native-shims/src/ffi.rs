//! C ABI.
//!
//! Every handle is a boxed Rust value handed out as a raw pointer and must
//! be released exactly once with the matching `*_free` function. Results
//! follow the wrapped library's convention: a null handle, a negative count
//! or a zero status signals failure. Failures are logged at `debug` level.
//!
//! A null handle where a live one is required is a contract violation and
//! aborts the process.

#![allow(non_snake_case)]

use crate::{Bignum, BnContext, EcGroup, EcPoint, Error, Result};
use std::{ptr, slice};
use tracing::debug;

fn report<T>(op: &'static str, result: Result<T>) -> Option<T> {
    result.map_err(|err| debug!(op, %err, "native call failed")).ok()
}

fn status(op: &'static str, result: Result<()>) -> i32 {
    report(op, result).map_or(0, |()| 1)
}

fn count(op: &'static str, result: Result<usize>) -> i32 {
    report(op, result)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(-1)
}

fn into_handle<T>(value: T) -> *mut T {
    Box::into_raw(Box::new(value))
}

unsafe fn release<T>(handle: *mut T) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

unsafe fn live<'a, T>(handle: *const T, kind: &str) -> &'a T {
    assert!(!handle.is_null(), "null {kind} handle");
    &*handle
}

unsafe fn live_mut<'a, T>(handle: *mut T, kind: &str) -> &'a mut T {
    assert!(!handle.is_null(), "null {kind} handle");
    &mut *handle
}

unsafe fn input<'a>(data: *const u8, len: i32) -> Result<&'a [u8]> {
    match usize::try_from(len) {
        Ok(0) => Ok(&[]),
        Ok(len) if !data.is_null() => Ok(slice::from_raw_parts(data, len)),
        _ => Err(Error::MalformedInput),
    }
}

unsafe fn output<'a>(data: *mut u8, len: usize) -> &'a mut [u8] {
    if len == 0 {
        return &mut [];
    }

    assert!(!data.is_null(), "null output buffer");
    slice::from_raw_parts_mut(data, len)
}

/// Run `f` with the caller's scratch context, or a temporary one when null.
unsafe fn with_ctx<R>(ctx: *mut BnContext, f: impl FnOnce(&mut BnContext) -> R) -> R {
    match ctx.as_mut() {
        Some(ctx) => f(ctx),
        None => f(&mut BnContext::new()),
    }
}

/// Allocate a zero-valued bignum.
#[no_mangle]
pub extern "C" fn Native_BN_new() -> *mut Bignum {
    into_handle(Bignum::new())
}

/// Parse `len` big-endian bytes at `s` into `ret`, or into a new bignum when
/// `ret` is null.
///
/// Returns the bignum, or null on a negative `len` or a null `s` with a
/// nonzero `len`.
///
/// # Safety
///
/// `s` must point to `len` readable bytes. `ret` must be null or a live
/// bignum handle.
#[no_mangle]
pub unsafe extern "C" fn Native_BN_bin2bn(s: *const u8, len: i32, ret: *mut Bignum) -> *mut Bignum {
    let Some(bytes) = report("Native_BN_bin2bn", input(s, len)) else {
        return ptr::null_mut();
    };

    match ret.as_mut() {
        Some(bn) => {
            bn.set_from_be_bytes(bytes);
            ret
        }
        None => into_handle(Bignum::from_be_bytes(bytes)),
    }
}

/// Minimal number of bytes needed to encode the magnitude of `a`.
///
/// # Safety
///
/// `a` must be a live bignum handle.
#[no_mangle]
pub unsafe extern "C" fn Native_BN_num_bytes(a: *const Bignum) -> i32 {
    count("Native_BN_num_bytes", Ok(live(a, "bignum").num_bytes()))
}

/// Write the minimal big-endian encoding of `a` to `to`.
///
/// Returns the number of bytes written.
///
/// # Safety
///
/// `a` must be a live bignum handle and `to` must have room for
/// `Native_BN_num_bytes(a)` bytes.
#[no_mangle]
pub unsafe extern "C" fn Native_BN_bn2bin(a: *const Bignum, to: *mut u8) -> i32 {
    let a = live(a, "bignum");
    count("Native_BN_bn2bin", a.write_be_bytes(output(to, a.num_bytes())))
}

/// Write the big-endian encoding of `a` to `to`, left-padded with zeros to
/// exactly `tolen` bytes.
///
/// Returns `tolen`, or -1 without writing anything when the value does not
/// fit or `tolen` is negative.
///
/// # Safety
///
/// `a` must be a live bignum handle and `to` must have room for `tolen`
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn Native_BN_bn2binpad(a: *const Bignum, to: *mut u8, tolen: i32) -> i32 {
    let a = live(a, "bignum");
    let result = usize::try_from(tolen)
        .map_err(|_| Error::MalformedInput)
        .and_then(|len| a.write_be_bytes_padded(output(to, len)));

    count("Native_BN_bn2binpad", result)
}

/// Zeroize and free a bignum. Null is ignored.
///
/// # Safety
///
/// `a` must be null or a live bignum handle, which is dead afterwards.
#[no_mangle]
pub unsafe extern "C" fn Native_BN_clear_free(a: *mut Bignum) {
    release(a)
}

/// Allocate a scratch context.
#[no_mangle]
pub extern "C" fn Native_BN_CTX_new() -> *mut BnContext {
    into_handle(BnContext::new())
}

/// Free a scratch context. Null is ignored.
///
/// # Safety
///
/// `ctx` must be null or a live context handle, which is dead afterwards.
#[no_mangle]
pub unsafe extern "C" fn Native_BN_CTX_free(ctx: *mut BnContext) {
    release(ctx)
}

/// Allocate the group for the named curve `nid`, or return null if the
/// curve is not supported.
#[no_mangle]
pub extern "C" fn Native_EC_GROUP_new_by_curve_name(nid: i32) -> *mut EcGroup {
    report("Native_EC_GROUP_new_by_curve_name", EcGroup::from_nid(nid))
        .map_or(ptr::null_mut(), into_handle)
}

/// Free a group. Null is ignored.
///
/// # Safety
///
/// `group` must be null or a live group handle, which is dead afterwards.
/// Points created from it stay valid.
#[no_mangle]
pub unsafe extern "C" fn Native_EC_GROUP_free(group: *mut EcGroup) {
    release(group)
}

/// Allocate the point at infinity on `group`. Returns null if `group` is
/// null.
///
/// # Safety
///
/// `group` must be null or a live group handle.
#[no_mangle]
pub unsafe extern "C" fn Native_EC_POINT_new(group: *const EcGroup) -> *mut EcPoint {
    match group.as_ref() {
        Some(group) => into_handle(EcPoint::new(group)),
        None => {
            debug!(op = "Native_EC_POINT_new", "null group");
            ptr::null_mut()
        }
    }
}

/// Free a point. Null is ignored.
///
/// # Safety
///
/// `point` must be null or a live point handle, which is dead afterwards.
#[no_mangle]
pub unsafe extern "C" fn Native_EC_POINT_free(point: *mut EcPoint) {
    release(point)
}

/// Set `p` to the affine coordinates `(x, y)`.
///
/// Returns 1 on success and 0 if the coordinates are not a point on the
/// curve, in which case `p` is unchanged.
///
/// # Safety
///
/// `group`, `p`, `x` and `y` must be live handles. `ctx` must be null or a
/// live context handle not in use by another call.
#[no_mangle]
pub unsafe extern "C" fn Native_EC_POINT_set_affine_coordinates(
    group: *const EcGroup,
    p: *mut EcPoint,
    x: *const Bignum,
    y: *const Bignum,
    ctx: *mut BnContext,
) -> i32 {
    let group = live(group, "group");
    let x = live(x, "bignum");
    let y = live(y, "bignum");
    let p = live_mut(p, "point");

    let result = with_ctx(ctx, |ctx| p.set_affine_coordinates(group, x, y, ctx));
    status("Native_EC_POINT_set_affine_coordinates", result)
}

/// Write the affine coordinates of `p` into `x` and `y`. Either output may
/// be null.
///
/// Returns 1 on success and 0 for the point at infinity or a point from
/// another group.
///
/// # Safety
///
/// `group` and `p` must be live handles; `x` and `y` must be null or live
/// bignum handles. `ctx` must be null or a live context handle.
#[no_mangle]
pub unsafe extern "C" fn Native_EC_POINT_get_affine_coordinates(
    group: *const EcGroup,
    p: *const EcPoint,
    x: *mut Bignum,
    y: *mut Bignum,
    _ctx: *mut BnContext,
) -> i32 {
    let group = live(group, "group");
    let p = live(p, "point");

    let result = p.affine_coordinates(group).map(|(px, py)| {
        if let Some(x) = x.as_mut() {
            *x = px;
        }
        if let Some(y) = y.as_mut() {
            *y = py;
        }
    });
    status("Native_EC_POINT_get_affine_coordinates", result)
}

/// Set `r` to `n*G + m*q`.
///
/// `n` may be null to omit the generator term. The `m*q` term is omitted
/// unless both `q` and `m` are non-null. `r` and `q` may be the same point.
///
/// Returns 1 on success and 0 on failure.
///
/// # Safety
///
/// `group` and `r` must be live handles; `n`, `q` and `m` must be null or
/// live handles. `ctx` must be null or a live context handle not in use by
/// another call.
#[no_mangle]
pub unsafe extern "C" fn Native_EC_POINT_mul(
    group: *const EcGroup,
    r: *mut EcPoint,
    n: *const Bignum,
    q: *const EcPoint,
    m: *const Bignum,
    ctx: *mut BnContext,
) -> i32 {
    let group = live(group, "group");

    // `r` is borrowed mutably below, so an aliased `q` is read up front.
    let aliased = (!q.is_null() && ptr::eq(q, r)).then(|| (*q).clone());
    let q = match &aliased {
        Some(q) => Some(q),
        None => q.as_ref(),
    };
    let term = q.zip(m.as_ref());

    let r = live_mut(r, "point");
    let result = with_ctx(ctx, |ctx| r.mul(group, n.as_ref(), term, ctx));
    status("Native_EC_POINT_mul", result)
}

#[cfg(test)]
mod tests {
    use super::{count, input, status};
    use crate::Error;
    use std::ptr;

    #[test]
    fn input_rejects_negative_length() {
        let bytes = [1u8, 2];
        assert_eq!(
            unsafe { input(bytes.as_ptr(), -1) },
            Err(Error::MalformedInput)
        );
    }

    #[test]
    fn input_allows_null_when_empty() {
        assert_eq!(unsafe { input(ptr::null(), 0) }, Ok(&[][..]));
        assert_eq!(
            unsafe { input(ptr::null(), 4) },
            Err(Error::MalformedInput)
        );
    }

    #[test]
    fn return_conventions() {
        assert_eq!(status("test", Ok(())), 1);
        assert_eq!(status("test", Err(Error::PointAtInfinity)), 0);
        assert_eq!(count("test", Ok(7)), 7);
        assert_eq!(count("test", Err(Error::MalformedInput)), -1);
        assert_eq!(count("test", Ok(usize::MAX)), -1);
    }
}

//! Division for [`WideInt`].
//!
//! 256-bit values use Knuth's Algorithm D with reciprocal-based 2-by-1 and
//! 3-by-2 steps (Möller & Granlund). 128-bit values use the shorter
//! trial-quotient method: estimate from the top 64 bits of a normalized
//! divisor, then correct by at most one.
//!
//! Division or remainder by zero returns zero instead of panicking.
use std::ops::{Div, Rem};

use crate::wide_int::{WideInt, leading_zeros_words, to_le};

const MAX_WORDS: usize = 4;

impl<const W: usize> WideInt<W> {
    /// Truncated quotient and remainder. The remainder takes the sign of the
    /// dividend so that `q * rhs + r == self` always holds. A zero divisor
    /// yields `(0, 0)`.
    pub fn quo_rem(self, rhs: Self) -> (Self, Self) {
        if rhs.is_zero() {
            return (Self::ZERO, Self::ZERO);
        }
        let (q, r) = udivrem(self.unsigned_abs(), rhs.unsigned_abs());
        let (q, r) = (Self(q), Self(r));
        let q = if self.is_negative() != rhs.is_negative() {
            q.wrapping_neg()
        } else {
            q
        };
        let r = if self.is_negative() { r.wrapping_neg() } else { r };
        (q, r)
    }

    #[inline]
    pub fn quo(self, rhs: Self) -> Self {
        self.quo_rem(rhs).0
    }

    #[inline]
    pub fn rem(self, rhs: Self) -> Self {
        self.quo_rem(rhs).1
    }
}

impl<const W: usize> Div for WideInt<W> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        self.quo(rhs)
    }
}

impl<const W: usize> Rem for WideInt<W> {
    type Output = Self;
    fn rem(self, rhs: Self) -> Self {
        WideInt::rem(self, rhs)
    }
}

/// Unsigned division of big-endian word arrays. `v` must be nonzero.
fn udivrem<const W: usize>(u: [u64; W], v: [u64; W]) -> ([u64; W], [u64; W]) {
    if u < v {
        return ([0; W], u);
    }
    if W == 2 {
        let (q, r) = udivrem_trial([u[0], u[1]], [v[0], v[1]]);
        let mut qw = [0u64; W];
        let mut rw = [0u64; W];
        qw.copy_from_slice(&q);
        rw.copy_from_slice(&r);
        return (qw, rw);
    }
    udivrem_knuth(u, v)
}

// ==============================
// 128-bit: trial quotient
// ==============================

/// `(hi:lo) / d` with `hi < d`, the 128-by-64 primitive.
#[inline]
fn div_2by1(hi: u64, lo: u64, d: u64) -> (u64, u64) {
    debug_assert!(hi < d);
    let n = ((hi as u128) << 64) | lo as u128;
    ((n / d as u128) as u64, (n % d as u128) as u64)
}

#[inline]
fn join(w: [u64; 2]) -> u128 {
    ((w[0] as u128) << 64) | w[1] as u128
}

#[inline]
fn split(x: u128) -> [u64; 2] {
    [(x >> 64) as u64, x as u64]
}

fn udivrem_trial(u: [u64; 2], v: [u64; 2]) -> ([u64; 2], [u64; 2]) {
    let [uh, ul] = u;
    let [vh, vl] = v;
    if vh == 0 {
        if uh < vl {
            let (q, r) = div_2by1(uh, ul, vl);
            return ([0, q], [0, r]);
        }
        let (qh, r) = (uh / vl, uh % vl);
        let (ql, r) = div_2by1(r, ul, vl);
        return ([qh, ql], [0, r]);
    }
    // Normalize so the estimate comes from the divisor's top 64 bits; the
    // result is never more than one too large after the decrement below.
    let n = vh.leading_zeros();
    let v1 = (join(v) << n >> 64) as u64;
    let u1 = join(u) >> 1;
    let (tq, _) = div_2by1((u1 >> 64) as u64, u1 as u64, v1);
    let mut tq = tq >> (63 - n);
    if tq != 0 {
        tq -= 1;
    }
    let (uu, vv) = (join(u), join(v));
    let mut q = tq as u128;
    let mut r = uu.wrapping_sub(q.wrapping_mul(vv));
    if r >= vv {
        q += 1;
        r -= vv;
    }
    (split(q), split(r))
}

// ==============================
// 256-bit: Knuth Algorithm D
// ==============================

/// Reciprocal of a normalized divisor: `floor((2^128 - 1) / d) - 2^64`.
#[inline]
fn reciprocal_2by1(d: u64) -> u64 {
    debug_assert!(d >> 63 == 1);
    (u128::MAX / d as u128) as u64
}

#[inline]
fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let p = a as u128 * b as u128;
    ((p >> 64) as u64, p as u64)
}

/// Divides `(uh:ul)` by normalized `d` using its reciprocal. `uh < d`.
fn udivrem_2by1(uh: u64, ul: u64, d: u64, reciprocal: u64) -> (u64, u64) {
    let (qh, ql) = mul_wide(reciprocal, uh);
    let (ql, carry) = ql.overflowing_add(ul);
    let mut qh = qh.wrapping_add(uh).wrapping_add(carry as u64);
    qh = qh.wrapping_add(1);

    let mut r = ul.wrapping_sub(qh.wrapping_mul(d));
    if r > ql {
        qh = qh.wrapping_sub(1);
        r = r.wrapping_add(d);
    }
    if r >= d {
        qh = qh.wrapping_add(1);
        r -= d;
    }
    (qh, r)
}

/// Reciprocal of a normalized two-word divisor `(d1:d0)`.
fn reciprocal_3by2(d1: u64, d0: u64) -> u64 {
    let mut v = reciprocal_2by1(d1);
    let mut p = d1.wrapping_mul(v);
    p = p.wrapping_add(d0);
    if p < d0 {
        v = v.wrapping_sub(1);
        if p >= d1 {
            v = v.wrapping_sub(1);
            p = p.wrapping_sub(d1);
        }
        p = p.wrapping_sub(d1);
    }
    let (t1, t0) = mul_wide(v, d0);
    p = p.wrapping_add(t1);
    if p < t1 {
        v = v.wrapping_sub(1);
        if p >= d1 && (p > d1 || t0 >= d0) {
            v = v.wrapping_sub(1);
        }
    }
    v
}

/// Divides `(u2:u1:u0)` by normalized `(d1:d0)`; returns `(q, r1, r0)`.
fn udivrem_3by2(u2: u64, u1: u64, u0: u64, d1: u64, d0: u64, reciprocal: u64) -> (u64, u64, u64) {
    let (q1, q0) = mul_wide(reciprocal, u2);
    let (q0, carry) = q0.overflowing_add(u1);
    let mut q1 = q1.wrapping_add(u2).wrapping_add(carry as u64);

    let r1 = u1.wrapping_sub(q1.wrapping_mul(d1));
    let (t1, t0) = mul_wide(d0, q1);
    let (r0, borrow) = u0.overflowing_sub(t0);
    let r1 = r1.wrapping_sub(t1).wrapping_sub(borrow as u64);
    let (mut r0, borrow) = r0.overflowing_sub(d0);
    let mut r1 = r1.wrapping_sub(d1).wrapping_sub(borrow as u64);

    q1 = q1.wrapping_add(1);

    if r1 >= q0 {
        q1 = q1.wrapping_sub(1);
        let (s0, carry) = r0.overflowing_add(d0);
        r0 = s0;
        r1 = r1.wrapping_add(d1).wrapping_add(carry as u64);
    }
    if r1 > d1 || (r1 == d1 && r0 >= d0) {
        q1 = q1.wrapping_add(1);
        let (s0, borrow) = r0.overflowing_sub(d0);
        r0 = s0;
        r1 = r1.wrapping_sub(d1).wrapping_sub(borrow as u64);
    }
    (q1, r1, r0)
}

/// `x -= y * multiplier` over `y.len()` words, returning the final borrow.
/// Little-endian slices.
fn sub_mul_to(x: &mut [u64], y: &[u64], multiplier: u64) -> u64 {
    let mut borrow = 0u64;
    for (xi, &yi) in x.iter_mut().zip(y) {
        let (s, c1) = xi.overflowing_sub(borrow);
        let (ph, pl) = mul_wide(yi, multiplier);
        let (t, c2) = s.overflowing_sub(pl);
        *xi = t;
        borrow = ph + c1 as u64 + c2 as u64;
    }
    borrow
}

/// `x += y` over `y.len()` words, returning the carry. Little-endian slices.
fn add_to(x: &mut [u64], y: &[u64]) -> u64 {
    let mut carry = false;
    for (xi, &yi) in x.iter_mut().zip(y) {
        let (s, c1) = xi.overflowing_add(yi);
        let (s, c2) = s.overflowing_add(carry as u64);
        *xi = s;
        carry = c1 | c2;
    }
    carry as u64
}

/// Bits shifted out of the top of `x` by a left shift of `shift` (< 64).
#[inline]
fn carry_out(x: u64, shift: u32) -> u64 {
    if shift == 0 { 0 } else { x >> (64 - shift) }
}

fn udivrem_knuth<const W: usize>(u: [u64; W], v: [u64; W]) -> ([u64; W], [u64; W]) {
    debug_assert!(W <= MAX_WORDS);
    let u = to_le(u);
    let d = to_le(v);

    let d_len = W - leading_zeros_words(&v) as usize / 64;
    let u_len = W - leading_zeros_words(&to_le(u)) as usize / 64;
    let shift = d[d_len - 1].leading_zeros();

    // Normalize divisor and dividend; the dividend gains one extra word.
    let mut dn = [0u64; MAX_WORDS];
    for i in (1..d_len).rev() {
        dn[i] = (d[i] << shift) | carry_out(d[i - 1], shift);
    }
    dn[0] = d[0] << shift;

    let mut un = [0u64; MAX_WORDS + 1];
    un[u_len] = carry_out(u[u_len - 1], shift);
    for i in (1..u_len).rev() {
        un[i] = (u[i] << shift) | carry_out(u[i - 1], shift);
    }
    un[0] = u[0] << shift;

    let un = &mut un[..=u_len];
    let dn = &dn[..d_len];
    let mut quot = [0u64; W];
    let mut rem = [0u64; W];

    match d_len {
        1 => {
            let dv = dn[0];
            let reciprocal = reciprocal_2by1(dv);
            let mut r = un[u_len];
            for j in (0..u_len).rev() {
                let (q, rr) = udivrem_2by1(r, un[j], dv, reciprocal);
                quot[j] = q;
                r = rr;
            }
            rem[0] = r >> shift;
        }
        2 => {
            let reciprocal = reciprocal_3by2(dn[1], dn[0]);
            let mut r1 = un[u_len];
            let mut r0 = un[u_len - 1];
            for j in (0..u_len - 1).rev() {
                let (q, n1, n0) = udivrem_3by2(r1, r0, un[j], dn[1], dn[0], reciprocal);
                quot[j] = q;
                r1 = n1;
                r0 = n0;
            }
            rem[0] = (r0 >> shift) | (r1 << (63 - shift) << 1);
            rem[1] = r1 >> shift;
        }
        _ => {
            knuth_long_division(&mut quot, un, dn);
            for i in 0..d_len - 1 {
                rem[i] = (un[i] >> shift) | (un[i + 1] << (63 - shift) << 1);
            }
            rem[d_len - 1] = un[d_len - 1] >> shift;
        }
    }
    (to_le(quot), to_le(rem))
}

/// Algorithm D main loop on normalized little-endian operands. Leaves the
/// normalized remainder in the low `d.len()` words of `u`.
fn knuth_long_division(quot: &mut [u64], u: &mut [u64], d: &[u64]) {
    let n = d.len();
    let dh = d[n - 1];
    let dl = d[n - 2];
    let reciprocal = reciprocal_2by1(dh);

    for j in (0..u.len() - n).rev() {
        let u2 = u[j + n];
        let u1 = u[j + n - 1];
        let u0 = u[j + n - 2];

        let mut qhat;
        if u2 >= dh {
            // u2 == dh: estimate b - 1 with rhat = u1 + dh
            qhat = u64::MAX;
            let (rhat, overflow) = u1.overflowing_add(dh);
            let (ph, pl) = mul_wide(qhat, dl);
            if !overflow && (ph > rhat || (ph == rhat && pl > u0)) {
                qhat -= 1;
            }
        } else {
            let (q, rhat) = udivrem_2by1(u2, u1, dh, reciprocal);
            qhat = q;
            let (ph, pl) = mul_wide(qhat, dl);
            if ph > rhat || (ph == rhat && pl > u0) {
                qhat -= 1;
            }
        }

        let borrow = sub_mul_to(&mut u[j..j + n], d, qhat);
        u[j + n] = u2.wrapping_sub(borrow);
        if u2 < borrow {
            // subtracted one divisor too many
            qhat = qhat.wrapping_sub(1);
            let carry = add_to(&mut u[j..j + n], d);
            u[j + n] = u[j + n].wrapping_add(carry);
        }
        quot[j] = qhat;
    }
}

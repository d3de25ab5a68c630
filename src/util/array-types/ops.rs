/* ************************************************************************ **
** This file is part of springnet, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
**                                                                          **
** Be aware that not all of springnet is provided under this permissive     **
** license, and that the project as a whole is licensed under the GPL 3.0.  **
** ************************************************************************ */

use std::ops::{Add, Sub, Neg, Mul, Div};
use std::ops::{AddAssign, SubAssign, MulAssign, DivAssign};

use crate::types::{V3, M33};

// Generates an impl for each combination of owned and borrowed operands.
// The body sees both operands as references.
macro_rules! impl_binop {
    ($Trait:ident::$method:ident for $A:ty, $B:ty => $Out:ty, |$a:ident, $b:ident| $body:expr) => {
        impl_binop!(@one $Trait::$method [      ] $A, [      ] $B => $Out, |$a, $b| $body);
        impl_binop!(@one $Trait::$method [&'a   ] $A, [      ] $B => $Out, |$a, $b| $body);
        impl_binop!(@one $Trait::$method [      ] $A, [&'b   ] $B => $Out, |$a, $b| $body);
        impl_binop!(@one $Trait::$method [&'a   ] $A, [&'b   ] $B => $Out, |$a, $b| $body);
    };
    (@one $Trait:ident::$method:ident [$($ra:tt)*] $A:ty, [$($rb:tt)*] $B:ty => $Out:ty, |$a:ident, $b:ident| $body:expr) => {
        #[allow(unused_lifetimes)]
        impl<'a, 'b> $Trait<$($rb)* $B> for $($ra)* $A {
            type Output = $Out;

            #[inline]
            fn $method(self, other: $($rb)* $B) -> $Out {
                let $a: &$A = &self;
                let $b: &$B = &other;
                $body
            }
        }
    };
}

// ---------------------------------------------------------------------------
// vector-vector ops

impl_binop!(Add::add for V3, V3 => V3, |a, b| V3::from_fn(|k| a[k] + b[k]));
impl_binop!(Sub::sub for V3, V3 => V3, |a, b| V3::from_fn(|k| a[k] - b[k]));

impl Neg for V3 {
    type Output = V3;

    #[inline]
    fn neg(self) -> V3 { self.map(|x| -x) }
}

impl<'a> Neg for &'a V3 {
    type Output = V3;

    #[inline]
    fn neg(self) -> V3 { self.map(|x| -x) }
}

impl<'b> AddAssign<&'b V3> for V3 {
    #[inline]
    fn add_assign(&mut self, other: &'b V3) { *self = *self + other; }
}

impl AddAssign<V3> for V3 {
    #[inline]
    fn add_assign(&mut self, other: V3) { *self += &other; }
}

impl<'b> SubAssign<&'b V3> for V3 {
    #[inline]
    fn sub_assign(&mut self, other: &'b V3) { *self = *self - other; }
}

impl SubAssign<V3> for V3 {
    #[inline]
    fn sub_assign(&mut self, other: V3) { *self -= &other; }
}

// ---------------------------------------------------------------------------
// vector-scalar ops

impl_binop!(Mul::mul for V3, f64 => V3, |a, s| a.map(|x| x * s));
impl_binop!(Div::div for V3, f64 => V3, |a, s| a.map(|x| x / s));
impl_binop!(Mul::mul for f64, V3 => V3, |s, a| a.map(|x| *s * x));

impl MulAssign<f64> for V3 {
    #[inline]
    fn mul_assign(&mut self, s: f64) { *self = *self * s; }
}

impl DivAssign<f64> for V3 {
    #[inline]
    fn div_assign(&mut self, s: f64) { *self = *self / s; }
}

// ---------------------------------------------------------------------------
// matrix ops

impl_binop!(Add::add for M33, M33 => M33, |a, b| M33::from_fn(|r, c| a[r][c] + b[r][c]));
impl_binop!(Sub::sub for M33, M33 => M33, |a, b| M33::from_fn(|r, c| a[r][c] - b[r][c]));
impl_binop!(Mul::mul for M33, f64 => M33, |a, s| a.map(|x| x * s));

// row vector times matrix
impl_binop!(Mul::mul for V3, M33 => V3, |a, m| {
    V3::from_fn(|c| a[0] * m[0][c] + a[1] * m[1][c] + a[2] * m[2][c])
});

impl_binop!(Mul::mul for M33, M33 => M33, |a, b| M33([a[0] * b, a[1] * b, a[2] * b]));

/// In-place right multiplication: `m *= s` is `m = m * s`.
impl<'b> MulAssign<&'b M33> for M33 {
    #[inline]
    fn mul_assign(&mut self, other: &'b M33) { *self = *self * other; }
}

impl MulAssign<M33> for M33 {
    #[inline]
    fn mul_assign(&mut self, other: M33) { *self *= &other; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arith() {
        let a = V3([1.0, 2.0, 3.0]);
        let b = V3([0.5, 0.5, 0.5]);
        assert_eq!(a + b, V3([1.5, 2.5, 3.5]));
        assert_eq!(&a - &b, V3([0.5, 1.5, 2.5]));
        assert_eq!(-a, V3([-1.0, -2.0, -3.0]));
        assert_eq!(2.0 * &a, a * 2.0);
        assert_eq!(a / 2.0, V3([0.5, 1.0, 1.5]));

        let mut c = a;
        c += b;
        c -= &a;
        c *= 4.0;
        assert_eq!(c, V3([2.0; 3]));
    }

    #[test]
    fn row_convention() {
        let m = M33::from([
            [1.0, 2.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 3.0],
        ]);
        // unit fractional vectors pick out rows
        assert_eq!(V3([1.0, 0.0, 0.0]) * m, m.row(0));
        assert_eq!(V3([0.0, 0.0, 1.0]) * &m, m.row(2));
        assert_eq!(V3([1.0, 1.0, 1.0]) * m, V3([1.0, 3.0, 3.0]));
    }

    #[test]
    fn mul_assign_is_right_multiplication() {
        let a = M33::from([
            [1.0, 2.0, 0.0],
            [0.0, 1.0, 0.0],
            [4.0, 0.0, 3.0],
        ]);
        let s = M33::from_diag(V3([2.0, 1.0, 0.5]));
        let mut m = a;
        m *= &s;
        assert_eq!(m, a * s);
        assert_eq!(m.row(0), V3([2.0, 2.0, 0.0]));
        assert_eq!(m.row(2), V3([8.0, 0.0, 1.5]));
    }
}

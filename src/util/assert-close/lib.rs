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

//! Approximate equality assertions for floating point data.
//!
//! ```
//! # #[macro_use] extern crate springnet_assert_close;
//! # fn main() {
//! assert_close!(1.0, 1.0 + 1e-12);
//! assert_close!(abs=1e-8, [0.0, 1.0, 2.0], [1e-9, 1.0, 2.0]);
//! assert_close!(rel=1e-3, abs=0.0, 100.0, 100.01, "energy of {}", "ring");
//! # }
//! ```

#[macro_use]
extern crate failure;
use std::fmt;

/// Relative tolerance used when none is given.
pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {
        $crate::assert_close_impl!{@parsing [$($t)*] [[@rel $crate::DEFAULT_NONZERO_TOL] [@abs 0.0]]}
    };
}

#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            $crate::assert_close!{$($t)*}
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! assert_close_impl {
    (@parsing [rel=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@rel $tol]]);
    };
    (@parsing [abs=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@abs $tol]]);
    };
    (@parsing [$a:expr, $b:expr $(,)*] $assignments:tt) => {
        $crate::assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt "not nearly equal!"])
    };
    (@parsing [$a:expr, $b:expr, $($fmt:tt)+] $assignments:tt) => {
        $crate::assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt $($fmt)+])
    };
    (@expand [$($assignment:tt)*] [@comp $a:expr, $b:expr] [@fmt $($fmt:tt)+] ) => {
        #[allow(unused_mut)]
        #[allow(unused_assignments)]
        {
            let a = $a;
            let b = $b;

            let mut abs;
            let mut rel;
            $(
                $crate::assert_close_impl!{@stmt::assign [abs, rel] $assignment}
            )*

            let tol = $crate::Tolerances { abs, rel };
            if let Err(e) = $crate::CheckClose::check_close(&a, &b, tol) {
                panic!(
                    "{} (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                    format!($($fmt)*), rel, abs, a, b, e,
                );
            }
        }
    };
    (@stmt::assign [$abs:ident, $rel:ident] [@abs $tol:expr]) => { $abs = $tol; };
    (@stmt::assign [$abs:ident, $rel:ident] [@rel $tol:expr]) => { $rel = $tol; };
}

/// Absolute and relative tolerances, combined as in Python's `math.isclose`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Tolerances {
    #[inline]
    pub fn accepts(&self, a: f64, b: f64) -> bool {
        assert!(self.rel >= 0.0);
        assert!(self.abs >= 0.0);

        // also catches infinities of the same sign
        if a == b { return true; }
        if a.is_infinite() || b.is_infinite() { return false; }

        // NaN falls through to false here
        (a - b).abs() < self.abs.max(self.rel * a.abs()).max(self.rel * b.abs())
    }
}

/// The first pair of elements found to differ.
#[derive(Debug, Fail)]
pub struct CheckCloseError {
    /// Flat index of the offending element. (`0` for scalars)
    pub index: usize,
    pub values: (f64, f64),
    pub tol: Tolerances,
}

impl fmt::Display for CheckCloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, right) = self.values;
        write!(f, "failed at index {}:\n  left: {:?}\n right: {:?}\n   tol: {:?}",
            self.index, left, right, self.tol)
    }
}

/// Elementwise approximate comparison.
///
/// Implementors only need to expose their data as a sequence of `f64`;
/// the comparison logic lives in the provided method.
pub trait CheckClose<Rhs: ?Sized = Self> {
    fn close_elements(&self) -> Vec<f64>;
    fn other_elements(other: &Rhs) -> Vec<f64>;

    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError> {
        let left = self.close_elements();
        let right = Self::other_elements(other);
        assert_eq!(left.len(), right.len(), "length mismatch in check_close");

        for (index, (&a, &b)) in left.iter().zip(&right).enumerate() {
            if !tol.accepts(a, b) {
                return Err(CheckCloseError { index, values: (a, b), tol });
            }
        }
        Ok(())
    }
}

/// Types that flatten into a sequence of `f64` for comparison purposes.
pub trait Flatten {
    fn flatten_into(&self, out: &mut Vec<f64>);
}

impl Flatten for f64 {
    fn flatten_into(&self, out: &mut Vec<f64>) { out.push(*self) }
}

impl<'a, T: ?Sized + Flatten> Flatten for &'a T {
    fn flatten_into(&self, out: &mut Vec<f64>) { (**self).flatten_into(out) }
}

impl<T: Flatten> Flatten for [T] {
    fn flatten_into(&self, out: &mut Vec<f64>) {
        for x in self { x.flatten_into(out); }
    }
}

impl<T: Flatten> Flatten for Vec<T> {
    fn flatten_into(&self, out: &mut Vec<f64>) { self[..].flatten_into(out) }
}

macro_rules! gen_array_impls {
    ($($n:tt)*) => {$(
        impl<T: Flatten> Flatten for [T; $n] {
            fn flatten_into(&self, out: &mut Vec<f64>) { self[..].flatten_into(out) }
        }
    )*};
}

gen_array_impls! { 1 2 3 4 5 6 7 8 9 }

impl<A: ?Sized + Flatten, B: ?Sized + Flatten> CheckClose<B> for A {
    fn close_elements(&self) -> Vec<f64> {
        let mut out = vec![];
        self.flatten_into(&mut out);
        out
    }

    fn other_elements(other: &B) -> Vec<f64> {
        let mut out = vec![];
        other.flatten_into(&mut out);
        out
    }
}

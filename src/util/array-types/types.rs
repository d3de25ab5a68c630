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

use std::ops::{Deref, DerefMut};
use std::fmt;

/// A 3-dimensional vector with operations for linear algebra.
#[derive(Copy, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct V3(pub [f64; 3]);

/// A square dense 3x3 matrix, stored as rows.
#[derive(Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct M33(pub [V3; 3]);

// ---------------------------------------------------------------------------
// Both types behave generally like their backing array type.

macro_rules! impl_array_like {
    ($($T:ident of $E:ty;)*) => {$(
        impl Deref for $T {
            type Target = [$E; 3];

            #[inline(always)]
            fn deref(&self) -> &Self::Target { &self.0 }
        }

        impl DerefMut for $T {
            #[inline(always)]
            fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
        }

        impl<'a> IntoIterator for &'a $T {
            type Item = &'a $E;
            type IntoIter = std::slice::Iter<'a, $E>;

            #[inline(always)]
            fn into_iter(self) -> Self::IntoIter { self.0.iter() }
        }

        // forward the debug impl without a surrounding "V3(...)", which
        // keeps debug output valid JSON
        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self.0, f)
            }
        }
    )*};
}

impl_array_like! {
    V3 of f64;
    M33 of V3;
}

impl From<[f64; 3]> for V3 {
    fn from(arr: [f64; 3]) -> Self { V3(arr) }
}

impl From<[[f64; 3]; 3]> for M33 {
    fn from(arr: [[f64; 3]; 3]) -> Self { M33([V3(arr[0]), V3(arr[1]), V3(arr[2])]) }
}

impl M33 {
    /// Cast into a plain `[[f64; 3]; 3]`.
    pub fn into_array(self) -> [[f64; 3]; 3] { [self[0].0, self[1].0, self[2].0] }
}

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

// 1D test functions for e.g. linesearch.
pub mod one_dee {
    pub trait Differentiable1d: Clone {
        type Derivative: Differentiable1d;
        fn evaluate(&self, x: f64) -> f64;
        fn derivative(&self) -> Self::Derivative;

        fn scale_y(&self, scale: f64) -> ScaleY<Self> { ScaleY(scale, self.clone()) }
        fn recenter(&self, center: f64) -> Recenter<Self> { Recenter(center, self.clone()) }
    }

    /// Computes `f(center + x)`
    #[derive(Debug, Copy, Clone)] pub struct Recenter<F>(pub f64, pub F);
    /// Computes `scale * f(x)`
    #[derive(Debug, Copy, Clone)] pub struct ScaleY<F>(pub f64, pub F);

    impl<F: Differentiable1d> Differentiable1d for Recenter<F> {
        type Derivative = Recenter<F::Derivative>;
        fn evaluate(&self, x: f64) -> f64 { self.1.evaluate(self.0 + x) }
        fn derivative(&self) -> Self::Derivative { self.1.derivative().recenter(self.0) }
    }

    impl<F: Differentiable1d> Differentiable1d for ScaleY<F> {
        type Derivative = ScaleY<F::Derivative>;
        fn evaluate(&self, x: f64) -> f64 { self.0 * self.1.evaluate(x) }
        fn derivative(&self) -> Self::Derivative { self.1.derivative().scale_y(self.0) }
    }

    /// A polynomial, with coefficients in increasing order of degree.
    #[derive(Debug, Clone)]
    pub struct Polynomial(Vec<f64>);

    impl Polynomial {
        pub fn from_coeffs(coeffs: &[f64]) -> Polynomial { Polynomial(coeffs.to_owned()) }

        /// Random coefficients in `[-max, max]`.
        pub fn random(degree: u32, max: f64) -> Polynomial {
            let coeffs = crate::util::random::uniform_n(degree as usize + 1, -max, max);
            Polynomial(coeffs)
        }
    }

    impl Differentiable1d for Polynomial {
        type Derivative = Polynomial;

        fn evaluate(&self, x: f64) -> f64 {
            // Horner
            self.0.iter().rev().fold(0.0, |acc, &c| acc * x + c)
        }

        fn derivative(&self) -> Polynomial {
            Polynomial(self.0.iter().enumerate().skip(1).map(|(i, &c)| c * i as f64).collect())
        }
    }

    #[test]
    fn polynomial_eval() {
        let poly = Polynomial::from_coeffs(&[5422.0, 1084.0, -27.0, 1.0]);
        assert_close!(poly.evaluate(3.141592653589793), 8592.013394342222);
        assert_close!(poly.derivative().evaluate(2.0), 1084.0 - 108.0 + 12.0);
    }
}

// N-dimensional test functions for e.g. conjugate gradient
pub mod n_dee {
    use springnet_slice_math::{vdot, v, V, vsqnorm};

    /// Quadratic bowl `sum_i scale_i (x_i - center_i)^2`.
    #[derive(Debug, Clone)]
    pub struct Bowl {
        pub center: Vec<f64>,
        pub scales: Vec<f64>,
    }

    impl Bowl {
        pub fn diff(&self, position: &[f64]) -> (f64, Vec<f64>) {
            let V(d) = v(position) - v(&self.center);
            let value: f64 = izip!(&d, &self.scales).map(|(d, s)| s * d * d).sum();
            let grad: Vec<f64> = izip!(&d, &self.scales).map(|(d, s)| 2.0 * s * d).collect();
            (value, grad)
        }
    }

    /// The function
    ///
    ///     sum[i = 1 -> d] (1 - x_i)^2 - sum[i = 2 -> d] x_i x_{i-1}
    ///
    /// It has no local extrema aside from the global minimum.
    ///
    /// References:
    /// * https://www.sfu.ca/~ssurjano/trid.html
    pub struct Trid(pub usize);

    impl Trid {
        pub fn min_position(&self) -> Vec<f64> {
            let d = self.0 as f64;
            (0..self.0)
                .map(|i| i as f64)
                .map(|i| (i + 1.0) * (d - i))
                .collect()
        }

        pub fn min_value(&self) -> f64 {
            let d = self.0 as f64;
            -d * (d + 4.0) * (d - 1.0) / 6.0
        }

        pub fn diff(&self, pos: &[f64]) -> (f64, Vec<f64>) {
            assert_eq!(pos.len(), self.0);
            let n = pos.len();

            let V(one_minus) = -v(pos) + v(vec![1.0; n]);
            let value = vsqnorm(&one_minus) - vdot(&pos[1..], &pos[..n - 1]);

            let grad: Vec<f64> = (0..n).map(|i| {
                let left = if i > 0 { pos[i - 1] } else { 0.0 };
                let right = if i + 1 < n { pos[i + 1] } else { 0.0 };
                2.0 * (pos[i] - 1.0) - left - right
            }).collect();
            (value, grad)
        }
    }
}

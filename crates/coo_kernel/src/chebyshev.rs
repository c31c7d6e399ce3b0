//! Chebyshev series evaluation.

/// Evaluate `Σ c_k T_k(s)` with the Clenshaw recurrence, `s` in [-1, 1].
pub fn clenshaw(coeffs: &[f64], s: f64) -> f64 {
    let Some((&c0, rest)) = coeffs.split_first() else {
        return 0.0;
    };
    let two_s = 2.0 * s;
    let (mut b1, mut b2) = (0.0, 0.0);
    for &c in rest.iter().rev() {
        let b = two_s * b1 - b2 + c;
        b2 = b1;
        b1 = b;
    }
    s * b1 - b2 + c0
}

/// Evaluate `Σ c_k T_k(s)` and its derivative with respect to `s`.
///
/// Runs the forward recurrences
/// `T_k = 2s T_{k-1} − T_{k-2}` and `T_k' = 2 T_{k-1} + 2s T_{k-1}' − T_{k-2}'`.
pub fn value_and_derivative(coeffs: &[f64], s: f64) -> (f64, f64) {
    match coeffs {
        [] => (0.0, 0.0),
        [c0] => (*c0, 0.0),
        [c0, c1, rest @ ..] => {
            let two_s = 2.0 * s;
            let (mut t2, mut t1) = (1.0, s);
            let (mut d2, mut d1) = (0.0, 1.0);
            let mut value = c0 + c1 * s;
            let mut deriv = *c1;
            for &c in rest {
                let t = two_s * t1 - t2;
                let d = 2.0 * t1 + two_s * d1 - d2;
                value += c * t;
                deriv += c * d;
                (t2, t1) = (t1, t);
                (d2, d1) = (d1, d);
            }
            (value, deriv)
        }
    }
}

//! Three-vector helpers on plain `[f64; 3]` arrays.

/// Dot product.
#[inline]
pub fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product `a × b`.
#[inline]
pub fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean norm.
///
/// Scales by the largest component first so huge or tiny vectors do not
/// overflow or underflow.
pub fn norm(v: &[f64; 3]) -> f64 {
    let max = v[0].abs().max(v[1].abs()).max(v[2].abs());
    if max == 0.0 || !max.is_finite() {
        return max;
    }
    let (x, y, z) = (v[0] / max, v[1] / max, v[2] / max);
    max * (x * x + y * y + z * z).sqrt()
}

#[inline]
pub fn scale(v: &[f64; 3], s: f64) -> [f64; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

#[inline]
pub fn add(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Unit vector along `v`, or `None` for a zero or non-finite vector.
pub fn unit(v: &[f64; 3]) -> Option<[f64; 3]> {
    let n = norm(v);
    if n == 0.0 || !n.is_finite() {
        return None;
    }
    Some(scale(v, 1.0 / n))
}

/// True when every component is finite.
pub fn is_finite(v: &[f64; 3]) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_is_right_handed() {
        assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(cross(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn norm_handles_large_components() {
        let n = norm(&[3.0e200, 4.0e200, 0.0]);
        assert!((n - 5.0e200).abs() / 5.0e200 < 1e-15);
    }

    #[test]
    fn unit_of_zero_is_none() {
        assert_eq!(unit(&[0.0; 3]), None);
        assert_eq!(unit(&[f64::INFINITY, 0.0, 0.0]), None);
    }

    #[test]
    fn unit_has_unit_length() {
        let u = unit(&[1.0e8, -2.0e7, 3.0]).unwrap();
        assert!((norm(&u) - 1.0).abs() < 1e-15);
    }
}

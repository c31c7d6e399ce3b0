//! Row-major 3×3 rotation matrices.
//!
//! A `RotationMatrix3x3` maps vectors from a source frame into a target
//! frame: `v_to = M · v_from`. Its rows are the target frame's basis vectors
//! expressed in the source frame, so packing three unit vectors as rows
//! yields the rotation into the frame they span.

use crate::vector::{cross, dot, norm};

/// A 3×3 matrix stored as rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix3x3 {
    rows: [[f64; 3]; 3],
}

impl RotationMatrix3x3 {
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Build from three row vectors.
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> [f64; 3] {
        self.rows[i]
    }

    /// Flatten to 9 elements in row-major order.
    pub fn to_row_major(&self) -> [f64; 9] {
        let r = &self.rows;
        [
            r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2],
        ]
    }

    pub fn transpose(&self) -> Self {
        let r = &self.rows;
        Self {
            rows: [
                [r[0][0], r[1][0], r[2][0]],
                [r[0][1], r[1][1], r[2][1]],
                [r[0][2], r[1][2], r[2][2]],
            ],
        }
    }

    /// Matrix product `self · other`.
    pub fn mul(&self, other: &Self) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.rows[i][k] * other.rows[k][j]).sum();
            }
        }
        Self { rows: out }
    }

    /// Apply to a column vector: `self · v`.
    pub fn apply(&self, v: &[f64; 3]) -> [f64; 3] {
        [
            dot(&self.rows[0], v),
            dot(&self.rows[1], v),
            dot(&self.rows[2], v),
        ]
    }

    pub fn determinant(&self) -> f64 {
        dot(&self.rows[0], &cross(&self.rows[1], &self.rows[2]))
    }

    /// Largest deviation of `M · Mᵀ` from the identity.
    pub fn orthonormality_error(&self) -> f64 {
        let mut worst: f64 = 0.0;
        for i in 0..3 {
            worst = worst.max((norm(&self.rows[i]) - 1.0).abs());
            for j in (i + 1)..3 {
                worst = worst.max(dot(&self.rows[i], &self.rows[j]).abs());
            }
        }
        worst
    }

    /// Orthonormal and right-handed within `tol`.
    pub fn is_rotation(&self, tol: f64) -> bool {
        self.rows.iter().flatten().all(|x| x.is_finite())
            && self.orthonormality_error() <= tol
            && (self.determinant() - 1.0).abs() <= tol
    }

    /// Frame rotation by `angle` radians about the x axis.
    pub fn about_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rows: [[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]],
        }
    }

    /// Frame rotation by `angle` radians about the z axis.
    pub fn about_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rows: [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }
}

impl Default for RotationMatrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[[f64; 3]; 3]> for RotationMatrix3x3 {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::from_rows(rows)
    }
}

use nalgebra::DMatrix;
use num_complex::Complex;

/// Tests for symmetry of a real matrix
#[cfg(test)]
pub(crate) fn is_symmetric(matrix: &DMatrix<f64>) -> bool {
    matrix.is_square()
        && matrix
            .iter()
            .zip(matrix.transpose().iter())
            .all(|(element, transposed)| {
                (element - transposed).abs()
                    <= std::f64::EPSILON * 100_f64 * element.abs().max(1_f64)
            })
}

/// The backward error `|AX - B| / (|A| |X| + |B|)` of a candidate solution `X` of `AX = B`,
/// in the Frobenius norm
pub(crate) fn relative_residual(
    lhs: &DMatrix<Complex<f64>>,
    solution: &DMatrix<Complex<f64>>,
    rhs: &DMatrix<Complex<f64>>,
) -> f64 {
    let residual = (lhs * solution - rhs).norm();
    let scale = lhs.norm() * solution.norm() + rhs.norm();
    if scale == 0_f64 {
        residual
    } else {
        residual / scale
    }
}

/// True when every element of the matrix is finite
pub(crate) fn is_finite(matrix: &DMatrix<Complex<f64>>) -> bool {
    matrix.iter().all(|element| element.is_finite())
}

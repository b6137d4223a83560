use crate::errors::ParserError;
use ndarray::prelude::*;
use num_traits::Zero;

/// Dimension `n` of the symmetric matrix that is stored in a packed vector of the
/// given length. The length has to be a triangular number `n(n+1)/2`.
pub fn triangular_dimension(length: usize) -> Result<usize, ParserError> {
    let n: usize = ((0.25 + 2.0 * length as f64).sqrt() - 0.5).floor() as usize;
    if n * (n + 1) / 2 != length {
        return Err(ParserError::InvalidMatrixSize { length });
    }
    Ok(n)
}

/// Unpack a symmetric matrix from its lower triangle that is stored row by row:
/// `[a00, a10, a11, a20, a21, a22, ...]`.
pub fn vector_to_symmetric<T: Copy + Zero>(vector: &[T]) -> Result<Array2<T>, ParserError> {
    let n: usize = triangular_dimension(vector.len())?;
    let mut matrix: Array2<T> = Array2::zeros([n, n]);
    let mut k: usize = 0;
    for i in 0..n {
        for (j, value) in vector[k..k + i + 1].iter().enumerate() {
            matrix[[i, j]] = *value;
            matrix[[j, i]] = *value;
        }
        k += i + 1;
    }
    Ok(matrix)
}

/// Pack the lower triangle of a square matrix row by row. This is the inverse
/// of [vector_to_symmetric] for symmetric matrices.
pub fn symmetric_to_vector<T: Copy>(matrix: ArrayView2<T>) -> Vec<T> {
    let n: usize = matrix.nrows();
    let mut vector: Vec<T> = Vec::with_capacity(n * (n + 1) / 2);
    for (i, row) in matrix.outer_iter().enumerate() {
        vector.extend(row.iter().take(i + 1).copied());
    }
    vector
}

/// Reshape a flat record into a square matrix in row-major order.
pub fn vector_to_square(key: &str, vector: &[f64], n: usize) -> Result<Array2<f64>, ParserError> {
    Array2::from_shape_vec((n, n), vector.to_vec()).map_err(|_| {
        ParserError::malformed(
            key,
            format!(
                "{} elements can not be reshaped into a {}x{} matrix",
                vector.len(),
                n,
                n
            ),
        )
    })
}

use crate::defaults::{SOC_COLUMNS_PER_BLOCK, SOC_LINE_PREFIX};
use crate::errors::ParserError;
use ndarray::prelude::*;
use num_complex::Complex64;

const SOC_KEY: &str = "SOC matrix";

/// Drop the first `n` characters of a line.
fn strip_prefix_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}

/// Drop the trailing unit character (`i`) of an imaginary part.
fn strip_unit(token: &str) -> &str {
    let mut chars = token.chars();
    chars.next_back();
    chars.as_str()
}

fn parse_part(token: &str) -> Result<f64, ParserError> {
    token
        .parse::<f64>()
        .map_err(|_| ParserError::malformed(SOC_KEY, format!("invalid number: {}", token)))
}

/// Read a complex matrix (spin-orbit coupling) from the lines of its report section.
///
/// The columns are printed in blocks of five. Every block starts with a header line
/// followed by one line per row. Each row line starts with a label of 11 characters,
/// the remaining tokens are alternating real and imaginary parts, where the imaginary
/// part carries a trailing unit character:
/// ```text
///               |1, -1>            |1, 0>  ...
///  <0, 0|     0.000000  -1.250000i  0.000000  0.000000i ...
/// ```
/// `lines[0]` has to be the header line of the first block.
pub fn read_soc_matrix(
    lines: &[&str],
    dimensions: (usize, usize),
) -> Result<Array2<Complex64>, ParserError> {
    let (n_rows, n_cols): (usize, usize) = dimensions;
    let n_blocks: usize = if n_cols == 0 {
        0
    } else {
        (n_cols - 1) / SOC_COLUMNS_PER_BLOCK + 1
    };
    let mut matrix: Array2<Complex64> = Array2::zeros([n_rows, n_cols]);

    for ib in 0..n_rows {
        let mut real: Vec<&str> = Vec::with_capacity(n_cols);
        let mut imaginary: Vec<&str> = Vec::with_capacity(n_cols);
        for j in 0..n_blocks {
            // Every block is preceded by its header line.
            let line_idx: usize = j * n_rows + (j + 1) + ib;
            let line: &str = lines.get(line_idx).ok_or_else(|| {
                ParserError::malformed(
                    SOC_KEY,
                    format!("line {} of the matrix section is missing", line_idx),
                )
            })?;
            let tokens: Vec<&str> = strip_prefix_chars(line, SOC_LINE_PREFIX)
                .split_whitespace()
                .collect();
            real.extend(tokens.iter().step_by(2));
            imaginary.extend(tokens.iter().skip(1).step_by(2));
        }
        if real.len() != n_cols || imaginary.len() != n_cols {
            return Err(ParserError::malformed(
                SOC_KEY,
                format!(
                    "row {} has {} real and {} imaginary parts, expected {}",
                    ib + 1,
                    real.len(),
                    imaginary.len(),
                    n_cols
                ),
            ));
        }
        for (jc, (re, im)) in real.iter().zip(imaginary.iter()).enumerate() {
            matrix[[ib, jc]] = Complex64::new(parse_part(re)?, parse_part(strip_unit(im))?);
        }
    }
    Ok(matrix)
}

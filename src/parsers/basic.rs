use crate::defaults::{BASIC_INFO_WINDOW, OVERFLOW_FIELD};
use crate::errors::ParserError;
use ndarray::prelude::*;
use serde::Serialize;

const POINT_GROUP_KEY: &str = "Molecular Point Group";
const ABELIAN_SUBGROUP_KEY: &str = "Largest Abelian Subgroup";
const COUNTS_KEY: &str = "There are ";
const OCCUPIED_MARKER: &str = "-- Occupied --";
const VIRTUAL_MARKER: &str = "-- Virtual --";

/// Symmetry and size information printed at the beginning of a Q-Chem report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicInfo {
    pub molecular_point_group: String,
    pub largest_abelian_subgroup: String,
    pub n_alpha: usize,
    pub n_beta: usize,
    pub n_shells: usize,
    pub n_basis_functions: usize,
}

/// At most `len` characters of the output starting at the byte offset `start`.
fn window(output: &str, start: usize, len: usize) -> &str {
    let tail: &str = &output[start..];
    match tail.char_indices().nth(len) {
        Some((end, _)) => &tail[..end],
        None => tail,
    }
}

fn token_after(
    output: &str,
    key: &str,
    position: usize,
    idx: usize,
) -> Result<String, ParserError> {
    window(output, position, BASIC_INFO_WINDOW)
        .split_whitespace()
        .nth(idx)
        .map(|token| token.to_owned())
        .ok_or_else(|| ParserError::malformed(key, "the line is truncated"))
}

fn count_after(output: &str, position: usize, idx: usize) -> Result<usize, ParserError> {
    let token: String = token_after(output, COUNTS_KEY, position, idx)?;
    token
        .parse::<usize>()
        .map_err(|_| ParserError::malformed(COUNTS_KEY.trim(), format!("invalid count: {}", token)))
}

/// Read the point groups, the number of electrons per spin and the size of the basis.
/// The electron counts are taken from the first `There are ` sentence, the shell and
/// basis function counts from the second one.
pub fn read_basic_info(output: &str) -> Result<BasicInfo, ParserError> {
    let point_group: usize = output
        .find(POINT_GROUP_KEY)
        .ok_or_else(|| ParserError::missing(POINT_GROUP_KEY))?;
    let abelian: usize = output
        .find(ABELIAN_SUBGROUP_KEY)
        .ok_or_else(|| ParserError::missing(ABELIAN_SUBGROUP_KEY))?;
    let counts: Vec<usize> = output.match_indices(COUNTS_KEY).map(|(i, _)| i).collect();
    if counts.len() < 2 {
        return Err(ParserError::missing(COUNTS_KEY.trim()));
    }

    Ok(BasicInfo {
        molecular_point_group: token_after(output, POINT_GROUP_KEY, point_group, 3)?,
        largest_abelian_subgroup: token_after(output, ABELIAN_SUBGROUP_KEY, abelian, 3)?,
        n_alpha: count_after(output, counts[0], 2)?,
        n_beta: count_after(output, counts[0], 5)?,
        n_shells: count_after(output, counts[1], 2)?,
        n_basis_functions: count_after(output, counts[1], 5)?,
    })
}

/// Byte positions of the separator bars in the output, starting the search at `from`.
/// A run of consecutive bar patterns counts as one bar. A start past the end of the
/// output, or inside a character, gives no bars.
pub fn search_bars(output: &str, from: usize, bar: &str) -> Vec<usize> {
    let mut positions: Vec<usize> = Vec::new();
    let tail: &str = match output.get(from..) {
        Some(tail) => tail,
        None => return positions,
    };
    let mut previous_end: Option<usize> = None;
    for (start, matched) in tail.match_indices(bar) {
        let continues_run: bool = previous_end.map_or(false, |end| start <= end + 1);
        if !continues_run {
            positions.push(start + from);
        }
        previous_end = Some(start + matched.len());
    }
    positions
}

fn parse_row(header: &str, line: &str) -> Result<Vec<f64>, ParserError> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| ParserError::malformed(header, format!("invalid number: {}", token)))
        })
        .collect()
}

/// Read the square matrix that follows every occurrence of `header`. A section ends at
/// the `footer` or after `max_chars` characters. The dimension is the number of values
/// in the first line below the header.
pub fn read_simple_matrix(
    header: &str,
    output: &str,
    max_chars: usize,
    footer: &str,
) -> Result<Vec<Array2<f64>>, ParserError> {
    let mut matrices: Vec<Array2<f64>> = Vec::new();
    for (start, matched) in output.match_indices(header) {
        let section: &str = window(output, start + matched.len(), max_chars);
        let section: &str = match section.find(footer) {
            Some(end) => &section[..end],
            None => section,
        };
        let lines: Vec<&str> = section.split('\n').collect();
        let dim: usize = lines
            .get(1)
            .map(|line| line.split_whitespace().count())
            .ok_or_else(|| ParserError::malformed(header, "the matrix is empty"))?;
        if lines.len() < dim + 1 {
            return Err(ParserError::malformed(
                header,
                format!("expected {} rows, found {}", dim, lines.len() - 1),
            ));
        }
        let mut values: Vec<f64> = Vec::with_capacity(dim * dim);
        for line in lines[1..dim + 1].iter() {
            values.extend(parse_row(header, line)?);
        }
        let matrix: Array2<f64> = Array2::from_shape_vec((dim, dim), values)
            .map_err(|_| ParserError::malformed(header, "the rows differ in length"))?;
        matrices.push(matrix);
    }
    Ok(matrices)
}

fn energies_of(section: &str) -> Result<Vec<Option<f64>>, ParserError> {
    section
        .split('\n')
        .skip(1)
        .step_by(2)
        .flat_map(|line| line.split_whitespace())
        .map(|token| {
            if token == OVERFLOW_FIELD {
                Ok(None)
            } else {
                token.parse::<f64>().map(Some).map_err(|_| {
                    ParserError::malformed("Orbital Energies", format!("invalid number: {}", token))
                })
            }
        })
        .collect()
}

/// Orbital energies of one spin channel: first the occupied, then the virtual orbitals.
/// The energies are printed on every second line, alternating with the symmetry labels.
/// Fields that overflowed the fixed width are returned as `None`.
pub fn orbital_energies(section: &str) -> Result<Vec<Option<f64>>, ParserError> {
    let occupied: usize = section
        .find(OCCUPIED_MARKER)
        .ok_or_else(|| ParserError::missing(OCCUPIED_MARKER))?;
    let virtual_: usize = section
        .find(VIRTUAL_MARKER)
        .ok_or_else(|| ParserError::missing(VIRTUAL_MARKER))?;
    if virtual_ < occupied {
        return Err(ParserError::malformed(
            "Orbital Energies",
            "the virtual orbitals are printed before the occupied ones",
        ));
    }
    let mut energies: Vec<Option<f64>> = energies_of(&section[occupied..virtual_])?;
    energies.extend(energies_of(&section[virtual_..])?);
    Ok(energies)
}

/// Flip the sign of a vector such that its first non-zero component is positive.
pub fn standardize_vector(vector: [f64; 3]) -> [f64; 3] {
    let sign: f64 = match vector.iter().find(|x| **x != 0.0) {
        Some(x) if *x < 0.0 => -1.0,
        _ => 1.0,
    };
    // adding zero turns -0.0 into 0.0
    vector.map(|x| sign * x + 0.0)
}

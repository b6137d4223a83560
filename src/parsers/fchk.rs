use crate::basis::{BasisSet, ShellArrays, ShellArraysBuilder};
use crate::constants::BOHR_TO_ANGS;
use crate::defaults::NATURAL_ORBITALS_MULTI;
use crate::errors::ParserError;
use crate::initialization::Molecule;
use crate::matrix::{vector_to_square, vector_to_symmetric};
use crate::param::elements::element_from_number;
use crate::scanner::{read_all_records, RecordSpec, RecordValue, Records, TokenStream};
use crate::version::ParserDescriptor;
use log::{debug, info};
use ndarray::prelude::*;
use serde::Serialize;

pub const FCHK_PARSER: ParserDescriptor = ParserDescriptor {
    name: "fchk",
    compatibility: &[],
};

const CHARGE: &str = "Charge";
const MULTIPLICITY: &str = "Multiplicity";
const N_ALPHA: &str = "Number of alpha electrons";
const N_BETA: &str = "Number of beta electrons";
const ATOMIC_NUMBERS: &str = "Atomic numbers";
const COORDINATES: &str = "Current cartesian coordinates";
const N_BASIS: &str = "Number of basis functions";
const SHELL_TYPES: &str = "Shell types";
const N_PRIMITIVES: &str = "Number of primitives per shell";
const ATOM_MAP: &str = "Shell to atom map";
const EXPONENTS: &str = "Primitive exponents";
const COEFFICIENTS: &str = "Contraction coefficients";
const P_COEFFICIENTS: &str = "P(S=P) Contraction coefficients";
const ALPHA_MO: &str = "Alpha MO coefficients";
const BETA_MO: &str = "Beta MO coefficients";
const SHELL_COORDINATES: &str = "Coordinates of each shell";
const OVERLAP: &str = "Overlap Matrix";
const CORE_HAMILTONIAN: &str = "Core Hamiltonian Matrix";
const ALPHA_ENERGIES: &str = "Alpha Orbital Energies";
const BETA_ENERGIES: &str = "Beta Orbital Energies";
const SCF_DENSITY: &str = "Total SCF Density";
const ALPHA_NATO: &str = "Alpha NATO coefficients";
const BETA_NATO: &str = "Beta NATO coefficients";
const ALPHA_NATO_OCCUPANCIES: &str = "Alpha Natural Orbital occupancies";
const BETA_NATO_OCCUPANCIES: &str = "Beta Natural Orbital occupancies";
const NTO_OCCUPANCIES: &str = "Natural Transition Orbital occupancies";
const NTO_U: &str = "Natural Transition Orbital U coefficients";
const NTO_V: &str = "Natural Transition Orbital V coefficients";

/// The records of a formatted checkpoint file that are extracted.
pub const FCHK_VOCABULARY: [RecordSpec; 28] = [
    RecordSpec::int(CHARGE).required(),
    RecordSpec::int(MULTIPLICITY).required(),
    RecordSpec::int(N_ALPHA).required(),
    RecordSpec::int(N_BETA).required(),
    RecordSpec::int_array(ATOMIC_NUMBERS).required(),
    RecordSpec::float_array(COORDINATES).required(),
    RecordSpec::int(N_BASIS).required(),
    RecordSpec::int_array(SHELL_TYPES).required(),
    RecordSpec::int_array(N_PRIMITIVES).required(),
    RecordSpec::int_array(ATOM_MAP).required(),
    RecordSpec::float_array(EXPONENTS).required(),
    RecordSpec::float_array(COEFFICIENTS).required(),
    RecordSpec::float_array(P_COEFFICIENTS),
    RecordSpec::float_array(ALPHA_MO),
    RecordSpec::float_array(BETA_MO),
    RecordSpec::float_array(SHELL_COORDINATES),
    RecordSpec::float_array(OVERLAP),
    RecordSpec::float_array(CORE_HAMILTONIAN),
    RecordSpec::float_array(ALPHA_ENERGIES),
    RecordSpec::float_array(BETA_ENERGIES),
    RecordSpec::float_array(SCF_DENSITY),
    RecordSpec::float_array(ALPHA_NATO),
    RecordSpec::float_array(BETA_NATO),
    RecordSpec::float_array(ALPHA_NATO_OCCUPANCIES),
    RecordSpec::float_array(BETA_NATO_OCCUPANCIES),
    RecordSpec::float_array(NTO_OCCUPANCIES),
    RecordSpec::float_array(NTO_U),
    RecordSpec::float_array(NTO_V),
];

/// A quantity that is given for the alpha and optionally for the beta electrons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinPair<T> {
    pub alpha: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<T>,
}

impl<T> SpinPair<T> {
    pub fn new(alpha: T) -> Self {
        Self { alpha, beta: None }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ElectronNumbers {
    pub alpha: i64,
    pub beta: i64,
}

/// Occupied (`U`) and virtual (`V`) natural transition orbitals of one excitation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NtoCoefficients {
    #[serde(rename = "U")]
    pub u: Array2<f64>,
    #[serde(rename = "V", skip_serializing_if = "Option::is_none")]
    pub v: Option<Array2<f64>>,
}

/// Everything that is extracted from a formatted checkpoint file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FchkData {
    pub structure: Molecule,
    pub basis: BasisSet,
    pub number_of_electrons: ElectronNumbers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<SpinPair<Array2<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mo_energies: Option<SpinPair<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scf_density: Option<Array2<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_hamiltonian: Option<Array2<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap: Option<Array2<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nato_coefficients: Option<SpinPair<Array2<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nato_occupancies: Option<SpinPair<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nato_coefficients_multi: Option<Vec<SpinPair<Array2<f64>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nato_occupancies_multi: Option<Vec<SpinPair<Vec<f64>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nto_coefficients_multi: Option<Vec<NtoCoefficients>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nto_occupancies_multi: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Copy, Clone)]
pub struct FchkOptions {
    /// Collect every set of natural (transition) orbitals and not only the first one.
    pub natural_orbitals_multi: bool,
}

impl Default for FchkOptions {
    fn default() -> Self {
        Self {
            natural_orbitals_multi: NATURAL_ORBITALS_MULTI,
        }
    }
}

/// Parse a formatted checkpoint file with the default options.
pub fn parser_fchk(output: &str) -> Result<FchkData, ParserError> {
    parser_fchk_with_options(output, &FchkOptions::default())
}

pub fn parser_fchk_with_options(
    output: &str,
    options: &FchkOptions,
) -> Result<FchkData, ParserError> {
    // the name of the basis set is the last word of the second line
    let basis_name: &str = output
        .lines()
        .nth(1)
        .and_then(|line| line.split_whitespace().last())
        .ok_or_else(|| ParserError::missing("basis set name"))?;

    let stream: TokenStream = TokenStream::from(output);
    let records: Records = Records::extract(&stream, &FCHK_VOCABULARY)?;
    info!("{: <25} {}", "records found:", records.len());

    let structure: Molecule = read_structure(&records)?;
    let basis: BasisSet = read_basis(basis_name, &structure, &records)?;
    info!("{: <25} {}", "basis set:", basis.name);
    info!("{: <25} {}", "number of shells:", basis.n_shells());

    let nbas: usize = to_usize(N_BASIS, records.int(N_BASIS)?)?;
    let square = |key: &str| -> Result<Option<Array2<f64>>, ParserError> {
        optional_array(&records, key)?
            .map(|values| vector_to_square(key, values, nbas))
            .transpose()
    };
    let symmetric = |key: &str| -> Result<Option<Array2<f64>>, ParserError> {
        optional_array(&records, key)?
            .map(vector_to_symmetric)
            .transpose()
    };
    let vector = |key: &str| -> Result<Option<Vec<f64>>, ParserError> {
        Ok(optional_array(&records, key)?.map(|values| values.to_vec()))
    };

    let coefficients: Option<SpinPair<Array2<f64>>> =
        spin_pair(square(ALPHA_MO)?, square(BETA_MO)?);
    // Orbital energies belong to the MO coefficients and are dropped without them.
    let mo_energies: Option<SpinPair<Vec<f64>>> = match coefficients {
        Some(_) => spin_pair(vector(ALPHA_ENERGIES)?, vector(BETA_ENERGIES)?),
        None => None,
    };
    let nato_coefficients: Option<SpinPair<Array2<f64>>> =
        spin_pair(square(ALPHA_NATO)?, square(BETA_NATO)?);
    let nato_occupancies: Option<SpinPair<Vec<f64>>> = spin_pair(
        vector(ALPHA_NATO_OCCUPANCIES)?,
        vector(BETA_NATO_OCCUPANCIES)?,
    );

    let mut data: FchkData = FchkData {
        number_of_electrons: ElectronNumbers {
            alpha: records.int(N_ALPHA)?,
            beta: records.int(N_BETA)?,
        },
        structure,
        basis,
        coefficients,
        mo_energies,
        scf_density: symmetric(SCF_DENSITY)?,
        core_hamiltonian: symmetric(CORE_HAMILTONIAN)?,
        overlap: symmetric(OVERLAP)?,
        nato_coefficients,
        nato_occupancies,
        nato_coefficients_multi: None,
        nato_occupancies_multi: None,
        nto_coefficients_multi: None,
        nto_occupancies_multi: None,
    };

    if options.natural_orbitals_multi {
        if records.contains(ALPHA_NATO) {
            let (coefficients, occupancies) = read_all_nato(&stream)?;
            debug!("{: <25} {}", "NATO sets:", occupancies.len());
            if occupancies.len() > 1 {
                data.nato_coefficients_multi = Some(coefficients);
                data.nato_occupancies_multi = Some(occupancies);
            }
        }
        if records.contains(NTO_OCCUPANCIES) {
            let (coefficients, occupancies) = read_all_nto(&stream)?;
            debug!("{: <25} {}", "NTO sets:", occupancies.len());
            if occupancies.len() > 1 {
                data.nto_coefficients_multi = Some(coefficients);
                data.nto_occupancies_multi = Some(occupancies);
            }
        }
    }
    Ok(data)
}

fn to_usize(key: &str, value: i64) -> Result<usize, ParserError> {
    usize::try_from(value)
        .map_err(|_| ParserError::malformed(key, format!("negative value: {}", value)))
}

fn optional_array<'a>(records: &'a Records, key: &str) -> Result<Option<&'a [f64]>, ParserError> {
    if records.contains(key) {
        records.float_array(key).map(Some)
    } else {
        Ok(None)
    }
}

/// The beta part is only kept if the alpha part exists.
fn spin_pair<T>(alpha: Option<T>, beta: Option<T>) -> Option<SpinPair<T>> {
    alpha.map(|alpha| SpinPair { alpha, beta })
}

fn read_structure(records: &Records) -> Result<Molecule, ParserError> {
    let atomic_numbers: Vec<u8> = records
        .int_array(ATOMIC_NUMBERS)?
        .iter()
        .map(|z| {
            u8::try_from(*z).map_err(|_| {
                ParserError::malformed(ATOMIC_NUMBERS, format!("invalid atomic number: {}", z))
            })
        })
        .collect::<Result<Vec<u8>, ParserError>>()?;

    let coordinates: &[f64] = records.float_array(COORDINATES)?;
    if coordinates.len() % 3 != 0 {
        return Err(ParserError::malformed(
            COORDINATES,
            format!("{} values are not a multiple of 3", coordinates.len()),
        ));
    }
    let coordinates: Array2<f64> =
        Array2::from_shape_vec((coordinates.len() / 3, 3), coordinates.to_vec())
            .map_err(|_| ParserError::malformed(COORDINATES, "can not be reshaped into (n, 3)"))?
            * BOHR_TO_ANGS;

    let multiplicity: i64 = records.int(MULTIPLICITY)?;
    let multiplicity: u32 = u32::try_from(multiplicity).map_err(|_| {
        ParserError::malformed(MULTIPLICITY, format!("invalid multiplicity: {}", multiplicity))
    })?;
    let charge: i64 = records.int(CHARGE)?;
    let charge: i32 = i32::try_from(charge)
        .map_err(|_| ParserError::malformed(CHARGE, format!("invalid charge: {}", charge)))?;

    Ok(Molecule::from_atomic_numbers(coordinates, atomic_numbers)?
        .with_charge(charge)
        .with_multiplicity(multiplicity))
}

fn read_basis(
    name: &str,
    structure: &Molecule,
    records: &Records,
) -> Result<BasisSet, ParserError> {
    let mut builder: ShellArraysBuilder = ShellArraysBuilder::default();
    builder
        .shell_types(records.int_array(SHELL_TYPES)?.to_vec())
        .n_primitives(records.int_array(N_PRIMITIVES)?.to_vec())
        .atom_map(records.int_array(ATOM_MAP)?.to_vec())
        .exponents(records.float_array(EXPONENTS)?.to_vec())
        .coefficients(records.float_array(COEFFICIENTS)?.to_vec());
    if let Some(p_coefficients) = optional_array(records, P_COEFFICIENTS)? {
        builder.p_coefficients(p_coefficients.to_vec());
    }
    let arrays: ShellArrays = builder
        .build()
        .map_err(|err| ParserError::malformed(SHELL_TYPES, err.to_string()))?;

    // dummy atoms keep their placeholder symbol, so that every atom gets its shells
    let symbols: Vec<&str> = structure
        .atomic_numbers()
        .iter()
        .map(|z| element_from_number(*z).map_or("X", |element| element.symbol))
        .collect();
    BasisSet::from_shell_arrays(name, structure.atomic_numbers(), &symbols, &arrays)
}

/// Every occurrence of a real array record.
fn all_vectors(stream: &TokenStream, key: &'static str) -> Result<Vec<Vec<f64>>, ParserError> {
    read_all_records(stream, &RecordSpec::float_array(key))?
        .into_iter()
        .map(|value| match value {
            RecordValue::FloatArray(values) => Ok(values),
            RecordValue::Float(value) => Ok(vec![value]),
            _ => Err(ParserError::malformed(key, "expected a real array")),
        })
        .collect()
}

/// Every occurrence of a square matrix record, the dimension follows from its size.
fn all_squares(stream: &TokenStream, key: &'static str) -> Result<Vec<Array2<f64>>, ParserError> {
    all_vectors(stream, key)?
        .into_iter()
        .map(|values| {
            let n: usize = (values.len() as f64).sqrt().round() as usize;
            vector_to_square(key, &values, n)
        })
        .collect()
}

/// Attach the `i`-th occurrence of a secondary record to the `i`-th block.
fn attach<B, T>(
    blocks: &mut [B],
    values: Vec<T>,
    key: &str,
    mut set: impl FnMut(&mut B, T),
) -> Result<(), ParserError> {
    if values.len() > blocks.len() {
        return Err(ParserError::malformed(
            key,
            format!(
                "{} occurrences, but only {} blocks are opened",
                values.len(),
                blocks.len()
            ),
        ));
    }
    for (block, value) in blocks.iter_mut().zip(values.into_iter()) {
        set(block, value);
    }
    Ok(())
}

type NatoBlocks = (Vec<SpinPair<Array2<f64>>>, Vec<SpinPair<Vec<f64>>>);

/// All sets of natural orbitals. Every alpha record opens a new set, the beta records
/// are attached to the sets in the order of their appearance.
fn read_all_nato(stream: &TokenStream) -> Result<NatoBlocks, ParserError> {
    let mut coefficients: Vec<SpinPair<Array2<f64>>> = all_squares(stream, ALPHA_NATO)?
        .into_iter()
        .map(SpinPair::new)
        .collect();
    let mut occupancies: Vec<SpinPair<Vec<f64>>> = all_vectors(stream, ALPHA_NATO_OCCUPANCIES)?
        .into_iter()
        .map(SpinPair::new)
        .collect();
    attach(
        &mut coefficients,
        all_squares(stream, BETA_NATO)?,
        BETA_NATO,
        |block, beta| block.beta = Some(beta),
    )?;
    attach(
        &mut occupancies,
        all_vectors(stream, BETA_NATO_OCCUPANCIES)?,
        BETA_NATO_OCCUPANCIES,
        |block, beta| block.beta = Some(beta),
    )?;
    Ok((coefficients, occupancies))
}

/// All sets of natural transition orbitals. Every `U` record opens a new set.
fn read_all_nto(
    stream: &TokenStream,
) -> Result<(Vec<NtoCoefficients>, Vec<Vec<f64>>), ParserError> {
    let mut coefficients: Vec<NtoCoefficients> = all_squares(stream, NTO_U)?
        .into_iter()
        .map(|u| NtoCoefficients { u, v: None })
        .collect();
    attach(
        &mut coefficients,
        all_squares(stream, NTO_V)?,
        NTO_V,
        |block, v| block.v = Some(v),
    )?;
    let occupancies: Vec<Vec<f64>> = all_vectors(stream, NTO_OCCUPANCIES)?;
    Ok((coefficients, occupancies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::ShellType;
    use crate::utils::tests::{fchk_h2_with, FCHK_H2, FCHK_NATO_BLOCKS, FCHK_NTO_BLOCKS};
    use approx::AbsDiffEq;

    pub const EPSILON: f64 = 1e-12;

    #[test]
    fn structure_of_h2() {
        let data: FchkData = parser_fchk(FCHK_H2).unwrap();
        let mol: &Molecule = &data.structure;
        assert_eq!(mol.atomic_numbers(), &[1, 1]);
        assert_eq!(mol.symbols(), vec!["H", "H"]);
        assert_eq!(mol.charge(), 0);
        assert_eq!(mol.multiplicity(), 1);
        let reference: Array2<f64> = array![[0.0, 0.0, 0.0], [0.0, 0.0, 1.4 * BOHR_TO_ANGS]];
        assert!(mol.coordinates().abs_diff_eq(&reference, EPSILON));
        assert_eq!(data.number_of_electrons, ElectronNumbers { alpha: 1, beta: 1 });
    }

    #[test]
    fn basis_of_h2() {
        let data: FchkData = parser_fchk(FCHK_H2).unwrap();
        assert_eq!(data.basis.name, "STO-3G");
        assert_eq!(data.basis.primitive_type, "gaussian");
        assert_eq!(data.basis.atoms.len(), 2);
        for atom in data.basis.atoms.iter() {
            assert_eq!(atom.symbol, "H");
            assert_eq!(atom.shells.len(), 1);
            assert_eq!(atom.shells[0].shell_type, ShellType::S);
            assert_eq!(atom.shells[0].p_exponents.len(), 3);
            assert_eq!(atom.shells[0].p_con_coefficients, vec![0.0; 3]);
        }
        assert_eq!(data.basis.n_functions(), 2);
    }

    #[test]
    fn matrices_of_h2() {
        let data: FchkData = parser_fchk(FCHK_H2).unwrap();
        let coefficients = data.coefficients.unwrap();
        assert!(coefficients.alpha.abs_diff_eq(
            &array![[0.54893445, 0.54893445], [1.21146367, -1.21146367]],
            EPSILON
        ));
        assert!(coefficients.beta.is_none());
        let energies = data.mo_energies.unwrap();
        assert_eq!(energies.alpha, vec![-0.578554652, 0.67029339]);

        let overlap: Array2<f64> = data.overlap.unwrap();
        assert!(overlap.abs_diff_eq(&array![[1.0, 0.65934367], [0.65934367, 1.0]], EPSILON));
        let core: Array2<f64> = data.core_hamiltonian.unwrap();
        assert!(core.abs_diff_eq(
            &array![[-1.12040887, -0.95845528], [-0.95845528, -1.12040887]],
            EPSILON
        ));
        let density: Array2<f64> = data.scf_density.unwrap();
        assert!(density.abs_diff_eq(&Array2::from_elem([2, 2], 0.602672916), EPSILON));
        assert!(data.nato_coefficients.is_none());
        assert!(data.nto_coefficients_multi.is_none());
    }

    #[test]
    fn every_nato_set_is_collected() {
        let output: String = fchk_h2_with(FCHK_NATO_BLOCKS);
        let data: FchkData = parser_fchk(&output).unwrap();
        let first = data.nato_coefficients.unwrap();
        assert!(first.alpha.abs_diff_eq(&Array2::eye(2), EPSILON));
        assert_eq!(data.nato_occupancies.unwrap().beta, Some(vec![0.5, 0.5]));

        let coefficients = data.nato_coefficients_multi.unwrap();
        let occupancies = data.nato_occupancies_multi.unwrap();
        assert_eq!(coefficients.len(), 2);
        assert_eq!(occupancies.len(), 2);
        assert!(coefficients[1]
            .alpha
            .abs_diff_eq(&array![[0.0, 1.0], [1.0, 0.0]], EPSILON));
        assert!(coefficients[1]
            .beta
            .as_ref()
            .unwrap()
            .abs_diff_eq(&Array2::eye(2), EPSILON));
        assert_eq!(occupancies[1].alpha, vec![0.9, 0.1]);
        assert_eq!(occupancies[1].beta, Some(vec![0.8, 0.2]));
    }

    #[test]
    fn multi_scan_can_be_disabled() {
        let output: String = fchk_h2_with(FCHK_NATO_BLOCKS);
        let options = FchkOptions {
            natural_orbitals_multi: false,
        };
        let data: FchkData = parser_fchk_with_options(&output, &options).unwrap();
        assert!(data.nato_coefficients.is_some());
        assert!(data.nato_coefficients_multi.is_none());
    }

    #[test]
    fn every_nto_set_is_collected() {
        let output: String = fchk_h2_with(FCHK_NTO_BLOCKS);
        let data: FchkData = parser_fchk(&output).unwrap();
        let coefficients = data.nto_coefficients_multi.unwrap();
        let occupancies = data.nto_occupancies_multi.unwrap();
        assert_eq!(coefficients.len(), 2);
        assert_eq!(occupancies, vec![vec![0.95, 0.05], vec![0.6, 0.4]]);
        assert!(coefficients[0].u.abs_diff_eq(&Array2::eye(2), EPSILON));
        assert!(coefficients[1]
            .v
            .as_ref()
            .unwrap()
            .abs_diff_eq(&Array2::eye(2), EPSILON));
    }

    #[test]
    fn energies_require_coefficients() {
        let output: String = FCHK_H2.replace("Alpha MO coefficients", "Alpha XX coefficients");
        let data: FchkData = parser_fchk(&output).unwrap();
        assert!(data.coefficients.is_none());
        assert!(data.mo_energies.is_none());
    }

    #[test]
    fn missing_records_are_reported() {
        let output: String = FCHK_H2.replace("Shell to atom map", "Shell to nothing map");
        let result = parser_fchk(&output);
        assert_eq!(result, Err(ParserError::missing("Shell to atom map")));
    }

    #[test]
    fn inconsistent_matrices_are_rejected() {
        let output: String = FCHK_H2.replace(
            "Overlap Matrix                             R   N=           3\n  1.00000000E+00  6.59343670E-01  1.00000000E+00",
            "Overlap Matrix                             R   N=           2\n  1.00000000E+00  6.59343670E-01",
        );
        let result = parser_fchk(&output);
        assert_eq!(result, Err(ParserError::InvalidMatrixSize { length: 2 }));
    }

    #[test]
    fn output_is_serializable() {
        let data: FchkData = parser_fchk(FCHK_H2).unwrap();
        let json: serde_json::Value = serde_json::to_value(&data).unwrap();
        assert_eq!(json["basis"]["name"], "STO-3G");
        assert_eq!(json["basis"]["atoms"][0]["shells"][0]["shell_type"], 0);
        assert_eq!(json["number_of_electrons"]["alpha"], 1);
        assert!(json.get("nato_coefficients").is_none());
    }
}

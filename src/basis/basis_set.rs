use crate::basis::{Shell, ShellType};
use crate::defaults::{
    BASIS_ATOM_SEPARATOR, BASIS_PRECISION, BASIS_SCALE_FACTOR, PRIMITIVE_TYPE,
};
use crate::errors::ParserError;
use derive_builder::Builder;
use itertools::izip;
use log::warn;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const SHELL_TYPES_KEY: &str = "Shell types";
const N_PRIMITIVES_KEY: &str = "Number of primitives per shell";
const ATOM_MAP_KEY: &str = "Shell to atom map";
const EXPONENTS_KEY: &str = "Primitive exponents";

/// The flat per-shell and per-primitive arrays of a basis set, as they are stored in
/// the formatted checkpoint file. An instance is created with the associated builder:
/// ```ignore
/// ShellArraysBuilder::default()
///       .shell_types(vec![0, 0])
///       .n_primitives(vec![3, 3])
///       .atom_map(vec![1, 2])
///       .exponents(exponents)
///       .coefficients(coefficients)
///       .build()
///       .unwrap();
/// ```
/// The P-coefficients of sp shells are optional, programs omit them if the basis
/// contains no sp shell. In this case they are filled with zeros.
#[derive(Builder, Debug, Clone)]
pub struct ShellArrays {
    shell_types: Vec<i64>,
    n_primitives: Vec<i64>,
    atom_map: Vec<i64>,
    exponents: Vec<f64>,
    coefficients: Vec<f64>,
    #[builder(default, setter(strip_option))]
    p_coefficients: Option<Vec<f64>>,
}

impl ShellArrays {
    pub fn n_shells(&self) -> usize {
        self.shell_types.len()
    }

    fn p_coefficients(&self) -> Vec<f64> {
        match &self.p_coefficients {
            Some(p) => p.clone(),
            None => vec![0.0; self.coefficients.len()],
        }
    }

    /// Cumulative primitive offsets: the primitives of shell `i` are
    /// `offsets[i]..offsets[i + 1]`.
    fn primitive_offsets(&self) -> Result<Vec<usize>, ParserError> {
        let mut offsets: Vec<usize> = Vec::with_capacity(self.n_primitives.len() + 1);
        offsets.push(0);
        for n in self.n_primitives.iter() {
            if *n < 0 {
                return Err(ParserError::malformed(
                    N_PRIMITIVES_KEY,
                    format!("negative number of primitives: {}", n),
                ));
            }
            let last: usize = *offsets.last().unwrap_or(&0);
            offsets.push(last + *n as usize);
        }
        Ok(offsets)
    }

    fn check_lengths(&self) -> Result<(), ParserError> {
        let n_shells: usize = self.n_shells();
        if self.n_primitives.len() != n_shells {
            return Err(ParserError::malformed(
                N_PRIMITIVES_KEY,
                format!("{} entries for {} shells", self.n_primitives.len(), n_shells),
            ));
        }
        if self.atom_map.len() != n_shells {
            return Err(ParserError::malformed(
                ATOM_MAP_KEY,
                format!("{} entries for {} shells", self.atom_map.len(), n_shells),
            ));
        }
        Ok(())
    }
}

/// The distinct atom indices of the shell to atom map in the order of their first
/// occurrence, together with the index of the first shell and the number of shells.
/// The shells of one atom are expected to be consecutive in the map.
pub fn group_shells_by_atom(atom_map: &[i64]) -> Vec<(i64, usize, usize)> {
    let mut groups: Vec<(i64, usize, usize)> = Vec::new();
    for (idx, atom) in atom_map.iter().enumerate() {
        match groups.iter_mut().find(|(a, _, _)| a == atom) {
            Some(group) => group.2 += 1,
            None => groups.push((*atom, idx, 1)),
        }
    }
    groups
}

/// Basis functions centered on one atom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasisAtom {
    pub symbol: String,
    pub atomic_number: u8,
    pub shells: Vec<Shell>,
}

/// A named basis set of contracted Gaussian functions, grouped by atom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasisSet {
    pub name: String,
    pub primitive_type: String,
    pub atoms: Vec<BasisAtom>,
}

impl BasisSet {
    /// Reconstruct the nested per atom and per shell basis from the flat arrays.
    ///
    /// The shells are grouped into atoms by the order in which the atom indices first
    /// appear in the shell to atom map, the `i`-th group is assigned to the `i`-th atom.
    /// A map whose groups are not consecutive or not in the order of the atoms is not
    /// corrected, a warning is logged instead.
    pub fn from_shell_arrays<S: AsRef<str>>(
        name: &str,
        atomic_numbers: &[u8],
        symbols: &[S],
        arrays: &ShellArrays,
    ) -> Result<Self, ParserError> {
        arrays.check_lengths()?;
        let offsets: Vec<usize> = arrays.primitive_offsets()?;
        let p_coefficients: Vec<f64> = arrays.p_coefficients();
        let groups: Vec<(i64, usize, usize)> = group_shells_by_atom(&arrays.atom_map);

        if groups.len() < atomic_numbers.len() {
            return Err(ParserError::malformed(
                ATOM_MAP_KEY,
                format!(
                    "shells are assigned to {} atoms, but the molecule has {} atoms",
                    groups.len(),
                    atomic_numbers.len()
                ),
            ));
        }
        if groups.len() > atomic_numbers.len() {
            warn!(
                "The shell to atom map refers to {} atoms, the shells of the last {} are ignored",
                groups.len(),
                groups.len() - atomic_numbers.len()
            );
        }

        let mut atoms: Vec<BasisAtom> = Vec::with_capacity(atomic_numbers.len());
        for (iatom, (atomic_number, symbol)) in
            atomic_numbers.iter().zip(symbols.iter()).enumerate()
        {
            let (atom_index, first, count): (i64, usize, usize) = groups[iatom];
            if atom_index != iatom as i64 + 1 {
                warn!(
                    "Shells of atom {} in the shell to atom map are assigned to atom {} of the geometry",
                    atom_index,
                    iatom + 1
                );
            }
            let mut shells: Vec<Shell> = Vec::with_capacity(count);
            for ishell in first..first + count {
                if arrays.atom_map.get(ishell) != Some(&atom_index) {
                    warn!(
                        "The shells of atom {} are not consecutive in the shell to atom map",
                        atom_index
                    );
                }
                let code: i64 = *arrays.shell_types.get(ishell).ok_or_else(|| {
                    ParserError::malformed(
                        SHELL_TYPES_KEY,
                        format!("shell {} does not exist", ishell + 1),
                    )
                })?;
                let shell_type: ShellType = ShellType::try_from(code)?;
                let (ini, fin): (usize, usize) = (offsets[ishell], offsets[ishell + 1]);
                if fin > arrays.exponents.len()
                    || fin > arrays.coefficients.len()
                    || fin > p_coefficients.len()
                {
                    return Err(ParserError::malformed(
                        EXPONENTS_KEY,
                        format!(
                            "shell {} needs primitives {}..{}, but only {} are stored",
                            ishell + 1,
                            ini,
                            fin,
                            arrays.exponents.len()
                        ),
                    ));
                }
                shells.push(Shell::new(
                    shell_type,
                    arrays.exponents[ini..fin].to_vec(),
                    arrays.coefficients[ini..fin].to_vec(),
                    p_coefficients[ini..fin].to_vec(),
                ));
            }
            atoms.push(BasisAtom {
                symbol: symbol.as_ref().to_owned(),
                atomic_number: *atomic_number,
                shells,
            });
        }

        Ok(Self {
            name: name.to_owned(),
            primitive_type: PRIMITIVE_TYPE.to_owned(),
            atoms,
        })
    }

    /// Total number of basis functions.
    pub fn n_functions(&self) -> usize {
        self.atoms
            .iter()
            .flat_map(|atom| atom.shells.iter())
            .map(|shell| shell.functions)
            .sum()
    }

    pub fn n_shells(&self) -> usize {
        self.atoms.iter().map(|atom| atom.shells.len()).sum()
    }

    /// Plain text representation of the basis in the input format of Q-Chem/Gaussian.
    /// Every atom starts with its symbol followed by the shells and is closed by `****`.
    pub fn get_qc_input_txt(&self) -> String {
        let mut txt: String = String::new();
        for atom in self.atoms.iter() {
            txt += &format!("{}\n", atom.symbol);
            for shell in atom.shells.iter() {
                txt += &format!(
                    "{} {} {:.1}\n",
                    shell.shell_type.label().to_uppercase(),
                    shell.n_primitives(),
                    BASIS_SCALE_FACTOR
                );
                for (p, c, pc) in izip!(
                    shell.p_exponents.iter(),
                    shell.con_coefficients.iter(),
                    shell.p_con_coefficients.iter()
                ) {
                    if shell.shell_type == ShellType::SP {
                        txt += &format!(
                            "{} {} {} \n",
                            format_scientific(*p, BASIS_PRECISION),
                            format_scientific(*c, BASIS_PRECISION),
                            format_scientific(*pc, BASIS_PRECISION)
                        );
                    } else {
                        txt += &format!(
                            "{} {} \n",
                            format_scientific(*p, BASIS_PRECISION),
                            format_scientific(*c, BASIS_PRECISION)
                        );
                    }
                }
            }
            txt += BASIS_ATOM_SEPARATOR;
            txt += "\n";
        }
        txt
    }

    /// A fingerprint of the content of the basis set.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Hash for BasisSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.primitive_type.hash(state);
        for atom in self.atoms.iter() {
            atom.symbol.hash(state);
            atom.atomic_number.hash(state);
            for shell in atom.shells.iter() {
                shell.shell_type.hash(state);
                shell
                    .p_exponents
                    .iter()
                    .chain(shell.con_coefficients.iter())
                    .chain(shell.p_con_coefficients.iter())
                    .for_each(|x| x.to_bits().hash(state));
            }
        }
    }
}

/// Scientific notation with a signed exponent of at least two digits: `1.0000000000e+00`.
pub fn format_scientific(value: f64, precision: usize) -> String {
    let txt: String = format!("{:.*e}", precision, value);
    match txt.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => format!(
                "{}e{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.abs()
            ),
            Err(_) => txt,
        },
        None => txt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrogen_s() -> ShellArrays {
        ShellArraysBuilder::default()
            .shell_types(vec![0])
            .n_primitives(vec![1])
            .atom_map(vec![1])
            .exponents(vec![1.0])
            .coefficients(vec![1.0])
            .build()
            .unwrap()
    }

    /// Water in STO-3G: O has one s, one sp shell, the hydrogens one s shell each.
    fn water_sto3g() -> ShellArrays {
        ShellArraysBuilder::default()
            .shell_types(vec![0, -1, 0, 0])
            .n_primitives(vec![3, 3, 3, 3])
            .atom_map(vec![1, 1, 2, 3])
            .exponents(vec![
                130.70932, 23.808861, 6.4436083, 5.0331513, 1.1695961, 0.380389, 3.42525091,
                0.62391373, 0.1688554, 3.42525091, 0.62391373, 0.1688554,
            ])
            .coefficients(vec![
                0.15432897, 0.53532814, 0.44463454, -0.09996723, 0.39951283, 0.70011547,
                0.15432897, 0.53532814, 0.44463454, 0.15432897, 0.53532814, 0.44463454,
            ])
            .p_coefficients(vec![
                0.0, 0.0, 0.0, 0.15591627, 0.60768372, 0.39195739, 0.0, 0.0, 0.0, 0.0, 0.0,
                0.0,
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn single_s_shell_renders_as_input_deck() {
        let basis = BasisSet::from_shell_arrays("sto-3g", &[1], &["H"], &hydrogen_s()).unwrap();
        let txt: String = basis.get_qc_input_txt();
        assert_eq!(
            txt,
            "H\nS 1 1.0\n1.0000000000e+00 1.0000000000e+00 \n****\n"
        );
        // absent P-coefficients are zero filled
        assert_eq!(basis.atoms[0].shells[0].p_con_coefficients, vec![0.0]);
    }

    #[test]
    fn shells_are_grouped_by_atom() {
        let arrays = water_sto3g();
        let basis =
            BasisSet::from_shell_arrays("STO-3G", &[8, 1, 1], &["O", "H", "H"], &arrays).unwrap();
        assert_eq!(basis.atoms.len(), 3);
        assert_eq!(basis.atoms[0].shells.len(), 2);
        assert_eq!(basis.atoms[0].shells[1].shell_type, ShellType::SP);
        assert_eq!(basis.n_functions(), 7);
        assert_eq!(basis.n_shells(), 4);
        assert_eq!(basis.primitive_type, "gaussian");

        // the primitives of every atom cover exactly its slice of the flat arrays
        let mut n_primitives: Vec<i64> = Vec::new();
        let mut exponents: Vec<f64> = Vec::new();
        for atom in basis.atoms.iter() {
            for shell in atom.shells.iter() {
                n_primitives.push(shell.n_primitives() as i64);
                exponents.extend(shell.p_exponents.iter());
            }
        }
        assert_eq!(n_primitives, arrays.n_primitives);
        assert_eq!(exponents, arrays.exponents);
    }

    #[test]
    fn sp_shells_print_three_columns() {
        let basis = BasisSet::from_shell_arrays("STO-3G", &[8, 1, 1], &["O", "H", "H"], &water_sto3g())
            .unwrap();
        let txt: String = basis.get_qc_input_txt();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "O");
        assert_eq!(lines[1], "S 3 1.0");
        assert_eq!(lines[5], "SP 3 1.0");
        assert_eq!(
            lines[6],
            "5.0331513000e+00 -9.9967230000e-02 1.5591627000e-01 "
        );
        assert_eq!(lines[9], "****");
        assert_eq!(txt.matches("****").count(), 3);
    }

    #[test]
    fn grouping_follows_first_occurrence() {
        assert_eq!(
            group_shells_by_atom(&[2, 2, 1, 3, 3, 3]),
            vec![(2, 0, 2), (1, 2, 1), (3, 3, 3)]
        );
        // atom 2 is listed first in the map, so its shells go to the first atom
        let arrays = ShellArraysBuilder::default()
            .shell_types(vec![1, 0])
            .n_primitives(vec![1, 2])
            .atom_map(vec![2, 1])
            .exponents(vec![0.5, 1.0, 2.0])
            .coefficients(vec![1.0, 0.5, 0.5])
            .build()
            .unwrap();
        let basis = BasisSet::from_shell_arrays("x", &[1, 1], &["H", "H"], &arrays).unwrap();
        assert_eq!(basis.atoms[0].shells[0].shell_type, ShellType::P);
        assert_eq!(basis.atoms[1].shells[0].p_exponents, vec![1.0, 2.0]);
    }

    #[test]
    fn malformed_arrays_are_rejected() {
        let arrays = ShellArraysBuilder::default()
            .shell_types(vec![7])
            .n_primitives(vec![1])
            .atom_map(vec![1])
            .exponents(vec![1.0])
            .coefficients(vec![1.0])
            .build()
            .unwrap();
        assert_eq!(
            BasisSet::from_shell_arrays("x", &[1], &["H"], &arrays),
            Err(ParserError::UnsupportedShellType { code: 7 })
        );
        // more atoms than shell groups
        let result = BasisSet::from_shell_arrays("x", &[1, 1], &["H", "H"], &hydrogen_s());
        assert!(matches!(result, Err(ParserError::MalformedRecord { .. })));
        // primitive counts exceed the stored exponents
        let arrays = ShellArraysBuilder::default()
            .shell_types(vec![0])
            .n_primitives(vec![2])
            .atom_map(vec![1])
            .exponents(vec![1.0])
            .coefficients(vec![1.0])
            .build()
            .unwrap();
        let result = BasisSet::from_shell_arrays("x", &[1], &["H"], &arrays);
        assert!(matches!(result, Err(ParserError::MalformedRecord { .. })));
    }

    #[test]
    fn scientific_format() {
        assert_eq!(format_scientific(130.70932, 10), "1.3070932000e+02");
        assert_eq!(format_scientific(-0.09996723, 10), "-9.9967230000e-02");
        assert_eq!(format_scientific(0.0, 3), "0.000e+00");
        assert_eq!(format_scientific(1.0e-120, 1), "1.0e-120");
    }

    #[test]
    fn equal_content_has_equal_fingerprint() {
        let a = BasisSet::from_shell_arrays("sto-3g", &[1], &["H"], &hydrogen_s()).unwrap();
        let b = BasisSet::from_shell_arrays("sto-3g", &[1], &["H"], &hydrogen_s()).unwrap();
        let c = BasisSet::from_shell_arrays("6-31g", &[1], &["H"], &hydrogen_s()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}

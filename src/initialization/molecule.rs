use crate::errors::ParserError;
use crate::param::elements::{element_from_number, element_from_symbol, ElementData};
use ndarray::prelude::*;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Symbol of the dummy atom, it is not reported by [Molecule::symbols].
const DUMMY_SYMBOL: &str = "X";

/// Geometry and electronic composition of a molecule.
/// The coordinates are stored in Angstrom with one row per atom. Only the charge and the
/// multiplicity can be changed after the construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Molecule {
    coordinates: Array2<f64>,
    atomic_numbers: Vec<u8>,
    symbols: Vec<&'static str>,
    charge: i32,
    multiplicity: u32,
    name: Option<String>,
}

fn check_coordinates(coordinates: &Array2<f64>, n_atoms: usize) -> Result<(), ParserError> {
    if coordinates.dim() != (n_atoms, 3) {
        return Err(ParserError::malformed(
            "Current cartesian coordinates",
            format!(
                "expected {} atoms with 3 coordinates, found shape {:?}",
                n_atoms,
                coordinates.dim()
            ),
        ));
    }
    Ok(())
}

impl Molecule {
    /// Create a neutral singlet from the coordinates (in Angstrom) and the atomic numbers.
    /// The element symbols are taken from the element table.
    pub fn from_atomic_numbers(
        coordinates: Array2<f64>,
        atomic_numbers: Vec<u8>,
    ) -> Result<Self, ParserError> {
        check_coordinates(&coordinates, atomic_numbers.len())?;
        let symbols: Vec<&'static str> = atomic_numbers
            .iter()
            .map(|number| {
                element_from_number(*number)
                    .map(|element| element.symbol)
                    .ok_or_else(|| {
                        ParserError::malformed(
                            "Atomic numbers",
                            format!("unknown atomic number: {}", number),
                        )
                    })
            })
            .collect::<Result<Vec<&'static str>, ParserError>>()?;
        Ok(Self {
            coordinates,
            atomic_numbers,
            symbols,
            charge: 0,
            multiplicity: 1,
            name: None,
        })
    }

    /// Create a neutral singlet from the coordinates (in Angstrom) and the element symbols.
    /// The atomic numbers are taken from the element table.
    pub fn from_symbols<S: AsRef<str>>(
        coordinates: Array2<f64>,
        symbols: &[S],
    ) -> Result<Self, ParserError> {
        let elements: Vec<&'static ElementData> = symbols
            .iter()
            .map(|symbol| {
                element_from_symbol(symbol.as_ref()).ok_or_else(|| {
                    ParserError::malformed(
                        "Atomic symbols",
                        format!("unknown element symbol: {}", symbol.as_ref()),
                    )
                })
            })
            .collect::<Result<Vec<&'static ElementData>, ParserError>>()?;
        Self::from_atomic_numbers(coordinates, elements.iter().map(|e| e.number).collect())
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_multiplicity(mut self, multiplicity: u32) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn set_charge(&mut self, charge: i32) {
        self.charge = charge;
    }

    pub fn set_multiplicity(&mut self, multiplicity: u32) {
        self.multiplicity = multiplicity;
    }

    pub fn coordinates(&self) -> ArrayView2<f64> {
        self.coordinates.view()
    }

    pub fn atomic_numbers(&self) -> &[u8] {
        &self.atomic_numbers
    }

    /// Element symbols of all atoms except dummy atoms.
    pub fn symbols(&self) -> Vec<&'static str> {
        self.symbols
            .iter()
            .copied()
            .filter(|symbol| *symbol != DUMMY_SYMBOL)
            .collect()
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn number_of_atoms(&self) -> usize {
        self.coordinates.nrows()
    }

    /// Total number of electrons: the sum of the nuclear charges minus the net charge.
    pub fn number_of_electrons(&self) -> i64 {
        self.atomic_numbers.iter().map(|n| *n as i64).sum::<i64>() - self.charge as i64
    }

    /// Number of alpha electrons, such that `alpha - beta = multiplicity - 1`.
    pub fn alpha_electrons(&self) -> i64 {
        (self.number_of_electrons() + self.multiplicity as i64 - 1).div_euclid(2)
    }

    pub fn beta_electrons(&self) -> i64 {
        self.number_of_electrons() - self.alpha_electrons()
    }

    /// Atomic masses in atomic mass units.
    pub fn atomic_masses(&self) -> Array1<f64> {
        self.atomic_numbers
            .iter()
            .map(|n| element_from_number(*n).map_or(0.0, |element| element.mass))
            .collect()
    }

    /// Number of valence electrons, i.e. the electrons outside of the last closed noble gas shell.
    pub fn valence_electrons(&self) -> i64 {
        let valence: i64 = self
            .atomic_numbers
            .iter()
            .map(|number| {
                let z: i64 = *number as i64;
                match z {
                    1..=2 => z % 2,
                    3..=18 => (z - 2) % 8,
                    19..=54 => (z - 18) % 18,
                    55..=118 => (z - 54) % 32,
                    _ => 0,
                }
            })
            .sum();
        valence - self.charge as i64
    }

    /// Representation of the geometry in the XYZ format.
    pub fn get_xyz(&self, title: &str) -> String {
        let mut txt: String = format!("{}\n{}\n", self.number_of_atoms(), title);
        for (symbol, xyz) in self.symbols.iter().zip(self.coordinates.outer_iter()) {
            txt += &format!(
                "{:2} {:15.10} {:15.10} {:15.10}\n",
                symbol, xyz[0], xyz[1], xyz[2]
            );
        }
        txt
    }

    /// A fingerprint of the content of the molecule. Two molecules that are equal up to
    /// the 8th decimal of their coordinates have the same fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Hash for Molecule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in self.coordinates.iter() {
            format!("{:.8}", value).hash(state);
        }
        self.symbols.hash(state);
        self.charge.hash(state);
        self.name.hash(state);
        self.multiplicity.hash(state);
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_xyz(""))
    }
}

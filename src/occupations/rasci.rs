use crate::errors::ParserError;
use crate::initialization::Molecule;
use crate::occupations::OccupationPair;
use log::debug;
use serde::Serialize;

const RASCI_KEY: &str = "RASCI configuration";

/// Compact description of a RASCI configuration: the occupation digits of the active
/// orbitals for each spin channel and an optional hole and particle (1-based orbital
/// indices) outside of the active space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RasciConfiguration {
    pub alpha: String,
    pub beta: String,
    pub hole: Option<usize>,
    pub part: Option<usize>,
}

fn parse_index(name: &str, value: &str) -> Result<Option<usize>, ParserError> {
    let value: &str = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<usize>()
        .ok()
        .filter(|idx| *idx > 0)
        .map(Some)
        .ok_or_else(|| {
            ParserError::malformed(RASCI_KEY, format!("invalid {} index: {}", name, value))
        })
}

fn digits(channel: &str) -> Result<Vec<u8>, ParserError> {
    channel
        .chars()
        .map(|c| {
            c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                ParserError::malformed(RASCI_KEY, format!("invalid occupation digit: {}", c))
            })
        })
        .collect()
}

impl RasciConfiguration {
    /// Create the configuration from the fields of the report. An empty hole or
    /// particle field means that there is none.
    pub fn from_fields(
        alpha: &str,
        beta: &str,
        hole: &str,
        part: &str,
    ) -> Result<Self, ParserError> {
        digits(alpha)?;
        digits(beta)?;
        Ok(Self {
            alpha: alpha.to_owned(),
            beta: beta.to_owned(),
            hole: parse_index("hole", hole)?,
            part: parse_index("particle", part)?,
        })
    }

    fn alpha_digits(&self) -> Result<Vec<u8>, ParserError> {
        digits(&self.alpha)
    }

    fn beta_digits(&self) -> Result<Vec<u8>, ParserError> {
        digits(&self.beta)
    }
}

/// Number of doubly occupied orbitals below the active space:
/// `(n_electrons + charge - (n_alpha_active + n_beta_active + part - hole)) / 2`.
pub fn get_occupied_orbitals(
    configuration: &RasciConfiguration,
    molecule: &Molecule,
) -> Result<usize, ParserError> {
    let alpha_e: i64 = configuration.alpha_digits()?.iter().map(|d| *d as i64).sum();
    let beta_e: i64 = configuration.beta_digits()?.iter().map(|d| *d as i64).sum();
    let hole: i64 = configuration.hole.map_or(0, |_| 1);
    let part: i64 = configuration.part.map_or(0, |_| 1);

    let occupied: i64 = (molecule.number_of_electrons() + molecule.charge() as i64
        - (alpha_e + beta_e + part - hole))
        .div_euclid(2);
    if occupied < 0 {
        return Err(ParserError::malformed(
            RASCI_KEY,
            format!(
                "the active space holds more electrons than the molecule ({})",
                molecule.number_of_electrons()
            ),
        ));
    }
    Ok(occupied as usize)
}

fn build_channel(
    occupied: usize,
    active: Vec<u8>,
    total_orbitals: usize,
) -> Result<Vec<u8>, ParserError> {
    if occupied + active.len() > total_orbitals {
        return Err(ParserError::malformed(
            RASCI_KEY,
            format!(
                "{} occupied and {} active orbitals exceed the {} orbitals",
                occupied,
                active.len(),
                total_orbitals
            ),
        ));
    }
    let mut vector: Vec<u8> = vec![1; occupied];
    vector.extend(active);
    vector.resize(total_orbitals, 0);
    Ok(vector)
}

fn orbital_index(idx: usize, total_orbitals: usize) -> Result<usize, ParserError> {
    if idx > total_orbitals {
        return Err(ParserError::malformed(
            RASCI_KEY,
            format!("orbital {} is outside of 1..={}", idx, total_orbitals),
        ));
    }
    Ok(idx - 1)
}

/// Full length alpha and beta occupation vectors of a RASCI configuration. Each vector is
/// built from the doubly occupied orbitals, the active space digits and zero padding.
///
/// The hole is removed from the channel with the larger population, alpha if both are
/// equal. The particle is added to the channel with the smaller population, beta if both
/// are equal.
pub fn get_rasci_occupations_list(
    configuration: &RasciConfiguration,
    molecule: &Molecule,
    total_orbitals: usize,
) -> Result<OccupationPair, ParserError> {
    let occupied: usize = get_occupied_orbitals(configuration, molecule)?;
    debug!("RASCI configuration: {} doubly occupied orbitals", occupied);
    let mut occupations: OccupationPair = OccupationPair {
        alpha: build_channel(occupied, configuration.alpha_digits()?, total_orbitals)?,
        beta: build_channel(occupied, configuration.beta_digits()?, total_orbitals)?,
    };

    if let Some(hole) = configuration.hole {
        let idx: usize = orbital_index(hole, total_orbitals)?;
        // alpha loses the hole on a tie
        if occupations.n_alpha() >= occupations.n_beta() {
            occupations.alpha[idx] = 0;
        } else {
            occupations.beta[idx] = 0;
        }
    }

    if let Some(part) = configuration.part {
        let idx: usize = orbital_index(part, total_orbitals)?;
        if occupations.n_alpha() < occupations.n_beta() {
            occupations.alpha[idx] = 1;
        } else {
            occupations.beta[idx] = 1;
        }
    }
    Ok(occupations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::prelude::*;

    fn water() -> Molecule {
        let coordinates: Array2<f64> = array![
            [0.0, 0.0, 0.1173],
            [0.0, 0.7572, -0.4692],
            [0.0, -0.7572, -0.4692]
        ];
        Molecule::from_atomic_numbers(coordinates, vec![8, 1, 1]).unwrap()
    }

    #[test]
    fn closed_shell_active_space() {
        let configuration = RasciConfiguration::from_fields("11", "11", "", "").unwrap();
        assert_eq!(get_occupied_orbitals(&configuration, &water()).unwrap(), 3);
        let occ = get_rasci_occupations_list(&configuration, &water(), 8).unwrap();
        assert_eq!(occ.alpha, vec![1, 1, 1, 1, 1, 0, 0, 0]);
        assert_eq!(occ.beta, vec![1, 1, 1, 1, 1, 0, 0, 0]);
        assert_eq!(occ.n_electrons(), 10);
    }

    #[test]
    fn excited_active_space() {
        let configuration = RasciConfiguration::from_fields("101", "110", "", "").unwrap();
        let occ = get_rasci_occupations_list(&configuration, &water(), 7).unwrap();
        assert_eq!(occ.alpha, vec![1, 1, 1, 1, 0, 1, 0]);
        assert_eq!(occ.beta, vec![1, 1, 1, 1, 1, 0, 0]);
        assert_eq!(occ.alpha.len(), 7);
        assert_eq!(occ.beta.len(), 7);
    }

    #[test]
    fn hole_is_taken_from_the_larger_channel() {
        let configuration = RasciConfiguration::from_fields("11", "1", "3", "").unwrap();
        assert_eq!(get_occupied_orbitals(&configuration, &water()).unwrap(), 4);
        let occ = get_rasci_occupations_list(&configuration, &water(), 9).unwrap();
        assert_eq!(occ.alpha, vec![1, 1, 0, 1, 1, 1, 0, 0, 0]);
        assert_eq!(occ.beta, vec![1, 1, 1, 1, 1, 0, 0, 0, 0]);
        assert_eq!(occ.n_electrons(), 10);
    }

    #[test]
    fn hole_prefers_alpha_on_equal_population() {
        let configuration = RasciConfiguration::from_fields("1", "1", "2", "").unwrap();
        let occ = get_rasci_occupations_list(&configuration, &water(), 6).unwrap();
        assert_eq!(occ.alpha[1], 0);
        assert_eq!(occ.beta[1], 1);
    }

    #[test]
    fn particle_is_added_to_the_smaller_channel() {
        let configuration = RasciConfiguration::from_fields("11", "1", "", "7").unwrap();
        assert_eq!(get_occupied_orbitals(&configuration, &water()).unwrap(), 3);
        let occ = get_rasci_occupations_list(&configuration, &water(), 8).unwrap();
        assert_eq!(occ.alpha, vec![1, 1, 1, 1, 1, 0, 0, 0]);
        assert_eq!(occ.beta, vec![1, 1, 1, 1, 0, 0, 1, 0]);
        assert_eq!(occ.n_electrons(), 10);
    }

    #[test]
    fn invalid_descriptors_are_rejected() {
        assert!(RasciConfiguration::from_fields("1a", "1", "", "").is_err());
        assert!(RasciConfiguration::from_fields("1", "1", "0", "").is_err());
        let configuration = RasciConfiguration::from_fields("1111", "1111", "", "").unwrap();
        assert!(get_rasci_occupations_list(&configuration, &water(), 4).is_err());
        let configuration = RasciConfiguration::from_fields("1", "1", "", "12").unwrap();
        assert!(get_rasci_occupations_list(&configuration, &water(), 8).is_err());
    }
}

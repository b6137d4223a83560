use crate::errors::ParserError;
use crate::occupations::OccupationPair;
use serde::{Deserialize, Serialize};

const TRANSITION_KEY: &str = "CIS transition";

/// Single excitation of one electron from orbital `origin` into orbital `target`.
/// Both indices start at 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub origin: usize,
    pub target: usize,
}

impl Transition {
    pub fn new(origin: usize, target: usize) -> Self {
        Self { origin, target }
    }
}

fn aufbau(n_electrons: usize, n_orbitals: usize) -> Result<Vec<u8>, ParserError> {
    if n_electrons > n_orbitals {
        return Err(ParserError::malformed(
            TRANSITION_KEY,
            format!("{} electrons do not fit into {} orbitals", n_electrons, n_orbitals),
        ));
    }
    let mut occupation: Vec<u8> = vec![1; n_electrons];
    occupation.resize(n_orbitals, 0);
    Ok(occupation)
}

fn apply_transitions(
    occupation: &mut [u8],
    transitions: &[Transition],
) -> Result<(), ParserError> {
    let n_orbitals: usize = occupation.len();
    for transition in transitions.iter() {
        for idx in [transition.origin, transition.target] {
            if idx == 0 || idx > n_orbitals {
                return Err(ParserError::malformed(
                    TRANSITION_KEY,
                    format!("orbital {} is outside of 1..={}", idx, n_orbitals),
                ));
            }
        }
        occupation[transition.origin - 1] = 0;
        occupation[transition.target - 1] = 1;
    }
    Ok(())
}

/// Occupations of a CIS configuration. The transitions of each spin channel are applied
/// in order to the aufbau ground state or, if given, to the supplied reference.
pub fn get_cis_occupations_list(
    number_of_orbitals: usize,
    alpha_electrons: usize,
    beta_electrons: usize,
    alpha_transitions: &[Transition],
    beta_transitions: &[Transition],
    ground_state: Option<&OccupationPair>,
) -> Result<OccupationPair, ParserError> {
    let mut occupations: OccupationPair = match ground_state {
        Some(reference) => reference.clone(),
        None => OccupationPair {
            alpha: aufbau(alpha_electrons, number_of_orbitals)?,
            beta: aufbau(beta_electrons, number_of_orbitals)?,
        },
    };
    apply_transitions(&mut occupations.alpha, alpha_transitions)?;
    apply_transitions(&mut occupations.beta, beta_transitions)?;
    Ok(occupations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_state_without_transitions() {
        let occ = get_cis_occupations_list(4, 2, 2, &[], &[], None).unwrap();
        assert_eq!(occ.alpha, vec![1, 1, 0, 0]);
        assert_eq!(occ.beta, vec![1, 1, 0, 0]);
    }

    #[test]
    fn single_alpha_excitation() {
        let occ =
            get_cis_occupations_list(4, 2, 2, &[Transition::new(2, 3)], &[], None).unwrap();
        assert_eq!(occ.alpha, vec![1, 0, 1, 0]);
        assert_eq!(occ.beta, vec![1, 1, 0, 0]);
        assert_eq!(occ.n_electrons(), 4);
    }

    #[test]
    fn transitions_start_from_the_reference() {
        let reference = OccupationPair {
            alpha: vec![1, 1, 1, 0, 0],
            beta: vec![1, 1, 0, 0, 0],
        };
        let occ = get_cis_occupations_list(
            5,
            0,
            0,
            &[Transition::new(3, 5)],
            &[Transition::new(1, 4), Transition::new(2, 3)],
            Some(&reference),
        )
        .unwrap();
        assert_eq!(occ.alpha, vec![1, 1, 0, 0, 1]);
        assert_eq!(occ.beta, vec![0, 0, 1, 1, 0]);
        // the reference itself is untouched
        assert_eq!(reference.alpha, vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn invalid_orbitals_are_rejected() {
        assert!(get_cis_occupations_list(4, 2, 2, &[Transition::new(2, 5)], &[], None).is_err());
        assert!(get_cis_occupations_list(4, 2, 2, &[], &[Transition::new(0, 3)], None).is_err());
        assert!(get_cis_occupations_list(2, 3, 2, &[], &[], None).is_err());
    }
}

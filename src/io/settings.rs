use crate::defaults::*;
use crate::initialization::Molecule;
use crate::parsers::FchkOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_jobtype() -> String {
    String::from(JOBTYPE)
}
fn default_verbose() -> i8 {
    VERBOSE
}
fn default_number_of_cores() -> usize {
    NUMBER_OF_CORES
}
fn default_natural_orbitals_multi() -> bool {
    NATURAL_ORBITALS_MULTI
}
fn default_check_version() -> bool {
    CHECK_VERSION
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Configuration {
    #[serde(default = "default_jobtype")]
    pub jobtype: String,
    #[serde(default = "default_verbose")]
    pub verbose: i8,
    #[serde(default)]
    pub mol: MoleculeConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub parallelization: ParallelizationConfig,
}

impl Configuration {
    /// Read the configuration file of the working directory. If it does not exist, the
    /// default settings are used and written to a new configuration file, so that the
    /// user can see all the options.
    pub fn new() -> Result<Self> {
        Self::from_path(Path::new(CONFIG_FILE_NAME))
    }

    pub fn from_path(config_file_path: &Path) -> Result<Self> {
        let exists: bool = config_file_path.exists();
        let config_string: String = if exists {
            fs::read_to_string(config_file_path).with_context(|| {
                format!("Unable to read config file {}", config_file_path.display())
            })?
        } else {
            String::new()
        };
        let config: Self = toml::from_str(&config_string).with_context(|| {
            format!("Invalid config file {}", config_file_path.display())
        })?;
        if !exists {
            let config_string: String =
                toml::to_string(&config).context("Unable to serialize the configuration")?;
            fs::write(config_file_path, config_string).with_context(|| {
                format!("Unable to write config file {}", config_file_path.display())
            })?;
        }
        Ok(config)
    }
}

/// Corrections of the charge and the multiplicity that are stored in the report.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct MoleculeConfig {
    pub charge: Option<i32>,
    pub multiplicity: Option<u32>,
}

impl MoleculeConfig {
    pub fn apply(&self, molecule: &mut Molecule) {
        if let Some(charge) = self.charge {
            molecule.set_charge(charge);
        }
        if let Some(multiplicity) = self.multiplicity {
            molecule.set_multiplicity(multiplicity);
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ParserConfig {
    #[serde(default = "default_natural_orbitals_multi")]
    pub natural_orbitals_multi: bool,
    /// Check the report's version against the parser's compatibility list. The fchk
    /// parser declares no restriction, so only restricted parsers can reject a report.
    #[serde(default = "default_check_version")]
    pub check_version: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            natural_orbitals_multi: default_natural_orbitals_multi(),
            check_version: default_check_version(),
        }
    }
}

impl From<&ParserConfig> for FchkOptions {
    fn from(config: &ParserConfig) -> Self {
        Self {
            natural_orbitals_multi: config.natural_orbitals_multi,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ParallelizationConfig {
    #[serde(default = "default_number_of_cores")]
    pub number_of_cores: usize,
}

impl Default for ParallelizationConfig {
    fn default() -> Self {
        Self {
            number_of_cores: default_number_of_cores(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tests::get_config;
    use ndarray::prelude::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Configuration = get_config();
        assert_eq!(config.jobtype, JOBTYPE);
        assert_eq!(config.verbose, 0);
        assert!(config.mol.charge.is_none());
        assert!(config.parser.natural_orbitals_multi);
        assert!(!config.parser.check_version);
        assert_eq!(config.parallelization.number_of_cores, 1);
    }

    #[test]
    fn sections_are_read() {
        let config: Configuration = toml::from_str(
            "jobtype = \"json\"\nverbose = 1\n[mol]\ncharge = 1\nmultiplicity = 2\n[parser]\ncheck_version = true\n",
        )
        .unwrap();
        assert_eq!(config.jobtype, "json");
        assert_eq!(config.verbose, 1);
        assert_eq!(config.mol.charge, Some(1));
        assert_eq!(config.mol.multiplicity, Some(2));
        assert!(config.parser.check_version);
        assert!(config.parser.natural_orbitals_multi);
    }

    #[test]
    fn molecule_corrections() {
        let mut mol =
            Molecule::from_atomic_numbers(array![[0.0, 0.0, 0.0], [0.0, 0.0, 0.74]], vec![1, 1])
                .unwrap();
        let config = MoleculeConfig {
            charge: Some(1),
            multiplicity: None,
        };
        config.apply(&mut mol);
        assert_eq!(mol.charge(), 1);
        assert_eq!(mol.multiplicity(), 1);
    }

    #[test]
    fn default_file_is_written() {
        let path = std::env::temp_dir().join(format!("qcparse-{}.toml", std::process::id()));
        let _ = fs::remove_file(&path);
        let config: Configuration = Configuration::from_path(&path).unwrap();
        assert!(path.exists());
        let reread: Configuration = Configuration::from_path(&path).unwrap();
        assert_eq!(reread.jobtype, config.jobtype);
        fs::remove_file(&path).unwrap();
    }
}

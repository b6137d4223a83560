use crate::io::settings::Configuration;

/// Formatted checkpoint file of H2 in a minimal basis (one contracted s shell per atom).
/// The bond length is 1.4 bohr along z.
pub const FCHK_H2: &str = "\
H2 single point
SP        RHF                                                         STO-3G
Number of atoms                            I                2
Charge                                     I                0
Multiplicity                               I                1
Number of electrons                        I                2
Number of alpha electrons                  I                1
Number of beta electrons                   I                1
Number of basis functions                  I                2
Number of independent functions            I                2
Atomic numbers                             I   N=           2
           1           1
Nuclear charges                            R   N=           2
  1.00000000E+00  1.00000000E+00
Current cartesian coordinates              R   N=           6
  0.00000000E+00  0.00000000E+00  0.00000000E+00  0.00000000E+00  0.00000000E+00
  1.40000000E+00
Number of contracted shells                I                2
Number of primitive shells                 I                6
Highest angular momentum                   I                0
Shell types                                I   N=           2
           0           0
Number of primitives per shell             I   N=           2
           3           3
Shell to atom map                          I   N=           2
           1           2
Primitive exponents                        R   N=           6
  3.42525091E+00  6.23913730E-01  1.68855400E-01  3.42525091E+00  6.23913730E-01
  1.68855400E-01
Contraction coefficients                   R   N=           6
  1.54328967E-01  5.35328142E-01  4.44634542E-01  1.54328967E-01  5.35328142E-01
  4.44634542E-01
Coordinates of each shell                  R   N=           6
  0.00000000E+00  0.00000000E+00  0.00000000E+00  0.00000000E+00  0.00000000E+00
  1.40000000E+00
Total Energy                               R     -1.116714325063145E+00
Alpha Orbital Energies                     R   N=           2
 -5.78554652E-01  6.70293390E-01
Alpha MO coefficients                      R   N=           4
  5.48934450E-01  5.48934450E-01  1.21146367E+00 -1.21146367E+00
Total SCF Density                          R   N=           3
  6.02672916E-01  6.02672916E-01  6.02672916E-01
Overlap Matrix                             R   N=           3
  1.00000000E+00  6.59343670E-01  1.00000000E+00
Core Hamiltonian Matrix                    R   N=           3
 -1.12040887E+00 -9.58455280E-01 -1.12040887E+00
";

/// Two sets of natural orbitals of H2, e.g. of two excited states.
pub const FCHK_NATO_BLOCKS: &str = "\
Alpha NATO coefficients                    R   N=           4
  1.00000000E+00  0.00000000E+00  0.00000000E+00  1.00000000E+00
Alpha Natural Orbital occupancies          R   N=           2
  1.00000000E+00  0.00000000E+00
Beta NATO coefficients                     R   N=           4
  7.07106781E-01  7.07106781E-01  7.07106781E-01 -7.07106781E-01
Beta Natural Orbital occupancies           R   N=           2
  5.00000000E-01  5.00000000E-01
Alpha NATO coefficients                    R   N=           4
  0.00000000E+00  1.00000000E+00  1.00000000E+00  0.00000000E+00
Alpha Natural Orbital occupancies          R   N=           2
  9.00000000E-01  1.00000000E-01
Beta NATO coefficients                     R   N=           4
  1.00000000E+00  0.00000000E+00  0.00000000E+00  1.00000000E+00
Beta Natural Orbital occupancies           R   N=           2
  8.00000000E-01  2.00000000E-01
";

/// Natural transition orbitals of two excitations of H2.
pub const FCHK_NTO_BLOCKS: &str = "\
Natural Transition Orbital occupancies     R   N=           2
  9.50000000E-01  5.00000000E-02
Natural Transition Orbital U coefficients  R   N=           4
  1.00000000E+00  0.00000000E+00  0.00000000E+00  1.00000000E+00
Natural Transition Orbital V coefficients  R   N=           4
  0.00000000E+00  1.00000000E+00  1.00000000E+00  0.00000000E+00
Natural Transition Orbital occupancies     R   N=           2
  6.00000000E-01  4.00000000E-01
Natural Transition Orbital U coefficients  R   N=           4
  0.00000000E+00  1.00000000E+00  1.00000000E+00  0.00000000E+00
Natural Transition Orbital V coefficients  R   N=           4
  1.00000000E+00  0.00000000E+00  0.00000000E+00  1.00000000E+00
";

/// Formatted checkpoint file of H2 followed by additional records.
pub fn fchk_h2_with(records: &str) -> String {
    format!("{}{}", FCHK_H2, records)
}

/// Beginning of a Q-Chem report of water with two spin-orbit coupling matrices.
pub const QCHEM_OUTPUT: &str = "\
                  Welcome to Q-Chem
     A Quantum Leap Into The Future Of Chemistry

 Q-Chem 5.2 (devel), Q-Chem, Inc., Pleasanton, CA (2019)

 --------------------------------------------------------------
 Molecular Point Group                 C2v   NOp =  4
 Largest Abelian Subgroup              C2v   NOp =  4
 Nuclear Repulsion Energy =   9.1681932964 hartrees
 There are        5 alpha and        5 beta electrons
 Requested basis set is STO-3G
 There are 5 shells and 7 basis functions
 --------------------------------------------------------------
 Spin-orbit couplings (cm-1):
    1.000000    0.500000
    0.500000    2.000000
 -------------------------------------------
 Spin-orbit couplings (cm-1):
    0.000000    1.500000    2.500000
    1.500000    0.000000    3.500000
    2.500000    3.500000    0.000000
 -------------------------------------------
";

/// Orbital energies of one spin channel, the first energy overflowed its field.
pub const QCHEM_ORBITALS: &str = "\
 Alpha MOs
 -- Occupied --
******** -1.3436  -0.7111  -0.5706  -0.4966
  1 A1      2 A1      1 B1      3 A1      1 B2
 -- Virtual --
  0.5899   0.7122
  4 A1      2 B1
";

pub fn get_config() -> Configuration {
    let config_string: String = String::from("");
    let config: Configuration = toml::from_str(&config_string).unwrap();
    config
}

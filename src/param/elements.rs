//! Static reference data of the chemical elements, indexed by the atomic number.
//! Index 0 holds the dummy atom `X`. Masses are given in atomic mass units, elements
//! without a stable isotope have a mass of zero.
use phf::phf_map;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ElementData {
    pub number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
    pub mass: f64,
}

impl ElementData {
    const fn new(number: u8, symbol: &'static str, name: &'static str, mass: f64) -> Self {
        Self {
            number,
            symbol,
            name,
            mass,
        }
    }
}

pub const N_ELEMENTS: usize = 119;

pub static ATOM_DATA: [ElementData; N_ELEMENTS] = [
    ElementData::new(0, "X", "X", 0.0),
    ElementData::new(1, "H", "Hydrogen", 1.00794),
    ElementData::new(2, "He", "Helium", 4.002602),
    ElementData::new(3, "Li", "Lithium", 6.941),
    ElementData::new(4, "Be", "Beryllium", 9.012182),
    ElementData::new(5, "B", "Boron", 10.811),
    ElementData::new(6, "C", "Carbon", 12.0107),
    ElementData::new(7, "N", "Nitrogen", 14.0067),
    ElementData::new(8, "O", "Oxygen", 15.9994),
    ElementData::new(9, "F", "Fluorine", 18.9984032),
    ElementData::new(10, "Ne", "Neon", 20.1797),
    ElementData::new(11, "Na", "Sodium", 22.98976928),
    ElementData::new(12, "Mg", "Magnesium", 24.3050),
    ElementData::new(13, "Al", "Aluminium", 26.9815386),
    ElementData::new(14, "Si", "Silicon", 28.0855),
    ElementData::new(15, "P", "Phosphorus", 30.973762),
    ElementData::new(16, "S", "Sulfur", 32.065),
    ElementData::new(17, "Cl", "Chlorine", 35.453),
    ElementData::new(18, "Ar", "Argon", 39.948),
    ElementData::new(19, "K", "Potassium", 39.0983),
    ElementData::new(20, "Ca", "Calcium", 40.078),
    ElementData::new(21, "Sc", "Scandium", 44.955912),
    ElementData::new(22, "Ti", "Titanium", 47.867),
    ElementData::new(23, "V", "Vanadium", 50.9415),
    ElementData::new(24, "Cr", "Chromium", 51.9961),
    ElementData::new(25, "Mn", "Manganese", 54.938045),
    ElementData::new(26, "Fe", "Iron", 55.845),
    ElementData::new(27, "Co", "Cobalt", 58.933195),
    ElementData::new(28, "Ni", "Nickel", 58.6934),
    ElementData::new(29, "Cu", "Copper", 63.546),
    ElementData::new(30, "Zn", "Zinc", 65.38),
    ElementData::new(31, "Ga", "Gallium", 69.723),
    ElementData::new(32, "Ge", "Germanium", 72.64),
    ElementData::new(33, "As", "Arsenic", 74.92160),
    ElementData::new(34, "Se", "Selenium", 78.96),
    ElementData::new(35, "Br", "Bromine", 79.904),
    ElementData::new(36, "Kr", "Krypton", 83.798),
    ElementData::new(37, "Rb", "Rubidium", 85.4678),
    ElementData::new(38, "Sr", "Strontium", 87.62),
    ElementData::new(39, "Y", "Yttrium", 88.90585),
    ElementData::new(40, "Zr", "Zirconium", 91.224),
    ElementData::new(41, "Nb", "Niobium", 92.90638),
    ElementData::new(42, "Mo", "Molybdenum", 95.96),
    ElementData::new(43, "Tc", "Technetium", 0.0),
    ElementData::new(44, "Ru", "Ruthenium", 101.07),
    ElementData::new(45, "Rh", "Rhodium", 102.90550),
    ElementData::new(46, "Pd", "Palladium", 106.42),
    ElementData::new(47, "Ag", "Silver", 107.8682),
    ElementData::new(48, "Cd", "Cadmium", 112.411),
    ElementData::new(49, "In", "Indium", 114.818),
    ElementData::new(50, "Sn", "Tin", 118.710),
    ElementData::new(51, "Sb", "Antimony", 121.760),
    ElementData::new(52, "Te", "Tellurium", 127.60),
    ElementData::new(53, "I", "Iodine", 126.90447),
    ElementData::new(54, "Xe", "Xenon", 131.293),
    ElementData::new(55, "Cs", "Caesium", 132.9054519),
    ElementData::new(56, "Ba", "Barium", 137.327),
    ElementData::new(57, "La", "Lanthanum", 138.90547),
    ElementData::new(58, "Ce", "Cerium", 140.116),
    ElementData::new(59, "Pr", "Praseodymium", 140.90765),
    ElementData::new(60, "Nd", "Neodymium", 144.242),
    ElementData::new(61, "Pm", "Promethium", 0.0),
    ElementData::new(62, "Sm", "Samarium", 150.36),
    ElementData::new(63, "Eu", "Europium", 151.964),
    ElementData::new(64, "Gd", "Gadolinium", 157.25),
    ElementData::new(65, "Tb", "Terbium", 158.92535),
    ElementData::new(66, "Dy", "Dysprosium", 162.500),
    ElementData::new(67, "Ho", "Holmium", 164.93032),
    ElementData::new(68, "Er", "Erbium", 167.259),
    ElementData::new(69, "Tm", "Thulium", 168.93421),
    ElementData::new(70, "Yb", "Ytterbium", 173.054),
    ElementData::new(71, "Lu", "Lutetium", 174.9668),
    ElementData::new(72, "Hf", "Hafnium", 178.49),
    ElementData::new(73, "Ta", "Tantalum", 180.94788),
    ElementData::new(74, "W", "Tungsten", 183.84),
    ElementData::new(75, "Re", "Rhenium", 186.207),
    ElementData::new(76, "Os", "Osmium", 190.23),
    ElementData::new(77, "Ir", "Iridium", 192.217),
    ElementData::new(78, "Pt", "Platinum", 195.084),
    ElementData::new(79, "Au", "Gold", 196.966569),
    ElementData::new(80, "Hg", "Mercury", 200.59),
    ElementData::new(81, "Tl", "Thallium", 204.3833),
    ElementData::new(82, "Pb", "Lead", 207.2),
    ElementData::new(83, "Bi", "Bismuth", 208.98040),
    ElementData::new(84, "Po", "Polonium", 0.0),
    ElementData::new(85, "At", "Astatine", 0.0),
    ElementData::new(86, "Rn", "Radon", 0.0),
    ElementData::new(87, "Fr", "Francium", 0.0),
    ElementData::new(88, "Ra", "Radium", 0.0),
    ElementData::new(89, "Ac", "Actinium", 0.0),
    ElementData::new(90, "Th", "Thorium", 232.03806),
    ElementData::new(91, "Pa", "Protactinium", 231.03588),
    ElementData::new(92, "U", "Uranium", 238.02891),
    ElementData::new(93, "Np", "Neptunium", 0.0),
    ElementData::new(94, "Pu", "Plutonium", 0.0),
    ElementData::new(95, "Am", "Americium", 0.0),
    ElementData::new(96, "Cm", "Curium", 0.0),
    ElementData::new(97, "Bk", "Berkelium", 0.0),
    ElementData::new(98, "Cf", "Californium", 0.0),
    ElementData::new(99, "Es", "Einsteinium", 0.0),
    ElementData::new(100, "Fm", "Fermium", 0.0),
    ElementData::new(101, "Md", "Mendelevium", 0.0),
    ElementData::new(102, "No", "Nobelium", 0.0),
    ElementData::new(103, "Lr", "Lawrencium", 0.0),
    ElementData::new(104, "Rf", "Rutherfordium", 0.0),
    ElementData::new(105, "Db", "Dubnium", 0.0),
    ElementData::new(106, "Sg", "Seaborgium", 0.0),
    ElementData::new(107, "Bh", "Bohrium", 0.0),
    ElementData::new(108, "Hs", "Hassium", 0.0),
    ElementData::new(109, "Mt", "Meitnerium", 0.0),
    ElementData::new(110, "Ds", "Darmstadtium", 0.0),
    ElementData::new(111, "Rg", "Roentgenium", 0.0),
    ElementData::new(112, "Cn", "Copernicium", 0.0),
    ElementData::new(113, "Uut", "Ununtrium", 0.0),
    ElementData::new(114, "Uuq", "Ununquadium", 0.0),
    ElementData::new(115, "Uup", "Ununpentium", 0.0),
    ElementData::new(116, "Uuh", "Ununhexium", 0.0),
    ElementData::new(117, "Uus", "Ununseptium", 0.0),
    ElementData::new(118, "Uuo", "Ununoctium", 0.0),
];

/// Upper case element symbols mapped to their atomic number.
static SYMBOL_TO_NUMBER: phf::Map<&'static str, u8> = phf_map! {
    "X" => 0,
    "H" => 1,
    "HE" => 2,
    "LI" => 3,
    "BE" => 4,
    "B" => 5,
    "C" => 6,
    "N" => 7,
    "O" => 8,
    "F" => 9,
    "NE" => 10,
    "NA" => 11,
    "MG" => 12,
    "AL" => 13,
    "SI" => 14,
    "P" => 15,
    "S" => 16,
    "CL" => 17,
    "AR" => 18,
    "K" => 19,
    "CA" => 20,
    "SC" => 21,
    "TI" => 22,
    "V" => 23,
    "CR" => 24,
    "MN" => 25,
    "FE" => 26,
    "CO" => 27,
    "NI" => 28,
    "CU" => 29,
    "ZN" => 30,
    "GA" => 31,
    "GE" => 32,
    "AS" => 33,
    "SE" => 34,
    "BR" => 35,
    "KR" => 36,
    "RB" => 37,
    "SR" => 38,
    "Y" => 39,
    "ZR" => 40,
    "NB" => 41,
    "MO" => 42,
    "TC" => 43,
    "RU" => 44,
    "RH" => 45,
    "PD" => 46,
    "AG" => 47,
    "CD" => 48,
    "IN" => 49,
    "SN" => 50,
    "SB" => 51,
    "TE" => 52,
    "I" => 53,
    "XE" => 54,
    "CS" => 55,
    "BA" => 56,
    "LA" => 57,
    "CE" => 58,
    "PR" => 59,
    "ND" => 60,
    "PM" => 61,
    "SM" => 62,
    "EU" => 63,
    "GD" => 64,
    "TB" => 65,
    "DY" => 66,
    "HO" => 67,
    "ER" => 68,
    "TM" => 69,
    "YB" => 70,
    "LU" => 71,
    "HF" => 72,
    "TA" => 73,
    "W" => 74,
    "RE" => 75,
    "OS" => 76,
    "IR" => 77,
    "PT" => 78,
    "AU" => 79,
    "HG" => 80,
    "TL" => 81,
    "PB" => 82,
    "BI" => 83,
    "PO" => 84,
    "AT" => 85,
    "RN" => 86,
    "FR" => 87,
    "RA" => 88,
    "AC" => 89,
    "TH" => 90,
    "PA" => 91,
    "U" => 92,
    "NP" => 93,
    "PU" => 94,
    "AM" => 95,
    "CM" => 96,
    "BK" => 97,
    "CF" => 98,
    "ES" => 99,
    "FM" => 100,
    "MD" => 101,
    "NO" => 102,
    "LR" => 103,
    "RF" => 104,
    "DB" => 105,
    "SG" => 106,
    "BH" => 107,
    "HS" => 108,
    "MT" => 109,
    "DS" => 110,
    "RG" => 111,
    "CN" => 112,
    "UUT" => 113,
    "UUQ" => 114,
    "UUP" => 115,
    "UUH" => 116,
    "UUS" => 117,
    "UUO" => 118,
};

/// Look up an element by its atomic number.
pub fn element_from_number(number: u8) -> Option<&'static ElementData> {
    ATOM_DATA.get(number as usize)
}

/// Look up an element by its symbol, the comparison is case insensitive.
pub fn element_from_symbol(symbol: &str) -> Option<&'static ElementData> {
    SYMBOL_TO_NUMBER
        .get(symbol.to_uppercase().as_str())
        .and_then(|number| element_from_number(*number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_atomic_number() {
        for (idx, element) in ATOM_DATA.iter().enumerate() {
            assert_eq!(element.number as usize, idx);
            assert_eq!(element_from_symbol(element.symbol), Some(element));
        }
    }

    #[test]
    fn symbols_are_case_insensitive() {
        assert_eq!(element_from_symbol("cl").unwrap().number, 17);
        assert_eq!(element_from_symbol("CL").unwrap().name, "Chlorine");
        assert_eq!(element_from_number(8).unwrap().symbol, "O");
        assert!(element_from_symbol("Qq").is_none());
        assert!(element_from_number(119).is_none());
    }
}

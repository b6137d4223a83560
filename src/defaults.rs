// PROGRAM SETTINGS
// config file
pub const CONFIG_FILE_NAME: &str = "qcparse.toml";
// jobtype: "summary", "basis" or "json"
pub const JOBTYPE: &str = "summary";
pub const VERBOSE: i8 = 0;
pub const NUMBER_OF_CORES: usize = 1;

// PARSER SETTINGS
// collect every NATO/NTO block of the report and not only the first one
pub const NATURAL_ORBITALS_MULTI: bool = true;
// refuse reports written by program versions outside of the declared compatibility
pub const CHECK_VERSION: bool = false;

// REPORT FORMAT
// number of complex columns that are printed per block of a SOC matrix
pub const SOC_COLUMNS_PER_BLOCK: usize = 5;
// width of the row label in front of each line of a SOC matrix
pub const SOC_LINE_PREFIX: usize = 11;
// the program version is printed within the first bytes of the report
pub const VERSION_SEARCH_WINDOW: usize = 500;
// number of characters that are read after a keyword for the basic information
pub const BASIC_INFO_WINDOW: usize = 100;
// assumed maximal length of a simple matrix section
pub const SIMPLE_MATRIX_MAX_CHARS: usize = 10000;
pub const SIMPLE_MATRIX_FOOTER: &str = "-------";
// placeholder for values that overflow the fixed width fields
pub const OVERFLOW_FIELD: &str = "********";

// BASIS SET
pub const PRIMITIVE_TYPE: &str = "gaussian";
// scale factor that is written in every shell header of a basis input deck
pub const BASIS_SCALE_FACTOR: f64 = 1.00;
pub const BASIS_ATOM_SEPARATOR: &str = "****";
// significant decimals of the exponents and coefficients in the basis input deck
pub const BASIS_PRECISION: usize = 10;

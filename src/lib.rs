//! Extraction of structured data from the reports of quantum chemistry programs:
//! formatted checkpoint files and plain text output.
pub mod basis;
pub mod constants;
pub mod defaults;
pub mod errors;
pub mod initialization;
pub mod io;
pub mod matrix;
pub mod occupations;
pub mod param;
pub mod parsers;
pub mod scanner;
pub mod utils;
pub mod version;

pub use errors::ParserError;

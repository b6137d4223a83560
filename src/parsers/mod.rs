//! Parsers of the reports of quantum chemistry programs.
pub mod basic;
pub mod fchk;

pub use basic::{
    orbital_energies, read_basic_info, read_simple_matrix, search_bars, standardize_vector,
    BasicInfo,
};
pub use fchk::{parser_fchk, parser_fchk_with_options, FchkData, FchkOptions, FCHK_PARSER};

use crate::version::ParserDescriptor;

/// The helpers for plain Q-Chem reports.
pub const BASIC_PARSER: ParserDescriptor = ParserDescriptor {
    name: "basic",
    compatibility: &["5.0+"],
};

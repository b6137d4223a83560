//! Token Scanner and Typed Record Extractor.
//!
//! The report is split into a flat stream of whitespace separated tokens. A record is
//! located by an exact match of its key phrase on consecutive tokens and is followed by
//! a type tag and either a single value or the marker `N=`, the number of elements and
//! the elements themselves:
//!
//! ```text
//! Charge                                     I                0
//! Atomic numbers                             I   N=           3
//!            8           1           1
//! ```
pub use records::*;
pub use tokens::TokenStream;

mod records;
mod tokens;

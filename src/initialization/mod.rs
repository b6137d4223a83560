pub use molecule::Molecule;

mod molecule;

/// Conversion factor from bohr to angstrom, as used by the formatted checkpoint files.
pub const BOHR_TO_ANGS: f64 = 0.529177249;

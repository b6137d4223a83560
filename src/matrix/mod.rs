pub use soc::read_soc_matrix;
pub use triangular::*;

mod soc;
mod triangular;

pub use basis_set::*;
pub use shell::*;

mod basis_set;
mod shell;

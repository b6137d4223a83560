use crate::errors::ParserError;
use serde::Serialize;
use serde_repr::Serialize_repr;
use std::fmt;

/// Type of a contracted Gaussian shell. The discriminant is the code that is used in
/// the `Shell types` record of the formatted checkpoint file. Negative codes denote the
/// combined sp shell and the pure (spherical) d and f shells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize_repr)]
#[repr(i8)]
pub enum ShellType {
    S = 0,
    P = 1,
    D = 2,
    F = 3,
    SP = -1,
    PureD = -2,
    PureF = -3,
}

impl ShellType {
    /// Number of basis functions that are spanned by the shell.
    pub fn n_functions(&self) -> usize {
        match self {
            ShellType::S => 1,
            ShellType::P => 3,
            ShellType::D => 6,
            ShellType::F => 10,
            ShellType::SP => 4,
            ShellType::PureD => 5,
            ShellType::PureF => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShellType::S => "s",
            ShellType::P => "p",
            ShellType::D => "d",
            ShellType::F => "f",
            ShellType::SP => "sp",
            ShellType::PureD => "d_",
            ShellType::PureF => "f_",
        }
    }

    pub fn code(&self) -> i64 {
        *self as i8 as i64
    }
}

impl TryFrom<i64> for ShellType {
    type Error = ParserError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ShellType::S),
            1 => Ok(ShellType::P),
            2 => Ok(ShellType::D),
            3 => Ok(ShellType::F),
            -1 => Ok(ShellType::SP),
            -2 => Ok(ShellType::PureD),
            -3 => Ok(ShellType::PureF),
            c => Err(ParserError::UnsupportedShellType { code: c }),
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A contracted shell: its type and the exponents and contraction coefficients of its
/// primitives. The P-coefficients are only meaningful for sp shells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shell {
    pub shell_type: ShellType,
    pub functions: usize,
    pub p_exponents: Vec<f64>,
    pub con_coefficients: Vec<f64>,
    pub p_con_coefficients: Vec<f64>,
}

impl Shell {
    pub fn new(
        shell_type: ShellType,
        p_exponents: Vec<f64>,
        con_coefficients: Vec<f64>,
        p_con_coefficients: Vec<f64>,
    ) -> Self {
        Self {
            shell_type,
            functions: shell_type.n_functions(),
            p_exponents,
            con_coefficients,
            p_con_coefficients,
        }
    }

    pub fn n_primitives(&self) -> usize {
        self.p_exponents.len()
    }
}

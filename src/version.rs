//! Version of the program that wrote a report and the compatibility of the parsers.
use crate::defaults::VERSION_SEARCH_WINDOW;
use crate::errors::ParserError;
use log::debug;
use serde::Serialize;
use std::fmt;

const VERSION_MARKER: &str = "\n Q-Chem";
const DEVEL_MARKER: &str = "(devel)";

/// Version of Q-Chem as printed in the header of its output, e.g.
/// `Q-Chem 5.2.1 (devel), Q-Chem, Inc., Pleasanton, CA (2019)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct QChemVersion {
    pub major: u32,
    pub minor: u32,
    pub devel: bool,
}

fn leading_number(txt: &str) -> Option<u32> {
    let digits: String = txt.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok()
}

impl QChemVersion {
    /// Parse the version from the tokens following the program name: the version
    /// number (optionally prefixed with `v`) and the branch.
    pub fn parse(txt: &str) -> Option<Self> {
        let tokens: Vec<&str> = txt.split_whitespace().collect();
        let number: &str = tokens.get(1)?.trim_start_matches('v');
        let mut parts = number.split('.');
        let major: u32 = leading_number(parts.next()?)?;
        let minor: u32 = leading_number(parts.next()?)?;
        let devel: bool = tokens
            .get(2)
            .map_or(false, |branch| branch.contains(DEVEL_MARKER));
        Some(Self {
            major,
            minor,
            devel,
        })
    }

    /// Find the version in the header of a report.
    pub fn from_output(output: &str) -> Result<Self, ParserError> {
        let header: &str = match output.char_indices().nth(VERSION_SEARCH_WINDOW) {
            Some((end, _)) => &output[..end],
            None => output,
        };
        let start: usize = header
            .find(VERSION_MARKER)
            .ok_or_else(|| ParserError::missing("Q-Chem version"))?;
        // the version line is read completely, even if it exceeds the search window
        let line: &str = output[start + 1..].lines().next().unwrap_or("");
        Self::parse(line)
            .ok_or_else(|| ParserError::malformed("Q-Chem version", line.trim().to_owned()))
    }

    pub fn is_development(&self) -> bool {
        self.devel
    }

    /// Compare with an entry of a compatibility list. `"5.2"` matches exactly this minor
    /// version, `"5.2+"` matches 5.2 and every later minor version of the same major version.
    pub fn matches(&self, entry: &str) -> bool {
        let entry: &str = entry.trim();
        let (number, open_ended): (&str, bool) = match entry.strip_suffix('+') {
            Some(number) => (number, true),
            None => (entry, false),
        };
        let mut parts = number.split('.');
        let major: Option<u32> = parts.next().and_then(|p| p.parse::<u32>().ok());
        let minor: Option<u32> = parts.next().and_then(|p| p.parse::<u32>().ok());
        match (major, minor) {
            (Some(major), Some(minor)) if major == self.major => {
                if open_ended {
                    self.minor >= minor
                } else {
                    self.minor == minor
                }
            }
            _ => false,
        }
    }
}

impl fmt::Display for QChemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev: &str = if self.devel { "dev" } else { "" };
        write!(f, "{}.{} {}", self.major, self.minor, dev)
    }
}

/// Name of a parser and the program versions it is known to work with.
/// An empty compatibility list accepts every version.
#[derive(Debug, Copy, Clone)]
pub struct ParserDescriptor {
    pub name: &'static str,
    pub compatibility: &'static [&'static str],
}

impl ParserDescriptor {
    pub fn is_compatible(&self, version: &QChemVersion) -> bool {
        self.compatibility.is_empty() || self.compatibility.iter().any(|e| version.matches(e))
    }

    /// Check the version of a report against the compatibility list. Reports without
    /// a version header are accepted.
    pub fn check(&self, output: &str) -> Result<(), ParserError> {
        match QChemVersion::from_output(output) {
            Ok(version) if self.is_compatible(&version) => {
                debug!("{} parser: compatible with version {}", self.name, version);
                Ok(())
            }
            Ok(version) => Err(ParserError::IncompatibleVersion {
                parser: self.name.to_owned(),
                version: version.to_string().trim().to_owned(),
            }),
            Err(_) => {
                debug!("{} parser: no version found in the output", self.name);
                Ok(())
            }
        }
    }
}

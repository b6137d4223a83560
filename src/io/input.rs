use crate::io::Configuration;
use anyhow::{Context, Result};
use std::fs;

/// Read the reports that should be parsed together with the configuration of the
/// working directory.
pub fn read_input(files: &[&str]) -> Result<(Vec<(String, String)>, Configuration)> {
    let outputs: Vec<(String, String)> = files
        .iter()
        .map(|file| {
            fs::read_to_string(file)
                .with_context(|| format!("Unable to read the file {}", file))
                .map(|output| (file.to_string(), output))
        })
        .collect::<Result<Vec<(String, String)>>>()?;
    // the configuration file is written with the default settings, if it does not exist
    let config: Configuration = Configuration::new()?;
    Ok((outputs, config))
}

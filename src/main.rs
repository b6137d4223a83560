use anyhow::{bail, Context, Result};
use clap::{crate_name, crate_version, App, Arg};
use env_logger::Builder;
use log::{error, info, LevelFilter};
use qcparse::io::{read_input, write_footer, write_header, Configuration};
use qcparse::parsers::{parser_fchk_with_options, FchkData, FchkOptions, FCHK_PARSER};
use qcparse::utils::Timer;
use rayon::prelude::*;
use std::io::Write;

fn main() -> Result<()> {
    // Input.
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .about("extraction of data from quantum chemistry reports")
        .arg(
            Arg::new("FILE")
                .help("Sets the formatted checkpoint file(s) to parse")
                .required(true)
                .multiple_values(true)
                .index(1),
        )
        .get_matches();
    let files: Vec<&str> = matches
        .values_of("FILE")
        .context("No input file was given")?
        .collect();
    let (outputs, config): (Vec<(String, String)>, Configuration) = read_input(&files)?;

    // Multithreading.
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallelization.number_of_cores)
        .build_global()
        .context("Unable to build the thread pool")?;

    // Logging.
    let log_level: LevelFilter = match config.verbose {
        2 => LevelFilter::Trace,
        1 => LevelFilter::Debug,
        0 => LevelFilter::Info,
        -1 => LevelFilter::Warn,
        -2 => LevelFilter::Error,
        _ => LevelFilter::Info,
    };
    Builder::new()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter(None, log_level)
        .init();

    write_header();
    let timer: Timer = Timer::start();

    // The reports share no state and are parsed in parallel.
    let results: Vec<Result<String>> = outputs
        .par_iter()
        .map(|(file, output)| process(file, output, &config))
        .collect();

    let mut n_failed: usize = 0;
    for ((file, _), result) in outputs.iter().zip(results.into_iter()) {
        match result {
            Ok(txt) if config.jobtype == "summary" => info!("{}", txt),
            Ok(txt) => println!("{}", txt),
            Err(err) => {
                error!("{}: {:#}", file, err);
                n_failed += 1;
            }
        }
    }

    write_footer(timer);
    if n_failed > 0 {
        bail!("{} of {} file(s) could not be parsed", n_failed, outputs.len());
    }
    Ok(())
}

fn process(file: &str, output: &str, config: &Configuration) -> Result<String> {
    if config.parser.check_version {
        FCHK_PARSER.check(output)?;
    }
    let options: FchkOptions = FchkOptions::from(&config.parser);
    let mut data: FchkData = parser_fchk_with_options(output, &options)
        .with_context(|| format!("Unable to parse {}", file))?;
    config.mol.apply(&mut data.structure);

    let txt: String = match config.jobtype.as_str() {
        "summary" => summary(file, &data),
        "basis" => data.basis.get_qc_input_txt(),
        "json" => serde_json::to_string_pretty(&data).context("Unable to serialize the data")?,
        jobtype => bail!("Unknown jobtype: {}", jobtype),
    };
    Ok(txt)
}

fn summary(file: &str, data: &FchkData) -> String {
    let mol = &data.structure;
    let mut lines: Vec<String> = vec![
        format!("{: <25} {}", "file:", file),
        format!("{: <25} {}", "number of atoms:", mol.number_of_atoms()),
        format!("{: <25} {}", "charge:", mol.charge()),
        format!("{: <25} {}", "multiplicity:", mol.multiplicity()),
        format!(
            "{: <25} {} / {}",
            "alpha / beta electrons:", data.number_of_electrons.alpha, data.number_of_electrons.beta
        ),
        format!("{: <25} {}", "basis set:", data.basis.name),
        format!("{: <25} {}", "number of shells:", data.basis.n_shells()),
        format!("{: <25} {}", "basis functions:", data.basis.n_functions()),
    ];
    let available: Vec<&str> = [
        ("MO coefficients", data.coefficients.is_some()),
        ("SCF density", data.scf_density.is_some()),
        ("core Hamiltonian", data.core_hamiltonian.is_some()),
        ("overlap", data.overlap.is_some()),
        ("NATO", data.nato_coefficients.is_some()),
        ("NTO sets", data.nto_coefficients_multi.is_some()),
    ]
    .iter()
    .filter(|(_, present)| *present)
    .map(|(name, _)| *name)
    .collect();
    lines.push(format!("{: <25} {}", "matrices:", available.join(", ")));
    lines.push(mol.get_xyz(mol.name().unwrap_or("")));
    lines.join("\n")
}

use crate::utils::Timer;
use chrono::Local;
use clap::{crate_name, crate_version};
use log::warn;

const LOG_WIDTH: usize = 80;

pub fn write_header() {
    warn!("{: ^LOG_WIDTH$}", "-----------------");
    warn!("{: ^LOG_WIDTH$}", crate_name!().to_uppercase());
    warn!("{: ^LOG_WIDTH$}", "-----------------");
    warn!("{: ^LOG_WIDTH$}", format!("version: {}", crate_version!()));
    warn!("{: ^LOG_WIDTH$}", "");
    warn!("{: ^LOG_WIDTH$}", format!("{::^55}", ""));
    warn!(
        "{: ^LOG_WIDTH$}",
        "::  extraction of quantum chemistry report data  ::"
    );
    warn!(
        "{: ^LOG_WIDTH$}",
        "::   formatted checkpoint files and Q-Chem output   ::"
    );
    warn!("{: ^LOG_WIDTH$}", format!("{::^55}", ""));
    warn!(
        "{: ^LOG_WIDTH$}",
        format!("started: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    );
    warn!("{: ^LOG_WIDTH$}", "");
}

pub fn write_footer(timer: Timer) {
    warn!("{}", timer);
    warn!("{: ^LOG_WIDTH$}", "");
    warn!("{: ^LOG_WIDTH$}", "::::::::::::::::::::::::::::::::::::::");
    warn!(
        "{: ^LOG_WIDTH$}",
        format!(
            "::   Thank you for using {}    ::",
            crate_name!().to_uppercase()
        )
    );
    warn!("{: ^LOG_WIDTH$}", "::::::::::::::::::::::::::::::::::::::");
    warn!("{: ^LOG_WIDTH$}", "");
}

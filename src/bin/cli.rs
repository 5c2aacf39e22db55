//! This is the command line tool that loads a data file, fits the
//! psychometric curve and, if requested, estimates the distribution of the
//! fitted parameters with the parametric bootstrap.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{value_parser, Arg, Command};
use env_logger::Env;
use psychometric::pipeline::Pipeline;
use psychometric::FitOptions;
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::io;
use std::path::Path;
use std::process::ExitCode;

/// Setting this variable to an integer makes runs reproducible.
const SEED_VAR: &str = "PSYCHOMETRIC_SEED";

fn make_rng() -> StdRng {
    let seed = match std::env::var(SEED_VAR) {
        Ok(val) => val.trim().parse::<u64>().ok().or_else(|| {
            log::warn!("Ignoring {}={}, not an integer", SEED_VAR, val);
            None
        }),
        Err(_) => None,
    };

    match seed {
        Some(seed) => {
            log::info!("Using the seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

fn main() -> ExitCode {
    let matches = Command::new("psychometric")
        .version("1.x")
        .about("Fits a logistic psychometric function to binary responses")
        .arg(
            Arg::new("INPUT")
                .help("Data file with two columns: position and response")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("NDIST")
                .help("Number of bootstrap simulations, 0 disables them")
                .required(true)
                .value_parser(value_parser!(usize))
                .index(2),
        )
        .get_matches();

    // Warnings, such as bootstrap iterations that did not converge, are
    // shown unless RUST_LOG says otherwise.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let (Some(input), Some(ndist)) = (
        matches.get_one::<String>("INPUT"),
        matches.get_one::<usize>("NDIST"),
    ) else {
        return ExitCode::FAILURE;
    };

    let mut rng = make_rng();
    let pipeline = Pipeline::with_options(FitOptions::default());
    let mut stdout = io::stdout().lock();
    match pipeline.run(Path::new(input), *ndist, &mut rng, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error during {}: {}", err.stage(), err);
            ExitCode::FAILURE
        }
    }
}

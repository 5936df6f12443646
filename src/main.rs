use std::env;
use std::error::Error;
use std::process::ExitCode;

use tracing::{
    error,
    info
};
use tracing_subscriber::EnvFilter;

use sunshinemap::configuration::Configuration;
use sunshinemap::sunshine::sunshinerecord::SunshineRecord;
use sunshinemap::sunshine::sunshineseries::SunshineSeries;

const USAGE: &str = "usage: sunshinemap <config.json> <data.json> <threshold>... [--fitter NAME]";
const DEFAULT_FITTER: &str = "sunshine";
const PATH_PRECISION: usize = 2;

fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut fitter_name = DEFAULT_FITTER.to_owned();
    let mut positional = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--fitter" {
            fitter_name = iter.next().ok_or(USAGE)?;
        } else {
            positional.push(arg);
        }
    }
    if positional.len() < 3 {
        return Err(USAGE.into());
    }

    let config = Configuration::from_reader(&positional[0])?;
    let records = SunshineRecord::from_reader(&positional[1])?;
    let series = SunshineSeries::group_records(&records)?;
    info!(cities = series.len(), fitter = fitter_name.as_str(), "loaded sunshine data");

    let map = config.build_map(series, &fitter_name)?;
    for threshold_str in &positional[2..] {
        let threshold: f64 = threshold_str.parse()?;
        let path = map.band_path(threshold)?;
        println!("{}\t{}", threshold, path.to_svg_path_data(PATH_PRECISION));
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

use std::io::Write;
use std::process::ExitCode;

use env_logger::Builder;
use log::{Level, LevelFilter, debug, info};

use crate::args::ValidatedArgs;
use crate::error::AppError;

mod args;
mod error;

fn main() -> ExitCode {
    match args::parse().and_then(|args| run(&args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            err.into()
        }
    }
}

fn run(args: &ValidatedArgs) -> Result<(), AppError> {
    initialize_logging(args.verbose)?;

    info!("Fetching gem metadata for '{}'...", args.gem_name);
    let url = args.registry.repository_url(&args.gem_name)?;
    info!("Found repository URL: {url}");

    if args.show_url {
        println!("{url}");
        return Ok(());
    }

    let backend = gem_clone::dispatch(&url, &gem_clone::System).into_result()?;
    debug!("Cloned with {backend}");
    println!("Successfully cloned repository: {url}");
    Ok(())
}

fn report(err: &AppError) {
    eprintln!("ERROR:  {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("\tCaused by: {cause}");
        source = cause.source();
    }
}

/// Verbose output goes through the `log` facade at `Info`. `RUST_LOG` overrides the defaults.
fn initialize_logging(verbose: bool) -> Result<(), AppError> {
    let mut builder = Builder::new();

    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    builder.filter(Some("gem_clone"), level);

    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    }

    builder.format(|out, record| match record.level() {
        Level::Info => writeln!(out, "{}", record.args()),
        level => writeln!(out, "[{level:5}] ({}): {}", record.target(), record.args()),
    });

    builder.try_init().map_err(AppError::logging)
}

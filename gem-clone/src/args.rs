use clap::FromArgMatches;
use clap::{CommandFactory, Parser};

use crate::error::AppError;

// Shamelessly borrowed from https://github.com/crate-ci/clap-cargo/blob/0378657ffdf2b67bcd6f1ab56e04a1322b92dd0e/src/style.rs
// thanks to https://stackoverflow.com/a/79614957
use anstyle::AnsiColor::*;
use anstyle::Effects;
use anstyle::Style;

const HEADER: Style = Green.on_default().effects(Effects::BOLD);
const USAGE: Style = Green.on_default().effects(Effects::BOLD);
const LITERAL: Style = Cyan.on_default().effects(Effects::BOLD);
const PLACEHOLDER: Style = Cyan.on_default();
const ERROR: Style = Red.on_default().effects(Effects::BOLD);
const VALID: Style = Cyan.on_default().effects(Effects::BOLD);
const INVALID: Style = Yellow.on_default().effects(Effects::BOLD);

const APP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(HEADER)
    .usage(USAGE)
    .literal(LITERAL)
    .placeholder(PLACEHOLDER)
    .error(ERROR)
    .valid(VALID)
    .invalid(INVALID);

const LONG_ABOUT: &str = "\
The clone command fetches gem metadata from RubyGems.org and clones
the gem's source repository using git goget (preferred), ghq, or git
based on the homepage or source_code_uri from the gem's metadata.

Examples:
  gem-clone sinatra
  gem-clone rails --verbose
  gem-clone rails --show-url";

#[derive(Debug, Parser)]
#[command(name = "gem-clone")]
#[command(about = "Clone a gem repository using git goget, ghq, or git")]
#[command(long_about = LONG_ABOUT)]
#[command(styles = APP_STYLING)]
#[command(term_width = 80)]
struct Args {
    /// Name of the gem to clone
    #[arg(value_name = "GEM_NAME")]
    gem_name: String,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Show repository URL without cloning
    #[arg(long, short = 'u')]
    show_url: bool,

    /// Base URL of the gem registry
    #[arg(long, value_name = "URL", default_value = gem_clone::DEFAULT_REGISTRY, hide = true)]
    registry: String,
}

#[derive(Debug)]
pub struct ValidatedArgs {
    pub gem_name: String,
    pub verbose: bool,
    pub show_url: bool,
    pub registry: gem_clone::Registry,
}

impl TryFrom<Args> for ValidatedArgs {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.gem_name.trim().is_empty() {
            return Err(AppError::arg_validation(
                "gem name must not be empty".to_string(),
            ));
        }
        let registry = gem_clone::Registry::new(&args.registry)
            .map_err(|err| AppError::arg_validation(err.to_string()))?;
        Ok(ValidatedArgs {
            gem_name: args.gem_name,
            verbose: args.verbose,
            show_url: args.show_url,
            registry,
        })
    }
}

static VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn parse() -> Result<ValidatedArgs, AppError> {
    let matches = Args::command().version(VERSION).get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => {
            err.format(&mut Args::command()).exit();
        }
    };
    ValidatedArgs::try_from(args)
}

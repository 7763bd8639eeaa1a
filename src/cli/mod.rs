use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hydrotrace::loader::{FallbackPolicy, LoaderConfig};

mod config;
mod info;
mod replay;

use config::Config;

/// hydrotrace - thermal-hydraulic simulation output reader
#[derive(Parser)]
#[command(name = "hydrotrace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the format of a data file and list its parameters
    Info {
        /// KORSAR, TRAP csv or LENT file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Text encoding for KORSAR files (overrides the config file)
        #[arg(short = 'e', long)]
        encoding: Option<String>,

        /// Fail instead of substituting the default data set
        #[arg(long)]
        strict: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Load a session's data file and rebuild its derived columns
    Replay {
        /// Session file (TOML)
        #[arg(value_name = "SESSION")]
        session: PathBuf,

        /// Fail instead of substituting the default data set
        #[arg(long)]
        strict: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info {
            file,
            encoding,
            strict,
            config,
        } => {
            let loader = loader_config(config, encoding, strict)?;
            info::run(file, loader)
        }
        Commands::Replay {
            session,
            strict,
            config,
        } => {
            let loader = loader_config(config, None, strict)?;
            replay::run(session, loader)
        }
    }
}

/// Config file values overridden by command-line flags
fn loader_config(
    config: Option<PathBuf>,
    encoding: Option<String>,
    strict: bool,
) -> Result<LoaderConfig> {
    let mut loader = Config::load_optional(config.as_deref())?.loader;
    if let Some(encoding) = encoding {
        loader.encoding = encoding;
    }
    if strict {
        loader.fallback = FallbackPolicy::Strict;
    }
    Ok(loader)
}

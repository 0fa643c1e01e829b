mod parse;
mod resolve;
mod tokens;

use clap::{Parser, Subcommand};
use naming_core::ContextConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "naming",
    version,
    about = "Resolve JNDI style enterprise bean identifiers",
    long_about = "Tokenizes and parses bean identifiers such as php:global/example/UserProcessor/remote \
                  and shows how a lookup would be dispatched to a local or remote bean container."
)]
pub struct Cli {
    /// JSON file with naming defaults (schemes and properties)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the tokens of an identifier
    Tokens {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Parse an identifier into a resource descriptor
    Parse {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Dry-run a lookup and print the dispatch plan
    #[command(
        long_about = "Runs the full lookup pipeline against a recording container instead of a real one. \
                      The printed plan shows the chosen connection, the session id and the bean class."
    )]
    Resolve {
        #[arg(value_name = "NAME")]
        name: String,
        /// Application a local lookup is bound to
        #[arg(long, value_name = "APP")]
        application: Option<String>,
        /// Session id of the inbound request to reuse
        #[arg(long, value_name = "ID")]
        session_id: Option<String>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = naming_core::logging::init_logging("cli", cli.verbose);

    let config = match &cli.config {
        Some(path) => ContextConfig::load(path)?,
        None => ContextConfig::default(),
    };

    match cli.command {
        Commands::Tokens { name } => tokens::run(&config, &name),
        Commands::Parse { name } => parse::run(&config, &name),
        Commands::Resolve {
            name,
            application,
            session_id,
        } => resolve::run(config, &name, application, session_id),
    }
}

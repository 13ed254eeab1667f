//! Command-line argument definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// msmaaedeh - translations, language preference and page direction for the Ms. Maaedeh website
#[derive(Parser, Debug)]
#[command(name = "msmaaedeh")]
#[command(version)]
#[command(about = "Translations, language preference and page direction for the Ms. Maaedeh website", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration directory holding settings.conf and logs (default: ~/.config/msmaaedeh)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Load locale bundles from this directory instead of the built-in ones
    #[arg(long, global = true)]
    pub locales_dir: Option<PathBuf>,

    /// Use this i18n.yml instead of the built-in one
    #[arg(long, global = true)]
    pub i18n_config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the translation of one or more dotted keys
    Lookup {
        /// Keys such as nav.home or home.hero.tagline
        #[arg(required = true)]
        keys: Vec<String>,
        /// Look up in this language without changing the saved preference
        #[arg(long)]
        lang: Option<String>,
    },
    /// Show the active language, its direction and the document root tag
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch to a language and save it as the preference
    SetLang {
        /// Language code (en, fa)
        code: String,
    },
    /// Switch to the next available language and save it
    Toggle,
    /// Verify every language has the same keys as the fallback language
    Check,
    /// Print a language's translations as flat JSON
    Export {
        /// Language to export (default: the active one)
        #[arg(long)]
        lang: Option<String>,
    },
}

/// What: Determine the log level from command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// "0.1.0" for releases, "0.1.0@abc1234" for dev builds
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("RENOTE_GIT_HASH");
    const IS_RELEASE: &str = env!("RENOTE_IS_RELEASE");

    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "renote", version = version())]
#[command(about = "Renumber footnote identifiers across markup documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the documents and renote.json (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover, apply and verify (the default)
    Run,

    /// Derive the mapping from the definition document and write it out
    Map,

    /// Rewrite documents from an existing mapping file
    Apply,

    /// Check that the definition document is numbered in sequence
    #[command(alias = "check")]
    Verify,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., definition, documents, label-style)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Write a default renote.json
    Init,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Confman: inspect and edit an application's configuration directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(flatten)]
    pub location: Location,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which directory to manage. Exactly one must be given.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Location {
    /// Application name under the platform config root
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,

    /// Directory name under the home directory, used verbatim
    #[arg(long, value_name = "NAME")]
    pub home: Option<String>,

    /// Exact directory path
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved directory
    Path,
    /// List entries in the directory
    List,
    /// Report whether a file exists
    Exists { file: String },
    /// Print a file to stdout
    Read { file: String },
    /// Replace the contents of an existing file
    Write { file: String, content: String },
    /// Create a new file; fails if it already exists
    Create {
        file: String,
        content: String,
        /// Permission bits in octal
        #[arg(long, default_value = "644", value_parser = parse_mode)]
        mode: u32,
    },
    /// Create a subdirectory
    Mkdir {
        dir: String,
        /// Permission bits in octal
        #[arg(long, default_value = "755", value_parser = parse_mode)]
        mode: u32,
        /// Create missing parent directories too
        #[arg(short, long)]
        parents: bool,
    },
    /// Remove a file or subdirectory
    Rm { file: String },
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        Ok(_) => Err(format!("mode {s} is out of range")),
        Err(_) => Err(format!("invalid octal mode: {s}")),
    }
}

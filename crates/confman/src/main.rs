mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use confman_core::{Config, ConfigError, Result};
use log::{debug, LevelFilter};

use cli::{CliArgs, Commands, Location};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn open(location: &Location) -> Result<Config> {
    match (&location.app, &location.home, &location.dir) {
        (Some(name), _, _) => Config::open(name),
        (_, Some(name), _) => Config::open_home(name),
        (_, _, Some(dir)) => Config::open_specific(dir),
        // clap enforces exactly one
        (None, None, None) => unreachable!("no location given"),
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = open(&args.location)?;
    debug!("Using {}", config.path().display());

    match args.command {
        Commands::Path => println!("{}", config.path().display()),
        Commands::List => {
            for name in config.list()? {
                println!("{name}");
            }
        }
        Commands::Exists { file } => println!("{}", config.exists(&file)?),
        Commands::Read { file } => {
            let data = config.read(&file)?;
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&data)
                .and_then(|()| stdout.flush())
                .map_err(|e| ConfigError::io(e, "write", "<stdout>"))?;
        }
        Commands::Write { file, content } => {
            config.write_string(&file, &content)?;
        }
        Commands::Create { file, content, mode } => {
            config.create_string(&file, &content, mode)?;
        }
        Commands::Mkdir { dir, mode, parents } => {
            let created = if parents {
                config.mkdir_all(&dir, mode)?
            } else {
                config.mkdir(&dir, mode)?
            };
            println!("{created}");
        }
        Commands::Rm { file } => config.delete_file(&file)?,
    }
    Ok(())
}

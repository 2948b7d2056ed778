use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use env_logger::Env;

use sleeptrack::cli::args::{Cli, Commands};
use sleeptrack::cli::{commands, AppContext};
use sleeptrack::config::{Config, Paths};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Completions need neither config nor storage
    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell)?);
        return Ok(());
    }

    let paths = Paths::resolve(cli.home.clone())?;
    paths
        .ensure_dirs()
        .with_context(|| format!("creating {}", paths.root.display()))?;
    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("loading {}", paths.config_file.display()))?;

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(Env::default().default_filter_or(config.general.log_level.as_str()))
        .init();
    config.general.color.apply();

    let format = cli.output.unwrap_or(config.general.default_output);
    let ctx = AppContext::with_config(paths, config).context("opening sleep database")?;

    let output = match cli.command {
        Commands::Start => commands::start(&ctx, format)?,
        Commands::Stop => commands::stop(&ctx, format)?,
        Commands::Status => commands::status(&ctx, format)?,
        Commands::Rate { quality, night } => commands::rate(&ctx, &quality, night, format)?,
        Commands::List { limit } => commands::list(&ctx, limit, format)?,
        Commands::Clear { force } => commands::clear(&ctx, force, format)?,
        Commands::Tui => {
            sleeptrack::tui::run(&ctx)?;
            String::new()
        }
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

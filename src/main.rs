use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use taskflow::cli::args::{Cli, Commands};
use taskflow::cli::commands;
use taskflow::config::{Config, Paths};
use taskflow::core::{Clock, FixedClock, SystemClock};
use taskflow::logging;
use taskflow::storage::TaskStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve(cli.home.clone())?;
    let config = Config::load_from_path(&paths.config_file)?;

    logging::init(&config.logging.level, cli.verbose);
    config.general.color.apply();

    let clock: Box<dyn Clock> = match cli.now {
        Some(instant) => Box::new(FixedClock(instant)),
        None => Box::new(SystemClock),
    };
    let format = cli.output.unwrap_or(config.general.default_output);

    // Commands that never touch the database.
    let output = match &cli.command {
        Commands::Parse { text } => Some(commands::parse(text, clock.now(), format)?),
        Commands::Config(args) => Some(commands::config(&paths, &config, &args.command, format)?),
        Commands::Completions { shell } => Some(commands::completions(*shell)?),
        _ => None,
    };

    let output = match output {
        Some(output) => output,
        None => {
            paths.ensure_dirs()?;
            let mut store = TaskStore::open_at(&paths.database)
                .with_context(|| format!("opening {}", paths.database.display()))?;
            let now = clock.now();

            match cli.command {
                Commands::Add(args) => commands::add(&store, &args, now, format)?,
                Commands::List(args) => {
                    commands::list(&store, &args, config.board.default_filter, now, format)?
                },
                Commands::Show { id } => commands::show(&store, &id, now, format)?,
                Commands::Done { id } => commands::toggle(&store, &id, now, format)?,
                Commands::Edit(args) => commands::edit(&store, &args, now, format)?,
                Commands::Delete { id } => commands::delete(&store, &id, now, format)?,
                Commands::ClearCompleted => commands::clear_completed(&store, format)?,
                Commands::Stats => commands::stats(&store, now, format)?,
                Commands::Export { file } => commands::export(&store, file.as_deref(), format)?,
                Commands::Import { file } => commands::import(&mut store, &file, format)
                    .with_context(|| format!("importing {}", file.display()))?,
                Commands::Tui => {
                    taskflow::tui::run(&store, clock.as_ref(), config.board.default_filter)?;
                    String::new()
                },
                Commands::Parse { .. } | Commands::Config(_) | Commands::Completions { .. } => {
                    String::new()
                },
            }
        },
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

//! CLI module for docgraph

mod args;

pub use args::{Args, Command};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::generator::{Generator, GeneratorOptions};
use crate::oracle::ProgramSnapshot;
use crate::serialize::{Metadata, Serializer};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_logging(args.verbose());

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Generate {
            snapshot,
            entry,
            output,
            config,
            compact,
            debug,
            verbose,
        } => {
            // Load config file if it exists
            let mut cfg = match &config {
                Some(config_path) => Config::load(config_path)?,
                None => Config::load_or_default(Path::new("docgraph.toml")),
            };

            // Merge CLI arguments (CLI takes precedence)
            cfg.merge_cli(output, compact, debug);

            if verbose {
                println!("Snapshot: {}", snapshot.display());
                println!("Output: {}", cfg.output.path.display());
                println!("Package: {}", cfg.project.package_name);
                println!("Ambient modules: {}", cfg.generator.include_ambient_modules);
                println!("Globals: {}", cfg.generator.document_globals);
                if !entry.is_empty() {
                    println!("Entries: {:?}", entry);
                }
            }

            println!("Loading snapshot...");
            let program = ProgramSnapshot::load(&snapshot)?;
            let entry_units = resolve_entries(program.source_units(), &entry)?;
            println!("Found {} entry units", entry_units.len());

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner.set_message("Building documentation graph...");

            let options = GeneratorOptions::from(&cfg);
            let generation = Generator::new(&program, options).run(&entry_units);
            let generation = match generation {
                Ok(generation) => generation,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };

            spinner.set_message("Serializing...");
            let documentation = Serializer::new(&program, &generation).serialize(Metadata::now());
            spinner.finish_and_clear();
            let documentation = documentation?;

            let stats = &generation.stats;
            println!(
                "Generation complete: {} pages, {} entries, {} symbols",
                stats.pages, stats.entries, stats.symbols
            );

            write_output(&cfg.output.path, &documentation.to_json(cfg.output.pretty)?)?;
            println!("Documentation written to: {}", cfg.output.path.display());

            if cfg.generator.debug {
                println!("{}", serde_json::to_string_pretty(stats)?);
            }

            Ok(())
        }

        Command::Version => {
            println!("docgraph {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Source units matching any of `patterns`, in snapshot order.
///
/// With no patterns every unit is an entry. A pattern that matches nothing
/// is an error.
pub fn resolve_entries<'a>(
    units: impl IntoIterator<Item = &'a str>,
    patterns: &[String],
) -> Result<Vec<String>> {
    let units: Vec<&str> = units.into_iter().collect();
    if patterns.is_empty() {
        return Ok(units.into_iter().map(str::to_string).collect());
    }

    let compiled = patterns
        .iter()
        .map(|p| Pattern::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for (raw, pattern) in patterns.iter().zip(&compiled) {
        if !units.iter().any(|unit| pattern.matches(unit)) {
            return Err(Error::UnknownEntry(raw.clone()));
        }
    }

    Ok(units
        .into_iter()
        .filter(|unit| compiled.iter().any(|p| p.matches(unit)))
        .map(str::to_string)
        .collect())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}

//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build a documentation graph from a program snapshot
#[derive(Parser, Debug)]
#[command(name = "docgraph")]
#[command(about = "Build a documentation graph from a program snapshot")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Whether debug logging was requested
    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Generate { verbose, .. } => *verbose,
            Command::Version => false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the documentation model for a program snapshot
    Generate {
        /// Path to the program snapshot (JSON)
        snapshot: PathBuf,

        /// Glob patterns selecting entry source units (can be repeated)
        #[arg(short, long)]
        entry: Vec<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        /// Print generation statistics as JSON
        #[arg(long)]
        debug: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let args = Args::try_parse_from(["docgraph", "generate", "program.json"]).unwrap();
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
                assert_eq!(snapshot, PathBuf::from("program.json"));
                assert!(entry.is_empty());
                assert!(output.is_none());
                assert!(config.is_none());
                assert!(!compact);
                assert!(!debug);
                assert!(!verbose);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let args = Args::try_parse_from([
            "docgraph", "generate", "program.json",
            "--entry", "/proj/src/index.ts",
            "-e", "/proj/src/util/*.ts",
            "--output", "/tmp/docs.json",
            "--config", "custom.toml",
            "--compact",
            "--debug",
            "--verbose",
        ])
        .unwrap();

        assert!(args.verbose());
        match args.command {
            Command::Generate {
                entry,
                output,
                config,
                compact,
                debug,
                ..
            } => {
                assert_eq!(
                    entry,
                    vec!["/proj/src/index.ts".to_string(), "/proj/src/util/*.ts".to_string()]
                );
                assert_eq!(output, Some(PathBuf::from("/tmp/docs.json")));
                assert_eq!(config, Some(PathBuf::from("custom.toml")));
                assert!(compact);
                assert!(debug);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_requires_snapshot() {
        let result = Args::try_parse_from(["docgraph", "generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_version_command() {
        let args = Args::try_parse_from(["docgraph", "version"]).unwrap();
        assert!(matches!(args.command, Command::Version));
        assert!(!args.verbose());
    }
}

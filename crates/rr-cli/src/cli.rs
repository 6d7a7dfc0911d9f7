use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rider-rewards", version)]
#[command(about = "Rider registration and reward objectives", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Walk through the rider registration wizard
    Register,
    /// Show the home-screen objectives
    Objectives {
        /// Keep the board open for N seconds so effects can play
        #[arg(short, long)]
        watch_secs: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_objectives_with_watch() {
        let cli = Cli::try_parse_from([
            "rider-rewards",
            "--config",
            "/tmp/rr.toml",
            "objectives",
            "--watch-secs",
            "10",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rr.toml")));
        assert!(matches!(
            cli.command,
            Commands::Objectives {
                watch_secs: Some(10)
            }
        ));
    }

    #[test]
    fn parses_register() {
        let cli = Cli::try_parse_from(["rider-rewards", "register"]).unwrap();
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Register));
    }
}

//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::deployment::{DeploymentUri, Version};

/// deployinfo - Inspect deployment metadata and check for published updates.
#[derive(Debug, Parser)]
#[command(name = "deployinfo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a settings file
    #[arg(short, long, global = true, env = "DEPLOYINFO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the deployment context of this process
    Show(ShowArgs),

    /// Check the update location for a newer version
    Check(CheckArgs),

    /// Check for a newer version and start the updater
    Update(UpdateArgs),

    /// Start a program with the deployment context in its environment
    Launch(LaunchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Also list the raw CLICKONCE_* variables
    #[arg(long)]
    pub env: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `update` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpdateArgs {
    /// Start the updater without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `launch` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LaunchArgs {
    /// Mark the child as network deployed
    #[arg(long)]
    pub network_deployed: bool,

    /// Version to report as current
    #[arg(long, value_name = "VERSION")]
    pub current_version: Option<Version>,

    /// Location of the deployment manifest
    #[arg(long, value_name = "URI")]
    pub update_location: Option<DeploymentUri>,

    /// Activation data item (repeatable, replaces inherited items)
    #[arg(long = "activation-data", value_name = "DATA")]
    pub activation_data: Vec<String>,

    /// Wait for the program and exit with its status
    #[arg(long)]
    pub wait: bool,

    /// Program to start
    pub program: String,

    /// Arguments for the program
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["deployinfo"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_flags_parse() {
        let cli = Cli::try_parse_from(["deployinfo", "show", "--json", "--env"]).unwrap();
        match cli.command {
            Some(Commands::Show(args)) => {
                assert!(args.json);
                assert!(args.env);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn launch_parses_overrides_and_trailing_args() {
        let cli = Cli::try_parse_from([
            "deployinfo",
            "launch",
            "--network-deployed",
            "--current-version",
            "1.2.3.4",
            "--update-location",
            "https://deploy.example.com/Contoso.application",
            "--activation-data",
            "a",
            "--activation-data",
            "b",
            "contoso",
            "--",
            "--restarted",
            "-v",
        ])
        .unwrap();

        let Some(Commands::Launch(args)) = cli.command else {
            panic!("expected launch");
        };
        assert!(args.network_deployed);
        assert_eq!(args.current_version, Some(Version::new(1, 2, 3, 4)));
        assert_eq!(
            args.update_location.unwrap().to_string(),
            "https://deploy.example.com/Contoso.application"
        );
        assert_eq!(args.activation_data, vec!["a", "b"]);
        assert_eq!(args.program, "contoso");
        assert_eq!(args.args, vec!["--restarted", "-v"]);
        assert!(!cli.verbose);
    }

    #[test]
    fn launch_rejects_bad_version() {
        let result = Cli::try_parse_from([
            "deployinfo",
            "launch",
            "--current-version",
            "1.x",
            "contoso",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["deployinfo", "-v", "-q", "show"]).is_err());
    }
}

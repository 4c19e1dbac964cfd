use crate::lookup::LookupKind;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zbx")]
#[command(version)]
#[command(about = "Reconcile declared Zabbix objects against the JSON-RPC API", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ~/.config/zabbix-reconcile/config.toml)
    #[arg(long, global = true, value_name = "PATH", env = "ZBX_CONFIG")]
    pub config: Option<PathBuf>,

    /// State file, overriding `state_file` from the config
    #[arg(long, global = true, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create untracked resources and update tracked ones
    Apply(ApplyArgs),

    /// Read tracked resources back into the state file
    Refresh {
        /// Only refresh this resource
        name: Option<String>,

        /// Number of resources processed in parallel
        #[arg(short, long, default_value = "4")]
        jobs: usize,
    },

    /// Delete tracked resources
    Destroy(DestroyArgs),

    /// Resolve the id of a host, template, host group or proxy by name
    Lookup {
        #[arg(value_enum)]
        kind: LookupKind,

        /// Technical name (host group: group name)
        name: String,
    },

    /// Show tracked resources
    State {
        /// Show the full state of one resource
        name: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Manifest file (.json or .toml)
    #[arg(short, long, value_name = "PATH")]
    pub file: PathBuf,

    /// Number of resources processed in parallel
    #[arg(short, long, default_value = "4")]
    pub jobs: usize,
}

#[derive(Args)]
pub struct DestroyArgs {
    /// Resources to destroy
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub names: Vec<String>,

    /// Destroy every tracked resource
    #[arg(long)]
    pub all: bool,

    /// Number of resources processed in parallel
    #[arg(short, long, default_value = "4")]
    pub jobs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_args() {
        let cli = Cli::try_parse_from(["zbx", "-vv", "apply", "-f", "hosts.toml", "--jobs", "8"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Apply(args) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.file, PathBuf::from("hosts.toml"));
        assert_eq!(args.jobs, 8);
    }

    #[test]
    fn test_destroy_needs_names_or_all() {
        assert!(Cli::try_parse_from(["zbx", "destroy"]).is_err());
        assert!(Cli::try_parse_from(["zbx", "destroy", "web01", "--all"]).is_err());
        let cli = Cli::try_parse_from(["zbx", "destroy", "--all"]).unwrap();
        assert!(matches!(cli.command, Command::Destroy(DestroyArgs { all: true, .. })));
    }

    #[test]
    fn test_lookup_kind_names() {
        let cli = Cli::try_parse_from(["zbx", "lookup", "host-group", "Linux servers"]).unwrap();
        let Command::Lookup { kind, name } = cli.command else {
            panic!("expected lookup");
        };
        assert_eq!(kind, LookupKind::HostGroup);
        assert_eq!(name, "Linux servers");
    }
}

//! CLI structure and command definitions.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sealedsecret_types::{LogLevel, SealerConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sealedsecret")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Seal secret values for a Kubernetes sealed-secrets controller", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Name, namespace and scope of the target secret.
#[derive(Args, Debug, Clone)]
pub struct BindingArgs {
    /// Secret name
    #[arg(long)]
    pub name: String,

    /// Secret namespace
    #[arg(short, long)]
    pub namespace: String,

    /// Disclosure scope: strict, namespace-wide, or cluster-wide
    #[arg(short, long)]
    pub scope: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seal one value and print the encrypted text
    Seal {
        #[command(flatten)]
        binding: BindingArgs,

        /// Controller certificate or public key (PEM)
        #[arg(long)]
        cert: PathBuf,

        /// Value to seal (read from stdin if omitted)
        #[arg(long)]
        value: Option<String>,
    },

    /// Seal every entry of a YAML or JSON map and print them as JSON
    #[command(name = "seal-many")]
    SealMany {
        #[command(flatten)]
        binding: BindingArgs,

        /// Controller certificate or public key (PEM)
        #[arg(long)]
        cert: PathBuf,

        /// File holding a map of string values
        #[arg(long)]
        values: PathBuf,
    },

    /// Print the binding label a secret would be sealed under
    Label {
        #[command(flatten)]
        binding: BindingArgs,
    },

    /// Show the layout of an encrypted value without decrypting it
    Inspect {
        /// Encrypted value, or `-` to read from stdin
        #[arg(default_value = "-")]
        value: String,
    },
}

impl Cli {
    /// Log level requested on the command line, if any. `--debug` wins over
    /// `--verbose`, which wins over `--quiet`.
    pub fn log_level_override(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Debug)
        } else if self.verbose {
            Some(LogLevel::Info)
        } else if self.quiet {
            Some(LogLevel::None)
        } else {
            None
        }
    }

    pub fn execute(&self, config: SealerConfig) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Commands::Seal { binding, cert, value } => {
                seal::single(config, binding, cert, value.as_deref())
            }
            Commands::SealMany { binding, cert, values } => {
                seal::many(config, binding, cert, values)
            }
            Commands::Label { binding } => {
                label::execute(binding, self.quiet)
            }
            Commands::Inspect { value } => {
                inspect::execute(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seal() {
        let cli = Cli::try_parse_from([
            "sealedsecret", "seal", "--name", "db-pass", "-n", "prod", "--cert", "cert.pem", "--value", "x",
        ])
        .unwrap();
        match cli.command {
            Commands::Seal { binding, cert, value } => {
                assert_eq!(binding.name, "db-pass");
                assert_eq!(binding.namespace, "prod");
                assert_eq!(binding.scope, None);
                assert_eq!(cert, PathBuf::from("cert.pem"));
                assert_eq!(value.as_deref(), Some("x"));
            }
            _ => panic!("expected seal"),
        }
    }

    #[test]
    fn test_parse_seal_many_with_scope() {
        let cli = Cli::try_parse_from([
            "sealedsecret", "seal-many", "--name", "app", "--namespace", "prod", "--scope", "cluster-wide",
            "--cert", "cert.pem", "--values", "values.yml",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::SealMany { ref binding, .. } if binding.scope.as_deref() == Some("cluster-wide")
        ));
    }

    #[test]
    fn test_inspect_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["sealedsecret", "inspect"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect { ref value } if value == "-"));
    }

    #[test]
    fn test_log_level_override() {
        let cli = Cli::try_parse_from(["sealedsecret", "--debug", "-v", "inspect"]).unwrap();
        assert_eq!(cli.log_level_override(), Some(LogLevel::Debug));

        let cli = Cli::try_parse_from(["sealedsecret", "inspect", "--quiet"]).unwrap();
        assert_eq!(cli.log_level_override(), Some(LogLevel::None));

        let cli = Cli::try_parse_from(["sealedsecret", "inspect"]).unwrap();
        assert_eq!(cli.log_level_override(), None);
    }

    #[test]
    fn test_seal_requires_cert() {
        assert!(Cli::try_parse_from(["sealedsecret", "seal", "--name", "a", "-n", "b"]).is_err());
    }
}

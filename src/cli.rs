//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Shortly - a session-authenticated URL shortener
#[derive(Parser, Debug)]
#[command(name = "shortly")]
#[command(version)]
#[command(about = "A session-authenticated URL shortener", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// List all short links, newest first
    List,

    /// Shorten a URL from the command line
    Add {
        /// URL to shorten
        url: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: print to stdout)
        output_path: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::parse_from(["shortly"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::parse_from(["shortly", "list", "-c", "prod.toml"]);
        assert_eq!(cli.command, Some(Commands::List));
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));
    }

    #[test]
    fn test_config_generate_with_path() {
        let cli = Cli::parse_from(["shortly", "config", "generate", "out.toml"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Generate {
                    output_path: Some("out.toml".to_string())
                }
            })
        );
    }

    #[test]
    fn test_add_requires_url() {
        assert!(Cli::try_parse_from(["shortly", "add"]).is_err());
        let cli = Cli::parse_from(["shortly", "add", "http://www.roflzoo.com/"]);
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                url: "http://www.roflzoo.com/".to_string()
            })
        );
    }
}

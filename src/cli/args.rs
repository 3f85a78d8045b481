//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--root <path>`: Use that directory as the workspace root
//! - `--actor <name>`: Submit commands as this user
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// templatework - manage inheritable metadata templates of data containers
#[derive(Parser, Debug)]
#[command(name = "tw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this directory as the workspace root
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Submit commands as this user
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a workspace in the root directory
    Init {
        /// Write the given actor into the workspace config
        #[arg(long = "as", value_name = "NAME")]
        owner: Option<String>,
    },

    /// Manage containers
    Container {
        #[command(subcommand)]
        action: ContainerAction,
    },

    /// Manage templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// List the templates visible in a container
    #[command(
        after_help = "\
Rows marked with * are the container's default template.
Templates shown as (inherited) belong to the parent container."
    )]
    List {
        /// Container id
        container: u64,
    },

    /// Set or clear a container's default template
    Default {
        #[command(subcommand)]
        action: DefaultAction,
    },

    /// Copy a template into a container
    Copy {
        /// Container id
        container: u64,
        /// Template id, or a unique prefix of it
        template: String,
    },

    /// Delete one of a container's templates
    Delete {
        /// Container id
        container: u64,
        /// Template id, or a unique prefix of it
        template: String,
    },

    /// Turn template inheritance on or off for a container
    Inherit {
        /// Container id
        container: u64,

        /// Offer the parent's templates here
        #[arg(long, conflicts_with = "disable", required_unless_present = "disable")]
        enable: bool,

        /// Make this container an inheritance root
        #[arg(long)]
        disable: bool,
    },

    /// Read application settings
    Setting {
        #[command(subcommand)]
        action: SettingAction,
    },

    /// Get, set, or list workspace configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Container subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ContainerAction {
    /// Register a new container
    Add {
        /// Container id
        id: u64,
        /// Short human-readable alias
        #[arg(long)]
        alias: Option<String>,
        /// Parent container id
        #[arg(long)]
        parent: Option<u64>,
        /// Enabled metadata block (repeatable)
        #[arg(long = "block", value_name = "NAME")]
        blocks: Vec<String>,
    },
    /// List all containers
    List,
}

/// Template subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TemplateAction {
    /// Create a template in a container
    Add {
        /// Container id
        container: u64,
        /// Template name
        name: String,
        /// Pre-filled field as KEY=VALUE (repeatable)
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
}

/// Default-template subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DefaultAction {
    /// Make a template the container's default
    Set {
        /// Container id
        container: u64,
        /// Template id, or a unique prefix of it
        template: String,
    },
    /// Remove the container's default template
    Clear {
        /// Container id
        container: u64,
    },
}

/// Setting subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingAction {
    /// Print a setting's value
    Get {
        /// Setting name, e.g. :SystemEmail
        key: String,
        /// Value printed when the setting is absent
        #[arg(long)]
        default: Option<String>,
    },
    /// Print whether a setting is true
    Check {
        /// Setting name
        key: String,
        /// Treat an absent setting as true
        #[arg(long)]
        default_true: bool,
    },
    /// Print the user guides URL
    Guides,
    /// List all settings
    List,
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

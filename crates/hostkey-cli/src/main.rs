// ABOUTME: Entry point for the hostkey command.
// ABOUTME: Parses arguments, loads config, and dispatches to the conversion commands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hostkey_cli::commands::{
    known_hosts_file_to_legacy, legacy_file_to_known_hosts, read_input, write_output,
};
use hostkey_cli::config::{Config, LegacyFormat};
use hostkey_core::{known_hosts_to_legacy, legacy_to_known_hosts};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hostkey")]
#[command(about = "Convert SSH host keys between registry records and known_hosts lines")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/hostkey/config.toml)
    #[arg(long, global = true, env = "HOSTKEY_CONFIG")]
    config: Option<PathBuf>,

    /// Stop at the first record that fails to convert
    #[arg(long, global = true)]
    strict: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert legacy records into known_hosts lines
    ToKnownHosts {
        /// Input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert known_hosts lines into legacy records
    ToLegacy {
        /// Input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (defaults to the config value)
        #[arg(short, long, value_enum)]
        format: Option<LegacyFormat>,
    },

    /// Convert a single legacy key and value
    ConvertKey {
        /// Identifier, e.g. rsa2@22:example.com
        key: String,

        /// Comma-separated hex fields
        value: String,
    },

    /// Convert a single known_hosts line
    ConvertLine {
        /// The line, quoted as one argument
        line: String,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path),
        None => Config::load_or_default(&Config::default_path()?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    hostkey_log::init(cli.verbose);

    let config = load_config(cli.config)?;
    let strict = cli.strict || config.strict;

    match cli.command {
        Commands::ToKnownHosts { input, output } => {
            let text = read_input(input.as_deref())?;
            let converted = legacy_file_to_known_hosts(&text, strict)?;
            write_output(output.as_deref(), &converted)
        }
        Commands::ToLegacy {
            input,
            output,
            format,
        } => {
            let text = read_input(input.as_deref())?;
            let format = format.unwrap_or(config.legacy_format);
            let converted =
                known_hosts_file_to_legacy(&text, strict, format, &config.registry_section)?;
            write_output(output.as_deref(), &converted)
        }
        Commands::ConvertKey { key, value } => {
            let line = legacy_to_known_hosts(&key, &value)
                .with_context(|| format!("Failed to convert {key}"))?;
            println!("{line}");
            Ok(())
        }
        Commands::ConvertLine { line } => {
            let record =
                known_hosts_to_legacy(&line).context("Failed to convert known_hosts line")?;
            println!("{record}");
            Ok(())
        }
    }
}

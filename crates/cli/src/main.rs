// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dmictl: manage a DMI application repository and inspect DMI files

mod color;
mod commands;
mod config;
mod definition;
mod env;
mod exit_error;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use dmi_core::SystemClock;
use dmi_storage::ApplicationRepository;
use tracing::debug;

use crate::commands::{app, codec, resource, types};
use crate::config::{ConfigFile, Settings};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "dmictl",
    version = env::VERSION,
    about = "Manage service bus applications and DMI metadata files",
    styles = color::styles()
)]
struct Cli {
    /// Config file (default: <config dir>/dmi/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Repository root directory
    #[arg(long, global = true, value_name = "DIR")]
    repository: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t)]
    format: OutputFormat,

    /// Debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install, inspect and transition applications
    App(app::AppArgs),
    /// Manage an application's resource files
    Resource(resource::ResourceArgs),
    /// Print the contents of a DMI file or exported archive
    Decode {
        file: PathBuf,
    },
    /// Write an application definition as a DMI envelope
    Encode {
        /// JSON definition (or DMI envelope to re-encode)
        definition: PathBuf,
        /// Output file
        out: PathBuf,
        /// Protocol version to write (default: config `protocol_version`, else newest)
        #[arg(long)]
        version: Option<u16>,
    },
    /// List registered object types
    Types,
}

fn main() {
    if let Err(err) = run() {
        let exit = ExitError::from_anyhow(err);
        if !exit.message.is_empty() {
            eprintln!("error: {}", exit.message);
        }
        std::process::exit(exit.code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let file = ConfigFile::discover(cli.config.as_deref())?;
    let settings = Settings::resolve(file, cli.repository)?;
    logging::init(&logging::filter_directive(env::log_filter(), cli.verbose, settings.log.as_deref()))?;
    debug!(repository = %settings.repository.display(), version = %settings.protocol_version, "settings");

    match command {
        Commands::App(args) => app::handle(args.command, &open(&settings)?, cli.format),
        Commands::Resource(args) => resource::handle(args.command, &open(&settings)?, cli.format),
        Commands::Decode { file } => codec::decode(&file, cli.format),
        Commands::Encode { definition, out, version } => {
            let version = match version {
                Some(raw) => config::parse_version(raw)?,
                None => settings.protocol_version,
            };
            codec::encode(&definition, &out, version)
        }
        Commands::Types => types::handle(cli.format),
    }
}

fn open(settings: &Settings) -> Result<ApplicationRepository> {
    Ok(ApplicationRepository::open(&settings.repository, SystemClock)?)
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource file command handlers

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use dmi_storage::ApplicationRepository;

use crate::output::{format_bytes, handle_list, OutputFormat};

#[derive(Args)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

#[derive(Subcommand)]
pub enum ResourceCommand {
    /// List an application's resource files
    List { id: String },
    /// Print a resource file to stdout
    Cat { id: String, path: String },
    /// Store a file under a resource path, replacing any existing one
    Add {
        id: String,
        /// Relative path inside the resource tree (e.g. `xsl/order.xsl`)
        path: String,
        /// Local file to copy
        file: PathBuf,
    },
    /// Delete a resource file
    Rm { id: String, path: String },
}

pub fn handle(command: ResourceCommand, repo: &ApplicationRepository, format: OutputFormat) -> Result<()> {
    match command {
        ResourceCommand::List { id } => {
            let paths = repo.resources(&id)?;
            handle_list(format, &paths, "No resources", |paths, out| {
                for path in paths {
                    writeln!(out, "{path}")?;
                }
                Ok(())
            })?;
        }
        ResourceCommand::Cat { id, path } => {
            let data = repo.read_resource(&id, &path)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.flush()?;
        }
        ResourceCommand::Add { id, path, file } => {
            let data =
                std::fs::read(&file).with_context(|| format!("cannot read {}", file.display()))?;
            repo.put_resource(&id, &path, &data)?;
            println!("Stored {path} ({})", format_bytes(data.len()));
        }
        ResourceCommand::Rm { id, path } => {
            repo.delete_resource(&id, &path)?;
            println!("Deleted {path}");
        }
    }
    Ok(())
}

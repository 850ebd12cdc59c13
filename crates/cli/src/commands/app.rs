// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application command handlers

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use dmi_core::{Application, LifecycleAction};
use dmi_storage::ApplicationRepository;
use serde::Serialize;

use crate::color;
use crate::definition::read_application;
use crate::exit_error::{ExitError, NOT_FOUND};
use crate::output::{format_bytes, format_or_json, format_timestamp, handle_list, write_table, OutputFormat};

/// Characters of the id suffix shown in tables
const SHORT_ID: usize = 8;

#[derive(Args)]
pub struct AppArgs {
    #[command(subcommand)]
    pub command: AppCommand,
}

#[derive(Subcommand)]
pub enum AppCommand {
    /// List installed applications
    List {},
    /// Show an application's services and routes
    Show {
        /// Application id or unique id prefix
        id: String,
    },
    /// Install an application from a JSON definition or DMI envelope
    Add {
        /// Definition file
        definition: PathBuf,
        /// Directory of resource files to install with it
        #[arg(long)]
        resources: Option<PathBuf>,
    },
    /// Delete an application and its resources
    Remove {
        id: String,
        /// Remove even while launching, running or stopping
        #[arg(long)]
        force: bool,
    },
    /// Install a copy under a new name
    Copy { id: String, new_name: String },
    /// Write an application and its resources to an archive file
    Export { id: String, file: PathBuf },
    /// Install an application from an archive file
    Import {
        file: PathBuf,
        /// Replace an existing application with the same id
        #[arg(long)]
        replace: bool,
    },
    /// Mark an installed application as deployed
    Deploy { id: String },
    /// Start launching a deployed or stopped application
    Launch { id: String },
    /// Report that a launching application is running
    Running { id: String },
    /// Start stopping a running application
    Stop { id: String },
    /// Report that a stopping application has stopped
    Stopped { id: String },
    /// Return a deployed or stopped application to installed
    Undeploy { id: String },
    /// Record a failure
    Fail { id: String, reason: String },
}

impl AppCommand {
    /// The lifecycle action behind a transition subcommand.
    fn transition(&self) -> Option<(&str, LifecycleAction)> {
        let transition = match self {
            Self::Deploy { id } => (id, LifecycleAction::Deploy),
            Self::Launch { id } => (id, LifecycleAction::Launch),
            Self::Running { id } => (id, LifecycleAction::MarkRunning),
            Self::Stop { id } => (id, LifecycleAction::Stop),
            Self::Stopped { id } => (id, LifecycleAction::MarkStopped),
            Self::Undeploy { id } => (id, LifecycleAction::Undeploy),
            Self::Fail { id, reason } => (id, LifecycleAction::Fail { reason: reason.clone() }),
            _ => return None,
        };
        Some((transition.0.as_str(), transition.1))
    }
}

pub fn handle(command: AppCommand, repo: &ApplicationRepository, format: OutputFormat) -> Result<()> {
    if let Some((id, action)) = command.transition() {
        return transition(repo, id, &action, format);
    }

    match command {
        AppCommand::List {} => {
            let apps = repo.list();
            handle_list(format, &apps, "No applications installed", |apps, out| {
                write_table(out, &["ID", "NAME", "VERSION", "STATE", "SERVICES", "MODIFIED"], &rows(apps))
            })?;
        }
        AppCommand::Show { id } => {
            let app = find(repo, &id)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&app)?),
                OutputFormat::Text => {
                    let resources = repo.resources(app.id.as_str())?;
                    print_application(&mut std::io::stdout(), &app, &resources)?;
                }
            }
        }
        AppCommand::Add { definition, resources } => {
            let app = read_application(&definition)?;
            let app = repo.add(app, resources.as_deref())?;
            format_or_json(format, &app, || {
                println!("Added application '{}' ({})", app.name, app.id);
            })?;
        }
        AppCommand::Remove { id, force } => {
            let app = repo.remove(&id, force)?;
            format_or_json(format, &app, || {
                println!("Removed application '{}' ({})", app.name, app.id);
            })?;
        }
        AppCommand::Copy { id, new_name } => {
            let copy = repo.duplicate(&id, &new_name)?;
            format_or_json(format, &copy, || {
                println!("Copied to '{}' ({})", copy.name, copy.id);
            })?;
        }
        AppCommand::Export { id, file } => {
            let app = find(repo, &id)?;
            let bytes = repo.export_archive(app.id.as_str())?;
            std::fs::write(&file, &bytes)
                .with_context(|| format!("cannot write {}", file.display()))?;
            let exported =
                Exported { id: app.id.as_str(), name: &app.name, file: &file, bytes: bytes.len() };
            format_or_json(format, &exported, || {
                println!(
                    "Exported '{}' to {} ({})",
                    app.name,
                    file.display(),
                    format_bytes(bytes.len())
                );
            })?;
        }
        AppCommand::Import { file, replace } => {
            let bytes =
                std::fs::read(&file).with_context(|| format!("cannot read {}", file.display()))?;
            let app = repo.import_archive(&bytes, replace)?;
            format_or_json(format, &app, || {
                println!("Imported application '{}' ({})", app.name, app.id);
            })?;
        }
        _ => {}
    }
    Ok(())
}

/// JSON summary of a written archive.
#[derive(Serialize)]
struct Exported<'a> {
    id: &'a str,
    name: &'a str,
    file: &'a Path,
    bytes: usize,
}

fn transition(
    repo: &ApplicationRepository,
    id: &str,
    action: &LifecycleAction,
    format: OutputFormat,
) -> Result<()> {
    let from = find(repo, id)?;
    let to = repo.apply(from.id.as_str(), action)?;
    let app = find(repo, from.id.as_str())?;
    format_or_json(format, &app, || {
        println!(
            "{}: {} -> {}",
            app.name,
            color::state(&from.state.to_string()),
            color::state(&to.to_string())
        );
    })
}

fn find(repo: &ApplicationRepository, id: &str) -> Result<Application> {
    repo.get(id).ok_or_else(|| ExitError::new(NOT_FOUND, format!("application not found: {id}")).into())
}

fn rows(apps: &[Application]) -> Vec<Vec<String>> {
    apps.iter()
        .map(|app| {
            vec![
                app.id.short(SHORT_ID).to_string(),
                app.name.clone(),
                app.version.clone(),
                color::state(&app.state.to_string()),
                app.services.len().to_string(),
                format_timestamp(app.modified_ms),
            ]
        })
        .collect()
}

pub(crate) fn print_application(
    out: &mut dyn Write,
    app: &Application,
    resources: &[String],
) -> std::io::Result<()> {
    writeln!(out, "{} {}", color::header("Application:"), app.name)?;
    writeln!(out, "  {} {}", color::context("id:"), app.id)?;
    writeln!(out, "  {} {}", color::context("version:"), app.version)?;
    if !app.category.is_empty() {
        writeln!(out, "  {} {}", color::context("category:"), app.category)?;
    }
    if !app.description.is_empty() {
        writeln!(out, "  {} {}", color::context("description:"), app.description)?;
    }
    writeln!(out, "  {} {}", color::context("state:"), color::state(&app.state.to_string()))?;
    if let Some(error) = &app.last_error {
        writeln!(out, "  {} {}", color::context("last error:"), error)?;
    }
    writeln!(out, "  {} {}", color::context("created:"), format_timestamp(app.created_ms))?;
    writeln!(out, "  {} {}", color::context("modified:"), format_timestamp(app.modified_ms))?;

    if !app.services.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", color::header("Services:"))?;
        for service in &app.services {
            writeln!(
                out,
                "  {} {}",
                service.name,
                color::muted(&format!("({} {}, {})", service.component, service.component_version, service.launch))
            )?;
            for port in &service.ports {
                writeln!(
                    out,
                    "    {} {} {}",
                    port.name,
                    color::muted(&port.kind.to_string()),
                    port.destination
                )?;
            }
        }
    }

    if !app.routes.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", color::header("Routes:"))?;
        for route in &app.routes {
            let mut line = format!("  {}: {} -> {}", route.name, route.source, route.target);
            if let Some(selector) = &route.selector {
                line.push_str(&format!(" [{selector}]"));
            }
            if !route.enabled {
                line.push_str(&color::muted(" (disabled)"));
            }
            writeln!(out, "{line}")?;
        }
    }

    if !resources.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", color::header("Resources:"))?;
        for path in resources {
            writeln!(out, "  {path}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! stderr logging via `tracing-subscriber`.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "debug";

/// Pick the filter directive: `DMI_LOG` > `-v` > config `log` > `warn`.
pub fn filter_directive(env: Option<String>, verbose: bool, config: Option<&str>) -> String {
    if let Some(directive) = env {
        return directive;
    }
    if verbose {
        return VERBOSE_FILTER.to_string();
    }
    config.unwrap_or(DEFAULT_FILTER).to_string()
}

pub fn init(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

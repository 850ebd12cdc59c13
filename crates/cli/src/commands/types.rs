// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dmictl types`: the object type registry

use anyhow::Result;
use dmi_wire::registry;
use serde::Serialize;

use crate::output::{handle_list, write_table, OutputFormat};

#[derive(Debug, PartialEq, Serialize)]
pub struct TypeRow {
    pub tag: u16,
    pub name: &'static str,
}

pub fn registered() -> Vec<TypeRow> {
    registry::entries().iter().map(|e| TypeRow { tag: e.tag.0, name: e.name }).collect()
}

pub fn handle(format: OutputFormat) -> Result<()> {
    handle_list(format, &registered(), "No registered types", |rows, out| {
        let cells: Vec<Vec<String>> =
            rows.iter().map(|r| vec![r.tag.to_string(), r.name.to_string()]).collect();
        write_table(out, &["TAG", "NAME"], &cells)
    })
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

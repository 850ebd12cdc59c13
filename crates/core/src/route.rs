// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message routes between service ports.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a route within an application.
    pub struct RouteId("rte-");
}

/// A port on a named service instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub service: String,
    pub port: String,
}

impl Endpoint {
    pub fn new(service: impl Into<String>, port: impl Into<String>) -> Self {
        Self { service: service.into(), port: port.into() }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.service, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub id: RouteId,
    #[serde(default)]
    pub name: String,
    pub source: Endpoint,
    pub target: Endpoint,
    /// Message selector evaluated against message properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Transformation (e.g. stylesheet name) applied in transit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation: Option<String>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl Route {
    pub fn new(name: impl Into<String>, source: Endpoint, target: Endpoint) -> Self {
        Self {
            id: RouteId::new(),
            name: name.into(),
            source,
            target,
            selector: None,
            transformation: None,
            enabled: true,
        }
    }

    /// Whether either end of the route sits on `service`.
    pub fn touches(&self, service: &str) -> bool {
        self.source.service == service || self.target.service == service
    }

    crate::setters! {
        set {
            with_enabled => enabled: bool,
        }
        option {
            with_selector => selector: String,
            with_transformation => transformation: String,
        }
    }
}

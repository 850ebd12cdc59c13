// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service instances placed inside an application.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::port::Port;

crate::define_id! {
    /// Unique identifier for a service instance within an application.
    pub struct ServiceId("svc-");
}

/// How the peer server starts the service process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchKind {
    /// Runs inside the peer server process
    #[default]
    InMemory,
    /// Runs as a separate child process
    Separate,
    /// Started by an operator outside the bus
    Manual,
}

crate::simple_display! {
    LaunchKind {
        InMemory => "in-memory",
        Separate => "separate",
        Manual => "manual",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    #[serde(default)]
    pub id: ServiceId,
    /// Instance name, unique within the application
    pub name: String,
    /// Service component type the instance runs (e.g. "xslt", "jms-out")
    pub component: String,
    #[serde(default)]
    pub component_version: String,
    #[serde(default)]
    pub launch: LaunchKind,
    /// Runtime arguments, in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, String>,
    /// Peer server the instance is pinned to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_server: Option<String>,
    #[serde(default)]
    pub ports: Vec<Port>,
}

impl ServiceInstance {
    pub fn new(name: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            id: ServiceId::new(),
            name: name.into(),
            component: component.into(),
            component_version: String::new(),
            launch: LaunchKind::default(),
            parameters: IndexMap::new(),
            peer_server: None,
            ports: Vec::new(),
        }
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    crate::setters! {
        into {
            with_component_version => component_version: String,
        }
        set {
            with_launch => launch: LaunchKind,
        }
        option {
            with_peer_server => peer_server: String,
        }
    }
}

crate::builder! {
    pub struct ServiceInstanceBuilder => ServiceInstance {
        into {
            name: String = "transformer",
            component: String = "xslt",
            component_version: String = "4.0",
        }
        set {
            launch: LaunchKind = LaunchKind::InMemory,
            parameters: IndexMap<String, String> = IndexMap::new(),
            ports: Vec<Port> = vec![Port::input("IN_PORT", "transformer.in"), Port::output("OUT_PORT", "transformer.out")],
        }
        option {
            peer_server: String = None,
        }
        computed {
            id: ServiceId = ServiceId::new(),
        }
    }
}

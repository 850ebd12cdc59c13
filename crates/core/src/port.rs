// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service ports and the destinations they bind to.

use serde::{Deserialize, Serialize};

/// Direction of a port on a service instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
    Input,
    Output,
    /// Output port that only carries error messages
    Fault,
}

crate::simple_display! {
    PortKind {
        Input => "input",
        Output => "output",
        Fault => "fault",
    }
}

impl PortKind {
    /// Whether messages leave the service through this port.
    pub fn is_outbound(self) -> bool {
        matches!(self, PortKind::Output | PortKind::Fault)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationType {
    #[default]
    Queue,
    Topic,
}

crate::simple_display! {
    DestinationType {
        Queue => "queue",
        Topic => "topic",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub kind: PortKind,
    /// Transport destination name the port reads from or writes to
    pub destination: String,
    #[serde(default)]
    pub destination_type: DestinationType,
    /// MIME type or schema reference for message bodies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub persistent: bool,
}

impl Port {
    pub fn new(name: impl Into<String>, kind: PortKind, destination: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            destination: destination.into(),
            destination_type: DestinationType::Queue,
            content_type: None,
            persistent: false,
        }
    }

    pub fn input(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::new(name, PortKind::Input, destination)
    }

    pub fn output(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::new(name, PortKind::Output, destination)
    }

    crate::setters! {
        set {
            with_destination_type => destination_type: DestinationType,
            with_persistent => persistent: bool,
        }
        option {
            with_content_type => content_type: String,
        }
    }
}

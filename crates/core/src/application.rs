// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application definitions: a named set of service instances wired by routes.

use serde::{Deserialize, Serialize};

use crate::lifecycle::{ApplicationState, LifecycleAction, LifecycleError};
use crate::route::{Route, RouteId};
use crate::service::{ServiceId, ServiceInstance};

crate::define_id! {
    /// Unique identifier for an application definition.
    ///
    /// Doubles as the application's directory name in the repository.
    pub struct ApplicationId("app-");
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub id: ApplicationId,
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub state: ApplicationState,
    #[serde(default)]
    pub services: Vec<ServiceInstance>,
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Epoch ms when first stored (0 until the repository stamps it)
    #[serde(default)]
    pub created_ms: u64,
    #[serde(default)]
    pub modified_ms: u64,
    /// Reason given with the most recent `Fail` transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Application {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ApplicationId::new(),
            name: name.into(),
            version: default_version(),
            description: String::new(),
            category: String::new(),
            state: ApplicationState::Installed,
            services: Vec::new(),
            routes: Vec::new(),
            created_ms: 0,
            modified_ms: 0,
            last_error: None,
        }
    }

    pub fn service(&self, name: &str) -> Option<&ServiceInstance> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn route_mut(&mut self, id: &RouteId) -> Option<&mut Route> {
        self.routes.iter_mut().find(|r| &r.id == id)
    }

    /// Routes with either end on the named service.
    pub fn routes_touching<'a>(&'a self, service: &'a str) -> impl Iterator<Item = &'a Route> {
        self.routes.iter().filter(move |r| r.touches(service))
    }

    /// Apply a lifecycle action, updating `state` and `last_error`.
    pub fn apply(&mut self, action: &LifecycleAction) -> Result<ApplicationState, LifecycleError> {
        let next = self.state.next(action)?;
        match action {
            LifecycleAction::Fail { reason } => self.last_error = Some(reason.clone()),
            LifecycleAction::Launch => self.last_error = None,
            _ => {}
        }
        self.state = next;
        Ok(next)
    }

    /// Deep copy under a new name with fresh ids, back in `Installed` state.
    ///
    /// Routes address services by name, so they stay valid without rewriting.
    pub fn duplicate(&self, new_name: impl Into<String>) -> Application {
        let mut copy = self.clone();
        copy.id = ApplicationId::new();
        copy.name = new_name.into();
        copy.state = ApplicationState::Installed;
        copy.created_ms = 0;
        copy.modified_ms = 0;
        copy.last_error = None;
        for service in &mut copy.services {
            service.id = ServiceId::new();
        }
        for route in &mut copy.routes {
            route.id = RouteId::new();
        }
        copy
    }

    pub fn with_service(mut self, service: ServiceInstance) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    crate::setters! {
        into {
            with_version => version: String,
            with_description => description: String,
            with_category => category: String,
        }
    }
}

#[cfg(test)]
#[path = "application_tests.rs"]
mod tests;

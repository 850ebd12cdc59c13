// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural checks run before an application is stored.

use std::collections::HashSet;

use thiserror::Error;

use crate::application::Application;
use crate::port::PortKind;
use crate::route::{Endpoint, RouteId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("application name is empty")]
    EmptyName,
    #[error("service instance name is empty")]
    EmptyServiceName,
    #[error("duplicate service instance '{0}'")]
    DuplicateService(String),
    #[error("service '{service}' declares port '{port}' twice")]
    DuplicatePort { service: String, port: String },
    #[error("duplicate route id {0}")]
    DuplicateRoute(RouteId),
    #[error("route {route} references unknown service '{service}'")]
    UnknownService { route: RouteId, service: String },
    #[error("route {route} references unknown port {endpoint}")]
    UnknownPort { route: RouteId, endpoint: Endpoint },
    #[error("route {route} must leave through an output port, {endpoint} is {kind}")]
    SourceNotOutbound { route: RouteId, endpoint: Endpoint, kind: PortKind },
    #[error("route {route} must enter through an input port, {endpoint} is {kind}")]
    TargetNotInbound { route: RouteId, endpoint: Endpoint, kind: PortKind },
}

impl Application {
    /// Check naming uniqueness and that every route connects existing ports
    /// in the right direction. Reports the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let mut services = HashSet::new();
        for service in &self.services {
            if service.name.trim().is_empty() {
                return Err(ValidationError::EmptyServiceName);
            }
            if !services.insert(service.name.as_str()) {
                return Err(ValidationError::DuplicateService(service.name.clone()));
            }
            let mut ports = HashSet::new();
            for port in &service.ports {
                if !ports.insert(port.name.as_str()) {
                    return Err(ValidationError::DuplicatePort {
                        service: service.name.clone(),
                        port: port.name.clone(),
                    });
                }
            }
        }

        let mut routes = HashSet::new();
        for route in &self.routes {
            if !routes.insert(&route.id) {
                return Err(ValidationError::DuplicateRoute(route.id.clone()));
            }
            let source = self.port_kind(&route.id, &route.source)?;
            if !source.is_outbound() {
                return Err(ValidationError::SourceNotOutbound {
                    route: route.id.clone(),
                    endpoint: route.source.clone(),
                    kind: source,
                });
            }
            let target = self.port_kind(&route.id, &route.target)?;
            if target != PortKind::Input {
                return Err(ValidationError::TargetNotInbound {
                    route: route.id.clone(),
                    endpoint: route.target.clone(),
                    kind: target,
                });
            }
        }
        Ok(())
    }

    fn port_kind(&self, route: &RouteId, endpoint: &Endpoint) -> Result<PortKind, ValidationError> {
        let service = self.service(&endpoint.service).ok_or_else(|| {
            ValidationError::UnknownService { route: route.clone(), service: endpoint.service.clone() }
        })?;
        service.port(&endpoint.port).map(|p| p.kind).ok_or_else(|| ValidationError::UnknownPort {
            route: route.clone(),
            endpoint: endpoint.clone(),
        })
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application definitions: applications, services, ports, routes.

use dmi_core::{
    Application, ApplicationArchive, ApplicationId, ArchiveEntry, Endpoint, Port, Route, RouteId,
    ServiceId, ServiceInstance,
};
use indexmap::IndexMap;

use crate::codec::{DmiReader, DmiWriter};
use crate::error::WireError;
use crate::object::{DmiObject, TypeTag};
use crate::version::ProtocolVersion as V;

impl DmiObject for Port {
    const TAG: TypeTag = TypeTag::PORT;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(&self.name)?;
        w.put_enum(self.kind);
        w.put_str(&self.destination)?;
        w.put_enum(self.destination_type);
        w.put_bool(self.persistent);
        if w.since(V::V2) {
            w.put_opt_str(self.content_type.as_deref())?;
        }
        Ok(())
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        Ok(Port {
            name: r.get_str()?,
            kind: r.get_enum()?,
            destination: r.get_str()?,
            destination_type: r.get_enum()?,
            persistent: r.get_bool()?,
            content_type: if r.since(V::V2) { r.get_opt_str()? } else { None },
        })
    }
}

impl DmiObject for ServiceInstance {
    const TAG: TypeTag = TypeTag::SERVICE_INSTANCE;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(self.id.as_str())?;
        w.put_str(&self.name)?;
        w.put_str(&self.component)?;
        w.put_str(&self.component_version)?;
        w.put_enum(self.launch);
        w.put_objects(&self.ports)?;
        if w.since(V::V2) {
            w.put_map(&self.parameters)?;
        }
        if w.since(V::V3) {
            w.put_opt_str(self.peer_server.as_deref())?;
        }
        Ok(())
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        Ok(ServiceInstance {
            id: ServiceId::from_string(r.get_str()?),
            name: r.get_str()?,
            component: r.get_str()?,
            component_version: r.get_str()?,
            launch: r.get_enum()?,
            ports: r.get_objects()?,
            parameters: if r.since(V::V2) { r.get_map()? } else { IndexMap::new() },
            peer_server: if r.since(V::V3) { r.get_opt_str()? } else { None },
        })
    }
}

fn put_endpoint(w: &mut DmiWriter, endpoint: &Endpoint) -> Result<(), WireError> {
    w.put_str(&endpoint.service)?;
    w.put_str(&endpoint.port)
}

fn get_endpoint(r: &mut DmiReader) -> Result<Endpoint, WireError> {
    Ok(Endpoint { service: r.get_str()?, port: r.get_str()? })
}

impl DmiObject for Route {
    const TAG: TypeTag = TypeTag::ROUTE;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(self.id.as_str())?;
        w.put_str(&self.name)?;
        put_endpoint(w, &self.source)?;
        put_endpoint(w, &self.target)?;
        w.put_bool(self.enabled);
        if w.since(V::V2) {
            w.put_opt_str(self.selector.as_deref())?;
        }
        if w.since(V::V3) {
            w.put_opt_str(self.transformation.as_deref())?;
        }
        Ok(())
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        Ok(Route {
            id: RouteId::from_string(r.get_str()?),
            name: r.get_str()?,
            source: get_endpoint(r)?,
            target: get_endpoint(r)?,
            enabled: r.get_bool()?,
            selector: if r.since(V::V2) { r.get_opt_str()? } else { None },
            transformation: if r.since(V::V3) { r.get_opt_str()? } else { None },
        })
    }
}

impl DmiObject for Application {
    const TAG: TypeTag = TypeTag::APPLICATION;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(self.id.as_str())?;
        w.put_str(&self.name)?;
        w.put_str(&self.version)?;
        w.put_enum(self.state);
        w.put_objects(&self.services)?;
        w.put_objects(&self.routes)?;
        if w.since(V::V2) {
            w.put_str(&self.description)?;
            w.put_str(&self.category)?;
        }
        if w.since(V::V3) {
            w.put_u64(self.created_ms);
            w.put_u64(self.modified_ms);
            w.put_opt_str(self.last_error.as_deref())?;
        }
        Ok(())
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        let id = ApplicationId::from_string(r.get_str()?);
        let name = r.get_str()?;
        let version = r.get_str()?;
        let state = r.get_enum()?;
        let services = r.get_objects()?;
        let routes = r.get_objects()?;
        let (description, category) =
            if r.since(V::V2) { (r.get_str()?, r.get_str()?) } else { Default::default() };
        let (created_ms, modified_ms, last_error) = if r.since(V::V3) {
            (r.get_u64()?, r.get_u64()?, r.get_opt_str()?)
        } else {
            (0, 0, None)
        };
        Ok(Application {
            id,
            name,
            version,
            description,
            category,
            state,
            services,
            routes,
            created_ms,
            modified_ms,
            last_error,
        })
    }
}

impl DmiObject for ApplicationArchive {
    const TAG: TypeTag = TypeTag::ARCHIVE;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_object(&self.application)?;
        w.put_list(&self.entries, |w, entry| {
            w.put_str(&entry.path)?;
            w.put_bytes(&entry.data)
        })
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        let application = r.get_object()?;
        let entries =
            r.get_list(|r| Ok(ArchiveEntry { path: r.get_str()?, data: r.get_bytes()? }))?;
        Ok(ApplicationArchive { application, entries })
    }
}

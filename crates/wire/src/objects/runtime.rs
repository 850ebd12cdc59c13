// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime status and peer server layouts.

use dmi_core::{ApplicationId, ApplicationRuntimeStatus, PeerServer, ServerRole, ServiceRuntimeStatus};

use crate::codec::{DmiReader, DmiWriter};
use crate::error::WireError;
use crate::object::{DmiObject, TypeTag};
use crate::version::ProtocolVersion as V;

impl DmiObject for ServiceRuntimeStatus {
    const TAG: TypeTag = TypeTag::SERVICE_STATUS;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(self.application.as_str())?;
        w.put_str(&self.service)?;
        w.put_enum(self.status);
        if w.since(V::V2) {
            w.put_opt_str(self.error_message.as_deref())?;
        }
        if w.since(V::V3) {
            w.put_opt_str(self.peer_server.as_deref())?;
            w.put_u64(self.started_ms);
        }
        Ok(())
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        let application = ApplicationId::from_string(r.get_str()?);
        let service = r.get_str()?;
        let status = r.get_enum()?;
        let error_message = if r.since(V::V2) { r.get_opt_str()? } else { None };
        let (peer_server, started_ms) =
            if r.since(V::V3) { (r.get_opt_str()?, r.get_u64()?) } else { (None, 0) };
        Ok(ServiceRuntimeStatus {
            application,
            service,
            status,
            peer_server,
            started_ms,
            error_message,
        })
    }
}

impl DmiObject for ApplicationRuntimeStatus {
    const TAG: TypeTag = TypeTag::APPLICATION_STATUS;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(self.application.as_str())?;
        w.put_str(&self.name)?;
        w.put_enum(self.state);
        w.put_objects(&self.services)
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        Ok(ApplicationRuntimeStatus {
            application: ApplicationId::from_string(r.get_str()?),
            name: r.get_str()?,
            state: r.get_enum()?,
            services: r.get_objects()?,
        })
    }
}

impl DmiObject for PeerServer {
    const TAG: TypeTag = TypeTag::PEER_SERVER;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(&self.name)?;
        w.put_str(&self.host)?;
        w.put_u16(self.port);
        w.put_str(&self.version)?;
        w.put_bool(self.available);
        if w.since(V::V3) {
            w.put_enum(self.role);
        }
        Ok(())
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        Ok(PeerServer {
            name: r.get_str()?,
            host: r.get_str()?,
            port: r.get_u16()?,
            version: r.get_str()?,
            available: r.get_bool()?,
            role: if r.since(V::V3) { r.get_enum()? } else { ServerRole::Standalone },
        })
    }
}
